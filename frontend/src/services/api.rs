//! HTTP implementation of the auth gateway.

use gloo_net::http::Request;

use shared::api::{SendMagicLinkRequest, UserDataResponse};

use crate::flow::{
    interpret_role, interpret_send, interpret_user_data, interpret_verify, AuthGateway, FlowError,
};

const MAGIC_BASE_URL: &str = "https://magic.beaconhq.dev";
const DASHBOARD_BASE_URL: &str = "https://dashboard.beaconhq.dev";

/// The production gateway talking to the magic-link issuer and the dashboard
/// service. No retries and no timeouts: a request that never settles leaves
/// the UI loading until the browser gives up on it.
pub struct HttpGateway;

impl AuthGateway for HttpGateway {
    async fn send_magic_link(&self, email: &str, redirect_url: &str) -> Result<(), FlowError> {
        let body = SendMagicLinkRequest {
            email: email.to_string(),
            redirect_url: redirect_url.to_string(),
        };
        let request = Request::post(&format!("{MAGIC_BASE_URL}/login/magic/send"))
            .json(&body)
            .map_err(|err| {
                tracing::error!(%err, "failed to serialize send request");
                FlowError::SendFailed
            })?;
        let response = request.send().await.map_err(|err| {
            tracing::error!(%err, "magic link send request failed");
            FlowError::SendFailed
        })?;

        let status = response.status();
        interpret_send(status, response.json().await.ok())
    }

    async fn verify_token(&self, token: &str) -> Result<String, FlowError> {
        let url = format!(
            "{MAGIC_BASE_URL}/login/magic/verify?token={}",
            urlencoding::encode(token)
        );
        let response = Request::get(&url).send().await.map_err(|err| {
            tracing::error!(%err, "magic link verify request failed");
            FlowError::VerifyFailed
        })?;

        let status = response.status();
        interpret_verify(status, response.json().await.ok())
    }

    async fn fetch_role(&self, email: &str) -> Result<String, FlowError> {
        let url = format!(
            "{DASHBOARD_BASE_URL}/get-role?email={}",
            urlencoding::encode(email)
        );
        let response = Request::get(&url).send().await.map_err(|err| {
            tracing::error!(%err, "role lookup request failed");
            FlowError::VerifyFailed
        })?;

        let status = response.status();
        interpret_role(status, response.json().await.ok())
    }

    async fn fetch_user_data(&self, email: &str) -> Result<UserDataResponse, FlowError> {
        let url = format!(
            "{DASHBOARD_BASE_URL}/userdata?email={}",
            urlencoding::encode(email)
        );
        let response = Request::get(&url).send().await.map_err(|err| {
            tracing::error!(%err, "user data request failed");
            FlowError::VerifyFailed
        })?;

        let status = response.status();
        interpret_user_data(status, response.json().await.ok())
    }
}
