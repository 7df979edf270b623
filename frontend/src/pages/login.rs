use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::browser;
use crate::components::language_selector::LanguageSelector;
use crate::flow::{self, AuthGateway, LoginAction, LoginState};
use crate::i18n::{self, Language};
use crate::services::api::HttpGateway;
use crate::session::BrowserSession;
use crate::storage::BrowserLocalStorage;

#[function_component(Login)]
pub fn login() -> Html {
    let state = use_reducer(|| LoginState::new(i18n::stored_language(&BrowserLocalStorage)));

    // A magic token in the URL means the user came back from their inbox:
    // verify it immediately instead of waiting for input.
    {
        let state = state.clone();
        use_effect_with((), move |_| {
            if let Some(token) = browser::query_param("magic") {
                state.dispatch(LoginAction::VerifyStarted);
                wasm_bindgen_futures::spawn_local(async move {
                    match flow::verify_magic_token(&HttpGateway, &BrowserSession, &token).await {
                        Ok(profile) => {
                            tracing::info!(email = %profile.email, "magic link verified");
                            let target =
                                flow::resolve_redirect(browser::query_param("redirect"));
                            browser::navigate_to(&target);
                        }
                        Err(err) => {
                            tracing::warn!(%err, "magic link verification failed");
                            state.dispatch(LoginAction::VerifyFailed(err));
                        }
                    }
                });
            }
            || ()
        });
    }

    let on_email_input = {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.dispatch(LoginAction::SetEmail(input.value()));
        })
    };

    let on_language_change = {
        let state = state.clone();
        Callback::from(move |language: Language| {
            i18n::store_language(&BrowserLocalStorage, language);
            state.dispatch(LoginAction::SetLanguage(language));
        })
    };

    let on_submit = {
        let state = state.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email = state.email.trim().to_string();
            if email.is_empty() || state.loading() {
                return;
            }
            state.dispatch(LoginAction::SendStarted);
            let state = state.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let target = flow::resolve_redirect(browser::query_param("redirect"));
                let redirect_url = flow::send_redirect_url(&browser::current_origin(), &target);
                match HttpGateway.send_magic_link(&email, &redirect_url).await {
                    Ok(()) => state.dispatch(LoginAction::SendSucceeded),
                    Err(err) => {
                        tracing::warn!(%err, "magic link send failed");
                        state.dispatch(LoginAction::SendFailed(err));
                    }
                }
            });
        })
    };

    let language = state.language;
    let t = move |key: &str| i18n::translate(language, key);

    html! {
        <div class="login-page">
            <header class="login-header">
                <span class="brand">{ t("app.title") }</span>
                <div class="header-controls">
                    <LanguageSelector value={language} on_change={on_language_change} />
                    <span class="badge">{ t("app.badge") }</span>
                </div>
            </header>

            <main class="login-main">
                <section class="login-card">
                    <span class="eyebrow">{ "Magic Link" }</span>
                    <h1>{ t("login.title") }</h1>
                    <p class="subtitle">{ t("login.subtitle") }</p>

                    <form class="login-form" onsubmit={on_submit}>
                        <label for="email">{ t("login.label") }</label>
                        <div class="form-row">
                            <input
                                id="email"
                                type="email"
                                placeholder={t("login.placeholder")}
                                value={state.email.clone()}
                                oninput={on_email_input}
                            />
                            <button type="submit" disabled={state.loading()}>
                                { if state.loading() { t("login.actionSending") } else { t("login.action") } }
                            </button>
                        </div>
                    </form>

                    if let Some(notice) = state.notice {
                        <p class="status">{ notice.text(language) }</p>
                    }
                    if let Some(error) = &state.error {
                        <p class="error">{ error.user_message(language) }</p>
                    }

                    <p class="note">{ t("login.note") }</p>
                </section>

                <aside class="steps-card">
                    <h2>{ t("login.stepsTitle") }</h2>
                    <ul>
                        <li>{ t("login.steps.one") }</li>
                        <li>{ t("login.steps.two") }</li>
                        <li>{ t("login.steps.three") }</li>
                    </ul>
                </aside>
            </main>
        </div>
    }
}
