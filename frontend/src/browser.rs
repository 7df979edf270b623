//! Thin window bindings: query parameters, location, outward navigation.

use web_sys::UrlSearchParams;

/// Read a query parameter from the current URL. Empty values count as absent.
pub fn query_param(name: &str) -> Option<String> {
    let search = gloo::utils::window().location().search().ok()?;
    let params = UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name).filter(|value| !value.is_empty())
}

pub fn current_origin() -> String {
    gloo::utils::window().location().origin().unwrap_or_default()
}

/// Leave the app for `url`. On success this page is gone; nothing after the
/// call should assume it still runs.
pub fn navigate_to(url: &str) {
    tracing::info!(url, "redirecting after login");
    if gloo::utils::window().location().set_href(url).is_err() {
        tracing::error!(url, "browser refused navigation");
    }
}
