use crate::app::state::AppState;
use crate::domain::locale::{Locale, Proxy};
use crate::utils::error::ServiceError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

pub const PROXY_HEADER: &str = "x-api-proxy";
pub const LOCALE_HEADER: &str = "x-api-locale";

/// Per-request caller context built from the proxy and locale headers.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub proxy: Proxy,
}

impl RequestContext {
    pub fn from_headers(headers: &HeaderMap, state: &AppState) -> Self {
        let username = headers
            .get(PROXY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(state.default_agent.as_str());

        let locale = headers
            .get(LOCALE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(Locale::from_code)
            .unwrap_or_default();

        Self {
            proxy: Proxy::new(username, &state.authority, locale),
        }
    }

    pub fn locale(&self) -> &Locale {
        &self.proxy.locale
    }
}

impl FromRequestParts<AppState> for RequestContext {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers, state))
    }
}
