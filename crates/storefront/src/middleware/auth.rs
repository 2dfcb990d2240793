//! Authentication extractors.
//!
//! Identity comes from the signed `session` cookie (see
//! [`crate::services::identity`]). Gated page actions redirect to the login
//! page with a local return path; API routes get a 401.

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, Method, StatusCode, header::REFERER, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

use crate::models::SessionData;
use crate::state::AppState;

/// Extractor that requires a signed-in visitor.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.name)
/// }
/// ```
pub struct RequireAuth(pub SessionData);

/// Error returned when authentication is required but the visitor is signed out.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthRejection {
    /// Redirect to the login page, returning to the given local path.
    RedirectToLogin { return_to: String },
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin { return_to } => {
                Redirect::to(&login_url(&return_to)).into_response()
            }
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Not logged in" })),
            )
                .into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        if let Some(user) = state.identity().from_headers(&parts.headers) {
            return Ok(Self(user));
        }

        if parts.uri.path().starts_with("/api/") {
            return Err(AuthRejection::Unauthorized);
        }

        Err(AuthRejection::RedirectToLogin {
            return_to: return_path(parts, &state),
        })
    }
}

/// Extractor that optionally gets the signed-in visitor.
pub struct OptionalAuth(pub Option<SessionData>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        Ok(Self(state.identity().from_headers(&parts.headers)))
    }
}

/// `/login?returnTo=...` for a local path.
#[must_use]
pub fn login_url(return_to: &str) -> String {
    format!(
        "/login?returnTo={}",
        urlencoding::encode(&sanitize_return_to(Some(return_to)))
    )
}

/// Keep `return_to` only if it is a local absolute path.
///
/// Anything else (absent, blank, absolute URL, protocol-relative `//host`,
/// backslash tricks) becomes `/`.
#[must_use]
pub fn sanitize_return_to(return_to: Option<&str>) -> String {
    match return_to.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control) =>
        {
            path.to_owned()
        }
        _ => "/".to_owned(),
    }
}

/// Where to send the visitor back to after login.
///
/// `GET` requests return to themselves. Form posts return to the page they
/// were submitted from, taken from a same-origin `Referer`.
fn return_path(parts: &Parts, state: &AppState) -> String {
    if parts.method == Method::GET {
        let path = parts
            .uri
            .path_and_query()
            .map_or("/", axum::http::uri::PathAndQuery::as_str);
        return sanitize_return_to(Some(path));
    }

    local_referer(&parts.headers, state).unwrap_or_else(|| "/".to_owned())
}

/// Path and query of the `Referer`, if it points at this storefront.
#[must_use]
pub fn local_referer(headers: &HeaderMap, state: &AppState) -> Option<String> {
    let referer = headers
        .get(REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| url::Url::parse(v).ok())?;

    if Some(referer.origin()) != state.config().origin() {
        return None;
    }

    let mut path = referer.path().to_owned();
    if let Some(query) = referer.query() {
        path.push('?');
        path.push_str(query);
    }
    Some(sanitize_return_to(Some(&path)))
}
