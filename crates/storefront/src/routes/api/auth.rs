//! Authentication API.

use axum::{
    Json,
    extract::State,
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::routes::auth::{sign_in, sign_out};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// `POST /api/login` body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// `POST /api/signup` body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// `GET /api/me` response.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Sign in with email and password.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let user = AuthService::new(state.pool())
        .login_with_password(&body.email, &body.password)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "login rejected"))?;

    let cookie = sign_in(&state, &user)?;
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(json!({ "ok": true }))))
}

/// Create an account and sign in.
#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse> {
    let user = AuthService::new(state.pool())
        .register_with_password(&body.name, &body.email, &body.password)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "signup rejected"))?;

    let cookie = sign_in(&state, &user)?;
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(json!({ "ok": true }))))
}

/// Sign out: clears the identity cookie and the visitor's cart and wishlist.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<impl IntoResponse> {
    let cookie = sign_out(&state, &session).await?;
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(json!({ "ok": true }))))
}

/// Who is signed in, if anyone.
pub async fn me(OptionalAuth(user): OptionalAuth) -> Json<MeResponse> {
    Json(match user {
        Some(user) => MeResponse {
            logged_in: true,
            email: Some(user.email),
            name: Some(user.name),
        },
        None => MeResponse {
            logged_in: false,
            email: None,
            name: None,
        },
    })
}
