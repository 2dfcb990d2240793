//! Authentication route handlers.
//!
//! Login and signup pages post plain forms. On success the signed identity
//! cookie is set and the visitor is sent to the sanitized `returnTo` path.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::OptionalAuth;
use crate::middleware::auth::sanitize_return_to;
use crate::models::{SessionData, User};
use crate::routes::views::Nav;
use crate::services::auth::{AuthError, AuthService};
use crate::services::identity::{login_cookie, logout_cookie};
use crate::services::stores::VisitorStore;
use crate::state::AppState;

/// Where a successful login lands when no return path was given.
const DEFAULT_LANDING: &str = "/account";

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(rename = "returnTo")]
    pub return_to: Option<String>,
}

/// Signup form data.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(rename = "returnTo")]
    pub return_to: Option<String>,
}

/// Login and signup page query.
#[derive(Debug, Deserialize)]
pub struct ReturnToQuery {
    #[serde(rename = "returnTo")]
    pub return_to: Option<String>,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: Nav,
    pub error: Option<String>,
    pub email: String,
    pub return_to: String,
    pub switch_url: String,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub nav: Nav,
    pub error: Option<String>,
    pub name: String,
    pub email: String,
    pub return_to: String,
    pub switch_url: String,
}

/// Local landing path after login: the given path if safe, else `/account`.
#[must_use]
pub fn landing_path(return_to: Option<&str>) -> String {
    match return_to.map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => sanitize_return_to(Some(path)),
        None => DEFAULT_LANDING.to_string(),
    }
}

/// Link to the other auth page, carrying the return path.
fn switch_url(page: &str, return_to: &str) -> String {
    format!("/{page}?returnTo={}", urlencoding::encode(return_to))
}

/// Sign the identity cookie for a user and record them for error reports.
pub(crate) fn sign_in(state: &AppState, user: &User) -> Result<String> {
    let value = state.identity().encode(&SessionData::from(user))?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(login_cookie(value, state.config().secure_cookies()))
}

/// The logout event: empty cart and wishlist, then expire the identity cookie.
pub(crate) async fn sign_out(state: &AppState, session: &Session) -> Result<String> {
    VisitorStore::new(session).clear_on_logout().await?;
    clear_sentry_user();
    Ok(logout_cookie(state.config().secure_cookies()))
}

/// Re-render a form page for client errors; propagate server errors.
fn rejected(err: AuthError, page: impl FnOnce(String) -> Response) -> Result<Response> {
    if !err.is_client_error() {
        return Err(err.into());
    }
    let app_err = AppError::from(err);
    let mut response = page(app_err.public_message());
    *response.status_mut() = app_err.status();
    Ok(response)
}

/// Display the login page.
pub async fn login_page(
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<ReturnToQuery>,
) -> impl IntoResponse {
    let return_to = landing_path(query.return_to.as_deref());
    LoginTemplate {
        nav: Nav::load(&session, user.as_ref()).await,
        error: None,
        email: String::new(),
        switch_url: switch_url("signup", &return_to),
        return_to,
    }
}

/// Handle login form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let return_to = landing_path(form.return_to.as_deref());

    match AuthService::new(state.pool())
        .login_with_password(&form.email, &form.password)
        .await
    {
        Ok(user) => {
            let cookie = sign_in(&state, &user)?;
            tracing::info!(user_id = %user.id, "signed in");
            Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to(&return_to)).into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, "login rejected");
            let nav = Nav::load(&session, None).await;
            rejected(err, |error| {
                LoginTemplate {
                    nav,
                    error: Some(error),
                    email: form.email.trim().to_string(),
                    switch_url: switch_url("signup", &return_to),
                    return_to,
                }
                .into_response()
            })
        }
    }
}

/// Display the signup page.
pub async fn signup_page(
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<ReturnToQuery>,
) -> impl IntoResponse {
    let return_to = landing_path(query.return_to.as_deref());
    SignupTemplate {
        nav: Nav::load(&session, user.as_ref()).await,
        error: None,
        name: String::new(),
        email: String::new(),
        switch_url: switch_url("login", &return_to),
        return_to,
    }
}

/// Handle signup form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    let return_to = landing_path(form.return_to.as_deref());

    match AuthService::new(state.pool())
        .register_with_password(&form.name, &form.email, &form.password)
        .await
    {
        Ok(user) => {
            let cookie = sign_in(&state, &user)?;
            Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to(&return_to)).into_response())
        }
        Err(err) => {
            tracing::warn!(error = %err, "signup rejected");
            let nav = Nav::load(&session, None).await;
            rejected(err, |error| {
                SignupTemplate {
                    nav,
                    error: Some(error),
                    name: form.name.trim().to_string(),
                    email: form.email.trim().to_string(),
                    switch_url: switch_url("login", &return_to),
                    return_to,
                }
                .into_response()
            })
        }
    }
}

/// Handle logout.
#[instrument(skip(state, session))]
pub async fn logout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cookie = sign_out(&state, &session).await?;
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to("/")).into_response())
}
