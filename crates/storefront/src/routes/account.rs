//! Account and wishlist route handlers.
//!
//! These routes require authentication.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use aurelia_core::resolve::resolve_ids;
use aurelia_core::{ProductId, fallback_catalog};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::middleware::auth::local_referer;
use crate::routes::views::{Nav, ProductCard};
use crate::services::stores::VisitorStore;
use crate::state::AppState;

/// Account overview page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountIndexTemplate {
    pub nav: Nav,
    pub name: String,
    pub email: String,
    pub wishlist: Vec<ProductCard>,
}

/// Wishlist toggle form data.
#[derive(Debug, Deserialize)]
pub struct ToggleWishlistForm {
    pub id: String,
}

/// Display the account page with the resolved wishlist.
///
/// Wishlist ids that resolve to nothing are left out of the page but stay
/// stored.
#[instrument(skip(state, session, user))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse> {
    let wishlist = VisitorStore::new(&session).wishlist().await?;
    let live = state.catalog().live_by_ids(wishlist.ids()).await;
    let products = resolve_ids(wishlist.ids(), &live, fallback_catalog());

    Ok(AccountIndexTemplate {
        nav: Nav::load(&session, Some(&user)).await,
        wishlist: ProductCard::list(&products, &wishlist),
        name: user.name,
        email: user.email,
    })
}

/// Add or remove a product from the wishlist, then go back where the form was.
#[instrument(skip(state, session, headers, _user))]
pub async fn toggle_wishlist(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_user): RequireAuth,
    headers: HeaderMap,
    Form(form): Form<ToggleWishlistForm>,
) -> Result<Redirect> {
    let store = VisitorStore::new(&session);
    let mut wishlist = store.wishlist().await?;
    let saved = wishlist.toggle(ProductId::new(form.id.trim()));
    store.save_wishlist(&wishlist).await?;

    tracing::debug!(id = %form.id, saved, "wishlist toggled");
    let back = local_referer(&headers, &state).unwrap_or_else(|| "/account".to_string());
    Ok(Redirect::to(&back))
}
