//! Cart and checkout route handlers.
//!
//! The cart lives in the visitor session. Lines are re-enriched from the
//! catalog on every view, so names, prices and images track the live data.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use aurelia_core::catalog::fallback_product;
use aurelia_core::resolve::enrich_cart;
use aurelia_core::{Cart, CartItem, OrderSnapshot, Price, Product, ProductId, fallback_catalog};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::routes::products::MAX_QUANTITY;
use crate::routes::views::{LineView, Nav};
use crate::services::stores::VisitorStore;
use crate::state::AppState;

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: String,
    pub qty: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub id: String,
    pub qty: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nav: Nav,
    pub lines: Vec<LineView>,
    pub item_count: u32,
    pub subtotal: String,
}

/// Cart lines with current catalog data applied.
pub(crate) async fn enriched_lines(state: &AppState, cart: &Cart) -> Vec<CartItem> {
    let ids: Vec<ProductId> = cart.items().iter().map(|i| i.id.clone()).collect();
    let live = state.catalog().live_by_ids(&ids).await;
    enrich_cart(cart.items(), &live, fallback_catalog())
}

/// Display the cart page.
#[instrument(skip(state, session, user))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse> {
    let cart = VisitorStore::new(&session).cart().await?;
    let lines = Cart::from(enriched_lines(&state, &cart).await);

    Ok(CartShowTemplate {
        nav: Nav::load(&session, user.as_ref()).await,
        lines: lines.items().iter().map(LineView::from).collect(),
        item_count: lines.item_count(),
        subtotal: Price::inr(lines.subtotal()).to_string(),
    })
}

/// Current record for an id: live first, then the static catalog.
async fn find_product(state: &AppState, id: &ProductId) -> Option<Product> {
    let live = state.catalog().live_by_ids(std::slice::from_ref(id)).await;
    live.into_iter()
        .find(|p| &p.id == id)
        .or_else(|| fallback_product(id).cloned())
}

/// Add a product to the cart. Requires a signed-in visitor.
#[instrument(skip(state, session, _user))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let id = ProductId::new(form.id.trim());
    let product = find_product(&state, &id)
        .await
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
    let qty = form.qty.unwrap_or(1).clamp(1, MAX_QUANTITY);

    let store = VisitorStore::new(&session);
    let mut cart = store.cart().await?;
    cart.add(product.snapshot(), qty);
    store.save_cart(&cart).await?;

    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", id.as_str())]));
    Ok(Redirect::to(&format!("/products/{}?added=1", product.slug)))
}

/// Set a line's quantity; zero or below removes it.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let store = VisitorStore::new(&session);
    let mut cart = store.cart().await?;
    cart.set_quantity(&ProductId::new(form.id.trim()), form.qty);
    store.save_cart(&cart).await?;
    Ok(Redirect::to("/cart"))
}

/// Remove a line from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let store = VisitorStore::new(&session);
    let mut cart = store.cart().await?;
    cart.remove(&ProductId::new(form.id.trim()));
    store.save_cart(&cart).await?;
    Ok(Redirect::to("/cart"))
}

/// Snapshot the enriched cart for the confirmation page.
///
/// No payment is taken. An empty cart goes back to the cart page.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let store = VisitorStore::new(&session);
    let cart = store.cart().await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart"));
    }

    let snapshot = OrderSnapshot::new(enriched_lines(&state, &cart).await, Utc::now());
    store.save_snapshot(&snapshot).await?;

    tracing::info!(
        items = snapshot.item_count(),
        subtotal = %snapshot.display_subtotal(),
        "checkout snapshot saved"
    );
    Ok(Redirect::to("/order/success"))
}
