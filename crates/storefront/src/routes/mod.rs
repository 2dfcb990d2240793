//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness
//! GET  /health/ready           - Database readiness
//!
//! # Products
//! GET  /products               - Listing (q, category, max_price, sort)
//! GET  /products/{slug}        - Product detail
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (requires auth)
//! POST /cart/update            - Set quantity
//! POST /cart/remove            - Remove line
//! POST /checkout               - Snapshot cart, go to confirmation
//! GET  /order/success          - One-time order confirmation
//!
//! # Account (requires auth)
//! GET  /account                - Details and wishlist
//! POST /wishlist/toggle        - Add or remove a wishlist item
//!
//! # Auth
//! GET  /login, POST /login     - Login page and action
//! GET  /signup, POST /signup   - Signup page and action
//! POST /logout                 - Logout action
//!
//! # JSON API
//! GET  /api/products           - Paged catalog
//! GET  /api/products/{slug}    - Single product
//! POST /api/login              - Sign in
//! POST /api/signup             - Create account
//! POST /api/logout             - Sign out
//! GET  /api/me                 - Current identity
//! ```

pub mod account;
pub mod api;
pub mod auth;
pub mod cart;
pub mod home;
pub mod order;
pub mod products;
pub mod views;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the page auth routes. Form posts are rate limited.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(auth::login_page).merge(post(auth::login).layer(auth_rate_limiter())),
        )
        .route(
            "/signup",
            get(auth::signup_page).merge(post(auth::signup).layer(auth_rate_limiter())),
        )
        .route("/logout", post(auth::logout))
}

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    let catalog = Router::new()
        .route("/products", get(api::products::list))
        .route("/products/{slug}", get(api::products::show))
        .layer(api_rate_limiter());

    let identity = Router::new()
        .route("/login", post(api::auth::login))
        .route("/signup", post(api::auth::signup))
        .layer(auth_rate_limiter());

    Router::new()
        .merge(catalog)
        .merge(identity)
        .route("/logout", post(api::auth::logout))
        .route("/me", get(api::auth::me))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .route("/order/success", get(order::success))
        .route("/account", get(account::index))
        .route("/wishlist/toggle", post(account::toggle_wishlist))
        .merge(auth_routes())
        .nest("/api", api_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
