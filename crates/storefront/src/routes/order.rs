//! Order confirmation page.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tower_sessions::Session;
use tracing::instrument;

use aurelia_core::Cart;

use crate::error::Result;
use crate::middleware::OptionalAuth;
use crate::routes::views::{LineView, Nav};
use crate::services::stores::VisitorStore;

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "order/success.html")]
pub struct OrderSuccessTemplate {
    pub nav: Nav,
    pub greeting_name: Option<String>,
    pub lines: Vec<LineView>,
    pub item_count: u32,
    pub subtotal: String,
    pub placed_at: Option<String>,
}

/// Show the confirmation once.
///
/// The snapshot is consumed and the live cart cleared, so a refresh renders
/// the empty confirmation.
#[instrument(skip(session, user))]
pub async fn success(session: Session, OptionalAuth(user): OptionalAuth) -> Result<impl IntoResponse> {
    let store = VisitorStore::new(&session);
    let snapshot = store.take_snapshot().await?;
    store.save_cart(&Cart::new()).await?;

    let (lines, item_count, subtotal, placed_at) = match &snapshot {
        Some(order) if !order.is_empty() => (
            order.items.iter().map(LineView::from).collect(),
            order.item_count(),
            order.display_subtotal().to_string(),
            Some(order.placed_at.format("%d %b %Y, %H:%M UTC").to_string()),
        ),
        _ => (Vec::new(), 0, String::new(), None),
    };

    Ok(OrderSuccessTemplate {
        nav: Nav::load(&session, user.as_ref()).await,
        greeting_name: user.map(|u| u.name),
        lines,
        item_count,
        subtotal,
        placed_at,
    })
}
