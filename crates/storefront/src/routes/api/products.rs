//! Catalog API.
//!
//! Reads go straight to the live catalog; there is no fallback here, a
//! database failure is a 500.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use aurelia_core::Product;

use crate::db::{CatalogQuery, CatalogSort, ProductRepository};
use crate::state::AppState;

/// `GET /api/products` query parameters.
///
/// Paging values are taken leniently: anything unparseable uses the default.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ProductsParams {
    fn to_query(&self, default_limit: u32) -> CatalogQuery {
        let number = |v: &Option<String>| v.as_deref().and_then(|s| s.trim().parse::<i64>().ok());

        CatalogQuery::new(number(&self.page), number(&self.limit), default_limit)
            .with_search(self.q.as_deref())
            .with_categories(self.category.as_deref())
            .with_sort(self.sort.as_deref().map(CatalogSort::parse).unwrap_or_default())
    }
}

/// One page of products.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub products: Vec<Product>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: i64,
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// List products with search, category filter, sort and paging.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>, Query(params): Query<ProductsParams>) -> Response {
    let query = params.to_query(state.config().page_size);

    match ProductRepository::new(state.pool()).list(&query).await {
        Ok(page) => Json(ProductsResponse {
            total_pages: page.total_pages(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            products: page.products,
        })
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "product listing failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch products")
        }
    }
}

/// Fetch one product by slug.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    match ProductRepository::new(state.pool()).get_by_slug(&slug).await {
        Ok(Some(product)) => Json(product).into_response(),
        Ok(None) => failure(StatusCode::NOT_FOUND, "Product not found"),
        Err(e) => {
            tracing::error!(error = %e, slug, "product lookup failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch product")
        }
    }
}
