//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use aurelia_core::{
    Category, DEFAULT_MAX_PRICE, ListingFilter, ListingSort, category_counts, fallback_catalog,
    merge_listing, refine,
};

use crate::db::{CatalogQuery, CatalogSort};
use crate::middleware::OptionalAuth;
use crate::routes::views::{Nav, ProductCard, load_wishlist};
use crate::state::AppState;

/// Notice shown when the live catalog could not be reached.
pub const FALLBACK_NOTICE: &str = "Showing curated selection while we refresh availability.";

/// Largest quantity offered on the detail page.
pub const MAX_QUANTITY: u32 = 10;

/// Listing query parameters.
///
/// `category` may repeat (one per checked box) and each value may itself be
/// a comma list, so the query string is parsed by hand.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListingQuery {
    pub q: Option<String>,
    /// Comma-separated category list.
    pub category: Option<String>,
    pub max_price: Option<String>,
    pub sort: Option<String>,
}

impl ListingQuery {
    /// Parse a raw query string. Unknown keys are ignored; for single-valued
    /// keys the last occurrence wins.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        let mut categories: Vec<String> = Vec::new();

        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            let value = value.into_owned();
            match key.as_ref() {
                "q" => query.q = Some(value),
                "category" => categories.push(value),
                "max_price" => query.max_price = Some(value),
                "sort" => query.sort = Some(value),
                _ => {}
            }
        }

        if !categories.is_empty() {
            query.category = Some(categories.join(","));
        }
        query
    }

    fn filter(&self) -> ListingFilter {
        ListingFilter {
            query: self.q.clone().unwrap_or_default(),
            categories: self
                .category
                .as_deref()
                .map(Category::parse_list)
                .unwrap_or_default(),
            max_price: self
                .max_price
                .as_deref()
                .and_then(|v| v.trim().parse::<Decimal>().ok())
                .filter(|v| !v.is_sign_negative())
                .unwrap_or_else(|| Decimal::from(DEFAULT_MAX_PRICE)),
            sort: self
                .sort
                .as_deref()
                .and_then(ListingSort::parse)
                .unwrap_or_default(),
        }
    }
}

/// The live read behind a listing filter.
fn live_query(filter: &ListingFilter, page_size: u32) -> CatalogQuery {
    let categories = filter
        .categories
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(",");
    let sort = match filter.sort {
        ListingSort::Featured => CatalogSort::Newest,
        ListingSort::PriceLowHigh => CatalogSort::PriceAsc,
        ListingSort::PriceHighLow => CatalogSort::PriceDesc,
    };

    CatalogQuery::new(Some(1), Some(i64::from(CatalogQuery::MAX_LIMIT)), page_size)
        .with_search(Some(&filter.query))
        .with_categories(Some(&categories))
        .with_sort(sort)
}

/// Detail page query parameters.
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    /// Set after a successful add-to-cart.
    pub added: Option<String>,
}

/// Category checkbox state on the listing page.
pub struct CategoryOption {
    pub slug: &'static str,
    pub label: &'static str,
    pub count: usize,
    pub checked: bool,
}

/// Sort dropdown entry.
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub nav: Nav,
    pub products: Vec<ProductCard>,
    pub query: String,
    pub max_price: String,
    pub categories: Vec<CategoryOption>,
    pub sorts: Vec<SortOption>,
    pub notice: Option<&'static str>,
}

/// Product detail display data.
pub struct ProductDetail {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub category: &'static str,
    pub category_slug: &'static str,
    pub price: String,
    pub images: Vec<String>,
    pub badge: Option<&'static str>,
    pub short_description: String,
    pub description: String,
    pub in_stock: bool,
    pub saved: bool,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub nav: Nav,
    pub product: ProductDetail,
    pub related: Vec<ProductCard>,
    pub quantities: Vec<u32>,
    pub signed_in: bool,
    pub added: bool,
    pub login_url: String,
}

/// Unknown product page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/not_found.html")]
pub struct ProductNotFoundTemplate {
    pub nav: Nav,
    pub slug: String,
}

/// Display the product listing page.
///
/// The static catalog is always listed; live records overlay it when the
/// catalog database answers in time.
#[instrument(skip(state, session, user))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    RawQuery(raw): RawQuery,
) -> impl IntoResponse {
    let filter = ListingQuery::parse(raw.as_deref()).filter();
    let live = state
        .catalog()
        .live_listing(&live_query(&filter, state.config().page_size))
        .await;
    let notice = live.is_none().then_some(FALLBACK_NOTICE);

    let merged = merge_listing(fallback_catalog(), &live.unwrap_or_default());
    let refined = refine(&merged, &filter);
    let wishlist = load_wishlist(&session).await;

    let categories = category_counts(&merged)
        .into_iter()
        .map(|(category, count)| CategoryOption {
            slug: category.as_str(),
            label: category.label(),
            count,
            checked: filter.categories.contains(&category),
        })
        .collect();
    let sorts = ListingSort::ALL
        .into_iter()
        .map(|sort| SortOption {
            value: sort.as_str(),
            label: sort.label(),
            selected: sort == filter.sort,
        })
        .collect();

    ProductsIndexTemplate {
        nav: Nav::load(&session, user.as_ref()).await,
        products: ProductCard::list(&refined, &wishlist),
        query: filter.query.clone(),
        max_price: filter.max_price.normalize().to_string(),
        categories,
        sorts,
        notice,
    }
}

/// Display a product detail page, or the not-found page.
#[instrument(skip(state, session, user))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Path(slug): Path<String>,
    Query(query): Query<DetailQuery>,
) -> Response {
    let nav = Nav::load(&session, user.as_ref()).await;
    let catalog = state.catalog();

    let Some(product) = catalog.find_by_slug(&slug).await else {
        return (StatusCode::NOT_FOUND, ProductNotFoundTemplate { nav, slug }).into_response();
    };

    let related = catalog.related(&product).await;
    let wishlist = load_wishlist(&session).await;

    ProductShowTemplate {
        nav,
        related: ProductCard::list(&related, &wishlist),
        quantities: (1..=MAX_QUANTITY).collect(),
        signed_in: user.is_some(),
        added: query.added.is_some(),
        login_url: crate::middleware::auth::login_url(&format!("/products/{}", product.slug)),
        product: ProductDetail {
            id: product.id.as_str().to_owned(),
            slug: product.slug.clone(),
            name: product.name.clone(),
            category: product.category.label(),
            category_slug: product.category.as_str(),
            price: product.display_price().to_string(),
            images: product
                .images
                .iter()
                .filter(|url| !url.trim().is_empty())
                .cloned()
                .collect(),
            badge: product.badge.map(|b| b.as_str()),
            short_description: product.short_description.clone(),
            description: product.description.clone(),
            in_stock: product.in_stock,
            saved: wishlist.has(&product.id),
        },
    }
    .into_response()
}
