//! Product repository: the live catalog.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use aurelia_core::{Badge, Category, Product, ProductId};

use super::{RepositoryError, conflict_or_database};

const PRODUCT_COLUMNS: &str = "id, slug, name, short_description, description, price, images, \
     category, in_stock, tags, badge, created_at";

/// Sort order of the products API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

impl CatalogSort {
    /// Parse an API `sort` value; anything unrecognized sorts newest first.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            _ => Self::Newest,
        }
    }

    const fn order_by(self) -> &'static str {
        match self {
            Self::Newest => " ORDER BY created_at DESC, id ASC",
            Self::PriceAsc => " ORDER BY price ASC, created_at DESC, id ASC",
            Self::PriceDesc => " ORDER BY price DESC, created_at DESC, id ASC",
        }
    }
}

/// A filtered, sorted, paginated catalog read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Full-text search terms.
    pub search: Option<String>,
    /// Category names as given; unknown names match nothing.
    pub categories: Vec<String>,
    pub sort: CatalogSort,
    /// 1-based page number.
    pub page: u32,
    /// Page size, `1..=MAX_LIMIT`.
    pub limit: u32,
}

impl CatalogQuery {
    pub const MAX_LIMIT: u32 = 100;

    /// Build a query from raw paging values, clamping them into range.
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>, default_limit: u32) -> Self {
        let page = u32::try_from(page.map_or(1, |p| p.clamp(1, i64::from(u32::MAX)))).unwrap_or(1);
        let limit = u32::try_from(limit.map_or(i64::from(default_limit), |l| {
            l.clamp(1, i64::from(Self::MAX_LIMIT))
        }))
        .unwrap_or(default_limit);

        Self {
            search: None,
            categories: Vec::new(),
            sort: CatalogSort::default(),
            page,
            limit,
        }
    }

    #[must_use]
    pub fn with_search(mut self, q: Option<&str>) -> Self {
        self.search = q.map(str::trim).filter(|q| !q.is_empty()).map(str::to_owned);
        self
    }

    /// Accept a comma-separated category list.
    #[must_use]
    pub fn with_categories(mut self, raw: Option<&str>) -> Self {
        self.categories = raw
            .unwrap_or_default()
            .split(',')
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: CatalogSort) -> Self {
        self.sort = sort;
        self
    }

    fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    fn push_filters(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(" WHERE TRUE");
        if let Some(search) = &self.search {
            qb.push(" AND search_vector @@ websearch_to_tsquery('simple', ")
                .push_bind(search.clone())
                .push(")");
        }
        if !self.categories.is_empty() {
            qb.push(" AND category = ANY(")
                .push_bind(self.categories.clone())
                .push(")");
        }
    }
}

/// One page of catalog results.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub products: Vec<Product>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

impl CatalogPage {
    /// Number of pages at the current page size (at least 1).
    #[must_use]
    pub fn total_pages(&self) -> i64 {
        let limit = i64::from(self.limit.max(1));
        ((self.total + limit - 1) / limit).max(1)
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    slug: String,
    name: String,
    short_description: String,
    description: String,
    price: Decimal,
    images: Vec<String>,
    category: String,
    in_stock: bool,
    tags: Vec<String>,
    badge: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category: Category = row.category.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("product {}: {e}", row.id))
        })?;
        let badge = row
            .badge
            .as_deref()
            .map(str::parse::<Badge>)
            .transpose()
            .map_err(|e| RepositoryError::DataCorruption(format!("product {}: {e}", row.id)))?;

        Ok(Self {
            id: ProductId::new(row.id),
            slug: row.slug,
            name: row.name,
            category,
            price: row.price,
            images: row.images,
            badge,
            tags: row.tags,
            in_stock: row.in_stock,
            short_description: row.short_description,
            description: row.description,
            created_at: Some(row.created_at),
        })
    }
}

fn into_products(rows: Vec<ProductRow>) -> Result<Vec<Product>, RepositoryError> {
    rows.into_iter().map(Product::try_from).collect()
}

/// Repository for catalog reads and seeding writes.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a page of products matching the query, with the total match count.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a row holds an unknown category or badge.
    pub async fn list(&self, query: &CatalogQuery) -> Result<CatalogPage, RepositoryError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM storefront.product");
        query.push_filters(&mut count);
        let total: i64 = count.build_query_scalar::<i64>().fetch_one(self.pool).await?;

        let mut select =
            QueryBuilder::<Postgres>::new(format!("SELECT {PRODUCT_COLUMNS} FROM storefront.product"));
        query.push_filters(&mut select);
        select
            .push(query.sort.order_by())
            .push(" LIMIT ")
            .push_bind(i64::from(query.limit))
            .push(" OFFSET ")
            .push_bind(query.offset());

        let rows: Vec<ProductRow> = select.build_query_as().fetch_all(self.pool).await?;

        Ok(CatalogPage {
            products: into_products(rows)?,
            total,
            page: query.page,
            limit: query.limit,
        })
    }

    /// Get a product by its slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM storefront.product WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Get every product whose id is in `ids`. Order is unspecified.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = ids.iter().map(|id| id.as_str().to_owned()).collect();

        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM storefront.product WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        into_products(rows)
    }

    /// Products in the same category, excluding one id, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn related(
        &self,
        category: Category,
        exclude: &ProductId,
        limit: u32,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM storefront.product \
             WHERE category = $1 AND id <> $2 \
             ORDER BY created_at DESC, id ASC LIMIT $3"
        ))
        .bind(category.as_str())
        .bind(exclude.as_str())
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        into_products(rows)
    }

    /// Insert a product or overwrite the existing row with the same id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if another product already uses the slug.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn upsert(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO storefront.product
                (id, slug, name, short_description, description, price, images,
                 category, in_stock, tags, badge)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (id) DO UPDATE SET
                slug = EXCLUDED.slug,
                name = EXCLUDED.name,
                short_description = EXCLUDED.short_description,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                images = EXCLUDED.images,
                category = EXCLUDED.category,
                in_stock = EXCLUDED.in_stock,
                tags = EXCLUDED.tags,
                badge = EXCLUDED.badge
            ",
        )
        .bind(product.id.as_str())
        .bind(&product.slug)
        .bind(&product.name)
        .bind(&product.short_description)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.images)
        .bind(product.category.as_str())
        .bind(product.in_stock)
        .bind(&product.tags)
        .bind(product.badge.map(Badge::as_str))
        .execute(self.pool)
        .await
        .map_err(|e| conflict_or_database(e, "product slug"))?;

        Ok(())
    }

    /// Delete every product. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM storefront.product")
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = CatalogQuery::new(None, None, 12);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 12);
        assert_eq!(query.offset(), 0);
        assert_eq!(query.sort, CatalogSort::Newest);
    }

    #[test]
    fn test_query_clamps_paging() {
        let query = CatalogQuery::new(Some(0), Some(5000), 12);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, CatalogQuery::MAX_LIMIT);

        let query = CatalogQuery::new(Some(3), Some(-4), 12);
        assert_eq!(query.limit, 1);
        assert_eq!(query.offset(), 2);
    }

    #[test]
    fn test_query_search_and_categories() {
        let query = CatalogQuery::new(None, None, 12)
            .with_search(Some("   "))
            .with_categories(Some("Rings, ,earrings"));
        assert_eq!(query.search, None);
        assert_eq!(query.categories, vec!["rings", "earrings"]);

        let query = query.with_search(Some(" halo "));
        assert_eq!(query.search.as_deref(), Some("halo"));
    }

    #[test]
    fn test_sort_parse_defaults_to_newest() {
        assert_eq!(CatalogSort::parse("price_asc"), CatalogSort::PriceAsc);
        assert_eq!(CatalogSort::parse("price_desc"), CatalogSort::PriceDesc);
        assert_eq!(CatalogSort::parse("popular"), CatalogSort::Newest);
    }

    #[test]
    fn test_total_pages() {
        let page = |total, limit| CatalogPage {
            products: Vec::new(),
            total,
            page: 1,
            limit,
        };
        assert_eq!(page(0, 12).total_pages(), 1);
        assert_eq!(page(12, 12).total_pages(), 1);
        assert_eq!(page(13, 12).total_pages(), 2);
    }

    fn row(category: &str, badge: Option<&str>) -> ProductRow {
        ProductRow {
            id: "n1".to_string(),
            slug: "celeste-etoile-necklace".to_string(),
            name: "Celeste Étoile Necklace".to_string(),
            short_description: String::new(),
            description: String::new(),
            price: Decimal::from(1699),
            images: vec!["/static/images/neck1.jpg".to_string()],
            category: category.to_string(),
            in_stock: true,
            tags: Vec::new(),
            badge: badge.map(str::to_owned),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let product = Product::try_from(row("necklaces", Some("Bestseller"))).unwrap();
        assert_eq!(product.category, Category::Necklaces);
        assert_eq!(product.badge, Some(Badge::Bestseller));
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_row_with_unknown_category_is_corruption() {
        let err = Product::try_from(row("tiaras", None)).unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }
}
