//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Keyset page fetch (`id > cursor ORDER BY id LIMIT n`)
//! - Filtered counts and stock statistics
//! - Insert with store-assigned id
//!
//! ## Filter Rendering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 ProductFilter → SQL                                     │
//! │                                                                         │
//! │  ProductFilter { category: BOOKS, cursor: 6553f1..., search: "50%" }   │
//! │       │                                                                 │
//! │       ▼ clauses()                                                       │
//! │  [CategoryEq(BOOKS), IdAfter(6553f1...), NameContains("%50\%%")]       │
//! │       │                                                                 │
//! │       ▼ push_clauses()                                                  │
//! │  WHERE 1=1                                                              │
//! │    AND category = ?                                                     │
//! │    AND id > ?                                                           │
//! │    AND name_folded LIKE ? ESCAPE '\'                                    │
//! │  ORDER BY id ASC LIMIT ?                                                │
//! │                                                                         │
//! │  Every value is a bound parameter; only fixed fragments are pushed.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use catalog_core::query::LIKE_ESCAPE;
use catalog_core::{Clause, NewProduct, Product, ProductFilter, ProductId, SortOrder, Stats};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use crate::id::IdGenerator;

const SELECT_PRODUCTS: &str =
    "SELECT id, name, description, price, stock, category, created_at FROM products WHERE 1=1";

const COUNT_PRODUCTS: &str = "SELECT COUNT(*) FROM products WHERE 1=1";

/// Stock partition used by the stats counts.
#[derive(Debug, Clone, Copy)]
enum StockBucket {
    All,
    InStock,
    OutOfStock,
}

impl StockBucket {
    fn sql(self) -> &'static str {
        match self {
            StockBucket::All => "",
            StockBucket::InStock => " AND stock > 0",
            StockBucket::OutOfStock => " AND stock <= 0",
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// // First page of books, 10 per page (+1 probe row)
/// let filter = ProductFilter::new().with_category(Some(Category::Books));
/// let rows = repo.find(&filter, SortOrder::IdAsc, 11).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
    ids: Arc<IdGenerator>,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool, ids: Arc<IdGenerator>) -> Self {
        ProductRepository { pool, ids }
    }

    /// Fetches up to `limit` products matching `filter`, in `sort` order.
    ///
    /// The caller decides how many rows to ask for; the pagination executor
    /// asks for one more than the page size to detect a next page.
    pub async fn find(
        &self,
        filter: &ProductFilter,
        sort: SortOrder,
        limit: u32,
    ) -> DbResult<Vec<Product>> {
        debug!(?filter, limit, "Fetching products");

        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_PRODUCTS);
        push_clauses(&mut builder, filter);
        match sort {
            SortOrder::IdAsc => builder.push(" ORDER BY id ASC"),
        };
        builder.push(" LIMIT ").push_bind(i64::from(limit));

        let products = builder
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Fetch returned products");
        Ok(products)
    }

    /// Counts products matching `filter`.
    pub async fn count(&self, filter: &ProductFilter) -> DbResult<u64> {
        let mut builder = count_query(filter, StockBucket::All);
        let count: i64 = builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        Ok(to_count(count))
    }

    /// Total, in-stock and out-of-stock counts for `filter`.
    ///
    /// The three counts share one read transaction, so they see the same
    /// snapshot and always add up.
    pub async fn stats(&self, filter: &ProductFilter) -> DbResult<Stats> {
        debug!(?filter, "Computing stats");

        let mut tx = self.pool.begin().await?;

        let mut total_query = count_query(filter, StockBucket::All);
        let total: i64 = total_query.build_query_scalar().fetch_one(&mut *tx).await?;

        let mut in_stock_query = count_query(filter, StockBucket::InStock);
        let in_stock: i64 = in_stock_query
            .build_query_scalar()
            .fetch_one(&mut *tx)
            .await?;

        let mut out_of_stock_query = count_query(filter, StockBucket::OutOfStock);
        let out_of_stock: i64 = out_of_stock_query
            .build_query_scalar()
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Stats {
            total: to_count(total),
            in_stock: to_count(in_stock),
            out_of_stock: to_count(out_of_stock),
        })
    }

    /// Inserts a validated product, assigning its id and creation time.
    ///
    /// ## Returns
    /// The persisted record, exactly as later reads will return it.
    pub async fn insert(&self, product: NewProduct) -> DbResult<Product> {
        let id = self.ids.next_id();
        let created_at = Utc::now();

        debug!(id = %id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, name_folded, description, price, stock, category, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&id)
        .bind(&product.name)
        .bind(product.name.to_lowercase())
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(product.category)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category: product.category,
            created_at,
        })
    }

    /// Gets a product by id.
    ///
    /// ## Returns
    /// * `Ok(Some(product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &ProductId) -> DbResult<Option<Product>> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_PRODUCTS);
        builder.push(" AND id = ").push_bind(id.clone());

        let product = builder
            .build_query_as::<Product>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }
}

/// Appends one `AND ...` fragment per filter clause.
fn push_clauses(builder: &mut QueryBuilder<'_, Sqlite>, filter: &ProductFilter) {
    for clause in filter.clauses() {
        match clause {
            Clause::CategoryEq(category) => {
                builder.push(" AND category = ").push_bind(category);
            }
            Clause::IdAfter(cursor) => {
                builder.push(" AND id > ").push_bind(cursor);
            }
            Clause::NameContains { pattern } => {
                builder
                    .push(" AND name_folded LIKE ")
                    .push_bind(pattern)
                    .push(format_args!(" ESCAPE '{LIKE_ESCAPE}'"));
            }
        }
    }
}

fn count_query(filter: &ProductFilter, bucket: StockBucket) -> QueryBuilder<'static, Sqlite> {
    let mut builder = QueryBuilder::<Sqlite>::new(COUNT_PRODUCTS);
    push_clauses(&mut builder, filter);
    builder.push(bucket.sql());
    builder
}

// COUNT(*) is never negative.
fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================
