//! # Catalog Service
//!
//! The three catalog operations: list a page, search a page, create a product.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    list_page / search_page                              │
//! │                                                                         │
//! │  ListParams / SearchParams (raw strings)                               │
//! │       │                                                                 │
//! │       ▼ into_query()          ← every input error surfaces here         │
//! │  PageQuery { filter, limit }                                           │
//! │       │                                                                 │
//! │       ├──────────────────────────────┐  tokio::try_join!              │
//! │       ▼                              ▼                                 │
//! │  fetch_page(filter, limit)      compute_stats(filter w/o cursor)       │
//! │   find(limit + 1)                three COUNTs, one transaction        │
//! │   Page::from_overfetch                                                 │
//! │       │                              │                                 │
//! │       └──────────────┬───────────────┘                                 │
//! │                      ▼                                                  │
//! │  PageResponse { data, pagination, stats }                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use catalog_core::validation::validate_product_draft;
use catalog_core::{
    ListParams, Page, PageQuery, PageResponse, Product, ProductDraft, ProductFilter,
    SearchParams, SortOrder, Stats, MAX_PAGE_LIMIT,
};
use tracing::{debug, info};

use crate::error::ServiceResult;
use crate::pool::Database;

/// Stateless catalog operations over a [`Database`] handle.
///
/// Cloning is cheap; every clone shares the same pool.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
}

impl CatalogService {
    pub fn new(db: Database) -> Self {
        CatalogService { db }
    }

    /// Returns the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// One page of products, optionally restricted to a category.
    pub async fn list_page(&self, params: ListParams) -> ServiceResult<PageResponse> {
        let started = Instant::now();
        let query = params.into_query()?;

        let response = self.run(&query).await?;

        info!(
            limit = query.limit,
            category = ?query.filter.category,
            returned = response.data.len(),
            has_more = response.pagination.has_more,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Listed products"
        );
        Ok(response)
    }

    /// One page of products whose name contains the search text.
    ///
    /// ## Errors
    /// `MissingSearchQuery` when `q` is absent or blank after normalization,
    /// before the store is touched.
    pub async fn search_page(&self, params: SearchParams) -> ServiceResult<PageResponse> {
        let started = Instant::now();
        let query = params.into_query()?;

        let response = self.run(&query).await?;

        info!(
            search = ?query.filter.search,
            limit = query.limit,
            category = ?query.filter.category,
            returned = response.data.len(),
            has_more = response.pagination.has_more,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Searched products"
        );
        Ok(response)
    }

    /// Validates a raw payload and persists it.
    ///
    /// Nothing is written when validation fails.
    pub async fn create_product(&self, draft: ProductDraft) -> ServiceResult<Product> {
        let product = validate_product_draft(draft)?;
        let product = self.db.products().insert(product).await?;

        info!(id = %product.id, category = %product.category, "Product created");
        Ok(product)
    }

    /// Fetches one page with the limit+1 probe.
    ///
    /// `limit` is clamped to `1..=MAX_PAGE_LIMIT`; validated queries are
    /// already in range.
    pub async fn fetch_page(&self, filter: &ProductFilter, limit: u32) -> ServiceResult<Page> {
        let limit = limit.clamp(1, MAX_PAGE_LIMIT);
        let rows = self
            .db
            .products()
            .find(filter, SortOrder::IdAsc, limit + 1)
            .await?;

        let page = Page::from_overfetch(rows, limit);
        debug!(
            returned = page.records.len(),
            has_more = page.has_more,
            "Page assembled"
        );
        Ok(page)
    }

    /// Stock counts over everything `filter` matches, ignoring its cursor.
    pub async fn compute_stats(&self, filter: &ProductFilter) -> ServiceResult<Stats> {
        let stats = self.db.products().stats(&filter.without_cursor()).await?;
        Ok(stats)
    }

    async fn run(&self, query: &PageQuery) -> ServiceResult<PageResponse> {
        let (page, stats) = tokio::try_join!(
            self.fetch_page(&query.filter, query.limit),
            self.compute_stats(&query.filter),
        )?;

        Ok(PageResponse::new(page, stats))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use crate::pool::DbConfig;
    use catalog_core::{CatalogError, Category, ProductId};

    async fn setup() -> CatalogService {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        CatalogService::new(db)
    }

    fn draft(name: &str, stock: f64, category: &str) -> ProductDraft {
        ProductDraft {
            name: Some(name.to_string()),
            description: Some(format!("About {name}")),
            price: Some(12.5),
            stock: Some(stock),
            category: Some(category.to_string()),
        }
    }

    fn list(limit: &str, cursor: Option<&ProductId>) -> ListParams {
        ListParams {
            cursor: cursor.map(|c| c.to_string()),
            limit: Some(limit.to_string()),
            category: None,
        }
    }

    #[tokio::test]
    async fn test_two_page_walk_with_stats() {
        let service = setup().await;
        let a = service.create_product(draft("A", 0.0, "BOOKS")).await.unwrap();
        let b = service.create_product(draft("B", 5.0, "BOOKS")).await.unwrap();
        let c = service.create_product(draft("C", 3.0, "BOOKS")).await.unwrap();

        let first = service.list_page(list("2", None)).await.unwrap();
        let ids: Vec<_> = first.data.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![a.id.clone(), b.id.clone()]);
        assert!(first.pagination.has_more);
        assert_eq!(first.pagination.next_cursor, Some(b.id.clone()));
        assert_eq!(
            first.stats,
            Stats {
                total: 3,
                in_stock: 2,
                out_of_stock: 1
            }
        );

        let second = service.list_page(list("2", Some(&b.id))).await.unwrap();
        let ids: Vec<_> = second.data.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![c.id]);
        assert!(!second.pagination.has_more);
        assert_eq!(second.pagination.next_cursor, None);
        // Stats ignore the cursor.
        assert_eq!(second.stats, first.stats);
    }

    #[tokio::test]
    async fn test_full_walk_visits_every_record_once() {
        let service = setup().await;
        let mut created = Vec::new();
        for i in 0..23 {
            let product = service
                .create_product(draft(&format!("Item {i}"), (i % 4) as f64, "FOOD"))
                .await
                .unwrap();
            created.push(product.id);
        }

        let mut seen = Vec::new();
        let mut cursor: Option<ProductId> = None;
        loop {
            let page = service.list_page(list("5", cursor.as_ref())).await.unwrap();
            assert!(page.data.len() <= 5);
            assert_eq!(page.pagination.has_more, page.pagination.next_cursor.is_some());
            assert!(page.stats.is_consistent());

            seen.extend(page.data.into_iter().map(|p| p.id));
            match page.pagination.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        assert_eq!(seen, created);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_exact_multiple_of_limit_has_no_dangling_cursor() {
        let service = setup().await;
        for name in ["A", "B", "C", "D"] {
            service.create_product(draft(name, 1.0, "CLOTHING")).await.unwrap();
        }

        let first = service.list_page(list("2", None)).await.unwrap();
        let cursor = first.pagination.next_cursor.clone();
        let second = service.list_page(list("2", cursor.as_ref())).await.unwrap();

        assert_eq!(second.data.len(), 2);
        assert!(!second.pagination.has_more);
        assert!(second.pagination.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_search_with_category_and_stats_scope() {
        let service = setup().await;
        service.create_product(draft("Cotton Shirt", 2.0, "CLOTHING")).await.unwrap();
        service.create_product(draft("Shirt Folding Board", 0.0, "ELECTRONICS")).await.unwrap();
        service.create_product(draft("Linen SHIRT", 0.0, "CLOTHING")).await.unwrap();
        service.create_product(draft("Wool Socks", 9.0, "CLOTHING")).await.unwrap();

        let response = service
            .search_page(SearchParams {
                q: Some("  shirt ".to_string()),
                cursor: None,
                limit: None,
                category: Some("CLOTHING".to_string()),
            })
            .await
            .unwrap();

        let names: Vec<_> = response.data.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Cotton Shirt", "Linen SHIRT"]);
        assert_eq!(
            response.stats,
            Stats {
                total: 2,
                in_stock: 1,
                out_of_stock: 1
            }
        );
    }

    #[tokio::test]
    async fn test_search_walk_keeps_stats_across_pages() {
        let service = setup().await;
        let mut lamps = Vec::new();
        for (name, stock, category) in [
            ("Desk Lamp", 3.0, "ELECTRONICS"),
            ("Rug", 1.0, "CLOTHING"),
            ("LAMP Shade", 0.0, "ELECTRONICS"),
            ("Lava lamp", 7.0, "ELECTRONICS"),
            ("Clamp", 0.0, "BOOKS"),
            ("Kettle", 2.0, "FOOD"),
        ] {
            let product = service.create_product(draft(name, stock, category)).await.unwrap();
            if product.name.to_lowercase().contains("lamp") {
                lamps.push(product.id);
            }
        }
        assert_eq!(lamps.len(), 4);

        let search = |cursor: Option<&ProductId>| SearchParams {
            q: Some("lamp".to_string()),
            cursor: cursor.map(|c| c.to_string()),
            limit: Some("2".to_string()),
            category: None,
        };

        let first = service.search_page(search(None)).await.unwrap();
        assert_eq!(
            first.data.iter().map(|p| p.id.clone()).collect::<Vec<_>>(),
            lamps[..2].to_vec()
        );
        assert!(first.pagination.has_more);
        assert_eq!(first.pagination.next_cursor, Some(lamps[1].clone()));
        assert_eq!(
            first.stats,
            Stats {
                total: 4,
                in_stock: 2,
                out_of_stock: 2
            }
        );

        let second = service
            .search_page(search(first.pagination.next_cursor.as_ref()))
            .await
            .unwrap();
        assert_eq!(
            second.data.iter().map(|p| p.id.clone()).collect::<Vec<_>>(),
            lamps[2..].to_vec()
        );
        assert!(!second.pagination.has_more);
        assert_eq!(second.pagination.next_cursor, None);
        assert_eq!(second.stats, first.stats);
    }

    #[tokio::test]
    async fn test_category_walk_with_cursor() {
        let service = setup().await;
        let mut books = Vec::new();
        for i in 0..5 {
            let book = service
                .create_product(draft(&format!("Book {i}"), (i % 2) as f64, "BOOKS"))
                .await
                .unwrap();
            books.push(book.id);
            service
                .create_product(draft(&format!("Snack {i}"), 4.0, "FOOD"))
                .await
                .unwrap();
        }

        let books_page = |cursor: Option<&ProductId>| ListParams {
            category: Some("BOOKS".to_string()),
            ..list("3", cursor)
        };

        let first = service.list_page(books_page(None)).await.unwrap();
        assert_eq!(
            first.data.iter().map(|p| p.id.clone()).collect::<Vec<_>>(),
            books[..3].to_vec()
        );
        assert_eq!(first.pagination.next_cursor, Some(books[2].clone()));
        assert_eq!(
            first.stats,
            Stats {
                total: 5,
                in_stock: 2,
                out_of_stock: 3
            }
        );

        let second = service.list_page(books_page(Some(&books[2]))).await.unwrap();
        assert_eq!(
            second.data.iter().map(|p| p.id.clone()).collect::<Vec<_>>(),
            books[3..].to_vec()
        );
        assert!(second.data.iter().all(|p| p.category == Category::Books));
        assert!(!second.pagination.has_more);
        assert_eq!(second.stats, first.stats);
    }

    #[tokio::test]
    async fn test_limit_over_max_is_rejected() {
        let service = setup().await;
        let err = service.list_page(list("100", None)).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Invalid(CatalogError::InvalidLimit { max: 50 })
        ));
    }

    #[tokio::test]
    async fn test_blank_search_is_rejected() {
        let service = setup().await;
        let err = service
            .search_page(SearchParams {
                q: Some("".to_string()),
                ..SearchParams::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Invalid(CatalogError::MissingSearchQuery)
        ));
    }

    #[tokio::test]
    async fn test_invalid_draft_persists_nothing() {
        let service = setup().await;
        let err = service
            .create_product(draft("", 1.0, "BOOKS"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Invalid(CatalogError::InvalidProductField(_))
        ));
        assert_eq!(err.to_string(), "Product name is required");

        let count = service
            .database()
            .products()
            .count(&ProductFilter::new())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_fetch_page_clamps_limit() {
        let service = setup().await;
        for i in 0..3 {
            service
                .create_product(draft(&format!("P{i}"), 1.0, "BOOKS"))
                .await
                .unwrap();
        }

        let page = service.fetch_page(&ProductFilter::new(), 0).await.unwrap();
        assert_eq!(page.records.len(), 1);
        assert!(page.has_more);
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let service = setup().await;
        service.database().close().await;

        let err = service.list_page(ListParams::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::StorageUnavailable(_)));
    }
}
