//! # Query Builder
//!
//! Turns raw request parameters into a validated, store-agnostic filter.
//!
//! ## Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Query Composition                                │
//! │                                                                         │
//! │  ?cursor=..&limit=..&category=..&q=..     (raw strings)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ListParams / SearchParams::into_query()  (validation.rs rules)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PageQuery { filter, limit, sort }                                     │
//! │       │                                                                 │
//! │       ├──► filter.clauses()                  → page fetch              │
//! │       │      category = ?  AND  id > ?  AND  name LIKE ?               │
//! │       │                                                                 │
//! │       └──► filter.without_cursor().clauses() → stats counts            │
//! │              category = ?  AND  name LIKE ?                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Injection Safety
//! Search text is escaped for LIKE (`%`, `_`, `\`) and then handed to the
//! store as a bound parameter with an explicit escape character. Nothing
//! in this module produces SQL text.

use serde::Deserialize;

use crate::error::CatalogResult;
use crate::types::{Category, ProductId};
use crate::validation::{parse_category, parse_cursor, parse_limit, sanitize_search_query};

/// Escape character paired with every LIKE pattern built here.
pub const LIKE_ESCAPE: char = '\\';

// =============================================================================
// Sort Order
// =============================================================================

/// Result ordering. Ascending id is the only order that composes with
/// keyset cursors without skips or duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    IdAsc,
}

// =============================================================================
// Filter
// =============================================================================

/// One conjunct of a product filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// `category = value`
    CategoryEq(Category),
    /// `id > cursor` (strictly greater)
    IdAfter(ProductId),
    /// Case-insensitive substring match on the name.
    ///
    /// `pattern` is already lower-cased, LIKE-escaped and wrapped in `%`;
    /// it must be compared against the lower-cased name with
    /// [`LIKE_ESCAPE`] as the escape character.
    NameContains { pattern: String },
}

/// Conjunction of optional category, cursor and name-search clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub cursor: Option<ProductId>,
    /// Normalized (not escaped) search text.
    pub search: Option<String>,
}

impl ProductFilter {
    /// Matches every product.
    pub fn new() -> Self {
        ProductFilter::default()
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn after(mut self, cursor: Option<ProductId>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn matching(mut self, search: Option<String>) -> Self {
        self.search = search;
        self
    }

    /// The same filter minus the cursor bound; scopes stats to the whole
    /// filtered population rather than the current window.
    pub fn without_cursor(&self) -> Self {
        ProductFilter {
            cursor: None,
            ..self.clone()
        }
    }

    /// Clauses in a fixed order: category, cursor, name.
    pub fn clauses(&self) -> Vec<Clause> {
        let mut clauses = Vec::with_capacity(3);
        if let Some(category) = self.category {
            clauses.push(Clause::CategoryEq(category));
        }
        if let Some(cursor) = &self.cursor {
            clauses.push(Clause::IdAfter(cursor.clone()));
        }
        if let Some(search) = &self.search {
            clauses.push(Clause::NameContains {
                pattern: like_pattern(search),
            });
        }
        clauses
    }
}

// =============================================================================
// LIKE Escaping
// =============================================================================

/// Escapes LIKE metacharacters so the input matches literally.
///
/// ## Example
/// ```rust
/// use catalog_core::query::escape_like;
///
/// assert_eq!(escape_like("50%_off"), "50\\%\\_off");
/// assert_eq!(escape_like("a.b*c"), "a.b*c");
/// ```
pub fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '%' => out.push_str("\\%"),
            '_' => out.push_str("\\_"),
            other => out.push(other),
        }
    }
    out
}

/// Builds the case-folded substring pattern for a search term.
pub fn like_pattern(search: &str) -> String {
    format!("%{}%", escape_like(&search.to_lowercase()))
}

// =============================================================================
// Page Query
// =============================================================================

/// A fully validated page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub filter: ProductFilter,
    pub limit: u32,
    pub sort: SortOrder,
}

/// Raw parameters of a list request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub cursor: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
}

impl ListParams {
    /// Validates every parameter; the first violation wins.
    pub fn into_query(self) -> CatalogResult<PageQuery> {
        let limit = parse_limit(self.limit.as_deref())?;
        let category = parse_category(self.category.as_deref())?;
        let cursor = parse_cursor(self.cursor.as_deref())?;

        Ok(PageQuery {
            filter: ProductFilter::new().with_category(category).after(cursor),
            limit,
            sort: SortOrder::IdAsc,
        })
    }
}

/// Raw parameters of a search request. `q` is mandatory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
}

impl SearchParams {
    /// Validates every parameter; the search text is checked first.
    pub fn into_query(self) -> CatalogResult<PageQuery> {
        let search = sanitize_search_query(self.q.as_deref())?;
        let limit = parse_limit(self.limit.as_deref())?;
        let category = parse_category(self.category.as_deref())?;
        let cursor = parse_cursor(self.cursor.as_deref())?;

        Ok(PageQuery {
            filter: ProductFilter::new()
                .with_category(category)
                .after(cursor)
                .matching(Some(search)),
            limit,
            sort: SortOrder::IdAsc,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;

    const CURSOR: &str = "65000000aabbccddee000007";

    #[test]
    fn test_escape_like_metacharacters() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        // Regex metacharacters have no meaning in LIKE and pass through.
        assert_eq!(escape_like("a.b*c"), "a.b*c");
        assert_eq!(escape_like("(x|y)+[z]"), "(x|y)+[z]");
    }

    #[test]
    fn test_like_pattern_folds_case() {
        assert_eq!(like_pattern("USB Hub"), "%usb hub%");
        assert_eq!(like_pattern("10%"), "%10\\%%");
    }

    #[test]
    fn test_empty_filter_has_no_clauses() {
        assert!(ProductFilter::new().clauses().is_empty());
    }

    #[test]
    fn test_clause_order() {
        let cursor = ProductId::parse(CURSOR).unwrap();
        let filter = ProductFilter::new()
            .with_category(Some(Category::Books))
            .after(Some(cursor.clone()))
            .matching(Some("rust".to_string()));

        assert_eq!(
            filter.clauses(),
            vec![
                Clause::CategoryEq(Category::Books),
                Clause::IdAfter(cursor),
                Clause::NameContains {
                    pattern: "%rust%".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_without_cursor_keeps_other_clauses() {
        let filter = ProductFilter::new()
            .with_category(Some(Category::Food))
            .after(Some(ProductId::parse(CURSOR).unwrap()))
            .matching(Some("tea".to_string()));

        let stats_filter = filter.without_cursor();
        assert_eq!(stats_filter.cursor, None);
        assert_eq!(stats_filter.category, Some(Category::Food));
        assert_eq!(stats_filter.search.as_deref(), Some("tea"));
        assert_eq!(stats_filter.clauses().len(), 2);
    }

    #[test]
    fn test_list_params_defaults() {
        let query = ListParams::default().into_query().unwrap();
        assert_eq!(query.limit, 10);
        assert_eq!(query.filter, ProductFilter::new());
        assert_eq!(query.sort, SortOrder::IdAsc);
    }

    #[test]
    fn test_list_params_errors() {
        let params = ListParams {
            limit: Some("100".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.into_query(), Err(CatalogError::InvalidLimit { .. })));

        let params = ListParams {
            category: Some("TOYS".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.into_query(), Err(CatalogError::InvalidCategory(_))));

        let params = ListParams {
            cursor: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.into_query(), Err(CatalogError::InvalidCursor(_))));
    }

    #[test]
    fn test_search_params() {
        let params = SearchParams {
            q: Some("  mechanical   keyboard ".to_string()),
            limit: Some("5".to_string()),
            category: Some("ELECTRONICS".to_string()),
            cursor: Some(CURSOR.to_string()),
        };
        let query = params.into_query().unwrap();
        assert_eq!(query.limit, 5);
        assert_eq!(query.filter.search.as_deref(), Some("mechanical keyboard"));
        assert_eq!(query.filter.category, Some(Category::Electronics));
        assert!(query.filter.cursor.is_some());
    }

    #[test]
    fn test_search_params_requires_text() {
        let params = SearchParams {
            q: Some(" ".to_string()),
            limit: Some("500".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.into_query(), Err(CatalogError::MissingSearchQuery)));
    }
}
