//! # Domain Types
//!
//! Core domain types used throughout the catalog.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   ProductId     │   │    Category     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  24 hex digits  │   │  ELECTRONICS    │       │
//! │  │  name           │   │  ts|proc|count  │   │  CLOTHING       │       │
//! │  │  price, stock   │   │  sortable       │   │  BOOKS, FOOD    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  ProductDraft   │──►│   NewProduct    │  (validation.rs)            │
//! │  │  raw, optional  │   │  typed, normal  │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifier Ordering
//! `ProductId` is the pagination key. Its text form sorts exactly like its
//! bytes, so the store can compare ids as plain strings.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::{CatalogError, InvalidProductId};

// =============================================================================
// Product Id
// =============================================================================

/// Number of hex digits in a product id.
pub const PRODUCT_ID_LEN: usize = 24;

/// Store-assigned product identifier.
///
/// ## Layout (12 bytes, rendered as 24 lowercase hex digits)
/// ```text
/// ┌──────────────┬──────────────────────┬──────────────┐
/// │ seconds (4B) │ process-unique (5B)  │ counter (3B) │
/// │  big-endian  │  random per process  │  big-endian  │
/// └──────────────┴──────────────────────┴──────────────┘
/// ```
/// Always lower case, so string comparison equals byte comparison.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[ts(export)]
pub struct ProductId(String);

impl ProductId {
    /// Builds an id from its three components.
    pub fn from_parts(timestamp_secs: u32, process: [u8; 5], counter: u32) -> Self {
        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&timestamp_secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&process);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);

        let hex = bytes.iter().map(|b| format!("{:02x}", b)).collect();
        ProductId(hex)
    }

    /// Parses a product id, accepting either hex case.
    pub fn parse(raw: &str) -> Result<Self, InvalidProductId> {
        if Self::is_valid(raw) {
            Ok(ProductId(raw.to_ascii_lowercase()))
        } else {
            Err(InvalidProductId(raw.to_string()))
        }
    }

    /// Checks identifier syntax without allocating.
    pub fn is_valid(raw: &str) -> bool {
        raw.len() == PRODUCT_ID_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the seconds-since-epoch prefix.
    pub fn timestamp_secs(&self) -> u32 {
        self.0
            .get(..8)
            .and_then(|prefix| u32::from_str_radix(prefix, 16).ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductId {
    type Err = InvalidProductId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductId::parse(s)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl Serialize for ProductId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ProductId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Category
// =============================================================================

/// Closed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Food,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 4] = [
        Category::Electronics,
        Category::Clothing,
        Category::Books,
        Category::Food,
    ];

    /// Wire/storage name of the category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "ELECTRONICS",
            Category::Clothing => "CLOTHING",
            Category::Books => "BOOKS",
            Category::Food => "FOOD",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match against the wire names.
impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidCategory(s.to_string()))
    }
}

// =============================================================================
// Product
// =============================================================================

/// A persisted catalog record.
///
/// Records are immutable once created: there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Store-assigned identifier; also the pagination key.
    pub id: ProductId,

    /// Display name (normalized, at most 120 chars).
    pub name: String,

    /// Long description (normalized, at most 2000 chars).
    pub description: String,

    /// Unit price; finite and non-negative.
    pub price: f64,

    /// Units on hand.
    #[ts(type = "number")]
    pub stock: i64,

    pub category: Category,

    /// When the record was inserted.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// In stock means at least one unit on hand.
    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Create Payloads
// =============================================================================

/// Raw create payload as received from a client.
///
/// Every field is optional so that a missing field surfaces as a specific
/// validation message rather than a generic decode failure.
///
/// Form clients post `price` and `stock` as text, so both also accept a
/// numeric string. Text that is not a number becomes NaN and fails
/// validation with the field's own message.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "number_or_numeric_text")]
    #[ts(type = "number | string | null")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "number_or_numeric_text")]
    #[ts(type = "number | string | null")]
    pub stock: Option<f64>,
    pub category: Option<String>,
}

/// `12.5`, `"12.5"`, `null` or absent. Blank text counts as absent.
fn number_or_numeric_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let value = match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Number(number)) => Some(number),
        Some(Raw::Text(text)) => match text.trim() {
            "" => None,
            text => Some(text.parse().unwrap_or(f64::NAN)),
        },
    };
    Ok(value)
}

/// A validated, normalized product ready for insertion.
///
/// Only [`crate::validation::validate_product_draft`] builds one from client
/// input; the store adds `id` and `created_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: Category,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_from_parts() {
        let id = ProductId::from_parts(0x6500_0000, [0xaa, 0xbb, 0xcc, 0xdd, 0xee], 7);
        assert_eq!(id.as_str(), "65000000aabbccddee000007");
        assert_eq!(id.timestamp_secs(), 0x6500_0000);
    }

    #[test]
    fn test_product_id_counter_keeps_low_24_bits() {
        let id = ProductId::from_parts(1, [0; 5], 0x0123_4567);
        assert!(id.as_str().ends_with("234567"));
    }

    #[test]
    fn test_product_id_parse_normalizes_case() {
        let id = ProductId::parse("65000000AABBCCDDEE000007").unwrap();
        assert_eq!(id.to_string(), "65000000aabbccddee000007");
    }

    #[test]
    fn test_product_id_rejects_bad_syntax() {
        assert!(ProductId::parse("").is_err());
        assert!(ProductId::parse("not-an-id").is_err());
        assert!(ProductId::parse("65000000aabbccddee00000").is_err());
        assert!(ProductId::parse("65000000aabbccddee0000077").is_err());
        assert!(ProductId::parse("65000000aabbccddee00000g").is_err());
        assert!(ProductId::parse("' OR 1=1 --aaaaaaaaaaaaa").is_err());
    }

    #[test]
    fn test_product_id_order_follows_components() {
        let a = ProductId::from_parts(100, [9; 5], 5);
        let b = ProductId::from_parts(100, [9; 5], 6);
        let c = ProductId::from_parts(101, [0; 5], 0);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_product_id_serde_validates() {
        let id: ProductId = serde_json::from_str("\"65000000aabbccddee000007\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"65000000aabbccddee000007\"");
        assert!(serde_json::from_str::<ProductId>("\"nope\"").is_err());
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("BOOKS".parse::<Category>().unwrap(), Category::Books);
        assert_eq!("FOOD".parse::<Category>().unwrap(), Category::Food);
        assert!("books".parse::<Category>().is_err());
        assert!("TOYS".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_uppercase() {
        let json = serde_json::to_string(&Category::Electronics).unwrap();
        assert_eq!(json, "\"ELECTRONICS\"");
    }

    #[test]
    fn test_product_json_shape() {
        let product = Product {
            id: ProductId::from_parts(1, [0; 5], 1),
            name: "Desk Lamp".to_string(),
            description: "Warm light".to_string(),
            price: 19.5,
            stock: 0,
            category: Category::Electronics,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["id"], "000000010000000000000001");
        assert_eq!(value["category"], "ELECTRONICS");
        assert!(value.get("createdAt").is_some());
        assert!(!product.is_in_stock());
    }

    #[test]
    fn test_draft_accepts_numbers_and_numeric_text() {
        let draft: ProductDraft =
            serde_json::from_str(r#"{"price": 12.5, "stock": 3}"#).unwrap();
        assert_eq!(draft.price, Some(12.5));
        assert_eq!(draft.stock, Some(3.0));

        let draft: ProductDraft =
            serde_json::from_str(r#"{"price": " 12.5 ", "stock": "3"}"#).unwrap();
        assert_eq!(draft.price, Some(12.5));
        assert_eq!(draft.stock, Some(3.0));
    }

    #[test]
    fn test_draft_missing_blank_and_garbage_numbers() {
        let draft: ProductDraft = serde_json::from_str(r#"{"name": "Lamp"}"#).unwrap();
        assert_eq!(draft.price, None);
        assert_eq!(draft.stock, None);

        let draft: ProductDraft =
            serde_json::from_str(r#"{"price": "", "stock": null}"#).unwrap();
        assert_eq!(draft.price, None);
        assert_eq!(draft.stock, None);

        let draft: ProductDraft =
            serde_json::from_str(r#"{"price": "cheap", "stock": "many"}"#).unwrap();
        assert!(draft.price.is_some_and(f64::is_nan));
        assert!(draft.stock.is_some_and(f64::is_nan));
    }
}
