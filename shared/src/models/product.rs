//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product entity
///
/// Immutable once fetched; the list is replaced wholesale on each
/// slot change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Price in the smallest currency unit (yen)
    pub price: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_decodes_camel_case() {
        let json = r#"{
            "id": "prod-1",
            "name": "Yakisoba",
            "price": 500,
            "createdAt": "2026-08-01T09:00:00Z",
            "updatedAt": "2026-08-01T09:00:00Z"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "prod-1");
        assert_eq!(product.price, 500);
    }

    #[test]
    fn test_product_timestamps_are_optional() {
        let json = r#"{"id": "prod-2", "name": "Ramune", "price": 200}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.created_at.is_none());
    }
}
