//! Per-slot inventory models
//!
//! `GET /sales-slots/{id}/products` returns join rows with capitalized
//! field names and nested `SalesSlot`/`Product` objects. The client
//! normalizes those rows into [`ProductInventory`] records keyed by
//! product id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::Product;

/// Raw inventory join row as the backend sends it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotInventoryRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "SalesSlotID")]
    pub sales_slot_id: String,
    #[serde(rename = "ProductID")]
    pub product_id: String,
    #[serde(rename = "InitialQuantity")]
    pub initial_quantity: i64,
    #[serde(rename = "ReservedQuantity")]
    pub reserved_quantity: i64,
    #[serde(rename = "SoldQuantity")]
    pub sold_quantity: i64,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "DeletedAt")]
    pub deleted_at: Option<DateTime<Utc>>,
    #[serde(rename = "SalesSlot")]
    pub sales_slot: Option<SlotRef>,
    #[serde(rename = "Product")]
    pub product: Option<ProductRef>,
}

/// Nested slot object inside an inventory row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlotRef {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "StartTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "EndTime")]
    pub end_time: DateTime<Utc>,
    #[serde(rename = "IsActive")]
    pub is_active: bool,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "DeletedAt")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Nested product object inside an inventory row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRef {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Price")]
    pub price: i64,
    #[serde(rename = "CreatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UpdatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "DeletedAt")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ProductRef {
    /// Convert the nested object into a normal [`Product`]
    pub fn to_product(&self) -> Product {
        Product {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }
}

/// Normalized inventory record for one (product, slot) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductInventory {
    pub id: String,
    pub product_id: String,
    pub sales_slot_id: String,
    pub initial_quantity: i64,
    pub sold_quantity: i64,
    pub reserved_quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductInventory {
    /// Build the normalized record from a raw join row
    pub fn from_row(row: &SlotInventoryRow) -> Self {
        Self {
            id: row.id.clone(),
            product_id: row.product_id.clone(),
            sales_slot_id: row.sales_slot_id.clone(),
            initial_quantity: row.initial_quantity,
            sold_quantity: row.sold_quantity,
            reserved_quantity: row.reserved_quantity,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }

    /// Quantity still available for sale: initial - sold - reserved.
    ///
    /// Not clamped; a negative value means the backend data is
    /// inconsistent and the caller decides how to surface that.
    pub fn available(&self) -> i64 {
        self.initial_quantity - self.sold_quantity - self.reserved_quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> SlotInventoryRow {
        serde_json::from_str(
            r#"{
                "ID": "inv-1",
                "SalesSlotID": "slot-1",
                "ProductID": "prod-1",
                "InitialQuantity": 10,
                "ReservedQuantity": 2,
                "SoldQuantity": 3,
                "CreatedAt": "2026-08-07T10:00:00Z",
                "UpdatedAt": "2026-08-07T10:30:00Z",
                "DeletedAt": null,
                "SalesSlot": {
                    "ID": "slot-1",
                    "StartTime": "2026-08-07T11:00:00Z",
                    "EndTime": "2026-08-07T12:30:00Z",
                    "IsActive": true,
                    "CreatedAt": "2026-08-01T00:00:00Z",
                    "UpdatedAt": "2026-08-01T00:00:00Z",
                    "DeletedAt": null
                },
                "Product": {
                    "ID": "prod-1",
                    "Name": "Yakisoba",
                    "Price": 500,
                    "CreatedAt": "2026-08-01T00:00:00Z",
                    "UpdatedAt": "2026-08-01T00:00:00Z",
                    "DeletedAt": null
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_row_decodes_capitalized_fields() {
        let row = sample_row();
        assert_eq!(row.product_id, "prod-1");
        assert_eq!(row.initial_quantity, 10);
        assert_eq!(row.product.as_ref().unwrap().name, "Yakisoba");
    }

    #[test]
    fn test_available_is_initial_minus_sold_minus_reserved() {
        let record = ProductInventory::from_row(&sample_row());
        assert_eq!(record.available(), 5);
    }

    #[test]
    fn test_available_may_go_negative() {
        let mut record = ProductInventory::from_row(&sample_row());
        record.sold_quantity = 12;
        assert_eq!(record.available(), -4);
    }

    #[test]
    fn test_row_tolerates_missing_product() {
        let json = r#"{
            "ID": "inv-2",
            "SalesSlotID": "slot-1",
            "ProductID": "prod-2",
            "InitialQuantity": 4,
            "ReservedQuantity": 0,
            "SoldQuantity": 0,
            "CreatedAt": "2026-08-07T10:00:00Z",
            "UpdatedAt": "2026-08-07T10:00:00Z",
            "DeletedAt": null
        }"#;

        let row: SlotInventoryRow = serde_json::from_str(json).unwrap();
        assert!(row.product.is_none());
        assert!(row.sales_slot.is_none());
    }
}
