//! Catalog normalization
//!
//! One pure mapping from the backend's raw slot-inventory join rows to
//! the client's product list + inventory index. All three refresh
//! triggers (slot selection, post-order, settings change) go through
//! [`Catalog::from_rows`]; the index is replaced wholesale, never
//! patched.

use std::collections::HashMap;

use thiserror::Error;

use shared::models::{Product, ProductInventory, SlotInventoryRow};

/// Catalog error type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The backend returned no rows for the slot; treated as a failure
    /// so the previous catalog (if any) is kept
    #[error("no inventory data returned for the selected slot")]
    Empty,
}

/// Stock state of one product within the selected slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stock {
    /// No inventory record exists: the product is not offered in this
    /// slot (distinct from sold out)
    NotOffered,
    /// An inventory record exists but nothing is left
    SoldOut,
    /// Units remaining
    Remaining(i64),
}

/// Products and inventory for the currently selected sales slot
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Deduplicated products in first-seen row order
    pub products: Vec<Product>,
    /// Inventory records keyed by product id
    pub inventory: HashMap<String, ProductInventory>,
}

impl Catalog {
    /// Normalize raw join rows into a catalog.
    ///
    /// Rows without a nested product are skipped with a warning. A
    /// negative computed availability is kept as-is but logged, since
    /// it means the backend data is inconsistent.
    pub fn from_rows(rows: &[SlotInventoryRow]) -> Result<Self, CatalogError> {
        if rows.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut products: Vec<Product> = Vec::new();
        let mut inventory: HashMap<String, ProductInventory> = HashMap::new();

        for row in rows {
            let Some(product_ref) = &row.product else {
                tracing::warn!(inventory_id = %row.id, "inventory row has no product, skipping");
                continue;
            };

            let record = ProductInventory::from_row(row);
            if record.available() < 0 {
                tracing::warn!(
                    product_id = %record.product_id,
                    available = record.available(),
                    "negative availability, backend data is inconsistent"
                );
            }

            if !products.iter().any(|p| p.id == product_ref.id) {
                products.push(product_ref.to_product());
            }
            inventory.insert(record.product_id.clone(), record);
        }

        Ok(Self {
            products,
            inventory,
        })
    }

    /// Inventory record for a product, if it is offered in this slot
    pub fn inventory_for(&self, product_id: &str) -> Option<&ProductInventory> {
        self.inventory.get(product_id)
    }

    /// Product by id
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Stock state for a product
    pub fn stock_of(&self, product_id: &str) -> Stock {
        match self.inventory_for(product_id) {
            None => Stock::NotOffered,
            Some(record) if record.available() <= 0 => Stock::SoldOut,
            Some(record) => Stock::Remaining(record.available()),
        }
    }
}
