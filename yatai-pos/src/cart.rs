//! Cart store and inventory reconciliation
//!
//! Line items keyed by product id with the price snapshotted at add
//! time. Adds are gated by the inventory record for the selected slot;
//! the backend stays authoritative, these checks only keep the cashier
//! from assembling an order that cannot be fulfilled.

use thiserror::Error;

use shared::models::{OrderItemInput, Product, ProductInventory};

/// Reasons an add-to-cart is rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// No inventory record for this product in the selected slot:
    /// the product is not sold here (distinct from sold out)
    #[error("this product is not sold in the selected slot")]
    NoInventory,

    /// Nothing left to sell
    #[error("this product is sold out")]
    OutOfStock,

    /// The cart already holds everything that is available
    #[error("only {remaining} left in stock")]
    InsufficientStock { remaining: i64 },
}

/// One cart line: product, price snapshot, quantity >= 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    /// Price at the moment the product was first added
    pub price: i64,
    pub quantity: i64,
}

/// Ordered collection of cart lines
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Add one unit of a product, gated by its inventory record.
    ///
    /// On success the existing line's quantity is incremented, or a new
    /// line with quantity 1 is appended. On rejection the cart is left
    /// untouched.
    pub fn add(
        &mut self,
        product: &Product,
        inventory: Option<&ProductInventory>,
    ) -> Result<(), CartError> {
        let Some(record) = inventory else {
            return Err(CartError::NoInventory);
        };

        let available = record.available();
        if available <= 0 {
            return Err(CartError::OutOfStock);
        }

        let current = self.quantity_of(&product.id);
        if current + 1 > available {
            return Err(CartError::InsufficientStock {
                remaining: available,
            });
        }

        match self.lines.iter_mut().find(|line| line.product_id == product.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product_id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                quantity: 1,
            }),
        }
        Ok(())
    }

    /// Remove one unit of a product; the line disappears at zero.
    /// Unknown products are a no-op.
    pub fn remove(&mut self, product_id: &str) {
        if let Some(idx) = self.lines.iter().position(|line| line.product_id == product_id) {
            if self.lines[idx].quantity > 1 {
                self.lines[idx].quantity -= 1;
            } else {
                self.lines.remove(idx);
            }
        }
    }

    /// Drop all lines
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity of one product currently in the cart (0 when absent)
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    /// Cart total, recomputed from the lines on every call
    pub fn total_amount(&self) -> i64 {
        self.lines
            .iter()
            .map(|line| line.price * line.quantity)
            .sum()
    }

    /// Order submission lines: product id + quantity only, prices are
    /// resolved by the backend
    pub fn order_items(&self) -> Vec<OrderItemInput> {
        self.lines
            .iter()
            .map(|line| OrderItemInput {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn product(id: &str, price: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("product {id}"),
            price,
            created_at: None,
            updated_at: None,
        }
    }

    fn inventory(product_id: &str, initial: i64, sold: i64, reserved: i64) -> ProductInventory {
        let at = Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap();
        ProductInventory {
            id: format!("inv-{product_id}"),
            product_id: product_id.to_string(),
            sales_slot_id: "slot-1".to_string(),
            initial_quantity: initial,
            sold_quantity: sold,
            reserved_quantity: reserved,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_add_without_inventory_record_is_rejected() {
        let mut cart = Cart::default();
        let err = cart.add(&product("prod-1", 500), None).unwrap_err();
        assert_eq!(err, CartError::NoInventory);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_sold_out_is_rejected() {
        let mut cart = Cart::default();
        let record = inventory("prod-1", 5, 5, 0);
        let err = cart.add(&product("prod-1", 500), Some(&record)).unwrap_err();
        assert_eq!(err, CartError::OutOfStock);
    }

    #[test]
    fn test_negative_availability_reads_as_sold_out() {
        let mut cart = Cart::default();
        let record = inventory("prod-1", 3, 4, 1);
        let err = cart.add(&product("prod-1", 500), Some(&record)).unwrap_err();
        assert_eq!(err, CartError::OutOfStock);
    }

    #[test]
    fn test_sixth_add_fails_with_remaining_count() {
        // initial=10, sold=3, reserved=2 => available=5
        let mut cart = Cart::default();
        let p = product("prod-1", 500);
        let record = inventory("prod-1", 10, 3, 2);

        for expected in 1..=5 {
            cart.add(&p, Some(&record)).unwrap();
            assert_eq!(cart.quantity_of("prod-1"), expected);
        }

        let err = cart.add(&p, Some(&record)).unwrap_err();
        assert_eq!(err, CartError::InsufficientStock { remaining: 5 });
        assert_eq!(err.to_string(), "only 5 left in stock");
        assert_eq!(cart.quantity_of("prod-1"), 5);
    }

    #[test]
    fn test_duplicate_adds_merge_into_one_line() {
        let mut cart = Cart::default();
        let p = product("prod-1", 500);
        let record = inventory("prod-1", 10, 0, 0);

        cart.add(&p, Some(&record)).unwrap();
        cart.add(&p, Some(&record)).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_remove_decrements_then_deletes_line() {
        let mut cart = Cart::default();
        let p = product("prod-1", 500);
        let record = inventory("prod-1", 10, 0, 0);

        cart.add(&p, Some(&record)).unwrap();
        cart.add(&p, Some(&record)).unwrap();

        cart.remove("prod-1");
        assert_eq!(cart.quantity_of("prod-1"), 1);

        cart.remove("prod-1");
        assert!(cart.is_empty());

        // removing an absent product is a no-op
        cart.remove("prod-1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_is_recomputed_and_round_trips() {
        let mut cart = Cart::default();
        let yakisoba = product("prod-1", 500);
        let ramune = product("prod-2", 200);
        let inv1 = inventory("prod-1", 10, 0, 0);
        let inv2 = inventory("prod-2", 10, 0, 0);

        cart.add(&yakisoba, Some(&inv1)).unwrap();
        cart.add(&yakisoba, Some(&inv1)).unwrap();
        let before = cart.total_amount();
        assert_eq!(before, 1000);

        cart.add(&ramune, Some(&inv2)).unwrap();
        assert_eq!(cart.total_amount(), 1200);

        cart.remove("prod-2");
        assert_eq!(cart.total_amount(), before);
    }

    #[test]
    fn test_price_is_snapshotted_at_add_time() {
        let mut cart = Cart::default();
        let mut p = product("prod-1", 500);
        let record = inventory("prod-1", 10, 0, 0);

        cart.add(&p, Some(&record)).unwrap();
        p.price = 600;
        cart.add(&p, Some(&record)).unwrap();

        // the line keeps the price from the first add
        assert_eq!(cart.lines()[0].price, 500);
        assert_eq!(cart.total_amount(), 1000);
    }

    #[test]
    fn test_order_items_carry_no_prices() {
        let mut cart = Cart::default();
        let p = product("prod-1", 500);
        let record = inventory("prod-1", 10, 0, 0);

        cart.add(&p, Some(&record)).unwrap();
        cart.add(&p, Some(&record)).unwrap();

        let items = cart.order_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, "prod-1");
        assert_eq!(items[0].quantity, 2);
    }
}
