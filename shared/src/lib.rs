//! Shared types for the Yatai POS client
//!
//! Wire-level types used by both the API client and the terminal
//! application: products, sales slots, per-slot inventory, orders and
//! payment methods, plus the backend's error body shape.

pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    CreateOrderRequest, Order, OrderItem, OrderItemInput, OrderStatus, PaymentMethod,
    PaymentUpdateRequest, Product, ProductInventory, SalesSlot, SlotInventoryRow,
};
pub use response::ErrorBody;
