//! Yatai Client - HTTP client for the POS backend
//!
//! Provides network-based calls to the festival sales REST API:
//! products, sales slots, per-slot inventory, and orders.

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::models::{
    CreateOrderRequest, Order, PaymentMethod, Product, SalesSlot, SlotInventoryRow,
};
