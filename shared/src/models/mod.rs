//! Data models
//!
//! Wire shapes shared between the API client and the POS application.
//! Normal endpoints use camelCase JSON; the slot-inventory join rows come
//! back with capitalized field names and are normalized client-side.

pub mod inventory;
pub mod order;
pub mod product;
pub mod sales_slot;

// Re-exports
pub use inventory::*;
pub use order::*;
pub use product::*;
pub use sales_slot::*;
