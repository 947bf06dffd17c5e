//! Yatai POS - festival food-stall point of sale terminal
//!
//! Browses the products offered within a sales time-slot, assembles a
//! cart gated by live inventory, checks out with a payment method and
//! submits the order to the backend. The backend remains authoritative
//! for stock; the client-side checks are a courtesy for the cashier.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod session;
pub mod settings;
pub mod square;
pub mod ui;

pub use cart::{Cart, CartError, CartLine};
pub use catalog::{Catalog, CatalogError, Stock};
pub use checkout::{CheckoutError, CheckoutFlow, CheckoutState};
pub use session::{Notice, NoticeLevel, PosSession, SessionEvent};
pub use settings::Settings;
