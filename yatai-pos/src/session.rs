//! POS session orchestration
//!
//! Owns the client, the slot list, the catalog for the selected slot,
//! the cart and the checkout flow. Backend calls run on spawned tasks
//! and report back through an unbounded channel; `apply_event` is the
//! only place session state is mutated from those results, so all
//! mutation happens on the UI loop.
//!
//! Every inventory fetch carries a sequence number. A slot change does
//! not cancel an in-flight fetch; instead, responses whose sequence is
//! not the latest issued are discarded so an old slot's inventory can
//! never overwrite a newer one.

use std::collections::VecDeque;
use std::path::PathBuf;

use tokio::sync::mpsc;

use shared::models::{Order, PaymentMethod, SalesSlot, SlotInventoryRow};
use yatai_client::{ClientConfig, ClientError, HttpClient};

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::checkout::CheckoutFlow;
use crate::settings::Settings;

/// How many transient notices are kept for display
const NOTICE_LIMIT: usize = 8;

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Transient user-visible notification (the toast stand-in)
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Results reported back by spawned backend calls
#[derive(Debug)]
pub enum SessionEvent {
    SlotsLoaded(Result<Vec<SalesSlot>, ClientError>),
    InventoryLoaded {
        seq: u64,
        result: Result<Vec<SlotInventoryRow>, ClientError>,
    },
    OrderSubmitted(Result<Order, ClientError>),
}

/// State of one POS terminal
pub struct PosSession {
    settings: Settings,
    settings_path: PathBuf,
    client: HttpClient,
    events: mpsc::UnboundedSender<SessionEvent>,

    pub slots: Vec<SalesSlot>,
    pub selected_slot: Option<String>,
    pub catalog: Option<Catalog>,
    pub cart: Cart,
    pub ticket_number: String,
    pub checkout: CheckoutFlow,
    pub is_loading: bool,

    notices: VecDeque<Notice>,
    inventory_seq: u64,
}

impl PosSession {
    pub fn new(
        settings: Settings,
        settings_path: PathBuf,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let client = ClientConfig::new(&settings.api_base_url).build_client();
        Self {
            settings,
            settings_path,
            client,
            events,
            slots: Vec::new(),
            selected_slot: None,
            catalog: None,
            cart: Cart::default(),
            ticket_number: String::new(),
            checkout: CheckoutFlow::default(),
            is_loading: false,
            notices: VecDeque::new(),
            inventory_seq: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.back()
    }

    fn push_notice(&mut self, notice: Notice) {
        if self.notices.len() >= NOTICE_LIMIT {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }

    // ========== Fetch triggers ==========

    /// Fetch the sales slot list
    pub fn load_slots(&mut self) {
        self.is_loading = true;
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = client.list_sales_slots().await;
            let _ = events.send(SessionEvent::SlotsLoaded(result));
        });
    }

    /// Select a sales slot; a change clears the cart (with its ticket
    /// number) and refreshes inventory
    pub fn select_slot(&mut self, slot_id: &str) {
        if self.selected_slot.as_deref() == Some(slot_id) {
            return;
        }

        tracing::info!(slot_id, "sales slot selected");
        self.selected_slot = Some(slot_id.to_string());
        self.cart.clear();
        self.ticket_number.clear();
        self.refresh_inventory();
    }

    /// Issue a sequence number for a new inventory fetch
    fn begin_inventory_fetch(&mut self) -> u64 {
        self.inventory_seq += 1;
        self.is_loading = true;
        self.inventory_seq
    }

    /// Re-fetch inventory for the selected slot
    pub fn refresh_inventory(&mut self) {
        let Some(slot_id) = self.selected_slot.clone() else {
            return;
        };

        let seq = self.begin_inventory_fetch();
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = client.slot_inventory(&slot_id).await;
            let _ = events.send(SessionEvent::InventoryLoaded { seq, result });
        });
    }

    // ========== Cart ==========

    /// Add one unit of a product, gated by the catalog's inventory
    pub fn add_to_cart(&mut self, product_id: &str) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        let Some(product) = catalog.product(product_id).cloned() else {
            return;
        };

        if let Err(err) = self.cart.add(&product, catalog.inventory_for(product_id)) {
            let title = match err {
                crate::cart::CartError::NoInventory => "No stock record",
                crate::cart::CartError::OutOfStock => "Sold out",
                crate::cart::CartError::InsufficientStock { .. } => "Not enough stock",
            };
            let notice = Notice::error(title, err.to_string());
            self.push_notice(notice);
        }
    }

    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.cart.remove(product_id);
    }

    /// Clear the cart; the ticket number goes with it
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.ticket_number.clear();
    }

    // ========== Checkout ==========

    /// Validate preconditions and open the payment dialog
    pub fn begin_checkout(&mut self) {
        if let Err(err) =
            self.checkout
                .begin(&self.cart, &self.ticket_number, self.selected_slot.as_deref())
        {
            let notice = Notice::error("Cannot check out", err.to_string());
            self.push_notice(notice);
        }
    }

    pub fn select_payment(&mut self, method: PaymentMethod) {
        if let Err(err) = self.checkout.select_method(method) {
            tracing::debug!(%err, "payment selection ignored");
        }
    }

    pub fn set_transaction_id(&mut self, id: &str) {
        if let Err(err) = self.checkout.set_transaction_id(id) {
            tracing::debug!(%err, "transaction id ignored");
        }
    }

    pub fn payment_back(&mut self) {
        if let Err(err) = self.checkout.back() {
            tracing::debug!(%err, "back ignored");
        }
    }

    pub fn cancel_checkout(&mut self) {
        if let Err(err) = self.checkout.cancel() {
            tracing::debug!(%err, "cancel ignored");
        }
    }

    /// Confirm the payment: build the order payload and submit it.
    ///
    /// Fire-and-forget: no retry, no idempotency key. For Square the
    /// transaction id is recorded against the order after creation.
    pub fn confirm_payment(&mut self) {
        let Some(slot_id) = self.selected_slot.clone() else {
            let notice = Notice::error("Cannot check out", "select a sales slot");
            self.push_notice(notice);
            return;
        };

        let request = match self.checkout.confirm(&self.cart, &self.ticket_number, &slot_id) {
            Ok(request) => request,
            Err(err) => {
                let notice = Notice::error("Cannot check out", err.to_string());
                self.push_notice(notice);
                return;
            }
        };

        let transaction_id = self.checkout.transaction_id().map(str::to_string);
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = match client.create_order(&request).await {
                Ok(order) => {
                    if let Some(tx) = transaction_id {
                        match client.update_payment(&order.id, &tx).await {
                            Ok(updated) => Ok(updated),
                            Err(err) => {
                                // the order exists; only the payment record failed
                                tracing::warn!(%err, order_id = %order.id,
                                    "failed to record transaction id");
                                Ok(order)
                            }
                        }
                    } else {
                        Ok(order)
                    }
                }
                Err(err) => Err(err),
            };
            let _ = events.send(SessionEvent::OrderSubmitted(result));
        });
    }

    // ========== Settings ==========

    /// Save new settings and rebuild the client; a selected slot gets
    /// its inventory refreshed against the new backend
    pub fn apply_settings(&mut self, api_base_url: String) {
        if api_base_url.trim().is_empty() {
            let notice = Notice::error("Settings", "enter an API base URL");
            self.push_notice(notice);
            return;
        }

        self.settings.api_base_url = api_base_url;
        if let Err(err) = self.settings.save(&self.settings_path) {
            let notice = Notice::error("Settings", format!("failed to save settings: {err}"));
            self.push_notice(notice);
        } else {
            let notice = Notice::info("Settings saved", "application settings updated");
            self.push_notice(notice);
        }

        self.client = ClientConfig::new(&self.settings.api_base_url).build_client();
        if self.selected_slot.is_some() {
            self.refresh_inventory();
        }
    }

    // ========== Event application ==========

    /// Apply a backend result to the session state
    pub fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SlotsLoaded(Ok(slots)) => {
                self.is_loading = false;
                self.slots = slots;

                if self.selected_slot.is_none() {
                    let auto = self
                        .slots
                        .iter()
                        .find(|slot| slot.is_active)
                        .or_else(|| self.slots.first())
                        .map(|slot| slot.id.clone());
                    if let Some(slot_id) = auto {
                        self.select_slot(&slot_id);
                    }
                }
            }
            SessionEvent::SlotsLoaded(Err(err)) => {
                self.is_loading = false;
                let notice = Notice::error("Failed to load sales slots", err.to_string());
                self.push_notice(notice);
            }
            SessionEvent::InventoryLoaded { seq, result } => {
                if seq != self.inventory_seq {
                    tracing::debug!(seq, latest = self.inventory_seq,
                        "stale inventory response discarded");
                    return;
                }
                self.is_loading = false;

                match result {
                    Ok(rows) => match Catalog::from_rows(&rows) {
                        Ok(catalog) => {
                            tracing::info!(products = catalog.products.len(), "catalog refreshed");
                            self.catalog = Some(catalog);
                        }
                        Err(err) => {
                            let notice =
                                Notice::error("Failed to load products", err.to_string());
                            self.push_notice(notice);
                        }
                    },
                    Err(err) => {
                        let notice = Notice::error("Failed to load products", err.to_string());
                        self.push_notice(notice);
                    }
                }
            }
            SessionEvent::OrderSubmitted(Ok(order)) => {
                tracing::info!(order_id = %order.id, total = order.total_amount, "order completed");
                let notice = Notice::info("Order completed", format!("Order number: {}", order.id));
                self.push_notice(notice);
                self.clear_cart();
                self.checkout.complete();
                // reflect the server-side stock decrement
                self.refresh_inventory();
            }
            SessionEvent::OrderSubmitted(Err(err)) => {
                let notice = Notice::error("Order failed", err.to_string());
                self.push_notice(notice);
                // cart is kept so the cashier can retry
                self.checkout.fail();
            }
        }
    }
}
