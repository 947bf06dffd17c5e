//! Checkout flow state machine
//!
//! `Idle -> SelectingPayment -> ConfirmingPayment -> Submitting`, then
//! back to `Idle` whether the submission succeeded or failed (the
//! session decides what else happens in each case). Cancelling is
//! allowed at any point before submission starts; no partial order
//! exists server-side until then.

use thiserror::Error;

use shared::models::{CreateOrderRequest, PaymentMethod};

use crate::cart::Cart;

/// Checkout error type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("add items to the cart first")]
    EmptyCart,

    #[error("enter a ticket number")]
    MissingTicketNumber,

    #[error("select a sales slot")]
    NoSlotSelected,

    /// Square payments must report a transaction id before confirmation
    #[error("enter the Square transaction id first")]
    MissingTransactionId,

    #[error("operation not allowed in the current checkout state")]
    InvalidState,
}

/// Current position in the checkout flow
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    /// Payment dialog open, no method picked yet
    SelectingPayment,
    /// Method picked; Square additionally needs a transaction id
    ConfirmingPayment {
        method: PaymentMethod,
        transaction_id: Option<String>,
    },
    /// Order request handed off to the backend
    Submitting {
        method: PaymentMethod,
        transaction_id: Option<String>,
    },
}

/// Checkout state machine
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Whether the payment dialog should be shown
    pub fn is_open(&self) -> bool {
        self.state != CheckoutState::Idle
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, CheckoutState::Submitting { .. })
    }

    /// Selected method, once one has been picked
    pub fn method(&self) -> Option<PaymentMethod> {
        match &self.state {
            CheckoutState::ConfirmingPayment { method, .. }
            | CheckoutState::Submitting { method, .. } => Some(*method),
            _ => None,
        }
    }

    pub fn transaction_id(&self) -> Option<&str> {
        match &self.state {
            CheckoutState::ConfirmingPayment { transaction_id, .. }
            | CheckoutState::Submitting { transaction_id, .. } => transaction_id.as_deref(),
            _ => None,
        }
    }

    /// Validate preconditions and open the payment dialog.
    ///
    /// Checks run in a fixed order: cart emptiness, ticket number, slot
    /// selection. The first failing check is reported and the state
    /// stays `Idle`.
    pub fn begin(
        &mut self,
        cart: &Cart,
        ticket_number: &str,
        selected_slot: Option<&str>,
    ) -> Result<(), CheckoutError> {
        if self.state != CheckoutState::Idle {
            return Err(CheckoutError::InvalidState);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if ticket_number.trim().is_empty() {
            return Err(CheckoutError::MissingTicketNumber);
        }
        if selected_slot.is_none() {
            return Err(CheckoutError::NoSlotSelected);
        }

        self.state = CheckoutState::SelectingPayment;
        Ok(())
    }

    /// Pick a payment method
    pub fn select_method(&mut self, method: PaymentMethod) -> Result<(), CheckoutError> {
        if self.state != CheckoutState::SelectingPayment {
            return Err(CheckoutError::InvalidState);
        }

        self.state = CheckoutState::ConfirmingPayment {
            method,
            transaction_id: None,
        };
        Ok(())
    }

    /// Record the transaction id reported by the Square sub-flow
    pub fn set_transaction_id(&mut self, id: impl Into<String>) -> Result<(), CheckoutError> {
        match &mut self.state {
            CheckoutState::ConfirmingPayment {
                method: PaymentMethod::Square,
                transaction_id,
            } => {
                *transaction_id = Some(id.into());
                Ok(())
            }
            _ => Err(CheckoutError::InvalidState),
        }
    }

    /// Step back from confirmation to method selection
    pub fn back(&mut self) -> Result<(), CheckoutError> {
        match self.state {
            CheckoutState::ConfirmingPayment { .. } => {
                self.state = CheckoutState::SelectingPayment;
                Ok(())
            }
            _ => Err(CheckoutError::InvalidState),
        }
    }

    /// Abort the checkout; allowed until submission starts
    pub fn cancel(&mut self) -> Result<(), CheckoutError> {
        match self.state {
            CheckoutState::SelectingPayment | CheckoutState::ConfirmingPayment { .. } => {
                self.state = CheckoutState::Idle;
                Ok(())
            }
            _ => Err(CheckoutError::InvalidState),
        }
    }

    /// Confirm the payment and build the order payload.
    ///
    /// Square requires a transaction id at this point; cash and PayPay
    /// proceed without one. Prices are not part of the payload.
    pub fn confirm(
        &mut self,
        cart: &Cart,
        ticket_number: &str,
        sales_slot_id: &str,
    ) -> Result<CreateOrderRequest, CheckoutError> {
        let (method, transaction_id) = match &self.state {
            CheckoutState::ConfirmingPayment {
                method,
                transaction_id,
            } => (*method, transaction_id.clone()),
            _ => return Err(CheckoutError::InvalidState),
        };

        if method == PaymentMethod::Square && transaction_id.is_none() {
            return Err(CheckoutError::MissingTransactionId);
        }

        let request = CreateOrderRequest {
            sales_slot_id: sales_slot_id.to_string(),
            ticket_number: ticket_number.to_string(),
            payment_method: method,
            items: cart.order_items(),
        };

        self.state = CheckoutState::Submitting {
            method,
            transaction_id,
        };
        Ok(request)
    }

    /// Submission finished successfully; close the dialog
    pub fn complete(&mut self) {
        self.state = CheckoutState::Idle;
    }

    /// Submission failed; close the dialog (the cart is retained by the
    /// caller so the cashier can retry)
    pub fn fail(&mut self) {
        self.state = CheckoutState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::{Product, ProductInventory};

    fn loaded_cart() -> Cart {
        let at = Utc.with_ymd_and_hms(2026, 8, 7, 10, 0, 0).unwrap();
        let product = Product {
            id: "prod-1".to_string(),
            name: "Yakisoba".to_string(),
            price: 500,
            created_at: None,
            updated_at: None,
        };
        let record = ProductInventory {
            id: "inv-1".to_string(),
            product_id: "prod-1".to_string(),
            sales_slot_id: "slot-1".to_string(),
            initial_quantity: 10,
            sold_quantity: 0,
            reserved_quantity: 0,
            created_at: at,
            updated_at: at,
        };

        let mut cart = Cart::default();
        cart.add(&product, Some(&record)).unwrap();
        cart.add(&product, Some(&record)).unwrap();
        cart
    }

    #[test]
    fn test_begin_checks_run_in_fixed_order() {
        let mut flow = CheckoutFlow::default();

        // everything wrong: the cart message wins
        let err = flow.begin(&Cart::default(), "", None).unwrap_err();
        assert_eq!(err, CheckoutError::EmptyCart);

        // cart ok, ticket blank (whitespace counts as blank)
        let err = flow.begin(&loaded_cart(), "   ", None).unwrap_err();
        assert_eq!(err, CheckoutError::MissingTicketNumber);

        // cart + ticket ok, no slot
        let err = flow.begin(&loaded_cart(), "A12", None).unwrap_err();
        assert_eq!(err, CheckoutError::NoSlotSelected);

        // all preconditions met
        flow.begin(&loaded_cart(), "A12", Some("slot-1")).unwrap();
        assert_eq!(flow.state(), &CheckoutState::SelectingPayment);
    }

    #[test]
    fn test_failed_begin_keeps_dialog_closed() {
        let mut flow = CheckoutFlow::default();
        let _ = flow.begin(&Cart::default(), "A12", Some("slot-1"));
        assert!(!flow.is_open());
    }

    #[test]
    fn test_cash_flow_builds_payload() {
        let cart = loaded_cart();
        let mut flow = CheckoutFlow::default();
        flow.begin(&cart, "A12", Some("slot-1")).unwrap();
        flow.select_method(PaymentMethod::Cash).unwrap();

        let request = flow.confirm(&cart, "A12", "slot-1").unwrap();
        assert_eq!(request.sales_slot_id, "slot-1");
        assert_eq!(request.ticket_number, "A12");
        assert_eq!(request.payment_method, PaymentMethod::Cash);
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].quantity, 2);
        assert!(flow.is_submitting());
    }

    #[test]
    fn test_square_requires_transaction_id() {
        let cart = loaded_cart();
        let mut flow = CheckoutFlow::default();
        flow.begin(&cart, "A12", Some("slot-1")).unwrap();
        flow.select_method(PaymentMethod::Square).unwrap();

        let err = flow.confirm(&cart, "A12", "slot-1").unwrap_err();
        assert_eq!(err, CheckoutError::MissingTransactionId);
        assert!(!flow.is_submitting());

        flow.set_transaction_id("sq_123456").unwrap();
        let request = flow.confirm(&cart, "A12", "slot-1").unwrap();
        assert_eq!(request.payment_method, PaymentMethod::Square);
        assert_eq!(flow.transaction_id(), Some("sq_123456"));
    }

    #[test]
    fn test_transaction_id_rejected_for_cash() {
        let cart = loaded_cart();
        let mut flow = CheckoutFlow::default();
        flow.begin(&cart, "A12", Some("slot-1")).unwrap();
        flow.select_method(PaymentMethod::Cash).unwrap();

        assert_eq!(
            flow.set_transaction_id("sq_1"),
            Err(CheckoutError::InvalidState)
        );
    }

    #[test]
    fn test_cancel_allowed_until_submission() {
        let cart = loaded_cart();
        let mut flow = CheckoutFlow::default();
        flow.begin(&cart, "A12", Some("slot-1")).unwrap();
        flow.cancel().unwrap();
        assert_eq!(flow.state(), &CheckoutState::Idle);

        flow.begin(&cart, "A12", Some("slot-1")).unwrap();
        flow.select_method(PaymentMethod::PayPay).unwrap();
        flow.cancel().unwrap();
        assert_eq!(flow.state(), &CheckoutState::Idle);

        flow.begin(&cart, "A12", Some("slot-1")).unwrap();
        flow.select_method(PaymentMethod::PayPay).unwrap();
        flow.confirm(&cart, "A12", "slot-1").unwrap();
        assert_eq!(flow.cancel(), Err(CheckoutError::InvalidState));
    }

    #[test]
    fn test_back_returns_to_selection() {
        let cart = loaded_cart();
        let mut flow = CheckoutFlow::default();
        flow.begin(&cart, "A12", Some("slot-1")).unwrap();
        flow.select_method(PaymentMethod::Square).unwrap();
        flow.back().unwrap();
        assert_eq!(flow.state(), &CheckoutState::SelectingPayment);
    }

    #[test]
    fn test_complete_and_fail_reset_to_idle() {
        let cart = loaded_cart();
        let mut flow = CheckoutFlow::default();
        flow.begin(&cart, "A12", Some("slot-1")).unwrap();
        flow.select_method(PaymentMethod::Cash).unwrap();
        flow.confirm(&cart, "A12", "slot-1").unwrap();

        flow.complete();
        assert_eq!(flow.state(), &CheckoutState::Idle);

        flow.begin(&cart, "A12", Some("slot-1")).unwrap();
        flow.select_method(PaymentMethod::Cash).unwrap();
        flow.confirm(&cart, "A12", "slot-1").unwrap();
        flow.fail();
        assert_eq!(flow.state(), &CheckoutState::Idle);
    }
}
