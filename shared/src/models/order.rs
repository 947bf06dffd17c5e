//! Order Model
//!
//! Request and response shapes for the `/orders` endpoints. The request
//! carries product ids and quantities only; the backend prices the order
//! authoritatively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Payment Method
// ============================================================================

/// Payment method, sent on the wire as a bare integer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(into = "i32", try_from = "i32")]
pub enum PaymentMethod {
    #[default]
    Unknown = 0,
    Cash = 1,
    PayPay = 2,
    Square = 3,
}

impl PaymentMethod {
    /// Backend string form, as it appears in order responses
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::PayPay => "PAYPAY",
            PaymentMethod::Square => "SQUARE",
            PaymentMethod::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<PaymentMethod> for i32 {
    fn from(method: PaymentMethod) -> Self {
        method as i32
    }
}

impl TryFrom<i32> for PaymentMethod {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PaymentMethod::Unknown),
            1 => Ok(PaymentMethod::Cash),
            2 => Ok(PaymentMethod::PayPay),
            3 => Ok(PaymentMethod::Square),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

// ============================================================================
// Order Status
// ============================================================================

/// Order status strings used in responses
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Reserved,
    Confirmed,
    Cancelled,
}

// ============================================================================
// Requests
// ============================================================================

/// One line of an order submission: product id + quantity, no price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemInput {
    pub product_id: String,
    pub quantity: i64,
}

/// `POST /orders` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub sales_slot_id: String,
    pub ticket_number: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<OrderItemInput>,
}

/// `PUT /orders/{id}/payment` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdateRequest {
    pub transaction_id: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Order line item with the backend-resolved price
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    pub price: i64,
}

/// Order as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub sales_slot_id: String,
    pub status: OrderStatus,
    pub total_amount: i64,
    pub ticket_number: String,
    /// String form, e.g. "CASH" (the request sends the integer enum)
    pub payment_method: String,
    pub transaction_id: Option<String>,
    pub is_paid: bool,
    pub is_delivered: bool,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_serializes_as_integer() {
        let json = serde_json::to_string(&PaymentMethod::Cash).unwrap();
        assert_eq!(json, "1");

        let method: PaymentMethod = serde_json::from_str("3").unwrap();
        assert_eq!(method, PaymentMethod::Square);

        assert!(serde_json::from_str::<PaymentMethod>("7").is_err());
    }

    #[test]
    fn test_create_order_request_body_shape() {
        let request = CreateOrderRequest {
            sales_slot_id: "slot-1".to_string(),
            ticket_number: "A12".to_string(),
            payment_method: PaymentMethod::Cash,
            items: vec![OrderItemInput {
                product_id: "prod-1".to_string(),
                quantity: 2,
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "salesSlotId": "slot-1",
                "ticketNumber": "A12",
                "paymentMethod": 1,
                "items": [{"productId": "prod-1", "quantity": 2}]
            })
        );
    }

    #[test]
    fn test_order_response_decodes() {
        let json = r#"{
            "id": "order-1",
            "salesSlotId": "slot-1",
            "status": "RESERVED",
            "totalAmount": 1000,
            "ticketNumber": "A12",
            "paymentMethod": "CASH",
            "transactionId": null,
            "isPaid": false,
            "isDelivered": false,
            "items": [
                {"id": "item-1", "productId": "prod-1", "quantity": 2, "price": 500}
            ],
            "createdAt": "2026-08-07T11:05:00Z",
            "updatedAt": "2026-08-07T11:05:00Z"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Reserved);
        assert_eq!(order.total_amount, 1000);
        assert_eq!(order.items[0].price, 500);
        assert!(order.transaction_id.is_none());
    }
}
