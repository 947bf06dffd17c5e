//! Square POS app deep link
//!
//! Manual-entry placeholder: the deep link opens the Square POS app
//! with the charge details, and the cashier types the resulting
//! transaction id back into the payment dialog. A real integration
//! would receive the id through the callback URL instead.

use serde::Serialize;

/// Square Point of Sale API version used in the deep link
pub const SQUARE_API_VERSION: &str = "1.3";

const DEEP_LINK_PREFIX: &str = "square-commerce-v1://payment/create?data=";

#[derive(Debug, Serialize)]
struct AmountMoney {
    amount: i64,
    currency_code: &'static str,
}

#[derive(Debug, Serialize)]
struct ChargeOptions {
    supported_tender_types: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct ChargeRequest<'a> {
    amount_money: AmountMoney,
    callback_url: &'a str,
    client_id: &'a str,
    version: &'static str,
    notes: String,
    options: ChargeOptions,
}

/// Build the `square-commerce-v1://` deep link for a JPY charge
pub fn charge_deep_link(
    amount: i64,
    ticket_number: &str,
    client_id: &str,
    callback_url: &str,
) -> String {
    let request = ChargeRequest {
        amount_money: AmountMoney {
            amount,
            currency_code: "JPY",
        },
        callback_url,
        client_id,
        version: SQUARE_API_VERSION,
        notes: format!("Ticket {ticket_number}"),
        options: ChargeOptions {
            supported_tender_types: vec![
                "CREDIT_CARD",
                "CASH",
                "OTHER",
                "SQUARE_GIFT_CARD",
                "CARD_ON_FILE",
            ],
        },
    };

    // the payload is a fixed serializable struct, this cannot fail
    let data = serde_json::to_string(&request).unwrap_or_default();
    format!("{}{}", DEEP_LINK_PREFIX, urlencoding::encode(&data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_link_payload_shape() {
        let link = charge_deep_link(1200, "A12", "sq-client-id", "https://pos.local/callback");
        let data = link.strip_prefix(DEEP_LINK_PREFIX).unwrap();
        let decoded = urlencoding::decode(data).unwrap();
        let value: serde_json::Value = serde_json::from_str(&decoded).unwrap();

        assert_eq!(value["amount_money"]["amount"], 1200);
        assert_eq!(value["amount_money"]["currency_code"], "JPY");
        assert_eq!(value["callback_url"], "https://pos.local/callback");
        assert_eq!(value["client_id"], "sq-client-id");
        assert_eq!(value["version"], "1.3");
        assert_eq!(value["notes"], "Ticket A12");
        assert!(
            value["options"]["supported_tender_types"]
                .as_array()
                .unwrap()
                .contains(&serde_json::json!("CREDIT_CARD"))
        );
    }
}
