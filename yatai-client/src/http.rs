//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::models::{
    CreateOrderRequest, Order, PaymentUpdateRequest, Product, SalesSlot, SlotInventoryRow,
};
use shared::response::ErrorBody;
use urlencoding::encode;

/// HTTP client for making network requests to the POS backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request without body
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.put(self.url(path)).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    ///
    /// Non-2xx responses are failures; the JSON error body's `message`
    /// field is used when present, with a generic status fallback.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.message)
                .unwrap_or_else(|_| {
                    format!("API request failed with status {}", status.as_u16())
                });
            tracing::warn!(status = status.as_u16(), %message, "API request failed");
            return Err(ClientError::Api { status, message });
        }

        response.json().await.map_err(Into::into)
    }

    // ========== Products API ==========

    /// List all products
    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.get("/products").await
    }

    /// Get a single product
    pub async fn get_product(&self, id: &str) -> ClientResult<Product> {
        self.get(&format!("/products/{}", encode(id))).await
    }

    // ========== Sales Slots API ==========

    /// List all sales slots
    pub async fn list_sales_slots(&self) -> ClientResult<Vec<SalesSlot>> {
        self.get("/sales-slots").await
    }

    /// Inventory join rows for one sales slot
    pub async fn slot_inventory(&self, slot_id: &str) -> ClientResult<Vec<SlotInventoryRow>> {
        self.get(&format!("/sales-slots/{}/products", encode(slot_id)))
            .await
    }

    // ========== Orders API ==========

    /// Submit a new order
    pub async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<Order> {
        self.post("/orders", request).await
    }

    /// Fetch an order by id
    pub async fn get_order(&self, id: &str) -> ClientResult<Order> {
        self.get(&format!("/orders/{}", encode(id))).await
    }

    /// Fetch an order by its ticket number
    pub async fn get_order_by_ticket(&self, ticket_number: &str) -> ClientResult<Order> {
        self.get(&format!("/orders/number/{}", encode(ticket_number)))
            .await
    }

    /// Record a payment transaction id against an order
    pub async fn update_payment(&self, order_id: &str, transaction_id: &str) -> ClientResult<Order> {
        let body = PaymentUpdateRequest {
            transaction_id: transaction_id.to_string(),
        };
        self.put(&format!("/orders/{}/payment", encode(order_id)), &body)
            .await
    }

    /// Confirm an order
    pub async fn confirm_order(&self, order_id: &str) -> ClientResult<Order> {
        self.put_empty(&format!("/orders/{}/confirm", encode(order_id)))
            .await
    }

    /// Cancel an order
    pub async fn cancel_order(&self, order_id: &str) -> ClientResult<Order> {
        self.put_empty(&format!("/orders/{}/cancel", encode(order_id)))
            .await
    }

    /// Mark an order as handed over to the customer
    pub async fn mark_delivered(&self, order_id: &str) -> ClientResult<Order> {
        self.put_empty(&format!("/orders/{}/delivery", encode(order_id)))
            .await
    }
}
