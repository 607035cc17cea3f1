//! JSON shapes exchanged with the product/order backend.
//!
//! The backend localizes names and descriptions itself based on the
//! `Accept-Language` header, so nothing here carries a locale.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub best_seller: bool,
}

impl Product {
    /// Case-insensitive substring match on name or description.
    ///
    /// `query` is expected to be lower-cased already.
    pub fn matches(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self
                .description
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    New,
    Preparing,
    Done,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Stripe,
    Paypal,
    Cod,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Stripe, PaymentMethod::Paypal, PaymentMethod::Cod];

    /// Message key for the method's label in the `checkout` namespace.
    pub fn label_key(&self) -> &'static str {
        match self {
            PaymentMethod::Stripe => "paymentStripe",
            PaymentMethod::Paypal => "paymentPaypal",
            PaymentMethod::Cod => "paymentCod",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub total_price: f64,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub items: Vec<OrderItemResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub items: Vec<OrderItemRequest>,
}

impl CreateOrderRequest {
    /// Check the fields the backend would reject.
    ///
    /// # Returns
    /// * `Err` with a short description of the first problem found
    pub fn validate(&self) -> Result<(), String> {
        if self.customer_name.trim().is_empty() {
            return Err("customerName must not be blank".to_string());
        }
        if self.phone.trim().is_empty() {
            return Err("phone must not be blank".to_string());
        }
        if self.address.trim().is_empty() {
            return Err("address must not be blank".to_string());
        }
        if self.items.is_empty() {
            return Err("items must not be empty".to_string());
        }
        if let Some(item) = self.items.iter().find(|i| i.quantity < 1) {
            return Err(format!("quantity for product {} must be at least 1", item.product_id));
        }
        if self.items.iter().any(|i| i.product_id.trim().is_empty()) {
            return Err("productId must not be blank".to_string());
        }
        Ok(())
    }
}
