use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dto::shipping::ShippingInfo;
use crate::utils::decimal;

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn all() -> &'static [OrderStatus] {
        &[
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Capitalised label for select options.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::all()
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid status provided: {}", s))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    #[serde(default)]
    pub product_id: Option<u64>,
    /// `name` on the spreadsheet backend.
    #[serde(default, alias = "name")]
    pub product_name: Option<String>,
    #[serde(default, alias = "price", deserialize_with = "decimal::deserialize")]
    pub product_price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.product_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: u64,
    #[serde(default)]
    pub order_date: String,
    #[serde(default, deserialize_with = "decimal::deserialize")]
    pub total_amount: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(flatten)]
    pub shipping: ShippingInfo,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Present on the admin order listing only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

impl Order {
    /// Payment method in upper case, `N/A` when unknown.
    pub fn payment_label(&self) -> String {
        self.payment_method
            .as_deref()
            .filter(|m| !m.is_empty())
            .map(str::to_uppercase)
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderList {
    #[serde(default)]
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderDetails {
    #[serde(default)]
    pub order: Option<Order>,
}
