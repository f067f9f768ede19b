use serde::{Deserialize, Serialize};

use crate::utils::decimal;

/// One cart line as returned by `GET /api/get_cart_items`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    pub product_id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(deserialize_with = "decimal::deserialize")]
    pub price: f64,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CartLineItem {
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Product")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CartItems {
    #[serde(default)]
    pub items: Vec<CartLineItem>,
}

impl CartItems {
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    pub fn quantity_of(&self, product_id: u64) -> u32 {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map(|item| item.quantity)
            .unwrap_or(0)
    }
}

/// Payload of `GET /api/get_cart_count`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartCount {
    #[serde(default)]
    pub count: u32,
}

/// Payload of `add_to_cart` and `update_cart_quantity`: the server's quantity
/// after the change.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuantityUpdate {
    #[serde(default)]
    pub new_quantity: Option<u32>,
}
