//! # Shared Utility Functions
//!
//! Display helpers used by every page that shows money, plus the lenient
//! decimal decoder used by the DTOs.
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_price;
//!
//! assert_eq!(format_price(1234.5), "₹1234.50");
//! ```

/// Currency symbol prefixed to every displayed amount.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Shipping is not charged by the storefront.
pub const SHIPPING_LABEL: &str = "Free";

/// Format an amount with the currency symbol and two decimals.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_price;
///
/// assert_eq!(format_price(0.0), "₹0.00");
/// assert_eq!(format_price(99.999), "₹100.00");
/// ```
pub fn format_price(amount: f64) -> String {
    format!("{}{:.2}", CURRENCY_SYMBOL, amount)
}

/// Format an amount with two decimals and no currency symbol.
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Lenient non-negative decimal decoding.
///
/// Prices arrive as JSON numbers from the relational backend and as strings
/// from the spreadsheet backend; both are accepted. `null` decodes to zero.
pub mod decimal {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = match Option::<Raw>::deserialize(deserializer)? {
            None => 0.0,
            Some(Raw::Number(n)) => n,
            Some(Raw::Text(s)) if s.trim().is_empty() => 0.0,
            Some(Raw::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("invalid decimal: {}", s)))?,
        };

        if !value.is_finite() || value < 0.0 {
            return Err(de::Error::custom(format!(
                "decimal must be a non-negative number, got {}",
                value
            )));
        }
        Ok(value)
    }
}
