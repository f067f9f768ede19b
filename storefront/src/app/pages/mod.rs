//! # Page Controllers
//!
//! One controller per storefront page, organized by domain. Each resolves
//! its bindings (message targets, display cells, bound forms) once in `new`
//! and then only touches those.
//!
//! Actions return `Result` so hosts and tests can branch on the outcome, but
//! every outcome has already been reported on the overlay and the page's
//! message slot by the time the call returns.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod payment;
pub mod products;
pub mod settings;
pub mod sheets;

pub use admin::AdminPage;
pub use auth::AuthPage;
pub use cart::CartPage;
pub use checkout::CheckoutPage;
pub use orders::{OrderConfirmationPage, OrderHistoryPage};
pub use payment::PaymentPage;
pub use products::ProductsPage;
pub use settings::SettingsPage;
pub use sheets::{SheetsOrdersPage, SheetsProductsPage};

/// Message slot ids, as the pages name them.
pub mod targets {
    pub const FORM: &str = "formMessages";
    pub const RESET: &str = "resetMessages";
    pub const PRODUCTS: &str = "productMessages";
    pub const CART: &str = "cartPageMessages";
    pub const CHECKOUT: &str = "checkoutMessages";
    pub const PAYMENT: &str = "paymentMessages";
    pub const OTP: &str = "otpMessage";
    pub const ORDER_HISTORY: &str = "orderHistoryMessages";
    pub const CONFIRMATION: &str = "confirmationMessages";
    pub const SETTINGS: &str = "settingsMessages";
    pub const EXISTING_PRODUCTS: &str = "existingProductsMessages";
    pub const PRODUCT_FORM: &str = "productFormMessages";
    pub const ORDER_MANAGEMENT: &str = "orderManagementMessages";
    pub const IMPORT: &str = "importMessages";
    pub const SHEET_ORDERS: &str = "orderMessages";
}

/// Shipping form fields, in the order the forms post them.
pub(crate) const SHIPPING_FIELDS: &[&str] = &[
    "fullName",
    "addressLine1",
    "addressLine2",
    "addressLine3",
    "city",
    "state",
    "zipCode",
    "phone",
];
