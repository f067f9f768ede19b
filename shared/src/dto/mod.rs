//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures exchanged between the storefront
//! client and the backend API.
//!
//! ## Module Organization
//!
//! - [`envelope`] - The uniform `{ success, message, ... }` response wrapper
//! - [`auth`] - Session status and order placement payloads
//! - [`cart`] - Cart lines, counts and quantity updates
//! - [`catalog`] - Products
//! - [`order`] - Orders, order items and statuses
//! - [`shipping`] - Shipping addresses and user profiles
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Payloads**: flattened beside the envelope keys
//! - **Enums**: lowercase strings (`"pending"`, `"shipped"`)
//! - **Decimals**: accepted as numbers or numeric strings
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/update_cart_quantity
//! Content-Type: application/x-www-form-urlencoded
//!
//! product_id=4&change_type=increase
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "success": true,
//!   "message": "Product quantity increased.",
//!   "new_quantity": 3
//! }
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod envelope;
pub mod order;
pub mod shipping;

pub use auth::*;
pub use cart::*;
pub use catalog::*;
pub use envelope::*;
pub use order::*;
pub use shipping::*;
