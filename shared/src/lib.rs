//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the storefront client and the
//! backend API. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::envelope`]**: The response envelope every endpoint returns
//!   - **[`dto::cart`]**, **[`dto::catalog`]**, **[`dto::order`]**,
//!     **[`dto::shipping`]**, **[`dto::auth`]**: endpoint payloads
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_price`]**: Format amounts for display
//!
//! ## Wire Format
//!
//! - Every endpoint except the session status check answers with an
//!   [`Envelope`]; endpoint data is flattened next to `success`/`message`
//! - Payload fields default when absent so failed envelopes still decode
//! - All structs implement both `Serialize` and `Deserialize`
//!
//! ## Usage
//!
//! ```rust
//! use shared::{CartItems, Envelope};
//!
//! let body = r#"{"success":true,"message":"","items":[{"product_id":1,"price":10,"quantity":2}]}"#;
//! let envelope: Envelope<CartItems> = serde_json::from_str(body).unwrap();
//! assert_eq!(envelope.data.subtotal(), 20.0);
//! ```

pub mod dto;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where all exports are public API
pub use dto::*;
pub use utils::*;
