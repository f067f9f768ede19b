//! # Backend API Client Module
//!
//! HTTP access to the storefront backend.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs       - Module exports and documentation
//! ├── request.rs   - Transport-neutral request/response model
//! ├── client.rs    - ApiClient, the reqwest transport
//! ├── mock.rs      - MockTransport, a scripted transport
//! ├── exchange.rs  - RequestClient: classification and the submit flow
//! ├── auth.rs      - Login, registration, password reset, session status
//! ├── cart.rs      - Cart items, count, add/update/remove
//! ├── account.rs   - Shipping info, profile, password change
//! ├── orders.rs    - Place order, history, details
//! ├── admin.rs     - Relational admin: products, orders, CSV import
//! └── sheets.rs    - Spreadsheet admin and the public product feed
//! ```

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod client;
pub mod exchange;
pub mod mock;
pub mod orders;
pub mod request;
pub mod sheets;

pub use client::ApiClient;
pub use exchange::{RequestClient, SubmitOptions};
pub use request::{ApiRequest, FileUpload, Method, RawResponse};
