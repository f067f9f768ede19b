//! # External Services
//!
//! - **[`api`]**: HTTP client for the storefront backend

pub mod api;
