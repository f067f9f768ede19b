//! # Utility Functions
//!
//! - **[`validation`]**: Input validation for shipping, password, card and catalog forms
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Price formatting shared with the DTOs

pub mod validation;
