//! # Storefront Client - Library Root
//!
//! The client-side interaction layer of an e-commerce storefront: every page
//! controller, the request/response exchange with the JSON envelope API, and
//! the notification, overlay and login-prompt surfaces they report through.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 storefront (this crate)                  │
//! ├──────────────────────────────────────────────────────────┤
//! │  app::pages   - one controller per page                  │
//! │  app          - session, optimistic updates, OTP flow    │
//! │  services     - envelope exchange over ApiTransport      │
//! │  ui           - messages, overlay, modal, navigation     │
//! └──────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ HTTP (reqwest)               │ AppEvent channel
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  Storefront API │          │   Host (renders pages,  │
//! │  (envelopes)    │          │   follows navigation)   │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: [`App`] orchestrator, page controllers, session context,
//!   optimistic mutation and the card OTP state machine
//! - **services**: `api` endpoint builders, [`services::api::RequestClient`]
//!   and the reqwest-backed [`services::api::ApiClient`]
//! - **ui**: display cells, bound forms and the shared UI surfaces
//! - **config**: [`StorefrontConfig`] from the environment
//! - **core**: [`AppError`] and the transport seam
//! - **debug**: logging setup and per-action trace ids
//! - **utils**: client-side form validation
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront::services::api::ApiClient;
//! use storefront::{App, StorefrontConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorefrontConfig::from_env()?;
//! let client = Arc::new(ApiClient::new(&config));
//! let (app, _events) = App::new(client, config);
//! let _status = app.start().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! Page controllers are tested against [`services::api::mock::MockTransport`]
//! with tokio's paused clock for the message, overlay and redirect timers.

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod ui;
pub mod utils;

pub use app::{App, AppEvent};
pub use config::StorefrontConfig;
pub use core::{AppError, Result};
