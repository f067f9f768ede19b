//! # Storefront Client
//!
//! Headless entry point: resolves the session against the configured API,
//! loads the header cart count and logs what a host would render.

use std::sync::Arc;

use storefront::services::api::ApiClient;
use storefront::{debug, App, StorefrontConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _log_guard = debug::init();

    let config = StorefrontConfig::from_env()?;
    tracing::info!(api_url = %config.api_url, "Starting storefront client");

    let client = Arc::new(ApiClient::new(&config));
    let (app, events) = App::new(client, config);

    let status = app.start().await;
    tracing::info!(
        logged_in = status.is_logged_in,
        admin = status.is_admin,
        cart_count = app.cart_badge.get(),
        "Session resolved"
    );

    while let Ok(event) = events.try_recv() {
        tracing::debug!(?event, "Host event");
    }

    println!(
        "{} | cart: {}",
        if status.is_logged_in { "logged in" } else { "logged out" },
        app.cart_badge.get()
    );
    Ok(())
}
