//! # Order Pages
//!
//! The customer's order history and the confirmation shown after checkout.

use super::targets;
use crate::app::App;
use crate::core::error::{AppError, Result};
use crate::services::api::orders;
use crate::ui::{DisplayCell, MessageKind, OverlayIcon};
use shared::{Order, OrderDetails, OrderList};

pub struct OrderHistoryPage {
    app: App,
    pub orders: DisplayCell<Vec<Order>>,
}

impl OrderHistoryPage {
    pub fn new(app: &App) -> Self {
        app.ui.notifications.register(targets::ORDER_HISTORY);
        Self {
            app: app.clone(),
            orders: DisplayCell::new(Vec::new()),
        }
    }

    pub async fn load(&self) -> Result<()> {
        let ui = &self.app.ui;
        if !self.app.session.is_logged_in() {
            ui.message(
                "Please log in to view your order history.",
                MessageKind::Info,
                targets::ORDER_HISTORY,
            );
            self.orders.set(Vec::new());
            return Ok(());
        }

        ui.busy("Loading order history...", targets::ORDER_HISTORY);
        match self
            .app
            .requests
            .exchange::<OrderList>(orders::get_order_history())
            .await
        {
            Ok(envelope) if envelope.data.orders.is_empty() => {
                ui.report(
                    MessageKind::Info,
                    "You have no past orders.",
                    "You have no past orders.",
                    targets::ORDER_HISTORY,
                );
                self.orders.set(Vec::new());
                Ok(())
            }
            Ok(envelope) => {
                ui.overlay.success("Order history loaded.");
                ui.notifications.clear(targets::ORDER_HISTORY);
                self.orders.set(envelope.data.orders);
                Ok(())
            }
            Err(error) if error.is_server_verdict() => {
                let message = error
                    .server_message()
                    .unwrap_or("Failed to load order history.");
                ui.report(
                    MessageKind::Error,
                    "Failed to load order history.",
                    message,
                    targets::ORDER_HISTORY,
                );
                Err(error)
            }
            Err(error) => {
                ui.report(
                    MessageKind::Error,
                    "Network error loading history.",
                    "Error loading order history. Please try again.",
                    targets::ORDER_HISTORY,
                );
                Err(error)
            }
        }
    }
}

pub struct OrderConfirmationPage {
    app: App,
    pub order: DisplayCell<Option<Order>>,
}

impl OrderConfirmationPage {
    pub fn new(app: &App) -> Self {
        app.ui.notifications.register(targets::CONFIRMATION);
        Self {
            app: app.clone(),
            order: DisplayCell::new(None),
        }
    }

    /// Page load with the `order_id` query parameter.
    pub async fn load(&self, order_id: Option<u64>) -> Result<()> {
        let ui = &self.app.ui;
        ui.overlay
            .show("Loading order details...", OverlayIcon::Spinner);

        let Some(order_id) = order_id else {
            let message = "Order ID missing from URL. Cannot display order details.";
            ui.report(
                MessageKind::Error,
                "Error loading order details.",
                message,
                targets::CONFIRMATION,
            );
            return Err(AppError::Validation(message.to_string()));
        };
        if !self.app.session.is_logged_in() {
            ui.report(
                MessageKind::Info,
                "Not logged in.",
                "Please log in to view order details.",
                targets::CONFIRMATION,
            );
            return Ok(());
        }

        match self
            .app
            .requests
            .exchange::<OrderDetails>(orders::get_order_details(order_id))
            .await
        {
            Ok(envelope) => {
                ui.report(
                    MessageKind::Success,
                    "Order details loaded successfully!",
                    "Order details loaded.",
                    targets::CONFIRMATION,
                );
                self.order.set(envelope.data.order);
                Ok(())
            }
            Err(error) if error.is_server_verdict() => {
                let message = error
                    .server_message()
                    .unwrap_or("Failed to load order details.");
                ui.report(
                    MessageKind::Error,
                    "Failed to load order details.",
                    message,
                    targets::CONFIRMATION,
                );
                Err(error)
            }
            Err(error) => {
                tracing::warn!(order_id, error = %error, "Order details unavailable");
                ui.report(
                    MessageKind::Error,
                    "Network error!",
                    "Network error loading order details. Please try again.",
                    targets::CONFIRMATION,
                );
                Err(error)
            }
        }
    }
}
