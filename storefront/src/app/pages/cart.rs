//! # Cart Page
//!
//! Cart lines with `+`/`-` controls, removal and the summary card.
//! Quantity changes are optimistic; the server's `new_quantity` wins and a
//! line whose quantity reaches zero is dropped.

use super::targets;
use crate::app::optimistic::{self, QuantityChange};
use crate::app::{App, Failure};
use crate::core::error::{AppError, Result};
use crate::services::api::cart;
use crate::ui::{DisplayCell, MessageKind};
use parking_lot::RwLock;
use shared::{format_price, CartItems, CartLineItem, Envelope, NoPayload, QuantityUpdate, SHIPPING_LABEL};
use std::collections::HashMap;
use std::sync::Arc;

/// Price lines of a summary card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

impl CartSummary {
    pub fn from_subtotal(subtotal: f64) -> Self {
        Self {
            subtotal: format_price(subtotal),
            shipping: SHIPPING_LABEL.to_string(),
            total: format_price(subtotal),
        }
    }
}

pub struct CartPage {
    app: App,
    pub items: DisplayCell<Vec<CartLineItem>>,
    /// Shown instead of the lines, summary and checkout buttons.
    pub empty_state: DisplayCell<bool>,
    quantities: Arc<RwLock<HashMap<u64, DisplayCell<u32>>>>,
}

impl CartPage {
    pub fn new(app: &App) -> Self {
        app.ui.notifications.register(targets::CART);
        Self {
            app: app.clone(),
            items: DisplayCell::new(Vec::new()),
            empty_state: DisplayCell::new(true),
            quantities: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn render(&self) -> Result<()> {
        let ui = &self.app.ui;
        if !self.app.session.is_logged_in() {
            ui.message("Please log in to view your cart.", MessageKind::Info, targets::CART);
            self.show_lines(Vec::new());
            return Ok(());
        }

        ui.message("Loading cart...", MessageKind::Info, targets::CART);
        let items = match self
            .app
            .requests
            .exchange::<CartItems>(cart::get_cart_items())
            .await
        {
            Ok(envelope) => envelope.data.items,
            Err(error) => {
                let text = if error.is_server_verdict() {
                    error.server_message().unwrap_or("Failed to load cart items.")
                } else {
                    "Error loading cart. Please try again."
                };
                ui.message(text, MessageKind::Error, targets::CART);
                self.show_lines(Vec::new());
                return Err(error);
            }
        };

        if items.is_empty() {
            ui.message("Your cart is empty!", MessageKind::Info, targets::CART);
        } else {
            ui.notifications.clear(targets::CART);
        }
        self.show_lines(items);
        Ok(())
    }

    pub fn quantity_cell(&self, product_id: u64) -> Option<DisplayCell<u32>> {
        self.quantities.read().get(&product_id).cloned()
    }

    /// Totals over the displayed quantities.
    pub fn summary(&self) -> CartSummary {
        let quantities = self.quantities.read();
        let subtotal = self
            .items
            .get()
            .iter()
            .map(|item| {
                let quantity = quantities
                    .get(&item.product_id)
                    .map(DisplayCell::get)
                    .unwrap_or(item.quantity);
                item.price * f64::from(quantity)
            })
            .sum();
        CartSummary::from_subtotal(subtotal)
    }

    pub async fn change_quantity(
        &self,
        product_id: u64,
        change: QuantityChange,
    ) -> Result<Envelope<QuantityUpdate>> {
        self.app
            .require_login("Please log in to update cart quantity.")?;
        let cell = self
            .quantity_cell(product_id)
            .ok_or_else(|| AppError::State(format!("Product {} is not in the cart", product_id)))?;

        let ui = &self.app.ui;
        let requests = &self.app.requests;
        let result = optimistic::mutate(
            &cell,
            |quantity| change.apply(*quantity),
            |_| {
                ui.busy("Updating cart...", targets::CART);
                requests.exchange::<QuantityUpdate>(cart::update_cart_quantity(product_id, change))
            },
            |envelope: &Envelope<QuantityUpdate>| envelope.data.new_quantity,
        )
        .await;

        match &result {
            Ok(envelope) => {
                ui.report(MessageKind::Success, &envelope.message, &envelope.message, targets::CART);
                if cell.get() == 0 {
                    self.drop_line(product_id);
                }
                self.app.refresh_cart_count().await;
            }
            Err(error) => {
                let failure = Failure::new(
                    targets::CART,
                    "Failed to update quantity.",
                    "Network error updating cart quantity.",
                    "Network error updating cart quantity.",
                );
                self.app.report_failure(error, &failure);
            }
        }
        result
    }

    pub async fn remove_item(&self, product_id: u64) -> Result<Envelope> {
        self.app
            .require_login("Please log in to remove items from cart.")?;

        let ui = &self.app.ui;
        ui.busy("Removing item...", targets::CART);
        match self
            .app
            .requests
            .exchange::<NoPayload>(cart::remove_from_cart(product_id))
            .await
        {
            Ok(envelope) => {
                ui.report(MessageKind::Success, &envelope.message, &envelope.message, targets::CART);
                self.drop_line(product_id);
                self.app.refresh_cart_count().await;
                Ok(envelope)
            }
            Err(error) => {
                let failure = Failure::new(
                    targets::CART,
                    "Unknown error",
                    "Network error removing item.",
                    "Network error removing item.",
                )
                .prefixed("Failed to remove item: ");
                self.app.report_failure(&error, &failure);
                Err(error)
            }
        }
    }

    fn show_lines(&self, items: Vec<CartLineItem>) {
        *self.quantities.write() = items
            .iter()
            .map(|item| (item.product_id, DisplayCell::new(item.quantity)))
            .collect();
        self.empty_state.set(items.is_empty());
        self.items.set(items);
    }

    fn drop_line(&self, product_id: u64) {
        let mut items = self.items.get();
        items.retain(|item| item.product_id != product_id);
        self.quantities.write().remove(&product_id);
        self.empty_state.set(items.is_empty());
        self.items.set(items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pages::testing::{app, message};
    use crate::services::api::mock::MockTransport;
    use crate::services::api::Method;

    const TWO_LINES: &str = r#"{"success":true,"message":"","items":[
        {"product_id":1,"name":"Tea","price":120,"quantity":2},
        {"product_id":2,"name":"Coffee","price":"250.50","quantity":1}
    ]}"#;

    fn with_cart(mock: &MockTransport) {
        mock.respond(Method::Get, "/api/get_cart_items", 200, TWO_LINES)
            .respond(Method::Get, "/api/get_cart_count", 200, r#"{"success":true,"count":3}"#);
    }

    #[tokio::test]
    async fn test_render_totals() {
        let mock = Arc::new(MockTransport::new());
        with_cart(&mock);
        let (app, _events) = app(&mock, true);
        let page = CartPage::new(&app);

        page.render().await.unwrap();

        assert!(!page.empty_state.get());
        assert_eq!(
            page.summary(),
            CartSummary {
                subtotal: "₹490.50".to_string(),
                shipping: "Free".to_string(),
                total: "₹490.50".to_string(),
            }
        );
        assert!(!message(&app, targets::CART).0.contains("Loading"));
    }

    #[tokio::test]
    async fn test_logged_out_shows_prompt_without_request() {
        let mock = Arc::new(MockTransport::new());
        let (app, _events) = app(&mock, false);
        let page = CartPage::new(&app);

        page.render().await.unwrap();

        assert_eq!(mock.request_count(), 0);
        assert!(page.empty_state.get());
        assert_eq!(
            message(&app, targets::CART),
            ("Please log in to view your cart.".to_string(), Some(MessageKind::Info))
        );
    }

    #[tokio::test]
    async fn test_server_quantity_wins() {
        let mock = Arc::new(MockTransport::new());
        with_cart(&mock);
        mock.respond(
            Method::Post,
            "/api/update_cart_quantity",
            200,
            r#"{"success":true,"message":"Cart updated.","new_quantity":5}"#,
        );
        let (app, _events) = app(&mock, true);
        let page = CartPage::new(&app);
        page.render().await.unwrap();

        page.change_quantity(1, QuantityChange::Increase).await.unwrap();

        assert_eq!(page.quantity_cell(1).unwrap().get(), 5);
        let sent = mock.last_request_to("/api/update_cart_quantity").unwrap();
        assert_eq!(sent.field("change_type"), Some("increase"));
        assert_eq!(page.summary().subtotal, "₹850.50");
    }

    #[tokio::test]
    async fn test_decrease_to_zero_drops_line() {
        let mock = Arc::new(MockTransport::new());
        with_cart(&mock);
        mock.respond(
            Method::Post,
            "/api/update_cart_quantity",
            200,
            r#"{"success":true,"message":"Item removed from cart."}"#,
        );
        let (app, _events) = app(&mock, true);
        let page = CartPage::new(&app);
        page.render().await.unwrap();

        page.change_quantity(2, QuantityChange::Decrease).await.unwrap();

        assert!(page.quantity_cell(2).is_none());
        assert_eq!(page.items.get().len(), 1);
        assert_eq!(app.cart_badge.get(), 3);
    }

    #[tokio::test]
    async fn test_network_failure_reverts() {
        let mock = Arc::new(MockTransport::new());
        with_cart(&mock);
        mock.fail(Method::Post, "/api/update_cart_quantity", "timed out");
        let (app, _events) = app(&mock, true);
        let page = CartPage::new(&app);
        page.render().await.unwrap();

        assert!(page.change_quantity(1, QuantityChange::Decrease).await.is_err());

        assert_eq!(page.quantity_cell(1).unwrap().get(), 2);
        assert_eq!(
            message(&app, targets::CART),
            (
                "Network error updating cart quantity.".to_string(),
                Some(MessageKind::Error)
            )
        );
    }

    #[tokio::test]
    async fn test_remove_requires_login() {
        let mock = Arc::new(MockTransport::new());
        let (app, _events) = app(&mock, false);
        let page = CartPage::new(&app);

        assert!(matches!(
            page.remove_item(1).await,
            Err(AppError::NotAuthenticated(_))
        ));
        assert_eq!(app.ui.modal.view().message, "Please log in to remove items from cart.");
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_remove_rejected_keeps_line() {
        let mock = Arc::new(MockTransport::new());
        with_cart(&mock);
        mock.respond(
            Method::Post,
            "/api/remove_from_cart",
            200,
            r#"{"success":false,"message":"Item not found in cart."}"#,
        );
        let (app, _events) = app(&mock, true);
        let page = CartPage::new(&app);
        page.render().await.unwrap();

        assert!(page.remove_item(1).await.is_err());

        assert_eq!(page.items.get().len(), 2);
        assert_eq!(
            message(&app, targets::CART).0,
            "Failed to remove item: Item not found in cart."
        );
    }
}
