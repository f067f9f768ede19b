//! # Checkout Page
//!
//! Order summary plus the shipping form. The summary loader is shared with
//! the payment page.

use super::cart::CartSummary;
use super::{targets, SHIPPING_FIELDS};
use crate::app::{App, Failure};
use crate::core::error::{AppError, Result};
use crate::services::api::{account, cart};
use crate::ui::{BoundForm, DisplayCell, MessageKind, OverlayIcon};
use crate::utils::validation::{validate_phone, validate_zip_code};
use shared::{format_amount, CartItems, CartLineItem, Envelope, NoPayload, ShippingInfoPayload};
use std::time::Duration;

const SAVE_REDIRECT_DELAY: Duration = Duration::from_millis(1000);
const EMPTY_CART_NOTICE: &str = "Your cart is empty. Please add items before checking out.";

/// Fields the shipping form cannot submit without.
const REQUIRED_SHIPPING_FIELDS: &[&str] = &[
    "fullName",
    "addressLine1",
    "addressLine2",
    "city",
    "state",
    "zipCode",
    "phone",
];

/// The order summary card shown on checkout and payment.
#[derive(Clone)]
pub struct OrderSummaryView {
    pub items: DisplayCell<Vec<CartLineItem>>,
    pub totals: DisplayCell<CartSummary>,
    /// Amount shown in the COD and UPI sections, without currency symbol.
    pub payable_amount: DisplayCell<String>,
    /// Replaces the item list when there is nothing to show.
    pub notice: DisplayCell<Option<String>>,
    /// Whether the page lets the visitor continue (shipping form, place order).
    pub can_proceed: DisplayCell<bool>,
}

impl Default for OrderSummaryView {
    fn default() -> Self {
        Self {
            items: DisplayCell::new(Vec::new()),
            totals: DisplayCell::new(CartSummary::from_subtotal(0.0)),
            payable_amount: DisplayCell::new(format_amount(0.0)),
            notice: DisplayCell::new(None),
            can_proceed: DisplayCell::new(false),
        }
    }
}

impl OrderSummaryView {
    /// Load the cart into the summary, reporting on `target`.
    pub async fn load(&self, app: &App, target: &str) -> Result<()> {
        let ui = &app.ui;
        if !app.session.is_logged_in() {
            let prompt = "Please log in to view your order summary.";
            ui.message(prompt, MessageKind::Info, target);
            self.show(Vec::new(), Some(prompt));
            return Ok(());
        }

        ui.overlay
            .show("Loading order summary...", OverlayIcon::Spinner);
        match app.requests.exchange::<CartItems>(cart::get_cart_items()).await {
            Ok(envelope) if envelope.data.items.is_empty() => {
                ui.report(
                    MessageKind::Info,
                    "Cart is empty.",
                    "Your cart is empty! Please add items to proceed.",
                    target,
                );
                self.show(Vec::new(), Some(EMPTY_CART_NOTICE));
                Ok(())
            }
            Ok(envelope) => {
                ui.overlay.success("Order summary loaded.");
                ui.notifications.clear(target);
                self.show(envelope.data.items, None);
                Ok(())
            }
            Err(error) if error.is_server_verdict() => {
                tracing::warn!(error = %error, "Order summary unavailable");
                ui.overlay.error("Failed to load cart items.");
                self.show(Vec::new(), Some(EMPTY_CART_NOTICE));
                Err(error)
            }
            Err(error) => {
                ui.overlay.error("Network error loading summary.");
                self.show(
                    Vec::new(),
                    Some("Could not load order summary. Please check your connection."),
                );
                Err(error)
            }
        }
    }

    fn show(&self, items: Vec<CartLineItem>, notice: Option<&str>) {
        let subtotal: f64 = items.iter().map(CartLineItem::line_total).sum();
        self.totals.set(CartSummary::from_subtotal(subtotal));
        self.payable_amount.set(format_amount(subtotal));
        self.can_proceed.set(!items.is_empty());
        self.notice.set(notice.map(str::to_string));
        self.items.set(items);
    }
}

pub struct CheckoutPage {
    app: App,
    pub summary: OrderSummaryView,
    pub shipping_form: BoundForm,
    pub shipping_form_visible: DisplayCell<bool>,
}

impl CheckoutPage {
    pub fn new(app: &App) -> Self {
        app.ui.notifications.register(targets::CHECKOUT);
        Self {
            app: app.clone(),
            summary: OrderSummaryView::default(),
            shipping_form: BoundForm::new(SHIPPING_FIELDS),
            shipping_form_visible: DisplayCell::new(true),
        }
    }

    /// Page load: summary first, then the saved address.
    pub async fn open(&self) {
        if let Err(e) = self.summary.load(&self.app, targets::CHECKOUT).await {
            tracing::warn!(error = %e, "Checkout summary failed");
        }
        if let Err(e) = self.load_shipping_info().await {
            tracing::warn!(error = %e, "Saved shipping info failed");
        }
    }

    /// Prefill the shipping form with the saved address, when there is one.
    pub async fn load_shipping_info(&self) -> Result<()> {
        let ui = &self.app.ui;
        if !self.app.session.is_logged_in() {
            ui.message(
                "Please log in to manage shipping information.",
                MessageKind::Info,
                targets::CHECKOUT,
            );
            self.shipping_form_visible.set(false);
            return Ok(());
        }

        ui.overlay
            .show("Loading shipping information...", OverlayIcon::Spinner);
        match self
            .app
            .requests
            .exchange::<ShippingInfoPayload>(account::get_shipping_info())
            .await
        {
            Ok(Envelope {
                data: ShippingInfoPayload {
                    shipping_info: Some(info),
                },
                ..
            }) => {
                self.shipping_form.fill(info.form_fields());
                ui.overlay.success("Saved shipping information loaded.");
                ui.message(
                    "Saved shipping information loaded.",
                    MessageKind::Info,
                    targets::CHECKOUT,
                );
                Ok(())
            }
            Ok(_) => {
                ui.overlay.info("No saved shipping information.");
                Ok(())
            }
            Err(error) if error.is_server_verdict() => {
                tracing::info!(error = %error, "No saved shipping information");
                ui.overlay.info("No saved shipping information.");
                Ok(())
            }
            Err(error) => {
                ui.overlay.error("Network error loading shipping info.");
                Err(error)
            }
        }
    }

    pub async fn save_shipping_info(&self) -> Result<Envelope> {
        let ui = &self.app.ui;
        if !self.app.session.is_logged_in() {
            let prompt = "Please log in to save shipping information.";
            ui.message(prompt, MessageKind::Info, targets::CHECKOUT);
            return Err(AppError::NotAuthenticated(prompt.to_string()));
        }

        let form = &self.shipping_form;
        let invalid = if !form.missing(REQUIRED_SHIPPING_FIELDS).is_empty() {
            Some("Please fill in all required shipping fields.".to_string())
        } else {
            validate_zip_code(&form.get("zipCode"))
                .into_result()
                .and(validate_phone(&form.get("phone")).into_result())
                .err()
        };
        if let Some(message) = invalid {
            ui.message(&message, MessageKind::Error, targets::CHECKOUT);
            return Err(AppError::Validation(message));
        }

        ui.busy("Saving shipping information...", targets::CHECKOUT);
        match self
            .app
            .requests
            .exchange::<NoPayload>(account::save_shipping_info(form.entries()))
            .await
        {
            Ok(envelope) => {
                ui.report(
                    MessageKind::Success,
                    &envelope.message,
                    &envelope.message,
                    targets::CHECKOUT,
                );
                if let Some(redirect) = &envelope.redirect {
                    self.app
                        .navigator
                        .navigate_after(redirect, SAVE_REDIRECT_DELAY);
                }
                Ok(envelope)
            }
            Err(error) => {
                let failure = Failure::new(
                    targets::CHECKOUT,
                    "Failed to save shipping information.",
                    "Network error saving shipping information.",
                    "Network error saving shipping information. Please try again.",
                );
                self.app.report_failure(&error, &failure);
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pages::testing::{app, message};
    use crate::app::AppEvent;
    use crate::services::api::mock::MockTransport;
    use crate::services::api::Method;
    use std::sync::Arc;

    fn fill_valid(form: &BoundForm) {
        form.fill([
            ("fullName", "Asha Rao".to_string()),
            ("addressLine1", "12 MG Road".to_string()),
            ("addressLine2", "Indiranagar".to_string()),
            ("city", "Bengaluru".to_string()),
            ("state", "KA".to_string()),
            ("zipCode", "560038".to_string()),
            ("phone", "9876543210".to_string()),
        ]);
    }

    #[tokio::test]
    async fn test_summary_amounts() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Get,
            "/api/get_cart_items",
            200,
            r#"{"success":true,"items":[{"product_id":1,"price":99.5,"quantity":2}]}"#,
        );
        let (app, _events) = app(&mock, true);
        let page = CheckoutPage::new(&app);

        page.summary.load(&app, targets::CHECKOUT).await.unwrap();

        assert_eq!(page.summary.totals.get().total, "₹199.00");
        assert_eq!(page.summary.payable_amount.get(), "199.00");
        assert!(page.summary.can_proceed.get());
        assert_eq!(app.ui.overlay.view().icon, Some(OverlayIcon::Success));
    }

    #[tokio::test]
    async fn test_empty_summary_blocks_checkout() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(Method::Get, "/api/get_cart_items", 200, r#"{"success":true,"items":[]}"#);
        let (app, _events) = app(&mock, true);
        let page = CheckoutPage::new(&app);

        page.summary.load(&app, targets::CHECKOUT).await.unwrap();

        assert!(!page.summary.can_proceed.get());
        assert_eq!(page.summary.notice.get().as_deref(), Some(EMPTY_CART_NOTICE));
        let overlay = app.ui.overlay.view();
        assert_eq!(overlay.message, "Cart is empty.");
        assert_eq!(overlay.icon, None);
    }

    #[tokio::test]
    async fn test_saved_shipping_info_prefills_form() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Get,
            "/api/get_shipping_info",
            200,
            r#"{"success":true,"shipping_info":{"full_name":"Asha Rao","zip_code":"560038","phone":"9876543210"}}"#,
        );
        let (app, _events) = app(&mock, true);
        let page = CheckoutPage::new(&app);

        page.load_shipping_info().await.unwrap();

        assert_eq!(page.shipping_form.get("fullName"), "Asha Rao");
        assert_eq!(page.shipping_form.get("zipCode"), "560038");
        assert_eq!(page.shipping_form.get("addressLine3"), "");
    }

    #[tokio::test]
    async fn test_short_zip_rejected_before_network() {
        let mock = Arc::new(MockTransport::new());
        let (app, _events) = app(&mock, true);
        let page = CheckoutPage::new(&app);
        fill_valid(&page.shipping_form);
        page.shipping_form.set("zipCode", "123");

        let result = page.save_shipping_info().await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(mock.request_count(), 0);
        assert_eq!(
            message(&app, targets::CHECKOUT),
            (
                "Invalid Zip Code format. Must be 5 or 6 digits.".to_string(),
                Some(MessageKind::Error)
            )
        );
    }

    #[tokio::test]
    async fn test_missing_required_field() {
        let mock = Arc::new(MockTransport::new());
        let (app, _events) = app(&mock, true);
        let page = CheckoutPage::new(&app);
        fill_valid(&page.shipping_form);
        page.shipping_form.set("city", "  ");

        assert!(page.save_shipping_info().await.is_err());
        assert_eq!(
            message(&app, targets::CHECKOUT).0,
            "Please fill in all required shipping fields."
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_save_follows_server_redirect_after_delay() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/api/save_shipping_info",
            200,
            r#"{"success":true,"message":"Shipping information saved.","redirect":"payment.html"}"#,
        );
        let (app, events) = app(&mock, true);
        let page = CheckoutPage::new(&app);
        fill_valid(&page.shipping_form);

        page.save_shipping_info().await.unwrap();

        let sent = mock.last_request_to("/api/save_shipping_info").unwrap();
        assert_eq!(sent.field("addressLine2"), Some("Indiranagar"));
        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(events.try_recv().is_err());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(events.try_recv(), Ok(AppEvent::Navigate("payment.html".to_string())));
    }
}
