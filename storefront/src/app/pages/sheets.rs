//! # Spreadsheet Admin Pages
//!
//! Product and order tables backed by the spreadsheet store. The product
//! form doubles as the edit form: [`SheetsProductsPage::edit`] switches it
//! into update mode until the next save or cancel.

use super::targets;
use crate::app::{optimistic, App, Failure};
use crate::core::error::{AppError, Result};
use crate::services::api::sheets;
use crate::ui::{BoundForm, DisplayCell, MessageKind, OverlayIcon};
use crate::utils::validation::{validate_price, validate_stock};
use parking_lot::RwLock;
use shared::{Envelope, NoPayload, Order, OrderList, OrderStatus, Product, ProductList};
use std::collections::HashMap;
use std::sync::Arc;

const SHEET_PRODUCT_FIELDS: &[&str] =
    &["productId", "name", "description", "price", "image_url", "stock"];

/// Table placeholder text for a failed load.
fn table_failure(error: &AppError, what: &str) -> String {
    if error.is_server_verdict() {
        format!(
            "Failed to load {}: {}",
            what,
            error.server_message().unwrap_or("Unknown error")
        )
    } else {
        format!("An error occurred while loading {}.", what)
    }
}

pub struct SheetsProductsPage {
    app: App,
    pub products: DisplayCell<Vec<Product>>,
    /// Replaces the table rows when there is nothing to list.
    pub table_notice: DisplayCell<Option<String>>,
    pub product_form: BoundForm,
    /// Product being edited; `None` while the form adds products.
    pub editing: DisplayCell<Option<u64>>,
}

impl SheetsProductsPage {
    pub fn new(app: &App) -> Self {
        app.ui.notifications.register(targets::PRODUCTS);
        Self {
            app: app.clone(),
            products: DisplayCell::new(Vec::new()),
            table_notice: DisplayCell::new(None),
            product_form: BoundForm::new(SHEET_PRODUCT_FIELDS),
            editing: DisplayCell::new(None),
        }
    }

    pub async fn load(&self) -> Result<()> {
        self.fetch_table(true).await
    }

    /// Refresh the table; unannounced refreshes leave the current outcome
    /// on screen.
    async fn fetch_table(&self, announce: bool) -> Result<()> {
        let ui = &self.app.ui;
        if announce {
            ui.busy("Loading products from sheet...", targets::PRODUCTS);
        }

        match self
            .app
            .requests
            .exchange::<ProductList>(sheets::list_products(""))
            .await
        {
            Ok(envelope) => {
                if announce {
                    ui.overlay.success("Products loaded from sheet.");
                    ui.notifications.clear(targets::PRODUCTS);
                }
                let products = envelope.data.products;
                self.table_notice.set(
                    products
                        .is_empty()
                        .then(|| "No products found in the Google Sheet.".to_string()),
                );
                self.products.set(products);
                Ok(())
            }
            Err(error) => {
                let overlay = if error.is_server_verdict() {
                    error
                        .server_message()
                        .unwrap_or("Failed to load products from sheet.")
                } else {
                    "An error occurred while loading products from sheet."
                };
                ui.overlay.error(overlay);
                self.table_notice
                    .set(Some(table_failure(&error, "products")));
                Err(error)
            }
        }
    }

    /// Load one product into the form and switch to update mode.
    pub async fn edit(&self, product_id: u64) -> Result<()> {
        let ui = &self.app.ui;
        ui.overlay
            .show("Loading product for edit...", OverlayIcon::Spinner);

        let products = match self
            .app
            .requests
            .exchange::<ProductList>(sheets::list_products(""))
            .await
        {
            Ok(envelope) => envelope.data.products,
            Err(error) => {
                let failure = Failure::new(
                    targets::PRODUCTS,
                    "Failed to load product.",
                    "Error loading product for edit.",
                    "An error occurred loading product for edit.",
                );
                self.app.report_failure(&error, &failure);
                return Err(error);
            }
        };

        let Some(product) = products.into_iter().find(|p| p.id == product_id) else {
            ui.report(
                MessageKind::Error,
                "Product not found.",
                "Product not found for editing.",
                targets::PRODUCTS,
            );
            return Err(AppError::State(format!("Product {} not found", product_id)));
        };

        ui.overlay.success("Product loaded.");
        self.product_form.fill([
            ("productId", product.id.to_string()),
            ("name", product.name),
            ("description", product.description.unwrap_or_default()),
            ("price", product.price.to_string()),
            ("image_url", product.image_url.unwrap_or_default()),
            ("stock", product.stock.to_string()),
        ]);
        self.editing.set(Some(product_id));
        ui.message(
            &format!("Editing product ID: {}", product_id),
            MessageKind::Info,
            targets::PRODUCTS,
        );
        Ok(())
    }

    /// Add or update, depending on the form's mode.
    pub async fn save(&self) -> Result<Envelope> {
        let ui = &self.app.ui;
        let form = &self.product_form;
        if let Err(message) = validate_price(&form.get("price"))
            .into_result()
            .and_then(|_| validate_stock(&form.get("stock")).into_result())
        {
            ui.message(&message, MessageKind::Error, targets::PRODUCTS);
            return Err(AppError::Validation(message));
        }

        let editing = self.editing.get();
        let (request, saved) = match editing {
            Some(id) => (
                sheets::update_product(id, form.entries()),
                "Product updated successfully!",
            ),
            None => (
                sheets::add_product(form.entries()),
                "Product added successfully!",
            ),
        };

        ui.overlay.show("Saving product...", OverlayIcon::Spinner);
        match self.app.requests.exchange::<NoPayload>(request).await {
            Ok(envelope) => {
                tracing::info!(product_id = ?editing, "Sheet product saved");
                ui.report(MessageKind::Success, saved, saved, targets::PRODUCTS);
                self.leave_edit_mode();
                let _ = self.fetch_table(false).await;
                Ok(envelope)
            }
            Err(error) => {
                let failure = Failure::new(
                    targets::PRODUCTS,
                    "Product save failed.",
                    "An error occurred while saving product.",
                    "An error occurred while saving product.",
                );
                self.app.report_failure(&error, &failure);
                Err(error)
            }
        }
    }

    pub fn cancel_edit(&self) {
        self.leave_edit_mode();
        self.app
            .ui
            .message("Edit cancelled.", MessageKind::Info, targets::PRODUCTS);
    }

    pub async fn delete(&self, product_id: u64) -> Result<Envelope> {
        let ui = &self.app.ui;
        ui.overlay.show("Deleting product...", OverlayIcon::Spinner);

        match self
            .app
            .requests
            .exchange::<NoPayload>(sheets::delete_product(product_id))
            .await
        {
            Ok(envelope) => {
                ui.report(
                    MessageKind::Success,
                    &envelope.message,
                    &envelope.message,
                    targets::PRODUCTS,
                );
                let _ = self.fetch_table(false).await;
                Ok(envelope)
            }
            Err(error) => {
                let failure = Failure::new(
                    targets::PRODUCTS,
                    "Failed to delete product.",
                    "An error occurred during product deletion.",
                    "An error occurred during product deletion.",
                );
                self.app.report_failure(&error, &failure);
                Err(error)
            }
        }
    }

    fn leave_edit_mode(&self) {
        self.product_form.reset();
        self.editing.set(None);
    }
}

pub struct SheetsOrdersPage {
    app: App,
    pub orders: DisplayCell<Vec<Order>>,
    pub table_notice: DisplayCell<Option<String>>,
    statuses: Arc<RwLock<HashMap<u64, DisplayCell<OrderStatus>>>>,
}

impl SheetsOrdersPage {
    pub fn new(app: &App) -> Self {
        app.ui.notifications.register(targets::SHEET_ORDERS);
        Self {
            app: app.clone(),
            orders: DisplayCell::new(Vec::new()),
            table_notice: DisplayCell::new(None),
            statuses: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn load(&self) -> Result<()> {
        let ui = &self.app.ui;
        ui.busy("Loading orders from sheet...", targets::SHEET_ORDERS);

        match self
            .app
            .requests
            .exchange::<OrderList>(sheets::list_orders())
            .await
        {
            Ok(envelope) => {
                ui.overlay.success("Orders loaded from sheet.");
                ui.notifications.clear(targets::SHEET_ORDERS);
                let orders = envelope.data.orders;
                self.table_notice.set(
                    orders
                        .is_empty()
                        .then(|| "No orders found in the Google Sheet.".to_string()),
                );
                *self.statuses.write() = orders
                    .iter()
                    .map(|order| (order.id, DisplayCell::new(order.status)))
                    .collect();
                self.orders.set(orders);
                Ok(())
            }
            Err(error) => {
                let overlay = if error.is_server_verdict() {
                    error
                        .server_message()
                        .unwrap_or("Failed to load orders from sheet.")
                } else {
                    "An error occurred while loading orders from sheet."
                };
                ui.overlay.error(overlay);
                self.table_notice.set(Some(table_failure(&error, "orders")));
                Err(error)
            }
        }
    }

    pub fn status_cell(&self, order_id: u64) -> Option<DisplayCell<OrderStatus>> {
        self.statuses.read().get(&order_id).cloned()
    }

    pub async fn update_status(&self, order_id: u64, status: OrderStatus) -> Result<Envelope> {
        let cell = self
            .status_cell(order_id)
            .ok_or_else(|| AppError::State(format!("Order {} is not listed", order_id)))?;

        let ui = &self.app.ui;
        let requests = &self.app.requests;
        let result = optimistic::mutate(
            &cell,
            |_| status,
            |status| {
                ui.overlay.show(
                    &format!("Updating order #{} status to {}...", order_id, status),
                    OverlayIcon::Spinner,
                );
                requests.exchange::<NoPayload>(sheets::update_order_status(order_id, status))
            },
            |_: &Envelope| None,
        )
        .await;

        match &result {
            Ok(envelope) => ui.report(
                MessageKind::Success,
                &envelope.message,
                &envelope.message,
                targets::SHEET_ORDERS,
            ),
            Err(error) => {
                let failure = Failure::new(
                    targets::SHEET_ORDERS,
                    "Order status update failed.",
                    "An error occurred during status update.",
                    "An error occurred during status update.",
                );
                self.app.report_failure(error, &failure);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pages::testing::{app, message};
    use crate::services::api::mock::MockTransport;
    use crate::services::api::Method;

    const PRODUCTS: &str = "/api/admin/sheets/products";
    const ONE_PRODUCT: &str = r#"{"success":true,"products":[
        {"id":5,"name":"Mug","description":"Clay","price":"99.50","image_url":"","stock":4}
    ]}"#;

    #[tokio::test]
    async fn test_empty_sheet_notice() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(Method::Get, PRODUCTS, 200, r#"{"success":true,"products":[]}"#);
        let (app, _events) = app(&mock, true);
        let page = SheetsProductsPage::new(&app);

        page.load().await.unwrap();

        assert_eq!(
            page.table_notice.get().as_deref(),
            Some("No products found in the Google Sheet.")
        );
    }

    #[tokio::test]
    async fn test_load_failure_notice() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Get,
            PRODUCTS,
            500,
            r#"{"success":false,"message":"Sheet unavailable"}"#,
        );
        let (app, _events) = app(&mock, true);
        let page = SheetsProductsPage::new(&app);

        assert!(page.load().await.is_err());

        assert_eq!(app.ui.overlay.view().message, "Sheet unavailable");
        assert_eq!(
            page.table_notice.get().as_deref(),
            Some("Failed to load products: Sheet unavailable")
        );
    }

    #[tokio::test]
    async fn test_edit_then_update_uses_put() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(Method::Get, PRODUCTS, 200, ONE_PRODUCT).respond(
            Method::Put,
            "/api/admin/sheets/products/5",
            200,
            r#"{"success":true,"message":"Product updated."}"#,
        );
        let (app, _events) = app(&mock, true);
        let page = SheetsProductsPage::new(&app);

        page.edit(5).await.unwrap();
        assert_eq!(page.editing.get(), Some(5));
        assert_eq!(page.product_form.get("name"), "Mug");
        assert_eq!(page.product_form.get("stock"), "4");
        assert_eq!(message(&app, targets::PRODUCTS).0, "Editing product ID: 5");

        page.product_form.set("stock", "7");
        page.save().await.unwrap();

        let sent = mock.last_request_to("/api/admin/sheets/products/5").unwrap();
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.field("stock"), Some("7"));
        assert_eq!(page.editing.get(), None);
        assert_eq!(page.product_form.get("name"), "");
        assert_eq!(
            message(&app, targets::PRODUCTS),
            ("Product updated successfully!".to_string(), Some(MessageKind::Success))
        );
    }

    #[tokio::test]
    async fn test_edit_unknown_product() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(Method::Get, PRODUCTS, 200, ONE_PRODUCT);
        let (app, _events) = app(&mock, true);
        let page = SheetsProductsPage::new(&app);

        assert!(page.edit(9).await.is_err());

        assert_eq!(app.ui.overlay.view().message, "Product not found.");
        assert_eq!(message(&app, targets::PRODUCTS).0, "Product not found for editing.");
        assert_eq!(page.editing.get(), None);
    }

    #[tokio::test]
    async fn test_invalid_stock_rejected_before_network() {
        let mock = Arc::new(MockTransport::new());
        let (app, _events) = app(&mock, true);
        let page = SheetsProductsPage::new(&app);
        page.product_form.set("price", "10");
        page.product_form.set("stock", "-1");

        assert!(page.save().await.is_err());

        assert_eq!(mock.request_count(), 0);
        assert_eq!(
            message(&app, targets::PRODUCTS),
            (
                "Stock must be a whole number of zero or more.".to_string(),
                Some(MessageKind::Error)
            )
        );
    }

    #[tokio::test]
    async fn test_cancel_edit() {
        let mock = Arc::new(MockTransport::new());
        let (app, _events) = app(&mock, true);
        let page = SheetsProductsPage::new(&app);
        page.editing.set(Some(5));
        page.product_form.set("name", "Mug");

        page.cancel_edit();

        assert_eq!(page.editing.get(), None);
        assert_eq!(page.product_form.get("name"), "");
        assert_eq!(message(&app, targets::PRODUCTS).0, "Edit cancelled.");
    }

    #[tokio::test]
    async fn test_order_status_reverts_on_network_error() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Get,
            "/api/admin/sheets/orders",
            200,
            r#"{"success":true,"orders":[{"id":3,"status":"processing","items":[{"name":"Mug","price":"10","quantity":1}]}]}"#,
        )
        .fail(Method::Put, "/api/admin/sheets/orders/3/status", "connection reset");
        let (app, _events) = app(&mock, true);
        let page = SheetsOrdersPage::new(&app);
        page.load().await.unwrap();

        assert!(page.update_status(3, OrderStatus::Shipped).await.is_err());

        assert_eq!(page.status_cell(3).unwrap().get(), OrderStatus::Processing);
        assert_eq!(
            message(&app, targets::SHEET_ORDERS),
            (
                "An error occurred during status update.".to_string(),
                Some(MessageKind::Error)
            )
        );
    }
}
