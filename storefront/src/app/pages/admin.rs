//! # Admin Dashboard
//!
//! Product and order management against the relational store, plus bulk
//! product import from CSV. Order status changes are optimistic per order.

use super::targets;
use crate::app::{optimistic, App, Failure};
use crate::core::error::{AppError, Result};
use crate::services::api::{admin, FileUpload};
use crate::ui::{BoundForm, DisplayCell, MessageKind, OverlayIcon};
use parking_lot::RwLock;
use shared::{Envelope, NoPayload, Order, OrderList, OrderStatus, Product, ProductList};
use std::collections::HashMap;
use std::sync::Arc;

const PRODUCT_FIELDS: &[&str] = &["name", "description", "price", "image_url", "stock"];

pub struct AdminPage {
    app: App,
    pub products: DisplayCell<Vec<Product>>,
    pub orders: DisplayCell<Vec<Order>>,
    pub product_form: BoundForm,
    pub import_file: DisplayCell<Option<FileUpload>>,
    /// Row-level problems reported by the last import.
    pub import_errors: DisplayCell<Vec<String>>,
    statuses: Arc<RwLock<HashMap<u64, DisplayCell<OrderStatus>>>>,
}

impl AdminPage {
    pub fn new(app: &App) -> Self {
        for target in [
            targets::EXISTING_PRODUCTS,
            targets::PRODUCT_FORM,
            targets::ORDER_MANAGEMENT,
            targets::IMPORT,
        ] {
            app.ui.notifications.register(target);
        }
        Self {
            app: app.clone(),
            products: DisplayCell::new(Vec::new()),
            orders: DisplayCell::new(Vec::new()),
            product_form: BoundForm::new(PRODUCT_FIELDS),
            import_file: DisplayCell::new(None),
            import_errors: DisplayCell::new(Vec::new()),
            statuses: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn open(&self) {
        if let Err(e) = self.load_products().await {
            tracing::warn!(error = %e, "Admin products failed");
        }
        if let Err(e) = self.load_orders().await {
            tracing::warn!(error = %e, "Admin orders failed");
        }
    }

    pub async fn load_products(&self) -> Result<()> {
        self.fetch_products(true).await
    }

    /// Refresh the product table. Unannounced refreshes follow another
    /// action and leave its outcome on screen.
    async fn fetch_products(&self, announce: bool) -> Result<()> {
        let ui = &self.app.ui;
        let target = targets::EXISTING_PRODUCTS;
        if announce {
            ui.overlay
                .show("Loading products for admin...", OverlayIcon::Spinner);
            ui.message("Loading products...", MessageKind::Info, target);
        }

        match self
            .app
            .requests
            .exchange::<ProductList>(admin::get_all_products())
            .await
        {
            Ok(envelope) => {
                let products = envelope.data.products;
                if announce && products.is_empty() {
                    ui.report(
                        MessageKind::Info,
                        "No products found.",
                        "No products found in the system.",
                        target,
                    );
                } else if announce {
                    ui.overlay.success("Products loaded.");
                    ui.notifications.clear(target);
                }
                self.products.set(products);
                Ok(())
            }
            Err(error) => {
                let failure = Failure::new(
                    target,
                    "Failed to load products for admin.",
                    "Network error loading products.",
                    "Network error loading products. Please try again.",
                )
                .rejected_overlay("Failed to load products.");
                self.app.report_failure(&error, &failure);
                Err(error)
            }
        }
    }

    pub async fn add_product(&self) -> Result<Envelope> {
        let ui = &self.app.ui;
        let target = targets::PRODUCT_FORM;
        ui.busy("Adding product...", target);

        match self
            .app
            .requests
            .exchange::<NoPayload>(admin::add_product(self.product_form.entries()))
            .await
        {
            Ok(envelope) => {
                ui.report(MessageKind::Success, &envelope.message, &envelope.message, target);
                self.product_form.reset();
                let _ = self.fetch_products(false).await;
                Ok(envelope)
            }
            Err(error) => {
                let failure = Failure::new(
                    target,
                    "Failed to add product.",
                    "Network error adding product.",
                    "Network error adding product. Please try again.",
                );
                self.app.report_failure(&error, &failure);
                Err(error)
            }
        }
    }

    pub async fn delete_product(&self, product_id: u64) -> Result<Envelope> {
        let ui = &self.app.ui;
        let target = targets::EXISTING_PRODUCTS;
        ui.busy(&format!("Deleting product ID {}...", product_id), target);

        match self
            .app
            .requests
            .exchange::<NoPayload>(admin::delete_product(product_id))
            .await
        {
            Ok(envelope) => {
                tracing::info!(product_id, "Product deleted");
                ui.report(MessageKind::Success, &envelope.message, &envelope.message, target);
                let _ = self.fetch_products(false).await;
                Ok(envelope)
            }
            Err(error) => {
                let failure = Failure::new(
                    target,
                    "Failed to delete product.",
                    "Network error deleting product.",
                    "Network error deleting product. Please try again.",
                );
                self.app.report_failure(&error, &failure);
                Err(error)
            }
        }
    }

    pub async fn load_orders(&self) -> Result<()> {
        let ui = &self.app.ui;
        let target = targets::ORDER_MANAGEMENT;
        ui.busy("Loading all orders...", target);

        match self
            .app
            .requests
            .exchange::<OrderList>(admin::get_all_orders())
            .await
        {
            Ok(envelope) => {
                let orders = envelope.data.orders;
                if orders.is_empty() {
                    ui.report(
                        MessageKind::Info,
                        "No orders found.",
                        "No orders found in the system.",
                        target,
                    );
                } else {
                    ui.overlay.success("Orders loaded.");
                    ui.notifications.clear(target);
                }
                *self.statuses.write() = orders
                    .iter()
                    .map(|order| (order.id, DisplayCell::new(order.status)))
                    .collect();
                self.orders.set(orders);
                Ok(())
            }
            Err(error) => {
                let failure = Failure::new(
                    target,
                    "Failed to load orders for admin.",
                    "Network error loading orders.",
                    "Network error loading orders. Please try again.",
                )
                .rejected_overlay("Failed to load orders.");
                self.app.report_failure(&error, &failure);
                Err(error)
            }
        }
    }

    /// The status select of one order row.
    pub fn status_cell(&self, order_id: u64) -> Option<DisplayCell<OrderStatus>> {
        self.statuses.read().get(&order_id).cloned()
    }

    pub async fn update_order_status(&self, order_id: u64, status: OrderStatus) -> Result<Envelope> {
        let cell = self
            .status_cell(order_id)
            .ok_or_else(|| AppError::State(format!("Order {} is not listed", order_id)))?;

        let ui = &self.app.ui;
        let target = targets::ORDER_MANAGEMENT;
        let requests = &self.app.requests;
        let result = optimistic::mutate(
            &cell,
            |_| status,
            |status| {
                ui.busy(
                    &format!("Updating order #{} status to {}...", order_id, status),
                    target,
                );
                requests.exchange::<NoPayload>(admin::update_order_status(order_id, status))
            },
            |_: &Envelope| None,
        )
        .await;

        match &result {
            Ok(envelope) => {
                ui.report(MessageKind::Success, &envelope.message, &envelope.message, target);
            }
            Err(error) if error.is_server_verdict() => {
                let reason = error.server_message();
                let message = format!(
                    "Failed to update status for order #{}: {}",
                    order_id,
                    reason.unwrap_or("Unknown error")
                );
                ui.report(
                    MessageKind::Error,
                    reason.unwrap_or("Failed to update status."),
                    &message,
                    target,
                );
            }
            Err(error) => {
                let failure = Failure::new(
                    target,
                    "Failed to update status.",
                    "Network error updating status.",
                    "Network error updating order status. Please try again.",
                );
                self.app.report_failure(error, &failure);
            }
        }
        result
    }

    /// Upload the selected CSV file.
    pub async fn import_products(&self) -> Result<Envelope> {
        let ui = &self.app.ui;
        let target = targets::IMPORT;
        self.import_errors.set(Vec::new());

        let Some(file) = self.import_file.get() else {
            let message = "Please select a CSV file to upload.";
            ui.message(message, MessageKind::Error, target);
            return Err(AppError::Validation(message.to_string()));
        };

        ui.message("Uploading and importing products...", MessageKind::Info, target);
        ui.overlay
            .show("Importing products...", OverlayIcon::Spinner);
        tracing::info!(file = %file.file_name, bytes = file.bytes.len(), "Importing products");

        match self
            .app
            .requests
            .exchange::<NoPayload>(admin::import_products(file))
            .await
        {
            Ok(envelope) => {
                let message = if envelope.errors.is_empty() {
                    envelope.message.clone()
                } else {
                    format!(
                        "{} Some rows had errors. See details below.",
                        envelope.message
                    )
                };
                ui.report(MessageKind::Success, "Import successful!", &message, target);
                self.import_errors.set(envelope.errors.clone());
                self.import_file.set(None);
                Ok(envelope)
            }
            Err(error) if error.is_server_verdict() => {
                let message = error.server_message().unwrap_or("Import failed.");
                ui.report(MessageKind::Error, "Import failed!", message, target);
                self.import_errors.set(error.row_errors().to_vec());
                Err(error)
            }
            Err(error) => {
                ui.report(
                    MessageKind::Error,
                    "Network error!",
                    "An unexpected error occurred during import. Please check server logs.",
                    target,
                );
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pages::testing::{app, message};
    use crate::services::api::mock::MockTransport;
    use crate::services::api::request::{MultipartField, RequestBody};
    use crate::services::api::Method;

    const TWO_ORDERS: &str = r#"{"success":true,"orders":[
        {"id":1,"status":"pending","total_amount":10},
        {"id":2,"status":"shipped","total_amount":20}
    ]}"#;

    #[tokio::test]
    async fn test_empty_product_listing() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(Method::Get, "/api/admin/get_all_products", 200, r#"{"success":true,"products":[]}"#);
        let (app, _events) = app(&mock, true);
        let page = AdminPage::new(&app);

        page.load_products().await.unwrap();

        assert_eq!(app.ui.overlay.view().message, "No products found.");
        assert_eq!(
            message(&app, targets::EXISTING_PRODUCTS).0,
            "No products found in the system."
        );
    }

    #[tokio::test]
    async fn test_rejected_listing_uses_fixed_overlay() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Get,
            "/api/admin/get_all_orders",
            403,
            r#"{"success":false,"message":"Admin access required."}"#,
        );
        let (app, _events) = app(&mock, true);
        let page = AdminPage::new(&app);

        assert!(page.load_orders().await.is_err());

        assert_eq!(app.ui.overlay.view().message, "Failed to load orders.");
        assert_eq!(message(&app, targets::ORDER_MANAGEMENT).0, "Admin access required.");
    }

    #[tokio::test]
    async fn test_add_product_is_multipart_and_resets_form() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/api/admin/add_product",
            200,
            r#"{"success":true,"message":"Product added successfully!"}"#,
        )
        .respond(Method::Get, "/api/admin/get_all_products", 200, r#"{"success":true,"products":[{"id":1,"name":"Tea"}]}"#);
        let (app, _events) = app(&mock, true);
        let page = AdminPage::new(&app);
        page.product_form.set("name", "Tea");
        page.product_form.set("price", "120");

        page.add_product().await.unwrap();

        let sent = mock.last_request_to("/api/admin/add_product").unwrap();
        assert!(matches!(sent.body, RequestBody::Multipart(_)));
        assert_eq!(page.product_form.get("name"), "");
        assert_eq!(page.products.get().len(), 1);
    }

    #[tokio::test]
    async fn test_status_change_reverts_on_rejection() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(Method::Get, "/api/admin/get_all_orders", 200, TWO_ORDERS)
            .respond(
                Method::Post,
                "/api/update_order_status",
                200,
                r#"{"success":false,"message":"Order not found."}"#,
            );
        let (app, _events) = app(&mock, true);
        let page = AdminPage::new(&app);
        page.load_orders().await.unwrap();

        assert!(page.update_order_status(1, OrderStatus::Delivered).await.is_err());

        assert_eq!(page.status_cell(1).unwrap().get(), OrderStatus::Pending);
        let sent = mock.last_request_to("/api/update_order_status").unwrap();
        assert_eq!(sent.field("order_id"), Some("1"));
        assert_eq!(sent.field("status"), Some("delivered"));
        assert_eq!(
            message(&app, targets::ORDER_MANAGEMENT).0,
            "Failed to update status for order #1: Order not found."
        );
        assert_eq!(app.ui.overlay.view().message, "Order not found.");
    }

    #[tokio::test]
    async fn test_status_change_kept_on_success() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(Method::Get, "/api/admin/get_all_orders", 200, TWO_ORDERS)
            .respond(
                Method::Post,
                "/api/update_order_status",
                200,
                r#"{"success":true,"message":"Order #2 status updated to delivered."}"#,
            );
        let (app, _events) = app(&mock, true);
        let page = AdminPage::new(&app);
        page.load_orders().await.unwrap();

        page.update_order_status(2, OrderStatus::Delivered).await.unwrap();

        assert_eq!(page.status_cell(2).unwrap().get(), OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_import_without_file() {
        let mock = Arc::new(MockTransport::new());
        let (app, _events) = app(&mock, true);
        let page = AdminPage::new(&app);

        assert!(page.import_products().await.is_err());

        assert_eq!(mock.request_count(), 0);
        assert_eq!(
            message(&app, targets::IMPORT),
            ("Please select a CSV file to upload.".to_string(), Some(MessageKind::Error))
        );
    }

    #[tokio::test]
    async fn test_import_with_row_errors() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/api/import_products",
            200,
            r#"{"success":true,"message":"Imported 2 products.","errors":["Row 4: invalid price"]}"#,
        );
        let (app, _events) = app(&mock, true);
        let page = AdminPage::new(&app);
        page.import_file
            .set(Some(FileUpload::csv("products.csv", b"name,price\nTea,1".to_vec())));

        page.import_products().await.unwrap();

        let sent = mock.last_request_to("/api/import_products").unwrap();
        match sent.body {
            RequestBody::Multipart(fields) => {
                assert!(matches!(&fields[0], MultipartField::File { name, .. } if name == "file"))
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
        assert_eq!(app.ui.overlay.view().message, "Import successful!");
        assert_eq!(
            message(&app, targets::IMPORT),
            (
                "Imported 2 products. Some rows had errors. See details below.".to_string(),
                Some(MessageKind::Success)
            )
        );
        assert_eq!(page.import_errors.get(), vec!["Row 4: invalid price".to_string()]);
        assert!(page.import_file.get().is_none());
    }

    #[tokio::test]
    async fn test_import_rejected_lists_errors() {
        let mock = Arc::new(MockTransport::new());
        mock.respond(
            Method::Post,
            "/api/import_products",
            200,
            r#"{"success":false,"message":"No products imported.","errors":["Row 2: missing name"]}"#,
        );
        let (app, _events) = app(&mock, true);
        let page = AdminPage::new(&app);
        page.import_file
            .set(Some(FileUpload::csv("products.csv", Vec::new())));

        assert!(page.import_products().await.is_err());

        assert_eq!(app.ui.overlay.view().message, "Import failed!");
        assert_eq!(page.import_errors.get().len(), 1);
        assert!(page.import_file.get().is_some());
    }
}
