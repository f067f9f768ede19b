//! # Products Page
//!
//! The searchable product grid. Each card shows either an "Add to Cart"
//! button or quantity controls, depending on the session and on how many of
//! the product are already in the cart.

use super::targets;
use crate::app::optimistic::{self, QuantityChange};
use crate::app::{App, Failure};
use crate::core::error::{AppError, Result};
use crate::services::api::{cart, sheets};
use crate::ui::{DisplayCell, MessageKind, OverlayIcon};
use parking_lot::RwLock;
use shared::{CartItems, Envelope, Product, ProductList, QuantityUpdate};
use std::collections::HashMap;
use std::sync::Arc;

const ADD_FAILED: &str = "Could not add product to cart.";
const OUT_OF_STOCK: &str = "This product is out of stock!";

/// What a product card offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardControls {
    AddToCart,
    Quantity(u32),
}

pub struct ProductsPage {
    app: App,
    pub products: DisplayCell<Vec<Product>>,
    /// Replaces the grid when there is nothing to list.
    pub grid_notice: DisplayCell<Option<String>>,
    quantities: Arc<RwLock<HashMap<u64, DisplayCell<u32>>>>,
}

impl ProductsPage {
    pub fn new(app: &App) -> Self {
        app.ui.notifications.register(targets::PRODUCTS);
        Self {
            app: app.clone(),
            products: DisplayCell::new(Vec::new()),
            grid_notice: DisplayCell::new(None),
            quantities: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Load the grid, filtered by `query` (empty for everything).
    pub async fn render(&self, query: &str) -> Result<()> {
        self.grid_notice.set(Some("Loading products...".to_string()));

        let envelope = match self
            .app
            .requests
            .exchange::<ProductList>(sheets::list_products(query.trim()))
            .await
        {
            Ok(envelope) => envelope,
            Err(error) => {
                let notice = if error.is_server_verdict() {
                    error.server_message().unwrap_or("Failed to load products.")
                } else {
                    "An error occurred while loading products."
                };
                self.grid_notice.set(Some(notice.to_string()));
                return Err(error);
            }
        };

        let products = envelope.data.products;
        if products.is_empty() {
            let notice = Some(envelope.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| "No products found.".to_string());
            self.grid_notice.set(Some(notice));
        } else {
            self.grid_notice.set(None);
        }

        *self.quantities.write() = products
            .iter()
            .map(|product| (product.id, DisplayCell::new(0)))
            .collect();
        self.products.set(products);
        tracing::info!(query, count = self.products.get().len(), "Products rendered");

        self.load_product_states().await;
        Ok(())
    }

    /// Set every card's quantity from the cart. Logged out or failed reads
    /// leave every card at zero.
    pub async fn load_product_states(&self) {
        let cart = if self.app.session.is_logged_in() {
            match self
                .app
                .requests
                .exchange::<CartItems>(cart::get_cart_items())
                .await
            {
                Ok(envelope) => envelope.data,
                Err(e) => {
                    tracing::warn!(error = %e, "Cart unavailable for product states");
                    CartItems::default()
                }
            }
        } else {
            CartItems::default()
        };

        for (product_id, cell) in self.quantities.read().iter() {
            cell.set(cart.quantity_of(*product_id));
        }
    }

    /// The quantity cell of a rendered card.
    pub fn quantity_cell(&self, product_id: u64) -> Option<DisplayCell<u32>> {
        self.quantities.read().get(&product_id).cloned()
    }

    pub fn card_controls(&self, product_id: u64) -> Option<CardControls> {
        let quantity = self.quantity_cell(product_id)?.get();
        if !self.app.session.is_logged_in() || quantity == 0 {
            Some(CardControls::AddToCart)
        } else {
            Some(CardControls::Quantity(quantity))
        }
    }

    pub async fn add_to_cart(&self, product_id: u64) -> Result<Envelope<QuantityUpdate>> {
        self.app
            .require_login("Please log in to add items to your cart.")?;

        let product = self
            .products
            .get()
            .into_iter()
            .find(|product| product.id == product_id)
            .ok_or_else(|| AppError::State(format!("Product {} is not listed", product_id)))?;

        if !product.in_stock() {
            self.app
                .ui
                .message(OUT_OF_STOCK, MessageKind::Error, targets::PRODUCTS);
            return Err(AppError::Validation(OUT_OF_STOCK.to_string()));
        }

        let ui = &self.app.ui;
        ui.overlay.show(
            &format!("Adding {} to cart...", product.name),
            OverlayIcon::Spinner,
        );

        match self
            .app
            .requests
            .exchange::<QuantityUpdate>(cart::add_to_cart(product_id, 1))
            .await
        {
            Ok(envelope) => {
                ui.report(
                    MessageKind::Success,
                    &envelope.message,
                    &envelope.message,
                    targets::PRODUCTS,
                );
                self.app.refresh_cart_count().await;
                if let Some(cell) = self.quantity_cell(product_id) {
                    cell.set(envelope.data.new_quantity.unwrap_or(1));
                }
                Ok(envelope)
            }
            Err(error) => {
                let failure = Failure::new(
                    targets::PRODUCTS,
                    ADD_FAILED,
                    "Network error while adding to cart.",
                    "Network error while adding to cart. Please check your connection.",
                )
                .prefixed("Error: ");
                self.app.report_failure(&error, &failure);
                Err(error)
            }
        }
    }

    /// A card's `+`/`-` control, applied optimistically.
    pub async fn change_quantity(
        &self,
        product_id: u64,
        change: QuantityChange,
    ) -> Result<Envelope<QuantityUpdate>> {
        self.app
            .require_login("Please log in to update cart quantity.")?;

        let cell = self
            .quantity_cell(product_id)
            .ok_or_else(|| AppError::State(format!("Product {} is not listed", product_id)))?;

        let ui = &self.app.ui;
        let requests = &self.app.requests;
        let result = optimistic::mutate(
            &cell,
            |quantity| change.apply(*quantity),
            |_| {
                ui.overlay.show("Updating cart...", OverlayIcon::Spinner);
                requests.exchange::<QuantityUpdate>(cart::update_cart_quantity(product_id, change))
            },
            |envelope: &Envelope<QuantityUpdate>| envelope.data.new_quantity,
        )
        .await;

        match &result {
            Ok(envelope) => {
                ui.report(
                    MessageKind::Success,
                    &envelope.message,
                    &envelope.message,
                    targets::PRODUCTS,
                );
                self.app.refresh_cart_count().await;
            }
            Err(error) => {
                let failure = Failure::new(
                    targets::PRODUCTS,
                    "Failed to update quantity.",
                    "Network error updating quantity.",
                    "Network error updating quantity.",
                );
                self.app.report_failure(error, &failure);
            }
        }
        result
    }
}
