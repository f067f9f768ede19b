//! # Payment Page
//!
//! Method selection, the card + OTP confirmation and order placement.
//! Cash on delivery and UPI place the order directly; card payments go
//! through [`OtpFlow`] first and the order is placed once per matched code.

use super::checkout::OrderSummaryView;
use super::targets;
use crate::app::payment::{OtpCheck, OtpFlow, OtpGenerator, OtpState, PaymentMethod, RandomOtp};
use crate::app::{App, Failure};
use crate::core::error::{AppError, Result};
use crate::services::api::orders;
use crate::ui::{BoundForm, DisplayCell, MessageKind, OverlayIcon};
use crate::utils::validation::{
    validate_card_name, validate_card_number, validate_cvv, validate_expiry_format,
    validate_expiry_not_past,
};
use chrono::NaiveDate;
use parking_lot::Mutex;
use shared::{Envelope, PlacedOrder};
use std::sync::Arc;
use std::time::Duration;

const ORDER_REDIRECT_DELAY: Duration = Duration::from_millis(1500);
const CARD_FIELDS: &[&str] = &["cardName", "cardNumber", "expiryDate", "cvv"];

pub struct PaymentPage {
    app: App,
    otp: Arc<Mutex<OtpFlow>>,
    pub summary: OrderSummaryView,
    pub card_form: BoundForm,
    pub otp_input: DisplayCell<String>,
    pub method: DisplayCell<Option<PaymentMethod>>,
    /// The OTP entry section, shown once a code has been sent.
    pub otp_visible: DisplayCell<bool>,
}

impl PaymentPage {
    pub fn new(app: &App) -> Self {
        Self::with_generator(app, Box::new(RandomOtp))
    }

    pub fn with_generator(app: &App, generator: Box<dyn OtpGenerator>) -> Self {
        app.ui.notifications.register(targets::PAYMENT);
        app.ui.notifications.register(targets::OTP);
        Self {
            app: app.clone(),
            otp: Arc::new(Mutex::new(OtpFlow::new(generator))),
            summary: OrderSummaryView::default(),
            card_form: BoundForm::new(CARD_FIELDS),
            otp_input: DisplayCell::new(String::new()),
            method: DisplayCell::new(None),
            otp_visible: DisplayCell::new(false),
        }
    }

    pub async fn open(&self) {
        if let Err(e) = self.summary.load(&self.app, targets::PAYMENT).await {
            tracing::warn!(error = %e, "Payment summary failed");
        }
    }

    pub fn otp_state(&self) -> OtpState {
        self.otp.lock().state()
    }

    /// The code awaiting entry. Shown by the simulated SMS panel.
    pub fn otp_code(&self) -> Option<String> {
        self.otp.lock().code().map(str::to_string)
    }

    /// Switching method always starts the card confirmation over.
    pub fn select_method(&self, method: PaymentMethod) {
        self.otp.lock().reset();
        self.otp_input.set(String::new());
        self.otp_visible.set(false);
        self.card_form.set_read_only(false);
        self.method.set(Some(method));

        let ui = &self.app.ui;
        ui.notifications.clear(targets::OTP);
        match method {
            PaymentMethod::Cod => ui.message(
                "Cash on Delivery selected. Review your order and place it.",
                MessageKind::Info,
                targets::PAYMENT,
            ),
            _ => ui.notifications.clear(targets::PAYMENT),
        }
    }

    pub fn submit_card(&self) -> Result<()> {
        self.submit_card_on(chrono::Local::now().date_naive())
    }

    /// Validate the card form against `today` and send a code.
    ///
    /// Only accepted while collecting card details; once a code is out, a new
    /// one comes from [`PaymentPage::resend_otp`] or a method switch.
    pub fn submit_card_on(&self, today: NaiveDate) -> Result<()> {
        self.app
            .require_login("Please log in to proceed with payment.")?;

        let state = self.otp_state();
        if state != OtpState::CollectingCard {
            tracing::debug!(?state, "Card resubmission ignored");
            return Err(AppError::State(format!("Card details already confirmed ({:?})", state)));
        }

        let form = &self.card_form;
        let expiry = form.trimmed("expiryDate");
        let checked = validate_card_name(&form.get("cardName"))
            .into_result()
            .and_then(|_| validate_card_number(&form.get("cardNumber")).into_result())
            .and_then(|_| validate_expiry_format(&expiry).into_result())
            .and_then(|_| validate_cvv(&form.get("cvv")).into_result())
            .and_then(|_| validate_expiry_not_past(&expiry, today).into_result());
        if let Err(message) = checked {
            self.app
                .ui
                .message(&message, MessageKind::Error, targets::PAYMENT);
            return Err(AppError::Validation(message));
        }

        if self.otp.lock().send_code().is_none() {
            return Err(AppError::State("Card details already confirmed".to_string()));
        }
        let ui = &self.app.ui;
        ui.busy("Card details confirmed. Sending OTP...", targets::PAYMENT);
        tracing::info!("Payment OTP issued");
        form.set_read_only(true);
        self.otp_visible.set(true);
        ui.overlay.success("OTP sent!");
        ui.message(
            "An OTP has been sent to your registered mobile number. Please enter it below.",
            MessageKind::Info,
            targets::OTP,
        );
        Ok(())
    }

    pub fn resend_otp(&self) -> Result<()> {
        self.app.require_login("Please log in to resend OTP.")?;
        if self.otp.lock().resend().is_none() {
            return Err(AppError::State("No OTP is awaiting entry".to_string()));
        }
        self.otp_input.set(String::new());
        self.app.ui.message(
            "New OTP has been sent. Please check your mobile.",
            MessageKind::Info,
            targets::OTP,
        );
        Ok(())
    }

    /// Check the entered code and, on a match, place the card order.
    pub async fn verify_otp(&self) -> Result<Envelope<PlacedOrder>> {
        self.app
            .require_login("Please log in to verify OTP and place order.")?;

        let ui = &self.app.ui;
        let entered = self.otp_input.get();
        let check = self.otp.lock().check(&entered);
        match check {
            OtpCheck::Matched => {}
            OtpCheck::Mismatch => {
                let message = "Invalid OTP. Please try again.";
                ui.message(message, MessageKind::Error, targets::OTP);
                self.otp_input.set(String::new());
                return Err(AppError::Validation(message.to_string()));
            }
            OtpCheck::NotAwaiting => {
                tracing::debug!(state = ?self.otp_state(), "OTP entry ignored");
                return Err(AppError::State("No OTP is awaiting entry".to_string()));
            }
        }

        ui.overlay
            .show("OTP verified successfully. Placing your order...", OverlayIcon::Spinner);
        ui.message(
            "OTP verified successfully. Placing your order...",
            MessageKind::Success,
            targets::OTP,
        );
        let failure = Failure::new(
            targets::PAYMENT,
            "Failed to place order after OTP verification.",
            "Network error!",
            "Network error placing order. Please try again.",
        )
        .rejected_overlay("Order failed!");
        let result = self.place(PaymentMethod::Card, targets::PAYMENT, &failure).await;
        self.otp.lock().record_placement(result.is_ok());
        result
    }

    /// Place a cash on delivery or UPI order.
    pub async fn place_order(&self) -> Result<Envelope<PlacedOrder>> {
        self.app
            .require_login("Please log in to place your order.")?;

        let method = match self.method.get() {
            Some(method) if method != PaymentMethod::Card => method,
            _ => {
                let message = "Please confirm card details and verify OTP to place order.";
                self.app
                    .ui
                    .message(message, MessageKind::Error, targets::PAYMENT);
                return Err(AppError::Validation(message.to_string()));
            }
        };

        self.app.ui.busy("Placing your order...", targets::PAYMENT);
        let failure = Failure::new(
            targets::PAYMENT,
            "Failed to place order.",
            "Network error!",
            "Network error placing order. Please try again.",
        )
        .rejected_overlay("Order failed!");
        self.place(method, targets::PAYMENT, &failure).await
    }

    async fn place(
        &self,
        method: PaymentMethod,
        target: &str,
        failure: &Failure<'_>,
    ) -> Result<Envelope<PlacedOrder>> {
        match self
            .app
            .requests
            .exchange::<PlacedOrder>(orders::place_order(method))
            .await
        {
            Ok(envelope) => {
                tracing::info!(method = %method, order_id = ?envelope.data.order_id, "Order placed");
                let message = if envelope.message.is_empty() {
                    "Your order has been placed successfully!"
                } else {
                    envelope.message.as_str()
                };
                self.app
                    .ui
                    .report(MessageKind::Success, "Order placed successfully!", message, target);
                self.app.refresh_cart_count().await;
                if let Some(redirect) = &envelope.redirect {
                    self.app
                        .navigator
                        .navigate_after(redirect, ORDER_REDIRECT_DELAY);
                }
                Ok(envelope)
            }
            Err(error) => {
                tracing::warn!(method = %method, error = %error, "Order placement failed");
                self.app.report_failure(&error, failure);
                Err(error)
            }
        }
    }
}
