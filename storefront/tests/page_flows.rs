//! End-to-end page flows against the scripted transport.
//!
//! Each test drives one or more page controllers the way a host would and
//! asserts only on what a user could observe: message slots, the overlay,
//! the login modal, display cells and navigation events.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use storefront::app::optimistic::QuantityChange;
use storefront::app::pages::{targets, CheckoutPage, PaymentPage, ProductsPage};
use storefront::app::payment::{OtpGenerator, OtpState, PaymentMethod};
use storefront::services::api::mock::MockTransport;
use storefront::services::api::Method;
use storefront::ui::{MessageKind, MessagePhase, OverlayIcon};
use storefront::{App, AppError, AppEvent, StorefrontConfig};

const PRODUCTS: &str = r#"{"success":true,"message":"","products":[
    {"id":1,"name":"Masala Tea","price":"120.00","stock":5},
    {"id":2,"name":"Filter Coffee","price":250,"stock":3}
]}"#;

struct FixedOtp(u32);

impl OtpGenerator for FixedOtp {
    fn generate(&mut self) -> u32 {
        self.0
    }
}

fn logged_in_script(mock: &MockTransport) {
    mock.respond(
        Method::Get,
        "/api/check_login_status",
        200,
        r#"{"is_logged_in":true,"is_admin":false}"#,
    )
    .respond(Method::Get, "/api/get_cart_count", 200, r#"{"success":true,"count":2}"#)
    .respond(Method::Get, "/api/admin/sheets/products", 200, PRODUCTS)
    .respond(
        Method::Get,
        "/api/get_cart_items",
        200,
        r#"{"success":true,"items":[{"product_id":1,"price":120,"quantity":2}]}"#,
    );
}

fn message(app: &App, target: &str) -> (String, Option<MessageKind>) {
    let view = app
        .ui
        .notifications
        .view(target)
        .unwrap_or_else(|| panic!("{} is not registered", target));
    (view.text, view.kind)
}

#[tokio::test]
async fn test_guest_add_to_cart_opens_login_prompt() {
    // Arrange
    let mock = Arc::new(MockTransport::new());
    mock.respond(
        Method::Get,
        "/api/check_login_status",
        200,
        r#"{"is_logged_in":false}"#,
    )
    .respond(Method::Get, "/api/admin/sheets/products", 200, PRODUCTS);
    let (app, events) = App::new(mock.clone(), StorefrontConfig::default());
    let status = app.start().await;
    let page = ProductsPage::new(&app);
    page.render("").await.unwrap();
    let before = mock.request_count();

    // Act
    let result = page.add_to_cart(1).await;

    // Assert
    assert!(!status.is_logged_in);
    assert!(matches!(result, Err(AppError::NotAuthenticated(_))));
    assert_eq!(mock.request_count(), before);
    assert_eq!(mock.calls_to("/api/get_cart_count"), 0);
    assert_eq!(app.cart_badge.get(), 0);

    let modal = app.ui.modal.view();
    assert!(modal.visible);
    assert_eq!(modal.message, "Please log in to add items to your cart.");

    assert_eq!(events.try_recv(), Ok(AppEvent::SessionChanged(status)));
    assert_eq!(
        events.try_recv(),
        Ok(AppEvent::LoginPromptShown(
            "Please log in to add items to your cart.".to_string()
        ))
    );

    // The modal's "log in" choice closes it and leaves for the login page.
    app.confirm_login_prompt();
    assert!(!app.ui.modal.is_visible());
    assert_eq!(events.try_recv(), Ok(AppEvent::Navigate("login.html".to_string())));
}

#[tokio::test(start_paused = true)]
async fn test_out_of_stock_increase_shows_then_reverts() {
    // Arrange
    let mock = Arc::new(MockTransport::new().with_latency(Duration::from_millis(200)));
    logged_in_script(&mock);
    mock.respond(
        Method::Post,
        "/api/update_cart_quantity",
        200,
        r#"{"success":false,"message":"Out of stock"}"#,
    );
    let (app, _events) = App::new(mock.clone(), StorefrontConfig::default());
    app.start().await;
    let page = ProductsPage::new(&app);
    page.render("").await.unwrap();
    let cell = page.quantity_cell(1).unwrap();
    assert_eq!(cell.get(), 2);

    // Act
    let (result, in_flight) = tokio::join!(
        page.change_quantity(1, QuantityChange::Increase),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            (cell.get(), app.ui.overlay.view())
        }
    );

    // Assert
    assert_eq!(in_flight.0, 3);
    assert!(in_flight.1.visible);
    assert_eq!(in_flight.1.icon, Some(OverlayIcon::Spinner));

    assert!(matches!(result, Err(AppError::Rejected { .. })));
    assert_eq!(cell.get(), 2);
    assert_eq!(
        message(&app, targets::PRODUCTS),
        ("Out of stock".to_string(), Some(MessageKind::Error))
    );
    let sent = mock.last_request_to("/api/update_cart_quantity").unwrap();
    assert_eq!(sent.field("product_id"), Some("1"));
    assert_eq!(sent.field("change_type"), Some("increase"));
}

#[tokio::test]
async fn test_short_zip_never_reaches_the_server() {
    // Arrange
    let mock = Arc::new(MockTransport::new());
    logged_in_script(&mock);
    let (app, _events) = App::new(mock.clone(), StorefrontConfig::default());
    app.start().await;
    let page = CheckoutPage::new(&app);
    page.shipping_form.fill([
        ("fullName", "Asha Rao".to_string()),
        ("addressLine1", "12 MG Road".to_string()),
        ("addressLine2", "Indiranagar".to_string()),
        ("city", "Bengaluru".to_string()),
        ("state", "Karnataka".to_string()),
        ("zipCode", "123".to_string()),
        ("phone", "9876543210".to_string()),
    ]);

    // Act
    let result = page.save_shipping_info().await;

    // Assert
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(mock.calls_to("/api/save_shipping_info"), 0);
    assert_eq!(
        message(&app, targets::CHECKOUT),
        (
            "Invalid Zip Code format. Must be 5 or 6 digits.".to_string(),
            Some(MessageKind::Error)
        )
    );
    assert_eq!(page.shipping_form.get("zipCode"), "123");
}

#[tokio::test(start_paused = true)]
async fn test_card_checkout_places_one_order() {
    // Arrange
    let mock = Arc::new(MockTransport::new());
    logged_in_script(&mock);
    mock.respond(
        Method::Post,
        "/api/save_shipping_info",
        200,
        r#"{"success":true,"message":"Shipping information saved.","redirect":"payment.html"}"#,
    )
    .respond(
        Method::Post,
        "/api/place_order",
        200,
        r#"{"success":true,"message":"Order placed!","order_id":7,"redirect":"order_confirmation.html?order_id=7"}"#,
    );
    let (app, events) = App::new(mock.clone(), StorefrontConfig::default());
    app.start().await;
    assert_eq!(app.cart_badge.get(), 2);
    let _ = events.try_recv();

    let checkout = CheckoutPage::new(&app);
    checkout.shipping_form.fill([
        ("fullName", "Asha Rao".to_string()),
        ("addressLine1", "12 MG Road".to_string()),
        ("addressLine2", "Indiranagar".to_string()),
        ("city", "Bengaluru".to_string()),
        ("state", "Karnataka".to_string()),
        ("zipCode", "560038".to_string()),
        ("phone", "9876543210".to_string()),
    ]);
    checkout.save_shipping_info().await.unwrap();
    tokio::time::sleep(Duration::from_millis(1001)).await;
    assert_eq!(events.try_recv(), Ok(AppEvent::Navigate("payment.html".to_string())));

    let payment = PaymentPage::with_generator(&app, Box::new(FixedOtp(314_159)));
    payment.select_method(PaymentMethod::Card);
    payment.card_form.fill([
        ("cardName", "Asha Rao".to_string()),
        ("cardNumber", "4111111111111111".to_string()),
        ("expiryDate", "12/28".to_string()),
        ("cvv", "123".to_string()),
    ]);
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

    // Act
    payment.submit_card_on(today).unwrap();
    payment.otp_input.set("314159".to_string());
    let placed = payment.verify_otp().await;
    let again = payment.verify_otp().await;

    // Assert
    assert_eq!(placed.unwrap().data.order_id, Some(7));
    assert!(again.is_err());
    assert_eq!(mock.calls_to("/api/place_order"), 1);
    assert!(matches!(payment.otp_state(), OtpState::Verified(_)));
    assert_eq!(mock.calls_to("/api/get_cart_count"), 2);

    tokio::time::sleep(Duration::from_millis(1501)).await;
    assert_eq!(
        events.try_recv(),
        Ok(AppEvent::Navigate("order_confirmation.html?order_id=7".to_string()))
    );
}

#[tokio::test(start_paused = true)]
async fn test_failure_overlay_and_message_expire() {
    // Arrange
    let mock = Arc::new(MockTransport::new());
    logged_in_script(&mock);
    mock.fail(Method::Post, "/api/add_to_cart", "connection refused");
    let (app, _events) = App::new(mock.clone(), StorefrontConfig::default());
    app.start().await;
    let page = ProductsPage::new(&app);
    page.render("").await.unwrap();

    // Act
    let result = page.add_to_cart(2).await;

    // Assert
    assert!(matches!(result, Err(AppError::Transport(_))));
    let overlay = app.ui.overlay.view();
    assert!(overlay.visible);
    assert_eq!(overlay.icon, Some(OverlayIcon::Error));
    assert_eq!(overlay.message, "Network error while adding to cart.");
    assert_eq!(
        message(&app, targets::PRODUCTS).1,
        Some(MessageKind::Error)
    );

    tokio::time::sleep(Duration::from_millis(1501)).await;
    assert!(!app.ui.overlay.is_visible());
    assert!(app.ui.notifications.view(targets::PRODUCTS).unwrap().is_visible());

    tokio::time::sleep(Duration::from_millis(3600)).await;
    assert_eq!(
        app.ui.notifications.view(targets::PRODUCTS).unwrap().phase,
        MessagePhase::Fading
    );

    tokio::time::sleep(Duration::from_millis(301)).await;
    assert!(!app.ui.notifications.view(targets::PRODUCTS).unwrap().is_visible());
}
