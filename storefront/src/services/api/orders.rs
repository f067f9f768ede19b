//! # Order Endpoints

use super::request::ApiRequest;
use crate::app::payment::PaymentMethod;

pub fn place_order(method: PaymentMethod) -> ApiRequest {
    ApiRequest::post("/api/place_order").with_form([("payment_method", method.as_str())])
}

pub fn get_order_history() -> ApiRequest {
    ApiRequest::get("/api/get_order_history")
}

pub fn get_order_details(order_id: u64) -> ApiRequest {
    ApiRequest::get(format!("/api/get_order_details/{}", order_id))
}
