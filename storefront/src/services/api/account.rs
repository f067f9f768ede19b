//! # Account Endpoints
//!
//! Saved shipping address, profile and password.

use super::request::ApiRequest;

pub fn get_shipping_info() -> ApiRequest {
    ApiRequest::get("/api/get_shipping_info")
}

pub fn save_shipping_info(fields: Vec<(String, String)>) -> ApiRequest {
    ApiRequest::post("/api/save_shipping_info").with_form(fields)
}

pub fn get_user_profile() -> ApiRequest {
    ApiRequest::get("/api/get_user_profile")
}

pub fn update_user_profile(fields: Vec<(String, String)>) -> ApiRequest {
    ApiRequest::post("/api/update_user_profile").with_form(fields)
}

pub fn change_password(fields: Vec<(String, String)>) -> ApiRequest {
    ApiRequest::post("/api/change_password").with_form(fields)
}
