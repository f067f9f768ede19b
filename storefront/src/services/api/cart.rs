//! # Cart Endpoints

use super::request::ApiRequest;
use crate::app::optimistic::QuantityChange;

pub fn get_cart_items() -> ApiRequest {
    ApiRequest::get("/api/get_cart_items")
}

pub fn get_cart_count() -> ApiRequest {
    ApiRequest::get("/api/get_cart_count")
}

pub fn add_to_cart(product_id: u64, quantity: u32) -> ApiRequest {
    ApiRequest::post("/api/add_to_cart").with_form([
        ("product_id", product_id.to_string()),
        ("quantity", quantity.to_string()),
    ])
}

pub fn update_cart_quantity(product_id: u64, change: QuantityChange) -> ApiRequest {
    ApiRequest::post("/api/update_cart_quantity").with_form([
        ("product_id", product_id.to_string()),
        ("change_type", change.as_str().to_string()),
    ])
}

pub fn remove_from_cart(product_id: u64) -> ApiRequest {
    ApiRequest::post("/api/remove_from_cart")
        .with_form([("product_id", product_id.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::request::Method;

    #[test]
    fn test_quantity_update_form() {
        let request = update_cart_quantity(12, QuantityChange::Decrease);
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/api/update_cart_quantity");
        assert_eq!(request.field("product_id"), Some("12"));
        assert_eq!(request.field("change_type"), Some("decrease"));
    }

    #[test]
    fn test_add_to_cart_sends_single_unit() {
        let request = add_to_cart(4, 1);
        assert_eq!(request.field("quantity"), Some("1"));
    }
}
