//! # Spreadsheet Admin Endpoints
//!
//! The spreadsheet-backed catalog. Its product listing doubles as the public
//! product feed and accepts a `query` filter.

use super::request::ApiRequest;
use shared::OrderStatus;

const PRODUCTS: &str = "/api/admin/sheets/products";
const ORDERS: &str = "/api/admin/sheets/orders";

pub fn list_products(query: &str) -> ApiRequest {
    ApiRequest::get(PRODUCTS).with_query("query", query)
}

pub fn add_product(fields: Vec<(String, String)>) -> ApiRequest {
    ApiRequest::post(PRODUCTS).with_form(fields)
}

pub fn update_product(product_id: u64, fields: Vec<(String, String)>) -> ApiRequest {
    ApiRequest::put(format!("{}/{}", PRODUCTS, product_id)).with_form(fields)
}

pub fn delete_product(product_id: u64) -> ApiRequest {
    ApiRequest::delete(format!("{}/{}", PRODUCTS, product_id))
}

pub fn list_orders() -> ApiRequest {
    ApiRequest::get(ORDERS)
}

pub fn update_order_status(order_id: u64, status: OrderStatus) -> ApiRequest {
    ApiRequest::put(format!("{}/{}/status", ORDERS, order_id))
        .with_form([("status", status.as_str())])
}
