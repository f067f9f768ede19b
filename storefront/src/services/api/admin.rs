//! # Admin Endpoints (relational store)

use super::request::{ApiRequest, FileUpload, MultipartField};
use shared::OrderStatus;

pub fn get_all_products() -> ApiRequest {
    ApiRequest::get("/api/admin/get_all_products")
}

/// Sent as multipart so an image field can join the text fields later.
pub fn add_product(fields: Vec<(String, String)>) -> ApiRequest {
    let fields = fields
        .into_iter()
        .map(|(name, value)| MultipartField::Text { name, value })
        .collect();
    ApiRequest::post("/api/admin/add_product").with_multipart(fields)
}

pub fn delete_product(product_id: u64) -> ApiRequest {
    ApiRequest::delete(format!("/api/admin/delete_product/{}", product_id))
}

pub fn get_all_orders() -> ApiRequest {
    ApiRequest::get("/api/admin/get_all_orders")
}

pub fn update_order_status(order_id: u64, status: OrderStatus) -> ApiRequest {
    ApiRequest::post("/api/update_order_status").with_form([
        ("order_id", order_id.to_string()),
        ("status", status.as_str().to_string()),
    ])
}

pub fn import_products(file: FileUpload) -> ApiRequest {
    ApiRequest::post("/api/import_products").with_multipart(vec![MultipartField::File {
        name: "file".to_string(),
        file,
    }])
}
