//! # API Client
//!
//! Main HTTP client for backend API communication.

use super::request::{ApiRequest, Method, MultipartField, RawResponse, RequestBody};
use crate::config::StorefrontConfig;
use crate::core::service::ApiTransport;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

/// HTTP client for the storefront backend.
///
/// Keeps a cookie store so the server session set by `/api/login` rides
/// along on every later request, and a connection pool shared by all calls.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `config.api_url`.
    ///
    /// No timeout is applied unless `config.request_timeout` is set.
    pub fn new(config: &StorefrontConfig) -> Self {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            Client::new()
        });

        Self {
            client,
            base_url: config.api_url.clone(),
        }
    }

    /// Get the base URL for API requests.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn multipart_form(fields: Vec<MultipartField>) -> Result<Form, String> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            MultipartField::Text { name, value } => form.text(name, value),
            MultipartField::File { name, file } => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(|e| format!("Invalid content type: {}", e))?;
                form.part(name, part)
            }
        };
    }
    Ok(form)
}

#[async_trait::async_trait]
impl ApiTransport for ApiClient {
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, String> {
        let start = std::time::Instant::now();

        let mut builder = self
            .client
            .request(reqwest_method(request.method), self.url(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Multipart(fields) => builder.multipart(multipart_form(fields)?),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::error!(error = %e, "Network error");
            format!("Network error: {}", e)
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            tracing::error!(status, error = %e, "Failed to read response body");
            format!("Failed to read response: {}", e)
        })?;

        tracing::debug!(
            status,
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Response received"
        );
        Ok(RawResponse { status, body })
    }
}
