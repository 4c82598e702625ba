use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// What one check observes from the server: the status line, the raw body,
/// and the body parsed as JSON when it parses at all.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub text: String,
    pub json: Option<Value>,
}

impl ApiResponse {
    /// Body as JSON, failing with the raw text when the server did not send JSON
    pub fn require_json(&self) -> Result<&Value> {
        self.json
            .as_ref()
            .with_context(|| format!("response body is not JSON: {}", self.text))
    }
}

/// Thin client over reqwest for the products API. Owns the resolved
/// base/api URLs so checks only pass relative pieces.
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("merchant-tester/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        let base_url = base_url.trim_end_matches('/').to_string();
        let api_url = format!("{}/api", base_url);

        Ok(Self {
            client,
            base_url,
            api_url,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// GET the API root endpoint
    pub async fn get_root(&self) -> Result<ApiResponse> {
        self.execute(self.client.get(&self.api_url)).await
    }

    /// GET /api/products
    pub async fn get_products(&self) -> Result<ApiResponse> {
        let url = format!("{}/products", self.api_url);
        self.execute(self.client.get(url)).await
    }

    /// GET an arbitrary path relative to the base URL (invalid-route probing)
    pub async fn get_path(&self, path: &str) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, path);
        self.execute(self.client.get(url)).await
    }

    /// POST /api/products with a JSON payload
    pub async fn create_product(&self, body: &Value) -> Result<ApiResponse> {
        let url = format!("{}/products", self.api_url);
        self.execute(self.client.post(url).json(body)).await
    }

    /// PUT /api/products/{id} with a JSON payload
    pub async fn update_product(&self, id: &str, body: &Value) -> Result<ApiResponse> {
        let url = format!("{}/products/{}", self.api_url, id);
        self.execute(self.client.put(url).json(body)).await
    }

    /// DELETE /api/products/{id}
    pub async fn delete_product(&self, id: &str) -> Result<ApiResponse> {
        let url = format!("{}/products/{}", self.api_url, id);
        self.execute(self.client.delete(url)).await
    }

    /// POST /api/products with a raw body and a JSON content-type header.
    /// Used to probe how the server handles bodies that are not JSON.
    pub async fn create_product_raw(&self, body: &str) -> Result<ApiResponse> {
        let url = format!("{}/products", self.api_url);
        let req = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body.to_string());
        self.execute(req).await
    }

    async fn execute(&self, req: reqwest::RequestBuilder) -> Result<ApiResponse> {
        let response = req.send().await.context("request failed")?;
        let status = response.status();
        let text = response.text().await.context("failed to read body")?;
        let json = serde_json::from_str(&text).ok();

        log::debug!("response {}: {}", status, text);

        Ok(ApiResponse { status, text, json })
    }
}
