use crate::error::{Result, StorefrontError};
use crate::i18n::Locale;
use crate::models::{CreateOrderRequest, OrderResponse, Product};
use reqwest::header::ACCEPT_LANGUAGE;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Client for the product/order backend.
///
/// Every call passes the resolved locale as `Accept-Language`; the backend
/// returns names and descriptions already localized. No retries, no caching.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(StorefrontError::BackendUrl(base_url));
        }
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch products, optionally restricted to one category.
    pub async fn fetch_products(
        &self,
        locale: Locale,
        category: Option<&str>,
    ) -> Result<Vec<Product>> {
        self.get_json("/api/products", locale, category).await
    }

    /// Fetch best-selling products, optionally restricted to one category.
    pub async fn fetch_best_sellers(
        &self,
        locale: Locale,
        category: Option<&str>,
    ) -> Result<Vec<Product>> {
        self.get_json("/api/products/best", locale, category).await
    }

    /// Place a guest order.
    pub async fn create_order(
        &self,
        locale: Locale,
        order: &CreateOrderRequest,
    ) -> Result<OrderResponse> {
        let path = "/api/orders";
        let response = self
            .http
            .post(self.url(path))
            .header(ACCEPT_LANGUAGE, locale.code())
            .json(order)
            .send()
            .await?;

        Self::parse(path, response).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        locale: Locale,
        category: Option<&str>,
    ) -> Result<T> {
        let mut request = self
            .http
            .get(self.url(path))
            .header(ACCEPT_LANGUAGE, locale.code());
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }

        debug!(path, locale = %locale, ?category, "Fetching from backend");
        let response = request.send().await?;
        Self::parse(path, response).await
    }

    async fn parse<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(path, %status, body = %body, "Backend returned an error");
            return Err(StorefrontError::BackendFetch {
                path: path.to_string(),
                status,
            });
        }
        Ok(response.json().await?)
    }
}
