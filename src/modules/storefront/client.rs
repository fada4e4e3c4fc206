//! Typed fetch helpers for the storefront.
//!
//! Every call bypasses HTTP caches and hands failures straight back to the
//! caller; there is no retry or fallback here.

use reqwest::header::{CACHE_CONTROL, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use super::query::ProductQuery;
use crate::config::Config;
use crate::domain::{Billboard, CategoryWithBillboard, Color, ProductDetails, Size};
use crate::modules::ClientError;

/// Client bound to one store's API root, e.g. `http://host/api/{storeId}`
#[derive(Clone, Debug)]
pub struct StorefrontClient {
    http: reqwest::Client,
    api_url: String,
}

impl StorefrontClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client for the configured `STOREFRONT_API_URL`, if any
    pub fn from_config(config: &Config) -> Option<Self> {
        config.storefront_api_url.as_deref().map(Self::new)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// `{api_url}/{segments...}`, each segment percent-encoded
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.api_url)?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base URL", self.api_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        tracing::debug!("GET {}", url);

        let res = self
            .http
            .get(url.clone())
            .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(ClientError::Status {
                status: res.status().as_u16(),
                url: url.to_string(),
            });
        }

        Ok(res.json::<T>().await?)
    }

    pub async fn get_products(&self, query: &ProductQuery) -> Result<Vec<ProductDetails>, ClientError> {
        let url = query.to_url(&self.api_url)?;
        self.fetch(url).await
    }

    pub async fn get_product(&self, id: &str) -> Result<ProductDetails, ClientError> {
        self.fetch(self.url(&["products", id])?).await
    }

    pub async fn get_categories(&self) -> Result<Vec<CategoryWithBillboard>, ClientError> {
        self.fetch(self.url(&["categories"])?).await
    }

    pub async fn get_category(&self, id: &str) -> Result<CategoryWithBillboard, ClientError> {
        self.fetch(self.url(&["categories", id])?).await
    }

    pub async fn get_colors(&self) -> Result<Vec<Color>, ClientError> {
        self.fetch(self.url(&["colors"])?).await
    }

    pub async fn get_sizes(&self) -> Result<Vec<Size>, ClientError> {
        self.fetch(self.url(&["sizes"])?).await
    }

    pub async fn get_billboard(&self, id: &str) -> Result<Billboard, ClientError> {
        self.fetch(self.url(&["billboards", id])?).await
    }
}
