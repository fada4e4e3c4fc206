use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::modules::ClientError;

/// Authenticated client for the dashboard's mutation endpoints
#[derive(Clone, Debug)]
pub struct AdminClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl AdminClient {
    /// `base_url` is the API root, e.g. `http://host/api`
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ClientError> {
        let url = self.endpoint(path);
        tracing::debug!("{} {}", method, url);

        let mut req = self.http.request(method, &url).bearer_auth(&self.token);
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await?;
        if !res.status().is_success() {
            return Err(ClientError::Status {
                status: res.status().as_u16(),
                url,
            });
        }
        Ok(res)
    }

    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ClientError> {
        let res = self.send(Method::POST, path, Some(body)).await?;
        Ok(res.json::<R>().await?)
    }

    pub async fn patch<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ClientError> {
        let res = self.send(Method::PATCH, path, Some(body)).await?;
        Ok(res.json::<R>().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.send::<()>(Method::DELETE, path, None).await?;
        Ok(())
    }
}
