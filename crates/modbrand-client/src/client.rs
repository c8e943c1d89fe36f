//! reqwest implementation of [`BrandApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use tracing::debug;

use modbrand_core::{BrandImage, PendingImage, User};

use crate::api::{ApiError, BrandApi, Upload};

/// Multipart field name the service reads the image from.
pub const IMAGE_FIELD: &str = "image-upload";

/// Name of the service's session cookie.
const SESSION_COOKIE: &str = "session_id";

/// Configuration for connecting to the branding service.
#[derive(Debug, Clone)]
pub struct BrandClientConfig {
    /// Service root URL (e.g., "<https://brand.example.org>").
    pub base_url: String,
    /// `session_id` cookie value; anonymous when `None`.
    pub session_cookie: Option<String>,
    pub timeout: Duration,
}

impl From<&modbrand_core::Config> for BrandClientConfig {
    fn from(config: &modbrand_core::Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            session_cookie: config.session_cookie.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// Branding service REST client.
#[derive(Debug, Clone)]
pub struct BrandClient {
    http: reqwest::Client,
    base_url: String,
}

impl BrandClient {
    /// Create a new client.
    pub fn new(config: &BrandClientConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::Config("base_url is empty".into()));
        }
        Url::parse(&base_url)
            .map_err(|e| ApiError::Config(format!("Invalid base_url {base_url}: {e}")))?;

        let mut headers = HeaderMap::new();
        if let Some(cookie) = config.session_cookie.as_deref().filter(|c| !c.is_empty()) {
            let value = HeaderValue::from_str(&format!("{SESSION_COOKIE}={cookie}"))
                .map_err(|_| ApiError::Config("Invalid session cookie format".into()))?;
            headers.insert(COOKIE, value);
        }

        // reqwest uses rustls-no-provider; `Err` means a provider is already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .user_agent(concat!("modbrand/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Full URL for a service path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Full URL for a service path with one query parameter.
    pub(crate) fn url_with_param(
        &self,
        path: &str,
        name: &str,
        value: &str,
    ) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.url(path))
            .map_err(|e| ApiError::Config(format!("Invalid URL for {path}: {e}")))?;
        url.query_pairs_mut().append_pair(name, value);
        Ok(url)
    }

    /// Turn a non-success response into [`ApiError::Rejected`] carrying the
    /// body text the service wrote.
    async fn check_status(resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let message = match body.trim() {
            "" => status.canonical_reason().unwrap_or("Unknown").to_string(),
            text => text.to_string(),
        };
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BrandApi for BrandClient {
    async fn session(&self) -> Result<Option<User>, ApiError> {
        let resp = self.http.get(self.url("/session")).send().await?;
        if !resp.status().is_success() {
            debug!(status = resp.status().as_u16(), "Session probe rejected");
            return Ok(None);
        }
        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let user: Option<User> =
            serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(user.filter(User::is_valid))
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let resp = self.http.post(self.url("/logout")).send().await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    async fn list_images(&self) -> Result<Vec<BrandImage>, ApiError> {
        let resp = self.http.get(self.url("/brand/list")).send().await?;
        let resp = Self::check_status(resp).await?;
        Self::decode(resp).await
    }

    async fn submit(&self, upload: &Upload) -> Result<(), ApiError> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime)?;
        let form = Form::new().part(IMAGE_FIELD, part);
        debug!(file = %upload.file_name, bytes = upload.len(), "Submitting brand image");
        let resp = self
            .http
            .post(self.url("/brand/submit"))
            .multipart(form)
            .send()
            .await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    async fn list_pending(&self) -> Result<Vec<PendingImage>, ApiError> {
        let resp = self.http.get(self.url("/brand/pending")).send().await?;
        let resp = Self::check_status(resp).await?;
        Self::decode(resp).await
    }

    async fn accept(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url_with_param("/brand/pending/accept", "id", id)?;
        let resp = self.http.post(url).send().await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url_with_param("/brand/delete", "id", id)?;
        let resp = self.http.delete(url).send().await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    async fn verify_user(&self, user_id: &str) -> Result<(), ApiError> {
        let url = self.url_with_param("/brand/verify", "user", user_id)?;
        let resp = self.http.post(url).send().await?;
        Self::check_status(resp).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<String, ApiError> {
        let resp = self.http.get(self.url("/brand")).send().await?;
        let resp = Self::check_status(resp).await?;
        Ok(resp.text().await?.trim().to_string())
    }
}
