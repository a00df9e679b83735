//! reqwest implementation of the content backend

use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::api::{ApiError, ApiRequest};
use crate::config::Config;
use crate::models::{Id, Resource};

/// Anything able to execute an [`ApiRequest`]
///
/// Successful responses are returned as raw JSON; an empty body (e.g. after
/// `DELETE`) is returned as `Value::Null`.
#[async_trait]
pub trait ContentBackend: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<Value, ApiError>;
}

/// HTTP client for the content backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()?;
        Ok(Self {
            client,
            base: normalize_base(&config.api_url)?,
        })
    }

    /// Client with default settings against `base_url`
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let config = Config {
            api_url: base_url.to_string(),
            ..Config::default()
        };
        Self::new(&config)
    }

    fn url(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let mut url = self.base.join(&request.path())?;
        if !request.query().is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in request.query() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Fetch and decode a whole collection
    pub async fn list<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, ApiError> {
        let request = ApiRequest::list(resource);
        let value = self.execute(&request).await?;
        decode(&request, value)
    }

    /// Fetch and decode a single entity
    pub async fn get<T: DeserializeOwned>(
        &self,
        resource: Resource,
        id: Id,
    ) -> Result<T, ApiError> {
        let request = ApiRequest::get(resource, id);
        let value = self.execute(&request).await?;
        decode(&request, value)
    }

    /// Fetch a collection filtered by one query parameter
    pub async fn list_filtered<T: DeserializeOwned>(
        &self,
        resource: Resource,
        key: &str,
        value: Id,
    ) -> Result<Vec<T>, ApiError> {
        let request = ApiRequest::list_filtered(resource, key, value);
        let value = self.execute(&request).await?;
        decode(&request, value)
    }

    async fn handle(path: String, resp: Response) -> Result<Value, ApiError> {
        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            warn!("Backend returned {} for {}", status, path);
            return Err(ApiError::Status {
                status: status.as_u16(),
                path,
                body: text,
            });
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|source| ApiError::Decode { path, source })
    }
}

#[async_trait]
impl ContentBackend for ApiClient {
    async fn execute(&self, request: &ApiRequest) -> Result<Value, ApiError> {
        let url = self.url(request)?;
        let method = match request {
            ApiRequest::List { .. } | ApiRequest::Get { .. } => Method::GET,
            ApiRequest::Create { .. } => Method::POST,
            ApiRequest::Update { .. } => Method::PUT,
            ApiRequest::Delete { .. } => Method::DELETE,
        };
        debug!("{}", request.describe());

        let mut req = self.client.request(method, url);
        if let Some(body) = request.body() {
            req = req.json(body);
        }

        let resp = req.send().await?;
        Self::handle(request.describe(), resp).await
    }
}

/// Decode a raw response into a typed value
pub fn decode<T: DeserializeOwned>(request: &ApiRequest, value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        path: request.describe(),
        source,
    })
}

/// Ensure the base URL ends with a slash so relative joins keep its path
fn normalize_base(api_url: &str) -> Result<Url, ApiError> {
    let mut base = Url::parse(api_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_keeps_prefix() {
        let client = ApiClient::with_base_url("http://localhost:8000/backend").unwrap();
        let url = client.url(&ApiRequest::list(Resource::Tags)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/backend/api/content/tags/");
    }

    #[test]
    fn test_query_is_appended() {
        let client = ApiClient::with_base_url("http://localhost:8000").unwrap();
        let url = client
            .url(&ApiRequest::list_filtered(Resource::Chapters, "topic", 3))
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/learning/chapters/?topic=3");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            ApiClient::with_base_url("::nope::"),
            Err(ApiError::Url(_))
        ));
    }
}
