use crate::ports::outbound::SessionStore;
use crate::shared::error::ApiError;
use crate::shared::Result;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// HttpApiClient talks JSON to the planning API
///
/// Shared by every `Http*` adapter. It attaches the session's bearer token,
/// maps non-success statuses and transport failures to `ApiError`, and logs
/// each failure before returning it. There is no retry: a failed call is
/// reported once and left to the caller.
pub struct HttpApiClient {
    client: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl HttpApiClient {
    /// Creates a client for `config.base_url`
    ///
    /// # Errors
    /// Returns an error if the TLS backend cannot be initialized
    pub fn new(config: ApiClientConfig, session: Arc<dyn SessionStore>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("event-planner/{}", version))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Validates and percent-encodes a dynamic path segment (id, slug, key)
    pub(crate) fn segment(value: &str, name: &str) -> Result<String> {
        if value.is_empty() {
            return Err(ApiError::validation(name, "must not be empty").into());
        }
        if value.contains('/') || value.contains('\\') {
            return Err(ApiError::validation(name, "contains path separators").into());
        }
        if value.contains("..") {
            return Err(ApiError::validation(name, "contains '..'").into());
        }
        if value.contains('#') || value.contains('?') {
            return Err(ApiError::validation(name, "contains URL-unsafe characters").into());
        }
        Ok(urlencoding::encode(value).into_owned())
    }

    /// Builds `?k=v&...` from the pairs whose value is present.
    pub(crate) fn query(pairs: &[(&str, Option<String>)]) -> String {
        let parts: Vec<String> = pairs
            .iter()
            .filter_map(|(key, value)| {
                value
                    .as_ref()
                    .map(|v| format!("{}={}", urlencoding::encode(key), urlencoding::encode(v)))
            })
            .collect();
        if parts.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.join("&"))
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<Response> {
        tracing::debug!(%method, path, "api request");
        let response = builder.send().await.map_err(|e| {
            let err = transport_error(&e);
            tracing::error!(%method, path, error = %e, "api request failed");
            err
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_status(status.as_u16(), server_message(&body));
        if status.as_u16() == 403 {
            tracing::warn!(%method, path, status = status.as_u16(), "{}", err);
        } else {
            tracing::error!(%method, path, status = status.as_u16(), "{}", err);
        }
        Err(err.into())
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await.map_err(|e| transport_error(&e))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ApiError::Decode {
                details: e.to_string(),
            }
            .into()
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let builder = self.request(Method::GET, path);
        let response = self.send(Method::GET, path, builder).await?;
        Self::decode(response).await
    }

    /// GET returning the raw body, for documents rendered by the server
    pub async fn get_text(&self, path: &str) -> Result<String> {
        let builder = self.request(Method::GET, path);
        let response = self.send(Method::GET, path, builder).await?;
        response.text().await.map_err(|e| transport_error(&e))
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(body);
        let response = self.send(Method::POST, path, builder).await?;
        Self::decode(response).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path).json(body);
        let response = self.send(Method::PUT, path, builder).await?;
        Self::decode(response).await
    }

    /// Sends a request whose response body is ignored (empty or 204 replies).
    pub async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized + Sync,
    {
        let builder = self.request(method.clone(), path);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        self.send(method, path, builder).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute::<()>(Method::DELETE, path, None).await
    }
}

fn transport_error(error: &reqwest::Error) -> anyhow::Error {
    if error.is_decode() {
        return ApiError::Decode {
            details: error.to_string(),
        }
        .into();
    }
    let message = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        "connection refused".to_string()
    } else {
        error.to_string()
    };
    ApiError::Network { message }.into()
}

/// Extracts the message from `{"error": "..."}`, `{"error": {"message": "..."}}`
/// or `{"message": "..."}` bodies.
pub(crate) fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = match value.get("error") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(error) => error
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string),
        None => value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string),
    };
    message.filter(|m| !m.trim().is_empty())
}
