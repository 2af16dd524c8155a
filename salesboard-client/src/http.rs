//! HTTP client for the record gateway
//!
//! The gateway forwards table reads verbatim to the hosted backend and
//! proxies the auth endpoints. Responses are raw JSON arrays for tables
//! and token/user payloads for auth.

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::{AuthSession, LoginRequest, RecordQuery, RefreshRequest, UserInfo};

/// Error body the gateway returns on failures. Table routes add a
/// `message` with the underlying cause; auth routes send `error` only.
#[derive(Debug, Default, serde::Deserialize)]
struct GatewayError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// The gateway's marker for a missing backend location or credential set.
const CONFIG_ERROR: &str = "Server configuration error";

/// HTTP client for making network requests to the record gateway
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let mut request = self.client.get(&url);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let mut request = self.client.post(&url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let mut request = self.client.post(&url);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Fetch one page of table rows
    pub async fn fetch_rows<T: DeserializeOwned>(&self, query: &RecordQuery) -> ClientResult<Vec<T>> {
        let url = format!("{}/{}", self.base_url, query.table_name());
        let mut request = self.client.get(&url).query(&query.to_query_pairs());

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        tracing::debug!(table = query.table_name(), "requesting record page");
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let body: GatewayError = serde_json::from_str(&text).unwrap_or_default();
            if body.error.as_deref() == Some(CONFIG_ERROR) {
                return Err(ClientError::Config(body.message.unwrap_or(text)));
            }
            let message = body.error.or(body.message).unwrap_or(text);
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(message)),
                _ => Err(ClientError::Fetch { status, message }),
            };
        }

        // Read the body first so a malformed payload surfaces as a parse
        // error instead of a transport error.
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(Into::into)
    }

    // ========== Auth API ==========

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthSession> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        self.post("auth/v1/login", &request).await
    }

    /// Exchange a refresh token for a new session
    pub async fn refresh(&self, refresh_token: &str) -> ClientResult<AuthSession> {
        let request = RefreshRequest {
            refresh_token: refresh_token.to_string(),
        };

        self.post("auth/v1/token?grant_type=refresh_token", &request).await
    }

    /// Get the signed-in user behind the current token. A 401/403 means
    /// the token is stale, not that the call failed: the token is dropped
    /// and `None` comes back.
    pub async fn current_user(&mut self) -> ClientResult<Option<UserInfo>> {
        match self.get::<UserInfo>("auth/v1/user").await {
            Ok(user) => Ok(Some(user)),
            Err(err) if err.is_auth() => {
                self.token = None;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Logout and drop the local token
    pub async fn logout(&mut self) -> ClientResult<()> {
        self.post_empty::<serde_json::Value>("auth/v1/logout").await?;
        self.token = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_config_error_body_maps_to_config_variant() {
        let resp = response(
            500,
            r#"{"error":"Server configuration error","message":"Missing SUPABASE_URL or SUPABASE_ANON_KEY"}"#,
        );
        let err = HttpClient::handle_response::<serde_json::Value>(resp)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(msg) if msg.contains("SUPABASE_URL")));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_error() {
        let resp = response(401, r#"{"error":"Invalid token"}"#);
        let err = HttpClient::handle_response::<serde_json::Value>(resp)
            .await
            .unwrap_err();
        assert!(err.is_auth());
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[tokio::test]
    async fn test_other_statuses_keep_gateway_message() {
        let resp = response(404, r#"{"error":"relation does not exist"}"#);
        let err = HttpClient::handle_response::<serde_json::Value>(resp)
            .await
            .unwrap_err();
        match err {
            ClientError::Fetch { status, message } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(message, "relation does not exist");
            }
            other => panic!("expected fetch error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_parse_error() {
        let resp = response(200, "not json");
        let err = HttpClient::handle_response::<Vec<serde_json::Value>>(resp)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }
}
