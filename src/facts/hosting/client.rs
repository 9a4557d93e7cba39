//! GitHub GraphQL API client
//!
//! Minimal client that posts a query with variables and decodes the `data` member into
//! a caller-provided response schema.

use crate::Result;
use ohno::{IntoAppError, bail};
use reqwest::header::HeaderMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

pub(crate) const LOG_TARGET: &str = "   hosting";

pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Standard GraphQL response envelope
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Hosting API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    endpoint: String,
}

impl Client {
    /// Create a new hosting API client with an optional bearer token
    pub fn new(token: Option<&str>, endpoint: impl Into<String>) -> Result<Self> {
        use reqwest::header::{AUTHORIZATION, HeaderValue};

        let mut client_builder = reqwest::Client::builder().user_agent("reuse-score");

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("bearer {t}"))?;
            auth_val.set_sensitive(true);

            let mut headers = HeaderMap::new();
            let _ = headers.insert(AUTHORIZATION, auth_val);

            client_builder = client_builder.default_headers(headers);
        }

        Ok(Self {
            client: client_builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run a query and decode its `data` member as `T`.
    ///
    /// HTTP failures, GraphQL-level errors, and responses that don't match `T` are all errors.
    pub async fn query<T: DeserializeOwned>(&self, query: &str, variables: serde_json::Value) -> Result<T> {
        log::info!(target: LOG_TARGET, "POST {} with variables {variables}", self.endpoint);

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .into_app_err("calling the hosting API")?;

        let envelope = resp.json::<Envelope<T>>().await.into_app_err("decoding the hosting API response")?;
        into_data(envelope)
    }
}

fn into_data<T>(envelope: Envelope<T>) -> Result<T> {
    if !envelope.errors.is_empty() {
        let messages: Vec<_> = envelope.errors.into_iter().map(|e| e.message).collect();
        bail!("hosting API reported: {}", messages.join("; "));
    }

    envelope.data.into_app_err("hosting API response carried no data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        value: u32,
    }

    #[test]
    fn test_into_data_success() {
        let envelope: Envelope<Probe> = serde_json::from_str(r#"{ "data": { "value": 7 } }"#).unwrap();
        assert_eq!(into_data(envelope).unwrap().value, 7);
    }

    #[test]
    fn test_into_data_errors_win_over_data() {
        let json = r#"{
            "data": { "value": 7 },
            "errors": [{ "message": "Could not resolve to a Repository" }, { "message": "second" }]
        }"#;
        let envelope: Envelope<Probe> = serde_json::from_str(json).unwrap();

        let err = into_data(envelope).unwrap_err().to_string();
        assert!(err.contains("Could not resolve to a Repository"));
        assert!(err.contains("second"));
    }

    #[test]
    fn test_into_data_missing_data() {
        let envelope: Envelope<Probe> = serde_json::from_str(r#"{ "data": null }"#).unwrap();
        let _ = into_data(envelope).unwrap_err();
    }

    #[test]
    fn test_client_new_without_token() {
        let client = Client::new(None, GITHUB_GRAPHQL_URL).unwrap();
        assert_eq!(client.endpoint(), "https://api.github.com/graphql");
    }

    #[test]
    fn test_client_new_with_token() {
        let client = Client::new(Some("test_token"), "http://localhost/graphql").unwrap();
        assert_eq!(client.endpoint(), "http://localhost/graphql");
    }
}
