//! Transport verbs for Hetzner Cloud REST calls
//!
//! Every verb resolves an endpoint template against macro contexts, attaches
//! the bearer token when one is configured and returns the decoded JSON body.
//! Non-2xx answers are not turned into errors here: the API sends structured
//! error bodies on every path, so the body is decoded and handed back for the
//! caller to inspect.

use super::auth::Credentials;
use super::macros::{query_string, Macros};
use crate::error::Result;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::{Map, Value};

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for Hetzner Cloud API calls
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for `template`, with an optional query string
    pub fn url(&self, template: &str, macros: &Macros<'_>, params: &Map<String, Value>) -> String {
        let path = macros.resolve(template);
        let query = query_string(params);
        if query.is_empty() {
            format!("{}/{}", self.base_url, path)
        } else {
            format!("{}/{}?{}", self.base_url, path, query)
        }
    }

    /// Read a resource
    pub async fn get(
        &self,
        creds: &Credentials,
        template: &str,
        macros: &Macros<'_>,
        params: &Map<String, Value>,
    ) -> Result<Value> {
        let url = self.url(template, macros, params);
        self.execute(Method::GET, &url, creds, None).await
    }

    /// Read one page of a listing; only the paginator calls this
    pub async fn list_page(
        &self,
        creds: &Credentials,
        template: &str,
        macros: &Macros<'_>,
        params: &Map<String, Value>,
    ) -> Result<Value> {
        let url = self.url(template, macros, params);
        self.execute(Method::GET, &url, creds, None).await
    }

    /// Create a resource or trigger an action
    pub async fn post(
        &self,
        creds: &Credentials,
        template: &str,
        macros: &Macros<'_>,
        body: &Value,
    ) -> Result<Value> {
        let url = self.url(template, macros, &Map::new());
        self.execute(Method::POST, &url, creds, Some(body)).await
    }

    /// Replace the fields named by `keys`, taking each value from the macro
    /// chain so the caller need not repeat them
    pub async fn put(
        &self,
        creds: &Credentials,
        template: &str,
        macros: &Macros<'_>,
        keys: &[&str],
    ) -> Result<Value> {
        let url = self.url(template, macros, &Map::new());
        let body = Value::Object(macros.pick(keys));
        self.execute(Method::PUT, &url, creds, Some(&body)).await
    }

    /// Delete a resource
    pub async fn delete(
        &self,
        creds: &Credentials,
        template: &str,
        macros: &Macros<'_>,
        params: &Map<String, Value>,
    ) -> Result<Value> {
        let url = self.url(template, macros, params);
        self.execute(Method::DELETE, &url, creds, None).await
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        creds: &Credentials,
        body: Option<&Value>,
    ) -> Result<Value> {
        tracing::debug!("{} {}", method, url);

        let mut request: RequestBuilder = self.client.request(method, url);
        if let Some(token) = creds.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // Security: Only log sanitized/truncated error body to avoid leaking sensitive data
            tracing::warn!("API returned {} - {}", status, sanitize_for_log(&text));
        }

        // Handle empty response
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn http() -> HttpClient {
        HttpClient::new(Client::new(), "https://api.hetzner.cloud/v1/")
    }

    #[test]
    fn test_trailing_slash_is_stripped() {
        assert_eq!(http().base_url(), "https://api.hetzner.cloud/v1");
    }

    #[test]
    fn test_url_without_query() {
        let ctx = json!({"id": 5});
        let url = http().url("servers/{id}", &Macros::from(&ctx), &Map::new());
        assert_eq!(url, "https://api.hetzner.cloud/v1/servers/5");
    }

    #[test]
    fn test_url_with_query() {
        let params = json!({"page": 2, "per_page": 50, "name": ""});
        let url = http().url("servers", &Macros::new(), params.as_object().unwrap());
        assert_eq!(url, "https://api.hetzner.cloud/v1/servers?page=2&per_page=50");
    }

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(200)));
        assert!(sanitized.contains("500 bytes total"));
    }

    #[test]
    fn test_sanitize_strips_control_characters() {
        assert_eq!(sanitize_for_log("bad\nbody\t!"), "badbody!");
    }
}
