//! Hetzner Cloud Client
//!
//! Main client for the API, combining credentials and the HTTP transport. It
//! is cheap to clone and hands out one typed API per resource type.

use super::auth::Credentials;
use super::http::HttpClient;
use super::macros::Macros;
use crate::entities::{
    Action, Certificate, Datacenter, Firewall, FloatingIp, Image, Iso, LoadBalancer,
    LoadBalancerType, Location, Network, PlacementGroup, Pricing, Server, ServerType, SshKey,
    Volume,
};
use crate::error::Result;
use crate::resource::ResourceApi;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Public API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.hetzner.cloud/v1";

/// Builder for [`Client`]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    credentials: Credentials,
    endpoint: String,
    user_agent: String,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            credentials: Credentials::anonymous(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: format!("hcloud/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientBuilder {
    /// Authenticate with a bearer token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Credentials::new(token);
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// Override the API base URL (proxies, tests)
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<Client> {
        url::Url::parse(&self.endpoint)?;

        let client = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .build()?;

        Ok(Client {
            inner: Arc::new(Inner {
                credentials: self.credentials,
                http: HttpClient::new(client, &self.endpoint),
            }),
        })
    }
}

struct Inner {
    credentials: Credentials,
    http: HttpClient,
}

/// Main Hetzner Cloud client
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.inner.http.base_url())
            .field("credentials", &self.inner.credentials)
            .finish()
    }
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Client for the public endpoint authenticated with `token`
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder().token(token).build()
    }

    /// Client configured from `HCLOUD_TOKEN`
    pub fn from_env() -> Result<Self> {
        Self::builder().credentials(Credentials::from_env()).build()
    }

    pub fn endpoint(&self) -> &str {
        self.inner.http.base_url()
    }

    /// Make a GET request
    pub async fn get(
        &self,
        template: &str,
        macros: &Macros<'_>,
        params: &Map<String, Value>,
    ) -> Result<Value> {
        self.inner
            .http
            .get(&self.inner.credentials, template, macros, params)
            .await
    }

    /// Fetch one listing page
    pub(crate) async fn list_page(
        &self,
        template: &str,
        macros: &Macros<'_>,
        params: &Map<String, Value>,
    ) -> Result<Value> {
        self.inner
            .http
            .list_page(&self.inner.credentials, template, macros, params)
            .await
    }

    /// Make a POST request
    pub async fn post(&self, template: &str, macros: &Macros<'_>, body: &Value) -> Result<Value> {
        self.inner
            .http
            .post(&self.inner.credentials, template, macros, body)
            .await
    }

    /// Make a PUT request carrying the fields named by `keys`
    pub async fn put(&self, template: &str, macros: &Macros<'_>, keys: &[&str]) -> Result<Value> {
        self.inner
            .http
            .put(&self.inner.credentials, template, macros, keys)
            .await
    }

    /// Make a DELETE request
    pub async fn delete(
        &self,
        template: &str,
        macros: &Macros<'_>,
        params: &Map<String, Value>,
    ) -> Result<Value> {
        self.inner
            .http
            .delete(&self.inner.credentials, template, macros, params)
            .await
    }

    // =========================================================================
    // Resource APIs
    // =========================================================================

    pub fn actions(&self) -> ResourceApi<Action> {
        ResourceApi::new(self.clone())
    }

    pub fn certificates(&self) -> ResourceApi<Certificate> {
        ResourceApi::new(self.clone())
    }

    pub fn datacenters(&self) -> ResourceApi<Datacenter> {
        ResourceApi::new(self.clone())
    }

    pub fn firewalls(&self) -> ResourceApi<Firewall> {
        ResourceApi::new(self.clone())
    }

    pub fn floating_ips(&self) -> ResourceApi<FloatingIp> {
        ResourceApi::new(self.clone())
    }

    pub fn images(&self) -> ResourceApi<Image> {
        ResourceApi::new(self.clone())
    }

    pub fn isos(&self) -> ResourceApi<Iso> {
        ResourceApi::new(self.clone())
    }

    pub fn load_balancers(&self) -> ResourceApi<LoadBalancer> {
        ResourceApi::new(self.clone())
    }

    pub fn load_balancer_types(&self) -> ResourceApi<LoadBalancerType> {
        ResourceApi::new(self.clone())
    }

    pub fn locations(&self) -> ResourceApi<Location> {
        ResourceApi::new(self.clone())
    }

    pub fn networks(&self) -> ResourceApi<Network> {
        ResourceApi::new(self.clone())
    }

    pub fn placement_groups(&self) -> ResourceApi<PlacementGroup> {
        ResourceApi::new(self.clone())
    }

    pub fn pricing(&self) -> ResourceApi<Pricing> {
        ResourceApi::new(self.clone())
    }

    pub fn servers(&self) -> ResourceApi<Server> {
        ResourceApi::new(self.clone())
    }

    pub fn server_types(&self) -> ResourceApi<ServerType> {
        ResourceApi::new(self.clone())
    }

    pub fn ssh_keys(&self) -> ResourceApi<SshKey> {
        ResourceApi::new(self.clone())
    }

    pub fn volumes(&self) -> ResourceApi<Volume> {
        ResourceApi::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_to_public_endpoint() {
        let client = Client::builder().build().unwrap();
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_builder_rejects_invalid_endpoint() {
        let err = Client::builder().endpoint("not a url").build().unwrap_err();
        assert!(matches!(err, crate::Error::InvalidUrl(_)));
    }

    #[test]
    fn test_debug_hides_token() {
        let client = Client::new("top-secret").unwrap();
        assert!(!format!("{:?}", client).contains("top-secret"));
    }
}
