//! Load balancers
//!
//! Services and targets are passed through as raw JSON: their shapes depend on
//! the protocol and target type, and the API validates them.

use super::{named_entity, Action, Labels, LoadBalancerType, Location, MetricsQuery, Protection};
use crate::error::Result;
use crate::resource::entity::{take_key, without_nulls};
use crate::resource::{Creatable, HasActions, Mutable, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Algorithm {
    /// `round_robin` or `least_connections`
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadBalancer {
    pub id: u64,
    pub name: Option<String>,
    pub public_net: Option<Value>,
    pub private_net: Vec<Value>,
    pub location: Option<Location>,
    pub load_balancer_type: Option<LoadBalancerType>,
    pub algorithm: Option<Algorithm>,
    pub services: Vec<Value>,
    pub targets: Vec<Value>,
    pub outgoing_traffic: Option<u64>,
    pub ingoing_traffic: Option<u64>,
    pub included_traffic: Option<u64>,
    pub protection: Option<Protection>,
    pub labels: Option<Labels>,
    pub created: Option<DateTime<Utc>>,
}

named_entity!(
    LoadBalancer,
    kind: "Load Balancer",
    collection: "load_balancers",
    singular: "load_balancer"
);

impl Mutable for LoadBalancer {
    const UPDATABLE: &'static [&'static str] = &["name", "labels"];
}

impl Creatable for LoadBalancer {}

impl HasActions for LoadBalancer {}

impl Resource<LoadBalancer> {
    /// Time series for `open_connections`, `connections_per_second`,
    /// `requests_per_second` or `bandwidth`
    pub async fn metrics(&mut self, query: &MetricsQuery) -> Result<Value> {
        let response = self
            .get_path("load_balancers/{id}/metrics", &Value::Null, &query.params())
            .await?;
        take_key(response, "metrics")
    }

    /// `service` carries protocol, listen_port, destination_port,
    /// proxyprotocol, and optionally http and health_check
    pub async fn add_service(&mut self, service: Value) -> Result<Resource<Action>> {
        self.act("add_service", without_nulls(service)).await
    }

    /// Update the service on `listen_port` inside `service`
    pub async fn update_service(&mut self, service: Value) -> Result<Resource<Action>> {
        self.act("update_service", without_nulls(service)).await
    }

    pub async fn delete_service(&mut self, listen_port: u16) -> Result<Resource<Action>> {
        self.act("delete_service", json!({ "listen_port": listen_port }))
            .await
    }

    /// `target` names its `type` (`server`, `label_selector` or `ip`) and the
    /// matching key
    pub async fn add_target(&mut self, target: Value) -> Result<Resource<Action>> {
        self.act("add_target", without_nulls(target)).await
    }

    pub async fn remove_target(&mut self, target: Value) -> Result<Resource<Action>> {
        self.act("remove_target", without_nulls(target)).await
    }

    pub async fn attach_to_network(&mut self, network: u64, ip: Option<&str>) -> Result<Resource<Action>> {
        let body = json!({ "network": network, "ip": ip });
        self.act("attach_to_network", without_nulls(body)).await
    }

    pub async fn detach_from_network(&mut self, network: u64) -> Result<Resource<Action>> {
        self.act("detach_from_network", json!({ "network": network }))
            .await
    }

    pub async fn enable_public_interface(&mut self) -> Result<Resource<Action>> {
        self.act("enable_public_interface", json!({})).await
    }

    pub async fn disable_public_interface(&mut self) -> Result<Resource<Action>> {
        self.act("disable_public_interface", json!({})).await
    }

    pub async fn change_algorithm(&mut self, algorithm: &str) -> Result<Resource<Action>> {
        self.act("change_algorithm", json!({ "type": algorithm }))
            .await
    }

    /// `None` resets the entry for `ip` to the default
    pub async fn change_dns_ptr(&mut self, ip: &str, dns_ptr: Option<&str>) -> Result<Resource<Action>> {
        self.act("change_dns_ptr", json!({ "ip": ip, "dns_ptr": dns_ptr }))
            .await
    }

    pub async fn change_protection(&mut self, delete: bool) -> Result<Resource<Action>> {
        self.act("change_protection", json!({ "delete": delete })).await
    }

    pub async fn change_type(&mut self, load_balancer_type: &str) -> Result<Resource<Action>> {
        self.act("change_type", json!({ "load_balancer_type": load_balancer_type }))
            .await
    }
}
