//! Load balancer types

use super::named_entity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadBalancerType {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub max_connections: Option<u64>,
    pub max_services: Option<u32>,
    pub max_targets: Option<u32>,
    pub max_assigned_certificates: Option<u32>,
    pub prices: Option<Vec<Value>>,
}

named_entity!(
    LoadBalancerType,
    kind: "LoadBalancerType",
    collection: "load_balancer_types",
    singular: "load_balancer_type"
);
