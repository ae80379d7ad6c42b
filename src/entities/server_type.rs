//! Server types: the hardware plans servers are created from

use super::named_entity;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerType {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub cores: Option<u32>,
    /// Memory in GB
    pub memory: Option<f64>,
    /// Disk size in GB
    pub disk: Option<u64>,
    pub storage_type: Option<String>,
    pub cpu_type: Option<String>,
    pub architecture: Option<String>,
    pub deprecated: Option<bool>,
    /// Per-location prices
    pub prices: Option<Vec<Value>>,
}

named_entity!(ServerType, kind: "ServerType", collection: "server_types", singular: "server_type");
