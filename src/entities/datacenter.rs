//! Datacenters

use super::{named_entity, Location};
use serde::{Deserialize, Serialize};

/// Server type ids by availability in one datacenter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatacenterServerTypes {
    pub supported: Vec<u64>,
    pub available: Vec<u64>,
    pub available_for_migration: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Datacenter {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<Location>,
    pub server_types: Option<DatacenterServerTypes>,
}

named_entity!(Datacenter, kind: "Datacenter", collection: "datacenters", singular: "datacenter");
