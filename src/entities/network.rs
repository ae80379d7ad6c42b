//! Private networks

use super::{named_entity, Action, Labels, Protection};
use crate::error::Result;
use crate::resource::{Creatable, HasActions, Mutable, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    /// `cloud`, `server` or `vswitch`
    #[serde(rename = "type")]
    pub subnet_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_range: Option<String>,
    pub network_zone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vswitch_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub destination: String,
    pub gateway: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Network {
    pub id: u64,
    pub name: Option<String>,
    pub ip_range: Option<String>,
    pub subnets: Vec<Subnet>,
    pub routes: Vec<Route>,
    pub servers: Vec<u64>,
    pub load_balancers: Vec<u64>,
    pub expose_routes_to_vswitch: bool,
    pub protection: Option<Protection>,
    pub labels: Option<Labels>,
    pub created: Option<DateTime<Utc>>,
}

named_entity!(Network, kind: "Network", collection: "networks", singular: "network");

impl Mutable for Network {
    const UPDATABLE: &'static [&'static str] = &["name", "labels"];
}

impl Creatable for Network {}

impl HasActions for Network {}

impl Resource<Network> {
    pub async fn add_route(&mut self, route: &Route) -> Result<Resource<Action>> {
        self.act("add_route", json!(route)).await
    }

    pub async fn delete_route(&mut self, route: &Route) -> Result<Resource<Action>> {
        self.act("delete_route", json!(route)).await
    }

    /// Add a subnet; without `ip_range` the API picks a free /24
    pub async fn add_subnet(&mut self, subnet: &Subnet) -> Result<Resource<Action>> {
        let mut body = json!(subnet);
        if let Some(map) = body.as_object_mut() {
            map.remove("gateway");
        }
        self.act("add_subnet", body).await
    }

    pub async fn delete_subnet(&mut self, ip_range: &str) -> Result<Resource<Action>> {
        self.act("delete_subnet", json!({ "ip_range": ip_range }))
            .await
    }

    /// Extend the network's range; it can only grow
    pub async fn change_ip_range(&mut self, ip_range: &str) -> Result<Resource<Action>> {
        self.act("change_ip_range", json!({ "ip_range": ip_range }))
            .await
    }

    pub async fn change_protection(&mut self, delete: bool) -> Result<Resource<Action>> {
        self.act("change_protection", json!({ "delete": delete })).await
    }
}
