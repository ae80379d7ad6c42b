//! Floating IPs

use super::{named_entity, Action, Labels, Location, Protection};
use crate::error::Result;
use crate::resource::{Creatable, HasActions, Mutable, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Reverse DNS entry for one address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsPtr {
    pub ip: String,
    pub dns_ptr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingIp {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub ip: Option<String>,
    /// `ipv4` or `ipv6`
    #[serde(rename = "type")]
    pub ip_type: Option<String>,
    /// Server the address is assigned to
    pub server: Option<u64>,
    pub dns_ptr: Vec<DnsPtr>,
    pub home_location: Option<Location>,
    pub blocked: bool,
    pub protection: Option<Protection>,
    pub labels: Option<Labels>,
    pub created: Option<DateTime<Utc>>,
}

named_entity!(FloatingIp, kind: "Floating IP", collection: "floating_ips", singular: "floating_ip");

impl Mutable for FloatingIp {
    const UPDATABLE: &'static [&'static str] = &["description", "labels", "name"];
}

impl Creatable for FloatingIp {}

impl HasActions for FloatingIp {}

impl Resource<FloatingIp> {
    pub async fn assign(&mut self, server: u64) -> Result<Resource<Action>> {
        self.act("assign", json!({ "server": server })).await
    }

    pub async fn unassign(&mut self) -> Result<Resource<Action>> {
        self.act("unassign", json!({})).await
    }

    /// Set the reverse DNS entry for `ip`; `None` resets it to the default
    pub async fn change_dns_ptr(&mut self, ip: &str, dns_ptr: Option<&str>) -> Result<Resource<Action>> {
        self.act("change_dns_ptr", json!({ "ip": ip, "dns_ptr": dns_ptr }))
            .await
    }

    pub async fn change_protection(&mut self, delete: bool) -> Result<Resource<Action>> {
        self.act("change_protection", json!({ "delete": delete })).await
    }
}
