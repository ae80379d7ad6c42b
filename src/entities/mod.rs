//! Hetzner Cloud resource types
//!
//! One typed record per remote resource. Fields the API may omit are
//! `Option`s so a record can start out holding only its id. Nested payloads
//! that callers rarely inspect stay as raw JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Entity wiring for records with `id` and `name` fields
macro_rules! named_entity {
    ($ty:ty, kind: $kind:literal, collection: $collection:literal, singular: $singular:literal) => {
        impl $crate::resource::Entity for $ty {
            const KIND: &'static str = $kind;
            const COLLECTION: &'static str = $collection;
            const ITEM_PATH: &'static str = concat!($collection, "/{id}");
            const SINGULAR: &'static str = $singular;

            fn label(&self) -> String {
                match &self.name {
                    Some(name) if !name.is_empty() => name.clone(),
                    _ => self.id.to_string(),
                }
            }
        }

        impl $crate::resource::Identified for $ty {
            fn id(&self) -> u64 {
                self.id
            }

            fn with_id(id: u64) -> Self {
                Self {
                    id,
                    ..Default::default()
                }
            }
        }
    };
}

pub(crate) use named_entity;

mod action;
mod certificate;
mod datacenter;
mod firewall;
mod floating_ip;
mod image;
mod iso;
mod load_balancer;
mod load_balancer_type;
mod location;
mod network;
mod placement_group;
mod pricing;
mod server;
mod server_type;
mod ssh_key;
mod volume;

pub use action::{Action, ActionError, ActionResource, ActionStatus};
pub use certificate::Certificate;
pub use datacenter::{Datacenter, DatacenterServerTypes};
pub use firewall::{Firewall, FirewallResource, FirewallRule, LabelSelector, ResourceRef};
pub use floating_ip::{DnsPtr, FloatingIp};
pub use image::Image;
pub use iso::Iso;
pub use load_balancer::{Algorithm, LoadBalancer};
pub use load_balancer_type::LoadBalancerType;
pub use location::Location;
pub use network::{Network, Route, Subnet};
pub use placement_group::PlacementGroup;
pub use pricing::Pricing;
pub use server::{
    Console, CreatedImage, Ipv4, Ipv6, PrivateNet, PublicNet, Server, ServerStatus,
    WithPassword,
};
pub use server_type::ServerType;
pub use ssh_key::SshKey;
pub use volume::Volume;

/// User-defined key/value labels
pub type Labels = HashMap<String, String>;

/// Protection flags against accidental deletion or rebuild
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Protection {
    pub delete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebuild: Option<bool>,
}

/// Time series query for `metrics` endpoints
#[derive(Debug, Clone)]
pub struct MetricsQuery {
    /// Metric types, e.g. `cpu`, `disk`, `network` or `open_connections`
    pub metric_types: Vec<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Resolution in seconds; the API picks one when unset
    pub step: Option<u64>,
}

impl MetricsQuery {
    pub fn new(metric_types: &[&str], start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            metric_types: metric_types.iter().map(|s| s.to_string()).collect(),
            start,
            end,
            step: None,
        }
    }

    pub fn step(mut self, seconds: u64) -> Self {
        self.step = Some(seconds);
        self
    }

    pub(crate) fn params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("type".to_string(), Value::from(self.metric_types.clone()));
        params.insert("start".to_string(), Value::from(self.start.to_rfc3339()));
        params.insert("end".to_string(), Value::from(self.end.to_rfc3339()));
        if let Some(step) = self.step {
            params.insert("step".to_string(), Value::from(step));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_metrics_query_params() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let params = MetricsQuery::new(&["cpu", "disk"], start, end).step(60).params();

        assert_eq!(params["type"], serde_json::json!(["cpu", "disk"]));
        assert_eq!(params["start"], "2024-01-01T00:00:00+00:00");
        assert_eq!(params["step"], 60);
    }
}
