//! Firewalls
//!
//! A firewall without inbound rules drops all inbound traffic once applied;
//! without outbound rules all outbound traffic is accepted. Firewall actions
//! report one action per affected resource.

use super::{named_entity, Action, Labels};
use crate::error::Result;
use crate::resource::{Creatable, HasActions, Mutable, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRule {
    /// `in` or `out`
    pub direction: String,
    /// `tcp`, `udp`, `icmp`, `esp` or `gre`
    pub protocol: String,
    /// Port or range such as `80-85`; only for tcp and udp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    #[serde(default)]
    pub source_ips: Vec<String>,
    #[serde(default)]
    pub destination_ips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSelector {
    pub selector: String,
}

/// Target of a firewall: a single server, or every server matching a
/// label selector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallResource {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<LabelSelector>,
}

impl FirewallResource {
    pub fn server(id: u64) -> Self {
        Self {
            kind: "server".to_string(),
            server: Some(ResourceRef { id }),
            label_selector: None,
        }
    }

    pub fn label_selector(selector: impl Into<String>) -> Self {
        Self {
            kind: "label_selector".to_string(),
            server: None,
            label_selector: Some(LabelSelector {
                selector: selector.into(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Firewall {
    pub id: u64,
    pub name: Option<String>,
    pub labels: Option<Labels>,
    pub rules: Vec<FirewallRule>,
    pub applied_to: Vec<FirewallResource>,
    pub created: Option<DateTime<Utc>>,
}

named_entity!(Firewall, kind: "Firewall", collection: "firewalls", singular: "firewall");

impl Mutable for Firewall {
    const UPDATABLE: &'static [&'static str] = &["name", "labels"];
}

impl Creatable for Firewall {}

impl HasActions for Firewall {}

impl Resource<Firewall> {
    pub async fn apply_to_resources(&mut self, targets: &[FirewallResource]) -> Result<Vec<Resource<Action>>> {
        self.act_many("apply_to_resources", json!({ "apply_to": targets }))
            .await
    }

    pub async fn remove_from_resources(
        &mut self,
        targets: &[FirewallResource],
    ) -> Result<Vec<Resource<Action>>> {
        self.act_many("remove_from_resources", json!({ "remove_from": targets }))
            .await
    }

    /// Replace every rule; an empty slice removes them all
    pub async fn set_rules(&mut self, rules: &[FirewallRule]) -> Result<Vec<Resource<Action>>> {
        self.act_many("set_rules", json!({ "rules": rules })).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_serialization_skips_unset_targets() {
        let value = serde_json::to_value(FirewallResource::server(42)).unwrap();
        assert_eq!(value, json!({"type": "server", "server": {"id": 42}}));

        let value = serde_json::to_value(FirewallResource::label_selector("env=prod")).unwrap();
        assert_eq!(
            value,
            json!({"type": "label_selector", "label_selector": {"selector": "env=prod"}})
        );
    }

    #[test]
    fn test_rule_without_port() {
        let rule: FirewallRule = serde_json::from_value(json!({
            "direction": "in",
            "protocol": "icmp",
            "source_ips": ["0.0.0.0/0", "::/0"]
        }))
        .unwrap();
        assert!(rule.port.is_none());
        assert!(rule.destination_ips.is_empty());
        assert!(!serde_json::to_value(&rule).unwrap().as_object().unwrap().contains_key("port"));
    }
}
