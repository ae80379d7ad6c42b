//! Servers and their actions
//!
//! Actions that hand out credentials (`reset_password`, `rebuild`,
//! `enable_rescue`, `request_console`) return them next to the action;
//! the API shows them only once.

use super::{
    named_entity, Action, Datacenter, Image, Iso, Labels, MetricsQuery, Protection, ServerType,
};
use crate::api::client::Client;
use crate::error::{Error, Result};
use crate::resource::entity::{check_api_error, take_key, without_nulls};
use crate::resource::{Creatable, HasActions, Mutable, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Running,
    Initializing,
    Starting,
    Stopping,
    Off,
    Deleting,
    Migrating,
    Rebuilding,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ipv4 {
    pub ip: String,
    pub blocked: bool,
    pub dns_ptr: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ipv6 {
    /// The /64 block assigned to the server
    pub ip: String,
    pub blocked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicNet {
    pub ipv4: Option<Ipv4>,
    pub ipv6: Option<Ipv6>,
    /// Ids of floating IPs assigned to the server
    pub floating_ips: Vec<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivateNet {
    pub network: u64,
    pub ip: String,
    pub alias_ips: Vec<String>,
    pub mac_address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub id: u64,
    pub name: Option<String>,
    pub status: Option<ServerStatus>,
    pub created: Option<DateTime<Utc>>,
    pub public_net: Option<PublicNet>,
    pub private_net: Vec<PrivateNet>,
    pub server_type: Option<ServerType>,
    pub datacenter: Option<Datacenter>,
    pub image: Option<Image>,
    pub iso: Option<Iso>,
    pub rescue_enabled: bool,
    pub locked: bool,
    /// Time window of daily backups, `None` when backups are disabled
    pub backup_window: Option<String>,
    pub outgoing_traffic: Option<u64>,
    pub ingoing_traffic: Option<u64>,
    pub included_traffic: Option<u64>,
    pub primary_disk_size: Option<u64>,
    pub placement_group: Option<Value>,
    pub volumes: Vec<u64>,
    pub load_balancers: Vec<u64>,
    pub protection: Option<Protection>,
    pub labels: Option<Labels>,
}

named_entity!(Server, kind: "Server", collection: "servers", singular: "server");

impl Mutable for Server {
    const UPDATABLE: &'static [&'static str] = &["name", "labels"];
}

impl Creatable for Server {}

impl HasActions for Server {}

impl Server {
    pub fn is_running(&self) -> bool {
        self.status == Some(ServerStatus::Running)
    }

    pub fn ipv4(&self) -> Option<&str> {
        self.public_net
            .as_ref()
            .and_then(|net| net.ipv4.as_ref())
            .map(|v4| v4.ip.as_str())
    }
}

/// An action together with the root password it set
#[derive(Debug)]
pub struct WithPassword {
    pub action: Resource<Action>,
    /// Absent when the server authenticates with SSH keys only
    pub root_password: Option<String>,
}

/// Credentials for the web console
#[derive(Debug)]
pub struct Console {
    pub action: Resource<Action>,
    pub password: String,
    pub wss_url: String,
}

/// A snapshot or backup being created from a server
#[derive(Debug)]
pub struct CreatedImage {
    pub action: Resource<Action>,
    pub image: Resource<Image>,
}

impl Resource<Server> {
    /// Time series for `cpu`, `disk` or `network`
    pub async fn metrics(&mut self, query: &MetricsQuery) -> Result<Value> {
        let response = self
            .get_path("servers/{id}/metrics", &Value::Null, &query.params())
            .await?;
        take_key(response, "metrics")
    }

    pub async fn add_to_placement_group(&mut self, placement_group: u64) -> Result<Resource<Action>> {
        self.act("add_to_placement_group", json!({ "placement_group": placement_group }))
            .await
    }

    pub async fn remove_from_placement_group(&mut self) -> Result<Resource<Action>> {
        self.act("remove_from_placement_group", json!({})).await
    }

    /// Attach an ISO by id or name
    pub async fn attach_iso(&mut self, iso: &str) -> Result<Resource<Action>> {
        self.act("attach_iso", json!({ "iso": iso })).await
    }

    pub async fn detach_iso(&mut self) -> Result<Resource<Action>> {
        self.act("detach_iso", json!({})).await
    }

    pub async fn attach_to_network(
        &mut self,
        network: u64,
        ip: Option<&str>,
        alias_ips: &[&str],
    ) -> Result<Resource<Action>> {
        let mut body = json!({ "network": network, "ip": ip });
        if !alias_ips.is_empty() {
            body["alias_ips"] = json!(alias_ips);
        }
        self.act("attach_to_network", without_nulls(body)).await
    }

    pub async fn detach_from_network(&mut self, network: u64) -> Result<Resource<Action>> {
        self.act("detach_from_network", json!({ "network": network }))
            .await
    }

    /// Replace the alias IPs the server holds in `network`
    pub async fn change_alias_ips(&mut self, network: u64, alias_ips: &[&str]) -> Result<Resource<Action>> {
        self.act(
            "change_alias_ips",
            json!({ "network": network, "alias_ips": alias_ips }),
        )
        .await
    }

    /// `None` resets the entry for `ip` to the default
    pub async fn change_dns_ptr(&mut self, ip: &str, dns_ptr: Option<&str>) -> Result<Resource<Action>> {
        self.act("change_dns_ptr", json!({ "ip": ip, "dns_ptr": dns_ptr }))
            .await
    }

    /// Only the flags that are `Some` are changed
    pub async fn change_protection(
        &mut self,
        delete: Option<bool>,
        rebuild: Option<bool>,
    ) -> Result<Resource<Action>> {
        let body = json!({ "delete": delete, "rebuild": rebuild });
        self.act("change_protection", without_nulls(body)).await
    }

    /// Change the server type; the server must be off
    pub async fn change_type(&mut self, server_type: &str, upgrade_disk: bool) -> Result<Resource<Action>> {
        self.act(
            "change_type",
            json!({ "server_type": server_type, "upgrade_disk": upgrade_disk }),
        )
        .await
    }

    /// Create a `snapshot` or `backup` image of the server's disk
    pub async fn create_image(
        &mut self,
        image_type: Option<&str>,
        description: Option<&str>,
        labels: Option<&Labels>,
    ) -> Result<CreatedImage> {
        let body = json!({ "type": image_type, "description": description, "labels": labels });
        let mut response = into_object(self.act_raw("create_image", without_nulls(body)).await?)?;

        let client = self.client().clone();
        let action = required(&client, &mut response, "action")?;
        let image = required(&client, &mut response, "image")?;
        Ok(CreatedImage { action, image })
    }

    pub async fn enable_backup(&mut self) -> Result<Resource<Action>> {
        self.act("enable_backup", json!({})).await
    }

    pub async fn disable_backup(&mut self) -> Result<Resource<Action>> {
        self.act("disable_backup", json!({})).await
    }

    /// Boot into the rescue system on the next reboot; `rescue_type` defaults
    /// to `linux64`
    pub async fn enable_rescue(&mut self, rescue_type: Option<&str>, ssh_keys: &[u64]) -> Result<WithPassword> {
        let mut body = json!({ "type": rescue_type });
        if !ssh_keys.is_empty() {
            body["ssh_keys"] = json!(ssh_keys);
        }
        let response = self.act_raw("enable_rescue", without_nulls(body)).await?;
        with_password(self.client(), response)
    }

    pub async fn disable_rescue(&mut self) -> Result<Resource<Action>> {
        self.act("disable_rescue", json!({})).await
    }

    pub async fn poweron(&mut self) -> Result<Resource<Action>> {
        self.act("poweron", json!({})).await
    }

    /// Cut power; may corrupt data, prefer [`shutdown`](Self::shutdown)
    pub async fn poweroff(&mut self) -> Result<Resource<Action>> {
        self.act("poweroff", json!({})).await
    }

    /// Soft reboot through ACPI
    pub async fn reboot(&mut self) -> Result<Resource<Action>> {
        self.act("reboot", json!({})).await
    }

    /// Hard reset
    pub async fn reset(&mut self) -> Result<Resource<Action>> {
        self.act("reset", json!({})).await
    }

    /// Graceful shutdown through ACPI
    pub async fn shutdown(&mut self) -> Result<Resource<Action>> {
        self.act("shutdown", json!({})).await
    }

    /// Reinstall from an image, given by id or name. All data is lost.
    pub async fn rebuild(&mut self, image: &str) -> Result<WithPassword> {
        let response = self.act_raw("rebuild", json!({ "image": image })).await?;
        with_password(self.client(), response)
    }

    pub async fn request_console(&mut self) -> Result<Console> {
        let mut response = into_object(self.act_raw("request_console", json!({})).await?)?;

        let action = required(self.client(), &mut response, "action")?;
        Ok(Console {
            action,
            password: string_key(&mut response, "password")?,
            wss_url: string_key(&mut response, "wss_url")?,
        })
    }

    pub async fn reset_password(&mut self) -> Result<WithPassword> {
        let response = self.act_raw("reset_password", json!({})).await?;
        with_password(self.client(), response)
    }
}

fn into_object(response: Value) -> Result<Map<String, Value>> {
    check_api_error(&response)?;
    match response {
        Value::Object(map) => Ok(map),
        _ => Err(Error::MissingKey("action".to_string())),
    }
}

fn required<T: crate::resource::Entity>(
    client: &Client,
    response: &mut Map<String, Value>,
    key: &str,
) -> Result<Resource<T>> {
    let value = response
        .remove(key)
        .filter(|v| v.is_object())
        .ok_or_else(|| Error::MissingKey(key.to_string()))?;
    Resource::from_value(client.clone(), value)
}

fn string_key(response: &mut Map<String, Value>, key: &str) -> Result<String> {
    match response.remove(key) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(Error::MissingKey(key.to_string())),
    }
}

fn with_password(client: &Client, response: Value) -> Result<WithPassword> {
    let mut response = into_object(response)?;
    let action = required(client, &mut response, "action")?;
    let root_password = string_key(&mut response, "root_password").ok();
    Ok(WithPassword {
        action,
        root_password,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_does_not_fail() {
        let server: Server = serde_json::from_value(json!({
            "id": 42,
            "name": "web-1",
            "status": "hibernating",
            "public_net": {"ipv4": {"ip": "1.2.3.4", "blocked": false, "dns_ptr": "web"}}
        }))
        .unwrap();

        assert_eq!(server.status, Some(ServerStatus::Unknown));
        assert_eq!(server.ipv4(), Some("1.2.3.4"));
        assert!(!server.is_running());
    }

    #[test]
    fn test_with_password_without_password() {
        let client = Client::new("token").unwrap();
        let response = json!({"action": {"id": 1, "command": "rebuild_server"}});
        let result = with_password(&client, response).unwrap();

        assert_eq!(result.action.id(), 1);
        assert!(result.action.is_fetched());
        assert!(result.root_password.is_none());
    }

    #[test]
    fn test_with_password_requires_action() {
        let client = Client::new("token").unwrap();
        let err = with_password(&client, json!({"root_password": "secret"})).unwrap_err();
        assert!(matches!(err, Error::MissingKey(key) if key == "action"));
    }
}
