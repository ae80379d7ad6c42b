//! Block storage volumes

use super::{named_entity, Action, Labels, Location, Protection};
use crate::error::Result;
use crate::resource::entity::without_nulls;
use crate::resource::{Creatable, HasActions, Mutable, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    pub id: u64,
    pub name: Option<String>,
    /// Size in GB
    pub size: Option<u64>,
    /// Server the volume is attached to
    pub server: Option<u64>,
    pub location: Option<Location>,
    pub linux_device: Option<String>,
    pub format: Option<String>,
    /// `creating` or `available`
    pub status: Option<String>,
    pub protection: Option<Protection>,
    pub labels: Option<Labels>,
    pub created: Option<DateTime<Utc>>,
}

named_entity!(Volume, kind: "Volume", collection: "volumes", singular: "volume");

impl Mutable for Volume {
    const UPDATABLE: &'static [&'static str] = &["name", "labels"];
}

impl Creatable for Volume {}

impl HasActions for Volume {}

impl Resource<Volume> {
    /// Attach to a server in the same location
    pub async fn attach(&mut self, server: u64, automount: Option<bool>) -> Result<Resource<Action>> {
        let body = json!({ "server": server, "automount": automount });
        self.act("attach", without_nulls(body)).await
    }

    pub async fn detach(&mut self) -> Result<Resource<Action>> {
        self.act("detach", json!({})).await
    }

    pub async fn change_protection(&mut self, delete: bool) -> Result<Resource<Action>> {
        self.act("change_protection", json!({ "delete": delete })).await
    }

    /// Grow the volume; volumes cannot shrink
    pub async fn resize(&mut self, size: u64) -> Result<Resource<Action>> {
        self.act("resize", json!({ "size": size })).await
    }
}
