//! Images: system images, snapshots, backups and app images
//!
//! Images cannot be created directly; snapshots come from
//! `Resource<Server>::create_image`.

use super::{named_entity, Action, Labels, Protection};
use crate::error::Result;
use crate::resource::{HasActions, Mutable, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    /// `system`, `app`, `snapshot` or `backup`
    #[serde(rename = "type")]
    pub image_type: Option<String>,
    /// `available`, `creating` or `unavailable`
    pub status: Option<String>,
    /// Size in GB, snapshots and backups only
    pub image_size: Option<f64>,
    pub disk_size: Option<f64>,
    pub created: Option<DateTime<Utc>>,
    pub os_flavor: Option<String>,
    pub os_version: Option<String>,
    pub rapid_deploy: Option<bool>,
    pub deprecated: Option<DateTime<Utc>>,
    pub architecture: Option<String>,
    /// Server a backup is bound to
    pub bound_to: Option<u64>,
    pub created_from: Option<serde_json::Value>,
    pub protection: Option<Protection>,
    pub labels: Option<Labels>,
}

named_entity!(Image, kind: "Image", collection: "images", singular: "image");

impl Mutable for Image {
    const UPDATABLE: &'static [&'static str] = &["description", "labels"];
}

impl HasActions for Image {}

impl Resource<Image> {
    pub async fn change_protection(&mut self, delete: bool) -> Result<Resource<Action>> {
        self.act("change_protection", json!({ "delete": delete })).await
    }
}
