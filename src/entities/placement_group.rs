//! Placement groups: spread servers across distinct hosts

use super::{named_entity, Labels};
use crate::resource::{Creatable, Mutable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementGroup {
    pub id: u64,
    pub name: Option<String>,
    pub labels: Option<Labels>,
    /// Only `spread` exists today
    #[serde(rename = "type")]
    pub group_type: Option<String>,
    pub servers: Vec<u64>,
    pub created: Option<DateTime<Utc>>,
}

named_entity!(
    PlacementGroup,
    kind: "PlacementGroup",
    collection: "placement_groups",
    singular: "placement_group"
);

impl Mutable for PlacementGroup {
    const UPDATABLE: &'static [&'static str] = &["name", "labels"];
}

impl Creatable for PlacementGroup {}
