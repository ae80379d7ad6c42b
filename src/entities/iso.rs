//! ISO images that can be attached to servers

use super::named_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Iso {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    /// `public` or `private`
    #[serde(rename = "type")]
    pub iso_type: Option<String>,
    pub architecture: Option<String>,
    pub deprecated: Option<DateTime<Utc>>,
}

named_entity!(Iso, kind: "ISO", collection: "isos", singular: "iso");
