//! SSH keys injected into new servers

use super::{named_entity, Labels};
use crate::resource::{Creatable, Mutable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshKey {
    pub id: u64,
    pub name: Option<String>,
    pub fingerprint: Option<String>,
    pub public_key: Option<String>,
    pub labels: Option<Labels>,
    pub created: Option<DateTime<Utc>>,
}

named_entity!(SshKey, kind: "SSH Key", collection: "ssh_keys", singular: "ssh_key");

impl Mutable for SshKey {
    const UPDATABLE: &'static [&'static str] = &["name", "labels"];
}

impl Creatable for SshKey {}
