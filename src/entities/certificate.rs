//! TLS certificates for load balancers, uploaded or managed

use super::{named_entity, Action, Labels};
use crate::error::Result;
use crate::resource::{Creatable, HasActions, Mutable, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Certificate {
    pub id: u64,
    pub name: Option<String>,
    /// `uploaded` or `managed`
    #[serde(rename = "type")]
    pub certificate_type: Option<String>,
    /// PEM chain
    pub certificate: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub not_valid_before: Option<DateTime<Utc>>,
    pub not_valid_after: Option<DateTime<Utc>>,
    pub domain_names: Vec<String>,
    pub fingerprint: Option<String>,
    /// Issuance and renewal state, managed certificates only
    pub status: Option<Value>,
    pub used_by: Vec<Value>,
    pub labels: Option<Labels>,
}

named_entity!(Certificate, kind: "Certificate", collection: "certificates", singular: "certificate");

impl Mutable for Certificate {
    const UPDATABLE: &'static [&'static str] = &["name", "labels"];
}

impl Creatable for Certificate {}

impl HasActions for Certificate {}

impl Resource<Certificate> {
    /// Retry issuance or renewal of a managed certificate that failed
    pub async fn retry(&mut self) -> Result<Resource<Action>> {
        self.act("retry", json!({})).await
    }
}
