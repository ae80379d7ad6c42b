//! Locations: the sites datacenters live in

use super::named_entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    /// ISO 3166-1 alpha-2 country code
    pub country: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub network_zone: Option<String>,
}

named_entity!(Location, kind: "Location", collection: "locations", singular: "location");
