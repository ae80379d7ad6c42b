//! Pricing: a single document, not addressed by id

use crate::error::{Error, Result};
use crate::resource::{Entity, Resource, ResourceApi};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pricing {
    pub currency: Option<String>,
    pub vat_rate: Option<String>,
    pub image: Option<Value>,
    pub floating_ip: Option<Value>,
    pub floating_ips: Option<Vec<Value>>,
    pub primary_ips: Option<Vec<Value>>,
    pub traffic: Option<Value>,
    pub server_backup: Option<Value>,
    pub volume: Option<Value>,
    pub server_types: Option<Vec<Value>>,
    pub load_balancer_types: Option<Vec<Value>>,
}

impl Entity for Pricing {
    const KIND: &'static str = "Pricing";
    const COLLECTION: &'static str = "pricing";
    const ITEM_PATH: &'static str = "pricing";
    const SINGULAR: &'static str = "pricing";

    fn label(&self) -> String {
        "pricing".to_string()
    }
}

impl ResourceApi<Pricing> {
    /// Current prices; the listing endpoint returns a single object
    pub async fn current(&self) -> Result<Resource<Pricing>> {
        self.list(Map::new())
            .next()
            .await?
            .ok_or_else(|| Error::MissingKey(Pricing::SINGULAR.to_string()))
    }
}
