//! Typed entry point for one resource type, handed out by the client's
//! factory methods (`client.servers()`, `client.volumes()`, ...).

use super::entity::{Creatable, Entity, Identified};
use super::envelope::{Created, Resource};
use super::paginator::{Listing, Paginator};
use crate::api::client::Client;
use crate::api::macros::Macros;
use crate::error::Result;
use serde_json::{Map, Value};
use std::marker::PhantomData;

pub struct ResourceApi<T: Entity> {
    client: Client,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for ResourceApi<T> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

impl<T: Entity> ResourceApi<T> {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }

    /// Every resource of this type, across all pages.
    ///
    /// `params` carries filters and sorting (`name`, `label_selector`,
    /// `sort`, `status`, ...) plus an optional starting `page` and `per_page`.
    pub fn list(&self, params: Map<String, Value>) -> Listing<T> {
        Listing::new(Paginator::new(
            self.client.clone(),
            T::COLLECTION,
            Vec::new(),
            params,
        ))
    }

    /// Wrap a record the caller already holds in full; no request is made
    pub fn known(&self, fields: T) -> Resource<T> {
        Resource::known(self.client.clone(), fields)
    }
}

impl<T: Identified> ResourceApi<T> {
    /// Lazy handle on the resource with `id`; nothing is requested until the
    /// handle is first used
    pub fn get(&self, id: u64) -> Resource<T> {
        Resource::new(self.client.clone(), T::with_id(id))
    }

    /// Resource with `id`, fetched right away
    pub async fn fetch(&self, id: u64) -> Result<Resource<T>> {
        let mut resource = self.get(id);
        resource.refresh().await?;
        Ok(resource)
    }
}

impl<T: Creatable> ResourceApi<T> {
    /// Create a resource from `body`. The returned resource is complete, so
    /// it is not fetched again.
    pub async fn create(&self, body: &Value) -> Result<Created<T>> {
        let response = self
            .client
            .post(T::COLLECTION, &Macros::new(), body)
            .await?;
        Created::from_response(self.client.clone(), response)
    }
}
