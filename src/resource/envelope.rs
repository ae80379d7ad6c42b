//! Lazy Resource Envelope
//!
//! A [`Resource`] stands for one remote object. It may start out knowing only
//! an identifier; the first operation that needs current data performs the
//! round-trip and merges the server's fields into the typed record. Deleting
//! through the envelope retires it for good.

use super::entity::{
    check_api_error, merge_fields, take_key, without_nulls, Entity, HasActions, Identified,
    Mutable,
};
use super::paginator::{Listing, Paginator};
use crate::api::client::Client;
use crate::api::macros::Macros;
use crate::entities::Action;
use crate::error::{Error, Result};
use serde_json::{json, Map, Value};

/// State of the deferred fetch handle
#[derive(Debug, Clone, PartialEq, Eq)]
enum FetchState {
    /// The first round-trip has not happened yet
    Pending,
    /// Fields reflect a server response (or the caller said they were complete)
    Ready,
    /// Deleted through this envelope; carries the message every later use fails with
    Deleted(String),
}

/// Local representation of one remote resource
#[derive(Clone)]
pub struct Resource<T: Entity> {
    client: Client,
    fields: T,
    state: FetchState,
}

impl<T: Entity + std::fmt::Debug> std::fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("fields", &self.fields)
            .field("state", &self.state)
            .finish()
    }
}

impl<T: Entity> Resource<T> {
    /// Envelope around a partial record; fetched on first use
    pub fn new(client: Client, fields: T) -> Self {
        Self {
            client,
            fields,
            state: FetchState::Pending,
        }
    }

    /// Envelope around a record the caller already knows is complete.
    /// No request is made until an explicit [`refresh`](Self::refresh).
    pub fn known(client: Client, fields: T) -> Self {
        Self {
            client,
            fields,
            state: FetchState::Ready,
        }
    }

    /// Complete envelope from an inline response object
    pub(crate) fn from_value(client: Client, value: Value) -> Result<Self> {
        Ok(Self::known(client, serde_json::from_value(value)?))
    }

    /// Fields as currently known, without any network access
    pub fn fields(&self) -> &T {
        &self.fields
    }

    /// Local edits, sent by the next `update`
    pub fn fields_mut(&mut self) -> &mut T {
        &mut self.fields
    }

    pub fn into_fields(self) -> T {
        self.fields
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn is_fetched(&self) -> bool {
        self.state == FetchState::Ready
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self.state, FetchState::Deleted(_))
    }

    /// Await the fetch handle: performs the first round-trip if it is still
    /// pending, fails if the resource was deleted
    pub async fn fetched(&mut self) -> Result<&T> {
        match &self.state {
            FetchState::Deleted(message) => Err(Error::AlreadyDeleted(message.clone())),
            FetchState::Ready => Ok(&self.fields),
            FetchState::Pending => {
                self.refresh().await?;
                Ok(&self.fields)
            }
        }
    }

    /// Reload every field from the server, whatever the current state
    pub async fn refresh(&mut self) -> Result<&mut Self> {
        self.ensure_alive()?;

        let own = self.context()?;
        let response = self
            .client
            .get(T::ITEM_PATH, &Macros::from(&own), &Map::new())
            .await?;

        self.merge(take_key(response, T::SINGULAR)?)?;
        self.state = FetchState::Ready;
        Ok(self)
    }

    /// GET `template` resolved against this resource, then `overrides`
    pub async fn get_path(
        &mut self,
        template: &str,
        overrides: &Value,
        params: &Map<String, Value>,
    ) -> Result<Value> {
        self.fetched().await?;
        let own = self.context()?;
        let response = self
            .client
            .get(template, &Macros::from([&own, overrides]), params)
            .await?;
        check_api_error(&response)?;
        Ok(response)
    }

    /// POST `body` to `template` resolved against this resource, then `overrides`
    pub async fn post_path(&mut self, template: &str, overrides: &Value, body: &Value) -> Result<Value> {
        self.fetched().await?;
        let own = self.context()?;
        let response = self
            .client
            .post(template, &Macros::from([&own, overrides]), body)
            .await?;
        check_api_error(&response)?;
        Ok(response)
    }

    /// This resource's fields as a macro context
    fn context(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.fields)?)
    }

    fn merge(&mut self, remote: Value) -> Result<()> {
        self.fields = merge_fields(&self.fields, remote)?;
        Ok(())
    }

    fn ensure_alive(&self) -> Result<()> {
        match &self.state {
            FetchState::Deleted(message) => Err(Error::AlreadyDeleted(message.clone())),
            _ => Ok(()),
        }
    }
}

impl<T: Mutable> Resource<T> {
    /// Send the entity's updatable fields from their in-memory values
    pub async fn update(&mut self) -> Result<&mut Self> {
        self.update_fields(T::UPDATABLE).await
    }

    /// Send only `keys`, each taken from the in-memory record, then take over
    /// the server's full representation. Keys the record holds no value for
    /// are left out of the body.
    pub async fn update_fields(&mut self, keys: &[&str]) -> Result<&mut Self> {
        self.fetched().await?;

        let own = without_nulls(self.context()?);
        let response = self
            .client
            .put(T::ITEM_PATH, &Macros::from(&own), keys)
            .await?;

        self.merge(take_key(response, T::SINGULAR)?)?;
        Ok(self)
    }

    /// Delete the remote resource.
    ///
    /// On success the envelope is retired: every later use, including a
    /// second `delete`, fails with [`Error::AlreadyDeleted`] without touching
    /// the network. Returns the deletion action when the API reports one.
    pub async fn delete(&mut self) -> Result<Option<Resource<Action>>> {
        self.fetched().await?;

        let own = self.context()?;
        let response = self
            .client
            .delete(T::ITEM_PATH, &Macros::from(&own), &Map::new())
            .await?;
        check_api_error(&response)?;

        let label = self.fields.label();
        tracing::info!("Deleted {} {}", T::KIND, label);
        self.state = FetchState::Deleted(format!(
            "The {} \"{}\" was already deleted.",
            T::KIND,
            label
        ));

        match response.get("action").filter(|a| a.is_object()) {
            Some(action) => Resource::from_value(self.client.clone(), action.clone()).map(Some),
            None => Ok(None),
        }
    }
}

impl<T: HasActions> Resource<T> {
    /// Actions performed on this resource, page by page
    pub async fn actions(&mut self, params: Map<String, Value>) -> Result<Listing<Action>> {
        self.fetched().await?;
        let own = self.context()?;
        let template = format!("{}/{{id}}/actions", T::COLLECTION);
        Ok(Listing::new(Paginator::new(
            self.client.clone(),
            template,
            vec![own],
            params,
        )))
    }

    /// One action performed on this resource
    pub async fn action(&mut self, action_id: u64) -> Result<Resource<Action>> {
        let template = format!("{}/{{id}}/actions/{{action_id}}", T::COLLECTION);
        let overrides = json!({ "action_id": action_id });
        let response = self.get_path(&template, &overrides, &Map::new()).await?;
        Resource::from_value(self.client.clone(), take_key(response, "action")?)
    }

    /// Trigger the named action, returning the decoded response
    pub async fn act_raw(&mut self, name: &str, body: Value) -> Result<Value> {
        let template = format!("{}/{{id}}/actions/{}", T::COLLECTION, name);
        self.post_path(&template, &Value::Null, &body).await
    }

    /// Trigger the named action, returning the single action it starts
    pub async fn act(&mut self, name: &str, body: Value) -> Result<Resource<Action>> {
        let response = self.act_raw(name, body).await?;
        Resource::from_value(self.client.clone(), take_key(response, "action")?)
    }

    /// Trigger the named action, returning every action it starts
    pub async fn act_many(&mut self, name: &str, body: Value) -> Result<Vec<Resource<Action>>> {
        let response = self.act_raw(name, body).await?;
        let Value::Array(actions) = take_key(response, "actions")? else {
            return Err(Error::MissingKey("actions".to_string()));
        };

        actions
            .into_iter()
            .map(|action| Resource::from_value(self.client.clone(), action))
            .collect()
    }
}

impl<T: Identified> Resource<T> {
    pub fn id(&self) -> u64 {
        self.fields.id()
    }
}

/// Result of a create call
pub struct Created<T: Entity> {
    /// The created resource, complete as returned by the API
    pub resource: Resource<T>,
    /// Action tracking the creation, when the API reports one
    pub action: Option<Resource<Action>>,
    /// Actions listed under `actions` (firewalls report one per applied resource)
    pub actions: Vec<Resource<Action>>,
    /// Follow-up actions the API scheduled after `action`
    pub next_actions: Vec<Resource<Action>>,
    /// Remaining top-level keys, such as `root_password`
    pub extra: Map<String, Value>,
}

impl<T: Entity> Created<T> {
    pub(crate) fn from_response(client: Client, response: Value) -> Result<Self> {
        check_api_error(&response)?;
        let Value::Object(mut map) = response else {
            return Err(Error::MissingKey(T::SINGULAR.to_string()));
        };

        let fields = map
            .remove(T::SINGULAR)
            .filter(|v| !v.is_null())
            .ok_or_else(|| Error::MissingKey(T::SINGULAR.to_string()))?;

        let action = match map.remove("action") {
            Some(value) if value.is_object() => Some(Resource::from_value(client.clone(), value)?),
            _ => None,
        };
        let actions = action_list(&client, map.remove("actions"))?;
        let next_actions = action_list(&client, map.remove("next_actions"))?;

        Ok(Self {
            resource: Resource::from_value(client, fields)?,
            action,
            actions,
            next_actions,
            extra: map,
        })
    }
}

fn action_list(client: &Client, value: Option<Value>) -> Result<Vec<Resource<Action>>> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| Resource::from_value(client.clone(), item))
            .collect(),
        _ => Ok(Vec::new()),
    }
}
