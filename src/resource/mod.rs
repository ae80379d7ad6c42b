//! Resource abstraction layer
//!
//! The generic machinery every entity type reuses.
//!
//! # Architecture
//!
//! - [`entity`] - entity traits, typed field merging and response helpers
//! - [`envelope`] - lazy resource envelope with its deferred fetch handle
//! - [`paginator`] - pull-based pagination over listing endpoints
//! - [`collection`] - per-type entry point: list, get, create
//!
//! # Example
//!
//! ```no_run
//! use hcloud::Client;
//!
//! async fn rename(client: &Client) -> hcloud::Result<()> {
//!     let mut volume = client.volumes().get(7);
//!     volume.fetched().await?;
//!     volume.fields_mut().name = Some("data".to_string());
//!     volume.update_fields(&["name"]).await?;
//!     Ok(())
//! }
//! ```

pub mod collection;
pub mod entity;
pub mod envelope;
pub mod paginator;

pub use collection::ResourceApi;
pub use entity::{merge_fields, Creatable, Entity, HasActions, Identified, Mutable};
pub use envelope::{Created, Resource};
pub use paginator::{Listing, PageItem, Paginator};
