//! Hetzner Cloud API client
//!
//! Exposes the Hetzner Cloud HTTP API as in-process objects: lazily fetched
//! resources, paginated listings and server-side actions.
//!
//! # Module Structure
//!
//! - [`api`] - client, credentials, transport verbs and the endpoint macro router
//! - [`resource`] - lazy resource envelope, pagination iterator and entity traits
//! - [`entities`] - one typed record per remote resource type
//!
//! # Example
//!
//! ```no_run
//! use futures::TryStreamExt;
//! use hcloud::Client;
//!
//! async fn example() -> hcloud::Result<()> {
//!     let client = Client::new("my-token")?;
//!
//!     let servers = client.servers().list(Default::default()).into_stream();
//!     futures::pin_mut!(servers);
//!     while let Some(server) = servers.try_next().await? {
//!         println!("{:?}", server.fields().name);
//!     }
//!
//!     let mut server = client.servers().get(42);
//!     let action = server.poweroff().await?;
//!     println!("{:?}", action.fields().status);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod entities;
pub mod error;
pub mod resource;

pub use api::client::{Client, ClientBuilder, DEFAULT_ENDPOINT};
pub use api::macros::Macros;
pub use error::{Error, Result};
pub use resource::{Created, Entity, Listing, PageItem, Paginator, Resource, ResourceApi};
