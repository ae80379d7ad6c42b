//! Hetzner Cloud API interaction module
//!
//! # Module Structure
//!
//! - [`auth`] - bearer token credentials
//! - [`client`] - main client, one factory method per resource type
//! - [`http`] - transport verbs (read, list page, act/create, replace fields, delete)
//! - [`macros`] - endpoint placeholder resolution and query strings
//!
//! # Example
//!
//! ```no_run
//! use hcloud::api::client::Client;
//! use hcloud::Macros;
//! use serde_json::json;
//!
//! async fn example() -> hcloud::Result<()> {
//!     let client = Client::new("my-token")?;
//!     let ctx = json!({"id": 42});
//!     let server = client.get("servers/{id}", &Macros::from(&ctx), &Default::default()).await?;
//!     println!("{}", server["server"]["name"]);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod http;
pub mod macros;
