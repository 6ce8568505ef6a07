//! Rust client for the Quobyte storage management JSON-RPC API
//!
//! Management operations (volume, tenant, device, quota administration)
//! are invoked over JSON-RPC 2.0 on HTTP. The client authenticates with
//! basic credentials once, then reuses the server-issued session cookie
//! across any number of concurrent callers; a session invalidated on the
//! server side is re-established transparently with a single retry.
//!
//! Volume and tenant arguments may be human-readable names or canonical
//! UUIDs; names are resolved on demand, canonical identifiers pass through
//! without a network call.
//!
//! # Example
//!
//! ```rust,no_run
//! use quobyte_api::{CreateVolumeRequest, QuobyteClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = QuobyteClient::new("http://apiserver:7860", "admin", "secret")?;
//!
//! let volume_uuid = client
//!     .create_volume(&CreateVolumeRequest {
//!         name: "testVolume".into(),
//!         root_user_id: "root".into(),
//!         root_group_id: "root".into(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! client.set_volume_quota(&volume_uuid, 50 * 1024 * 1024).await?;
//! client.delete_volume_by_resolving_names_to_uuid("testVolume", "My Tenant").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
mod rpc;
mod session;
pub mod types;

// Re-export main types
pub use client::{is_canonical_id, QuobyteClient};
pub use error::{ApiError, Result};
pub use types::*;
