//! # DM Cloud client for Rust
//!
//! A thin binding for the DM Cloud media transcoding API. Every operation is
//! an RPC call of the form `{ "call": "media.info", "args": {...} }` posted to
//! a single endpoint.
//!
//! Calls come in two halves: the [`media`] module builds a
//! [`CallDescriptor`] without touching the network, and [`Client::send`]
//! posts it. [`Client::media`] does both in one step.
//!
//! ## Quick start
//!
//! ```no_run
//! use dmcloud::{Client, Config, Fields};
//!
//! #[tokio::main]
//! async fn main() -> dmcloud::Result<()> {
//!     let client = Client::new(Config::from_env())?;
//!
//!     let created = client
//!         .media()
//!         .create(Some("http://example.com/holiday.mov"), &["mp4_h264_aac".into()], &Default::default())
//!         .await?;
//!     let media_id = created["result"]["id"].as_str().unwrap_or_default();
//!
//!     let info = client
//!         .media()
//!         .info(media_id, None, &Fields::new().field("id").assets(["status"]))
//!         .await?;
//!     println!("{info}");
//!     Ok(())
//! }
//! ```
//!
//! ## Deferred calls
//!
//! ```
//! use dmcloud::media;
//!
//! let call = media::delete("4c922386dede830447000009")?;
//! assert_eq!(call.call, "media.delete");
//! # Ok::<(), dmcloud::DmCloudError>(())
//! ```

pub mod builder;
mod client;
mod config;
mod errors;
pub mod media;
mod models;

pub use client::{Client, ClientBuilder, MediaApi};
pub use config::{Config, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use errors::{DmCloudError, Result};
pub use models::{CallDescriptor, CallParams, Dispatched, Fields, ListOptions};
