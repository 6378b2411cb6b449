#![deny(clippy::all, clippy::pedantic)]
#![deny(missing_docs)]
#![allow(clippy::must_use_candidate)]
//! # pbapi2
//!
//! pbapi2 is a thin wrapper library around the Pinboard v2 API.
//!
//! This library can read and modify:
//! - bookmarks ([`bookmark`])
//! - tags ([`tag`])
//! - notes ([`note`])
//!
//! Every method maps to one endpoint and sends exactly one request. Replies
//! come back as the JSON object Pinboard returned ([`Reply`]); failures are
//! classified by status code into [`Error`].
//!
//! Nothing is rate-limited, cached or retried on the caller's behalf.
//!
//! ## Example: checking credentials
//!
//! ```no_run
//! # type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
//! use pbapi2::{Client, Error};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = Client::builder("user:0123456789ABCDEF")
//!         .test_mode(true)
//!         .build()?;
//!
//!     match client.hello().await {
//!         Ok(reply) => println!("hello: {reply:?}"),
//!         Err(Error::Unauthorized(body)) => eprintln!("bad token: {body}"),
//!         Err(e) => return Err(e.into()),
//!     }
//!     Ok(())
//! }
//! ```

/// Client module contains [`Client`] and the request dispatch shared by every endpoint.
pub mod client;

/// Settings for building a [`Client`].
pub mod config;

/// Contains [`Error`]s that can be returned by the library.
///
/// [`Error`]: crate::error::Error
pub mod error;

pub(crate) mod models;

pub(crate) mod result;

pub use client::{Client, Reply};
pub use config::{AuthScheme, ClientBuilder};
pub use error::Error;
pub use models::*;
pub use result::Result;
