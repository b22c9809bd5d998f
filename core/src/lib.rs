//! Blocking client for the episode endpoints of the Megaphone API.
//!
//! # Overview
//! [`Episode`] wraps create/show/update/delete of a single episode and
//! [`EpisodeCollection`] wraps listing a podcast's episodes and searching
//! across the network. Each operation checks its required identifiers, builds
//! one [`HttpRequest`], and hands it to the shared [`Connection`], which adds
//! the token header, executes it through a [`Transport`] and returns the
//! parsed JSON body as a `serde_json::Value`.
//!
//! # Design
//! - Resources are stateless: they hold their ids and a borrowed connection,
//!   never a cached response.
//! - Every operation has a pure `build_*` twin, so request shaping is testable
//!   without a network.
//! - The `ureq` feature (on by default) provides [`UreqTransport`]; without it
//!   the crate performs no I/O of its own.

pub mod client;
pub mod collection;
pub mod config;
pub mod connection;
pub mod episode;
pub mod error;
pub mod http;
#[cfg(feature = "ureq")]
pub mod transport;
pub mod types;
mod validate;

#[cfg(test)]
mod mock;

pub use client::{MegaphoneClient, PodcastScope};
pub use collection::EpisodeCollection;
pub use config::Config;
pub use connection::Connection;
pub use episode::Episode;
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{EpisodeOptions, SearchParams};
