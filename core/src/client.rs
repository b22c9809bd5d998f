//! Entry point that hands out episode resources.
//!
//! # Design
//! `MegaphoneClient` owns the [`Connection`] and lends it to every resource
//! it creates, so configuration is passed explicitly rather than looked up
//! from global state. Resources are cheap, borrow the client, and are meant
//! to be built per call:
//!
//! ```no_run
//! use megaphone_core::{Config, MegaphoneClient};
//!
//! let client = MegaphoneClient::new(Config::new("token", "network-id"));
//! let episode = client.podcast("12345").episode("56789").show()?;
//! # Ok::<(), megaphone_core::ApiError>(())
//! ```

use crate::collection::EpisodeCollection;
use crate::config::Config;
use crate::connection::Connection;
use crate::episode::Episode;
use crate::http::Transport;

#[derive(Debug, Clone)]
pub struct MegaphoneClient<T> {
    connection: Connection<T>,
}

#[cfg(feature = "ureq")]
impl MegaphoneClient<crate::transport::UreqTransport> {
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, crate::transport::UreqTransport::new())
    }
}

impl<T: Transport> MegaphoneClient<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        Self {
            connection: Connection::new(config, transport),
        }
    }

    pub fn config(&self) -> &Config {
        self.connection.config()
    }

    pub fn connection(&self) -> &Connection<T> {
        &self.connection
    }

    /// Scope subsequent calls to one podcast.
    pub fn podcast(&self, podcast_id: &str) -> PodcastScope<'_, T> {
        PodcastScope {
            connection: &self.connection,
            podcast_id: podcast_id.to_string(),
        }
    }

    /// An episode with optional ids, for callers that hold them loosely.
    pub fn episode(&self, podcast_id: Option<&str>, episode_id: Option<&str>) -> Episode<'_, T> {
        Episode::new(&self.connection, podcast_id, episode_id)
    }

    /// A collection bound to no podcast, for network-wide search.
    pub fn episodes(&self) -> EpisodeCollection<'_, T> {
        EpisodeCollection::new(&self.connection, None)
    }
}

/// Resources under a single podcast.
#[derive(Debug)]
pub struct PodcastScope<'c, T> {
    connection: &'c Connection<T>,
    podcast_id: String,
}

impl<'c, T: Transport> PodcastScope<'c, T> {
    pub fn podcast_id(&self) -> &str {
        &self.podcast_id
    }

    pub fn episode(&self, episode_id: &str) -> Episode<'c, T> {
        Episode::new(self.connection, Some(self.podcast_id.as_str()), Some(episode_id))
    }

    /// An episode without an id yet, the target of `create`.
    pub fn new_episode(&self) -> Episode<'c, T> {
        Episode::new(self.connection, Some(self.podcast_id.as_str()), None)
    }

    pub fn episodes(&self) -> EpisodeCollection<'c, T> {
        EpisodeCollection::new(self.connection, Some(self.podcast_id.as_str()))
    }
}
