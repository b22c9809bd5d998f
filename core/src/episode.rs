//! A single episode of a podcast.
//!
//! # Design
//! Like every resource, `Episode` is split into `build_*` methods that
//! validate identifiers and produce an [`HttpRequest`] without I/O, and
//! executing methods that pass that request to the [`Connection`]. A failed
//! precondition therefore never reaches the transport.

use serde_json::{Map, Value};

use crate::connection::Connection;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, Transport};
use crate::types::EpisodeOptions;
use crate::validate::require;

/// An episode addressed by `(podcast_id, episode_id)`.
///
/// Either id may be absent; operations that need it fail with
/// [`ApiError::MissingRequiredParameter`]. `create` only needs the podcast.
#[derive(Debug)]
pub struct Episode<'c, T> {
    connection: &'c Connection<T>,
    podcast_id: Option<String>,
    episode_id: Option<String>,
}

impl<'c, T: Transport> Episode<'c, T> {
    pub fn new(
        connection: &'c Connection<T>,
        podcast_id: Option<&str>,
        episode_id: Option<&str>,
    ) -> Self {
        Self {
            connection,
            podcast_id: podcast_id.map(str::to_string),
            episode_id: episode_id.map(str::to_string),
        }
    }

    pub fn podcast_id(&self) -> Option<&str> {
        self.podcast_id.as_deref()
    }

    pub fn episode_id(&self) -> Option<&str> {
        self.episode_id.as_deref()
    }

    fn collection_url(&self) -> Result<String, ApiError> {
        let podcast_id = require(self.podcast_id(), "podcast_id")?;
        Ok(format!(
            "{}/podcasts/{podcast_id}/episodes",
            self.connection.config().network_url()
        ))
    }

    fn member_url(&self) -> Result<String, ApiError> {
        let collection = self.collection_url()?;
        let episode_id = require(self.episode_id(), "episode_id")?;
        Ok(format!("{collection}/{episode_id}"))
    }

    /// `POST .../podcasts/{podcast_id}/episodes`. Requires `title` and `pubdate`.
    pub fn build_create(&self, options: &EpisodeOptions) -> Result<HttpRequest, ApiError> {
        let url = self.collection_url()?;
        let body = body_of(options)?;
        require(body.get("title").and_then(Value::as_str), "title")?;
        require(body.get("pubdate").and_then(Value::as_str), "pubdate")?;
        with_body(HttpRequest::new(HttpMethod::Post, url), &body)
    }

    pub fn build_show(&self) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::new(HttpMethod::Get, self.member_url()?))
    }

    pub fn build_update(&self, options: &EpisodeOptions) -> Result<HttpRequest, ApiError> {
        let url = self.member_url()?;
        with_body(HttpRequest::new(HttpMethod::Put, url), &body_of(options)?)
    }

    pub fn build_delete(&self) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::new(HttpMethod::Delete, self.member_url()?))
    }

    /// Create an episode under this podcast and return the created record.
    pub fn create(&self, options: &EpisodeOptions) -> Result<Value, ApiError> {
        self.connection.execute(self.build_create(options)?)
    }

    /// Fetch this episode.
    pub fn show(&self) -> Result<Value, ApiError> {
        self.connection.execute(self.build_show()?)
    }

    /// Apply the set fields of `options` and return the updated record.
    pub fn update(&self, options: &EpisodeOptions) -> Result<Value, ApiError> {
        self.connection.execute(self.build_update(options)?)
    }

    /// Delete this episode. The server answers with a status message.
    pub fn delete(&self) -> Result<Value, ApiError> {
        self.connection.execute(self.build_delete()?)
    }
}

fn body_of(options: &EpisodeOptions) -> Result<Map<String, Value>, ApiError> {
    options
        .to_body()
        .map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn with_body(mut request: HttpRequest, body: &Map<String, Value>) -> Result<HttpRequest, ApiError> {
    let body =
        serde_json::to_string(body).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    request.body = Some(body);
    Ok(request)
}
