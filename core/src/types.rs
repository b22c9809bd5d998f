//! Typed request parameters for the episode endpoints.
//!
//! # Design
//! Megaphone accepts many more episode fields than are named here. The named
//! fields cover the common ones; anything else goes into `extra` and is
//! forwarded untouched, so the remote API stays the judge of what is valid.
//! Responses are not modeled and come back as `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body for creating or updating an episode. Omitted fields are not sent,
/// so an update only touches what is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// ISO 8601 publish timestamp, e.g. `2020-06-01T14:54:02.690Z`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pubdate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_audio_file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insertion_points: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    /// `full`, `trailer` or `bonus`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_number: Option<u32>,
    /// Fields not named above, sent as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EpisodeOptions {
    /// Options carrying the two fields `create` requires.
    pub fn new(title: impl Into<String>, pubdate: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            pubdate: Some(pubdate.into()),
            ..Self::default()
        }
    }

    /// Add a field that has no named counterpart.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// The JSON object sent as the request body. Each key appears once; a
    /// set named field wins over an `extra` entry with the same wire name.
    pub fn to_body(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let named = Self {
            extra: Map::new(),
            ..self.clone()
        };
        let mut body = match serde_json::to_value(named)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in &self.extra {
            body.entry(key.clone()).or_insert_with(|| value.clone());
        }
        Ok(body)
    }
}

/// Query for `GET /search/episodes`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub podcast_id: Option<String>,
    pub external_id: Option<String>,
    pub title: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// Additional pairs, sent in insertion order after the named fields.
    pub extra: Vec<(String, String)>,
}

impl SearchParams {
    pub fn external_id(id: impl Into<String>) -> Self {
        Self {
            external_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Render as query pairs using Megaphone's camelCase names.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let named = [
            ("podcastId", self.podcast_id.clone()),
            ("externalId", self.external_id.clone()),
            ("title", self.title.clone()),
            ("page", self.page.map(|p| p.to_string())),
            ("perPage", self.per_page.map(|p| p.to_string())),
        ];
        named
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k.to_string(), v)))
            .chain(self.extra.iter().cloned())
            .collect()
    }
}
