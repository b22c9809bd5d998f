//! The episodes of a podcast, plus network-wide episode search.

use serde_json::Value;

use crate::connection::Connection;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, Transport};
use crate::types::SearchParams;
use crate::validate::require;

#[derive(Debug)]
pub struct EpisodeCollection<'c, T> {
    connection: &'c Connection<T>,
    podcast_id: Option<String>,
}

impl<'c, T: Transport> EpisodeCollection<'c, T> {
    pub fn new(connection: &'c Connection<T>, podcast_id: Option<&str>) -> Self {
        Self {
            connection,
            podcast_id: podcast_id.map(str::to_string),
        }
    }

    pub fn podcast_id(&self) -> Option<&str> {
        self.podcast_id.as_deref()
    }

    pub fn build_list(&self) -> Result<HttpRequest, ApiError> {
        let podcast_id = require(self.podcast_id(), "podcast_id")?;
        let url = format!(
            "{}/podcasts/{podcast_id}/episodes",
            self.connection.config().network_url()
        );
        Ok(HttpRequest::new(HttpMethod::Get, url))
    }

    /// Search is global and ignores this collection's podcast; filter with
    /// [`SearchParams::podcast_id`] instead.
    pub fn build_search(&self, params: &SearchParams) -> HttpRequest {
        let url = format!("{}/search/episodes", self.connection.config().api_base_url());
        let mut request = HttpRequest::new(HttpMethod::Get, url);
        request.query = params.to_query();
        request
    }

    /// List the podcast's episodes. Returns the JSON array as sent.
    pub fn list(&self) -> Result<Value, ApiError> {
        self.connection.execute(self.build_list()?)
    }

    /// Search episodes across the network. Empty params return the API's
    /// default result set.
    pub fn search(&self, params: &SearchParams) -> Result<Value, ApiError> {
        self.connection.execute(self.build_search(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::mock::RecordingTransport;
    use serde_json::json;

    fn connection(transport: &RecordingTransport) -> Connection<&RecordingTransport> {
        Connection::new(
            Config::new("secret", "net-1").with_api_base_url("http://localhost:3000"),
            transport,
        )
    }

    #[test]
    fn list_gets_podcast_episodes() {
        let transport = RecordingTransport::new();
        transport.push_response(200, r#"[{"id":"1"},{"id":"2"}]"#);
        let conn = connection(&transport);

        let episodes = EpisodeCollection::new(&conn, Some("12345")).list().unwrap();
        assert_eq!(episodes, json!([{"id": "1"}, {"id": "2"}]));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(
            requests[0].url,
            "http://localhost:3000/networks/net-1/podcasts/12345/episodes"
        );
        assert!(requests[0].query.is_empty());
    }

    #[test]
    fn list_without_podcast_sends_nothing() {
        let transport = RecordingTransport::new();
        let conn = connection(&transport);

        let err = EpisodeCollection::new(&conn, None).list().unwrap_err();
        assert!(matches!(err, ApiError::MissingRequiredParameter { field: "podcast_id" }));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn empty_search_sends_one_bare_get() {
        let transport = RecordingTransport::new();
        transport.push_response(200, r#"[{"id":"x","title":"default"}]"#);
        let conn = connection(&transport);

        let results = EpisodeCollection::new(&conn, None)
            .search(&SearchParams::default())
            .unwrap();
        assert_eq!(results, json!([{"id": "x", "title": "default"}]));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(requests[0].url, "http://localhost:3000/search/episodes");
        assert!(requests[0].query.is_empty());
        assert!(requests[0].body.is_none());
    }

    #[test]
    fn search_ignores_collection_podcast() {
        let transport = RecordingTransport::new();
        let conn = connection(&transport);

        let req = EpisodeCollection::new(&conn, Some("12345"))
            .build_search(&SearchParams::external_id("show_episode-12345"));
        assert_eq!(req.url, "http://localhost:3000/search/episodes");
        assert_eq!(
            req.query,
            vec![("externalId".to_string(), "show_episode-12345".to_string())]
        );
    }
}
