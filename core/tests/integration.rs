//! Full episode lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every resource
//! operation over real HTTP through `UreqTransport`. Validates that request
//! shaping, the token header and response parsing work end to end.

use std::net::SocketAddr;

use megaphone_core::{ApiError, Config, EpisodeOptions, MegaphoneClient, SearchParams};

const NETWORK: &str = "net-1";
const TOKEN: &str = "secret";

/// Start the mock server on its own runtime thread and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, NETWORK, TOKEN).await
        })
        .unwrap();
    });

    addr
}

fn client(addr: SocketAddr, token: &str) -> MegaphoneClient<megaphone_core::UreqTransport> {
    MegaphoneClient::new(Config::new(token, NETWORK).with_api_base_url(&format!("http://{addr}")))
}

#[test]
fn episode_lifecycle() {
    let addr = start_server();
    let client = client(addr, TOKEN);
    let podcast = client.podcast("12345");

    // Step 1: list: should be empty.
    let episodes = podcast.episodes().list().unwrap();
    assert_eq!(episodes, serde_json::json!([]));

    // Step 2: create an episode with a pass-through field.
    let options = EpisodeOptions {
        external_id: Some("show_episode-12345".to_string()),
        ..EpisodeOptions::new("Integration test", "2020-06-01T14:54:02.690Z")
    }
    .with_extra("customField", "kept");
    let created = podcast.new_episode().create(&options).unwrap();
    assert_eq!(created["title"], "Integration test");
    assert_eq!(created["podcastId"], "12345");
    assert_eq!(created["customField"], "kept");
    let id = created["id"].as_str().unwrap().to_string();

    // Step 3: show it: the body comes back verbatim.
    let shown = podcast.episode(&id).show().unwrap();
    assert_eq!(shown, created);

    // Step 4: update preCount only.
    let update = EpisodeOptions {
        pre_count: Some(2),
        ..EpisodeOptions::default()
    };
    let updated = podcast.episode(&id).update(&update).unwrap();
    assert_eq!(updated["preCount"], 2);
    assert_eq!(updated["title"], "Integration test");

    // Step 5: list: one episode.
    let episodes = podcast.episodes().list().unwrap();
    assert_eq!(episodes.as_array().unwrap().len(), 1);

    // Step 6: search by external id, then with no params at all.
    let found = client
        .episodes()
        .search(&SearchParams::external_id("show_episode-12345"))
        .unwrap();
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["id"], id.as_str());
    let everything = client.episodes().search(&SearchParams::default()).unwrap();
    assert_eq!(everything.as_array().unwrap().len(), 1);

    // Step 7: delete.
    let deleted = podcast.episode(&id).delete().unwrap();
    assert!(deleted["success"].is_string());

    // Step 8: show after delete: NotFound.
    let err = podcast.episode(&id).show().unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 9: delete again: NotFound.
    let err = podcast.episode(&id).delete().unwrap_err();
    assert!(matches!(err, ApiError::NotFound));

    // Step 10: list: empty again.
    let episodes = podcast.episodes().list().unwrap();
    assert_eq!(episodes, serde_json::json!([]));
}

#[test]
fn wrong_token_is_unauthorized() {
    let addr = start_server();
    let err = client(addr, "wrong")
        .podcast("12345")
        .episodes()
        .list()
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { status: 401, .. }));
}

#[test]
fn update_unknown_episode_is_not_found() {
    let addr = start_server();
    let client = client(addr, TOKEN);

    let err = client
        .podcast("12345")
        .episode("missing")
        .update(&EpisodeOptions::default())
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(addr, TOKEN).episodes().search(&SearchParams::default()).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
