use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// A stored episode. Fields the server does not know about are kept in
/// `fields` and echoed back.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: String,
    pub podcast_id: String,
    pub title: String,
    pub pubdate: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

pub type Db = Arc<RwLock<Vec<Episode>>>;

#[derive(Clone)]
pub struct AppState {
    network_id: Arc<str>,
    token: Arc<str>,
    db: Db,
}

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message })))
}

/// Router serving the episode endpoints for a single network, guarded by
/// `Authorization: Token token="<token>"`.
pub fn app(network_id: &str, token: &str) -> Router {
    let state = AppState {
        network_id: network_id.into(),
        token: token.into(),
        db: Arc::new(RwLock::new(Vec::new())),
    };
    Router::new()
        .route(
            "/networks/{network}/podcasts/{podcast}/episodes",
            get(list_episodes).post(create_episode),
        )
        .route(
            "/networks/{network}/podcasts/{podcast}/episodes/{id}",
            get(show_episode).put(update_episode).delete(delete_episode),
        )
        .route("/search/episodes", get(search_episodes))
        .with_state(state)
}

pub async fn run(listener: TcpListener, network_id: &str, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(network_id, token)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> ApiResult<()> {
    let expected = format!("Token token=\"{}\"", state.token);
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(given) if given == expected => Ok(()),
        _ => Err(failure(StatusCode::UNAUTHORIZED, "invalid token")),
    }
}

fn check_network(state: &AppState, network: &str) -> ApiResult<()> {
    if network == &*state.network_id {
        Ok(())
    } else {
        Err(failure(StatusCode::NOT_FOUND, "network not found"))
    }
}

fn required_string(input: &mut Map<String, Value>, key: &str) -> Option<String> {
    match input.remove(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

async fn list_episodes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((network, podcast)): Path<(String, String)>,
) -> ApiResult<Json<Vec<Episode>>> {
    authorize(&state, &headers)?;
    check_network(&state, &network)?;
    let episodes = state.db.read().await;
    Ok(Json(
        episodes
            .iter()
            .filter(|e| e.podcast_id == podcast)
            .cloned()
            .collect(),
    ))
}

async fn create_episode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((network, podcast)): Path<(String, String)>,
    Json(mut input): Json<Map<String, Value>>,
) -> ApiResult<(StatusCode, Json<Episode>)> {
    authorize(&state, &headers)?;
    check_network(&state, &network)?;
    let title = required_string(&mut input, "title")
        .ok_or_else(|| failure(StatusCode::UNPROCESSABLE_ENTITY, "title is required"))?;
    let pubdate = required_string(&mut input, "pubdate")
        .ok_or_else(|| failure(StatusCode::UNPROCESSABLE_ENTITY, "pubdate is required"))?;
    input.remove("id");
    input.remove("podcastId");

    let episode = Episode {
        id: Uuid::new_v4().to_string(),
        podcast_id: podcast,
        title,
        pubdate,
        fields: input,
    };
    log::debug!("created episode {} in podcast {}", episode.id, episode.podcast_id);
    state.db.write().await.push(episode.clone());
    Ok((StatusCode::CREATED, Json(episode)))
}

async fn show_episode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((network, podcast, id)): Path<(String, String, String)>,
) -> ApiResult<Json<Episode>> {
    authorize(&state, &headers)?;
    check_network(&state, &network)?;
    let episodes = state.db.read().await;
    episodes
        .iter()
        .find(|e| e.podcast_id == podcast && e.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "episode not found"))
}

async fn update_episode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((network, podcast, id)): Path<(String, String, String)>,
    Json(input): Json<Map<String, Value>>,
) -> ApiResult<Json<Episode>> {
    authorize(&state, &headers)?;
    check_network(&state, &network)?;
    let mut episodes = state.db.write().await;
    let episode = episodes
        .iter_mut()
        .find(|e| e.podcast_id == podcast && e.id == id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "episode not found"))?;
    for (key, value) in input {
        match (key.as_str(), value) {
            ("id" | "podcastId", _) => {}
            ("title", Value::String(title)) => episode.title = title,
            ("pubdate", Value::String(pubdate)) => episode.pubdate = pubdate,
            (_, value) => {
                episode.fields.insert(key, value);
            }
        }
    }
    Ok(Json(episode.clone()))
}

async fn delete_episode(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((network, podcast, id)): Path<(String, String, String)>,
) -> ApiResult<Json<Value>> {
    authorize(&state, &headers)?;
    check_network(&state, &network)?;
    let mut episodes = state.db.write().await;
    let index = episodes
        .iter()
        .position(|e| e.podcast_id == podcast && e.id == id)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "episode not found"))?;
    episodes.remove(index);
    log::debug!("deleted episode {id} from podcast {podcast}");
    Ok(Json(json!({ "success": format!("Episode {id} deleted") })))
}

/// Filters by `podcastId`, `externalId` and a case-insensitive `title`
/// substring. Other parameters are accepted and ignored.
async fn search_episodes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<Episode>>> {
    authorize(&state, &headers)?;
    let title = params.get("title").map(|t| t.to_lowercase());
    let episodes = state.db.read().await;
    Ok(Json(
        episodes
            .iter()
            .filter(|e| params.get("podcastId").is_none_or(|p| &e.podcast_id == p))
            .filter(|e| {
                let external_id = e.fields.get("externalId").and_then(Value::as_str);
                params
                    .get("externalId")
                    .is_none_or(|x| external_id == Some(x.as_str()))
            })
            .filter(|e| {
                title
                    .as_ref()
                    .is_none_or(|t| e.title.to_lowercase().contains(t.as_str()))
            })
            .cloned()
            .collect(),
    ))
}
