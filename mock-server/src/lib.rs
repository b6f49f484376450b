use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Deserializer, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "changeme";

/// The exact `Authorization` value the server accepts.
pub fn auth_header_value() -> String {
    format!(
        "Basic {}",
        general_purpose::STANDARD.encode(format!("{USERNAME}:{PASSWORD}"))
    )
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Host {
    pub id: u64,
    pub name: String,
    pub comment: Option<String>,
    pub host_group_id: Option<u64>,
    pub managed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HostGroup {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateHost {
    pub name: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub host_group_id: Option<u64>,
    #[serde(default)]
    pub managed: bool,
}

#[derive(Deserialize)]
pub struct UpdateHost {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub comment: Option<Option<String>>,
    pub managed: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateHostGroup {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateHostGroup {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
}

/// Distinguishes an absent field from an explicit `null`: an absent field
/// leaves the outer `Option` at `None`, while `null` becomes `Some(None)`.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Default)]
pub struct Store {
    hosts: HashMap<u64, Host>,
    groups: HashMap<u64, HostGroup>,
    next_id: u64,
}

impl Store {
    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type SharedStore = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let store: SharedStore = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/status", get(status))
        .route("/api/hosts", get(list_hosts).post(create_host))
        .route(
            "/api/hosts/{id}",
            get(get_host).put(update_host).delete(delete_host),
        )
        .route("/api/host_groups", get(list_groups).post(create_group))
        .route(
            "/api/host_groups/{id}",
            get(get_group).put(update_group).delete(delete_group),
        )
        .route(
            "/api/host_groups/{id}/hosts",
            get(list_group_hosts).post(create_group_host),
        )
        .layer(middleware::from_fn(require_basic_auth))
        .with_state(store)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_basic_auth(request: Request, next: Next) -> Result<Response, StatusCode> {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(|value| value == auth_header_value())
        .unwrap_or(false);
    if authorized {
        Ok(next.run(request).await)
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn status() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn list_hosts(State(store): State<SharedStore>) -> Json<Vec<Host>> {
    let store = store.read().await;
    let mut hosts: Vec<Host> = store.hosts.values().cloned().collect();
    hosts.sort_by_key(|host| host.id);
    Json(hosts)
}

async fn create_host(
    State(store): State<SharedStore>,
    Json(input): Json<CreateHost>,
) -> (StatusCode, Json<Host>) {
    let mut store = store.write().await;
    let host = Host {
        id: store.allocate(),
        name: input.name,
        comment: input.comment,
        host_group_id: input.host_group_id,
        managed: input.managed,
    };
    store.hosts.insert(host.id, host.clone());
    (StatusCode::CREATED, Json(host))
}

async fn get_host(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
) -> Result<Json<Host>, StatusCode> {
    let store = store.read().await;
    store.hosts.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_host(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateHost>,
) -> Result<Json<Host>, StatusCode> {
    let mut store = store.write().await;
    let host = store.hosts.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        host.name = name;
    }
    if let Some(comment) = input.comment {
        host.comment = comment;
    }
    if let Some(managed) = input.managed {
        host.managed = managed;
    }
    Ok(Json(host.clone()))
}

async fn delete_host(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = store.write().await;
    store.hosts.remove(&id).map(|_| StatusCode::NO_CONTENT).ok_or(StatusCode::NOT_FOUND)
}

async fn list_groups(State(store): State<SharedStore>) -> Json<Vec<HostGroup>> {
    let store = store.read().await;
    let mut groups: Vec<HostGroup> = store.groups.values().cloned().collect();
    groups.sort_by_key(|group| group.id);
    Json(groups)
}

async fn create_group(
    State(store): State<SharedStore>,
    Json(input): Json<CreateHostGroup>,
) -> (StatusCode, Json<HostGroup>) {
    let mut store = store.write().await;
    let group = HostGroup {
        id: store.allocate(),
        name: input.name,
        description: input.description,
    };
    store.groups.insert(group.id, group.clone());
    (StatusCode::CREATED, Json(group))
}

async fn get_group(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
) -> Result<Json<HostGroup>, StatusCode> {
    let store = store.read().await;
    store.groups.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_group(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateHostGroup>,
) -> Result<Json<HostGroup>, StatusCode> {
    let mut store = store.write().await;
    let group = store.groups.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        group.name = name;
    }
    if let Some(description) = input.description {
        group.description = description;
    }
    Ok(Json(group.clone()))
}

async fn delete_group(
    State(store): State<SharedStore>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = store.write().await;
    if store.groups.remove(&id).is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    // Members survive their group; they just become ungrouped.
    for host in store.hosts.values_mut() {
        if host.host_group_id == Some(id) {
            host.host_group_id = None;
        }
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_group_hosts(
    State(store): State<SharedStore>,
    Path(group_id): Path<u64>,
) -> Result<Json<Vec<Host>>, StatusCode> {
    let store = store.read().await;
    if !store.groups.contains_key(&group_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let mut hosts: Vec<Host> = store
        .hosts
        .values()
        .filter(|host| host.host_group_id == Some(group_id))
        .cloned()
        .collect();
    hosts.sort_by_key(|host| host.id);
    Ok(Json(hosts))
}

async fn create_group_host(
    State(store): State<SharedStore>,
    Path(group_id): Path<u64>,
    Json(input): Json<CreateHost>,
) -> Result<(StatusCode, Json<Host>), StatusCode> {
    let mut store = store.write().await;
    if !store.groups.contains_key(&group_id) {
        return Err(StatusCode::NOT_FOUND);
    }
    // The path names the group; a group id in the body is ignored.
    let host = Host {
        id: store.allocate(),
        name: input.name,
        comment: input.comment,
        host_group_id: Some(group_id),
        managed: input.managed,
    };
    store.hosts.insert(host.id, host.clone());
    Ok((StatusCode::CREATED, Json(host)))
}
