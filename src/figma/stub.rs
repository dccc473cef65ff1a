// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Figlens-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Figlens and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-process stand-in for the Figma REST API, served by axum on an ephemeral port.

use std::collections::HashMap;
use std::path::{Path as FsPath, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use super::{FigmaAuth, FigmaClient};

pub(crate) const STUB_TOKEN: &str = "figd_stub-token";
pub(crate) const CARD_FILE_KEY: &str = "CardFile42";
pub(crate) const CARD_FILE_JSON: &str = include_str!("../../tests/fixtures/card_file.json");

#[derive(Clone)]
struct StubState {
    origin: String,
    document: Arc<Value>,
    requests: Arc<Mutex<Vec<String>>>,
}

pub(crate) struct StubFigma {
    origin: String,
    requests: Arc<Mutex<Vec<String>>>,
    server: tokio::task::JoinHandle<()>,
}

impl StubFigma {
    pub(crate) async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.expect("bind stub");
        let origin = format!("http://{}", listener.local_addr().expect("stub addr"));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            origin: origin.clone(),
            document: Arc::new(serde_json::from_str(CARD_FILE_JSON).expect("card fixture")),
            requests: requests.clone(),
        };

        let router = Router::new()
            .route("/v1/files/{key}", get(file))
            .route("/v1/files/{key}/nodes", get(file_nodes))
            .route("/v1/files/{key}/images", get(image_fills))
            .route("/v1/images/{key}", get(renders))
            .route("/assets/{name}", get(asset))
            .with_state(state);
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self {
            origin,
            requests,
            server,
        }
    }

    pub(crate) fn base_url(&self) -> String {
        format!("{}/v1", self.origin)
    }

    pub(crate) fn asset_url(&self, name: &str) -> String {
        format!("{}/assets/{name}", self.origin)
    }

    pub(crate) fn client(&self) -> FigmaClient {
        self.client_with(FigmaAuth::ApiKey(STUB_TOKEN.to_owned()))
    }

    pub(crate) fn client_with(&self, auth: FigmaAuth) -> FigmaClient {
        FigmaClient::new(auth).expect("http client").with_base_url(self.base_url())
    }

    /// Paths (with query strings) of every request served so far.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Drop for StubFigma {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn record(state: &StubState, path: String, query: &HashMap<String, String>) {
    let mut pairs = query.iter().map(|(k, v)| format!("{k}={v}")).collect::<Vec<_>>();
    pairs.sort();
    let line = if pairs.is_empty() { path } else { format!("{path}?{}", pairs.join("&")) };
    state.requests.lock().expect("requests lock").push(line);
}

fn authorized(headers: &HeaderMap) -> bool {
    let token = headers.get("x-figma-token").and_then(|v| v.to_str().ok());
    let bearer = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    token == Some(STUB_TOKEN) || bearer == Some(STUB_TOKEN)
}

fn guard(key: &str, headers: &HeaderMap) -> Option<Response> {
    if !authorized(headers) {
        return Some(
            (StatusCode::FORBIDDEN, Json(json!({"status": 403, "err": "Invalid token"})))
                .into_response(),
        );
    }
    match key {
        CARD_FILE_KEY => None,
        "RateLimited" => Some(
            (StatusCode::TOO_MANY_REQUESTS, Json(json!({"status": 429, "err": "Rate limit"})))
                .into_response(),
        ),
        _ => Some(
            (StatusCode::NOT_FOUND, Json(json!({"status": 404, "err": "Not found"})))
                .into_response(),
        ),
    }
}

fn find_node<'a>(root: &'a Value, id: &str) -> Option<&'a Value> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.get("id").and_then(Value::as_str) == Some(id) {
            return Some(node);
        }
        if let Some(children) = node.get("children").and_then(Value::as_array) {
            stack.extend(children.iter().rev());
        }
    }
    None
}

async fn file(
    State(state): State<StubState>,
    Path(key): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&state, format!("/v1/files/{key}"), &query);
    if let Some(rejection) = guard(&key, &headers) {
        return rejection;
    }
    Json(state.document.as_ref().clone()).into_response()
}

async fn file_nodes(
    State(state): State<StubState>,
    Path(key): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&state, format!("/v1/files/{key}/nodes"), &query);
    if let Some(rejection) = guard(&key, &headers) {
        return rejection;
    }
    let mut nodes = serde_json::Map::new();
    for id in query.get("ids").map(String::as_str).unwrap_or_default().split(',') {
        let entry = match find_node(&state.document["document"], id) {
            Some(node) => json!({
                "document": node,
                "components": state.document["components"],
                "componentSets": {},
                "styles": {}
            }),
            None => Value::Null,
        };
        nodes.insert(id.to_owned(), entry);
    }
    Json(json!({
        "name": state.document["name"],
        "lastModified": state.document["lastModified"],
        "thumbnailUrl": state.document["thumbnailUrl"],
        "version": state.document["version"],
        "nodes": nodes
    }))
    .into_response()
}

async fn renders(
    State(state): State<StubState>,
    Path(key): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&state, format!("/v1/images/{key}"), &query);
    if let Some(rejection) = guard(&key, &headers) {
        return rejection;
    }
    let format = query.get("format").map(String::as_str).unwrap_or("png");
    let mut images = serde_json::Map::new();
    for id in query.get("ids").map(String::as_str).unwrap_or_default().split(',') {
        let url = match find_node(&state.document["document"], id) {
            Some(_) => {
                let name = format!("render-{}.{format}", id.replace(':', "_"));
                json!(format!("{}/assets/{name}", state.origin))
            }
            None => Value::Null,
        };
        images.insert(id.to_owned(), url);
    }
    Json(json!({"err": null, "images": images})).into_response()
}

async fn image_fills(
    State(state): State<StubState>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Response {
    record(&state, format!("/v1/files/{key}/images"), &HashMap::new());
    if let Some(rejection) = guard(&key, &headers) {
        return rejection;
    }
    Json(json!({
        "error": false,
        "status": 200,
        "meta": {"images": {"img-ref-1": format!("{}/assets/fill-img-ref-1.png", state.origin)}}
    }))
    .into_response()
}

async fn asset(State(state): State<StubState>, Path(name): Path<String>) -> Response {
    record(&state, format!("/assets/{name}"), &HashMap::new());
    format!("asset:{name}").into_response()
}

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Scratch directory removed on drop.
pub(crate) struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub(crate) fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = std::env::temp_dir();
        path.push(format!("figlens-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).expect("create temp dir");
        Self { path }
    }

    pub(crate) fn path(&self) -> &FsPath {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
