//! Shared test helpers for integration tests.
//!
//! [`MockCloud`] serves the cloud-storage REST surface from memory on an
//! ephemeral port; [`TestPanel`] wires a real `HttpCloudApi` to it.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use axum::extract::{Multipart, Path, Query, Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::Json;
use serde_json::{Value, json};
use tempfile::TempDir;

use cloudpanel_client::HttpCloudApi;
use cloudpanel_core::config::display::DisplayConfig;
use cloudpanel_core::config::server::ServerConfig;
use cloudpanel_service::{CloudPanel, DirectorySink, PanelContext};
use cloudpanel_view::{MemoryView, ScriptedDialogs};

/// Token embedded in the mock's `/cloud` page.
pub const CSRF_TOKEN: &str = "test-csrf-token";

const GIB: u64 = 1024 * 1024 * 1024;

/// A file held by the mock server.
#[derive(Debug, Clone)]
pub struct MockFile {
    pub id: i64,
    pub filename: String,
    pub mime: String,
    pub content: Vec<u8>,
    /// Reported size, independent of `content`.
    pub size: u64,
    /// Emit `file_name`/`file_size`/`file_type` instead of the primary keys.
    pub legacy: bool,
}

impl MockFile {
    fn to_json(&self) -> Value {
        if self.legacy {
            json!({
                "file_id": self.id,
                "file_name": self.filename,
                "file_size": self.size,
                "file_type": self.mime,
            })
        } else {
            json!({
                "id": self.id,
                "filename": self.filename,
                "size": self.size,
                "type": self.mime,
                "uploaded_at": "2024-05-01T10:00:00Z",
            })
        }
    }
}

/// Server-side state of the mock.
#[derive(Debug, Default)]
pub struct MockState {
    pub files: Vec<MockFile>,
    pub shares: Vec<Value>,
    pub users: Vec<Value>,
    pub code_documents: BTreeMap<String, (String, String)>,
    pub shared_out: Vec<(i64, Vec<i64>)>,
    pub blocked_deletes: HashSet<i64>,
    pub failures: HashSet<String>,
    pub requests: Vec<String>,
    pub serve_token: bool,
    next_id: i64,
}

impl MockState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type Shared = Arc<Mutex<MockState>>;

fn lock(state: &Shared) -> MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn check_csrf(headers: &HeaderMap) -> Result<(), Response> {
    match headers.get("X-CSRFToken").and_then(|v| v.to_str().ok()) {
        Some(CSRF_TOKEN) => Ok(()),
        _ => Err(error(StatusCode::FORBIDDEN, "CSRF token missing or invalid")),
    }
}

/// Log every request and answer 500 for routes marked as failing.
async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let key = format!("{} {}", request.method(), request.uri().path());
    let failing = {
        let mut state = lock(&state);
        state.requests.push(key.clone());
        state.failures.contains(&key)
    };
    if failing {
        return error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    }
    next.run(request).await
}

async fn cloud_page(State(state): State<Shared>) -> Html<String> {
    let meta = if lock(&state).serve_token {
        format!(r#"<meta content="{CSRF_TOKEN}" name="csrf-token">"#)
    } else {
        String::new()
    };
    Html(format!("<html><head>{meta}<title>Cloud</title></head><body></body></html>"))
}

async fn list_files(State(state): State<Shared>) -> Json<Value> {
    let state = lock(&state);
    Json(Value::Array(state.files.iter().map(MockFile::to_json).collect()))
}

async fn storage_info(State(state): State<Shared>) -> Json<Value> {
    let state = lock(&state);
    let used: u64 = state.files.iter().map(|f| f.size).sum();
    let total = 5 * GIB;
    Json(json!({
        "used_storage": used,
        "total_storage": total,
        "percent_used": (used as f64 / total as f64 * 10000.0).round() / 100.0,
        "total_files": state.files.len(),
    }))
}

async fn upload(State(state): State<Shared>, mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let mime = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let Ok(content) = field.bytes().await else {
            return error(StatusCode::BAD_REQUEST, "Could not read upload");
        };
        if filename.ends_with(".exe") {
            return error(StatusCode::BAD_REQUEST, "File type not allowed");
        }

        let mut state = lock(&state);
        let id = state.next_id();
        state.files.push(MockFile {
            id,
            filename: filename.clone(),
            mime,
            size: content.len() as u64,
            content: content.to_vec(),
            legacy: false,
        });
        return Json(json!({
            "id": id,
            "filename": filename,
            "message": "File uploaded successfully",
        }))
        .into_response();
    }
    error(StatusCode::BAD_REQUEST, "No file part")
}

async fn delete_file(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(rejection) = check_csrf(&headers) {
        return rejection;
    }
    let mut state = lock(&state);
    if state.blocked_deletes.contains(&id) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "File has active shares", "active_shares": true })),
        )
            .into_response();
    }
    let before = state.files.len();
    state.files.retain(|f| f.id != id);
    if state.files.len() == before {
        return error(StatusCode::NOT_FOUND, "File not found");
    }
    Json(json!({ "message": "File deleted successfully" })).into_response()
}

async fn download_file(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let state = lock(&state);
    let Some(file) = state.files.iter().find(|f| f.id == id) else {
        return error(StatusCode::NOT_FOUND, "File not found");
    };
    let disposition = format!("attachment; filename=\"{}\"", file.filename);
    let mut response = file.content.clone().into_response();
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
    }
    response
}

async fn search_users(
    State(state): State<Shared>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Json<Value> {
    let query = params.get("query").cloned().unwrap_or_default().to_lowercase();
    let state = lock(&state);
    let matches = state
        .users
        .iter()
        .filter(|u| {
            ["username", "email"].iter().any(|key| {
                u.get(*key)
                    .and_then(Value::as_str)
                    .is_some_and(|v| v.to_lowercase().contains(&query))
            })
        })
        .cloned()
        .collect();
    Json(Value::Array(matches))
}

async fn share_file(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = check_csrf(&headers) {
        return rejection;
    }
    let recipients: Vec<i64> = body
        .get("recipient_ids")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default();
    if recipients.is_empty() {
        return error(StatusCode::BAD_REQUEST, "No recipients given");
    }

    let mut state = lock(&state);
    if !state.files.iter().any(|f| f.id == id) {
        return error(StatusCode::NOT_FOUND, "File not found");
    }
    let mut created = Vec::new();
    for recipient in &recipients {
        created.push(json!({
            "id": state.next_id(),
            "original_file_id": id,
            "recipient_id": recipient,
            "status": "pending",
        }));
    }
    state.shared_out.push((id, recipients.clone()));
    Json(json!({
        "message": format!("File shared with {} user(s)", recipients.len()),
        "shared_files": created,
    }))
    .into_response()
}

async fn list_shared(State(state): State<Shared>) -> Json<Value> {
    Json(Value::Array(lock(&state).shares.clone()))
}

fn take_share(state: &mut MockState, id: i64) -> Option<Value> {
    let pos = state
        .shares
        .iter()
        .position(|s| s.get("id").and_then(Value::as_i64) == Some(id))?;
    Some(state.shares.remove(pos))
}

async fn accept_share(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(rejection) = check_csrf(&headers) {
        return rejection;
    }
    let mut state = lock(&state);
    let Some(share) = take_share(&mut state, id) else {
        return error(StatusCode::NOT_FOUND, "Shared file not found");
    };
    let file_id = state.next_id();
    state.files.push(MockFile {
        id: file_id,
        filename: share
            .get("file_name")
            .and_then(Value::as_str)
            .unwrap_or("shared")
            .to_string(),
        mime: "text/plain".into(),
        content: b"shared content".to_vec(),
        size: 14,
        legacy: false,
    });
    Json(json!({ "message": "File accepted successfully" })).into_response()
}

async fn reject_share(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    if let Err(rejection) = check_csrf(&headers) {
        return rejection;
    }
    match take_share(&mut lock(&state), id) {
        Some(_) => Json(json!({ "message": "File share rejected" })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Shared file not found"),
    }
}

async fn code_list(State(state): State<Shared>) -> Json<Value> {
    Json(json!(lock(&state).code_documents.keys().cloned().collect::<Vec<_>>()))
}

async fn code_load(State(state): State<Shared>, Path(name): Path<String>) -> Response {
    match lock(&state).code_documents.get(&name) {
        Some((content, language)) => Json(json!({
            "filename": name,
            "content": content,
            "language": language,
        }))
        .into_response(),
        None => error(StatusCode::NOT_FOUND, "File not found"),
    }
}

fn document_fields(body: &Value) -> (String, String, String) {
    let field = |key: &str| {
        body.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    (field("filename"), field("content"), field("language"))
}

async fn code_save(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(rejection) = check_csrf(&headers) {
        return rejection;
    }
    let (filename, content, language) = document_fields(&body);
    if filename.contains("..") {
        return Json(json!({ "success": false, "error": "Invalid filename" })).into_response();
    }
    lock(&state)
        .code_documents
        .insert(filename, (content, language));
    Json(json!({ "success": true, "message": "File saved successfully" })).into_response()
}

async fn code_delete(State(state): State<Shared>, headers: HeaderMap, Path(name): Path<String>) -> Response {
    if let Err(rejection) = check_csrf(&headers) {
        return rejection;
    }
    match lock(&state).code_documents.remove(&name) {
        Some(_) => Json(json!({ "success": true, "message": "File deleted successfully" })),
        None => Json(json!({ "success": false, "error": "File not found" })),
    }
    .into_response()
}

async fn cloud_content(
    State(state): State<Shared>,
    Query(params): Query<BTreeMap<String, String>>,
) -> Response {
    let name = params.get("filename").cloned().unwrap_or_default();
    let state = lock(&state);
    match state.files.iter().find(|f| f.filename == name) {
        Some(file) => Json(json!({
            "content": String::from_utf8_lossy(&file.content),
            "file_type": name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("txt"),
        }))
        .into_response(),
        None => error(StatusCode::NOT_FOUND, "File not found"),
    }
}

async fn cloud_save(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(rejection) = check_csrf(&headers) {
        return rejection;
    }
    let (filename, content, _) = document_fields(&body);
    let mut state = lock(&state);
    match state.files.iter_mut().find(|f| f.filename == filename) {
        Some(file) => {
            file.size = content.len() as u64;
            file.content = content.into_bytes();
        }
        None => {
            let id = state.next_id();
            state.files.push(MockFile {
                id,
                filename,
                mime: "text/plain".into(),
                size: content.len() as u64,
                content: content.into_bytes(),
                legacy: false,
            });
        }
    }
    Json(json!({ "success": true, "message": "File saved successfully" })).into_response()
}

async fn cloud_delete(State(state): State<Shared>, headers: HeaderMap, Path(name): Path<String>) -> Response {
    if let Err(rejection) = check_csrf(&headers) {
        return rejection;
    }
    let mut state = lock(&state);
    let before = state.files.len();
    state.files.retain(|f| f.filename != name);
    if state.files.len() == before {
        return Json(json!({ "success": false, "error": "File not found" })).into_response();
    }
    Json(json!({ "success": true, "message": "File deleted successfully" })).into_response()
}

/// In-memory cloud-storage server.
pub struct MockCloud {
    pub state: Shared,
    pub base_url: String,
}

impl MockCloud {
    /// Start the server on an ephemeral port.
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            serve_token: true,
            ..Default::default()
        }));

        let app = Router::new()
            .route("/cloud", get(cloud_page))
            .route("/cloud/files", get(list_files))
            .route("/cloud/storage-info", get(storage_info))
            .route("/cloud/upload", post(upload))
            .route("/cloud/files/search-users", get(search_users))
            .route("/cloud/files/shared", get(list_shared))
            .route("/cloud/files/shared/{id}/accept", post(accept_share))
            .route("/cloud/files/shared/{id}/reject", post(reject_share))
            .route("/cloud/files/{id}", delete(delete_file))
            .route("/cloud/files/{id}/download", get(download_file))
            .route("/cloud/files/{id}/share", post(share_file))
            .route("/cloud/code/list", get(code_list))
            .route("/cloud/code/load/{name}", get(code_load))
            .route("/cloud/code/save", post(code_save))
            .route("/cloud/code/delete/{name}", delete(code_delete))
            .route("/cloud/file/content", get(cloud_content))
            .route("/cloud/file/save", post(cloud_save))
            .route("/cloud/file/delete/{name}", delete(cloud_delete))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Mock server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server failed");
        });

        Self {
            state,
            base_url: format!("http://{addr}"),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, MockState> {
        lock(&self.state)
    }

    /// Add a file and return its id.
    pub fn add_file(&self, filename: &str, content: &[u8]) -> i64 {
        let mut state = self.state();
        let id = state.next_id();
        state.files.push(MockFile {
            id,
            filename: filename.into(),
            mime: "text/plain".into(),
            size: content.len() as u64,
            content: content.to_vec(),
            legacy: false,
        });
        id
    }

    /// Add an empty file that reports `size` bytes.
    pub fn add_sized_file(&self, filename: &str, size: u64) -> i64 {
        let id = self.add_file(filename, b"");
        if let Some(file) = self.state().files.iter_mut().find(|f| f.id == id) {
            file.size = size;
        }
        id
    }

    /// Add a file listed under the alternate field names.
    pub fn add_legacy_file(&self, filename: &str, content: &[u8]) -> i64 {
        let id = self.add_file(filename, content);
        if let Some(file) = self.state().files.iter_mut().find(|f| f.id == id) {
            file.legacy = true;
        }
        id
    }

    /// Add a pending inbound share and return its id.
    pub fn add_share(&self, file_name: &str, sender: &str) -> i64 {
        let mut state = self.state();
        let id = state.next_id();
        state.shares.push(json!({
            "id": id,
            "file_name": file_name,
            "sender_username": sender,
            "shared_at": "2024-05-01T10:00:00Z",
            "status": "pending",
        }));
        id
    }

    pub fn add_raw_share(&self, entry: Value) {
        self.state().shares.push(entry);
    }

    pub fn add_user(&self, id: i64, username: &str) {
        self.state().users.push(json!({
            "id": id,
            "username": username,
            "email": format!("{username}@example.com"),
        }));
    }

    pub fn add_code_document(&self, name: &str, content: &str, language: &str) {
        self.state()
            .code_documents
            .insert(name.into(), (content.into(), language.into()));
    }

    /// Refuse deleting `file_id` because it has active shares.
    pub fn block_delete(&self, file_id: i64) {
        self.state().blocked_deletes.insert(file_id);
    }

    /// Answer 500 for `"{METHOD} {path}"`.
    pub fn fail(&self, route: &str) {
        self.state().failures.insert(route.into());
    }

    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }

    pub fn file_names(&self) -> Vec<String> {
        self.state().files.iter().map(|f| f.filename.clone()).collect()
    }
}

/// A panel connected to a [`MockCloud`], rendering into memory.
pub struct TestPanel {
    pub mock: MockCloud,
    pub view: Arc<MemoryView>,
    pub dialogs: Arc<ScriptedDialogs>,
    pub panel: CloudPanel,
    pub downloads: TempDir,
}

impl TestPanel {
    /// A panel that picked up its token from the mock's page.
    pub async fn new() -> Self {
        Self::build(true).await
    }

    /// A panel whose page carried no token.
    pub async fn without_token() -> Self {
        Self::build(false).await
    }

    async fn build(serve_token: bool) -> Self {
        let mock = MockCloud::start().await;
        mock.state().serve_token = serve_token;

        let api = HttpCloudApi::new(&ServerConfig {
            base_url: mock.base_url.clone(),
            request_timeout_seconds: Some(5),
            ..Default::default()
        })
        .expect("Failed to build client");
        let has_token = api.bootstrap_csrf().await.expect("Failed to fetch token page");
        assert_eq!(has_token, serve_token);

        let view = Arc::new(MemoryView::new());
        let dialogs = Arc::new(ScriptedDialogs::new());
        let ctx = PanelContext::new(
            Arc::new(api),
            view.clone(),
            dialogs.clone(),
            &DisplayConfig::default(),
        );
        let downloads = tempfile::tempdir().expect("Failed to create download dir");
        let panel = CloudPanel::new(ctx, Arc::new(DirectorySink::new(downloads.path())));

        mock.clear_requests();
        Self {
            mock,
            view,
            dialogs,
            panel,
            downloads,
        }
    }

    pub async fn last_alert_text(&self) -> String {
        self.dialogs
            .last_alert()
            .await
            .map(|a| a.text)
            .unwrap_or_default()
    }
}
