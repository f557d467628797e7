//! Shared fixtures for HTTP-level tests.
//!
//! The app is built with an in-memory [`ItemStore`] and a tempdir-backed
//! [`LocalFileStore`], so these tests need neither a database nor a running
//! server.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use lostfound_api::config::ServerConfig;
use lostfound_api::router::build_app_router;
use lostfound_api::state::AppState;
use lostfound_core::item::ItemStatus;
use lostfound_core::storage::{file_name_from_url, FileStore, LocalFileStore, StorageError};
use lostfound_core::types::DbId;
use lostfound_db::models::item::{CreateItem, Item, UpdateItem};
use lostfound_db::store::ItemStore;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_BASE_URL: &str = "http://localhost:3000";
pub const BOUNDARY: &str = "lostfound-test-boundary";

// ---------------------------------------------------------------------------
// In-memory item store
// ---------------------------------------------------------------------------

/// [`ItemStore`] over a `Vec`, mirroring the SQL semantics of `ItemRepo`.
///
/// After [`MemoryItemStore::fail_writes`], every create, update and delete
/// returns `sqlx::Error::PoolTimedOut`; reads keep working.
#[derive(Default)]
pub struct MemoryItemStore {
    items: Mutex<Vec<Item>>,
    next_id: AtomicUsize,
    calls: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryItemStore {
    /// Number of store operations performed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self, id: DbId) -> Option<Item> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    /// Make every subsequent write fail.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn write(&self) -> Result<(), sqlx::Error> {
        self.touch();
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}

fn patch(slot: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value {
        *slot = Some(v.clone());
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Item>, sqlx::Error> {
        self.touch();
        Ok(self.items.lock().unwrap().clone())
    }

    async fn list_limited(&self, limit: i64) -> Result<Vec<Item>, sqlx::Error> {
        self.touch();
        let items = self.items.lock().unwrap();
        Ok(items.iter().take(limit as usize).cloned().collect())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Item>, sqlx::Error> {
        self.touch();
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|i| i.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        self.touch();
        Ok(self.snapshot(id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Item>, sqlx::Error> {
        self.touch();
        let items = self.items.lock().unwrap();
        Ok(items.iter().find(|i| i.item_name == name).cloned())
    }

    async fn create(&self, input: &CreateItem) -> Result<Item, sqlx::Error> {
        self.write()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as DbId + 1;
        let now = chrono::Utc::now();
        let item = Item {
            id,
            item_name: input.item_name.clone(),
            status: input.status.unwrap_or(ItemStatus::Lost),
            location_lost: input.location_lost.clone(),
            location_found: input.location_found.clone(),
            lost_date: input.lost_date.clone(),
            found_date: input.found_date.clone(),
            category: input.category.clone(),
            color: input.color.clone(),
            description: input.description.clone(),
            contact_email: input.contact_email.clone(),
            contact_phone: input.contact_phone.clone(),
            security_question: input.security_question.clone(),
            security_answer: input.security_answer.clone(),
            image_url: input.image_url.clone(),
            user_id: input.user_id.clone(),
            created_at: now,
            updated_at: now,
        };
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: DbId, input: &UpdateItem) -> Result<Option<Item>, sqlx::Error> {
        self.write()?;
        let mut items = self.items.lock().unwrap();
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &input.item_name {
            item.item_name = name.clone();
        }
        if let Some(status) = input.status {
            item.status = status;
        }
        patch(&mut item.location_lost, &input.location_lost);
        patch(&mut item.location_found, &input.location_found);
        patch(&mut item.lost_date, &input.lost_date);
        patch(&mut item.found_date, &input.found_date);
        patch(&mut item.category, &input.category);
        patch(&mut item.color, &input.color);
        patch(&mut item.description, &input.description);
        patch(&mut item.contact_email, &input.contact_email);
        patch(&mut item.contact_phone, &input.contact_phone);
        patch(&mut item.security_question, &input.security_question);
        patch(&mut item.security_answer, &input.security_answer);
        patch(&mut item.image_url, &input.image_url);
        patch(&mut item.user_id, &input.user_id);
        item.updated_at = chrono::Utc::now();
        Ok(Some(item.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        self.write()?;
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| i.id != id);
        Ok(items.len() < before)
    }

    async fn count_by_image_url(&self, url: &str) -> Result<i64, sqlx::Error> {
        self.touch();
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|i| i.image_url.as_deref() == Some(url))
            .count() as i64)
    }
}

// ---------------------------------------------------------------------------
// File store that cannot delete
// ---------------------------------------------------------------------------

/// Wraps a real store but fails every delete, for best-effort cleanup tests.
pub struct UndeletableFileStore {
    pub inner: LocalFileStore,
    pub delete_attempts: Arc<AtomicUsize>,
}

#[async_trait]
impl FileStore for UndeletableFileStore {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        self.inner.store(original_name, bytes).await
    }

    async fn delete(&self, public_url: &str) -> Result<(), StorageError> {
        self.delete_attempts.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Io {
            path: PathBuf::from(public_url),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "simulated"),
        })
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// A router plus handles on everything behind it.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryItemStore>,
    pub files: LocalFileStore,
    pub dir: TempDir,
}

impl TestApp {
    pub fn upload_dir(&self) -> PathBuf {
        self.dir.path().join("uploads")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    /// Path on disk behind a public upload URL.
    pub fn path_for_url(&self, url: &str) -> PathBuf {
        self.upload_dir().join(file_name_from_url(url).unwrap())
    }

    /// Names of the files currently in the upload directory.
    pub async fn stored_uploads(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(self.upload_dir()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Build a test `ServerConfig` rooted in `dir`.
pub fn test_config(dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        upload_dir: dir.join("uploads"),
        public_base_url: TEST_BASE_URL.to_string(),
        data_dir: dir.join("data"),
        max_upload_bytes: 5 * 1024 * 1024,
    }
}

/// Build the full application router over an in-memory store.
pub async fn build_test_app() -> TestApp {
    build_test_app_with(|files| Arc::new(files) as Arc<dyn FileStore>).await
}

/// Same as [`build_test_app`], but the router's file store is produced by
/// `wrap` from the tempdir-backed store.
pub async fn build_test_app_with(
    wrap: impl FnOnce(LocalFileStore) -> Arc<dyn FileStore>,
) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let files = LocalFileStore::open(&config.upload_dir, TEST_BASE_URL)
        .await
        .unwrap();
    let store = Arc::new(MemoryItemStore::default());

    let state = AppState::new(
        config.clone(),
        Arc::clone(&store) as Arc<dyn ItemStore>,
        wrap(files.clone()),
    );
    let router = build_app_router(state, &config);

    TestApp {
        router,
        store,
        files,
        dir,
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn wallet() -> CreateItem {
    CreateItem {
        item_name: "Wallet".to_string(),
        status: Some(ItemStatus::Lost),
        location_lost: Some("Cafeteria".to_string()),
        lost_date: Some("2024-05-01".to_string()),
        category: Some("Accessories".to_string()),
        color: Some("Brown".to_string()),
        description: Some("Leather".to_string()),
        contact_email: Some("owner@example.com".to_string()),
        contact_phone: Some("050-1234567".to_string()),
        security_question: Some("What is inside?".to_string()),
        security_answer: Some("Bus Pass".to_string()),
        user_id: Some("user-1".to_string()),
        ..CreateItem::default()
    }
}

/// All fields a found-item report needs.
pub fn found_report_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("itemName", "Umbrella"),
        ("locationFound", "Library"),
        ("foundDate", "2024-06-02"),
        ("category", "Accessories"),
        ("color", "Red"),
        ("contactEmail", "finder@example.com"),
        ("contactPhone", "050-7654321"),
        ("securityQuestion", "What is printed on the handle?"),
        ("securityAnswer", "Stars"),
    ]
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A file part for [`multipart`]: `(field, file name, bytes)`.
pub type FilePart<'a> = (&'a str, &'a str, &'a [u8]);

/// Build a `multipart/form-data` request.
pub fn multipart(
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
    file: Option<FilePart<'_>>,
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((field, file_name, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}
