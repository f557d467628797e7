//! Upload storage for item photos.
//!
//! [`FileStore`] is the seam between the item service and wherever image
//! bytes live. [`LocalFileStore`] keeps them in a directory that the HTTP
//! layer serves statically under [`UPLOADS_PATH`].

use std::path::{Path, PathBuf};

use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// URL path prefix under which stored files are served.
pub const UPLOADS_PATH: &str = "/uploads";

/// Image extensions accepted for upload.
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Name used when an upload arrives without a usable file name.
const FALLBACK_FILE_NAME: &str = "upload";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("URL does not reference a stored upload: {0}")]
    InvalidUrl(String),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Durable storage for uploaded images, addressed by public URL.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist `bytes` under a fresh unique name and return its public URL.
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String, StorageError>;

    /// Remove the file behind `public_url`. A file that is already gone is
    /// not an error.
    async fn delete(&self, public_url: &str) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// Local directory implementation
// ---------------------------------------------------------------------------

/// Stores uploads as plain files in `root`.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalFileStore {
    /// Create the store, making sure `root` exists.
    ///
    /// `public_base_url` is the scheme and authority clients use to reach the
    /// server, e.g. `http://localhost:3000`.
    pub async fn open(
        root: impl Into<PathBuf>,
        public_base_url: &str,
    ) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| StorageError::Io {
                path: root.clone(),
                source,
            })?;
        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Public URL for a stored file name.
    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}{UPLOADS_PATH}/{file_name}", self.public_base_url)
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, original_name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let file_name = generate_file_name(original_name);
        let path = self.root.join(&file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::debug!(file = %path.display(), size = bytes.len(), "Stored upload");
        Ok(self.url_for(&file_name))
    }

    async fn delete(&self, public_url: &str) -> Result<(), StorageError> {
        let file_name = file_name_from_url(public_url)?;
        let path = self.root.join(file_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(file = %path.display(), "Deleted upload");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(file = %path.display(), "Upload already absent, nothing to delete");
                Ok(())
            }
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

// ---------------------------------------------------------------------------
// Naming helpers
// ---------------------------------------------------------------------------

/// Reduce a client-supplied file name to a safe single path component.
///
/// Directory parts are dropped and every character outside
/// `[A-Za-z0-9._-]` becomes `_`.
pub fn sanitize_file_name(original_name: &str) -> String {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Unique stored name: millisecond timestamp, random suffix, original name.
pub fn generate_file_name(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{millis}-{}-{}",
        &suffix[..8],
        sanitize_file_name(original_name)
    )
}

/// Extract the stored file name from a public upload URL.
pub fn file_name_from_url(public_url: &str) -> Result<&str, StorageError> {
    let marker = format!("{UPLOADS_PATH}/");
    let (_, name) = public_url
        .rsplit_once(&marker)
        .ok_or_else(|| StorageError::InvalidUrl(public_url.to_string()))?;
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return Err(StorageError::InvalidUrl(public_url.to_string()));
    }
    Ok(name)
}

/// Whether `file_name` ends in one of [`SUPPORTED_IMAGE_EXTENSIONS`].
pub fn is_supported_image(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .is_some_and(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
