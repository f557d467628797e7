//! Item lifecycle and claim verification.
//!
//! Services hold their store handles explicitly so the HTTP layer (and tests)
//! decide which [`ItemStore`](lostfound_db::store::ItemStore) and
//! [`FileStore`](lostfound_core::storage::FileStore) back them.

pub mod claims;
pub mod items;

pub use claims::ClaimVerifier;
pub use items::ItemService;

/// An image received from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name as sent by the client.
    pub file_name: String,
    pub bytes: Vec<u8>,
}
