use std::sync::Arc;

use lostfound_core::error::CoreError;
use lostfound_core::item::{
    item_not_found, mirror_location, validate_found_report, ItemKey, PREVIEW_LIMIT,
};
use lostfound_core::storage::{is_supported_image, FileStore, SUPPORTED_IMAGE_EXTENSIONS};
use lostfound_core::types::DbId;
use lostfound_db::models::item::{CreateItem, FoundItemReport, Item, UpdateItem};
use lostfound_db::store::ItemStore;

use super::UploadedFile;
use crate::error::{AppError, AppResult};

/// Create, read, update and delete item records, keeping each record's
/// image file in step with the record itself.
#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
    files: Arc<dyn FileStore>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>, files: Arc<dyn FileStore>) -> Self {
        Self { store, files }
    }

    /// Every item, ordered by id.
    pub async fn list_all(&self) -> AppResult<Vec<Item>> {
        let items = self.store.list_all().await?;
        tracing::info!(count = items.len(), "Fetched all items");
        Ok(items)
    }

    /// The first [`PREVIEW_LIMIT`] items.
    pub async fn list_preview(&self) -> AppResult<Vec<Item>> {
        let items = self.store.list_limited(PREVIEW_LIMIT).await?;
        tracing::info!(count = items.len(), "Fetched limited items");
        Ok(items)
    }

    /// Items reported by `user_id`. A missing or blank id is rejected before
    /// the store is queried.
    pub async fn list_by_user(&self, user_id: Option<&str>) -> AppResult<Vec<Item>> {
        let user_id = user_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| CoreError::Validation("Missing userId query parameter".into()))?;

        let items = self.store.list_by_user(user_id).await?;
        tracing::info!(user_id, count = items.len(), "Fetched items for user");
        Ok(items)
    }

    /// A single item by id or by exact name (lowest id on name collisions).
    pub async fn get_by_key(&self, key: &ItemKey) -> AppResult<Item> {
        let found = match key {
            ItemKey::Id(id) => self.store.find_by_id(*id).await?,
            ItemKey::Name(name) => self.store.find_by_name(name).await?,
        };
        match found {
            Some(item) => {
                tracing::info!(item_id = item.id, %key, "Fetched item");
                Ok(item)
            }
            None => {
                tracing::warn!(%key, "Item not found");
                Err(key.not_found().into())
            }
        }
    }

    /// Insert an item as given.
    pub async fn create(&self, input: &CreateItem) -> AppResult<Item> {
        let item = self.store.create(input).await?;
        tracing::info!(item_id = item.id, item_name = %item.item_name, "Item added");
        Ok(item)
    }

    /// Validate and insert a found-item report with `status = Found`.
    ///
    /// Validation happens before the image is written, so a rejected report
    /// leaves neither a record nor a file behind.
    pub async fn report_found(
        &self,
        mut report: FoundItemReport,
        image: Option<UploadedFile>,
    ) -> AppResult<Item> {
        if let Err(err) = validate_found_report(&report.required_fields()) {
            tracing::warn!(error = %err, "Rejected incomplete found-item report");
            return Err(err.into());
        }

        let new_image_url = match image {
            Some(file) => {
                let url = self.store_image(&file).await?;
                report.image_url = Some(url.clone());
                Some(url)
            }
            None => None,
        };

        match self.store.create(&report.into_create()).await {
            Ok(item) => {
                tracing::info!(item_id = item.id, item_name = %item.item_name, "Found item reported");
                Ok(item)
            }
            Err(err) => {
                if let Some(url) = new_image_url {
                    self.discard_file(&url).await;
                }
                Err(err.into())
            }
        }
    }

    /// Apply a partial update, optionally replacing the item's image.
    ///
    /// A new image is stored before the record points at it. Whenever
    /// `locationLost` is supplied it is copied into `locationFound`. If the
    /// update repoints `imageUrl`, either through an uploaded file or the
    /// text field, the old file is released afterwards.
    pub async fn update(
        &self,
        id: DbId,
        mut input: UpdateItem,
        image: Option<UploadedFile>,
    ) -> AppResult<()> {
        let previous_image_url = if image.is_some() || input.image_url.is_some() {
            self.store
                .find_by_id(id)
                .await?
                .ok_or_else(|| item_not_found(id))?
                .image_url
        } else {
            None
        };

        let new_image_url = match image {
            Some(file) => {
                let url = self.store_image(&file).await?;
                input.image_url = Some(url.clone());
                Some(url)
            }
            None => None,
        };

        input.location_found =
            mirror_location(input.location_lost.as_deref(), input.location_found.take());

        match self.store.update(id, &input).await {
            Ok(Some(item)) => {
                tracing::info!(item_id = id, "Item updated");
                if let Some(old) = previous_image_url {
                    if item.image_url.as_deref() != Some(old.as_str()) {
                        self.release_image(&old).await;
                    }
                }
                Ok(())
            }
            Ok(None) => {
                if let Some(url) = &new_image_url {
                    self.discard_file(url).await;
                }
                Err(item_not_found(id).into())
            }
            Err(err) => {
                if let Some(url) = &new_image_url {
                    self.discard_file(url).await;
                }
                Err(err.into())
            }
        }
    }

    /// Delete an item, then its image file.
    ///
    /// The record deletion decides the outcome; a failure to remove the file
    /// is logged and otherwise ignored. A file another record still points
    /// at is kept.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        let item = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| item_not_found(id))?;

        if !self.store.delete(id).await? {
            return Err(item_not_found(id).into());
        }
        tracing::info!(item_id = id, "Item deleted");

        if let Some(url) = item.image_url {
            self.release_image(&url).await;
        }
        Ok(())
    }

    /// Store an uploaded image and return its public URL.
    pub async fn store_image(&self, file: &UploadedFile) -> AppResult<String> {
        if !is_supported_image(&file.file_name) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unsupported image format '{}'. Supported: {}",
                file.file_name,
                SUPPORTED_IMAGE_EXTENSIONS.join(", ")
            ))));
        }
        let url = self.files.store(&file.file_name, &file.bytes).await?;
        tracing::info!(image_url = %url, size = file.bytes.len(), "Image stored");
        Ok(url)
    }

    /// Drop an image a record no longer points at, unless some other record
    /// still references it.
    async fn release_image(&self, url: &str) {
        match self.store.count_by_image_url(url).await {
            Ok(0) => self.discard_file(url).await,
            Ok(references) => {
                tracing::debug!(image_url = %url, references, "Image still referenced, keeping file");
            }
            Err(err) => {
                tracing::warn!(image_url = %url, error = %err, "Could not count image references, keeping file");
            }
        }
    }

    /// Best-effort removal of an image file.
    async fn discard_file(&self, url: &str) {
        if let Err(err) = self.files.delete(url).await {
            tracing::warn!(image_url = %url, error = %err, "Failed to delete image file");
        }
    }
}
