use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{error::StorageError, models::picture::StoredPictureName};

/// Durable storage for uploaded pictures, addressed by generated name.
#[async_trait]
pub trait PictureStore {
    async fn save(&self, name: &StoredPictureName, content: Bytes) -> Result<(), StorageError>;
    async fn remove(&self, name: &StoredPictureName) -> Result<(), StorageError>;
}
