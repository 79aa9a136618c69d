use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::{
    fs,
    io::{AsyncRead, AsyncWriteExt},
};

use crate::domain::{
    error::StorageError, models::picture::StoredPictureName,
    services::picture_store::PictureStore,
};

/// Pictures kept as plain files in one directory.
#[derive(Clone)]
pub struct LocalPictureStore {
    root: PathBuf,
}

impl LocalPictureStore {
    /// Open the store, creating `root` if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_of(&self, name: &StoredPictureName) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// Copy `reader` into a new file. A failed write leaves no file behind.
    async fn write_from<R>(
        &self,
        name: &StoredPictureName,
        reader: &mut R,
    ) -> Result<(), StorageError>
    where
        R: AsyncRead + Unpin + ?Sized,
    {
        let path = self.path_of(name);
        let mut file = fs::File::create(&path).await?;

        let written: std::io::Result<()> = async {
            tokio::io::copy(reader, &mut file).await?;
            file.flush().await
        }
        .await;

        if let Err(err) = written {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&path).await {
                tracing::error!(
                    picture = %name,
                    error = %cleanup,
                    "failed to remove partial picture"
                );
            }
            return Err(err.into());
        }
        Ok(())
    }
}

#[async_trait]
impl PictureStore for LocalPictureStore {
    async fn save(&self, name: &StoredPictureName, content: Bytes) -> Result<(), StorageError> {
        let mut reader: &[u8] = &content;
        self.write_from(name, &mut reader).await
    }

    async fn remove(&self, name: &StoredPictureName) -> Result<(), StorageError> {
        fs::remove_file(self.path_of(name)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        pin::Pin,
        task::{Context, Poll},
    };

    use tokio::io::{AsyncReadExt, ReadBuf};

    use super::*;

    /// Upload source that dies partway through.
    struct BrokenReader;

    impl AsyncRead for BrokenReader {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            Poll::Ready(Err(io::Error::other("connection reset mid-upload")))
        }
    }

    #[tokio::test]
    async fn open_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("image_uploads");

        let store = LocalPictureStore::open(&root).await.unwrap();

        assert!(store.root().is_dir());
    }

    #[tokio::test]
    async fn save_writes_content_under_generated_name() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalPictureStore::open(dir.path()).await.unwrap();
        let name = StoredPictureName::generate("pic.png");

        store
            .save(&name, Bytes::from_static(b"not really a png"))
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join(name.as_str())).unwrap();
        assert_eq!(written, b"not really a png");
    }

    #[tokio::test]
    async fn remove_deletes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalPictureStore::open(dir.path()).await.unwrap();
        let name = StoredPictureName::generate("pic.png");
        store.save(&name, Bytes::from_static(b"x")).await.unwrap();

        store.remove(&name).await.unwrap();

        assert!(!dir.path().join(name.as_str()).exists());
    }

    #[tokio::test]
    async fn remove_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalPictureStore::open(dir.path()).await.unwrap();

        let result = store.remove(&StoredPictureName::generate("gone.png")).await;

        assert!(matches!(result, Err(StorageError::Io(_))));
    }

    #[tokio::test]
    async fn failed_write_leaves_no_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalPictureStore::open(dir.path()).await.unwrap();
        let name = StoredPictureName::generate("pic.png");
        let mut reader = (&b"partial"[..]).chain(BrokenReader);

        let result = store.write_from(&name, &mut reader).await;

        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(!dir.path().join(name.as_str()).exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
