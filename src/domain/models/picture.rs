use bytes::Bytes;
use uuid::Uuid;

/// Name under which an uploaded picture is stored: `<uuid>.<ext>`, or a bare
/// `<uuid>` when the original filename carries no usable extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoredPictureName(String);

impl StoredPictureName {
    /// Generate a fresh name keeping the extension of `original_filename`.
    pub fn generate(original_filename: &str) -> Self {
        let id = Uuid::new_v4();
        match extension_of(original_filename) {
            Some(ext) => Self(format!("{id}.{ext}")),
            None => Self(id.to_string()),
        }
    }

    /// Rebuild from a name read back from a store.
    pub fn from_stored(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoredPictureName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text after the last `.`, kept only when it is non-empty ASCII alphanumeric.
fn extension_of(filename: &str) -> Option<&str> {
    let (_, ext) = filename.rsplit_once('.')?;
    if !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext)
    } else {
        None
    }
}

/// Picture as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedPicture {
    pub filename: String,
    pub content: Bytes,
}
