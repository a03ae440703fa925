//! Media items and the blob-storage seam.
//!
//! A media item row records metadata only; the bytes live in a storage
//! backend behind the [`MediaStorage`] trait. Media I/O is blocking and
//! synchronous within the request that triggers it.

use std::{
  fs,
  io,
  path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which backend holds a media item's bytes. Only `local` is implemented;
/// `s3` is reserved in the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
  Local,
  S3,
}

/// Persisted metadata for one stored image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
  pub media_id:     Uuid,
  pub created_at:   DateTime<Utc>,
  pub content_type: String,
  pub description:  Option<String>,
  pub backend:      StorageBackend,
  /// Backend-specific location, e.g. a filesystem path.
  pub location:     String,
}

/// Input to [`DirectoryStore::create_media_item`](crate::store::DirectoryStore).
#[derive(Debug, Clone)]
pub struct NewMediaItem {
  pub content_type: String,
  pub description:  Option<String>,
  pub backend:      StorageBackend,
  pub location:     String,
}

/// File extension for the image content types we accept as uploads.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
  match content_type {
    // jpeg is normalised to .jpg rather than the mime-derived .jpe
    "image/jpeg" | "image/jpg" => Some("jpg"),
    "image/png" => Some("png"),
    "image/gif" => Some("gif"),
    "image/webp" => Some("webp"),
    _ => None,
  }
}

// ─── Storage seam ────────────────────────────────────────────────────────────

/// A blob store that can persist and return raw bytes by key.
///
/// Implementations are wired in by the composition root; the services never
/// know which backend they are talking to.
pub trait MediaStorage: Send + Sync {
  /// Store `bytes` under `filename` and return the backend location.
  fn put(&self, filename: &str, bytes: &[u8]) -> io::Result<String>;

  /// Read the bytes back from a previously returned location.
  fn get(&self, location: &str) -> io::Result<Vec<u8>>;
}

/// Filesystem-backed [`MediaStorage`].
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
  base_path: PathBuf,
}

impl LocalMediaStorage {
  /// Create the base directory if needed and return the storage handle.
  pub fn new(base_path: impl AsRef<Path>) -> io::Result<Self> {
    let base_path = base_path.as_ref().to_path_buf();
    fs::create_dir_all(&base_path)?;
    Ok(Self { base_path })
  }
}

impl MediaStorage for LocalMediaStorage {
  fn put(&self, filename: &str, bytes: &[u8]) -> io::Result<String> {
    let path = self.base_path.join(filename);
    fs::write(&path, bytes)?;
    Ok(path.to_string_lossy().into_owned())
  }

  fn get(&self, location: &str) -> io::Result<Vec<u8>> {
    fs::read(location)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn local_storage_round_trip() {
    let dir = std::env::temp_dir().join(format!("parish-media-{}", Uuid::new_v4()));
    let storage = LocalMediaStorage::new(&dir).unwrap();

    let location = storage.put("a.jpg", b"bytes").unwrap();
    assert_eq!(storage.get(&location).unwrap(), b"bytes");

    std::fs::remove_dir_all(&dir).ok();
  }

  #[test]
  fn jpeg_maps_to_jpg() {
    assert_eq!(extension_for("image/jpeg"), Some("jpg"));
    assert_eq!(extension_for("application/pdf"), None);
  }
}
