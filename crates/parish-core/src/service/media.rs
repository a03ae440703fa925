//! [`MediaService`] — image upload and retrieval over the storage seam.

use std::{io, sync::Arc};

use uuid::Uuid;

use crate::{
  media::{extension_for, MediaItem, MediaStorage, NewMediaItem, StorageBackend},
  store::DirectoryStore,
  Error, Result,
};

pub struct MediaService<S> {
  store:   Arc<S>,
  storage: Arc<dyn MediaStorage>,
  /// Discriminant recorded on new items; which backend `storage` writes to.
  backend: StorageBackend,
}

impl<S> Clone for MediaService<S> {
  fn clone(&self) -> Self {
    Self {
      store:   self.store.clone(),
      storage: self.storage.clone(),
      backend: self.backend,
    }
  }
}

impl<S> MediaService<S>
where
  S: DirectoryStore,
{
  pub fn new(
    store: Arc<S>,
    storage: Arc<dyn MediaStorage>,
    backend: StorageBackend,
  ) -> Self {
    Self { store, storage, backend }
  }

  /// Store `bytes` under a generated filename and record a media item.
  pub async fn upload(
    &self,
    content_type: &str,
    bytes: &[u8],
    description: Option<String>,
  ) -> Result<MediaItem> {
    let ext = extension_for(content_type)
      .ok_or_else(|| Error::UnsupportedMediaType(content_type.to_string()))?;
    let filename = format!("{}.{ext}", Uuid::new_v4());
    self.upload_as(&filename, content_type, bytes, description).await
  }

  /// Store `bytes` under a caller-chosen filename and record a media item.
  pub async fn upload_as(
    &self,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
    description: Option<String>,
  ) -> Result<MediaItem> {
    let location = self.storage.put(filename, bytes)?;
    let item = self
      .store
      .create_media_item(NewMediaItem {
        content_type: content_type.to_string(),
        description,
        backend: self.backend,
        location,
      })
      .await
      .map_err(Error::store)?;
    Ok(item)
  }

  /// Load a media item and its bytes. Fails with `ImageNotFound` on miss.
  pub async fn fetch(&self, id: Uuid) -> Result<(MediaItem, Vec<u8>)> {
    let item = self
      .store
      .get_media_item(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::ImageNotFound(id))?;
    let bytes = self.read(&item)?;
    Ok((item, bytes))
  }

  /// Read the bytes for an already-loaded item.
  pub fn read(&self, item: &MediaItem) -> Result<Vec<u8>> {
    match item.backend {
      StorageBackend::Local => Ok(self.storage.get(&item.location)?),
      StorageBackend::S3 => Err(Error::Storage(io::Error::new(
        io::ErrorKind::Unsupported,
        "s3 media backend is not implemented",
      ))),
    }
  }
}
