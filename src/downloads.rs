//! Revocable, locally addressable references to downloaded bytes.
//!
//! Each successful file-bearing operation registers its response body here and
//! hands the caller a [`DownloadHandle`]. The bytes stay alive until the handle
//! is released; a caller that never releases keeps them for the life of the
//! store.

use crate::{Error, ErrorContext, Result};
use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Reference to bytes held in a [`DownloadStore`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DownloadHandle {
    id: Uuid,
    size: u64,
}

impl DownloadHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Local address of the bytes, e.g. `download:3f2b...`.
    pub fn url(&self) -> String {
        format!("download:{}", self.id)
    }
}

/// Shared set of registered downloads. Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct DownloadStore {
    entries: Arc<RwLock<HashMap<Uuid, Bytes>>>,
}

impl DownloadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, bytes: Bytes) -> DownloadHandle {
        let handle = DownloadHandle {
            id: Uuid::new_v4(),
            size: bytes.len() as u64,
        };
        self.write().insert(handle.id, bytes);
        tracing::debug!(id = %handle.id, size = handle.size, "registered download");
        handle
    }

    /// The bytes behind a handle, or `None` once released.
    pub fn get(&self, handle: &DownloadHandle) -> Option<Bytes> {
        self.read().get(&handle.id).cloned()
    }

    /// Drop the bytes behind a handle. Returns `false` if already released.
    pub fn release(&self, handle: &DownloadHandle) -> bool {
        let removed = self.write().remove(&handle.id).is_some();
        if removed {
            tracing::debug!(id = %handle.id, "released download");
        }
        removed
    }

    pub fn contains(&self, handle: &DownloadHandle) -> bool {
        self.read().contains_key(&handle.id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Total bytes currently held.
    pub fn total_bytes(&self) -> u64 {
        self.read().values().map(|b| b.len() as u64).sum()
    }

    /// Write the bytes behind a handle to `path`.
    pub async fn save(&self, handle: &DownloadHandle, path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.get(handle).ok_or_else(|| {
            Error::validation_with_context(
                "Download is no longer available",
                ErrorContext::new()
                    .with_details(handle.url())
                    .with_source("download_store"),
            )
        })?;
        tokio::fs::write(path.as_ref(), &bytes).await?;
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<Uuid, Bytes>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<Uuid, Bytes>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}
