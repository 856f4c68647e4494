use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::SpotlightError;
use crate::models::Photo;

pub const BOOKMARKS_FILE: &str = "spotlight_bookmarks.json";

/// Bookmarked photos, newest first, optionally backed by a JSON file.
#[derive(Debug, Clone, Default)]
pub struct BookmarkStore {
    entries: Vec<Photo>,
    path: Option<PathBuf>,
}

impl BookmarkStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn default_path(dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(BOOKMARKS_FILE)
    }

    /// Reads the bookmark file once. A missing file means no bookmarks; a
    /// corrupted one falls back to the temp file left by an interrupted write.
    /// If the file exists but cannot be read, the store opens in memory so
    /// the unreadable bookmarks are never overwritten.
    pub async fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<Photo>>(&bytes) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "failed to parse bookmarks, trying tmp fallback");
                    read_tmp_fallback(&path.with_extension("json.tmp")).await
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(error = %e, path = %path.display(), "failed to read bookmarks, keeping them in memory only");
                return Self::in_memory();
            }
        };
        let mut store = Self {
            entries: Vec::with_capacity(entries.len()),
            path: Some(path),
        };
        for photo in entries {
            if !store.add(photo) {
                debug!("dropping duplicate bookmark from storage");
            }
        }
        // add() prepends, restore the on-disk order
        store.entries.reverse();
        store
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|photo| photo.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Photo> {
        self.entries.iter().find(|photo| photo.id == id)
    }

    pub fn list(&self) -> &[Photo] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Puts `photo` at the front. Returns false if its id is already there.
    pub fn add(&mut self, mut photo: Photo) -> bool {
        if self.contains(&photo.id) {
            return false;
        }
        photo.bookmarked = true;
        self.entries.insert(0, photo);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<Photo> {
        let index = self.entries.iter().position(|photo| photo.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Writes the whole list, via a temp file renamed over the target.
    pub async fn persist(&self) -> Result<(), SpotlightError> {
        let Some(path) = &self.path else {
            debug!("bookmark store is in-memory only; skipping persist");
            return Ok(());
        };
        let bytes = serde_json::to_vec(&self.entries)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, path).await?;
        debug!(count = self.entries.len(), path = %path.display(), "bookmarks persisted");
        Ok(())
    }
}

async fn read_tmp_fallback(tmp: &Path) -> Vec<Photo> {
    match tokio::fs::read(tmp).await {
        Ok(bytes) => match serde_json::from_slice::<Vec<Photo>>(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, path = %tmp.display(), "failed to parse bookmark tmp fallback");
                Vec::new()
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            warn!(error = %e, path = %tmp.display(), "failed to read bookmark tmp fallback");
            Vec::new()
        }
    }
}
