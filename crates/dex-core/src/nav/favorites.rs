//! The favorites collection.
//!
//! Favorites are a set of item ids kept in insertion order and persisted as a
//! JSON array of integers. The whole file is rewritten on every mutation.
//! Ids are never checked against the catalog.

use std::path::{Path, PathBuf};

use crate::error::{read_error, CoreError, CoreResult};

/// Default file name inside the config directory.
pub const FAVORITES_FILE: &str = "favorites.json";

/// Reads a favorites file strictly.
///
/// # Errors
///
/// [`CoreError::NotFound`] / [`CoreError::PermissionDenied`] when the file
/// cannot be read, [`CoreError::PersistenceCorrupt`] when it is not a JSON
/// array of non-negative integers.
pub fn load_favorites(path: &Path) -> CoreResult<Vec<u32>> {
    let content = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    let ids: Vec<u32> =
        serde_json::from_str(&content).map_err(|e| CoreError::PersistenceCorrupt(e.to_string()))?;

    let mut unique = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    Ok(unique)
}

/// Writes `ids` to `path` via a temporary file and a rename.
fn save_favorites(path: &Path, ids: &[u32]) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content =
        serde_json::to_string(ids).map_err(|e| CoreError::PersistenceCorrupt(e.to_string()))?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, content)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// The user's favorite ids.
///
/// Created once at start-up and owned by the application; consumers borrow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesStore {
    ids: Vec<u32>,
    /// `None` keeps favorites in memory only.
    path: Option<PathBuf>,
}

impl FavoritesStore {
    /// Opens the store backed by `path`.
    ///
    /// A missing file is a fresh, empty store. A corrupt or unreadable one is
    /// also treated as empty (and overwritten by the next mutation).
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let ids = match load_favorites(&path) {
            Ok(ids) => ids,
            Err(CoreError::NotFound(_)) => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "favorites unreadable, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = ids.len(), "favorites loaded");
        Self {
            ids,
            path: Some(path),
        }
    }

    /// A store that is never written to disk.
    pub fn ephemeral() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn is_favorite(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    /// Ids in the order they were added.
    #[must_use]
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Adds `id`. Adding a present id changes nothing and writes nothing.
    ///
    /// On a failed write the store keeps its previous contents.
    pub fn add(&mut self, id: u32) -> CoreResult<()> {
        if self.is_favorite(id) {
            return Ok(());
        }
        let mut ids = self.ids.clone();
        ids.push(id);
        self.commit(ids)
    }

    /// Removes `id`. Removing an absent id changes nothing and writes nothing.
    ///
    /// On a failed write the store keeps its previous contents.
    pub fn remove(&mut self, id: u32) -> CoreResult<()> {
        if !self.is_favorite(id) {
            return Ok(());
        }
        let ids = self.ids.iter().copied().filter(|x| *x != id).collect();
        self.commit(ids)
    }

    /// Flips membership of `id` and returns whether it is now a favorite.
    pub fn toggle(&mut self, id: u32) -> CoreResult<bool> {
        if self.is_favorite(id) {
            self.remove(id)?;
            Ok(false)
        } else {
            self.add(id)?;
            Ok(true)
        }
    }

    pub fn clear(&mut self) -> CoreResult<()> {
        self.commit(Vec::new())
    }

    /// Writes `ids`, then makes them the current set.
    fn commit(&mut self, ids: Vec<u32>) -> CoreResult<()> {
        if let Some(path) = &self.path {
            save_favorites(path, &ids)?;
        }
        self.ids = ids;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(tmp: &TempDir) -> (FavoritesStore, PathBuf) {
        let path = tmp.path().join(FAVORITES_FILE);
        (FavoritesStore::open(&path), path)
    }

    // --- open ---

    #[test]
    fn missing_file_opens_empty() {
        let tmp = TempDir::new().unwrap();
        let (store, path) = store_in(&tmp);
        assert!(store.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(FAVORITES_FILE);
        std::fs::write(&path, "{not json").unwrap();

        let store = FavoritesStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn wrong_shape_opens_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(FAVORITES_FILE);
        std::fs::write(&path, r#"{"ids":[1,2]}"#).unwrap();

        assert!(FavoritesStore::open(&path).is_empty());
        assert!(matches!(
            load_favorites(&path),
            Err(CoreError::PersistenceCorrupt(_))
        ));
    }

    #[test]
    fn strict_load_reports_missing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("absent.json");
        assert!(matches!(load_favorites(&path), Err(CoreError::NotFound(_))));
    }

    #[test]
    fn load_drops_duplicate_ids() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(FAVORITES_FILE);
        std::fs::write(&path, "[25, 1, 25, 4]").unwrap();

        assert_eq!(load_favorites(&path).unwrap(), vec![25, 1, 4]);
    }

    // --- mutations ---

    #[test]
    fn add_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = store_in(&tmp);
        store.add(25).unwrap();
        store.add(25).unwrap();
        assert_eq!(store.ids(), &[25]);
        assert!(store.is_favorite(25));
    }

    #[test]
    fn remove_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = store_in(&tmp);
        store.add(1).unwrap();
        store.remove(1).unwrap();
        store.remove(1).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_twice_is_identity() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = store_in(&tmp);
        store.add(7).unwrap();
        let before = store.clone();

        assert!(store.toggle(4).unwrap());
        assert!(!store.toggle(4).unwrap());

        assert_eq!(store, before);
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut store = FavoritesStore::ephemeral();
        for id in [150, 1, 25] {
            store.add(id).unwrap();
        }
        assert_eq!(store.ids(), &[150, 1, 25]);
    }

    #[test]
    fn clear_empties_store_and_file() {
        let tmp = TempDir::new().unwrap();
        let (mut store, path) = store_in(&tmp);
        store.add(1).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
        assert!(load_favorites(&path).unwrap().is_empty());
    }

    // --- persistence ---

    #[test]
    fn mutations_persist_across_open() {
        let tmp = TempDir::new().unwrap();
        let (mut store, path) = store_in(&tmp);
        store.add(1).unwrap();
        store.add(4).unwrap();
        store.add(7).unwrap();
        store.remove(4).unwrap();

        let reopened = FavoritesStore::open(&path);
        assert_eq!(reopened.ids(), &[1, 7]);
    }

    #[test]
    fn file_is_plain_json_array() {
        let tmp = TempDir::new().unwrap();
        let (mut store, path) = store_in(&tmp);
        store.add(25).unwrap();
        store.add(133).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[25,133]");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn save_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("dex").join(FAVORITES_FILE);
        let mut store = FavoritesStore::open(&path);
        store.add(1).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_is_overwritten_on_mutation() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(FAVORITES_FILE);
        std::fs::write(&path, "garbage").unwrap();

        let mut store = FavoritesStore::open(&path);
        store.add(9).unwrap();
        assert_eq!(load_favorites(&path).unwrap(), vec![9]);
    }

    #[test]
    fn failed_write_leaves_store_unchanged() {
        let tmp = TempDir::new().unwrap();
        let (mut store, _) = store_in(&tmp);
        store.add(4).unwrap();

        // A plain file where the parent directory should be makes every write fail.
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let mut blocked = FavoritesStore {
            ids: store.ids().to_vec(),
            path: Some(blocker.join(FAVORITES_FILE)),
        };

        assert!(blocked.add(7).is_err());
        assert!(!blocked.is_favorite(7));
        assert!(blocked.toggle(4).is_err());
        assert!(blocked.is_favorite(4));
        assert!(blocked.clear().is_err());
        assert_eq!(blocked.ids(), &[4]);
    }

    #[test]
    fn ephemeral_store_writes_nothing() {
        let mut store = FavoritesStore::ephemeral();
        store.add(1).unwrap();
        assert!(store.path().is_none());
        assert!(store.is_favorite(1));
    }
}
