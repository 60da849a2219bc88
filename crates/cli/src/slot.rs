//! File-backed cart slot.
//!
//! Each key is stored as `<dir>/<key>.json`. Writes go to a sibling temp
//! file that is renamed into place, so an interrupted write never leaves a
//! half-written cart behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rapid_sites_core::{KeyValueSlot, SlotError};

/// A [`KeyValueSlot`] that keeps one JSON file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// Create a slot rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory holding the slot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SlotError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SlotError::Unavailable(format!("invalid slot key {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueSlot for FileSlot {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SlotError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "Wrote slot");
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), SlotError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rapid_sites_core::{CART_SLOT_KEY, CartStore, Catalog};

    use super::*;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("not-created-yet"));

        assert!(slot.get(CART_SLOT_KEY).unwrap().is_none());
        slot.clear(CART_SLOT_KEY).unwrap();
    }

    #[test]
    fn test_set_get_clear() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path());

        slot.set("cart", "[]").unwrap();
        assert_eq!(slot.get("cart").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("cart.json").exists());
        assert!(!dir.path().join("cart.json.tmp").exists());

        slot.clear("cart").unwrap();
        assert!(slot.get("cart").unwrap().is_none());
        assert!(!dir.path().join("cart.json").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path());

        assert!(matches!(
            slot.set("../escape", "x"),
            Err(SlotError::Unavailable(_))
        ));
        assert!(slot.get("").is_err());
    }

    #[test]
    fn test_cart_survives_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::demo();

        {
            let mut store = CartStore::open(FileSlot::new(dir.path()));
            store.add_item(catalog.by_id("1").unwrap().to_line_item(3));
            store.add_item(catalog.by_id("3").unwrap().to_line_item(1));
        }

        let store = CartStore::open(FileSlot::new(dir.path()));
        assert_eq!(store.item_count(), 4);
        assert_eq!(store.items().len(), 2);
        assert_eq!(store.total().to_string(), "93.96");
    }

    #[test]
    fn test_cleared_cart_reopens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::demo();

        let mut store = CartStore::open(FileSlot::new(dir.path()));
        store.add_item(catalog.by_id("2").unwrap().to_line_item(1));
        assert!(dir.path().join("cart.json").exists());

        store.clear_cart();
        let reopened = CartStore::open(FileSlot::new(dir.path()));
        assert!(reopened.is_empty());
    }
}
