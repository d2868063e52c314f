//! Durable cart persistence.
//!
//! The cart is stored as a single JSON document (the line-item collection)
//! under one fixed path, a key-value store with exactly one key. Every
//! mutation rewrites the whole document; there are no incremental updates.
//!
//! # Failure policy
//!
//! A missing or malformed store reads as an empty cart. Corruption is a
//! silent-recovery boundary: it is logged at `warn` and the shopper starts
//! fresh, no error surfaces.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::LineItem;

/// Errors that can occur when writing the cart store.
///
/// Reads never error; see the module-level failure policy.
#[derive(Debug, Error)]
pub enum CartStoreError {
    /// Filesystem write failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Cart could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Single-document JSON store for the cart collection.
#[derive(Debug, Clone)]
pub struct CartStore {
    path: PathBuf,
}

impl CartStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted collection.
    ///
    /// Returns an empty collection when the file is missing or does not
    /// parse as a line-item list.
    #[must_use]
    pub fn load(&self) -> Vec<LineItem> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cart store unreadable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cart store malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Replace the persisted collection.
    ///
    /// Writes to a sibling temp file and renames over the store so a crash
    /// mid-write never leaves a torn document behind.
    ///
    /// # Errors
    ///
    /// Returns [`CartStoreError`] if serialization or the filesystem write
    /// fails.
    pub fn save(&self, items: &[LineItem]) -> Result<(), CartStoreError> {
        let json = serde_json::to_string(items)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), lines = items.len(), "cart store written");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mars_mayorista_core::{Price, ProductId, Sku};

    use super::*;

    fn item(id: i64, quantity: u32) -> LineItem {
        LineItem {
            id: ProductId::new(id),
            sku: Sku::new(format!("SKU-{id}")),
            title: format!("Product {id}"),
            price: Price::new("19.90".parse().unwrap()),
            quantity,
            image: Some(format!("SKU-{id}.jpg")),
            stock: 10,
        }
    }

    fn store_in(dir: &tempfile::TempDir) -> CartStore {
        CartStore::new(dir.path().join("cart.json"))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load().is_empty());
    }

    #[test]
    fn test_save_load_roundtrip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let items = vec![item(3, 2), item(1, 5), item(2, 1)];
        store.save(&items).unwrap();

        assert_eq!(store.load(), items);
    }

    #[test]
    fn test_save_replaces_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&[item(1, 1), item(2, 2)]).unwrap();
        store.save(&[item(9, 3)]).unwrap();

        assert_eq!(store.load(), vec![item(9, 3)]);
    }

    #[test]
    fn test_malformed_store_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), "{not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_wrong_shape_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), r#"{"items": "nope"}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.save(&[item(1, 1)]).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["cart.json".to_string()]);
    }
}
