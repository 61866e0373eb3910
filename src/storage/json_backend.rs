use std::{
    fs,
    io::ErrorKind,
    path::PathBuf,
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::LedgerError,
    utils::persistence::write_atomic,
};

use super::{KeyValueStore, Result};

const DOCUMENT_EXTENSION: &str = "json";

/// Stores each key as `<root>/store/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    store_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let store_dir = PathResolver::store_dir_in(&PathResolver::resolve_base(root));
        ensure_dir(&store_dir).map_err(unavailable)?;
        Ok(Self { store_dir })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn key_path(&self, key: &str) -> PathBuf {
        self.store_dir
            .join(format!("{}.{}", canonical_key(key), DOCUMENT_EXTENSION))
    }
}

impl KeyValueStore for JsonStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(unavailable(err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        write_atomic(&self.key_path(key), value).map_err(unavailable)
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(unavailable(err)),
        }
    }
}

fn unavailable(err: std::io::Error) -> LedgerError {
    LedgerError::Persistence(err.to_string())
}

fn canonical_key(key: &str) -> String {
    key.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn set_get_remove_roundtrip() {
        let temp = tempdir().unwrap();
        let store = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

        assert_eq!(store.get("incomes").unwrap(), None);
        store.set("incomes", "[]").unwrap();
        assert_eq!(store.get("incomes").unwrap().as_deref(), Some("[]"));
        assert!(store.key_path("incomes").ends_with("store/incomes.json"));

        store.remove("incomes").unwrap();
        assert_eq!(store.get("incomes").unwrap(), None);
        store.remove("incomes").expect("removing a missing key is not an error");
    }

    #[test]
    fn keys_cannot_escape_the_store_dir() {
        let temp = tempdir().unwrap();
        let store = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        let path = store.key_path("../outside");
        assert_eq!(path.parent(), Some(PathResolver::store_dir_in(temp.path()).as_path()));
    }
}
