//! Directory-backed key-value store built on `cap_std`.
//!
//! Each key maps to one file named after the hex encoding of the key, so
//! any string is a valid key. Writes go to a staging file first and are
//! renamed into place.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

const ENTRY_SUFFIX: &str = ".entry";
const STAGING_SUFFIX: &str = ".tmp";

/// Key-value store persisting one file per key inside a directory.
#[derive(Debug)]
pub struct CapDirKeyValueStore {
    root: PathBuf,
    directory: Dir,
}

impl CapDirKeyValueStore {
    /// Open `root`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError::Backend`] when the directory cannot be
    /// created or opened.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, KeyValueStoreError> {
        let root = root.as_ref();
        Dir::create_ambient_dir_all(root, ambient_authority())
            .map_err(|error| io_error("create", root, &error))?;
        let directory = Dir::open_ambient_dir(root, ambient_authority())
            .map_err(|error| io_error("open", root, &error))?;
        debug!(root = %root.display(), "key-value directory ready");
        Ok(Self {
            root: root.to_path_buf(),
            directory,
        })
    }

    /// Directory holding the entries.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_error(&self, action: &str, name: &str, error: &std::io::Error) -> KeyValueStoreError {
        io_error(action, &self.root.join(name), error)
    }
}

fn io_error(action: &str, path: &Path, error: &std::io::Error) -> KeyValueStoreError {
    KeyValueStoreError::backend(format!("{action} {}: {error}", path.display()))
}

fn entry_name(key: &str) -> String {
    format!("{}{ENTRY_SUFFIX}", hex::encode(key))
}

fn key_from_entry_name(name: &str) -> Option<String> {
    let encoded = name.strip_suffix(ENTRY_SUFFIX)?;
    let bytes = hex::decode(encoded).ok()?;
    String::from_utf8(bytes).ok()
}

impl KeyValueStore for CapDirKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let name = entry_name(key);
        match self.directory.read_to_string(&name) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(self.path_error("read", &name, &error)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let name = entry_name(key);
        let staging = format!("{name}{STAGING_SUFFIX}");
        self.directory
            .write(&staging, value.as_bytes())
            .map_err(|error| self.path_error("write", &staging, &error))?;
        self.directory
            .rename(&staging, &self.directory, &name)
            .map_err(|error| self.path_error("rename", &name, &error))
    }

    fn remove_item(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let name = entry_name(key);
        match self.directory.remove_file(&name) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(self.path_error("remove", &name, &error)),
        }
    }

    fn keys(&self) -> Result<Vec<String>, KeyValueStoreError> {
        let entries = self
            .directory
            .entries()
            .map_err(|error| io_error("list", &self.root, &error))?;
        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|error| io_error("list", &self.root, &error))?;
            if let Some(key) = entry.file_name().to_str().and_then(key_from_entry_name) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use crate::test_support::cap_fs::write_file;

    #[fixture]
    fn temp() -> TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    #[rstest]
    fn set_get_remove(temp: TempDir) {
        let store = CapDirKeyValueStore::open(temp.path().join("kv")).expect("open");

        store.set_item("user_1", "{\"id\":\"1\"}").expect("set");
        assert_eq!(
            store.get_item("user_1").expect("get").as_deref(),
            Some("{\"id\":\"1\"}")
        );

        store.remove_item("user_1").expect("remove");
        assert_eq!(store.get_item("user_1").expect("get"), None);
        store.remove_item("user_1").expect("removing twice succeeds");
    }

    #[rstest]
    fn keys_round_trip_arbitrary_strings(temp: TempDir) {
        let store = CapDirKeyValueStore::open(temp.path()).expect("open");
        for key in ["user_b", "user_a", "path/like key", "ключ"] {
            store.set_item(key, "v").expect("set");
        }
        write_file(&temp.path().join("stray.txt"), b"ignored").expect("stray file");

        assert_eq!(
            store.keys().expect("keys"),
            vec!["path/like key", "user_a", "user_b", "ключ"]
        );
    }

    #[rstest]
    fn values_persist_across_reopen(temp: TempDir) {
        CapDirKeyValueStore::open(temp.path())
            .expect("open")
            .set_item("user_7", "seven")
            .expect("set");

        let reopened = CapDirKeyValueStore::open(temp.path()).expect("reopen");

        assert_eq!(reopened.get_item("user_7").expect("get").as_deref(), Some("seven"));
    }

    #[rstest]
    fn later_set_overwrites(temp: TempDir) {
        let store = CapDirKeyValueStore::open(temp.path()).expect("open");
        store.set_item("k", "first").expect("set");
        store.set_item("k", "second").expect("set");

        assert_eq!(store.get_item("k").expect("get").as_deref(), Some("second"));
        assert_eq!(store.keys().expect("keys"), vec!["k"]);
    }

    #[test]
    fn unusable_root_is_a_backend_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let blocker = temp.path().join("blocker");
        write_file(&blocker, b"file").expect("write blocker");

        let error = CapDirKeyValueStore::open(blocker.join("kv")).expect_err("open must fail");

        assert!(matches!(error, KeyValueStoreError::Backend { .. }));
    }
}
