//! FAQ store persisted as a JSON document.
//!
//! Every mutation is applied to a copy of the in-memory state, written to a
//! temporary file beside the document, and renamed over it. The in-memory
//! state only changes once the rename succeeds.

use std::fs;
use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::memory::{FaqDocument, MemoryFaqStore};
use super::{FaqAlias, FaqCommand, FaqStore, STORE_TARGET, StoreError};

/// FAQ store backed by a JSON file.
#[derive(Debug)]
pub struct JsonFaqStore {
    path: Utf8PathBuf,
    records: MemoryFaqStore,
}

impl JsonFaqStore {
    /// Opens the document at `path`; a missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the file cannot be read,
    /// [`StoreError::Serialise`] when it is not a FAQ document, and a
    /// conflict error when its records break the key invariants.
    pub fn open(path: impl Into<Utf8PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match fs::read(&path) {
            Ok(bytes) => {
                let document: FaqDocument =
                    serde_json::from_slice(&bytes).map_err(|source| StoreError::Serialise {
                        path: path.clone(),
                        source,
                    })?;
                MemoryFaqStore::from_document(document)?
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => MemoryFaqStore::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        info!(
            target: STORE_TARGET,
            path = %path,
            commands = records.list_all().len(),
            "FAQ store opened"
        );
        Ok(Self { path, records })
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut MemoryFaqStore) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut staged = self.records.clone();
        let outcome = change(&mut staged)?;
        if staged != self.records {
            self.write(&staged)?;
            self.records = staged;
        }
        Ok(outcome)
    }

    fn write(&self, records: &MemoryFaqStore) -> Result<(), StoreError> {
        let io_error = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let payload = serde_json::to_vec_pretty(&records.to_document()).map_err(|source| {
            StoreError::Serialise {
                path: self.path.clone(),
                source,
            }
        })?;

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        fs::create_dir_all(parent).map_err(io_error)?;
        let mut staging = NamedTempFile::new_in(parent).map_err(io_error)?;
        staging.write_all(&payload).map_err(io_error)?;
        staging.flush().map_err(io_error)?;
        staging
            .persist(&self.path)
            .map_err(|error| io_error(error.error))?;
        debug!(target: STORE_TARGET, path = %self.path, "FAQ store written");
        Ok(())
    }
}

impl FaqStore for JsonFaqStore {
    fn get(&self, key: &str) -> Option<FaqCommand> {
        self.records.get(key)
    }

    fn list_all(&self) -> Vec<FaqCommand> {
        self.records.list_all()
    }

    fn put(&mut self, command: FaqCommand) -> Result<(), StoreError> {
        self.commit(|records| records.put(command))
    }

    fn update(&mut self, key: &str, description: &str) -> Result<bool, StoreError> {
        self.commit(|records| records.update(key, description))
    }

    fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        self.commit(|records| records.delete(key))
    }

    fn put_alias(&mut self, alias: FaqAlias) -> Result<(), StoreError> {
        self.commit(|records| records.put_alias(alias))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn dir() -> TempDir {
        tempfile::tempdir().expect("temp dir")
    }

    fn store_path(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().join("faq.json")).expect("utf8 temp path")
    }

    #[rstest]
    fn missing_file_opens_empty(dir: TempDir) {
        let store = JsonFaqStore::open(store_path(&dir)).expect("open store");
        assert!(store.list_all().is_empty());
        assert!(!store.path().exists());
    }

    #[rstest]
    fn mutations_survive_reopening(dir: TempDir) {
        let path = store_path(&dir);
        {
            let mut store = JsonFaqStore::open(path.clone()).expect("open store");
            store
                .put(FaqCommand::new("drops", "See the wiki.", false))
                .expect("add command");
            store
                .put_alias(FaqAlias::new("loot", "drops"))
                .expect("add alias");
            assert!(store.update("drops", "See the drop page.").expect("update"));
        }

        let reopened = JsonFaqStore::open(path).expect("reopen store");
        let command = reopened.get("loot").expect("alias survives");
        assert_eq!(command.description, "See the drop page.");
    }

    #[rstest]
    fn cascade_delete_is_persisted(dir: TempDir) {
        let path = store_path(&dir);
        let mut store = JsonFaqStore::open(path.clone()).expect("open store");
        store
            .put(FaqCommand::new("drops", "See the wiki.", false))
            .expect("add command");
        store
            .put_alias(FaqAlias::new("loot", "drops"))
            .expect("add alias");
        assert!(store.delete("drops").expect("delete"));

        let reopened = JsonFaqStore::open(path).expect("reopen store");
        assert!(reopened.get("loot").is_none());
        assert!(reopened.list_all().is_empty());
    }

    #[rstest]
    fn rejected_changes_leave_the_file_untouched(dir: TempDir) {
        let path = store_path(&dir);
        let mut store = JsonFaqStore::open(path.clone()).expect("open store");
        store
            .put(FaqCommand::new("drops", "See the wiki.", false))
            .expect("add command");
        let before = fs::read(&path).expect("read store");

        store
            .put(FaqCommand::new("drops", "Duplicate.", false))
            .expect_err("conflict");

        assert_eq!(fs::read(&path).expect("read store"), before);
    }

    #[rstest]
    fn corrupt_document_is_reported(dir: TempDir) {
        let path = store_path(&dir);
        fs::write(&path, b"{ not json").expect("write corrupt store");

        let error = JsonFaqStore::open(path).expect_err("corrupt store");
        assert!(matches!(error, StoreError::Serialise { .. }));
    }

    #[rstest]
    fn dangling_alias_in_document_is_rejected(dir: TempDir) {
        let path = store_path(&dir);
        fs::write(
            &path,
            br#"{"commands":[],"aliases":[{"alias":"loot","command":"drops"}]}"#,
        )
        .expect("write store");

        let error = JsonFaqStore::open(path).expect_err("dangling alias");
        assert!(matches!(error, StoreError::MissingTarget { .. }));
    }
}
