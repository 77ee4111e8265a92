//! Flat-file record store: one pretty-printed JSON object for all users

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::records::{ProfileRecord, RecordStore, UserRecords};
use crate::core::error::{AppError, AppResult};

/// Record store backed by a single JSON file.
///
/// Every operation re-reads the file; nothing is cached between messages.
/// Writes go to a sibling `.tmp` file which is then renamed over the target,
/// so readers see either the old or the new mapping. The mutex serializes
/// all access from this process.
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "users.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn read_records(&self) -> AppResult<UserRecords> {
        let raw = match fs_err::tokio::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(UserRecords::new()),
            Err(e) => return Err(AppError::storage(&self.path, e)),
        };
        serde_json::from_str(&raw).map_err(|e| AppError::storage(&self.path, e))
    }

    async fn write_records(&self, records: &UserRecords) -> AppResult<()> {
        let mut body = serde_json::to_string_pretty(records).map_err(|e| AppError::storage(&self.path, e))?;
        body.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::tokio::create_dir_all(parent)
                .await
                .map_err(|e| AppError::storage(&self.path, e))?;
        }

        let tmp = self.tmp_path();
        fs_err::tokio::write(&tmp, body.as_bytes())
            .await
            .map_err(|e| AppError::storage(&self.path, e))?;
        fs_err::tokio::rename(&tmp, &self.path)
            .await
            .map_err(|e| AppError::storage(&self.path, e))?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load(&self) -> AppResult<UserRecords> {
        let _guard = self.lock.lock().await;
        self.read_records().await
    }

    async fn save(&self, records: &UserRecords) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        self.write_records(records).await
    }

    async fn upsert(&self, user_id: &str, record: ProfileRecord) -> AppResult<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.read_records().await?;
        records.insert(user_id.to_string(), record);
        self.write_records(&records).await?;
        log::debug!("Stored record for user {} ({} users total)", user_id, records.len());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
        JsonFileStore::new(dir.path().join("users.json"))
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.load().await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_malformed_file_is_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable { .. }));

        // upsert must not clobber a file it could not read
        let err = store
            .upsert("1", ProfileRecord::new("+1", None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StorageUnavailable { .. }));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut records = UserRecords::new();
        records.insert(
            "42".into(),
            ProfileRecord::new("+15550001", Some("Ann".into()), Some("ann".into())),
        );
        store.save(&records).await.unwrap();

        assert_eq!(store.load().await.unwrap(), records);
        assert!(!store.tmp_path().exists());
    }

    #[tokio::test]
    async fn test_file_is_pretty_json_with_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store
            .upsert("7", ProfileRecord::new("+79120001122", Some("Иван".into()), None))
            .await
            .unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"first_name\": \"Иван\""));
        assert!(raw.contains("\n  \"7\": {"));
        assert!(raw.contains("\"username\": null"));
    }

    #[tokio::test]
    async fn test_upsert_overwrites_instead_of_duplicating() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .upsert("42", ProfileRecord::new("+1000", None, None))
            .await
            .unwrap();
        store
            .upsert("42", ProfileRecord::new("+2000", Some("Ann".into()), None))
            .await
            .unwrap();

        let records = store.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records["42"].phone.as_deref(), Some("+2000"));
        assert!(store.is_registered("42").await.unwrap());
        assert!(!store.is_registered("43").await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_upserts_keep_every_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(&dir));

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .upsert(&i.to_string(), ProfileRecord::new(format!("+1555{i:04}"), None, None))
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let records = store.load().await.unwrap();
        assert_eq!(records.len(), 32);
        assert_eq!(records["31"].phone.as_deref(), Some("+15550031"));
    }

    #[tokio::test]
    async fn test_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data/nested/users.json"));
        store
            .upsert("1", ProfileRecord::new("+1", None, None))
            .await
            .unwrap();
        assert!(store.get("1").await.unwrap().is_some());
    }
}
