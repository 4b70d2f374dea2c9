//! Disk credential store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::persistence::CredentialStore;
use crate::token::Credential;

/// Single pretty-printed JSON document holding one credential.
#[derive(Debug, Clone)]
pub struct DiskStore {
    path: PathBuf,
}

impl DiskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for DiskStore {
    fn name(&self) -> &'static str {
        "disk"
    }

    async fn load(&self) -> Result<Option<Credential>> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_slice(&data)?))
    }

    async fn save(&self, credential: &Credential) -> Result<()> {
        let data = serde_json::to_vec_pretty(credential)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use chrono::Duration;

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path().join("token.json"));

        let expected = Credential::expiring_in("DISK_TOKEN", Duration::hours(10));
        store.save(&expected).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, expected);
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path().join("absent.json"));

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, b"{not json").unwrap();

        let result = DiskStore::new(&path).load().await;
        assert!(matches!(result, Err(ServiceError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = DiskStore::new(dir.path().join("token.json"));

        store
            .save(&Credential::expiring_in("FIRST", Duration::hours(1)))
            .await
            .unwrap();
        store
            .save(&Credential::expiring_in("SECOND", Duration::hours(1)))
            .await
            .unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.access_token(), "SECOND");
    }
}
