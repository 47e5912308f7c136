use std::{
    future::Future,
    io::ErrorKind,
    ops::Deref,
    path::{Path, PathBuf},
};

use fs4::tokio::AsyncFileExt;
use thiserror::Error;
use tokio::{fs::File, io::AsyncReadExt};
use tracing::{debug, info};

use crate::fs::operations::replace_file;

use super::entities::Dataset;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("can't read metrics from {path:?}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("metrics file {path:?} is corrupted")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to save metrics into {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Interface for abstracting storage of the dataset.
pub trait DataStore {
    /// Reads the whole dataset. A store that was never saved is an empty dataset.
    fn load(&self) -> impl Future<Output = Result<Dataset, StoreError>>;

    /// Replaces stored dataset with `dataset`.
    fn save(&self, dataset: &Dataset) -> impl Future<Output = Result<(), StoreError>>;

    /// Where the dataset lives. Only used for messages.
    fn location(&self) -> &Path;
}

impl<T: Deref> DataStore for T
where
    T::Target: DataStore,
{
    fn load(&self) -> impl Future<Output = Result<Dataset, StoreError>> {
        self.deref().load()
    }

    fn save(&self, dataset: &Dataset) -> impl Future<Output = Result<(), StoreError>> {
        self.deref().save(dataset)
    }

    fn location(&self) -> &Path {
        self.deref().location()
    }
}

/// The main realization of [DataStore]. Keeps everything in one pretty printed JSON file.
pub struct JsonDataStore {
    path: PathBuf,
}

impl JsonDataStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn read_locked(path: &Path) -> Result<String, std::io::Error> {
        let mut file = File::open(path).await?;
        file.lock_shared()?;
        let mut contents = String::new();
        let result = file.read_to_string(&mut contents).await;
        file.unlock_async().await?;
        result?;
        Ok(contents)
    }
}

impl DataStore for JsonDataStore {
    async fn load(&self) -> Result<Dataset, StoreError> {
        debug!("Loading {:?}", self.path);
        let contents = match Self::read_locked(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{:?} doesn't exist yet, starting empty", self.path);
                return Ok(Dataset::new());
            }
            Err(source) => {
                return Err(StoreError::Unreadable {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        // An empty file is what an interrupted first save could leave behind.
        if contents.trim().is_empty() {
            return Ok(Dataset::new());
        }

        serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, dataset: &Dataset) -> Result<(), StoreError> {
        let mut buffer = serde_json::to_vec_pretty(dataset).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e.into(),
        })?;
        buffer.push(b'\n');

        replace_file(&self.path, &buffer)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        info!("Saved {} metrics into {:?}", dataset.len(), self.path);
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::{
        storage::{
            data_store::{DataStore, JsonDataStore, StoreError},
            entities::{Dataset, Metric},
        },
        utils::logging::TEST_LOGGING,
    };

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn test_dataset() -> Dataset {
        let mut sleep = Metric::from_iter([(day(1), 7.5)]);
        sleep.insert(day(2), None);
        Dataset::from_iter([
            ("pushups", Metric::from_iter([(day(1), 10.), (day(3), 20.)])),
            ("sleep (h)", sleep),
            ("weight (kg)", Metric::new()),
        ])
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let store = JsonDataStore::new(dir.path().join("metrics_data.json"));

        assert_eq!(store.load().await?, Dataset::new());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonDataStore::new(dir.path().join("metrics_data.json"));
        let dataset = test_dataset();

        store.save(&dataset).await?;

        assert_eq!(store.load().await?, dataset);
        Ok(())
    }

    #[tokio::test]
    async fn test_resave_is_byte_identical() -> Result<()> {
        let dir = tempdir()?;
        let store = JsonDataStore::new(dir.path().join("metrics_data.json"));
        store.save(&test_dataset()).await?;
        let first = std::fs::read(store.location())?;

        let loaded = store.load().await?;
        store.save(&loaded).await?;

        assert_eq!(std::fs::read(store.location())?, first);
        Ok(())
    }

    #[tokio::test]
    async fn test_reads_hand_written_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("metrics_data.json");
        std::fs::write(
            &path,
            r#"{
  "pushups": {
    "2024-01-03": 20,
    "2024-01-01": 10
  }
}"#,
        )?;

        let dataset = JsonDataStore::new(path).load().await?;

        let pushups = dataset.get("pushups").unwrap();
        assert_eq!(
            pushups.known_points().collect::<Vec<_>>(),
            vec![(day(1), 10.), (day(3), 20.)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported_and_kept() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("metrics_data.json");
        std::fs::write(&path, "{\"pushups\": {\"yesterday\": 1}}")?;
        let store = JsonDataStore::new(path.clone());

        let error = store.load().await.unwrap_err();

        assert!(matches!(error, StoreError::Corrupt { .. }));
        assert_eq!(
            std::fs::read_to_string(&path)?,
            "{\"pushups\": {\"yesterday\": 1}}"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_directory_instead_of_file_is_unreadable() -> Result<()> {
        let dir = tempdir()?;

        let error = JsonDataStore::new(dir.path().to_path_buf())
            .load()
            .await
            .unwrap_err();

        assert!(matches!(error, StoreError::Unreadable { .. }));
        Ok(())
    }
}
