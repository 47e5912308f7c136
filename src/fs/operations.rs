use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{self, AsyncWriteExt},
};
use tracing::debug;

/// Path of the file used for staging a replacement of `path`. It lives in the same directory so
/// that the final rename doesn't cross filesystems.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|v| v.to_os_string())
        .unwrap_or_else(|| OsString::from("data"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Replaces contents of `path` with `contents`.
/// The data is fully written and synced into a staging file before it's renamed over `path`, so
/// an interrupted write leaves the previous file intact.
pub async fn replace_file(path: &Path, contents: &[u8]) -> Result<(), io::Error> {
    if let Some(parent) = path.parent().filter(|v| !v.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let staging = staging_path(path);
    debug!("Staging {} bytes in {staging:?}", contents.len());

    // Truncated in write_synced, once the lock is held.
    let mut file = File::options()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&staging)
        .await?;

    file.lock_exclusive()?;
    let result = write_synced(&mut file, contents).await;
    file.unlock_async().await?;
    drop(file);

    if let Err(e) = result {
        let _ = tokio::fs::remove_file(&staging).await;
        return Err(e);
    }

    tokio::fs::rename(&staging, path).await
}

async fn write_synced(file: &mut File, contents: &[u8]) -> Result<(), io::Error> {
    file.set_len(0).await?;
    file.write_all(contents).await?;
    file.flush().await?;
    file.sync_all().await
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use anyhow::Result;
    use tempfile::tempdir;

    use crate::fs::operations::{replace_file, staging_path};

    #[test]
    fn test_staging_path_is_sibling() {
        let staging = staging_path(Path::new("/data/metrics_data.json"));
        assert_eq!(staging, Path::new("/data/metrics_data.json.tmp"));
    }

    #[tokio::test]
    async fn test_replace_file_creates_parents() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join("store.json");

        replace_file(&path, b"first").await?;

        assert_eq!(tokio::fs::read_to_string(&path).await?, "first");
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_file_overwrites_and_cleans_up() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("store.json");

        replace_file(&path, b"a much longer first version").await?;
        replace_file(&path, b"short").await?;

        assert_eq!(tokio::fs::read_to_string(&path).await?, "short");
        assert!(!staging_path(&path).exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_file_discards_leftover_staging_data() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("store.json");
        std::fs::write(staging_path(&path), "leftover from a crashed save, longer than new data")?;

        replace_file(&path, b"{}").await?;

        assert_eq!(tokio::fs::read_to_string(&path).await?, "{}");
        assert!(!staging_path(&path).exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_file_failure_keeps_original() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("store.json");
        replace_file(&path, b"valid").await?;

        // A directory squatting on the staging path makes opening it fail.
        std::fs::create_dir(staging_path(&path))?;

        assert!(replace_file(&path, b"broken").await.is_err());
        assert_eq!(tokio::fs::read_to_string(&path).await?, "valid");
        Ok(())
    }
}
