//! Output folders and image files
//!
//! Folder creation and file writes rely on the filesystem's own
//! create-if-absent checks, so concurrent pin tasks never overwrite
//! each other.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};


use crate::error::{PinboardError, Result};

/// Highest numeric suffix tried before giving up on a folder name
const MAX_FOLDER_SUFFIX: u32 = 10_000;

/// Creates `<root>/<name>`, or `<root>/<name>_1`, `<root>/<name>_2`, ...
///
/// Any existing entry with the candidate name (file or directory) counts
/// as taken. `root` itself is created if missing.
///
/// # Errors
/// - `FolderExhausted` if every suffix up to the limit is taken
/// - `Io` for any other filesystem failure
pub async fn create_unique_folder(root: &Path, name: &str) -> Result<PathBuf> {
    tokio::fs::create_dir_all(root).await?;

    let base = root.join(name);
    for counter in 0..=MAX_FOLDER_SUFFIX {
        let candidate = if counter == 0 {
            base.clone()
        } else {
            root.join(format!("{}_{}", name, counter))
        };

        match tokio::fs::create_dir(&candidate).await {
            Ok(()) => return Ok(candidate),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(PinboardError::Io(e)),
        }
    }

    Err(PinboardError::FolderExhausted(base))
}

/// Writes `bytes` to `<dir>/<filename>` unless that file already exists
///
/// Bytes are staged in a hidden temp file in `dir` and moved into place
/// with a no-clobber rename, so the destination only ever holds a complete
/// body. A failed or interrupted write leaves nothing behind.
///
/// # Returns
/// The destination path and whether the file was already present
/// (in which case it is left byte-for-byte untouched)
pub async fn save_if_absent(dir: &Path, filename: &str, bytes: Vec<u8>) -> Result<(PathBuf, bool)> {
    let dir = dir.to_path_buf();
    let filename = filename.to_string();

    tokio::task::spawn_blocking(move || {
        save_with(&dir, &filename, |file| file.write_all(&bytes))
    })
    .await
    .map_err(|e| PinboardError::Io(std::io::Error::other(e)))?
}

fn save_with<F>(dir: &Path, filename: &str, write: F) -> Result<(PathBuf, bool)>
where
    F: FnOnce(&mut std::fs::File) -> std::io::Result<()>,
{
    let path = dir.join(filename);
    if path.exists() {
        return Ok((path, true));
    }

    let mut staged = tempfile::Builder::new()
        .prefix(".pinboard-")
        .suffix(".part")
        .tempfile_in(dir)?;
    write(staged.as_file_mut())?;
    staged.as_file_mut().sync_all()?;

    match staged.persist_noclobber(&path) {
        Ok(_) => Ok((path, false)),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok((path, true)),
        Err(e) => Err(PinboardError::Io(e.error)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_unique_folder_suffixes() {
        let root = tempfile::tempdir().unwrap();

        let first = create_unique_folder(root.path(), "cats").await.unwrap();
        let second = create_unique_folder(root.path(), "cats").await.unwrap();
        let third = create_unique_folder(root.path(), "cats").await.unwrap();

        assert_eq!(first, root.path().join("cats"));
        assert_eq!(second, root.path().join("cats_1"));
        assert_eq!(third, root.path().join("cats_2"));
        assert!(first.is_dir() && second.is_dir() && third.is_dir());
    }

    #[tokio::test]
    async fn test_create_unique_folder_file_in_the_way() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("dogs"), b"not a folder").unwrap();

        let folder = create_unique_folder(root.path(), "dogs").await.unwrap();
        assert_eq!(folder, root.path().join("dogs_1"));
    }

    #[tokio::test]
    async fn test_create_unique_folder_creates_root() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");

        let folder = create_unique_folder(&nested, "gallery").await.unwrap();
        assert_eq!(folder, nested.join("gallery"));
        assert!(folder.is_dir());
    }

    #[tokio::test]
    async fn test_save_if_absent_writes_once() {
        let dir = tempfile::tempdir().unwrap();

        let (path, existed) = save_if_absent(dir.path(), "a.jpg", b"first".to_vec()).await.unwrap();
        assert!(!existed);
        assert_eq!(std::fs::read(&path).unwrap(), b"first");

        let (again, existed) = save_if_absent(dir.path(), "a.jpg", b"second".to_vec()).await.unwrap();
        assert!(existed);
        assert_eq!(again, path);
        assert_eq!(std::fs::read(&path).unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_save_if_absent_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let result = save_if_absent(&missing, "a.jpg", b"x".to_vec()).await;
        assert!(matches!(result, Err(PinboardError::Io(_))));
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = save_with(dir.path(), "a.jpg", |file| {
            file.write_all(b"partial")?;
            Err(std::io::Error::other("disk full"))
        });
        assert!(matches!(result, Err(PinboardError::Io(_))));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        let (path, existed) = save_with(dir.path(), "a.jpg", |file| file.write_all(b"complete")).unwrap();
        assert!(!existed);
        assert_eq!(std::fs::read(&path).unwrap(), b"complete");
    }

    #[tokio::test]
    async fn test_save_if_absent_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();

        save_if_absent(dir.path(), "a.jpg", vec![1u8; 32]).await.unwrap();
        save_if_absent(dir.path(), "a.jpg", vec![2u8; 32]).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg"]);
    }
}
