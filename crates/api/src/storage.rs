//! Local filesystem storage for uploaded images.
//!
//! Files live under `<root>/<module>/<project_id>[/<sub_id>]/<stored name>`
//! and are served read-only at [`PUBLIC_PREFIX`] by the router.

use std::io;
use std::path::{Path, PathBuf};

use shootdesk_core::types::DbId;
use shootdesk_core::uploads::{is_safe_relative_path, secure_filename};

/// URL prefix under which the upload root is served.
pub const PUBLIC_PREFIX: &str = "/api/v1/uploads";

/// Top-level upload directory per project section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadModule {
    Moodboard,
    Selection,
    Results,
}

impl UploadModule {
    pub const ALL: [UploadModule; 3] = [Self::Moodboard, Self::Selection, Self::Results];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Moodboard => "moodboard",
            Self::Selection => "selection",
            Self::Results => "results",
        }
    }
}

/// A file written by [`UploadStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Generated name on disk.
    pub filename: String,
    /// Path clients fetch the file from.
    pub public_path: String,
}

#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a path relative to the upload root onto the filesystem.
    ///
    /// Returns `None` for absolute paths or paths that climb out of the root.
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        is_safe_relative_path(relative).then(|| self.root.join(relative))
    }

    /// Write `bytes` under a collision-resistant name and return where it
    /// landed.
    pub async fn save(
        &self,
        module: UploadModule,
        project_id: DbId,
        sub_id: Option<DbId>,
        original_name: &str,
        bytes: &[u8],
    ) -> io::Result<StoredFile> {
        let mut dir = format!("{}/{project_id}", module.as_str());
        if let Some(sub_id) = sub_id {
            dir.push_str(&format!("/{sub_id}"));
        }
        let filename = secure_filename(original_name);
        let relative = format!("{dir}/{filename}");

        let dest = self.resolve(&relative).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "unsafe upload path")
        })?;
        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&dest, bytes).await?;

        tracing::debug!(path = %dest.display(), size = bytes.len(), "Stored upload");

        Ok(StoredFile {
            filename,
            public_path: format!("{PUBLIC_PREFIX}/{relative}"),
        })
    }

    /// Remove every upload directory of a project. Failures are logged and
    /// otherwise ignored.
    pub async fn remove_project(&self, project_id: DbId) {
        for module in UploadModule::ALL {
            let dir = self.root.join(module.as_str()).join(project_id.to_string());
            match tokio::fs::remove_dir_all(&dir).await {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(
                        project_id,
                        dir = %dir.display(),
                        error = %e,
                        "Failed to remove project uploads"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_writes_under_module_and_project() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path());

        let stored = store
            .save(UploadModule::Moodboard, 7, Some(3), "Look 1.png", b"png-bytes")
            .await
            .unwrap();

        assert!(stored.filename.ends_with(".png"));
        assert_eq!(
            stored.public_path,
            format!("/api/v1/uploads/moodboard/7/3/{}", stored.filename)
        );
        let on_disk = tmp.path().join("moodboard/7/3").join(&stored.filename);
        assert_eq!(std::fs::read(on_disk).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn save_without_sub_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path());

        let stored = store
            .save(UploadModule::Selection, 9, None, "a.jpg", b"x")
            .await
            .unwrap();
        assert!(stored
            .public_path
            .starts_with("/api/v1/uploads/selection/9/"));
    }

    #[test]
    fn resolve_rejects_traversal() {
        let store = UploadStore::new("/srv/uploads");
        assert_eq!(
            store.resolve("results/1/a.png"),
            Some(PathBuf::from("/srv/uploads/results/1/a.png"))
        );
        assert_eq!(store.resolve("../etc/passwd"), None);
        assert_eq!(store.resolve("/etc/passwd"), None);
    }

    #[tokio::test]
    async fn remove_project_only_touches_that_project() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path());
        store
            .save(UploadModule::Results, 1, Some(1), "a.png", b"1")
            .await
            .unwrap();
        store
            .save(UploadModule::Selection, 1, None, "b.png", b"1")
            .await
            .unwrap();
        store
            .save(UploadModule::Selection, 2, None, "c.png", b"2")
            .await
            .unwrap();

        store.remove_project(1).await;

        assert!(!tmp.path().join("results/1").exists());
        assert!(!tmp.path().join("selection/1").exists());
        assert!(tmp.path().join("selection/2").exists());
    }

    #[tokio::test]
    async fn remove_missing_project_is_quiet() {
        let tmp = tempfile::tempdir().unwrap();
        UploadStore::new(tmp.path()).remove_project(42).await;
    }
}
