use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Transient on-disk copy of an uploaded image.
///
/// The staged-file transport hands the workflow endpoint a file rather than
/// in-memory bytes, so the upload is written under a unique UUIDv7 name and
/// deleted when the guard drops. Concurrent requests therefore never collide,
/// and the file is gone after the call on success, error and early-return
/// paths alike.
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    /// Write `data` to a fresh file in `dir`, inferring the suffix from the
    /// upload's filename hint.
    pub async fn create(dir: &Path, filename_hint: &str, data: &[u8]) -> std::io::Result<Self> {
        let path = dir.join(format!("upload-{}.{}", Uuid::now_v7(), suffix_of(filename_hint)));
        tokio::fs::write(&path, data).await?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        // The name is always of our own making, so it is valid UTF-8.
        self.path
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("image")
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    "failed to remove staging artifact {}: {}",
                    self.path.display(),
                    err
                );
            }
        }
    }
}

/// File suffix from a client-supplied filename, constrained to something a
/// path can safely carry. Falls back to `jpg`.
fn suffix_of(filename_hint: &str) -> &str {
    Path::new(filename_hint)
        .extension()
        .and_then(OsStr::to_str)
        .filter(|ext| !ext.is_empty() && ext.len() <= 8)
        .filter(|ext| ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or("jpg")
}
