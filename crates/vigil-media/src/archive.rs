//! Archival of finished session files into dated subfolders.
//!
//! Recordings land in a flat output area; archival moves every file with the
//! configured extension into a `YYYY-MM-DD/` subfolder so footage stays
//! organized by day. Moves handle the EXDEV (cross-device link) error by
//! falling back to copy-and-delete.

use std::path::Path;

use chrono::Local;
use tokio::fs;

use crate::error::{MediaError, MediaResult};

/// Outcome of one archival pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    /// Files moved into the dated subfolder
    pub moved: usize,
    /// Files that failed to move and were skipped
    pub skipped: usize,
}

/// Move every recording in the flat output area into today's dated subfolder.
///
/// Idempotent: files already archived are no longer in the flat area, so a
/// second pass moves nothing. A failure moving an individual file is logged
/// and skipped; it never aborts the rest of the batch.
pub async fn archive_recordings(
    output_dir: impl AsRef<Path>,
    extension: &str,
) -> MediaResult<ArchiveReport> {
    let output_dir = output_dir.as_ref();
    let dated_dir = output_dir.join(Local::now().format("%Y-%m-%d").to_string());

    let mut report = ArchiveReport::default();
    let mut entries = match fs::read_dir(output_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(dir = %output_dir.display(), "Output area missing, nothing to archive");
            return Ok(report);
        }
        Err(e) => return Err(MediaError::from(e)),
    };

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !path.is_file() || !has_extension(&path, extension) {
            continue;
        }

        let file_name = match path.file_name() {
            Some(name) => name.to_owned(),
            None => continue,
        };
        let dst = dated_dir.join(&file_name);

        match move_file(&path, &dst).await {
            Ok(()) => {
                tracing::info!(
                    file = %file_name.to_string_lossy(),
                    dest = %dated_dir.display(),
                    "Archived recording"
                );
                report.moved += 1;
            }
            Err(e) => {
                tracing::warn!(
                    file = %file_name.to_string_lossy(),
                    error = %e,
                    "Failed to archive recording, skipping"
                );
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

/// Case-sensitive match on the configured extension (including its dot).
fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(extension))
        .unwrap_or(false)
}

/// Move a file from `src` to `dst`, handling cross-device moves.
///
/// Attempts a fast rename first. On EXDEV (cross-device link error) it falls
/// back to copy-and-delete, copying to a temp file next to the destination
/// and renaming so the destination appears atomically.
pub async fn move_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> MediaResult<()> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if let Some(parent) = dst.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    match fs::rename(src, dst).await {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device_error(&e) => {
            tracing::debug!(
                "Cross-device rename detected, falling back to copy+delete: {} -> {}",
                src.display(),
                dst.display()
            );
            copy_and_delete(src, dst).await
        }
        Err(e) => Err(MediaError::from(e)),
    }
}

/// Check if an IO error is EXDEV (cross-device link).
fn is_cross_device_error(e: &std::io::Error) -> bool {
    // EXDEV is error code 18 on Linux/macOS
    e.raw_os_error() == Some(18)
}

/// Copy file to destination (via temp file) then delete source.
async fn copy_and_delete(src: &Path, dst: &Path) -> MediaResult<()> {
    let tmp_dst = dst.with_extension("tmp");

    fs::copy(src, &tmp_dst).await?;

    if let Err(e) = fs::rename(&tmp_dst, dst).await {
        let _ = std::fs::remove_file(&tmp_dst);
        return Err(MediaError::from(e));
    }

    // Best effort: the footage is safe at the destination either way
    if let Err(e) = fs::remove_file(src).await {
        tracing::warn!(
            "Failed to remove source file after cross-device move: {}: {}",
            src.display(),
            e
        );
    }

    Ok(())
}
