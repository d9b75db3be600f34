//! Saving generated DDL to disk
//!
//! The download action of a DDL pane opens a native save dialog through
//! `rfd`, preset to the artifact's filename, and writes the exact bytes of
//! the generation the pane currently shows.

use rfd::AsyncFileDialog;
use schemaport_console::DownloadRef;
use schemaport_core::{ConsoleError, ConsoleResult, ResultExt};
use std::path::{Path, PathBuf};

/// Display name for the file filter
pub const FILE_TYPE_NAME: &str = "SQL Script";

/// Extension of saved DDL files
pub const FILE_EXTENSION: &str = "sql";

/// Ask where to save a DDL file
///
/// Returns `None` if the dialog was cancelled.
pub async fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    let file = AsyncFileDialog::new()
        .set_title("Save DDL")
        .add_filter(FILE_TYPE_NAME, &[FILE_EXTENSION])
        .add_filter("All Files", &["*"])
        .set_file_name(default_name)
        .save_file()
        .await?;

    Some(ensure_extension(file.path().to_path_buf()))
}

/// Save a download, asking for the location first
pub async fn save_download(download: &DownloadRef) -> ConsoleResult<PathBuf> {
    let path = show_save_dialog(&download.filename)
        .await
        .ok_or(ConsoleError::Cancelled)?;
    write_download(download, &path).await?;
    Ok(path)
}

/// Write a download's bytes to `path`
pub async fn write_download(download: &DownloadRef, path: &Path) -> ConsoleResult<()> {
    tokio::fs::write(path, &download.bytes[..])
        .await
        .with_context(format!("Saving {}", path.display()))?;
    tracing::info!("Saved {} bytes of DDL to {}", download.bytes.len(), path.display());
    Ok(())
}

/// Add `.sql` unless the name already has an extension
pub fn ensure_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(FILE_EXTENSION)
    }
}
