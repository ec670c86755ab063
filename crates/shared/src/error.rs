use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the file transfer surface (upload/download). These
/// never touch session state; the GUI surfaces them as notifications.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("unsupported file type '{}': expected a .rs or .txt source file", path.display())]
    UnsupportedExtension { path: PathBuf },
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
