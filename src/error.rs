use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a single file could not be stripped.
#[derive(Error, Debug)]
pub enum StripError {
    #[error("File '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("No write permission for '{}'", .0.display())]
    Permission(PathBuf),

    #[error("{} already exists", .0.display())]
    OutputExists(PathBuf),

    #[error("{} has an unsupported format ({format})", path.display())]
    UnsupportedFormat { path: PathBuf, format: String },

    #[error("Problem while processing {}: {source}", path.display())]
    Processing {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T, E = StripError> = std::result::Result<T, E>;

impl StripError {
    pub fn unsupported(path: &Path, format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            path: path.to_path_buf(),
            format: format.into(),
        }
    }

    pub fn processing(
        path: &Path,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Processing {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    /// Map an I/O error raised while reading the input.
    pub fn from_read(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::processing(path, err),
        }
    }

    /// Map an I/O error raised while creating or writing the output.
    pub fn from_write(input: &Path, output: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => Self::Permission(output.to_path_buf()),
            std::io::ErrorKind::AlreadyExists => Self::OutputExists(output.to_path_buf()),
            _ => Self::processing(input, err),
        }
    }

    /// Map an encoder failure, which may wrap an I/O error on the output.
    pub fn from_encode(input: &Path, output: &Path, err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Self::from_write(input, output, io),
            other => Self::processing(input, other),
        }
    }

    /// Short machine-readable name, used by the JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            StripError::NotFound(_) => "not_found",
            StripError::Permission(_) => "permission",
            StripError::OutputExists(_) => "output_exists",
            StripError::UnsupportedFormat { .. } => "unsupported_format",
            StripError::Processing { .. } => "processing",
        }
    }
}
