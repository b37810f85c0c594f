use std::path::PathBuf;

use graymap::ErrorKind;
use thiserror::Error;

/// Application-level error: a core failure plus where it happened.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: graymap::Error,
    },

    #[error("Processing {}: {source}", path.display())]
    Process {
        path: PathBuf,
        source: graymap::ComputeError,
    },

    #[error("Writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: graymap::Error,
    },

    #[error("Preview {}: {source}", path.display())]
    Preview {
        path: PathBuf,
        source: PreviewError,
    },

    #[error("Cannot read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// PNG preview failure.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: usize, height: usize },

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Process exit codes, one per error class.
pub mod exit {
    pub const USAGE: u8 = 1;
    pub const FORMAT: u8 = 2;
    pub const IO: u8 = 3;
    pub const COMPUTE: u8 = 4;
    pub const CONFIG: u8 = 5;
}

impl AppError {
    /// Core classification, if the error came from the image pipeline.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AppError::Open { .. } | AppError::Create { .. } => Some(ErrorKind::Io),
            AppError::Read { source, .. } | AppError::Write { source, .. } => Some(source.kind()),
            AppError::Process { .. } => Some(ErrorKind::Compute),
            AppError::Preview { source, .. } => match source {
                PreviewError::Io(_) => Some(ErrorKind::Io),
                _ => Some(ErrorKind::Compute),
            },
            AppError::ConfigRead { .. } | AppError::ConfigParse { .. } | AppError::Json(_) => None,
        }
    }

    /// Exit status for this error, see [`exit`].
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::ConfigRead { .. } | AppError::ConfigParse { .. } => exit::CONFIG,
            _ => match self.kind() {
                Some(ErrorKind::Format) => exit::FORMAT,
                Some(ErrorKind::Io) => exit::IO,
                Some(ErrorKind::Compute) => exit::COMPUTE,
                None => exit::USAGE,
            },
        }
    }
}
