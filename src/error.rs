use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while validating input and writing the checkerboard.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("'{value}' is an invalid number of subdivisions.")]
    InvalidArgument { value: String },

    #[error("'{value}' is an invalid preview size, expected 1 to {max} pixels.")]
    InvalidPreviewSize { value: String, max: u32 },

    #[error("Failed to write {}: {source}", .path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Gradient stop offset {offset} must lie in [0, 1] and follow the previous stop")]
    InvalidGradientStop { offset: f64 },

    #[error("Failed to load font {}: {reason}", .path.display())]
    Font { path: PathBuf, reason: String },

    #[error("Failed to encode image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl RenderError {
    pub fn invalid_argument(value: impl ToString) -> Self {
        RenderError::InvalidArgument {
            value: value.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RenderError::IoFailure {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
