//! Error types shared across Bango crates.

use std::path::PathBuf;

/// Top-level error type for Bango operations.
#[derive(Debug, thiserror::Error)]
pub enum BangoError {
    #[error("Model error: {message}")]
    Model { message: String },

    #[error("Content generation error: {message}")]
    Generate { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using BangoError.
pub type BangoResult<T> = Result<T, BangoError>;

impl BangoError {
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model {
            message: msg.into(),
        }
    }

    pub fn generate(msg: impl Into<String>) -> Self {
        Self::Generate {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_messages() {
        let err = BangoError::export("canvas tainted");
        assert_eq!(err.to_string(), "Export error: canvas tainted");

        let err = BangoError::FileNotFound {
            path: PathBuf::from("logo.png"),
        };
        assert_eq!(err.to_string(), "File not found: logo.png");
    }

    #[test]
    fn test_io_error_converts() {
        fn fails() -> BangoResult<()> {
            Err(std::io::Error::other("disk full"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(BangoError::Io(_))));
    }
}
