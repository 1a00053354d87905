use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("no package descriptor at {}", path.display())]
    DescriptorAbsent { path: PathBuf },

    #[error("package descriptor at {} is not a JSON object", path.display())]
    DescriptorNotObject { path: PathBuf },

    #[error("unknown widget zone: {0}")]
    UnknownWidgetZone(String),

    #[error("unknown install type: {0}")]
    UnknownInstallType(String),
}

impl Error {
    #[must_use]
    pub fn descriptor_absent(path: &Path) -> Self {
        Self::DescriptorAbsent {
            path: path.to_path_buf(),
        }
    }

    #[must_use]
    pub fn descriptor_not_object(path: &Path) -> Self {
        Self::DescriptorNotObject {
            path: path.to_path_buf(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
