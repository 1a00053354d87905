use std::path::{Path, PathBuf};

use thiserror::Error;

/// Configuration failures.
///
/// The `Display` text of each variant is the diagnostic that ends up in the
/// system log and, where relevant, in the user-facing flash notice.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(
        "Couldn't read {}. Please correct file permissions and ensure the {} directory readable.",
        path.display(),
        dir.display()
    )]
    NotReadable { path: PathBuf, dir: PathBuf },

    #[error("Unable to create extension configuration directory at {}", dir.display())]
    DirectoryCreateFailed {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Couldn't copy {} to {}: File is not writable. Create the file manually, or make the {} directory writable.",
        template.display(),
        path.display(),
        dir.display()
    )]
    TemplateCopyFailed {
        template: PathBuf,
        path: PathBuf,
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} does not contain a mapping", path.display())]
    EmptyOrMalformedLayer { path: PathBuf },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    #[must_use]
    pub fn not_readable(path: &Path) -> Self {
        Self::NotReadable {
            path: path.to_path_buf(),
            dir: parent_dir(path),
        }
    }

    #[must_use]
    pub fn directory_create_failed(dir: &Path, source: std::io::Error) -> Self {
        Self::DirectoryCreateFailed {
            dir: dir.to_path_buf(),
            source,
        }
    }

    #[must_use]
    pub fn template_copy_failed(template: &Path, path: &Path, source: std::io::Error) -> Self {
        Self::TemplateCopyFailed {
            template: template.to_path_buf(),
            path: path.to_path_buf(),
            dir: parent_dir(path),
            source,
        }
    }

    #[must_use]
    pub fn parse(path: &Path, source: Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source: Box::new(source),
        }
    }
}

/// Parent directory of `path`, or `.` for bare file names.
pub(crate) fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
