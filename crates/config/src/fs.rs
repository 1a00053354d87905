//! Filesystem access used while bootstrapping and loading configuration.

use std::{fs::File, io, path::Path};

/// The filesystem operations configuration loading needs.
///
/// All calls are synchronous and local. Implementations report failures
/// through `io::Result`; the callers turn them into diagnostics.
pub trait Filesystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` can be opened for reading.
    fn is_readable(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Create `path` and all missing parents. An existing directory is not an
    /// error.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// [`Filesystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFilesystem;

impl Filesystem for StdFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_readable(&self, path: &Path) -> bool {
        File::open(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::copy(from, to).map(|_| ())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}
