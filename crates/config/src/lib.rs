//! Layered on-disk configuration for extensions.
//!
//! An extension's configuration is built from three layers, merged in order:
//! built-in defaults, the primary file `{config_root}/{basefile}.yml` and the
//! optional local override `{config_root}/{basefile}_local.yml`. The primary
//! file is created from the extension's `config.yml.dist` template on first
//! use.
//!
//! Nothing in this crate fails loudly. Unreadable files, directories that
//! cannot be created and failed template copies are reported through the
//! [`Logger`] and [`FlashNotifier`] collaborators, and the configuration
//! degrades to whatever layers could be read.

pub mod bootstrap;
pub mod error;
pub mod fs;
pub mod loader;
pub mod log;
pub mod merge;
pub mod parser;
pub mod paths;
pub mod state;

pub use {
    bootstrap::ConfigBootstrapper,
    error::{Error, Result},
    fs::{Filesystem, StdFilesystem},
    loader::ConfigLoader,
    log::{Flash, FlashBag, FlashNotifier, LogContext, Logger, TracingLogger},
    merge::merge,
    parser::{TextParser, YamlParser},
    paths::{ConfigPaths, DIST_TEMPLATE_FILENAME, dist_template},
    state::LoadState,
};

/// A configuration mapping, as parsed from YAML.
pub type Mapping = serde_yaml::Mapping;
