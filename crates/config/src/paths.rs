//! On-disk locations of an extension's configuration files.

use std::path::{Path, PathBuf};

/// Name of the distributable template shipped in an extension's root.
pub const DIST_TEMPLATE_FILENAME: &str = "config.yml.dist";

/// The two configuration files of one extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// `{config_root}/{basefile}.yml`, created from the template when missing.
    pub primary: PathBuf,
    /// `{config_root}/{basefile}_local.yml`, never created automatically.
    pub local: PathBuf,
}

impl ConfigPaths {
    /// Derive both paths from a machine name.
    ///
    /// `vendor/name` becomes the base file `name.vendor` (name first, so the
    /// files of same-named extensions sort together). Anything after a second
    /// `/` is ignored. A machine name without `/` is used as is.
    pub fn resolve(machine_name: &str, config_root: &Path) -> Self {
        let base = basefile(machine_name);
        Self {
            primary: config_root.join(format!("{base}.yml")),
            local: config_root.join(format!("{base}_local.yml")),
        }
    }
}

/// Path of the distributable template inside an extension root.
pub fn dist_template(extension_root: &Path) -> PathBuf {
    extension_root.join(DIST_TEMPLATE_FILENAME)
}

fn basefile(machine_name: &str) -> String {
    let mut parts = machine_name.split('/');
    let first = parts.next().unwrap_or_default();
    match parts.next() {
        Some(second) => format!("{second}.{first}"),
        None => first.to_string(),
    }
}
