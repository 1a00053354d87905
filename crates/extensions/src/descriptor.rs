//! Package descriptor (`descriptor.json`) of an extension.
//!
//! The descriptor is optional. It is read at most once per cache; a missing
//! file is a normal state and is remembered as such.

use std::path::{Path, PathBuf};

use {
    lantern_config::{Filesystem, LoadState},
    serde::{Deserialize, Serialize},
    serde_json::{Map, Value},
    tracing::{debug, warn},
};

use crate::error::{Error, Result};

/// File name of the descriptor inside an extension root.
pub const DESCRIPTOR_FILENAME: &str = "descriptor.json";

/// Package metadata: a `name` plus arbitrary fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageDescriptor(Map<String, Value>);

impl PackageDescriptor {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The `name` field, when it is a non-empty string.
    pub fn name(&self) -> Option<&str> {
        self.0
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for PackageDescriptor {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Lazily loaded descriptor of one extension.
#[derive(Debug)]
pub struct DescriptorCache {
    path: PathBuf,
    state: LoadState<Option<PackageDescriptor>>,
}

impl DescriptorCache {
    pub fn new(extension_root: &Path) -> Self {
        Self {
            path: extension_root.join(DESCRIPTOR_FILENAME),
            state: LoadState::Unloaded,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    /// The descriptor, reading it on first use.
    ///
    /// Missing and unparsable files both resolve to `None`, and that result
    /// is cached like any other.
    pub fn get(&mut self, fs: &dyn Filesystem) -> Option<&PackageDescriptor> {
        if !self.state.is_loaded() {
            self.state = LoadState::Loading;
            let descriptor = match self.read(fs) {
                Ok(descriptor) => Some(descriptor),
                Err(Error::DescriptorAbsent { .. }) => {
                    debug!(path = %self.path.display(), "no package descriptor");
                    None
                },
                Err(e) => {
                    warn!(path = %self.path.display(), error = %e, "ignoring package descriptor");
                    None
                },
            };
            self.state.set(descriptor);
        }
        self.state.get().and_then(Option::as_ref)
    }

    /// Use `descriptor` instead of the file, now and for the rest of this
    /// cache's life.
    pub fn set(&mut self, descriptor: PackageDescriptor) -> &PackageDescriptor {
        self.state.set(None).insert(descriptor)
    }

    fn read(&self, fs: &dyn Filesystem) -> Result<PackageDescriptor> {
        if !fs.exists(&self.path) {
            return Err(Error::descriptor_absent(&self.path));
        }
        let raw = fs.read_to_string(&self.path)?;
        match serde_json::from_str::<Value>(&raw)? {
            Value::Object(fields) => Ok(PackageDescriptor(fields)),
            _ => Err(Error::descriptor_not_object(&self.path)),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {lantern_config::StdFilesystem, serde_json::json};

    use super::*;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn missing_file_is_cached_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cache = DescriptorCache::new(tmp.path());
        assert!(cache.get(&StdFilesystem).is_none());
        assert!(cache.is_loaded());

        // Appearing later does not matter once resolved.
        std::fs::write(cache.path().to_path_buf(), r#"{"name": "acme/late"}"#).unwrap();
        assert!(cache.get(&StdFilesystem).is_none());
    }

    #[test]
    fn reads_descriptor_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(DESCRIPTOR_FILENAME),
            r#"{"name": "Acme/Greeter", "version": "1.2.0"}"#,
        )
        .unwrap();
        let mut cache = DescriptorCache::new(tmp.path());
        let descriptor = cache.get(&StdFilesystem).expect("descriptor");
        assert_eq!(descriptor.name(), Some("Acme/Greeter"));
        assert_eq!(descriptor.get("version"), Some(&json!("1.2.0")));
    }

    #[test]
    fn set_overrides_file_and_suppresses_reads() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(DESCRIPTOR_FILENAME),
            r#"{"name": "from/file"}"#,
        )
        .unwrap();
        let mut cache = DescriptorCache::new(tmp.path());
        let injected = PackageDescriptor::new(fields(json!({"name": "simulated/pkg"})));
        assert_eq!(cache.set(injected.clone()), &injected);
        assert_eq!(
            cache.get(&StdFilesystem).and_then(PackageDescriptor::name),
            Some("simulated/pkg")
        );
    }

    #[test]
    fn invalid_json_is_treated_as_absent() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(DESCRIPTOR_FILENAME), "{not json").unwrap();
        let mut cache = DescriptorCache::new(tmp.path());
        assert!(cache.get(&StdFilesystem).is_none());
    }

    #[test]
    fn non_object_root_is_treated_as_absent() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(DESCRIPTOR_FILENAME), "[1, 2]").unwrap();
        let mut cache = DescriptorCache::new(tmp.path());
        assert!(cache.get(&StdFilesystem).is_none());
    }

    #[test]
    fn empty_or_non_string_name_is_none() {
        assert_eq!(
            PackageDescriptor::new(fields(json!({"name": ""}))).name(),
            None
        );
        assert_eq!(PackageDescriptor::new(fields(json!({"name": 7}))).name(), None);
        assert_eq!(PackageDescriptor::default().name(), None);
    }
}
