//! The per-extension facade.

use std::{
    path::{Component, Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use {
    lantern_config::{
        ConfigBootstrapper, ConfigLoader, ConfigPaths, FlashBag, FlashNotifier, Filesystem,
        Logger, Mapping, StdFilesystem, TextParser, TracingLogger, YamlParser, dist_template,
    },
    serde_json::{Map, Value, json},
    tracing::debug,
};

use crate::{
    deferred::{Payload, RenderQueues, Snippet, SnippetLocation, Widget, WidgetZone},
    descriptor::{DescriptorCache, PackageDescriptor},
    error::Error,
    machine_name::resolve_machine_name,
    slug::{DefaultSlugifier, Slugifier},
};

/// Collaborators an extension works through.
#[derive(Clone)]
pub struct ExtensionServices {
    pub fs: Arc<dyn Filesystem>,
    pub parser: Arc<dyn TextParser>,
    pub logger: Arc<dyn Logger>,
    pub flash: Arc<dyn FlashNotifier>,
    pub slugifier: Arc<dyn Slugifier>,
}

impl ExtensionServices {
    /// Std filesystem, YAML, `tracing` and slug defaults, reporting flash
    /// notices to `flash`.
    pub fn new(flash: Arc<dyn FlashNotifier>) -> Self {
        Self {
            fs: Arc::new(StdFilesystem),
            parser: Arc::new(YamlParser),
            logger: Arc::new(TracingLogger),
            flash,
            slugifier: Arc::new(DefaultSlugifier),
        }
    }

    pub fn with_filesystem(mut self, fs: Arc<dyn Filesystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn with_parser(mut self, parser: Arc<dyn TextParser>) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_slugifier(mut self, slugifier: Arc<dyn Slugifier>) -> Self {
        self.slugifier = slugifier;
        self
    }
}

impl Default for ExtensionServices {
    fn default() -> Self {
        Self::new(Arc::new(FlashBag::new()))
    }
}

/// Where an extension's files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionPaths {
    /// The extension's own directory (descriptor, `config.yml.dist`).
    pub root: PathBuf,
    /// Shared directory holding every extension's config files.
    pub config_root: PathBuf,
}

impl ExtensionPaths {
    pub fn new(root: impl Into<PathBuf>, config_root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config_root: config_root.into(),
        }
    }
}

/// How the extension was installed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InstallType {
    #[default]
    Composer,
    Local,
}

impl InstallType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Composer => "composer",
            Self::Local => "local",
        }
    }
}

impl FromStr for InstallType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "composer" => Ok(Self::Composer),
            "local" => Ok(Self::Local),
            other => Err(Error::UnknownInstallType(other.to_string())),
        }
    }
}

/// One installed extension.
pub struct Extension {
    name: String,
    paths: ExtensionPaths,
    services: ExtensionServices,
    install_type: InstallType,
    defaults: Mapping,
    descriptor: DescriptorCache,
    config: ConfigLoader,
    summary: Option<Map<String, Value>>,
}

impl Extension {
    /// Nothing is read from disk until the descriptor or config is asked for.
    pub fn new(name: impl Into<String>, paths: ExtensionPaths, services: ExtensionServices) -> Self {
        let bootstrapper = ConfigBootstrapper::new(
            Arc::clone(&services.fs),
            Arc::clone(&services.logger),
            Arc::clone(&services.flash),
        );
        let config = ConfigLoader::new(
            Arc::clone(&services.fs),
            Arc::clone(&services.parser),
            Arc::clone(&services.logger),
            bootstrapper,
        );
        Self {
            name: name.into(),
            descriptor: DescriptorCache::new(&paths.root),
            paths,
            services,
            install_type: InstallType::default(),
            defaults: Mapping::new(),
            config,
            summary: None,
        }
    }

    /// Built-in configuration, used as the bottom layer.
    pub fn with_default_config(mut self, defaults: Mapping) -> Self {
        self.defaults = defaults;
        self
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn paths(&self) -> &ExtensionPaths {
        &self.paths
    }

    pub fn install_type(&self) -> InstallType {
        self.install_type
    }

    /// Accepts `"composer"` or `"local"`; anything else is ignored.
    pub fn set_install_type(&mut self, value: &str) {
        match value.parse() {
            Ok(install_type) => self.install_type = install_type,
            Err(e) => debug!(extension = %self.name, error = %e, "install type unchanged"),
        }
    }

    /// Public URL of the extension root: `extensions_url` followed by the
    /// root's path below `extensions_dir`, with a trailing `/`.
    pub fn base_url(&self, extensions_dir: &Path, extensions_url: &str) -> String {
        let relative = self
            .paths
            .root
            .strip_prefix(extensions_dir)
            .unwrap_or(&self.paths.root);
        let segments: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if segments.is_empty() {
            return ensure_trailing_slash(extensions_url);
        }
        format!(
            "{}{}/",
            ensure_trailing_slash(extensions_url),
            segments.join("/")
        )
    }

    /// The package descriptor, read from `descriptor.json` on first use.
    pub fn descriptor(&mut self) -> Option<&PackageDescriptor> {
        self.descriptor.get(self.services.fs.as_ref())
    }

    /// Simulate a descriptor; the file is never read afterwards.
    pub fn set_descriptor(&mut self, descriptor: PackageDescriptor) -> &PackageDescriptor {
        self.summary = None;
        self.descriptor.set(descriptor)
    }

    /// The descriptor's `name`, e.g. `bolt/foobar-extension`.
    pub fn package_name(&mut self) -> Option<String> {
        self.descriptor()
            .and_then(PackageDescriptor::name)
            .map(str::to_string)
    }

    pub fn machine_name(&mut self) -> String {
        let descriptor = self.descriptor.get(self.services.fs.as_ref());
        resolve_machine_name(descriptor, &self.name, self.services.slugifier.as_ref())
    }

    pub fn config_paths(&mut self) -> ConfigPaths {
        ConfigPaths::resolve(&self.machine_name(), &self.paths.config_root)
    }

    /// The layered configuration, loaded once.
    pub fn config(&mut self) -> Arc<Mapping> {
        if let Some(config) = self.config.loaded() {
            return config;
        }
        let machine_name = self.machine_name();
        let template = dist_template(&self.paths.root);
        self.config.load(
            self.defaults.clone(),
            &machine_name,
            &self.paths.config_root,
            &template,
        )
    }

    /// Entry for a consolidated all-extensions JSON file, keyed by the
    /// lowercased package name (or the display name without a descriptor).
    pub fn summary(&mut self) -> Map<String, Value> {
        if let Some(summary) = &self.summary {
            return summary.clone();
        }
        let name = self.name.clone();
        let (key, json) = match self.descriptor() {
            Some(descriptor) => (
                descriptor.name().unwrap_or(&name).to_lowercase(),
                Value::Object(descriptor.as_map().clone()),
            ),
            None => (name.clone(), json!({})),
        };
        let mut summary = Map::new();
        summary.insert(key, json!({ "name": name, "json": json }));
        self.summary = Some(summary.clone());
        summary
    }

    /// Queue a snippet for the current render pass, owned by this extension.
    pub fn add_snippet(
        &self,
        queues: &mut RenderQueues,
        location: impl Into<SnippetLocation>,
        payload: impl Into<Payload>,
        arguments: Vec<Value>,
    ) {
        queues.snippets.add(Snippet::new(
            location.into(),
            payload,
            self.name.as_str(),
            arguments,
        ));
    }

    /// Queue a widget for the current render pass, owned by this extension.
    pub fn add_widget(
        &self,
        queues: &mut RenderQueues,
        zone: WidgetZone,
        payload: impl Into<Payload>,
        arguments: Vec<Value>,
    ) {
        queues
            .widgets
            .add(Widget::new(zone, payload, self.name.as_str(), arguments));
    }
}

fn ensure_trailing_slash(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    }
}
