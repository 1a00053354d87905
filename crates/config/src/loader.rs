//! Layered configuration loading.

use std::{path::Path, sync::Arc};

use {
    serde_yaml::Value,
    tracing::{debug, warn},
};

use crate::{
    Mapping,
    bootstrap::ConfigBootstrapper,
    error::{Error, Result},
    fs::Filesystem,
    log::{LogContext, Logger},
    merge::merge,
    parser::TextParser,
    paths::ConfigPaths,
    state::LoadState,
};

/// Builds an extension's configuration from defaults, the primary file and
/// the local override, once per loader.
pub struct ConfigLoader {
    fs: Arc<dyn Filesystem>,
    parser: Arc<dyn TextParser>,
    logger: Arc<dyn Logger>,
    bootstrapper: ConfigBootstrapper,
    state: LoadState<Arc<Mapping>>,
}

impl ConfigLoader {
    pub fn new(
        fs: Arc<dyn Filesystem>,
        parser: Arc<dyn TextParser>,
        logger: Arc<dyn Logger>,
        bootstrapper: ConfigBootstrapper,
    ) -> Self {
        Self {
            fs,
            parser,
            logger,
            bootstrapper,
            state: LoadState::Unloaded,
        }
    }

    /// Load the configuration, or return the cached copy.
    ///
    /// The first call layers `defaults`, `{config_root}/{basefile}.yml`
    /// (created from `template` when missing) and
    /// `{config_root}/{basefile}_local.yml`. Later calls return the same value
    /// without touching the filesystem, whatever arguments they pass.
    pub fn load(
        &mut self,
        defaults: Mapping,
        machine_name: &str,
        config_root: &Path,
        template: &Path,
    ) -> Arc<Mapping> {
        match &self.state {
            LoadState::Loaded(config) => return Arc::clone(config),
            LoadState::Loading => {
                warn!(machine_name, "re-entrant config load, returning defaults");
                return Arc::new(defaults);
            },
            LoadState::Unloaded => {},
        }

        self.state = LoadState::Loading;
        let paths = ConfigPaths::resolve(machine_name, config_root);
        let mut config = defaults;

        if self.bootstrapper.ensure(&paths.primary, template, true) {
            config = self.apply_layer(config, &paths.primary);
        }
        if self.bootstrapper.ensure(&paths.local, template, false) {
            config = self.apply_layer(config, &paths.local);
        }

        debug!(machine_name, keys = config.len(), "extension config loaded");
        let config = Arc::new(config);
        self.state = LoadState::Loaded(Arc::clone(&config));
        config
    }

    /// The cached configuration, if [`load`](Self::load) has completed.
    pub fn loaded(&self) -> Option<Arc<Mapping>> {
        self.state.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    fn apply_layer(&self, config: Mapping, path: &Path) -> Mapping {
        match self.read_layer(path) {
            Ok(layer) => merge(config, layer),
            Err(Error::EmptyOrMalformedLayer { .. }) => {
                debug!(path = %path.display(), "config layer is empty, skipping");
                config
            },
            Err(err) => {
                self.logger.error(&err.to_string(), &LogContext::exception(&err));
                config
            },
        }
    }

    fn read_layer(&self, path: &Path) -> Result<Mapping> {
        let text = self
            .fs
            .read_to_string(path)
            .map_err(|e| Error::parse(path, e.into()))?;
        match self.parser.parse(&text) {
            Ok(Value::Mapping(layer)) => Ok(layer),
            Ok(_) => Err(Error::EmptyOrMalformedLayer {
                path: path.to_path_buf(),
            }),
            Err(err) => Err(Error::parse(path, err)),
        }
    }
}
