//! Make sure a configuration file is present before it is parsed.

use std::{path::Path, sync::Arc};

use tracing::debug;

use crate::{
    error::{Error, parent_dir},
    fs::Filesystem,
    log::{FlashNotifier, LogContext, Logger},
};

/// Checks configuration files and creates missing ones from a template.
///
/// Every failure is logged and reported as `false`; nothing is returned as an
/// error and nothing panics.
#[derive(Clone)]
pub struct ConfigBootstrapper {
    fs: Arc<dyn Filesystem>,
    logger: Arc<dyn Logger>,
    flash: Arc<dyn FlashNotifier>,
}

impl ConfigBootstrapper {
    pub fn new(
        fs: Arc<dyn Filesystem>,
        logger: Arc<dyn Logger>,
        flash: Arc<dyn FlashNotifier>,
    ) -> Self {
        Self { fs, logger, flash }
    }

    /// Returns `true` when `path` exists, is readable and can be parsed.
    ///
    /// - An existing but unreadable file is reported (critical log and flash)
    ///   and left alone.
    /// - A missing file with `create == false` is simply absent.
    /// - A missing file with `create == true` is copied from `template` if the
    ///   template is readable and the parent directory exists or can be made.
    pub fn ensure(&self, path: &Path, template: &Path, create: bool) -> bool {
        if self.fs.exists(path) {
            if self.fs.is_readable(path) {
                return true;
            }
            self.report_critical(&Error::not_readable(path));
            return false;
        }

        if !create {
            debug!(path = %path.display(), "optional config file not present");
            return false;
        }

        self.create_from_template(path, template)
    }

    fn create_from_template(&self, path: &Path, template: &Path) -> bool {
        let dir = parent_dir(path);
        if let Err(source) = self.fs.create_dir_all(&dir) {
            let err = Error::directory_create_failed(&dir, source);
            let message = err.to_string();
            self.flash.error(&message);
            self.logger.error(&message, &LogContext::exception(&err));
        }

        if !self.fs.is_readable(template) || !self.fs.is_dir(&dir) {
            debug!(
                path = %path.display(),
                template = %template.display(),
                "no template to create config file from"
            );
            return false;
        }

        match self.fs.copy(template, path) {
            Ok(()) => {
                self.logger.info(
                    &format!("Copied {} to {}", template.display(), path.display()),
                    &LogContext::extensions(),
                );
                true
            },
            Err(source) => {
                self.report_critical(&Error::template_copy_failed(template, path, source));
                false
            },
        }
    }

    fn report_critical(&self, err: &Error) {
        let message = err.to_string();
        self.logger.critical(&message, &LogContext::extensions());
        self.flash.error(&message);
    }
}
