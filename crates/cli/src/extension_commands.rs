//! `paths`, `descriptor` and `config` commands.

use std::{path::PathBuf, sync::Arc};

use {
    anyhow::{Context, Result},
    lantern_config::{Flash, FlashBag},
    lantern_extensions::{Extension, ExtensionPaths, ExtensionServices},
    tracing::debug,
};

/// Where the extension lives and what it is called.
pub struct ExtensionArgs {
    pub root: PathBuf,
    pub config_root: PathBuf,
    pub name: Option<String>,
}

impl ExtensionArgs {
    fn display_name(&self) -> Result<String> {
        if let Some(name) = &self.name {
            return Ok(name.clone());
        }
        let root = std::fs::canonicalize(&self.root)
            .with_context(|| format!("extension root {} not found", self.root.display()))?;
        root.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .context("cannot derive a name from the extension root; pass --name")
    }

    fn open(&self, flash: Arc<FlashBag>) -> Result<Extension> {
        let name = self.display_name()?;
        debug!(%name, root = %self.root.display(), "opening extension");
        Ok(Extension::new(
            name,
            ExtensionPaths::new(&self.root, &self.config_root),
            ExtensionServices::new(flash),
        ))
    }
}

pub fn paths(args: &ExtensionArgs) -> Result<()> {
    let mut ext = args.open(Arc::new(FlashBag::new()))?;
    let machine_name = ext.machine_name();
    let paths = ext.config_paths();
    println!("machine name: {machine_name}");
    println!("primary:      {}", paths.primary.display());
    println!("local:        {}", paths.local.display());
    Ok(())
}

pub fn descriptor(args: &ExtensionArgs) -> Result<()> {
    let mut ext = args.open(Arc::new(FlashBag::new()))?;
    match ext.descriptor() {
        Some(descriptor) => println!("{}", serde_json::to_string_pretty(descriptor)?),
        None => eprintln!(
            "no descriptor at {}",
            args.root.join(lantern_extensions::DESCRIPTOR_FILENAME).display()
        ),
    }
    Ok(())
}

pub fn config(args: &ExtensionArgs, json: bool) -> Result<()> {
    let flash = Arc::new(FlashBag::new());
    let mut ext = args.open(Arc::clone(&flash))?;
    let config = ext.config();

    for notice in flash.take() {
        match notice {
            Flash::Error(message) => eprintln!("error: {message}"),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&*config)?);
    } else {
        print!("{}", serde_yaml::to_string(&*config)?);
    }
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_defaults_to_root_dir_name() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("foo-bar");
        std::fs::create_dir_all(&root).unwrap();
        let args = ExtensionArgs {
            root,
            config_root: tmp.path().join("config"),
            name: None,
        };
        assert_eq!(args.display_name().unwrap(), "foo-bar");
    }

    #[test]
    fn explicit_name_wins() {
        let args = ExtensionArgs {
            root: PathBuf::from("/does/not/exist"),
            config_root: PathBuf::from("/tmp"),
            name: Some("Foo Bar".into()),
        };
        assert_eq!(args.display_name().unwrap(), "Foo Bar");
    }

    #[test]
    fn missing_root_without_name_is_an_error() {
        let args = ExtensionArgs {
            root: PathBuf::from("/does/not/exist/anywhere"),
            config_root: PathBuf::from("/tmp"),
            name: None,
        };
        assert!(args.display_name().is_err());
    }

    #[test]
    fn config_command_bootstraps_primary() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("greeter");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("config.yml.dist"), "greeting: hi\n").unwrap();
        let args = ExtensionArgs {
            root,
            config_root: tmp.path().join("config"),
            name: None,
        };
        config(&args, true).unwrap();
        assert!(tmp.path().join("config/greeter.yml").is_file());
    }
}
