//! Extension facade: package descriptor, machine name, layered configuration
//! and deferred snippet/widget queues.
//!
//! An extension lives in its own root directory, which may hold a
//! `descriptor.json` package descriptor and a `config.yml.dist` template. Its
//! configuration files live under a shared config root and are named after
//! the extension's machine name (see [`lantern_config::ConfigPaths`]).

pub mod deferred;
pub mod descriptor;
pub mod error;
pub mod extension;
pub mod machine_name;
pub mod queue;
pub mod slug;

pub use {
    deferred::{
        DeferredItem, Payload, RenderQueues, Snippet, SnippetLocation, Widget, WidgetZone,
    },
    descriptor::{DESCRIPTOR_FILENAME, DescriptorCache, PackageDescriptor},
    error::{Error, Result},
    extension::{Extension, ExtensionPaths, ExtensionServices, InstallType},
    machine_name::resolve_machine_name,
    queue::DeferredQueue,
    slug::{DefaultSlugifier, Slugifier},
};
