mod extension_commands;

use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use crate::extension_commands::ExtensionArgs;

#[derive(Parser)]
#[command(name = "lantern", about = "Inspect extension configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// The extension's own directory (descriptor.json, config.yml.dist).
    #[arg(long, global = true, default_value = ".")]
    extension_root: PathBuf,

    /// Directory holding extension config files.
    #[arg(
        long,
        global = true,
        env = "LANTERN_CONFIG_DIR",
        default_value = "app/config/extensions"
    )]
    config_dir: PathBuf,

    /// Display name (defaults to the extension root's directory name).
    #[arg(long, global = true)]
    name: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the primary and local config file paths.
    Paths,
    /// Show the package descriptor.
    Descriptor,
    /// Load and print the layered configuration.
    Config {
        /// Print JSON instead of YAML.
        #[arg(long)]
        json: bool,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_telemetry(&cli);

    let args = ExtensionArgs {
        root: cli.extension_root,
        config_root: cli.config_dir,
        name: cli.name,
    };

    match cli.command {
        Commands::Paths => extension_commands::paths(&args),
        Commands::Descriptor => extension_commands::descriptor(&args),
        Commands::Config { json } => extension_commands::config(&args, json),
    }
}
