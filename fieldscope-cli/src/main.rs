use anyhow::Result;
use clap::{Parser, Subcommand};
use fieldscope::config::{Config, LoggingConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;

#[derive(Parser, Debug)]
#[command(name = "fieldscope")]
#[command(about = "Inspect Elasticsearch index mappings as flat field listings")]
#[command(version)]
struct Cli {
    /// Configuration file path (default: ~/.fieldscope/config.toml)
    #[arg(short, long, global = true, env = "FIELDSCOPE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch mappings from Elasticsearch and list fields
    Fields(commands::fields::FieldsArgs),

    /// List fields from a saved `_mapping` response
    Transform(commands::transform::TransformArgs),

    /// Load and validate a versioned schema family
    Schema(commands::schema::SchemaArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_or_create(&config_path)?;
    init_tracing(&config.logging)?;

    tracing::debug!("Config file: {}", config_path.display());

    match cli.command {
        Commands::Fields(args) => commands::fields::run(args, &config).await,
        Commands::Transform(args) => commands::transform::run(args, &config).await,
        Commands::Schema(args) => commands::schema::run(args),
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let writer = match &logging.file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(logging.file.is_none());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer).init();
    }
    Ok(())
}
