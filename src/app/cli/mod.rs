//! CLI Adapter.

mod inspect;
mod transfer;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use crate::app::api::ObjectRef;
use crate::domain::{AppError, LogLevel};

#[derive(Parser)]
#[command(name = "dataconf")]
#[command(version)]
#[command(
    about = "Fetch and validate data configuration documents from blob storage",
    long_about = None
)]
struct Cli {
    /// Storage connection string with a shared access signature or an account key
    #[arg(long, env = "DATACONF_CONNECTION_STRING", hide_env_values = true)]
    connection_string: String,
    /// Severity threshold: DEBUG, INFO, WARNING, ERROR or CRITICAL
    #[arg(long, default_value = "WARNING", global = true)]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration object and print its description
    #[clap(visible_alias = "i")]
    Inspect {
        container: String,
        path: String,
        /// Print the description as JSON
        #[arg(long)]
        json: bool,
    },
    /// Download an object to a local file
    #[clap(visible_alias = "dl")]
    Download { container: String, path: String, local: PathBuf },
    /// Upload a local file as an object
    #[clap(visible_alias = "up")]
    Upload {
        container: String,
        path: String,
        local: PathBuf,
        /// Replace the object if it already exists
        #[arg(long)]
        overwrite: bool,
    },
    /// Delete an object
    #[clap(visible_alias = "rm")]
    Delete { container: String, path: String },
}

pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let conn = cli.connection_string.as_str();
    let level = cli.log_level;
    let result: Result<(), AppError> = match &cli.command {
        Commands::Inspect { container, path, json } => {
            inspect::run_inspect(object(conn, container, path), *json, level)
        }
        Commands::Download { container, path, local } => {
            transfer::run_download(object(conn, container, path), local, level)
        }
        Commands::Upload { container, path, local, overwrite } => {
            transfer::run_upload(object(conn, container, path), local, *overwrite, level)
        }
        Commands::Delete { container, path } => {
            transfer::run_delete(object(conn, container, path), level)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn object<'a>(connection_string: &'a str, container: &'a str, path: &'a str) -> ObjectRef<'a> {
    ObjectRef { connection_string, container, path }
}

fn init_tracing(level: LogLevel) {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.filter_directive()));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
