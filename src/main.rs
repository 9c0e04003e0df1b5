//! Estate Admin - terminal administration client for a real-estate site
//!
//! This is the binary entry point. All logic lives in the workspace crates.

mod headless;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use estate_api::{AuthContext, HttpBackend, TokenStore};
use estate_app::{config, Services};
use estate_core::{logging, EntityKind, PreviewRegistry};

/// Estate Admin - manage listings, blogs and site content from the terminal
#[derive(Parser, Debug)]
#[command(name = "estate-admin")]
#[command(about = "Terminal admin client for a real-estate marketing site", long_about = None)]
struct Args {
    /// Base URL of the REST API, overriding the config file
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Path to config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every record of a collection as JSON lines
    List { collection: EntityKind },

    /// Delete one record
    Delete { collection: EntityKind, id: String },

    /// Write a commented default config.toml and print its path
    Init,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let config_dir = match &args.config {
        Some(path) => path
            .parent()
            .map(|dir| dir.to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".")),
        None => config::default_config_dir(),
    };

    if let Some(Command::Init) = args.command {
        let path = config::init_config_dir(&config_dir)?;
        println!("{}", path.display());
        return Ok(());
    }

    logging::init()?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config::config_file(&config_dir));
    let mut settings = config::load_settings(&config_path);
    if let Some(url) = args.api_url {
        settings.api.base_url = url;
    }

    // The token file sits beside the config file
    let token_path = match &args.config {
        Some(_) => config_dir.join("token"),
        None => TokenStore::default_path(),
    };
    let auth = AuthContext::from_store(TokenStore::new(token_path));
    let backend = HttpBackend::new(settings.backend_config(), auth.clone())?;

    match args.command {
        Some(Command::List { collection }) => {
            headless::list(&backend, collection, &mut io::stdout()).await?
        }
        Some(Command::Delete { collection, id }) => {
            headless::delete(&backend, collection, &id, &mut io::stdout()).await?
        }
        Some(Command::Init) | None => {
            let services = Services::new(backend, auth, PreviewRegistry::new());
            estate_tui::run(settings, services).await?
        }
    }

    Ok(())
}
