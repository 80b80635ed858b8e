//! `vitrinectl`: browse museum catalogues and curate exhibitions from the
//! command line.

mod cli;
mod commands;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitrine_core::infra::config::{ConfigLoader, normalize_base_url};

use crate::cli::{Cli, Command};
use crate::commands::Client;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries command output only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &cli.env_file {
        loader = loader.with_env_file(path);
    }
    let load = loader.load().context("failed to load configuration")?;
    let mut config = load.config;
    if let Some(base_url) = &cli.base_url {
        config.base_url = normalize_base_url(base_url)
            .context("invalid --base-url")?;
    }
    tracing::debug!(
        base_url = %config.base_url,
        config_path = ?load.config_path,
        env_file_loaded = load.env_file_loaded,
        "configuration resolved"
    );

    let client = Client::connect(config)?;
    let json = cli.json;

    match cli.command {
        Command::Browse {
            source,
            from,
            pages,
            all,
            page_size,
        } => {
            client
                .browse(source.as_deref(), from, pages, all, page_size, json)
                .await
        }
        Command::Show { source, id } => client.show(&source, &id, json).await,
        Command::Search(args) => client.search(args, json).await,
        Command::Exhibitions(command) => {
            client.exhibitions(command, json).await
        }
    }
}
