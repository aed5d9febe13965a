use clap::Parser;
use std::fs;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod agents;
mod app;
mod attachment;
mod cli;
mod commands;
mod completion;
mod config;
mod core;
mod display;
mod input;
mod orchestrator;
mod providers;
mod session;
mod utils;

use crate::app::Application;
use crate::cli::Args;
use crate::commands::create_command_registry;
use crate::completion::CompletionClient;
use crate::config::Config;
use crate::core::error::SiakError;
use crate::providers::factory::{ProviderFactory, ProviderSettings};

/// Logs go to a file so they never interleave with the chat display.
fn init_logging() -> Option<WorkerGuard> {
    let log_dir = Config::log_dir();
    fs::create_dir_all(&log_dir).ok()?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "siak.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("SIAK_LOG").unwrap_or_else(|_| "siak=info,warn".into()))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Some(guard)
}

/// CLI flags override the config file; a missing credential yields an offline client.
fn build_client(args: &Args, config: &Config) -> Result<CompletionClient, SiakError> {
    let provider = args.provider.unwrap_or(config.provider());
    let mut models = config.model_catalog(provider);
    if let Some(model) = &args.model {
        models.text = model.clone();
    }

    let Some(api_key) =
        config.resolve_api_key(provider, args.api_key.clone(), |name| std::env::var(name).ok())
    else {
        warn!(?provider, "no API credential configured");
        return Ok(CompletionClient::without_credential(models, config.temperature));
    };

    let settings = ProviderSettings {
        api_key,
        base_url: config.provider_config(provider).base_url,
        timeout: config.request_timeout(),
    };
    let backend = ProviderFactory::new().create(provider, &settings)?;
    info!(?provider, text_model = %models.text, vision_model = %models.vision, "completion provider ready");

    Ok(CompletionClient::new(backend, models, config.temperature))
}

async fn run(args: Args) -> Result<(), SiakError> {
    let config = Config::load()?;
    let client = build_client(&args, &config)?;
    let app = Application::new(args, &config, client, create_command_registry());
    app.run().await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let guard = init_logging();

    if let Err(e) = run(args).await {
        display::display_error(&e.to_string());
        drop(guard);
        std::process::exit(1);
    }
}
