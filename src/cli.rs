use crate::agents::AgentMode;
use crate::config::Provider;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "SIAK-Klinis hospital assistant for the terminal", long_about = None)]
pub struct Args {
    /// Question to send once; omit to start an interactive session
    pub query: Option<String>,

    /// Agent mode to start in
    #[arg(short, long, value_enum)]
    pub mode: Option<AgentMode>,

    /// Image to attach to the one-shot query
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Completion provider
    #[arg(short, long, value_enum)]
    pub provider: Option<Provider>,

    /// Override the text model (provider-specific)
    #[arg(long)]
    pub model: Option<String>,

    /// API credential; takes precedence over environment and config file
    #[arg(long, env = "SIAK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}
