mod api;
mod commands;
mod config;
mod output;

use anyhow::Result;
use api::CloudflareClient;
use clap::Parser;
use commands::Command;
use config::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cfdns")]
#[command(about = "A CLI tool for managing Cloudflare DNS records")]
struct Cli {
    /// Env file holding CLOUDFLARE_API_TOKEN (defaults to ~/.dotfiles/.env, then .env)
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.env_file.as_deref())?;

    // A single client is built here and lent to every command.
    let client = CloudflareClient::new(config.api_token);
    let mut stdout = std::io::stdout();
    commands::run(&client, cli.command, &mut stdout).await
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
