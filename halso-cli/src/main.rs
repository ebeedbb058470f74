mod admin;
mod cli;
mod crud;
mod member;
mod render;

use clap::Parser;
use halso_client::ClientFlavor;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Admin(command) => {
            let config = cli.connection.config(ClientFlavor::Admin);
            tracing::debug!(base_url = %config.base_url, prefix = %config.api_prefix, "Admin client");
            admin::run(&config, command).await
        }
        Command::Member(command) => {
            let config = cli.connection.config(ClientFlavor::Member);
            tracing::debug!(base_url = %config.base_url, "Member portal client");
            member::run(&config, command).await
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` raises the level of our own crates
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,halso=info,halso_client=info",
        _ => "info,halso=debug,halso_client=debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
