//! telegram-simple-bot: load config, then long-poll until Ctrl-C.

use anyhow::Result;
use clap::Parser;
use telegram_bot::{run_bot, ConfigError};
use telegram_simple_bot::{load_config, Cli, MISSING_TOKEN_MESSAGE};
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse().run_args();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(ConfigError::MissingToken) => {
            println!("{MISSING_TOKEN_MESSAGE}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, shutting down");
            on_signal.cancel();
        }
    });

    run_bot(config, cancel).await
}
