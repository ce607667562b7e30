//! CLI parser and config loading.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use telegram_bot::{BotConfig, ConfigError};

/// Printed to stdout when no token is configured; the process then exits with status 1.
pub const MISSING_TOKEN_MESSAGE: &str = "Set TELEGRAM_BOT_TOKEN env var.";

#[derive(Parser, Debug)]
#[command(name = "telegram-simple-bot")]
#[command(about = "Long-polling Telegram bot: /start, /ping, /help and echo", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Defaults to `run` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the bot until Ctrl-C (config from the env file and environment).
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Overrides TELEGRAM_BOT_TOKEN.
    #[arg(short, long)]
    pub token: Option<String>,

    /// Overrides TELEGRAM_ADMIN_ID; 0 allows every chat.
    #[arg(short, long, allow_hyphen_values = true)]
    pub admin_id: Option<i64>,

    /// KEY=VALUE file read before the environment; a missing file is ignored.
    #[arg(short, long, default_value = ".env")]
    pub env_file: PathBuf,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            token: None,
            admin_id: None,
            env_file: PathBuf::from(".env"),
        }
    }
}

impl Cli {
    /// The subcommand's arguments, or defaults for a bare invocation.
    pub fn run_args(self) -> RunArgs {
        match self.command {
            Some(Commands::Run(args)) => args,
            None => RunArgs::default(),
        }
    }
}

/// Loads [`BotConfig`] for `args`: CLI overrides, then the env file, then the environment.
pub fn load_config(args: &RunArgs) -> Result<BotConfig, ConfigError> {
    BotConfig::load(&args.env_file, args.token.clone(), args.admin_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_invocation_defaults_to_run() {
        let cli = Cli::try_parse_from(["telegram-simple-bot"]).unwrap();
        assert!(cli.command.is_none());
        let args = cli.run_args();
        assert!(args.token.is_none());
        assert!(args.admin_id.is_none());
        assert_eq!(args.env_file, PathBuf::from(".env"));
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::try_parse_from([
            "telegram-simple-bot",
            "run",
            "--token",
            "123:ABC",
            "--admin-id",
            "-100123",
            "--env-file",
            "bot.env",
        ])
        .unwrap();
        let args = cli.run_args();
        assert_eq!(args.token.as_deref(), Some("123:ABC"));
        assert_eq!(args.admin_id, Some(-100123));
        assert_eq!(args.env_file, PathBuf::from("bot.env"));
    }

    #[test]
    fn test_load_config_uses_env_file_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.env");
        std::fs::write(&path, "TELEGRAM_BOT_TOKEN=file_token\nTELEGRAM_ADMIN_ID=5\n").unwrap();

        let args = RunArgs {
            token: None,
            admin_id: Some(9),
            env_file: path,
        };
        let config = load_config(&args).unwrap();

        assert_eq!(config.bot_token, "file_token");
        assert_eq!(config.admin_id, 9);
    }
}
