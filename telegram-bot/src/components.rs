//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::core::Bot;
use crate::handlers::{AccessHandler, CommandHandler, EchoHandler, LoggingHandler};
use crate::telegram::{ReqwestTransport, TelegramBotAdapter, TelegramClient, Transport};

/// Core dependencies for run_bot; produced by the component factory.
pub struct BotComponents {
    pub client: Arc<TelegramClient>,
    pub bot: Arc<dyn Bot>,
    pub handler_chain: HandlerChain,
}

/// Builds the reqwest transport, the Telegram client, the reply adapter and the handler chain.
pub fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(config.http_timeout())?);
    Ok(build_bot_components_with_transport(config, transport))
}

/// Same as [`build_bot_components`] with an injected transport (tests, custom HTTP stacks).
pub fn build_bot_components_with_transport(
    config: &BotConfig,
    transport: Arc<dyn Transport>,
) -> BotComponents {
    info!(
        api_url = %config.telegram_api_url,
        poll_timeout_secs = config.poll_timeout_secs,
        http_timeout_secs = config.http_timeout_secs,
        "Building bot components"
    );
    let client = Arc::new(TelegramClient::new(
        transport,
        config.telegram_api_url.clone(),
        config.bot_token.clone(),
        config.poll_timeout_secs,
    ));
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(client.clone()));
    let handler_chain = build_handler_chain(config);
    info!(handlers = handler_chain.len(), "Handler chain ready");
    BotComponents {
        client,
        bot,
        handler_chain,
    }
}

/// Logging → access policy → commands → echo. A denied chat is answered by the access
/// handler and never reaches the commands.
pub fn build_handler_chain(config: &BotConfig) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(AccessHandler::new(config.admin_id)))
        .add_handler(Arc::new(CommandHandler::new()))
        .add_handler(Arc::new(EchoHandler::new()))
}
