//! Long-poll dispatch loop: fetch → parse → authorize → dispatch → reply.
//!
//! [`UpdateLoop`] owns the offset cursor. It is cancelled through a [`CancellationToken`]
//! checked before every poll and before every update; the long-poll and the backoff sleep also
//! wake on cancellation. The offset is never persisted, so a restart polls from 0 again and
//! Telegram may redeliver its retained backlog (at-least-once).

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::chain::HandlerChain;
use crate::components::build_bot_components;
use crate::config::BotConfig;
use crate::core::{init_tracing, Bot, HandlerResponse, ToCoreMessage};
use crate::telegram::{body_preview, parse_updates, TelegramClient, TelegramMessageWrapper, Update};

/// Why a poll produced no batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffReason {
    /// Transport error or empty body.
    EmptyResponse,
    /// Body was not JSON or `ok` was not true.
    MalformedResponse,
}

/// Result of one [`UpdateLoop::poll_once`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A batch was read. `received` items, of which `dispatched` were text messages run
    /// through the handler chain.
    Processed { received: usize, dispatched: usize },
    /// Nothing processed; the caller should wait the backoff before polling again.
    Backoff(BackoffReason),
    /// Cancellation observed; remaining items of the batch were left for redelivery.
    Cancelled,
}

/// Sequential getUpdates / dispatch loop.
pub struct UpdateLoop {
    client: Arc<TelegramClient>,
    bot: Arc<dyn Bot>,
    chain: HandlerChain,
    backoff: Duration,
    offset: i64,
}

impl UpdateLoop {
    /// Offset starts at 0.
    pub fn new(
        client: Arc<TelegramClient>,
        bot: Arc<dyn Bot>,
        chain: HandlerChain,
        backoff: Duration,
    ) -> Self {
        Self {
            client,
            bot,
            chain,
            backoff,
            offset: 0,
        }
    }

    /// Next update id to request.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Polls until `cancel` fires. Failed polls wait the backoff before retrying; there is no
    /// other exit.
    pub async fn run(&mut self, cancel: CancellationToken) {
        if self.chain.is_empty() {
            warn!("Handler chain is empty; updates will be acknowledged without replies");
        }
        while !cancel.is_cancelled() {
            match self.poll_once(&cancel).await {
                PollOutcome::Processed { .. } => {}
                PollOutcome::Cancelled => break,
                PollOutcome::Backoff(reason) => {
                    debug!(?reason, backoff_ms = self.backoff.as_millis() as u64, "Backing off");
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(self.backoff) => {}
                    }
                }
            }
        }
        info!(offset = self.offset, "Update loop stopped");
    }

    /// One Polling step: fetch at the current offset and, if the batch is usable, process it.
    pub async fn poll_once(&mut self, cancel: &CancellationToken) -> PollOutcome {
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => return PollOutcome::Cancelled,
            fetched = self.client.fetch_updates(self.offset) => fetched,
        };

        let body = match fetched {
            Ok(body) if !body.is_empty() => body,
            Ok(_) => {
                warn!(offset = self.offset, "HTTP empty response");
                return PollOutcome::Backoff(BackoffReason::EmptyResponse);
            }
            Err(e) => {
                warn!(offset = self.offset, error = %e, "HTTP empty response");
                return PollOutcome::Backoff(BackoffReason::EmptyResponse);
            }
        };

        let updates = match parse_updates(&body) {
            Ok(updates) => updates,
            Err(e) => {
                warn!(error = %e, body = %body_preview(&body), "Bad JSON or ok=false");
                return PollOutcome::Backoff(BackoffReason::MalformedResponse);
            }
        };

        let received = updates.len();
        let mut dispatched = 0;
        for update in updates {
            if cancel.is_cancelled() {
                return PollOutcome::Cancelled;
            }
            if self.handle_update(update).await {
                dispatched += 1;
            }
        }
        PollOutcome::Processed {
            received,
            dispatched,
        }
    }

    /// Advances the offset past `update`, then dispatches it if it is a text message.
    /// Returns whether the handler chain ran.
    async fn handle_update(&mut self, update: Update) -> bool {
        // Advance first so a skipped or failing update is never redelivered.
        self.offset = self.offset.max(update.update_id.saturating_add(1));

        let Some((message, chat, text)) = update.text_message() else {
            debug!(update_id = update.update_id, "Skipping update without chat or text");
            return false;
        };
        let core_msg = TelegramMessageWrapper {
            message,
            chat,
            text,
        }
        .to_core();

        match self.chain.handle(&core_msg).await {
            Ok(HandlerResponse::Reply(reply)) => {
                if let Err(e) = self.bot.reply_to(&core_msg, &reply).await {
                    warn!(error = %e, chat_id = core_msg.chat.id, "Failed to send reply");
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, chat_id = core_msg.chat.id, "Handler chain failed");
            }
        }
        true
    }
}

/// Main entry: validate config, init logging, build components, then run the update loop until
/// `cancel` fires.
#[instrument(skip(config, cancel))]
pub async fn run_bot(config: BotConfig, cancel: CancellationToken) -> anyhow::Result<()> {
    config.validate()?;
    init_tracing(config.log_file.as_deref())?;

    info!(admin_id = config.admin_id, "Bot started. adminId={}", config.admin_id);

    let components = build_bot_components(&config)?;
    let mut update_loop = UpdateLoop::new(
        components.client,
        components.bot,
        components.handler_chain,
        config.backoff(),
    );
    update_loop.run(cancel).await;

    Ok(())
}
