//! Application wiring and the long-poll loop

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::api::TelegramClient;
use crate::config::Config;
use crate::orchestrator::ChatDispatcher;
use crate::utils::logging::log_startup;

/// Application root
pub struct App {
    config: Config,
    client: TelegramClient,
    dispatcher: ChatDispatcher,
}

impl App {
    /// Initialize the application
    pub async fn initialize(config: Config) -> Result<Self> {
        if config.bot_token.is_empty() {
            anyhow::bail!("BOT_TOKEN is not set");
        }

        log_startup(&config);

        tokio::fs::create_dir_all(&config.output_dir)
            .await
            .with_context(|| format!("cannot create output directory {}", config.output_dir))?;

        let client = TelegramClient::new(&config);
        let dispatcher = ChatDispatcher::new(client.clone(), &config);

        Ok(Self {
            config,
            client,
            dispatcher,
        })
    }

    /// Run the main loop.
    ///
    /// One polling failure never stops the bot; the loop backs off and
    /// tries again. Updates inside a batch are handled in order.
    pub async fn run(mut self) -> Result<()> {
        info!("🤖 bot is polling for updates...");
        let mut offset: i64 = 0;

        loop {
            match self
                .client
                .get_updates(offset, self.config.poll_timeout_secs)
                .await
            {
                Ok(updates) => {
                    for update in updates {
                        offset = offset.max(update.update_id + 1);
                        self.dispatcher.dispatch(update).await;
                    }
                }
                Err(e) => {
                    error!("❌ polling failed: {}", e);
                    tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                }
            }

            self.dispatcher.prune_sessions();
        }
    }
}
