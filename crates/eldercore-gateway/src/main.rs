//! ElderCore gateway — DRP community bot on Discord.
//! Loads `.env` and configuration, installs logging, wires the core to serenity.

mod discord;
mod handler;

use std::sync::Arc;

use anyhow::Context as _;
use eldercore_core::{BotConfig, CompletionBridge, Dispatcher, InMemoryLedger, LifecycleHooks, OpenAiClient, XpStore};
use serenity::all::GatewayIntents;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::handler::Handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[eldercore] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BotConfig::load().context("load configuration")?;
    tracing::info!(?config, version = eldercore_core::version(), "configuration loaded");

    let ledger: Arc<dyn XpStore> = Arc::new(InMemoryLedger::new());

    let provider = OpenAiClient::new(config.openai_api_key.as_str())
        .with_api_base(&config.completion_base_url)
        .with_model(&config.completion_model);
    let bridge = CompletionBridge::new(Box::new(provider))
        .with_sampling(config.completion_max_tokens, config.completion_temperature);

    let dispatcher = Dispatcher::new(Arc::clone(&ledger), bridge)
        .with_proposals_channel(config.guild_id.as_str(), config.proposals_channel_id.as_str());
    let hooks = LifecycleHooks::new(Arc::clone(&ledger), config.guild_id.as_str(), config.activity.as_str())
        .with_member_role(config.member_role_id.as_str());

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES;

    let mut client = serenity::Client::builder(&config.discord_token, intents)
        .event_handler(Handler::new(Arc::new(dispatcher), Arc::new(hooks)))
        .await
        .context("build discord client")?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested, closing shards");
            shard_manager.shutdown_all().await;
        }
    });

    client.start().await.context("discord client")?;
    Ok(())
}
