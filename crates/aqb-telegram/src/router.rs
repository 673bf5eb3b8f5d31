use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*, types::BotCommand};

use aqb_core::{app::AirQualityService, config::Config, messaging::port::MessagingPort};

use crate::handlers;
use crate::TelegramMessenger;

/// Shared, read-only state handed to every update handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AirQualityService>,
    pub messenger: Arc<dyn MessagingPort>,
}

pub async fn run_polling(cfg: Arc<Config>, service: Arc<AirQualityService>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    match bot.get_me().await {
        Ok(me) => tracing::info!(username = %me.username(), "air quality bot started"),
        Err(e) => tracing::warn!(error = %e, "get_me failed; continuing"),
    }
    tracing::info!(
        stations = cfg.jakarta_stations.len(),
        timeout_secs = cfg.http_timeout.as_secs(),
        "upstream settings"
    );

    // Best-effort: the menu in Telegram clients is cosmetic.
    if let Err(e) = bot.set_my_commands(bot_commands()).await {
        tracing::warn!(error = %e, "failed to register bot commands");
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let state = Arc::new(AppState { service, messenger });

    let handler = dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    tracing::info!("dispatcher stopped");
    Ok(())
}

fn bot_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "Welcome message and main menu"),
        BotCommand::new("aqi", "Current Jakarta vs Singapore air quality"),
        BotCommand::new("air", "Same as /aqi"),
        BotCommand::new("help", "Scales, pollutants and data sources"),
    ]
}
