use std::process::ExitCode;
use std::sync::Arc;
use log::{error, info, trace};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use sitegate::actions::{CodeFetcher, VercelClient};
use sitegate::bot;
use sitegate::bot::commands::Command;
use sitegate::bot::Gatekeeper;
use sitegate::config::Settings;
use sitegate::gate::TelegramGate;
use sitegate::store::PremiumStore;

#[tokio::main]
async fn main() -> ExitCode {
    pretty_env_logger::init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let vercel = match VercelClient::new(&settings.vercel_api, settings.vercel_token.clone()) {
        Ok(vercel) => vercel,
        Err(e) => {
            error!("invalid VERCEL_API_URL: {e}");
            return ExitCode::FAILURE;
        }
    };

    let bot = Bot::new(&settings.bot_token);
    let state = Arc::new(Gatekeeper::new(
        settings.owner,
        settings.channel_username,
        settings.group_username,
        PremiumStore::new(settings.premium_file),
        TelegramGate::new(bot.clone(), settings.channel, settings.group),
        vercel,
        CodeFetcher::new(),
    ));

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        error!("failed to register bot commands: {e}");
    }

    info!("Bot started");
    Dispatcher::builder(bot, bot::build_handler())
        .dependencies(dptree::deps![state])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "something went wrong",
        ))
        .default_handler(default)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    ExitCode::SUCCESS
}

async fn default(update: Arc<Update>) {
    trace!("unhandled update: {update:?}");
}
