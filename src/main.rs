use std::error::Error;
use std::sync::Arc;

use dotenvy::dotenv;
use teloxide::dispatching::{DpHandlerDescription, UpdateHandler};
use teloxide::dptree::{self, Handler};
use teloxide::error_handlers::IgnoringErrorHandlerSafe;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use teloxide::update_listeners::webhooks::{self, Options};
use teloxide::utils::command::BotCommands;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use class4quizbot::bank::QuestionBank;
use class4quizbot::commands::{self, Command};
use class4quizbot::config::Config;
use class4quizbot::engine::QuizEngine;
use class4quizbot::runner;
use class4quizbot::session::SessionStore;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|err| {
        eprintln!("configuration error: {err}");
        std::process::exit(1);
    });

    let level: tracing::Level = config.log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::from_level(level))
        .json()
        .with_span_events(FmtSpan::ENTER)
        .with_line_number(true)
        .with_target(false)
        .init();

    let bank = match QuestionBank::builtin() {
        Ok(bank) => bank,
        Err(err) => {
            tracing::error!(%err, "failed to load the question bank");
            std::process::exit(1);
        }
    };
    let engine = Arc::new(QuizEngine::new(bank, SessionStore::new()));

    let bot = Bot::new(config.token);
    tracing::info!("starting the quiz bot...");

    if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!(%err, "failed to register the command menu");
    }

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![engine])
        .enable_ctrlc_handler()
        .build();

    match config.webhook {
        Some(webhook) => {
            let listener = webhooks::axum(bot, Options::new(webhook.addr, webhook.url))
                .await
                .expect("failed to build the webhook listener");
            dispatcher
                .dispatch_with_listener(listener, Arc::new(IgnoringErrorHandlerSafe))
                .await
        }
        None => dispatcher.dispatch().await,
    }
}

fn schema() -> UpdateHandler<Box<dyn Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Start(language)].endpoint(commands::start))
        .branch(case![Command::Stop].endpoint(commands::stop))
        .branch(case![Command::Help].endpoint(commands::help));

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .endpoint(commands::unrecognized);

    let callback_handler = Update::filter_callback_query()
        .branch(callback_prefix("lang:").endpoint(runner::choose_language))
        .branch(callback_prefix("ans:").endpoint(runner::take_answer))
        .branch(callback_prefix("again:").endpoint(runner::play_again))
        .endpoint(runner::dismiss);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_handler)
}

fn callback_prefix(
    prefix: &'static str,
) -> Handler<
    'static,
    DependencyMap,
    Result<(), Box<dyn Error + Send + Sync + 'static>>,
    DpHandlerDescription,
> {
    dptree::filter(move |q: CallbackQuery| {
        q.data
            .as_deref()
            .map(|data| data.starts_with(prefix))
            .unwrap_or(false)
    })
}
