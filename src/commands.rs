use std::sync::Arc;

use teloxide::{
    payloads::SendMessageSetters, prelude::Requester, types::Message,
    utils::command::BotCommands, Bot,
};
use tracing::{instrument, warn};

use crate::bank::Language;
use crate::engine::QuizEngine;
use crate::error::QuizError;
use crate::keyboard::language_keyboard;
use crate::runner::send_question;
use crate::texts;
use crate::HandlerResult;

#[derive(Debug, Clone, BotCommands)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "start a quiz, optionally with a language: /start en")]
    Start(String),
    #[command(description = "stop the current quiz.")]
    Stop,
    #[command(description = "display help.")]
    Help,
}

pub async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

#[instrument(level = "info", skip(bot, engine, msg), fields(chat_id = msg.chat.id.0))]
pub async fn start(
    bot: Bot,
    msg: Message,
    engine: Arc<QuizEngine>,
    language: String,
) -> HandlerResult {
    if language.trim().is_empty() {
        bot.send_message(msg.chat.id, texts::CHOOSE_LANGUAGE)
            .reply_markup(language_keyboard())
            .await?;
        return Ok(());
    }

    match language.parse::<Language>() {
        Ok(language) => {
            let view = engine.start(msg.chat.id.0, language);
            send_question(&bot, msg.chat.id, &view, language).await?;
        }
        Err(err) => {
            warn!(%err, "start with unsupported language");
            bot.send_message(msg.chat.id, texts::UNSUPPORTED_LANGUAGE)
                .reply_markup(language_keyboard())
                .await?;
        }
    }
    Ok(())
}

#[instrument(level = "info", skip(bot, engine, msg), fields(chat_id = msg.chat.id.0))]
pub async fn stop(bot: Bot, msg: Message, engine: Arc<QuizEngine>) -> HandlerResult {
    match engine.abort(msg.chat.id.0) {
        Ok(progress) => {
            bot.send_message(msg.chat.id, texts::stopped_text(&progress))
                .await?;
        }
        Err(QuizError::NoActiveSession(_)) => {
            bot.send_message(msg.chat.id, texts::NO_ACTIVE_SESSION)
                .await?;
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

pub async fn unrecognized(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, texts::UNRECOGNIZED).await?;
    Ok(())
}
