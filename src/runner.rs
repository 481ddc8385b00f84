use std::sync::Arc;

use teloxide::{
    dispatching::dialogue::GetChatId,
    payloads::{AnswerCallbackQuerySetters, EditMessageTextSetters, SendMessageSetters},
    prelude::Requester,
    types::{CallbackQuery, ChatId, ParseMode},
    Bot,
};
use tracing::{instrument, warn};

use crate::bank::Language;
use crate::engine::{QuestionView, QuizEngine, Step};
use crate::error::QuizError;
use crate::keyboard::{language_keyboard, options_keyboard, play_again_keyboard};
use crate::texts;
use crate::HandlerResult;

pub(crate) async fn send_question(
    bot: &Bot,
    chat_id: ChatId,
    view: &QuestionView,
    language: Language,
) -> HandlerResult {
    bot.send_message(chat_id, texts::question_text(view, language))
        .parse_mode(ParseMode::Html)
        .reply_markup(options_keyboard(view.number - 1))
        .await?;
    Ok(())
}

#[instrument(level = "info", skip(bot, engine, q))]
pub async fn choose_language(bot: Bot, q: CallbackQuery, engine: Arc<QuizEngine>) -> HandlerResult {
    bot.answer_callback_query(&q.id).await?;
    let Some(chat_id) = q.chat_id() else {
        return Ok(());
    };
    let Some(code) = q.data.as_deref().and_then(|data| data.strip_prefix("lang:")) else {
        return Ok(());
    };

    match code.parse::<Language>() {
        Ok(language) => {
            // Swallow the language keyboard so the prompt can't be pressed twice.
            if let Some(message) = &q.message {
                bot.edit_message_reply_markup(chat_id, message.id()).await?;
            }
            let view = engine.start(chat_id.0, language);
            send_question(&bot, chat_id, &view, language).await?;
        }
        Err(err) => {
            warn!(%err, "language callback with unknown code");
            bot.send_message(chat_id, texts::UNSUPPORTED_LANGUAGE)
                .reply_markup(language_keyboard())
                .await?;
        }
    }
    Ok(())
}

#[instrument(level = "info", skip(bot, engine, q))]
pub async fn take_answer(bot: Bot, q: CallbackQuery, engine: Arc<QuizEngine>) -> HandlerResult {
    let Some(chat_id) = q.chat_id() else {
        bot.answer_callback_query(&q.id).await?;
        return Ok(());
    };
    let Some((asked, choice)) = q.data.as_deref().and_then(parse_answer_data) else {
        bot.answer_callback_query(&q.id).await?;
        return Ok(());
    };

    let progress = match engine.progress(chat_id.0) {
        Ok(progress) => progress,
        Err(QuizError::NoActiveSession(_)) => {
            bot.answer_callback_query(&q.id).await?;
            bot.send_message(chat_id, texts::NO_ACTIVE_SESSION).await?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    // A press on an already-answered question: acknowledge, never re-score.
    if progress.answered != asked {
        bot.answer_callback_query(&q.id)
            .text(texts::already_answered(progress.language))
            .await?;
        return Ok(());
    }
    bot.answer_callback_query(&q.id).await?;

    let feedback = match engine.answer(chat_id.0, choice) {
        Ok(feedback) => feedback,
        Err(QuizError::NoActiveSession(_)) => {
            bot.send_message(chat_id, texts::NO_ACTIVE_SESSION).await?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let annotated = texts::feedback_text(&feedback);
    match &q.message {
        Some(message) => {
            bot.edit_message_text(chat_id, message.id(), annotated)
                .parse_mode(ParseMode::Html)
                .await?;
        }
        None => {
            bot.send_message(chat_id, annotated)
                .parse_mode(ParseMode::Html)
                .await?;
        }
    }

    match feedback.step {
        Step::Next(view) => send_question(&bot, chat_id, &view, feedback.language).await,
        Step::Finished(summary) => {
            bot.send_message(chat_id, texts::summary_text(&summary, feedback.language))
                .parse_mode(ParseMode::Html)
                .reply_markup(play_again_keyboard(feedback.language))
                .await?;
            Ok(())
        }
    }
}

#[instrument(level = "info", skip(bot, engine, q))]
pub async fn play_again(bot: Bot, q: CallbackQuery, engine: Arc<QuizEngine>) -> HandlerResult {
    bot.answer_callback_query(&q.id).await?;
    let Some(chat_id) = q.chat_id() else {
        return Ok(());
    };
    let Some(code) = q.data.as_deref().and_then(|data| data.strip_prefix("again:")) else {
        return Ok(());
    };
    let Ok(language) = code.parse::<Language>() else {
        warn!(code, "play-again callback with unknown code");
        return Ok(());
    };

    let view = engine.start(chat_id.0, language);
    send_question(&bot, chat_id, &view, language).await
}

/// Old or foreign callback data: acknowledge so the client stops spinning.
pub async fn dismiss(bot: Bot, q: CallbackQuery) -> HandlerResult {
    bot.answer_callback_query(&q.id).await?;
    Ok(())
}

fn parse_answer_data(data: &str) -> Option<(usize, usize)> {
    let rest = data.strip_prefix("ans:")?;
    let (index, choice) = rest.split_once(':')?;
    Some((index.parse().ok()?, choice.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::parse_answer_data;

    #[test]
    fn answer_data_round_trips() {
        assert_eq!(parse_answer_data("ans:3:2"), Some((3, 2)));
        assert_eq!(parse_answer_data("ans:0:0"), Some((0, 0)));
        assert_eq!(parse_answer_data("lang:en"), None);
        assert_eq!(parse_answer_data("ans:3"), None);
        assert_eq!(parse_answer_data("ans:x:1"), None);
    }
}
