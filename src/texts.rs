use teloxide::utils::html::escape;

use crate::bank::Language;
use crate::engine::{Feedback, FinalScore, Progress, QuestionView};

pub const CHOICE_LABELS: [&str; 4] = ["A", "B", "C", "D"];

const DIVIDER: &str = "------------------------------";

// Shown before a language is known, so these stay bilingual.
pub const CHOOSE_LANGUAGE: &str = "Please choose your language / Будь ласка, оберіть мову:";
pub const UNSUPPORTED_LANGUAGE: &str =
    "That language is not supported. Please pick one below. / Ця мова не підтримується. Оберіть зі списку:";
pub const NO_ACTIVE_SESSION: &str =
    "No quiz in progress. Send /start to begin. / Вікторина не розпочата. Надішліть /start, щоб почати.";
pub const UNRECOGNIZED: &str =
    "I only understand commands. Send /help to see them. / Я розумію лише команди. Надішліть /help, щоб переглянути їх.";

pub fn question_header(language: Language, number: usize, total: usize) -> String {
    match language {
        Language::En => format!("Question {number} of {total}"),
        Language::Uk => format!("Питання {number} з {total}"),
    }
}

pub fn correct_line(language: Language) -> &'static str {
    match language {
        Language::En => "✅ Correct!",
        Language::Uk => "✅ Правильно!",
    }
}

pub fn incorrect_line(language: Language) -> &'static str {
    match language {
        Language::En => "❌ Incorrect.",
        Language::Uk => "❌ Неправильно.",
    }
}

pub fn explanation_label(language: Language) -> &'static str {
    match language {
        Language::En => "Explanation",
        Language::Uk => "Пояснення",
    }
}

pub fn score_line(language: Language, score: u32, total: usize) -> String {
    match language {
        Language::En => format!("🎉 You scored {score} out of {total}!"),
        Language::Uk => format!("🎉 Ви набрали {score} із {total} балів!"),
    }
}

pub fn try_again_hint(language: Language) -> &'static str {
    match language {
        Language::En => "Send /start to try again.",
        Language::Uk => "Надішліть /start, щоб спробувати ще раз.",
    }
}

pub fn play_again_label(language: Language) -> &'static str {
    match language {
        Language::En => "🔁 Play again",
        Language::Uk => "🔁 Зіграти ще раз",
    }
}

pub fn already_answered(language: Language) -> &'static str {
    match language {
        Language::En => "Already answered.",
        Language::Uk => "Вже відповідено.",
    }
}

pub fn stopped_line(language: Language) -> &'static str {
    match language {
        Language::En => "🛑 Quiz stopped.",
        Language::Uk => "🛑 Вікторину зупинено.",
    }
}

pub fn progress_line(language: Language, answered: usize, score: u32, total: usize) -> String {
    match language {
        Language::En => format!("Progress: {answered} of {total} answered, {score} correct."),
        Language::Uk => {
            format!("Пройдено {answered} з {total} питань, правильних відповідей: {score}.")
        }
    }
}

pub fn question_text(view: &QuestionView, language: Language) -> String {
    let mut lines = vec![
        format!(
            "<i><b>{}</b></i>",
            question_header(language, view.number, view.total)
        ),
        String::new(),
        format!("<b>{}</b>", escape(&view.prompt)),
        DIVIDER.to_owned(),
    ];
    for (label, choice) in CHOICE_LABELS.iter().zip(&view.choices) {
        lines.push(format!("<b>{label}.</b> {}", escape(choice)));
    }
    lines.join("\n")
}

/// The answered question re-rendered with the selection and the correct
/// choice marked, the way the buttons can no longer show them.
pub fn feedback_text(feedback: &Feedback) -> String {
    let language = feedback.language;
    let view = &feedback.question;

    let mut lines = vec![
        format!(
            "<i><b>{}</b></i>",
            question_header(language, view.number, view.total)
        ),
        String::new(),
        format!("<b>{}</b>", escape(&view.prompt)),
        DIVIDER.to_owned(),
    ];

    for (index, (label, choice)) in CHOICE_LABELS.iter().zip(&view.choices).enumerate() {
        let text = escape(choice);
        let line = if index == feedback.selected && index == feedback.correct_choice {
            format!("✅ <b>{label}. {text}</b>")
        } else if index == feedback.selected {
            format!("❌ <b>{label}. {text}</b>")
        } else if index == feedback.correct_choice {
            format!("✅ {label}. {text}")
        } else {
            format!("      {label}. {text}")
        };
        lines.push(line);
    }

    lines.push(DIVIDER.to_owned());
    lines.push(if feedback.correct {
        correct_line(language).to_owned()
    } else {
        incorrect_line(language).to_owned()
    });
    if let Some(explanation) = &feedback.explanation {
        lines.push(format!(
            "<b>{}:</b> <i>{}</i>",
            explanation_label(language),
            escape(explanation)
        ));
    }

    lines.join("\n")
}

pub fn summary_text(summary: &FinalScore, language: Language) -> String {
    format!(
        "<b>{}</b>\n\n{}",
        score_line(language, summary.score, summary.total),
        try_again_hint(language)
    )
}

pub fn stopped_text(progress: &Progress) -> String {
    format!(
        "{}\n{}",
        stopped_line(progress.language),
        progress_line(
            progress.language,
            progress.answered,
            progress.score,
            progress.total
        )
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Step;

    fn view() -> QuestionView {
        QuestionView {
            number: 3,
            total: 10,
            prompt: "Left < right?".to_owned(),
            choices: vec![
                "Yes".to_owned(),
                "No".to_owned(),
                "Maybe".to_owned(),
                "N/A".to_owned(),
            ],
        }
    }

    #[test]
    fn question_text_lists_all_choices_escaped() {
        let text = question_text(&view(), Language::En);
        assert!(text.contains("Question 3 of 10"));
        assert!(text.contains("Left &lt; right?"));
        for label in CHOICE_LABELS {
            assert!(text.contains(&format!("<b>{label}.</b>")));
        }
    }

    #[test]
    fn feedback_text_marks_selected_and_correct_choices() {
        let feedback = Feedback {
            language: Language::En,
            correct: false,
            selected: 1,
            correct_choice: 0,
            question: view(),
            explanation: Some("Depends on the ordering.".to_owned()),
            step: Step::Finished(FinalScore {
                score: 4,
                total: 10,
            }),
        };
        let text = feedback_text(&feedback);
        assert!(text.contains("❌ <b>B. No</b>"));
        assert!(text.contains("✅ A. Yes"));
        assert!(text.contains(incorrect_line(Language::En)));
        assert!(text.contains("Depends on the ordering."));
    }
}
