//! Interview turn framing.
//!
//! The backend answers each turn as `<feedback>|||<next question or final summary>`.
//! This is the only place that knows about the delimiter; a structured turn schema
//! would replace `interpret_turn` and nothing else.

/// Number of questions in one interview.
pub const MAX_QUESTIONS: u8 = 5;

pub const TURN_DELIMITER: &str = "|||";

/// The two segments of a turn response. Segments that are empty after trimming are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnResponse {
    pub feedback: Option<String>,
    pub next: Option<String>,
}

/// Splits on the first delimiter only; any later `|||` stays inside `next`.
pub fn split_turn_response(raw: &str) -> TurnResponse {
    match raw.split_once(TURN_DELIMITER) {
        Some((feedback, next)) => TurnResponse {
            feedback: non_empty(feedback),
            next: non_empty(next),
        },
        None => TurnResponse {
            feedback: non_empty(raw),
            next: None,
        },
    }
}

fn non_empty(segment: &str) -> Option<String> {
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// What a turn response means given how many questions have been asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Feedback on the last answer and the next question to ask.
    NextQuestion {
        feedback: Option<String>,
        question: String,
    },
    /// Feedback on the final answer (when present) and the closing summary.
    Summary {
        feedback: Option<String>,
        summary: String,
    },
    /// No next question; the turn does not count. Any text received is kept as feedback.
    Malformed { feedback: Option<String> },
}

/// Applies the fallback rules:
/// - both segments before the last question: next question;
/// - second segment at the last question: summary;
/// - no second segment at the last question: the whole response is the summary;
/// - no second segment earlier, or nothing at all: malformed, keeping any feedback.
pub fn interpret_turn(raw: &str, turn_count: u8) -> TurnOutcome {
    let TurnResponse { feedback, next } = split_turn_response(raw);
    let last_question = turn_count >= MAX_QUESTIONS;

    match (next, last_question) {
        (Some(question), false) => TurnOutcome::NextQuestion { feedback, question },
        (Some(summary), true) => TurnOutcome::Summary { feedback, summary },
        (None, true) => match feedback {
            Some(summary) => TurnOutcome::Summary {
                feedback: None,
                summary,
            },
            None => TurnOutcome::Malformed { feedback: None },
        },
        (None, false) => TurnOutcome::Malformed { feedback },
    }
}
