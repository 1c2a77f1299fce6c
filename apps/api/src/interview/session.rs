//! Interview Session State Machine.
//!
//! `Idle → Active → Finished`, with `reset` back to Idle and a start-failure
//! fallback from Active to Idle. Each state carries only the data valid for it.
//!
//! Every backend round trip is split in two: `begin_*` validates the transition,
//! marks the session busy and hands out a `PendingTurn`; `complete` applies the
//! result. A pending turn is tagged with the session generation, and `reset`
//! bumps the generation, so results of calls issued before a reset are dropped.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::interview::prompts::interview_system_instruction;
use crate::interview::protocol::{interpret_turn, TurnOutcome, MAX_QUESTIONS};
use crate::llm_client::{ChatRequest, GenerativeBackend, LlmError, DEFAULT_MODEL};
use crate::models::chat::ChatMessage;
use crate::models::plan::CareerPlan;

/// The synthetic first user turn that asks the interviewer for question one.
pub const START_MESSAGE: &str = "start";
pub const START_FAILED_MESSAGE: &str =
    "Sorry, I had trouble starting the interview. Please try again.";
pub const FORMAT_ISSUE_MESSAGE: &str =
    "Sorry, there was an issue with the response. Please try answering again or restart.";
pub const REQUEST_FAILED_MESSAGE: &str =
    "An error occurred. Please try submitting your answer again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Active,
    Finished,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Active => "active",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterviewState {
    /// Not started. `notice` holds the fallback entry after a failed start.
    Idle { notice: Option<ChatMessage> },
    Active {
        turn_count: u8,
        transcript: Vec<ChatMessage>,
    },
    Finished { transcript: Vec<ChatMessage> },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterviewError {
    #[error("An interview request is already in progress")]
    Busy,

    #[error("Cannot {action} while the interview is {phase}")]
    InvalidTransition { action: &'static str, phase: Phase },

    #[error("Answer cannot be empty")]
    EmptyAnswer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnKind {
    Start,
    Answer,
}

/// An outstanding backend call, issued by `begin_*` and consumed by `complete`.
#[derive(Debug)]
pub struct PendingTurn {
    generation: u64,
    kind: TurnKind,
    pub request: ChatRequest,
}

#[derive(Debug)]
pub struct InterviewSession {
    state: InterviewState,
    system_instruction: String,
    generation: u64,
    in_flight: bool,
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl InterviewSession {
    pub fn new() -> Self {
        Self {
            state: InterviewState::Idle { notice: None },
            system_instruction: String::new(),
            generation: 0,
            in_flight: false,
        }
    }

    pub fn state(&self) -> &InterviewState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            InterviewState::Idle { .. } => Phase::Idle,
            InterviewState::Active { .. } => Phase::Active,
            InterviewState::Finished { .. } => Phase::Finished,
        }
    }

    /// Questions asked so far. A finished interview has asked all of them.
    pub fn turn_count(&self) -> u8 {
        match self.state {
            InterviewState::Idle { .. } => 0,
            InterviewState::Active { turn_count, .. } => turn_count,
            InterviewState::Finished { .. } => MAX_QUESTIONS,
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        match &self.state {
            InterviewState::Idle { notice: Some(msg) } => std::slice::from_ref(msg),
            InterviewState::Idle { notice: None } => &[],
            InterviewState::Active { transcript, .. } => transcript,
            InterviewState::Finished { transcript } => transcript,
        }
    }

    /// Fraction of the interview completed, for the progress indicator.
    pub fn progress(&self) -> f32 {
        f32::from(self.turn_count().min(MAX_QUESTIONS)) / f32::from(MAX_QUESTIONS)
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    fn ensure_ready(&self, action: &'static str, expected: Phase) -> Result<(), InterviewError> {
        if self.in_flight {
            return Err(InterviewError::Busy);
        }
        let phase = self.phase();
        if phase != expected {
            return Err(InterviewError::InvalidTransition { action, phase });
        }
        Ok(())
    }

    fn issue(&mut self, kind: TurnKind, history: Vec<ChatMessage>, message: String) -> PendingTurn {
        self.in_flight = true;
        PendingTurn {
            generation: self.generation,
            kind,
            request: ChatRequest {
                model: DEFAULT_MODEL,
                system_instruction: self.system_instruction.clone(),
                history,
                message,
            },
        }
    }

    /// Idle → Active with `turn_count = 1` and an empty transcript.
    pub fn begin_start(&mut self, plan: &CareerPlan) -> Result<PendingTurn, InterviewError> {
        self.ensure_ready("start the interview", Phase::Idle)?;

        self.system_instruction = interview_system_instruction(plan);
        self.state = InterviewState::Active {
            turn_count: 1,
            transcript: Vec::new(),
        };
        Ok(self.issue(TurnKind::Start, Vec::new(), START_MESSAGE.to_string()))
    }

    /// Appends the user's answer and prepares a request carrying the whole transcript.
    pub fn begin_answer(&mut self, answer: &str) -> Result<PendingTurn, InterviewError> {
        self.ensure_ready("submit an answer", Phase::Active)?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(InterviewError::EmptyAnswer);
        }

        let InterviewState::Active { transcript, .. } = &mut self.state else {
            return Err(InterviewError::InvalidTransition {
                action: "submit an answer",
                phase: self.phase(),
            });
        };
        let history = transcript.clone();
        transcript.push(ChatMessage::user(answer));
        Ok(self.issue(TurnKind::Answer, history, answer.to_string()))
    }

    /// Applies a backend result. Returns `false` when the result was stale and dropped.
    pub fn complete(&mut self, pending: PendingTurn, result: Result<String, LlmError>) -> bool {
        if pending.generation != self.generation {
            debug!(
                "Discarding interview response from generation {} (now {})",
                pending.generation, self.generation
            );
            return false;
        }
        self.in_flight = false;

        match pending.kind {
            TurnKind::Start => self.apply_start(result),
            TurnKind::Answer => self.apply_answer(result),
        }
        true
    }

    fn apply_start(&mut self, result: Result<String, LlmError>) {
        match result {
            Ok(question) => {
                if let InterviewState::Active { transcript, .. } = &mut self.state {
                    transcript.push(ChatMessage::model(question.trim()));
                }
                info!("Interview started");
            }
            Err(e) => {
                warn!("Interview start failed: {e}");
                self.state = InterviewState::Idle {
                    notice: Some(ChatMessage::model(START_FAILED_MESSAGE)),
                };
            }
        }
    }

    fn apply_answer(&mut self, result: Result<String, LlmError>) {
        let InterviewState::Active {
            turn_count,
            transcript,
        } = &mut self.state
        else {
            return;
        };

        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Interview turn {} request failed: {e}", turn_count);
                transcript.push(ChatMessage::model(REQUEST_FAILED_MESSAGE));
                return;
            }
        };

        match interpret_turn(&raw, *turn_count) {
            TurnOutcome::NextQuestion { feedback, question } => {
                push_feedback(transcript, feedback);
                transcript.push(ChatMessage::model(question));
                *turn_count += 1;
            }
            TurnOutcome::Summary { feedback, summary } => {
                push_feedback(transcript, feedback);
                transcript.push(ChatMessage::model(format!("Final Summary: {summary}")));
                let transcript = std::mem::take(transcript);
                self.state = InterviewState::Finished { transcript };
                info!("Interview finished");
            }
            TurnOutcome::Malformed { feedback } => {
                warn!(
                    "Interview turn {} response missing delimiter: {:?}",
                    turn_count, raw
                );
                push_feedback(transcript, feedback);
                transcript.push(ChatMessage::model(FORMAT_ISSUE_MESSAGE));
            }
        }
    }

    /// Back to Idle from any phase. Results of calls already in flight are discarded.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.in_flight = false;
        self.state = InterviewState::Idle { notice: None };
    }

    /// Runs a full start round trip against `backend`.
    pub async fn start(
        &mut self,
        backend: &dyn GenerativeBackend,
        plan: &CareerPlan,
    ) -> Result<(), InterviewError> {
        let pending = self.begin_start(plan)?;
        let result = backend.chat(&pending.request).await;
        self.complete(pending, result);
        Ok(())
    }

    /// Runs a full answer round trip against `backend`.
    pub async fn submit_answer(
        &mut self,
        backend: &dyn GenerativeBackend,
        answer: &str,
    ) -> Result<(), InterviewError> {
        let pending = self.begin_answer(answer)?;
        let result = backend.chat(&pending.request).await;
        self.complete(pending, result);
        Ok(())
    }
}

fn push_feedback(transcript: &mut Vec<ChatMessage>, feedback: Option<String>) {
    if let Some(feedback) = feedback {
        transcript.push(ChatMessage::model(format!("Feedback: {feedback}")));
    }
}
