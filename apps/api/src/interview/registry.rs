//! Per-user interview sessions held by the server.
//!
//! The map lock is only taken to begin or complete a turn, never across the
//! backend call. Concurrent requests for one user are therefore serialized by
//! the session's own busy flag, and a reset issued mid-call wins over the late
//! result.
//!
//! The backend call runs on its own task. If the HTTP request is dropped
//! mid-call, the turn still completes and the session does not stay busy.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Context;
use serde::Serialize;
use uuid::Uuid;

use crate::interview::session::{InterviewError, InterviewSession, PendingTurn, Phase};
use crate::llm_client::{GenerativeBackend, LlmError};
use crate::models::chat::ChatMessage;
use crate::models::plan::CareerPlan;

/// Snapshot of a session as the client renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub phase: Phase,
    pub turn_count: u8,
    pub progress: f32,
    pub busy: bool,
    pub transcript: Vec<ChatMessage>,
}

impl From<&InterviewSession> for SessionView {
    fn from(session: &InterviewSession) -> Self {
        Self {
            phase: session.phase(),
            turn_count: session.turn_count(),
            progress: session.progress(),
            busy: session.is_busy(),
            transcript: session.transcript().to_vec(),
        }
    }
}

#[derive(Clone, Default)]
pub struct InterviewRegistry {
    sessions: Arc<Mutex<HashMap<Uuid, InterviewSession>>>,
}

impl InterviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<Uuid, InterviewSession>> {
        // Sessions hold no invariants that a panicking holder could half-apply.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn view(&self, user_id: Uuid) -> SessionView {
        match self.sessions().get(&user_id) {
            Some(session) => session.into(),
            None => SessionView::from(&InterviewSession::new()),
        }
    }

    pub fn begin_start(&self, user_id: Uuid, plan: &CareerPlan) -> Result<PendingTurn, InterviewError> {
        self.sessions().entry(user_id).or_default().begin_start(plan)
    }

    pub fn begin_answer(&self, user_id: Uuid, answer: &str) -> Result<PendingTurn, InterviewError> {
        match self.sessions().get_mut(&user_id) {
            Some(session) => session.begin_answer(answer),
            None => Err(InterviewError::InvalidTransition {
                action: "submit an answer",
                phase: Phase::Idle,
            }),
        }
    }

    /// Applies a backend result and returns the resulting view.
    pub fn complete(
        &self,
        user_id: Uuid,
        pending: PendingTurn,
        result: Result<String, LlmError>,
    ) -> SessionView {
        let mut sessions = self.sessions();
        let session = sessions.entry(user_id).or_default();
        session.complete(pending, result);
        SessionView::from(&*session)
    }

    /// Resets in place so the session keeps its generation counter.
    pub fn reset(&self, user_id: Uuid) -> SessionView {
        let mut sessions = self.sessions();
        let session = sessions.entry(user_id).or_default();
        session.reset();
        SessionView::from(&*session)
    }

    /// Sends a pending turn to the backend without holding the lock.
    ///
    /// The round trip is detached from the caller; dropping the returned future
    /// does not cancel it.
    pub async fn drive(
        &self,
        backend: Arc<dyn GenerativeBackend>,
        user_id: Uuid,
        pending: PendingTurn,
    ) -> anyhow::Result<SessionView> {
        let registry = self.clone();
        let round_trip = tokio::spawn(async move {
            let result = backend.chat(&pending.request).await;
            registry.complete(user_id, pending, result)
        });
        round_trip.await.context("Interview turn task failed")
    }
}
