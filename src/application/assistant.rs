//! Assistant - stateful multi-turn Q&A scoped to one document snapshot.
//!
//! The context is the document text captured when the assistant was opened;
//! refinements completing afterwards do not re-ground an open session.
//! Every completed exchange ends with a paired assistant turn: the real
//! answer on success, a fixed failure notice otherwise.

use crate::domain::foundation::{Timestamp, TurnId};
use crate::ports::{AiError, QaService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// Assistant turn appended when the answering collaborator fails.
pub const FAILURE_NOTICE: &str = "Error: Unable to get a response. Please try again.";

/// Who produced a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One immutable turn in a query session transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    id: TurnId,
    role: TurnRole,
    text: String,
    created_at: Timestamp,
}

impl Turn {
    fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            id: TurnId::new(),
            role,
            text: text.into(),
            created_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> &TurnId {
        &self.id
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

/// Ordered turn log of one query session.
///
/// Starts empty and alternates User -> Assistant per completed exchange; an
/// in-flight question leaves the last User turn momentarily unanswered.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::new(TurnRole::User, text));
    }

    fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::new(TurnRole::Assistant, text));
    }
}

/// Errors from asking the assistant a question.
#[derive(Debug, Error)]
pub enum AskError {
    /// Rejected synchronously, before any turn is appended.
    #[error("question cannot be empty")]
    EmptyQuestion,

    /// The answering collaborator failed. The transcript still received the
    /// fixed failure notice, so the exchange stays paired.
    #[error("question answering failed: {0}")]
    Service(#[from] AiError),
}

/// A query session over one frozen document snapshot.
///
/// Independent per document: open as many as needed. A single session
/// processes one question at a time; concurrent `ask` calls queue on the
/// transcript lock and never interleave in the turn log.
pub struct Assistant {
    context: String,
    qa: Arc<dyn QaService>,
    transcript: Mutex<Transcript>,
}

impl Assistant {
    pub(crate) fn open(context: String, qa: Arc<dyn QaService>) -> Self {
        Self {
            context,
            qa,
            transcript: Mutex::new(Transcript::default()),
        }
    }

    /// The document text this session is grounded in.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Asks one question against the session context.
    ///
    /// The user turn is appended optimistically; the matching assistant
    /// turn carries the answer, or [`FAILURE_NOTICE`] when the collaborator
    /// fails (in which case the error is also returned so the caller can
    /// react).
    pub async fn ask(&self, question: &str) -> Result<String, AskError> {
        if question.trim().is_empty() {
            return Err(AskError::EmptyQuestion);
        }

        let mut transcript = self.transcript.lock().await;
        transcript.push_user(question);
        let mut exchange = ExchangeGuard::new(transcript);

        match self.qa.answer(question, &self.context).await {
            Ok(answer) => {
                exchange.finish(answer.clone());
                Ok(answer)
            }
            Err(err) => {
                tracing::warn!(error = %err, "assistant exchange failed");
                exchange.finish(FAILURE_NOTICE);
                Err(AskError::Service(err))
            }
        }
    }

    /// A copy of the transcript as of now.
    pub async fn transcript(&self) -> Vec<Turn> {
        self.transcript.lock().await.turns().to_vec()
    }
}

/// Pairs the optimistically appended user turn no matter how the exchange
/// ends. If the `ask` future is dropped mid-flight, the guard's `Drop`
/// appends the failure notice so the turn log keeps alternating.
struct ExchangeGuard<'a> {
    transcript: Option<tokio::sync::MutexGuard<'a, Transcript>>,
}

impl<'a> ExchangeGuard<'a> {
    fn new(transcript: tokio::sync::MutexGuard<'a, Transcript>) -> Self {
        Self {
            transcript: Some(transcript),
        }
    }

    fn finish(&mut self, text: impl Into<String>) {
        if let Some(mut transcript) = self.transcript.take() {
            transcript.push_assistant(text);
        }
    }
}

impl Drop for ExchangeGuard<'_> {
    fn drop(&mut self) {
        if let Some(transcript) = self.transcript.as_mut() {
            tracing::warn!("assistant exchange abandoned mid-flight");
            transcript.push_assistant(FAILURE_NOTICE);
        }
    }
}
