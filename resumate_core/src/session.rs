//! Per-conversation session state.
//!
//! A conversation without a stored [`Session`] is in [`Mode::None`]. Each
//! session variant carries only the data its step of the flow needs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::ConversationId;

/// Current step of a multi-turn flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    None,
    ResumeUploaded,
    WaitingForJobTitle,
    MockInterview,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::ResumeUploaded => "RESUME_UPLOADED",
            Self::WaitingForJobTitle => "WAITING_FOR_JOB_TITLE",
            Self::MockInterview => "MOCK_INTERVIEW",
        };
        f.write_str(name)
    }
}

/// Text and skills extracted from an uploaded résumé.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeData {
    pub text: String,
    pub skills: Vec<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweredQuestion {
    pub question: String,
    pub answer: String,
}

/// An ongoing mock interview.
///
/// `current < questions.len()` holds for every value built through
/// [`Interview::new`] and advanced through [`Interview::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interview {
    questions: Vec<String>,
    answers: Vec<AnsweredQuestion>,
    current: usize,
}

impl Interview {
    /// Start an interview at the first question. Returns `None` when there
    /// are no questions to ask.
    #[must_use]
    pub fn new(questions: Vec<String>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        Some(Self {
            questions,
            answers: Vec::new(),
            current: 0,
        })
    }

    #[must_use]
    pub fn current_question(&self) -> &str {
        &self.questions[self.current]
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[AnsweredQuestion] {
        &self.answers
    }

    /// Record `answer` against the current question.
    pub fn record_answer(&mut self, answer: impl Into<String>) {
        let question = self.current_question().to_string();
        self.answers.push(AnsweredQuestion {
            question,
            answer: answer.into(),
        });
    }

    /// Move to the next question. Returns `false`, leaving the index
    /// untouched, when the current question was the last one.
    pub fn advance(&mut self) -> bool {
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }
}

/// Stored state of one conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    ResumeUploaded(ResumeData),
    WaitingForJobTitle(ResumeData),
    MockInterview(Interview),
}

impl Session {
    #[must_use]
    pub const fn mode(&self) -> Mode {
        match self {
            Self::ResumeUploaded(_) => Mode::ResumeUploaded,
            Self::WaitingForJobTitle(_) => Mode::WaitingForJobTitle,
            Self::MockInterview(_) => Mode::MockInterview,
        }
    }

    #[must_use]
    pub const fn resume(&self) -> Option<&ResumeData> {
        match self {
            Self::ResumeUploaded(data) | Self::WaitingForJobTitle(data) => Some(data),
            Self::MockInterview(_) => None,
        }
    }
}

/// Mode of an optional session; absence means [`Mode::None`].
#[must_use]
pub fn mode_of(session: Option<&Session>) -> Mode {
    session.map_or(Mode::None, Session::mode)
}

/// Keyed storage for sessions.
///
/// Each call is atomic on its own; a get → modify → set sequence spanning one
/// event is not.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: ConversationId) -> anyhow::Result<Option<Session>>;
    async fn set(&self, id: ConversationId, session: Session) -> anyhow::Result<()>;
    /// Remove and return the session for `id`, if any.
    async fn delete(&self, id: ConversationId) -> anyhow::Result<Option<Session>>;
}

/// Process-local store. State is lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<ConversationId, Session>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: ConversationId) -> anyhow::Result<Option<Session>> {
        Ok(self.sessions.lock().await.get(&id).cloned())
    }

    async fn set(&self, id: ConversationId, session: Session) -> anyhow::Result<()> {
        debug!("Session {id} -> {}", session.mode());
        self.sessions.lock().await.insert(id, session);
        Ok(())
    }

    async fn delete(&self, id: ConversationId) -> anyhow::Result<Option<Session>> {
        let removed = self.sessions.lock().await.remove(&id);
        if removed.is_some() {
            debug!("Session {id} cleared");
        }
        Ok(removed)
    }
}
