//! Typed inbound events.

use resumate_core::ConversationId;

/// Prefix shared by the buttons of the résumé action menu.
const RESUME_ACTION_PREFIX: &str = "action_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    EndInterview,
}

impl Command {
    /// Parse `/start`, `/help` or `/end_interview`, tolerating a trailing
    /// `@bot_name` mention and arguments.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.trim().split_whitespace().next()?;
        let name = word.strip_prefix('/')?.split('@').next()?;

        match name.to_lowercase().as_str() {
            "start" => Some(Self::Start),
            "help" => Some(Self::Help),
            "end_interview" => Some(Self::EndInterview),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::EndInterview => "end_interview",
        }
    }
}

/// Action code carried by an inline button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    UploadResume,
    AtsScore,
    AnalyzeResume,
    GenerateQuestions,
    MockInterview,
    Help,
    GenerateFromResume,
    GeneralQuestions,
    TechQuestions,
    BehavioralQuestions,
    ResumeAts,
    ResumeQuestions,
    ResumeAnalysis,
    ResumeOptimizeRole,
    Other(String),
}

impl Action {
    #[must_use]
    pub fn parse(code: &str) -> Self {
        match code {
            "upload_resume" => Self::UploadResume,
            "ats_score" => Self::AtsScore,
            "analyze_resume" => Self::AnalyzeResume,
            "generate_questions" => Self::GenerateQuestions,
            "mock_interview" => Self::MockInterview,
            "help" => Self::Help,
            "generate_from_resume" => Self::GenerateFromResume,
            "general_questions" => Self::GeneralQuestions,
            "tech_questions" => Self::TechQuestions,
            "behavioral_questions" => Self::BehavioralQuestions,
            "action_ats" => Self::ResumeAts,
            "action_generate_questions" => Self::ResumeQuestions,
            "action_content_analysis" => Self::ResumeAnalysis,
            "action_optimize_role" => Self::ResumeOptimizeRole,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::UploadResume => "upload_resume",
            Self::AtsScore => "ats_score",
            Self::AnalyzeResume => "analyze_resume",
            Self::GenerateQuestions => "generate_questions",
            Self::MockInterview => "mock_interview",
            Self::Help => "help",
            Self::GenerateFromResume => "generate_from_resume",
            Self::GeneralQuestions => "general_questions",
            Self::TechQuestions => "tech_questions",
            Self::BehavioralQuestions => "behavioral_questions",
            Self::ResumeAts => "action_ats",
            Self::ResumeQuestions => "action_generate_questions",
            Self::ResumeAnalysis => "action_content_analysis",
            Self::ResumeOptimizeRole => "action_optimize_role",
            Self::Other(code) => code,
        }
    }

    /// Résumé actions operate on an uploaded résumé; every other button
    /// starts a new top-level flow.
    #[must_use]
    pub fn is_resume_action(&self) -> bool {
        self.code().starts_with(RESUME_ACTION_PREFIX)
    }
}

/// Reference to an uploaded document on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub id: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

impl FileRef {
    #[must_use]
    pub fn is_pdf(&self) -> bool {
        self.mime_type
            .as_deref()
            .is_some_and(|mime| mime.to_ascii_lowercase().contains("pdf"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command {
        chat: ConversationId,
        command: Command,
    },
    Button {
        chat: ConversationId,
        interaction_id: String,
        action: Action,
    },
    /// Non-command text message.
    Text { chat: ConversationId, text: String },
    Document { chat: ConversationId, file: FileRef },
}

impl Event {
    #[must_use]
    pub const fn conversation(&self) -> ConversationId {
        match self {
            Self::Command { chat, .. }
            | Self::Button { chat, .. }
            | Self::Text { chat, .. }
            | Self::Document { chat, .. } => *chat,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Command { .. } => "command",
            Self::Button { .. } => "button",
            Self::Text { .. } => "text",
            Self::Document { .. } => "document",
        }
    }
}
