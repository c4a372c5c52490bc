//! The per-conversation state machine.
//!
//! | event                         | guard                   | next state              |
//! |-------------------------------|-------------------------|-------------------------|
//! | `/start`                      | -                       | none                    |
//! | top-level button              | -                       | none (session cleared)  |
//! | `mock_interview` button       | ≥ 1 parsed question     | mock interview          |
//! | PDF upload                    | MIME type is PDF        | résumé uploaded / none  |
//! | `action_*` button             | résumé uploaded         | unchanged               |
//! | `action_optimize_role` button | résumé uploaded         | waiting for job title   |
//! | text                          | waiting for job title   | none                    |
//! | text                          | mock interview          | mock interview / none   |
//! | `/end_interview`              | mock interview          | none                    |

use resumate_core::{
    AtsReport, ChatTransport, ConversationId, Interview, Keyboard, Mode, ResumeData, SendOptions,
    Session, SessionStore, TextGenerator, session::mode_of,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::delivery::Deliverer;
use crate::event::{Action, Command, Event, FileRef};
use crate::ingest::DocumentIngestor;
use crate::interview::{format_question, parse_questions};
use crate::menu;
use crate::prompts::{self, QuestionBank};

const DEFAULT_QUESTION_COUNT: usize = 8;

#[derive(Debug, Error)]
pub enum ConversationError {
    #[error("session store error: {0}")]
    Store(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ConversationError>;

pub struct ConversationEngine {
    store: Arc<dyn SessionStore>,
    generator: Arc<dyn TextGenerator>,
    transport: Arc<dyn ChatTransport>,
    deliverer: Deliverer,
    ingestor: DocumentIngestor,
    question_count: usize,
}

impl ConversationEngine {
    pub fn new(
        store: Arc<dyn SessionStore>,
        generator: Arc<dyn TextGenerator>,
        transport: Arc<dyn ChatTransport>,
        ingestor: DocumentIngestor,
    ) -> Self {
        Self {
            store,
            generator,
            deliverer: Deliverer::new(Arc::clone(&transport)),
            transport,
            ingestor,
            question_count: DEFAULT_QUESTION_COUNT,
        }
    }

    /// Chunk size and pacing for outgoing replies.
    #[must_use]
    pub fn with_delivery(mut self, max_chunk_len: usize, chunk_delay: Duration) -> Self {
        self.deliverer = Deliverer::new(Arc::clone(&self.transport))
            .with_max_chunk_len(max_chunk_len)
            .with_chunk_delay(chunk_delay);
        self
    }

    /// Number of questions requested for a mock interview.
    #[must_use]
    pub fn with_question_count(mut self, question_count: usize) -> Self {
        self.question_count = question_count.max(1);
        self
    }

    /// Current mode of a conversation.
    pub async fn mode(&self, chat: ConversationId) -> Result<Mode> {
        Ok(mode_of(self.store.get(chat).await?.as_ref()))
    }

    /// Handle one inbound event to completion.
    pub async fn handle(&self, event: Event) -> Result<()> {
        let chat = event.conversation();
        debug!("[{chat}] Handling {} event", event.kind());

        match event {
            Event::Command { command, .. } => self.on_command(chat, command).await,
            Event::Button {
                interaction_id,
                action,
                ..
            } => self.on_button(chat, &interaction_id, action).await,
            Event::Text { text, .. } => self.on_text(chat, &text).await,
            Event::Document { file, .. } => self.on_document(chat, &file).await,
        }
    }

    async fn say(&self, chat: ConversationId, text: &str) {
        self.deliverer
            .deliver(chat, text, &SendOptions::default())
            .await;
    }

    async fn say_with_menu(&self, chat: ConversationId, text: &str, keyboard: Keyboard) {
        self.deliverer
            .deliver(chat, text, &SendOptions::with_keyboard(keyboard))
            .await;
    }

    async fn on_command(&self, chat: ConversationId, command: Command) -> Result<()> {
        info!("[{chat}] Command: /{}", command.name());
        match command {
            Command::Start => {
                self.store.delete(chat).await?;
                self.say_with_menu(chat, prompts::WELCOME, menu::main_menu())
                    .await;
            }
            Command::Help => self.say(chat, prompts::HELP).await,
            Command::EndInterview => {
                if let Some(Session::MockInterview(_)) = self.store.get(chat).await? {
                    self.store.delete(chat).await?;
                    self.say(chat, prompts::INTERVIEW_COMPLETE).await;
                } else {
                    self.say(chat, prompts::NO_ACTIVE_INTERVIEW).await;
                }
            }
        }
        Ok(())
    }

    async fn on_button(
        &self,
        chat: ConversationId,
        interaction_id: &str,
        action: Action,
    ) -> Result<()> {
        info!("[{chat}] Button: {}", action.code());

        if let Err(e) = self.transport.answer_interaction(interaction_id).await {
            warn!("[{chat}] Failed to acknowledge button press: {e}");
        }

        // A top-level button abandons whatever flow was in progress.
        if !action.is_resume_action() {
            self.store.delete(chat).await?;
        }

        match &action {
            Action::UploadResume => self.say(chat, prompts::UPLOAD_PROMPT).await,
            Action::AtsScore => self.say(chat, prompts::ATS_UPLOAD_PROMPT).await,
            Action::AnalyzeResume => self.say(chat, prompts::ANALYSIS_UPLOAD_PROMPT).await,
            Action::GenerateFromResume => {
                self.say(chat, prompts::FROM_RESUME_UPLOAD_PROMPT).await;
            }
            Action::GenerateQuestions => {
                self.say_with_menu(
                    chat,
                    prompts::QUESTION_TYPE_PROMPT,
                    menu::question_type_menu(),
                )
                .await;
            }
            Action::Help => self.say(chat, prompts::HELP).await,
            Action::GeneralQuestions => self.question_bank(chat, QuestionBank::General).await,
            Action::TechQuestions => self.question_bank(chat, QuestionBank::Technical).await,
            Action::BehavioralQuestions => {
                self.question_bank(chat, QuestionBank::Behavioral).await;
            }
            Action::MockInterview => self.start_mock_interview(chat).await?,
            Action::ResumeAts
            | Action::ResumeQuestions
            | Action::ResumeAnalysis
            | Action::ResumeOptimizeRole => self.on_resume_action(chat, &action).await?,
            Action::Other(_) if action.is_resume_action() => {
                self.on_resume_action(chat, &action).await?;
            }
            Action::Other(code) => debug!("[{chat}] Ignoring unknown action {code}"),
        }
        Ok(())
    }

    async fn on_resume_action(&self, chat: ConversationId, action: &Action) -> Result<()> {
        let Some(Session::ResumeUploaded(resume)) = self.store.get(chat).await? else {
            debug!("[{chat}] {} ignored: no uploaded resume", action.code());
            return Ok(());
        };

        match action {
            Action::ResumeAts => {
                let report = {
                    let mut rng = rand::thread_rng();
                    AtsReport::compute(&resume.text, &mut rng)
                };
                info!("[{chat}] ATS score {}", report.score);
                self.say(chat, &report.render()).await;
            }
            Action::ResumeQuestions => {
                if resume.skills.is_empty() {
                    self.say(chat, prompts::NO_SKILLS_FOR_QUESTIONS).await;
                    return Ok(());
                }
                self.say(chat, prompts::GENERATING_TAILORED).await;
                let questions = self
                    .generator
                    .complete(&prompts::tailored_questions(&resume.skills))
                    .await;
                self.say(
                    chat,
                    &prompts::titled("🎯 Tailored Interview Questions", &questions),
                )
                .await;
            }
            Action::ResumeAnalysis => {
                self.say(chat, prompts::ANALYZING_CONTENT).await;
                let analysis = self
                    .generator
                    .complete(&prompts::content_analysis(&resume.text))
                    .await;
                self.say(
                    chat,
                    &prompts::titled("📝 Resume Analysis Report", &analysis),
                )
                .await;
            }
            Action::ResumeOptimizeRole => {
                self.store
                    .set(chat, Session::WaitingForJobTitle(resume))
                    .await?;
                self.say(chat, prompts::JOB_TITLE_PROMPT).await;
            }
            other => debug!("[{chat}] Ignoring unknown resume action {}", other.code()),
        }
        Ok(())
    }

    async fn question_bank(&self, chat: ConversationId, bank: QuestionBank) {
        self.say(chat, bank.progress()).await;
        let questions = self.generator.complete(bank.prompt()).await;
        self.say(chat, &prompts::titled(bank.title(), &questions))
            .await;
    }

    async fn start_mock_interview(&self, chat: ConversationId) -> Result<()> {
        self.say(chat, prompts::INTERVIEW_INTRO).await;

        let reply = self
            .generator
            .complete(&prompts::mock_interview(self.question_count))
            .await;

        let Some(interview) = Interview::new(parse_questions(&reply)) else {
            warn!("[{chat}] No interview questions could be parsed from the reply");
            self.say(chat, prompts::INTERVIEW_FAILED).await;
            return Ok(());
        };

        info!(
            "[{chat}] Mock interview started with {} questions",
            interview.total()
        );
        let first = format_question(&interview);
        self.store.set(chat, Session::MockInterview(interview)).await?;
        self.say(chat, &first).await;
        Ok(())
    }

    async fn on_text(&self, chat: ConversationId, text: &str) -> Result<()> {
        match self.store.get(chat).await? {
            Some(Session::WaitingForJobTitle(resume)) => {
                self.optimize_for_role(chat, &resume, text.trim()).await
            }
            Some(Session::MockInterview(interview)) => {
                self.answer_question(chat, interview, text).await
            }
            other => {
                debug!("[{chat}] Ignoring text in mode {}", mode_of(other.as_ref()));
                Ok(())
            }
        }
    }

    async fn optimize_for_role(
        &self,
        chat: ConversationId,
        resume: &ResumeData,
        job_title: &str,
    ) -> Result<()> {
        info!("[{chat}] Optimizing resume for {job_title:?}");
        self.say(chat, &prompts::optimizing_for_role(job_title))
            .await;

        let optimization = self
            .generator
            .complete(&prompts::optimize_for_role(&resume.text, job_title))
            .await;
        self.say(chat, &prompts::optimization_result(job_title, &optimization))
            .await;

        self.store.delete(chat).await?;
        Ok(())
    }

    async fn answer_question(
        &self,
        chat: ConversationId,
        mut interview: Interview,
        answer: &str,
    ) -> Result<()> {
        let question = interview.current_question().to_string();
        interview.record_answer(answer);

        let feedback = self
            .generator
            .complete(&prompts::answer_feedback(&question, answer))
            .await;
        self.say(chat, &prompts::feedback(&feedback)).await;

        if interview.advance() {
            let next = format_question(&interview);
            self.store.set(chat, Session::MockInterview(interview)).await?;
            self.say(chat, &next).await;
        } else {
            info!(
                "[{chat}] Mock interview finished after {} answers",
                interview.answers().len()
            );
            self.store.delete(chat).await?;
            self.say(chat, prompts::INTERVIEW_COMPLETE).await;
        }
        Ok(())
    }

    async fn on_document(&self, chat: ConversationId, file: &FileRef) -> Result<()> {
        if !file.is_pdf() {
            info!(
                "[{chat}] Rejected upload with MIME type {:?}",
                file.mime_type
            );
            self.say(chat, prompts::ONLY_PDF).await;
            return Ok(());
        }

        self.say(chat, prompts::PROCESSING_RESUME).await;

        match self.ingestor.ingest(file).await {
            Ok(document) => {
                info!(
                    "[{chat}] Resume processed: {} skills detected",
                    document.skills.len()
                );
                let summary = prompts::resume_processed(&document.skills);
                self.store
                    .set(
                        chat,
                        Session::ResumeUploaded(ResumeData {
                            text: document.text,
                            skills: document.skills,
                            file_name: document.file_name,
                        }),
                    )
                    .await?;
                self.say_with_menu(chat, &summary, menu::resume_action_menu())
                    .await;
            }
            Err(e) => {
                warn!("[{chat}] Resume processing failed: {e}");
                self.store.delete(chat).await?;
                self.say(chat, prompts::PROCESSING_FAILED).await;
            }
        }
        Ok(())
    }
}
