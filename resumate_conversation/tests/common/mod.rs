//! Fakes shared by the conversation integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use resumate_conversation::{
    ConversationEngine, DocumentIngestor, DocumentSource, Event, ExtractionError, FileRef,
    TextExtractor,
};
use resumate_core::{
    ChatTransport, ConversationId, InMemorySessionStore, Keyboard, SendOptions, TextGenerator,
    TransportError,
};
use std::collections::{HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::time::Instant;

pub const CHAT: ConversationId = ConversationId(1001);

#[derive(Debug, Clone)]
pub struct Sent {
    pub to: ConversationId,
    pub text: String,
    pub keyboard: Option<Keyboard>,
    pub at: Instant,
}

/// Records every send; attempts listed in `fail_attempts` (1-based) fail.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    attempts: Mutex<usize>,
    fail_attempts: HashSet<usize>,
    acks: Mutex<Vec<String>>,
}

impl RecordingTransport {
    pub fn failing_on(attempts: &[usize]) -> Self {
        Self {
            fail_attempts: attempts.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|s| s.text).collect()
    }

    pub fn count_starting_with(&self, prefix: &str) -> usize {
        self.texts().iter().filter(|t| t.starts_with(prefix)).count()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }

    pub fn acks(&self) -> Vec<String> {
        self.acks.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(
        &self,
        to: ConversationId,
        text: &str,
        options: &SendOptions,
    ) -> Result<(), TransportError> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };
        if self.fail_attempts.contains(&attempt) {
            return Err(TransportError::Send(format!("attempt {attempt} rejected")));
        }
        self.sent.lock().unwrap().push(Sent {
            to,
            text: text.to_string(),
            keyboard: options.keyboard.clone(),
            at: Instant::now(),
        });
        Ok(())
    }

    async fn answer_interaction(&self, interaction_id: &str) -> Result<(), TransportError> {
        self.acks.lock().unwrap().push(interaction_id.to_string());
        Ok(())
    }
}

/// Replies with queued texts in order, then with a fixed fallback.
#[derive(Default)]
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn with_replies(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| (*r).to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, reply: &str) {
        self.replies.lock().unwrap().push_back(reply.to_string());
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, prompt: &str) -> String {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "Generated text.".to_string())
    }
}

/// Serves canned bytes by file id.
pub struct CannedSource;

#[async_trait]
impl DocumentSource for CannedSource {
    async fn download(
        &self,
        file: &FileRef,
        destination: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<(), TransportError> {
        let bytes: &[u8] = match file.id.as_str() {
            "resume" => b"Backend engineer: Rust, Go, PostgreSQL, Docker and Kubernetes.",
            "blank" => b"Enthusiastic person looking for opportunities.",
            "broken" => b"%BAD",
            _ => return Err(TransportError::Download(format!("unknown file {}", file.id))),
        };
        destination.write_all(bytes).await?;
        Ok(())
    }
}

/// UTF-8 stand-in for PDF parsing; `%BAD` input is malformed.
pub struct Utf8Extractor;

impl TextExtractor for Utf8Extractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if bytes.starts_with(b"%BAD") {
            return Err(ExtractionError::Malformed("broken xref table".into()));
        }
        String::from_utf8(bytes.to_vec()).map_err(|e| ExtractionError::Malformed(e.to_string()))
    }
}

pub struct Harness {
    pub engine: ConversationEngine,
    pub transport: Arc<RecordingTransport>,
    pub generator: Arc<ScriptedGenerator>,
    pub store: Arc<InMemorySessionStore>,
    pub download_dir: tempfile::TempDir,
}

impl Harness {
    pub fn new(generator: ScriptedGenerator) -> Self {
        Self::with_chunk_len(generator, 4000)
    }

    pub fn with_chunk_len(generator: ScriptedGenerator, max_chunk_len: usize) -> Self {
        let transport = Arc::new(RecordingTransport::default());
        let generator = Arc::new(generator);
        let store = Arc::new(InMemorySessionStore::new());
        let download_dir = tempfile::tempdir().unwrap();
        let ingestor = DocumentIngestor::new(
            Arc::new(CannedSource),
            Arc::new(Utf8Extractor),
            download_dir.path(),
        );
        let engine = ConversationEngine::new(
            store.clone(),
            generator.clone(),
            transport.clone(),
            ingestor,
        )
        .with_delivery(max_chunk_len, Duration::ZERO)
        .with_question_count(3);

        Self {
            engine,
            transport,
            generator,
            store,
            download_dir,
        }
    }

    pub async fn send(&self, event: Event) {
        self.engine.handle(event).await.unwrap();
    }

    pub async fn text(&self, text: &str) {
        self.send(Event::Text {
            chat: CHAT,
            text: text.to_string(),
        })
        .await;
    }

    pub async fn press(&self, code: &str) {
        self.send(Event::Button {
            chat: CHAT,
            interaction_id: format!("cb-{code}"),
            action: resumate_conversation::Action::parse(code),
        })
        .await;
    }

    pub async fn command(&self, command: resumate_conversation::Command) {
        self.send(Event::Command { chat: CHAT, command }).await;
    }

    pub async fn upload(&self, file_id: &str, mime_type: &str) {
        self.send(Event::Document {
            chat: CHAT,
            file: FileRef {
                id: file_id.to_string(),
                file_name: Some(format!("{file_id}.pdf")),
                mime_type: Some(mime_type.to_string()),
            },
        })
        .await;
    }

    pub async fn mode(&self) -> resumate_core::Mode {
        self.engine.mode(CHAT).await.unwrap()
    }
}
