//! Outbound side of the chat platform.

use async_trait::async_trait;
use thiserror::Error;

use crate::ConversationId;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("send failed: {0}")]
    Send(String),

    #[error("interaction acknowledgement failed: {0}")]
    Acknowledge(String),

    #[error("file download failed: {0}")]
    Download(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Inline button: a visible label and the action code it reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: String,
}

impl Button {
    #[must_use]
    pub fn new(label: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: action.into(),
        }
    }
}

/// Inline keyboard laid out as rows of buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// One button per row, the layout every menu of the bot uses.
    #[must_use]
    pub fn column(buttons: impl IntoIterator<Item = Button>) -> Self {
        Self {
            rows: buttons.into_iter().map(|b| vec![b]).collect(),
        }
    }
}

/// Per-message send options. Text is always sent without a parse mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    pub keyboard: Option<Keyboard>,
}

impl SendOptions {
    #[must_use]
    pub const fn with_keyboard(keyboard: Keyboard) -> Self {
        Self {
            keyboard: Some(keyboard),
        }
    }
}

#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one plain-text message.
    async fn send_text(
        &self,
        to: ConversationId,
        text: &str,
        options: &SendOptions,
    ) -> Result<(), TransportError>;

    /// Acknowledge a button press so the client stops its loading indicator.
    async fn answer_interaction(&self, interaction_id: &str) -> Result<(), TransportError>;
}
