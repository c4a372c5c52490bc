use async_trait::async_trait;
use resumate_conversation::{DocumentSource, FileRef};
use resumate_core::{ChatTransport, ConversationId, Keyboard, SendOptions, TransportError};
use teloxide::net::Download;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{CallbackQueryId, FileId, InlineKeyboardButton, InlineKeyboardMarkup};
use tokio::io::AsyncWrite;

/// Bot API implementation of the outbound transport and the document source.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    #[must_use]
    pub const fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn inline_keyboard(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|button| InlineKeyboardButton::callback(&button.label, &button.action))
            .collect::<Vec<_>>()
    }))
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(
        &self,
        to: ConversationId,
        text: &str,
        options: &SendOptions,
    ) -> Result<(), TransportError> {
        // Plain text only: no parse mode is ever set.
        let mut request = self.bot.send_message(ChatId(to.0), text);
        if let Some(keyboard) = &options.keyboard {
            request = request.reply_markup(inline_keyboard(keyboard));
        }
        request
            .await
            .map(|_| ())
            .map_err(|e| TransportError::Send(e.to_string()))
    }

    async fn answer_interaction(&self, interaction_id: &str) -> Result<(), TransportError> {
        self.bot
            .answer_callback_query(CallbackQueryId(interaction_id.to_string()))
            .await
            .map(|_| ())
            .map_err(|e| TransportError::Acknowledge(e.to_string()))
    }
}

#[async_trait]
impl DocumentSource for TelegramTransport {
    async fn download(
        &self,
        file: &FileRef,
        destination: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<(), TransportError> {
        let meta = self
            .bot
            .get_file(FileId(file.id.clone()))
            .await
            .map_err(|e| TransportError::Download(e.to_string()))?;
        self.bot
            .download_file(&meta.path, destination)
            .await
            .map_err(|e| TransportError::Download(e.to_string()))
    }
}
