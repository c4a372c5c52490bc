use crate::Result;
use resumate_conversation::{Action, Command, ConversationEngine, Event, FileRef};
use resumate_core::ConversationId;
use resumate_core::util::preview;
use std::sync::Arc;
use teloxide::types::{CallbackQuery, Message};
use tracing::{debug, info};

/// Translate a Telegram message into an engine event.
///
/// Documents win over captions. Slash-prefixed text that is not a known
/// command is dropped.
fn message_event(msg: &Message) -> Option<Event> {
    let chat = ConversationId(msg.chat.id.0);

    if let Some(document) = msg.document() {
        return Some(Event::Document {
            chat,
            file: FileRef {
                id: document.file.id.0.clone(),
                file_name: document.file_name.clone(),
                mime_type: document.mime_type.as_ref().map(ToString::to_string),
            },
        });
    }

    let text = msg.text()?;
    if let Some(command) = Command::parse(text) {
        return Some(Event::Command { chat, command });
    }
    if text.starts_with('/') {
        return None;
    }
    Some(Event::Text {
        chat,
        text: text.to_string(),
    })
}

fn callback_event(query: &CallbackQuery) -> Option<Event> {
    let chat = query.message.as_ref()?.chat().id;
    Some(Event::Button {
        chat: ConversationId(chat.0),
        interaction_id: query.id.0.clone(),
        action: Action::parse(query.data.as_deref().unwrap_or_default()),
    })
}

/// Handle any inbound message (commands, text, documents).
pub async fn handle_message(engine: Arc<ConversationEngine>, msg: Message) -> Result<()> {
    let username = msg
        .from
        .as_ref()
        .and_then(|u| u.username.as_deref())
        .unwrap_or("unknown");

    let Some(event) = message_event(&msg) else {
        debug!("[@{username}] Ignoring unsupported message");
        return Ok(());
    };

    if let Event::Text { text, .. } = &event {
        info!("[@{username}] Message: {}", preview(text, 80));
    }

    engine.handle(event).await?;
    Ok(())
}

/// Handle an inline button press.
pub async fn handle_callback(engine: Arc<ConversationEngine>, query: CallbackQuery) -> Result<()> {
    let Some(event) = callback_event(&query) else {
        debug!(
            "[@{}] Ignoring callback without a message",
            query.from.username.as_deref().unwrap_or("unknown")
        );
        return Ok(());
    };

    engine.handle(event).await?;
    Ok(())
}
