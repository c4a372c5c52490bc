//! Outbound delivery: markup stripping, chunking, paced sequential sends.

use resumate_core::chunker::DEFAULT_MAX_CHUNK_LEN;
use resumate_core::util::preview;
use resumate_core::{ChatTransport, ConversationId, SendOptions, split_message};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Sent in place of an empty reply.
pub const NO_RESPONSE_NOTICE: &str = "⚠️ No response generated";

/// Markdown control characters removed before sending.
const MARKUP_CHARS: [char; 5] = ['*', '_', '`', '~', '#'];

const DEFAULT_CHUNK_DELAY: Duration = Duration::from_millis(500);

/// Remove Markdown styling characters so independently cut chunks can never
/// carry unbalanced markup.
#[must_use]
pub fn strip_markup(text: &str) -> String {
    text.replace(MARKUP_CHARS, "")
}

/// Outcome of one [`Deliverer::deliver`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub attempted: usize,
    pub delivered: usize,
}

impl DeliveryReport {
    #[must_use]
    pub const fn failed(&self) -> usize {
        self.attempted - self.delivered
    }
}

/// Sends replies chunk by chunk, in order, one at a time.
#[derive(Clone)]
pub struct Deliverer {
    transport: Arc<dyn ChatTransport>,
    max_chunk_len: usize,
    chunk_delay: Duration,
}

impl Deliverer {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            max_chunk_len: DEFAULT_MAX_CHUNK_LEN,
            chunk_delay: DEFAULT_CHUNK_DELAY,
        }
    }

    #[must_use]
    pub fn with_max_chunk_len(mut self, max_chunk_len: usize) -> Self {
        self.max_chunk_len = max_chunk_len.max(1);
        self
    }

    #[must_use]
    pub const fn with_chunk_delay(mut self, chunk_delay: Duration) -> Self {
        self.chunk_delay = chunk_delay;
        self
    }

    /// Deliver `text` as plain text.
    ///
    /// The first chunk goes out immediately; each later chunk waits for the
    /// previous send to resolve and then for the chunk delay. A failed chunk is
    /// logged and skipped. The keyboard in `options`, if any, is attached to
    /// the last chunk only.
    pub async fn deliver(
        &self,
        to: ConversationId,
        text: &str,
        options: &SendOptions,
    ) -> DeliveryReport {
        let plain = strip_markup(text);
        let plain = if plain.trim().is_empty() {
            NO_RESPONSE_NOTICE.to_string()
        } else {
            plain
        };

        let chunks = split_message(&plain, self.max_chunk_len);
        let total = chunks.clone().count();
        let plain_options = SendOptions::default();
        let mut report = DeliveryReport::default();

        for (index, chunk) in chunks.enumerate() {
            if index > 0 {
                sleep(self.chunk_delay).await;
            }

            let chunk_options = if index + 1 == total {
                options
            } else {
                &plain_options
            };

            report.attempted += 1;
            match self.transport.send_text(to, chunk, chunk_options).await {
                Ok(()) => {
                    report.delivered += 1;
                    debug!(
                        "[{to}] Sent chunk {}/{total}: {}",
                        index + 1,
                        preview(chunk, 60)
                    );
                }
                Err(e) => warn!("[{to}] Error sending chunk {}/{total}: {e}", index + 1),
            }
        }

        report
    }
}
