#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Conversation flows of the résumé assistant.
//!
//! Incoming platform events are turned into typed [`Event`]s and fed to the
//! [`ConversationEngine`], which drives the per-chat state machine:
//!
//! - résumé upload → action menu → ATS score, questions, analysis
//! - role optimization: upload → `action_optimize_role` → job title reply
//! - mock interview: questions asked one by one with feedback per answer
//!
//! Replies leave through the [`Deliverer`], which chunks and paces them.

mod delivery;
mod engine;
mod event;
mod ingest;
mod interview;
pub mod menu;
pub mod prompts;

pub use delivery::{Deliverer, DeliveryReport, NO_RESPONSE_NOTICE, strip_markup};
pub use engine::{ConversationEngine, ConversationError};
pub use event::{Action, Command, Event, FileRef};
pub use ingest::{
    DocumentIngestor, DocumentSource, ExtractionError, IngestError, IngestedDocument,
    PdfTextExtractor, TextExtractor,
};
pub use interview::{format_question, parse_questions};
