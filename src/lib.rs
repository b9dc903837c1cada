//! # Exam Template Bot
//!
//! A Telegram bot that turns free-form question text into a formatted exam
//! PDF with a letterhead and per-question answer space.
//!
//! ## Architecture
//!
//! The system is split into four strict layers:
//!
//! ### ① Infrastructure
//! - `infrastructure/` - holds the scarce resources, exposes capabilities
//! - `TextShaper` - Arabic reshaping + logical-to-visual reordering
//! - `PdfRenderer` + `FontStore` - block sequence → PDF bytes; the font is
//!   registered once at startup and the outcome propagated explicitly
//!
//! ### ② Services
//! - `services/` - single capabilities, one submission at a time
//! - `Extractor` - directive parsing + question segmentation (pure)
//! - `Composer` - metadata + questions → layout block sequence
//!
//! ### ③ Workflow
//! - `workflow/` - the complete pipeline of one request
//! - `ExamCtx` - requester identity, school override, ministry constant
//! - `ExamFlow` - extract → compose → render → write artifact
//!
//! ### ④ Orchestration
//! - `orchestrator/` + `app` - conversation state and the polling loop
//! - `SessionStore` - explicit per-chat sessions with explicit teardown
//! - `ChatDispatcher` - commands, transitions, delivery, cleanup

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// Re-export the common types
pub use api::TelegramClient;
pub use config::Config;
pub use error::{AppError, AppResult, ExtractError, RenderError};
pub use infrastructure::{FontStore, PdfRenderer, TextShaper};
pub use models::{ExamArtifact, ExamMetadata, LayoutBlock};
pub use orchestrator::{ChatDispatcher, SessionStore};
pub use services::{Composer, Extraction, Extractor};
pub use workflow::{ExamCtx, ExamFlow};
