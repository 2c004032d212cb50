//! AI features: JSON recovery, prompt composition and the completion client
//!
//! Every action composes one system instruction and one user message per
//! request against an OpenAI-compatible chat completion API:
//! - Email processing (categorization and action items)
//! - Questions about one email or the whole processed inbox
//! - Reply drafting from the user's auto-reply rule

mod actor;
pub(crate) mod client;
pub mod prompts;
mod recover;
pub mod tasks;

pub use actor::{AiAction, AiActorHandle, AiCommand, AiEvent, AnswerScope, spawn_ai_actor};
pub use client::{CompletionError, OpenAiClient};
pub use recover::{RecoveredValue, recover};
