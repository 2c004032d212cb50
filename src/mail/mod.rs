pub mod types;

pub use types::{ActionItem, ActionItems, Draft, EmailRecord, ProcessedResult, SavedDraft};
