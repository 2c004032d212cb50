//! Application-wide constants for tuning and configuration
//!
//! Centralizes magic numbers to make them discoverable and configurable.

/// Error message display duration in seconds before auto-dismiss.
pub const ERROR_TTL_SECS: u64 = 5;

/// Capacity of the command channel into the AI actor.
/// Only one command is ever pending, so this is headroom for Shutdown.
pub const AI_COMMAND_CHANNEL_SIZE: usize = 4;

/// Capacity of the event channel out of the AI actor.
pub const AI_EVENT_CHANNEL_SIZE: usize = 8;

/// How long the event loop waits for terminal input before
/// checking AI events and timers again.
pub const INPUT_POLL_MS: u64 = 50;

/// Minimum terminal width to show split view (list + detail).
/// Below this width, only the list is shown.
pub const MIN_SPLIT_VIEW_WIDTH: u16 = 80;

// === UI Constants ===

/// Minimum split ratio percentage for split views.
pub const SPLIT_RATIO_MIN: u16 = 30;

/// Maximum split ratio percentage for split views.
pub const SPLIT_RATIO_MAX: u16 = 70;

/// Spinner animation frame duration in milliseconds.
pub const SPINNER_FRAME_MS: u128 = 80;

/// Lines of a saved draft body shown in the drafts list.
pub const DRAFT_PREVIEW_LINES: usize = 3;

/// Status bar height in lines (includes padding).
pub const STATUS_BAR_HEIGHT: u16 = 2;

/// Help bar height in lines (includes padding).
pub const HELP_BAR_HEIGHT: u16 = 2;

/// Horizontal content padding in characters.
pub const CONTENT_PADDING_H: u16 = 2;
