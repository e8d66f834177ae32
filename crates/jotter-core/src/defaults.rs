//! Centralized default constants for jotter.
//!
//! **This module is the single source of truth** for field limits, client
//! defaults and the fallback messages shown when the server does not supply
//! one. Other crates reference these constants instead of repeating literals.

// =============================================================================
// NOTE FIELD LIMITS
// =============================================================================

/// Maximum characters in a note title.
pub const TITLE_MAX_LEN: usize = 15;

/// Maximum characters in a note body.
pub const CONTENT_MAX_LEN: usize = 50;

/// Maximum characters in a single tag.
pub const TAG_MAX_LEN: usize = 8;

/// Maximum number of tags a note may carry.
pub const MAX_TAGS_PER_NOTE: usize = 3;

/// Minimum number of tags required to create or edit a note.
pub const MIN_TAGS_PER_NOTE: usize = 1;

// =============================================================================
// CREDENTIAL LIMITS
// =============================================================================

/// Maximum characters in a username submitted at login.
pub const USERNAME_MAX_LEN: usize = 20;

/// Maximum characters in a password submitted at login.
pub const PASSWORD_MAX_LEN: usize = 30;

// =============================================================================
// CLIENT
// =============================================================================

/// Default base URL of the notes API.
pub const API_URL: &str = "http://localhost:3000";

/// Delay between an authorization failure and the login-required signal,
/// leaving time for the failure notice to be shown.
pub const LOGIN_REDIRECT_DELAY_MS: u64 = 100;

/// Capacity of the session event broadcast channel.
pub const SESSION_EVENT_CAPACITY: usize = 16;

// =============================================================================
// USER-FACING FALLBACK MESSAGES
// =============================================================================

/// Shown when a request gets no response and no operation-specific text applies.
pub const MSG_SERVER_UNAVAILABLE: &str = "An error occurred on the server. Please try again later";

/// Shown when the server rejects credentials without a message.
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// Shown when a response body does not match the expected schema.
pub const MSG_UNEXPECTED_RESPONSE: &str = "Unexpected response from the server. Try again later";

pub const MSG_LIST_FAILED: &str = "Error loading notes, try again later";
pub const MSG_CREATE_FAILED: &str = "Error when creating note. Try again later";
pub const MSG_UPDATE_FAILED: &str = "Error when updating note. Try again later";
pub const MSG_ARCHIVE_FAILED: &str = "An error has occurred. Try again later";
pub const MSG_DELETE_FAILED: &str = "Error when deleting note. Try again later";

/// Shown when an operation targets a note the client does not hold.
pub const MSG_NOTE_NOT_FOUND: &str = "Note not found";

// =============================================================================
// USER-FACING SUCCESS MESSAGES
// =============================================================================

pub const MSG_NOTE_CREATED: &str = "Note created successfully.";
pub const MSG_NOTE_UPDATED: &str = "Note updated successfully";
pub const MSG_NOTE_ARCHIVED: &str = "Note has been archived";
pub const MSG_NOTE_UNARCHIVED: &str = "Note has been moved to actives";
pub const MSG_NOTE_DELETED: &str = "Note deleted successfully.";
