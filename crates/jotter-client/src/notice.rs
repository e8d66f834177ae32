//! Transient user-facing outcome messages.
//!
//! Every operation ends in exactly one [`Notice`]; errors stop here and are
//! never propagated further up the view.

use std::fmt;

use jotter_core::{defaults, Error, Note, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn from_error(err: &Error) -> Self {
        Self::error(err.user_message())
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    pub fn created(result: &Result<Note>) -> Self {
        match result {
            Ok(_) => Self::success(defaults::MSG_NOTE_CREATED),
            Err(e) => Self::from_error(e),
        }
    }

    pub fn updated(result: &Result<Note>) -> Self {
        match result {
            Ok(_) => Self::success(defaults::MSG_NOTE_UPDATED),
            Err(e) => Self::from_error(e),
        }
    }

    /// Wording follows the flag the server returned, not the one requested.
    pub fn archived(result: &Result<Note>) -> Self {
        match result {
            Ok(note) if note.is_archived => Self::success(defaults::MSG_NOTE_ARCHIVED),
            Ok(_) => Self::success(defaults::MSG_NOTE_UNARCHIVED),
            Err(e) => Self::from_error(e),
        }
    }

    pub fn deleted(result: &Result<()>) -> Self {
        match result {
            Ok(()) => Self::success(defaults::MSG_NOTE_DELETED),
            Err(e) => Self::from_error(e),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Success => write!(f, "✓ {}", self.message),
            NoticeLevel::Error => write!(f, "✗ {}", self.message),
        }
    }
}
