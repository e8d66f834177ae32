//! Client-side rules checked before any network call.
//!
//! Lengths are counted in Unicode scalar values, not bytes.

use crate::defaults::{
    CONTENT_MAX_LEN, MAX_TAGS_PER_NOTE, MIN_TAGS_PER_NOTE, PASSWORD_MAX_LEN, TAG_MAX_LEN,
    TITLE_MAX_LEN, USERNAME_MAX_LEN,
};
use crate::error::ValidationError;
use crate::models::{Credentials, Note, NoteDraft, NotePatch};

/// Check a required text field against its maximum length.
pub fn validate_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    validate_text("Title", title, TITLE_MAX_LEN)
}

pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    validate_text("Content", content, CONTENT_MAX_LEN)
}

/// Check a complete tag list: every tag valid, no duplicates, 1..=3 tags.
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() < MIN_TAGS_PER_NOTE {
        return Err(ValidationError::MissingTags {
            min: MIN_TAGS_PER_NOTE,
        });
    }
    let mut set = TagSet::new();
    for tag in tags {
        set.add(tag)?;
    }
    Ok(())
}

impl Credentials {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_text("Username", &self.username, USERNAME_MAX_LEN)?;
        validate_text("Password", &self.password, PASSWORD_MAX_LEN)
    }
}

impl NoteDraft {
    pub fn validate(&self) -> Result<(), ValidationError> {
        // Tag count first: a tagless submission is rejected regardless of fields.
        validate_tags(&self.tags)?;
        validate_title(&self.title)?;
        validate_content(&self.content)
    }
}

impl NotePatch {
    /// Archive-only patches always pass. A field edit must carry a valid,
    /// non-empty tag list along with any title or content it changes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.edits_fields() {
            return Ok(());
        }
        match &self.tags {
            Some(tags) => validate_tags(tags)?,
            None => {
                return Err(ValidationError::MissingTags {
                    min: MIN_TAGS_PER_NOTE,
                })
            }
        }
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(content) = &self.content {
            validate_content(content)?;
        }
        Ok(())
    }
}

/// Editable tag list behind the create and edit flows.
///
/// Additions are checked against the tag policy and a rejected addition
/// leaves the set untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the set with a note's current tags for editing.
    pub fn from_note(note: &Note) -> Self {
        Self {
            tags: note.tags.clone(),
        }
    }

    /// Add a tag, reporting the first rule it breaks.
    ///
    /// Rules in order: non-empty, at most 8 characters, not already present,
    /// fewer than 3 tags held.
    pub fn add(&mut self, tag: &str) -> Result<(), ValidationError> {
        if tag.is_empty() {
            return Err(ValidationError::EmptyTag);
        }
        if tag.chars().count() > TAG_MAX_LEN {
            return Err(ValidationError::TagTooLong { max: TAG_MAX_LEN });
        }
        if self.contains(tag) {
            return Err(ValidationError::DuplicateTag(tag.to_string()));
        }
        if self.tags.len() >= MAX_TAGS_PER_NOTE {
            return Err(ValidationError::TooManyTags {
                max: MAX_TAGS_PER_NOTE,
            });
        }
        self.tags.push(tag.to_string());
        Ok(())
    }

    /// Remove a tag; returns whether it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn into_vec(self) -> Vec<String> {
        self.tags
    }
}

impl TryFrom<Vec<String>> for TagSet {
    type Error = ValidationError;

    fn try_from(tags: Vec<String>) -> Result<Self, Self::Error> {
        let mut set = TagSet::new();
        for tag in &tags {
            set.add(tag)?;
        }
        Ok(set)
    }
}
