use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::NoteId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NoteError {
    #[error("note title and content are both required")]
    MissingFields,
}

/// Paper II answer length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Short,
    Long,
}

impl NoteKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NoteKind::Short => "short",
            NoteKind::Long => "long",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "short" => Some(Self::Short),
            "long" => Some(Self::Long),
            _ => None,
        }
    }
}

/// A saved subjective answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: NoteKind,
    pub created_at: DateTime<Utc>,
}

/// Unvalidated editor contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub kind: NoteKind,
}

impl NoteDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>, kind: NoteKind) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            kind,
        }
    }

    /// # Errors
    ///
    /// Returns `NoteError::MissingFields` if title or content is blank.
    pub fn validate(&self) -> Result<(), NoteError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(NoteError::MissingFields);
        }
        Ok(())
    }

    /// Builds a new note with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::MissingFields` if title or content is blank.
    pub fn into_note(self, created_at: DateTime<Utc>) -> Result<Note, NoteError> {
        self.validate()?;
        Ok(Note {
            id: NoteId::generate(),
            title: self.title,
            content: self.content,
            kind: self.kind,
            created_at,
        })
    }
}

impl Note {
    /// Replaces the editable fields, keeping id and creation time.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::MissingFields` if title or content is blank.
    pub fn apply(&mut self, draft: NoteDraft) -> Result<(), NoteError> {
        draft.validate()?;
        self.title = draft.title;
        self.content = draft.content;
        self.kind = draft.kind;
        Ok(())
    }
}

/// A suggested question to answer as a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PracticePrompt {
    pub kind: NoteKind,
    pub question: &'static str,
}

pub const PRACTICE_PROMPTS: [PracticePrompt; 4] = [
    PracticePrompt {
        kind: NoteKind::Short,
        question: "What is an Operating System? List its types.",
    },
    PracticePrompt {
        kind: NoteKind::Short,
        question: "Define Computer Network. What are its advantages?",
    },
    PracticePrompt {
        kind: NoteKind::Long,
        question: "Explain the components of a computer system with diagram.",
    },
    PracticePrompt {
        kind: NoteKind::Long,
        question: "What is Database Management System? Explain its features and advantages.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn draft_requires_title_and_content() {
        let draft = NoteDraft::new("OS", "  ", NoteKind::Short);
        assert_eq!(draft.validate(), Err(NoteError::MissingFields));
    }

    #[test]
    fn apply_keeps_identity() {
        let mut note = NoteDraft::new("OS", "Kernel", NoteKind::Short)
            .into_note(fixed_now())
            .unwrap();
        let id = note.id.clone();
        note.apply(NoteDraft::new("OS types", "Batch, RTOS", NoteKind::Long))
            .unwrap();
        assert_eq!(note.id, id);
        assert_eq!(note.kind, NoteKind::Long);
        assert_eq!(note.created_at, fixed_now());
    }

    #[test]
    fn kind_is_stored_under_type() {
        let note = NoteDraft::new("t", "c", NoteKind::Long)
            .into_note(fixed_now())
            .unwrap();
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["type"], "long");
        assert!(value.get("createdAt").is_some());
    }
}
