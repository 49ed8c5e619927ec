//! Transient user-facing messages.

use std::fmt;

use prep_core::model::{AccountError, NoteError, ResourceError};
use prep_core::typing::{CompletionReason, TypingResult};

use crate::error::{AuthError, NoteServiceError, ResourceServiceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub tone: Tone,
}

impl Notice {
    fn new(title: &str, description: impl Into<String>, tone: Tone) -> Self {
        Self {
            title: title.to_owned(),
            description: description.into(),
            tone,
        }
    }

    #[must_use]
    pub fn success(title: &str, description: impl Into<String>) -> Self {
        Self::new(title, description, Tone::Success)
    }

    #[must_use]
    pub fn info(title: &str, description: impl Into<String>) -> Self {
        Self::new(title, description, Tone::Info)
    }

    #[must_use]
    pub fn error(title: &str, description: impl Into<String>) -> Self {
        Self::new(title, description, Tone::Destructive)
    }

    #[must_use]
    pub fn welcome_back() -> Self {
        Self::success("Welcome back!", "You have successfully logged in.")
    }

    #[must_use]
    pub fn account_created() -> Self {
        Self::success("Account created!", "Welcome to Loksewa CO.")
    }

    #[must_use]
    pub fn quiz_completed(score: usize, total: usize) -> Self {
        Self::success(
            "Quiz Completed!",
            format!("You scored {score} out of {total}"),
        )
    }

    #[must_use]
    pub fn typing_completed(result: &TypingResult) -> Self {
        let title = match result.reason {
            CompletionReason::Matched => "Great job!",
            CompletionReason::TimeUp => "Time's up!",
        };
        Self::success(
            title,
            format!(
                "You typed {} characters at {} WPM with {}% accuracy.",
                result.chars_typed, result.wpm, result.accuracy
            ),
        )
    }

    #[must_use]
    pub fn note_created() -> Self {
        Self::success("Created!", "Your note has been saved.")
    }

    #[must_use]
    pub fn note_saved() -> Self {
        Self::success("Saved!", "Your note has been updated.")
    }

    #[must_use]
    pub fn note_deleted() -> Self {
        Self::info("Deleted", "Note has been removed.")
    }

    #[must_use]
    pub fn resource_added() -> Self {
        Self::success("Added!", "Resource has been saved.")
    }

    #[must_use]
    pub fn resource_deleted() -> Self {
        Self::info("Deleted", "Resource has been removed.")
    }

    #[must_use]
    pub fn routine_saved() -> Self {
        Self::success("Saved!", "Your routine has been updated.")
    }

    #[must_use]
    pub fn for_note_error(err: &NoteServiceError) -> Self {
        match err {
            NoteServiceError::Note(NoteError::MissingFields) => {
                Self::error("Error", "Please fill in both title and content.")
            }
            other => Self::error("Error", other.to_string()),
        }
    }

    #[must_use]
    pub fn for_resource_error(err: &ResourceServiceError) -> Self {
        match err {
            ResourceServiceError::Resource(ResourceError::EmptyTitle | ResourceError::EmptyUrl) => {
                Self::error("Error", "Please fill in all fields.")
            }
            other => Self::error("Error", other.to_string()),
        }
    }

    /// Login page wording for a failed register or login.
    #[must_use]
    pub fn for_auth_error(err: &AuthError) -> Self {
        match err {
            AuthError::Account(AccountError::EmptyName) => {
                Self::error("Name required", "Please enter your name.")
            }
            AuthError::Account(other) => Self::error("Registration failed", other.to_string()),
            AuthError::EmailTaken => {
                Self::error("Registration failed", "This email is already registered.")
            }
            AuthError::InvalidCredentials => {
                Self::error("Login failed", "Invalid email or password.")
            }
            AuthError::NotSignedIn => Self::error("Sign in required", "Please log in first."),
            other => Self::error("Something went wrong", other.to_string()),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.description)
    }
}

impl std::error::Error for Notice {}
