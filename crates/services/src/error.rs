//! Shared error types for the services crate.

use thiserror::Error;

use prep_core::model::{AccountError, NoteError, NoteId, ResourceError, ResourceId, RoutineError};
use prep_core::quiz::QuizError;
use prep_core::syllabus::SyllabusError;
use prep_core::typing::TypingError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("not signed in")]
    NotSignedIn,
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Conflict => AuthError::EmailTaken,
            other => AuthError::Storage(other),
        }
    }
}

/// Errors emitted by `StatsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Stats(#[from] StatsServiceError),
}

/// Errors emitted by `NoteService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NoteServiceError {
    #[error(transparent)]
    Note(#[from] NoteError),
    #[error("note not found: {0}")]
    NotFound(NoteId),
    #[error(transparent)]
    Stats(#[from] StatsServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ResourceService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResourceServiceError {
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error("resource not found: {0}")]
    NotFound(ResourceId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `RoutineService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RoutineServiceError {
    #[error(transparent)]
    Routine(#[from] RoutineError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SyllabusService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyllabusServiceError {
    #[error(transparent)]
    Syllabus(#[from] SyllabusError),
    #[error(transparent)]
    Stats(#[from] StatsServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `TypingService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TypingServiceError {
    #[error(transparent)]
    Typing(#[from] TypingError),
    #[error(transparent)]
    Stats(#[from] StatsServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}
