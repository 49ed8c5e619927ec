use thiserror::Error;

use crate::model::{AccountError, NoteError, ResourceError, RoutineError};
use crate::quiz::QuizError;
use crate::syllabus::SyllabusError;
use crate::typing::TypingError;

/// Union of the domain validation errors, for callers that do not care
/// which model rejected the input.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Note(#[from] NoteError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Routine(#[from] RoutineError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Syllabus(#[from] SyllabusError),
    #[error(transparent)]
    Typing(#[from] TypingError),
}
