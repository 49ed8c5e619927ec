use std::sync::Arc;

use prep_core::model::{Note, NoteDraft, NoteId, NoteKind, SessionUser, StatKey};
use storage::repository::NoteRepository;
use tracing::info;

use crate::Clock;
use crate::error::NoteServiceError;
use crate::stats_service::StatsService;

/// Subjective answer notebook.
#[derive(Clone)]
pub struct NoteService {
    clock: Clock,
    notes: Arc<dyn NoteRepository>,
    stats: StatsService,
}

impl NoteService {
    #[must_use]
    pub fn new(clock: Clock, notes: Arc<dyn NoteRepository>, stats: StatsService) -> Self {
        Self {
            clock,
            notes,
            stats,
        }
    }

    /// Notes newest first, optionally narrowed to one kind.
    ///
    /// # Errors
    ///
    /// Returns `NoteServiceError::Storage` on read failures.
    pub async fn list(
        &self,
        user: &SessionUser,
        kind: Option<NoteKind>,
    ) -> Result<Vec<Note>, NoteServiceError> {
        let notes = self.notes.list_notes(&user.email).await?;
        Ok(notes
            .into_iter()
            .filter(|note| kind.is_none_or(|k| note.kind == k))
            .collect())
    }

    /// # Errors
    ///
    /// Returns `NoteServiceError::NotFound` for an unknown id.
    pub async fn get(&self, user: &SessionUser, id: &NoteId) -> Result<Note, NoteServiceError> {
        self.notes
            .list_notes(&user.email)
            .await?
            .into_iter()
            .find(|note| note.id == *id)
            .ok_or_else(|| NoteServiceError::NotFound(id.clone()))
    }

    /// Save a new note at the top of the list and count it as an answer.
    ///
    /// # Errors
    ///
    /// Returns `NoteServiceError::Note` if title or content is blank, and
    /// storage errors on persistence failures.
    pub async fn create(
        &self,
        user: &SessionUser,
        draft: NoteDraft,
    ) -> Result<Note, NoteServiceError> {
        let note = draft.into_note(self.clock.now())?;
        let mut notes = self.notes.list_notes(&user.email).await?;
        notes.insert(0, note.clone());
        self.notes.save_notes(&user.email, &notes).await?;
        self.stats
            .increment(user, StatKey::SubjectiveAnswers, 1)
            .await?;
        info!(email = %user.email, note_id = %note.id, "note created");
        Ok(note)
    }

    /// Replace title, content and kind of an existing note.
    ///
    /// # Errors
    ///
    /// Returns `NoteServiceError::Note` for blank fields,
    /// `NoteServiceError::NotFound` for an unknown id, and storage errors on
    /// persistence failures.
    pub async fn update(
        &self,
        user: &SessionUser,
        id: &NoteId,
        draft: NoteDraft,
    ) -> Result<Note, NoteServiceError> {
        draft.validate()?;
        let mut notes = self.notes.list_notes(&user.email).await?;
        let note = notes
            .iter_mut()
            .find(|note| note.id == *id)
            .ok_or_else(|| NoteServiceError::NotFound(id.clone()))?;
        note.apply(draft)?;
        let updated = note.clone();
        self.notes.save_notes(&user.email, &notes).await?;
        info!(email = %user.email, note_id = %id, "note updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns `NoteServiceError::NotFound` for an unknown id.
    pub async fn delete(&self, user: &SessionUser, id: &NoteId) -> Result<(), NoteServiceError> {
        let mut notes = self.notes.list_notes(&user.email).await?;
        let before = notes.len();
        notes.retain(|note| note.id != *id);
        if notes.len() == before {
            return Err(NoteServiceError::NotFound(id.clone()));
        }
        self.notes.save_notes(&user.email, &notes).await?;
        info!(email = %user.email, note_id = %id, "note deleted");
        Ok(())
    }
}
