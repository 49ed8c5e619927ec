use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::auth_service::AuthService;
use crate::error::AppServicesError;
use crate::note_service::NoteService;
use crate::quiz_service::QuizService;
use crate::resource_service::ResourceService;
use crate::routine_service::RoutineService;
use crate::stats_service::StatsService;
use crate::syllabus_service::SyllabusService;
use crate::typing_service::TypingService;

/// Assembles app-facing services and restores the persisted session.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<AuthService>,
    stats: Arc<StatsService>,
    quiz: Arc<QuizService>,
    notes: Arc<NoteService>,
    resources: Arc<ResourceService>,
    routine: Arc<RoutineService>,
    syllabus: Arc<SyllabusService>,
    typing: Arc<TypingService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or session restore fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(&storage, clock).await
    }

    /// Build services over an existing storage aggregate.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Auth` if the saved session cannot be read.
    pub async fn from_storage(storage: &Storage, clock: Clock) -> Result<Self, AppServicesError> {
        let auth = AuthService::new(Arc::clone(&storage.accounts), Arc::clone(&storage.session));
        auth.restore().await?;

        let stats = StatsService::new(Arc::clone(&storage.stats));
        let quiz = QuizService::new(stats.clone());
        let notes = NoteService::new(clock, Arc::clone(&storage.notes), stats.clone());
        let resources = ResourceService::new(Arc::clone(&storage.resources));
        let routine = RoutineService::new(Arc::clone(&storage.routines));
        let syllabus = SyllabusService::new(Arc::clone(&storage.syllabus), stats.clone());
        let typing = TypingService::new(clock, Arc::clone(&storage.leaderboard), stats.clone());

        Ok(Self {
            auth: Arc::new(auth),
            stats: Arc::new(stats),
            quiz: Arc::new(quiz),
            notes: Arc::new(notes),
            resources: Arc::new(resources),
            routine: Arc::new(routine),
            syllabus: Arc::new(syllabus),
            typing: Arc::new(typing),
        })
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn notes(&self) -> Arc<NoteService> {
        Arc::clone(&self.notes)
    }

    #[must_use]
    pub fn resources(&self) -> Arc<ResourceService> {
        Arc::clone(&self.resources)
    }

    #[must_use]
    pub fn routine(&self) -> Arc<RoutineService> {
        Arc::clone(&self.routine)
    }

    #[must_use]
    pub fn syllabus(&self) -> Arc<SyllabusService> {
        Arc::clone(&self.syllabus)
    }

    #[must_use]
    pub fn typing(&self) -> Arc<TypingService> {
        Arc::clone(&self.typing)
    }
}
