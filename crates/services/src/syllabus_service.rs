use std::sync::Arc;

use prep_core::model::{SessionUser, StatsPatch};
use prep_core::syllabus::{
    CompletedTopics, SYLLABUS_DOCUMENTS, Syllabus, SyllabusDocument, SyllabusProgress,
    default_syllabus,
};
use storage::repository::SyllabusRepository;
use tracing::info;

use crate::error::SyllabusServiceError;
use crate::stats_service::StatsService;

/// Checklist state for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllabusOverview {
    pub completed: CompletedTopics,
    pub progress: SyllabusProgress,
}

/// Syllabus checklist; every toggle pushes the overall percent to stats.
#[derive(Clone)]
pub struct SyllabusService {
    syllabus: Arc<Syllabus>,
    completed: Arc<dyn SyllabusRepository>,
    stats: StatsService,
}

impl SyllabusService {
    #[must_use]
    pub fn new(completed: Arc<dyn SyllabusRepository>, stats: StatsService) -> Self {
        Self::with_syllabus(default_syllabus(), completed, stats)
    }

    #[must_use]
    pub fn with_syllabus(
        syllabus: Syllabus,
        completed: Arc<dyn SyllabusRepository>,
        stats: StatsService,
    ) -> Self {
        Self {
            syllabus: Arc::new(syllabus),
            completed,
            stats,
        }
    }

    #[must_use]
    pub fn syllabus(&self) -> &Syllabus {
        &self.syllabus
    }

    #[must_use]
    pub fn documents(&self) -> &'static [SyllabusDocument] {
        &SYLLABUS_DOCUMENTS
    }

    /// # Errors
    ///
    /// Returns `SyllabusServiceError::Storage` on read failures.
    pub async fn overview(
        &self,
        user: &SessionUser,
    ) -> Result<SyllabusOverview, SyllabusServiceError> {
        let completed = self.completed.get_completed(&user.email).await?;
        let progress = self.syllabus.progress(&completed);
        Ok(SyllabusOverview {
            completed,
            progress,
        })
    }

    /// Flip one unit and sync the dashboard's syllabus percent.
    ///
    /// # Errors
    ///
    /// Returns `SyllabusServiceError::Syllabus` for an id that is not a
    /// completion unit, and storage or stats errors on persistence failures.
    pub async fn toggle(
        &self,
        user: &SessionUser,
        unit_id: &str,
    ) -> Result<SyllabusOverview, SyllabusServiceError> {
        let mut completed = self.completed.get_completed(&user.email).await?;
        let done = completed.toggle(&self.syllabus, unit_id)?;
        self.completed.save_completed(&user.email, &completed).await?;

        let progress = self.syllabus.progress(&completed);
        self.stats
            .update(user, StatsPatch::syllabus_progress(progress.percent))
            .await?;
        info!(
            email = %user.email,
            unit_id,
            done,
            percent = progress.percent,
            "syllabus unit toggled"
        );
        Ok(SyllabusOverview {
            completed,
            progress,
        })
    }
}
