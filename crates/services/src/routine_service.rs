use std::sync::Arc;

use prep_core::model::{Period, Routine, RoutineItem, RoutineItemId, SessionUser};
use storage::repository::RoutineRepository;
use tracing::debug;

use crate::error::RoutineServiceError;

/// Daily morning and evening study plan.
#[derive(Clone)]
pub struct RoutineService {
    routines: Arc<dyn RoutineRepository>,
}

impl RoutineService {
    #[must_use]
    pub fn new(routines: Arc<dyn RoutineRepository>) -> Self {
        Self { routines }
    }

    /// Saved routine, or the default plan.
    ///
    /// # Errors
    ///
    /// Returns `RoutineServiceError::Storage` on read failures.
    pub async fn load(&self, user: &SessionUser) -> Result<Routine, RoutineServiceError> {
        Ok(self
            .routines
            .get_routine(&user.email)
            .await?
            .unwrap_or_default())
    }

    async fn save(&self, user: &SessionUser, routine: &Routine) -> Result<(), RoutineServiceError> {
        self.routines.save_routine(&user.email, routine).await?;
        Ok(())
    }

    /// Append a placeholder entry to `period`.
    ///
    /// # Errors
    ///
    /// Returns `RoutineServiceError::Storage` on persistence failures.
    pub async fn add(
        &self,
        user: &SessionUser,
        period: Period,
    ) -> Result<RoutineItem, RoutineServiceError> {
        let mut routine = self.load(user).await?;
        let item = routine.add(period);
        self.save(user, &routine).await?;
        debug!(email = %user.email, period = period.as_str(), item_id = %item.id, "routine item added");
        Ok(item)
    }

    /// # Errors
    ///
    /// Returns `RoutineServiceError::Routine` if `id` is not in `period`.
    pub async fn update(
        &self,
        user: &SessionUser,
        period: Period,
        id: &RoutineItemId,
        time: &str,
        activity: &str,
    ) -> Result<Routine, RoutineServiceError> {
        let mut routine = self.load(user).await?;
        routine.update(period, id, time, activity)?;
        self.save(user, &routine).await?;
        Ok(routine)
    }

    /// # Errors
    ///
    /// Returns `RoutineServiceError::Routine` if `id` is not in `period`.
    pub async fn delete(
        &self,
        user: &SessionUser,
        period: Period,
        id: &RoutineItemId,
    ) -> Result<Routine, RoutineServiceError> {
        let mut routine = self.load(user).await?;
        routine.remove(period, id)?;
        self.save(user, &routine).await?;
        Ok(routine)
    }
}
