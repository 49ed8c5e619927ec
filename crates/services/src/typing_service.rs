use std::sync::Arc;

use prep_core::model::{LeaderboardEntry, SessionUser, StatKey, push_newest};
use prep_core::typing::{
    InputOutcome, TickOutcome, TypingError, TypingResult, TypingSettings, TypingState,
    TypingTrainer, sample_texts,
};
use rand::seq::IndexedRandom;
use storage::repository::LeaderboardRepository;
use tracing::info;

use crate::Clock;
use crate::error::TypingServiceError;
use crate::stats_service::StatsService;

/// Drives typing attempts and records finished ones.
///
/// Every completion reaches [`TypingService::record`] exactly once: the
/// trainer only reports a result on the transition into `Complete`.
#[derive(Clone)]
pub struct TypingService {
    clock: Clock,
    leaderboard: Arc<dyn LeaderboardRepository>,
    stats: StatsService,
}

impl TypingService {
    #[must_use]
    pub fn new(
        clock: Clock,
        leaderboard: Arc<dyn LeaderboardRepository>,
        stats: StatsService,
    ) -> Self {
        Self {
            clock,
            leaderboard,
            stats,
        }
    }

    /// Random sample text for the settings' language and difficulty.
    ///
    /// # Errors
    ///
    /// Returns `TypingError::EmptyText` if the pool is empty.
    pub fn pick_text(&self, settings: TypingSettings) -> Result<&'static str, TypingError> {
        sample_texts(settings.language, settings.difficulty)
            .choose(&mut rand::rng())
            .copied()
            .ok_or(TypingError::EmptyText)
    }

    /// Idle trainer loaded with a random text.
    ///
    /// # Errors
    ///
    /// Returns `TypingServiceError::Typing` for an unsupported duration.
    pub fn new_trainer(&self, settings: TypingSettings) -> Result<TypingTrainer, TypingServiceError> {
        let text = self.pick_text(settings)?;
        Ok(TypingTrainer::new(settings, text)?)
    }

    /// Start a fresh attempt on a newly picked text.
    ///
    /// # Errors
    ///
    /// Returns `TypingServiceError::Typing` unless the trainer is idle or
    /// complete.
    pub fn start(&self, trainer: &mut TypingTrainer) -> Result<(), TypingServiceError> {
        let text = self.pick_text(trainer.settings())?;
        trainer.start(text, self.clock.now())?;
        Ok(())
    }

    /// Abandon the attempt and load a new text.
    ///
    /// # Errors
    ///
    /// Returns `TypingServiceError::Typing` if no text is available.
    pub fn reset(&self, trainer: &mut TypingTrainer) -> Result<(), TypingServiceError> {
        let text = self.pick_text(trainer.settings())?;
        trainer.reset(text)?;
        Ok(())
    }

    /// Abandon the attempt and start a new one on a newly picked text.
    ///
    /// # Errors
    ///
    /// Returns `TypingServiceError::Typing` if no text is available.
    pub fn restart(&self, trainer: &mut TypingTrainer) -> Result<(), TypingServiceError> {
        let text = self.pick_text(trainer.settings())?;
        trainer.restart(text, self.clock.now())?;
        Ok(())
    }

    /// Feed the whole input buffer, recording the attempt if it completes.
    ///
    /// # Errors
    ///
    /// Returns `TypingServiceError::Typing` while paused, and storage or
    /// stats errors if recording fails.
    pub async fn input(
        &self,
        user: &SessionUser,
        trainer: &mut TypingTrainer,
        value: &str,
    ) -> Result<InputOutcome, TypingServiceError> {
        let outcome = trainer.input(value, self.clock.now())?;
        if let InputOutcome::Completed(result) = &outcome {
            self.record(user, result).await?;
        }
        Ok(outcome)
    }

    /// Let `secs` seconds of running time pass.
    ///
    /// # Errors
    ///
    /// Returns storage or stats errors if a countdown expiry cannot be
    /// recorded.
    pub async fn advance(
        &self,
        user: &SessionUser,
        trainer: &mut TypingTrainer,
        secs: u64,
    ) -> Result<TickOutcome, TypingServiceError> {
        if secs == 0 {
            return Ok(TickOutcome::Stopped);
        }
        match trainer.advance(secs) {
            Some(result) => {
                self.record(user, &result).await?;
                Ok(TickOutcome::Completed(result))
            }
            None => Ok(if trainer.state() == TypingState::Running {
                TickOutcome::Ticked
            } else {
                TickOutcome::Stopped
            }),
        }
    }

    /// Push the attempt onto the leaderboard and credit practice minutes.
    ///
    /// # Errors
    ///
    /// Returns storage or stats errors on persistence failures.
    pub async fn record(
        &self,
        user: &SessionUser,
        result: &TypingResult,
    ) -> Result<(), TypingServiceError> {
        let mut entries = self.leaderboard.list_leaderboard().await?;
        push_newest(
            &mut entries,
            LeaderboardEntry::from_result(result, self.clock.now()),
        );
        self.leaderboard.save_leaderboard(&entries).await?;

        let minutes = result.minutes_spent();
        if minutes > 0 {
            self.stats
                .increment(user, StatKey::TypingMinutes, minutes)
                .await?;
        }
        info!(
            email = %user.email,
            wpm = result.wpm,
            accuracy = result.accuracy,
            minutes,
            "typing attempt recorded"
        );
        Ok(())
    }

    /// Newest first, at most ten entries.
    ///
    /// # Errors
    ///
    /// Returns `TypingServiceError::Storage` on read failures.
    pub async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, TypingServiceError> {
        Ok(self.leaderboard.list_leaderboard().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::model::LEADERBOARD_CAPACITY;
    use prep_core::time::fixed_now;
    use prep_core::typing::{CompletionReason, Difficulty, Language, TypingMode};
    use storage::repository::Storage;

    fn user() -> SessionUser {
        SessionUser {
            email: "anil@example.com".into(),
            name: "Anil".into(),
        }
    }

    fn setup() -> (TypingService, StatsService) {
        let storage = Storage::in_memory();
        let stats = StatsService::new(Arc::clone(&storage.stats));
        let service = TypingService::new(Clock::fixed(fixed_now()), storage.leaderboard, stats.clone());
        (service, stats)
    }

    fn settings(mode: TypingMode) -> TypingSettings {
        TypingSettings {
            language: Language::English,
            difficulty: Difficulty::Medium,
            mode,
        }
    }

    #[test]
    fn picks_text_from_matching_pool() {
        let (service, _) = setup();
        let nepali = TypingSettings {
            language: Language::Nepali,
            difficulty: Difficulty::Easy,
            mode: TypingMode::Text,
        };
        let text = service.pick_text(nepali).unwrap();
        assert!(sample_texts(Language::Nepali, Difficulty::Easy).contains(&text));
    }

    #[tokio::test]
    async fn matching_text_records_once() {
        let (service, stats) = setup();
        let mut trainer = service.new_trainer(settings(TypingMode::Text)).unwrap();
        service.start(&mut trainer).unwrap();
        service.advance(&user(), &mut trainer, 65).await.unwrap();

        let target = trainer.target().to_owned();
        let outcome = service.input(&user(), &mut trainer, &target).await.unwrap();
        let result = match outcome {
            InputOutcome::Completed(result) => result,
            other => panic!("expected completion, got {other:?}"),
        };
        assert_eq!(result.reason, CompletionReason::Matched);
        assert_eq!(result.accuracy, 100);

        let again = service.input(&user(), &mut trainer, &target).await.unwrap();
        assert_eq!(again, InputOutcome::Ignored);

        let board = service.leaderboard().await.unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].date, fixed_now());
        assert_eq!(stats.load(&user()).await.unwrap().typing_minutes, 2);
    }

    #[tokio::test]
    async fn one_second_ticks_expire_on_the_last_second() {
        let (service, stats) = setup();
        let mut trainer = service
            .new_trainer(settings(TypingMode::timed(60).unwrap()))
            .unwrap();
        service.start(&mut trainer).unwrap();
        for _ in 0..59 {
            let outcome = service.advance(&user(), &mut trainer, 1).await.unwrap();
            assert_eq!(outcome, TickOutcome::Ticked);
        }
        assert_eq!(trainer.remaining_secs(), Some(1));

        let outcome = service.advance(&user(), &mut trainer, 1).await.unwrap();
        assert!(matches!(
            outcome,
            TickOutcome::Completed(TypingResult {
                reason: CompletionReason::TimeUp,
                elapsed_secs: 60,
                ..
            })
        ));
        assert_eq!(service.leaderboard().await.unwrap().len(), 1);
        assert_eq!(stats.load(&user()).await.unwrap().typing_minutes, 1);
    }

    #[tokio::test]
    async fn restart_mid_attempt_runs_on_the_new_text() {
        let (service, _) = setup();
        let mut trainer = service.new_trainer(settings(TypingMode::Text)).unwrap();
        service.start(&mut trainer).unwrap();
        service.input(&user(), &mut trainer, "Comp").await.unwrap();
        service.advance(&user(), &mut trainer, 5).await.unwrap();

        service.restart(&mut trainer).unwrap();
        assert_eq!(trainer.state(), TypingState::Running);
        assert_eq!(trainer.buffer(), "");
        assert_eq!(trainer.elapsed_secs(), 0);

        let target = trainer.target().to_owned();
        assert!(sample_texts(Language::English, Difficulty::Medium).contains(&target.as_str()));
        let outcome = service.input(&user(), &mut trainer, &target).await.unwrap();
        assert!(matches!(outcome, InputOutcome::Completed(_)));
    }

    #[tokio::test]
    async fn countdown_expiry_is_recorded() {
        let (service, stats) = setup();
        let mut trainer = service
            .new_trainer(settings(TypingMode::timed(60).unwrap()))
            .unwrap();
        service.start(&mut trainer).unwrap();
        service.input(&user(), &mut trainer, "Comp").await.unwrap();

        let outcome = service.advance(&user(), &mut trainer, 90).await.unwrap();
        assert!(matches!(
            outcome,
            TickOutcome::Completed(TypingResult {
                reason: CompletionReason::TimeUp,
                elapsed_secs: 60,
                ..
            })
        ));
        assert_eq!(trainer.state(), TypingState::Complete);
        assert_eq!(stats.load(&user()).await.unwrap().typing_minutes, 1);
        assert_eq!(service.leaderboard().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn leaderboard_keeps_newest_ten() {
        let (service, _) = setup();
        for _ in 0..(LEADERBOARD_CAPACITY + 3) {
            let mut trainer = service.new_trainer(settings(TypingMode::Text)).unwrap();
            service.start(&mut trainer).unwrap();
            let target = trainer.target().to_owned();
            service.input(&user(), &mut trainer, &target).await.unwrap();
        }
        assert_eq!(service.leaderboard().await.unwrap().len(), LEADERBOARD_CAPACITY);
    }

    #[tokio::test]
    async fn paused_attempt_rejects_input() {
        let (service, _) = setup();
        let mut trainer = service.new_trainer(settings(TypingMode::Text)).unwrap();
        service.start(&mut trainer).unwrap();
        assert!(trainer.pause());
        assert!(matches!(
            service.input(&user(), &mut trainer, "x").await,
            Err(TypingServiceError::Typing(TypingError::InvalidTransition { .. }))
        ));
        service.reset(&mut trainer).unwrap();
        assert_eq!(trainer.state(), TypingState::Idle);
    }
}
