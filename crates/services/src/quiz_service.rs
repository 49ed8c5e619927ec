use std::sync::Arc;

use prep_core::model::{SessionUser, StatKey};
use prep_core::quiz::{Question, QuizRunner, QuizStep, sample_questions, topics};
use tracing::info;

use crate::error::QuizServiceError;
use crate::stats_service::StatsService;

/// Hands out quiz runners and credits finished sets.
#[derive(Clone)]
pub struct QuizService {
    questions: Arc<Vec<Question>>,
    stats: StatsService,
}

impl QuizService {
    #[must_use]
    pub fn new(stats: StatsService) -> Self {
        Self::with_questions(sample_questions(), stats)
    }

    #[must_use]
    pub fn with_questions(questions: Vec<Question>, stats: StatsService) -> Self {
        Self {
            questions: Arc::new(questions),
            stats,
        }
    }

    #[must_use]
    pub fn topics(&self) -> Vec<&str> {
        topics(&self.questions)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` if the bank is empty, or if `topic`
    /// matches no question.
    pub fn start(&self, topic: Option<&str>) -> Result<QuizRunner, QuizServiceError> {
        let questions = self.questions.as_ref().clone();
        let runner = match topic {
            Some(topic) => QuizRunner::for_topic(questions, topic)?,
            None => QuizRunner::new(questions)?,
        };
        Ok(runner)
    }

    /// Advance `runner`, recording a completed set when it finishes.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` when the runner refuses to move and
    /// `QuizServiceError::Stats` if the counter cannot be saved.
    pub async fn next(
        &self,
        user: &SessionUser,
        runner: &mut QuizRunner,
    ) -> Result<QuizStep, QuizServiceError> {
        let step = runner.next()?;
        if let QuizStep::Finished(result) = &step {
            self.stats.increment(user, StatKey::McqSets, 1).await?;
            info!(
                email = %user.email,
                score = result.score,
                total = result.total,
                "quiz finished"
            );
        }
        Ok(step)
    }
}
