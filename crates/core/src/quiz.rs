//! Multiple-choice practice: question bank and a linear quiz walk.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    Empty,

    #[error("option {option} is out of range for question {index}")]
    OptionOutOfRange { index: usize, option: usize },

    #[error("select an answer before moving on")]
    NoSelection,

    #[error("quiz already finished")]
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct: usize,
    pub topic: String,
}

impl Question {
    fn new(id: u32, prompt: &str, options: [&str; 4], correct: usize, topic: &str) -> Self {
        Self {
            id,
            prompt: prompt.to_owned(),
            options: options.iter().map(|o| (*o).to_owned()).collect(),
            correct,
            topic: topic.to_owned(),
        }
    }
}

/// Built-in question set.
#[must_use]
pub fn sample_questions() -> Vec<Question> {
    vec![
        Question::new(
            1,
            "Which of the following is the brain of the computer?",
            ["ALU", "CPU", "Memory", "Control Unit"],
            1,
            "Computer Fundamentals",
        ),
        Question::new(
            2,
            "What does HTML stand for?",
            [
                "Hyper Text Markup Language",
                "High Tech Modern Language",
                "Hyperlink Text Management Language",
                "Home Tool Markup Language",
            ],
            0,
            "Web Technology",
        ),
        Question::new(
            3,
            "Which key combination is used to paste text?",
            ["Ctrl + X", "Ctrl + C", "Ctrl + V", "Ctrl + P"],
            2,
            "MS Office",
        ),
        Question::new(
            4,
            "What is the extension of Microsoft Word 2016 document?",
            [".doc", ".docx", ".txt", ".word"],
            1,
            "MS Office",
        ),
        Question::new(
            5,
            "Which function key is used for spell check in MS Word?",
            ["F5", "F6", "F7", "F8"],
            2,
            "MS Office",
        ),
    ]
}

/// Distinct topics in first-seen order.
#[must_use]
pub fn topics(questions: &[Question]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for q in questions {
        if !seen.contains(&q.topic.as_str()) {
            seen.push(q.topic.as_str());
        }
    }
    seen
}

/// Number of answers equal to their question's correct index.
#[must_use]
pub fn score(questions: &[Question], answers: &[Option<usize>]) -> usize {
    questions
        .iter()
        .zip(answers)
        .filter(|(q, a)| **a == Some(q.correct))
        .count()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview {
    pub index: usize,
    pub chosen: Option<usize>,
    pub correct: usize,
}

impl QuestionReview {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.chosen == Some(self.correct)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub review: Vec<QuestionReview>,
}

impl QuizResult {
    pub fn wrong(&self) -> impl Iterator<Item = &QuestionReview> {
        self.review.iter().filter(|r| !r.is_correct())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    Moved(usize),
    Finished(QuizResult),
}

/// Walks a fixed question list one index at a time.
///
/// Selections are recorded without feedback; correctness is only revealed
/// by the result produced on the last `next`.
#[derive(Debug, Clone)]
pub struct QuizRunner {
    questions: Vec<Question>,
    current: usize,
    answers: Vec<Option<usize>>,
    result: Option<QuizResult>,
}

impl QuizRunner {
    /// # Errors
    ///
    /// Returns `QuizError::Empty` for an empty question list.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }
        let answers = vec![None; questions.len()];
        Ok(Self {
            questions,
            current: 0,
            answers,
            result: None,
        })
    }

    /// Runner over the questions tagged with `topic`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Empty` if no question has that topic.
    pub fn for_topic(questions: Vec<Question>, topic: &str) -> Result<Self, QuizError> {
        Self::new(questions.into_iter().filter(|q| q.topic == topic).collect())
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current(&self) -> &Question {
        &self.questions[self.current]
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.answers[self.current]
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.result.is_none() && self.selected().is_some()
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    /// # Errors
    ///
    /// Returns `QuizError::Finished` after the quiz ended and
    /// `QuizError::OptionOutOfRange` for a nonexistent option.
    pub fn select(&mut self, option: usize) -> Result<(), QuizError> {
        if self.result.is_some() {
            return Err(QuizError::Finished);
        }
        if option >= self.current().options.len() {
            return Err(QuizError::OptionOutOfRange {
                index: self.current,
                option,
            });
        }
        self.answers[self.current] = Some(option);
        Ok(())
    }

    /// Moves forward, or finishes on the last question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoSelection` if the current question has no
    /// answer and `QuizError::Finished` after the quiz ended.
    pub fn next(&mut self) -> Result<QuizStep, QuizError> {
        if self.result.is_some() {
            return Err(QuizError::Finished);
        }
        if self.selected().is_none() {
            return Err(QuizError::NoSelection);
        }
        if !self.is_last() {
            self.current += 1;
            return Ok(QuizStep::Moved(self.current));
        }

        let result = QuizResult {
            score: score(&self.questions, &self.answers),
            total: self.questions.len(),
            review: self
                .questions
                .iter()
                .zip(&self.answers)
                .enumerate()
                .map(|(index, (q, chosen))| QuestionReview {
                    index,
                    chosen: *chosen,
                    correct: q.correct,
                })
                .collect(),
        };
        self.result = Some(result.clone());
        Ok(QuizStep::Finished(result))
    }

    /// Steps back one question. Returns false at the first question.
    pub fn previous(&mut self) -> bool {
        if self.current == 0 || self.result.is_some() {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn restart(&mut self) {
        self.current = 0;
        self.answers = vec![None; self.questions.len()];
        self.result = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(answers: &[usize]) -> QuizResult {
        let mut quiz = QuizRunner::new(sample_questions()).unwrap();
        for (i, a) in answers.iter().enumerate() {
            quiz.select(*a).unwrap();
            match quiz.next().unwrap() {
                QuizStep::Moved(idx) => assert_eq!(idx, i + 1),
                QuizStep::Finished(result) => return result,
            }
        }
        panic!("quiz did not finish");
    }

    #[test]
    fn perfect_answers_score_five() {
        assert_eq!(run(&[1, 0, 2, 1, 2]).score, 5);
    }

    #[test]
    fn one_wrong_answer_scores_four() {
        let result = run(&[1, 1, 2, 1, 2]);
        assert_eq!(result.score, 4);
        assert_eq!(result.total, 5);
        let wrong: Vec<usize> = result.wrong().map(|r| r.index).collect();
        assert_eq!(wrong, vec![1]);
    }

    #[test]
    fn next_requires_selection() {
        let mut quiz = QuizRunner::new(sample_questions()).unwrap();
        assert!(!quiz.can_advance());
        assert_eq!(quiz.next(), Err(QuizError::NoSelection));
    }

    #[test]
    fn previous_keeps_recorded_answer() {
        let mut quiz = QuizRunner::new(sample_questions()).unwrap();
        quiz.select(3).unwrap();
        quiz.next().unwrap();
        assert!(quiz.previous());
        assert_eq!(quiz.selected(), Some(3));
        assert!(!quiz.previous());
    }

    #[test]
    fn restart_clears_answers() {
        let mut quiz = QuizRunner::new(sample_questions()).unwrap();
        for a in [1, 0, 2, 1, 2] {
            quiz.select(a).unwrap();
            quiz.next().unwrap();
        }
        assert!(quiz.result().is_some());
        assert_eq!(quiz.select(0), Err(QuizError::Finished));

        quiz.restart();
        assert_eq!(quiz.current_index(), 0);
        assert!(quiz.answers().iter().all(Option::is_none));
        assert!(quiz.result().is_none());
    }

    #[test]
    fn select_rejects_missing_option() {
        let mut quiz = QuizRunner::new(sample_questions()).unwrap();
        assert_eq!(
            quiz.select(4),
            Err(QuizError::OptionOutOfRange { index: 0, option: 4 })
        );
    }

    #[test]
    fn topic_filter_narrows_questions() {
        let quiz = QuizRunner::for_topic(sample_questions(), "MS Office").unwrap();
        assert_eq!(quiz.questions().len(), 3);
        assert_eq!(
            QuizRunner::for_topic(sample_questions(), "Networking").unwrap_err(),
            QuizError::Empty
        );
        assert_eq!(topics(&sample_questions()).len(), 3);
    }
}
