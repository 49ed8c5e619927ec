use serde::{Deserialize, Serialize};

/// Per-user progress counters shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub mcq_sets: u32,
    pub typing_minutes: u32,
    pub subjective_answers: u32,
    pub syllabus_progress: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKey {
    McqSets,
    TypingMinutes,
    SubjectiveAnswers,
    SyllabusProgress,
}

/// Partial overwrite; `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsPatch {
    pub mcq_sets: Option<u32>,
    pub typing_minutes: Option<u32>,
    pub subjective_answers: Option<u32>,
    pub syllabus_progress: Option<u32>,
}

impl StatsPatch {
    #[must_use]
    pub fn syllabus_progress(percent: u32) -> Self {
        Self {
            syllabus_progress: Some(percent),
            ..Self::default()
        }
    }
}

impl Stats {
    #[must_use]
    pub fn get(&self, key: StatKey) -> u32 {
        match key {
            StatKey::McqSets => self.mcq_sets,
            StatKey::TypingMinutes => self.typing_minutes,
            StatKey::SubjectiveAnswers => self.subjective_answers,
            StatKey::SyllabusProgress => self.syllabus_progress,
        }
    }

    fn slot_mut(&mut self, key: StatKey) -> &mut u32 {
        match key {
            StatKey::McqSets => &mut self.mcq_sets,
            StatKey::TypingMinutes => &mut self.typing_minutes,
            StatKey::SubjectiveAnswers => &mut self.subjective_answers,
            StatKey::SyllabusProgress => &mut self.syllabus_progress,
        }
    }

    pub fn increment(&mut self, key: StatKey, amount: u32) {
        let slot = self.slot_mut(key);
        *slot = slot.saturating_add(amount);
    }

    pub fn apply(&mut self, patch: StatsPatch) {
        if let Some(v) = patch.mcq_sets {
            self.mcq_sets = v;
        }
        if let Some(v) = patch.typing_minutes {
            self.typing_minutes = v;
        }
        if let Some(v) = patch.subjective_answers {
            self.subjective_answers = v;
        }
        if let Some(v) = patch.syllabus_progress {
            self.syllabus_progress = v;
        }
    }

    /// Dashboard cards against the daily targets, in display order.
    #[must_use]
    pub fn cards(&self) -> [StatCard; 4] {
        [
            StatCard::new("MCQ Sets Done", self.mcq_sets, 3, ""),
            StatCard::new("Typing Minutes", self.typing_minutes, 60, " min"),
            StatCard::new("Subjective Answers", self.subjective_answers, 2, ""),
            StatCard::new("Syllabus Progress", self.syllabus_progress, 100, "%"),
        ]
    }
}

/// One dashboard counter with its daily target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: u32,
    pub target: u32,
    pub suffix: &'static str,
}

impl StatCard {
    #[must_use]
    pub fn new(label: &'static str, value: u32, target: u32, suffix: &'static str) -> Self {
        Self {
            label,
            value,
            target,
            suffix,
        }
    }

    /// Share of the target reached, capped at 100.
    #[must_use]
    pub fn percent(&self) -> u32 {
        if self.target == 0 {
            return 100;
        }
        let pct = u64::from(self.value) * 100 / u64::from(self.target);
        u32::try_from(pct.min(100)).unwrap_or(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_string(&Stats::default()).unwrap();
        assert_eq!(
            json,
            r#"{"mcqSets":0,"typingMinutes":0,"subjectiveAnswers":0,"syllabusProgress":0}"#
        );
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut stats = Stats {
            mcq_sets: 2,
            ..Stats::default()
        };
        stats.apply(StatsPatch::syllabus_progress(40));
        assert_eq!(stats.mcq_sets, 2);
        assert_eq!(stats.syllabus_progress, 40);
    }

    #[test]
    fn increment_adds_amount() {
        let mut stats = Stats::default();
        stats.increment(StatKey::TypingMinutes, 3);
        stats.increment(StatKey::TypingMinutes, 2);
        assert_eq!(stats.get(StatKey::TypingMinutes), 5);
    }

    #[test]
    fn card_percent_caps_at_target() {
        let stats = Stats {
            mcq_sets: 5,
            subjective_answers: 1,
            ..Stats::default()
        };
        let cards = stats.cards();
        assert_eq!(cards[0].percent(), 100);
        assert_eq!(cards[2].percent(), 50);
        assert_eq!(cards[1].percent(), 0);
    }
}
