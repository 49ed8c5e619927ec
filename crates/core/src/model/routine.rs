use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::RoutineItemId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoutineError {
    #[error("routine item not found: {0}")]
    NotFound(RoutineItemId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Morning,
    Evening,
}

impl Period {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "morning" => Some(Self::Morning),
            "evening" => Some(Self::Evening),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Evening => "evening",
        }
    }

    fn placeholder_time(self) -> &'static str {
        match self {
            Period::Morning => "8:00 AM",
            Period::Evening => "6:00 PM",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineItem {
    pub id: RoutineItemId,
    pub time: String,
    pub activity: String,
}

/// Daily study plan split into two lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    pub morning: Vec<RoutineItem>,
    pub evening: Vec<RoutineItem>,
}

impl Routine {
    #[must_use]
    pub fn items(&self, period: Period) -> &[RoutineItem] {
        match period {
            Period::Morning => &self.morning,
            Period::Evening => &self.evening,
        }
    }

    fn items_mut(&mut self, period: Period) -> &mut Vec<RoutineItem> {
        match period {
            Period::Morning => &mut self.morning,
            Period::Evening => &mut self.evening,
        }
    }

    /// Appends a placeholder entry and returns a copy of it for editing.
    pub fn add(&mut self, period: Period) -> RoutineItem {
        let item = RoutineItem {
            id: RoutineItemId::generate(),
            time: period.placeholder_time().to_owned(),
            activity: "New Activity".to_owned(),
        };
        self.items_mut(period).push(item.clone());
        item
    }

    /// # Errors
    ///
    /// Returns `RoutineError::NotFound` if no item in `period` has `id`.
    pub fn update(
        &mut self,
        period: Period,
        id: &RoutineItemId,
        time: impl Into<String>,
        activity: impl Into<String>,
    ) -> Result<(), RoutineError> {
        let item = self
            .items_mut(period)
            .iter_mut()
            .find(|item| item.id == *id)
            .ok_or_else(|| RoutineError::NotFound(id.clone()))?;
        item.time = time.into();
        item.activity = activity.into();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `RoutineError::NotFound` if no item in `period` has `id`.
    pub fn remove(&mut self, period: Period, id: &RoutineItemId) -> Result<(), RoutineError> {
        let items = self.items_mut(period);
        let before = items.len();
        items.retain(|item| item.id != *id);
        if items.len() == before {
            return Err(RoutineError::NotFound(id.clone()));
        }
        Ok(())
    }
}

fn entry(id: &str, time: &str, activity: &str) -> RoutineItem {
    RoutineItem {
        id: RoutineItemId::new(id),
        time: time.to_owned(),
        activity: activity.to_owned(),
    }
}

impl Default for Routine {
    fn default() -> Self {
        Self {
            morning: vec![
                entry("1", "6:00 AM", "Wake up & Exercise"),
                entry("2", "7:00 AM", "Breakfast & News"),
                entry("3", "8:00 AM", "MCQ Practice (1 hour)"),
                entry("4", "9:00 AM", "Typing Practice (30 min)"),
                entry("5", "10:00 AM", "Syllabus Study"),
            ],
            evening: vec![
                entry("6", "5:00 PM", "Current Affairs"),
                entry("7", "6:00 PM", "Subjective Answers"),
                entry("8", "7:00 PM", "Revision"),
                entry("9", "8:00 PM", "Dinner Break"),
                entry("10", "9:00 PM", "Light Reading"),
            ],
        }
    }
}
