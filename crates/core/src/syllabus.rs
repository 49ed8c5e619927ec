//! Syllabus checklist and progress aggregation.
//!
//! A topic without subtopics is one completion unit; a topic with subtopics
//! contributes one unit per subtopic and none for itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyllabusError {
    #[error("unknown syllabus unit: {0}")]
    UnknownUnit(String),
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtopic {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub subtopics: Vec<Subtopic>,
}

impl Topic {
    #[must_use]
    pub fn leaf(id: &str, title: &str) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            subtopics: Vec::new(),
        }
    }

    #[must_use]
    pub fn parent(id: &str, title: &str, subtopics: &[(&str, &str)]) -> Self {
        Self {
            id: id.to_owned(),
            title: title.to_owned(),
            subtopics: subtopics
                .iter()
                .map(|(id, title)| Subtopic {
                    id: (*id).to_owned(),
                    title: (*title).to_owned(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.subtopics.is_empty()
    }

    /// Ids that count toward progress.
    pub fn unit_ids(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        if self.is_leaf() {
            Box::new(std::iter::once(self.id.as_str()))
        } else {
            Box::new(self.subtopics.iter().map(|s| s.id.as_str()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub topics: Vec<Topic>,
}

impl Section {
    pub fn unit_ids(&self) -> impl Iterator<Item = &str> {
        self.topics.iter().flat_map(Topic::unit_ids)
    }

    #[must_use]
    pub fn total_units(&self) -> usize {
        self.unit_ids().count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syllabus {
    pub sections: Vec<Section>,
}

impl Syllabus {
    #[must_use]
    pub fn contains_unit(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s.unit_ids().any(|u| u == id))
    }

    #[must_use]
    pub fn total_units(&self) -> usize {
        self.sections.iter().map(Section::total_units).sum()
    }

    #[must_use]
    pub fn progress(&self, completed: &CompletedTopics) -> SyllabusProgress {
        let sections: Vec<SectionProgress> = self
            .sections
            .iter()
            .map(|section| {
                let total = section.total_units();
                let done = section
                    .unit_ids()
                    .filter(|id| completed.contains(id))
                    .count();
                SectionProgress {
                    section_id: section.id.clone(),
                    title: section.title.clone(),
                    completed: done,
                    total,
                    percent: percent(done, total),
                }
            })
            .collect();

        let completed_units = sections.iter().map(|s| s.completed).sum();
        let total_units = sections.iter().map(|s| s.total).sum();
        SyllabusProgress {
            sections,
            completed: completed_units,
            total: total_units,
            percent: percent(completed_units, total_units),
        }
    }
}

fn section(id: &str, title: &str, topics: Vec<Topic>) -> Section {
    Section {
        id: id.to_owned(),
        title: title.to_owned(),
        topics,
    }
}

/// Computer Operator exam stages: written, practical, interview.
#[must_use]
pub fn default_syllabus() -> Syllabus {
    Syllabus {
        sections: vec![
            section(
                "written",
                "Written Examination",
                vec![
                    Topic::parent(
                        "w-fundamentals",
                        "Computer Fundamentals",
                        &[
                            ("w-fund-history", "History and generations of computers"),
                            ("w-fund-hardware", "Hardware components"),
                            ("w-fund-software", "System and application software"),
                            ("w-fund-number", "Number systems"),
                        ],
                    ),
                    Topic::parent(
                        "w-os",
                        "Operating Systems",
                        &[
                            ("w-os-windows", "Windows administration"),
                            ("w-os-linux", "Linux basics"),
                        ],
                    ),
                    Topic::parent(
                        "w-office",
                        "Office Packages",
                        &[
                            ("w-office-word", "Word processing"),
                            ("w-office-excel", "Spreadsheets"),
                            ("w-office-ppt", "Presentations"),
                        ],
                    ),
                    Topic::leaf("w-network", "Networking and Internet"),
                    Topic::leaf("w-database", "Database Management Systems"),
                    Topic::leaf("w-security", "Cyber security basics"),
                    Topic::leaf("w-governance", "Good governance and public service"),
                ],
            ),
            section(
                "practical",
                "Practical Examination",
                vec![
                    Topic::parent(
                        "p-typing",
                        "Typing",
                        &[
                            ("p-typing-english", "English typing"),
                            ("p-typing-nepali", "Nepali Unicode typing"),
                        ],
                    ),
                    Topic::leaf("p-word", "Word document formatting task"),
                    Topic::leaf("p-excel", "Spreadsheet formula task"),
                    Topic::leaf("p-ppt", "Presentation task"),
                ],
            ),
            section(
                "interview",
                "Interview",
                vec![
                    Topic::leaf("i-introduction", "Self introduction"),
                    Topic::leaf("i-current", "Current affairs"),
                    Topic::leaf("i-role", "Role of a computer operator"),
                ],
            ),
        ],
    }
}

/// An official syllabus PDF, served as a static file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyllabusDocument {
    pub title: &'static str,
    pub path: &'static str,
}

pub const SYLLABUS_DOCUMENTS: [SyllabusDocument; 5] = [
    SyllabusDocument {
        title: "Computer Operator",
        path: "/pdfs/computer-operator.pdf",
    },
    SyllabusDocument {
        title: "Computer Technician",
        path: "/pdfs/computer-technician.pdf",
    },
    SyllabusDocument {
        title: "Sansad",
        path: "/pdfs/sansad.pdf",
    },
    SyllabusDocument {
        title: "मानव अधिकार (Syllabus)",
        path: "/pdfs/manav-adhikar-syllabus.pdf",
    },
    SyllabusDocument {
        title: "वरिष्ठ सहायक (कम्प्युटर IT)",
        path: "/pdfs/baristha-sahayak-it.pdf",
    },
];

//
// ─── COMPLETION ────────────────────────────────────────────────────────────────
//

/// Completed unit ids, persisted as a JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletedTopics(BTreeSet<String>);

impl CompletedTopics {
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flips membership of a unit and returns whether it is now complete.
    ///
    /// # Errors
    ///
    /// Returns `SyllabusError::UnknownUnit` if `id` is not a unit of
    /// `syllabus` (parent topics with subtopics are not units).
    pub fn toggle(&mut self, syllabus: &Syllabus, id: &str) -> Result<bool, SyllabusError> {
        if !syllabus.contains_unit(id) {
            return Err(SyllabusError::UnknownUnit(id.to_owned()));
        }
        if self.0.remove(id) {
            Ok(false)
        } else {
            self.0.insert(id.to_owned());
            Ok(true)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionProgress {
    pub section_id: String,
    pub title: String,
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllabusProgress {
    pub sections: Vec<SectionProgress>,
    pub completed: usize,
    pub total: usize,
    pub percent: u32,
}

/// `round(100 * done / total)`, 0 for an empty total.
#[must_use]
pub fn percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let (done, total) = (done as u64, total as u64);
    u32::try_from((200 * done + total) / (2 * total)).unwrap_or(100)
}
