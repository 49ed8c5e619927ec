use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::model::ids::ResourceId;

/// Category that user-added links land in unless told otherwise.
pub const BOOKMARKS: &str = "Bookmarks";

/// Filter chips offered by the resources page; "All" disables filtering.
pub const CATEGORIES: [&str; 7] = [
    "All",
    "Official",
    "Notes",
    "Tutorials",
    "Practice",
    "Tools",
    BOOKMARKS,
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResourceError {
    #[error("resource title cannot be empty")]
    EmptyTitle,

    #[error("resource url cannot be empty")]
    EmptyUrl,

    #[error("invalid resource url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Pdf,
    Video,
    #[default]
    Link,
}

impl ResourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Pdf => "pdf",
            ResourceKind::Video => "video",
            ResourceKind::Link => "link",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pdf" => Some(Self::Pdf),
            "video" => Some(Self::Video),
            "link" => Some(Self::Link),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    /// Kept as entered; seeded entries use `#` as a placeholder.
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDraft {
    pub title: String,
    pub url: String,
    pub kind: ResourceKind,
    pub category: String,
}

impl ResourceDraft {
    /// A link in the bookmarks category.
    #[must_use]
    pub fn bookmark(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            kind: ResourceKind::Link,
            category: BOOKMARKS.to_owned(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ResourceKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Validates and assigns a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError::EmptyTitle` or `ResourceError::EmptyUrl` for a
    /// blank field and `ResourceError::InvalidUrl` when the url is not absolute.
    pub fn into_resource(self) -> Result<Resource, ResourceError> {
        if self.title.trim().is_empty() {
            return Err(ResourceError::EmptyTitle);
        }
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ResourceError::EmptyUrl);
        }
        Url::parse(url).map_err(|_| ResourceError::InvalidUrl(url.to_owned()))?;
        let category = if self.category.trim().is_empty() {
            BOOKMARKS.to_owned()
        } else {
            self.category
        };

        Ok(Resource {
            id: ResourceId::generate(),
            title: self.title,
            url: url.to_owned(),
            kind: self.kind,
            category,
        })
    }
}

/// Category selection; `All` shows everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == "All" {
            Self::All
        } else {
            Self::Named(raw.to_owned())
        }
    }

    #[must_use]
    pub fn matches(&self, resource: &Resource) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => resource.category == *name,
        }
    }
}

fn seed(id: &str, title: &str, url: &str, kind: ResourceKind, category: &str) -> Resource {
    Resource {
        id: ResourceId::new(id),
        title: title.to_owned(),
        url: url.to_owned(),
        kind,
        category: category.to_owned(),
    }
}

/// Starter list shown before the user saves anything.
#[must_use]
pub fn default_resources() -> Vec<Resource> {
    vec![
        seed(
            "1",
            "Loksewa Aayog Official Website",
            "https://psc.gov.np",
            ResourceKind::Link,
            "Official",
        ),
        seed("2", "Computer Fundamentals Notes", "#", ResourceKind::Pdf, "Notes"),
        seed("3", "MS Office Tutorial Series", "#", ResourceKind::Video, "Tutorials"),
        seed("4", "Previous Year Questions", "#", ResourceKind::Pdf, "Practice"),
        seed(
            "5",
            "Typing Test Practice",
            "https://www.typingtest.com",
            ResourceKind::Link,
            "Practice",
        ),
        seed("6", "Nepali Unicode Typing", "#", ResourceKind::Link, "Tools"),
    ]
}
