//! Lecture note model for the teaching resources browser.

use serde::{Deserialize, Serialize};

/// File format of a lecture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileType {
    Pdf,
    Ppt,
    Doc,
    Video,
}

/// What kind of teaching material a note is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteCategory {
    Lecture,
    Assignment,
    Problem,
    Practice,
    Video,
    Resource,
}

impl NoteCategory {
    pub fn id(&self) -> &'static str {
        match self {
            NoteCategory::Lecture => "lecture",
            NoteCategory::Assignment => "assignment",
            NoteCategory::Problem => "problem",
            NoteCategory::Practice => "practice",
            NoteCategory::Video => "video",
            NoteCategory::Resource => "resource",
        }
    }
}

impl std::str::FromStr for NoteCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lecture" => Ok(NoteCategory::Lecture),
            "assignment" => Ok(NoteCategory::Assignment),
            "problem" => Ok(NoteCategory::Problem),
            "practice" => Ok(NoteCategory::Practice),
            "video" => Ok(NoteCategory::Video),
            "resource" => Ok(NoteCategory::Resource),
            other => Err(format!("unknown note category: {}", other)),
        }
    }
}

/// A downloadable lecture resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LectureNote {
    pub id: u32,

    pub title: String,

    pub course: String,

    pub instructor: String,

    #[serde(default)]
    pub date: Option<String>,

    #[serde(default)]
    pub duration: Option<String>,

    #[serde(default)]
    pub file_size: Option<String>,

    pub file_type: FileType,

    pub url: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub downloads: Option<u32>,

    #[serde(default)]
    pub category: Option<NoteCategory>,
}

impl LectureNote {
    /// Create a note with the required fields
    pub fn new(
        id: u32,
        title: impl Into<String>,
        course: impl Into<String>,
        instructor: impl Into<String>,
        file_type: FileType,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            course: course.into(),
            instructor: instructor.into(),
            date: None,
            duration: None,
            file_size: None,
            file_type,
            url: url.into(),
            tags: Vec::new(),
            downloads: None,
            category: None,
        }
    }

    pub fn with_category(mut self, category: NoteCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_downloads(mut self, downloads: u32) -> Self {
        self.downloads = Some(downloads);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }
}
