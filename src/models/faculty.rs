//! Faculty directory models: list rows, client-side summaries and raw detail payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Image used when neither profile picture field holds a usable URL
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// One row of `GET /api/faculty`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyListEntry {
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub nickname: Option<String>,

    #[serde(default)]
    pub desig: Option<String>,

    /// Free-text teaching/interest field, comma or line separated
    #[serde(default, rename = "schoolName1")]
    pub school_name1: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub pic: Option<String>,

    #[serde(default)]
    pub image: Option<String>,
}

impl FacultyListEntry {
    /// Pick the first profile picture that is an https URL
    pub fn resolved_image(&self) -> String {
        [&self.image_url, &self.pic]
            .into_iter()
            .flatten()
            .find(|url| url.as_str() != "null" && url.starts_with("https"))
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
    }
}

/// Response body of `GET /api/faculty`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacultyListResponse {
    #[serde(default)]
    pub faculty: Option<Vec<FacultyListEntry>>,
}

/// A single degree in a faculty member's education history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Degree {
    #[serde(default)]
    pub institution: String,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub degree: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub phd: Option<Degree>,

    #[serde(default)]
    pub masters: Option<Degree>,

    #[serde(default)]
    pub bachelors: Option<Degree>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub organization: Option<String>,
}

/// Basic faculty data already resident on the client
///
/// This is what the directory cards are rendered from, and what the detail
/// layer synthesises a fallback record from when both endpoints fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FacultySummary {
    pub id: u32,

    pub name: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub position: String,

    #[serde(default)]
    pub image: String,

    #[serde(default)]
    pub interests: Vec<String>,

    #[serde(default)]
    pub education: Education,

    #[serde(default)]
    pub experience: Vec<Experience>,

    #[serde(default)]
    pub teaching: Vec<String>,

    /// Seed citation strings shown before any detail fetch
    #[serde(default)]
    pub publications: Vec<String>,
}

impl FacultySummary {
    /// Create a summary with only a name and email
    pub fn new(id: u32, name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email,
            image: PLACEHOLDER_IMAGE.to_string(),
            ..Default::default()
        }
    }

    /// Build a directory summary from a list row; `id` is the 1-based list position
    pub fn from_list_entry(id: u32, entry: &FacultyListEntry) -> Self {
        Self {
            id,
            name: entry
                .nickname
                .clone()
                .unwrap_or_else(|| "Unknown Faculty".to_string()),
            email: entry.email.clone().filter(|e| !e.trim().is_empty()),
            position: entry.desig.clone().unwrap_or_else(|| "Faculty".to_string()),
            image: entry.resolved_image(),
            interests: entry
                .school_name1
                .as_deref()
                .map(split_list_field)
                .unwrap_or_default(),
            ..Default::default()
        }
    }
}

/// Split a free-text list field on line breaks or commas, dropping blanks
pub fn split_list_field(text: &str) -> Vec<String> {
    text.split(&['\r', '\n', ','][..])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Raw detail payload for one faculty member
///
/// The upstream profile system exposes a loosely-typed record whose
/// citation-bearing fields vary by name between profiles, so the payload is
/// kept as a JSON object with typed accessors for the fields we rely on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacultyDetailInfo {
    fields: Map<String, Value>,
}

impl FacultyDetailInfo {
    /// Primary citation field
    pub const PRIMARY_CITATIONS: &'static str = "pubCite3";
    /// Secondary citation field
    pub const SECONDARY_CITATIONS: &'static str = "pubCite4";
    /// Field prefix shared by every citation group
    pub const CITATION_PREFIX: &'static str = "pubCite";
    /// Teaching/interest field keywords are derived from
    pub const TEACHING_FIELD: &'static str = "schoolName1";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Set a string field, replacing any previous value
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), Value::String(value.into()));
        self
    }

    /// A field as text; non-string values and empty strings count as absent
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    /// Iterate field names in the order the payload listed them
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("nickname").or_else(|| self.get_str("name"))
    }

    pub fn designation(&self) -> Option<&str> {
        self.get_str("desig")
    }

    pub fn research_interest(&self) -> Option<&str> {
        self.get_str("research_interest")
    }

    pub fn teaching(&self) -> Option<&str> {
        self.get_str(Self::TEACHING_FIELD)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Synthesize a minimal record from the data the client already has
    pub fn fallback_from(faculty: &FacultySummary) -> Self {
        let degree = |d: &Option<Degree>| d.clone().unwrap_or_default();
        let phd = degree(&faculty.education.phd);
        let masters = degree(&faculty.education.masters);
        let bachelors = degree(&faculty.education.bachelors);
        let role = |i: usize| {
            faculty
                .experience
                .get(i)
                .map(|e| e.role.clone())
                .unwrap_or_default()
        };
        let seed = |i: usize| faculty.publications.get(i).cloned().unwrap_or_default();

        Self::new()
            .with_field("email", faculty.email.clone().unwrap_or_default())
            .with_field("name", faculty.name.clone())
            .with_field("nickname", faculty.name.clone())
            .with_field("image", faculty.image.clone())
            .with_field("desig", faculty.position.clone())
            .with_field("research_interest", faculty.interests.join(", "))
            .with_field("personal_interest", "")
            .with_field("dschoolName", phd.institution)
            .with_field("dschoolPlace", phd.location)
            .with_field("dschoolBoard", phd.degree)
            .with_field("mschoolName", masters.institution)
            .with_field("mschoolPlace", masters.location)
            .with_field("mschoolBoard", masters.degree)
            .with_field("bschoolName", bachelors.institution)
            .with_field("bschoolPlace", bachelors.location)
            .with_field("bschoolBoard", bachelors.degree)
            .with_field("workName1", role(0))
            .with_field("workName2", role(1))
            .with_field("workName3", "")
            .with_field("schoolName", "")
            .with_field("schoolBoard", "")
            .with_field(
                Self::TEACHING_FIELD,
                faculty.teaching.first().cloned().unwrap_or_default(),
            )
            .with_field(Self::PRIMARY_CITATIONS, seed(0))
            .with_field(Self::SECONDARY_CITATIONS, seed(1))
            .with_field("InvitedTalks", "")
    }
}

/// Response body of the detail endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacultyDetailResponse {
    /// Anything other than boolean `true` is a logical failure
    #[serde(default)]
    pub status: Value,

    #[serde(default)]
    pub facinfo: Option<Vec<FacultyDetailInfo>>,
}

impl FacultyDetailResponse {
    /// The first detail record, if the payload is logically valid
    pub fn into_first(self) -> Option<FacultyDetailInfo> {
        if self.status != Value::Bool(true) {
            return None;
        }
        self.facinfo.and_then(|records| records.into_iter().next())
    }
}

/// A research area the directory can be filtered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResearchArea {
    pub value: &'static str,
    pub name: &'static str,
}

/// Sentinel value meaning "no area filter"
pub const ALL_AREAS: &str = "all";

/// Research areas known to the directory, `all` first
pub const RESEARCH_AREAS: &[ResearchArea] = &[
    ResearchArea { value: ALL_AREAS, name: "All Research Areas" },
    ResearchArea { value: "Image Processing", name: "Image Processing & Computer Vision" },
    ResearchArea { value: "Machine Learning", name: "Machine Learning & AI" },
    ResearchArea { value: "Algorithms", name: "Algorithms & Graph Theory" },
    ResearchArea { value: "VLSI", name: "VLSI & Computer Architecture" },
    ResearchArea { value: "Networks", name: "Computer Networks" },
    ResearchArea { value: "Security", name: "Information Security" },
    ResearchArea { value: "Data Science", name: "Data Science & Analytics" },
    ResearchArea { value: "Human Computer Interaction", name: "Human Computer Interaction" },
    ResearchArea { value: "Biometrics", name: "Biometrics & Pattern Recognition" },
];
