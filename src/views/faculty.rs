//! Faculty directory filters, statistics and deep links.

use serde::Serialize;
use std::time::Duration;

use super::pagination::{paginate, FilterState, Page};
use crate::models::{FacultySummary, ALL_AREAS, RESEARCH_AREAS};

/// Position filter value selecting full professors only
pub const PROFESSOR: &str = "Professor";

/// Active filters on the faculty listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyFilters {
    /// Research area value, or `"all"`
    pub area: String,
    /// Position, `"Professor"` or `"all"`
    pub position: String,
    pub search: String,
}

impl Default for FacultyFilters {
    fn default() -> Self {
        Self {
            area: ALL_AREAS.to_string(),
            position: ALL_AREAS.to_string(),
            search: String::new(),
        }
    }
}

impl FacultyFilters {
    /// Whether `faculty` passes every active filter
    pub fn matches(&self, faculty: &FacultySummary) -> bool {
        if self.area != ALL_AREAS {
            let area = self.area.to_lowercase();
            if !faculty
                .interests
                .iter()
                .any(|interest| interest.to_lowercase().contains(&area))
            {
                return false;
            }
        }

        let position = faculty.position.to_lowercase();
        if self.position == PROFESSOR {
            if !position.contains("professor")
                || position.contains("assistant")
                || position.contains("associate")
            {
                return false;
            }
        } else if self.position != ALL_AREAS && !position.contains(&self.position.to_lowercase()) {
            return false;
        }

        if !self.search.is_empty() {
            let query = self.search.to_lowercase();
            return faculty.name.to_lowercase().contains(&query)
                || position.contains(&query)
                || faculty
                    .interests
                    .iter()
                    .any(|interest| interest.to_lowercase().contains(&query));
        }

        true
    }
}

/// Faculty members passing `filters`, in source order
pub fn filter_faculty<'a>(
    faculty: &'a [FacultySummary],
    filters: &FacultyFilters,
) -> Vec<&'a FacultySummary> {
    faculty.iter().filter(|f| filters.matches(f)).collect()
}

/// Headcount by rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FacultyStats {
    pub total: usize,
    pub professors: usize,
    pub associate_professors: usize,
    pub assistant_professors: usize,
}

pub fn faculty_stats(faculty: &[FacultySummary]) -> FacultyStats {
    let mut stats = FacultyStats {
        total: faculty.len(),
        ..Default::default()
    };
    for member in faculty {
        let position = &member.position;
        let associate = position.contains("Associate");
        let assistant = position.contains("Assistant");
        if associate {
            stats.associate_professors += 1;
        }
        if assistant {
            stats.assistant_professors += 1;
        }
        if position.contains("Professor") && !associate && !assistant {
            stats.professors += 1;
        }
    }
    stats
}

/// Number of faculty working in `area`
///
/// An interest counts when it contains the area name or is contained in it,
/// so "VLSI Design" and "VLSI" both match the `VLSI` area.
pub fn faculty_in_area(faculty: &[FacultySummary], area: &str) -> usize {
    let area = area.to_lowercase();
    faculty
        .iter()
        .filter(|member| {
            member.interests.iter().any(|interest| {
                let interest = interest.to_lowercase();
                interest.contains(&area) || area.contains(&interest)
            })
        })
        .count()
}

/// How an `area` query parameter applies to the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaParam {
    /// Matches a known research area; use it as the area filter
    Area(&'static str),
    /// Unknown area; use the decoded text as the search query
    Search(String),
}

/// Resolve the `area` query parameter
///
/// The value is URL-decoded and lower-cased, then compared with each known
/// area (except the `all` sentinel) by containment in either direction.
pub fn resolve_area_param(raw: &str) -> Option<AreaParam> {
    let decoded = urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string());
    if decoded.trim().is_empty() {
        return None;
    }

    let needle = decoded.to_lowercase();
    let matched = RESEARCH_AREAS
        .iter()
        .filter(|area| area.value != ALL_AREAS)
        .find(|area| {
            let value = area.value.to_lowercase();
            value.contains(&needle) || needle.contains(&value)
        });

    Some(match matched {
        Some(area) => AreaParam::Area(area.value),
        None => AreaParam::Search(decoded),
    })
}

/// Faculty listing state: filters and current page
///
/// Any filter change, including one made through an `area` query
/// parameter, returns to page 1.
#[derive(Debug, Clone)]
pub struct FacultyView {
    state: FilterState<FacultyFilters>,
    page_size: usize,
}

impl FacultyView {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: FilterState::new(FacultyFilters::default()),
            page_size,
        }
    }

    pub fn filters(&self) -> &FacultyFilters {
        self.state.filters()
    }

    pub fn set_area(&mut self, area: &str) {
        self.state.update(|f| f.area = area.to_string());
    }

    pub fn set_position(&mut self, position: &str) {
        self.state.update(|f| f.position = position.to_string());
    }

    pub fn set_search(&mut self, search: &str) {
        self.state.update(|f| f.search = search.to_string());
    }

    /// Apply an `area` query parameter: a known area sets the area filter,
    /// anything else becomes the search text
    pub fn apply_area_param(&mut self, raw: &str) {
        match resolve_area_param(raw) {
            Some(AreaParam::Area(area)) => self.set_area(area),
            Some(AreaParam::Search(text)) => self.set_search(&text),
            None => {}
        }
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.set_page(page);
    }

    pub fn page(&self) -> usize {
        self.state.page()
    }

    pub fn current_page(&self, faculty: &[FacultySummary]) -> Page<FacultySummary> {
        let matching: Vec<FacultySummary> = filter_faculty(faculty, self.state.filters())
            .into_iter()
            .cloned()
            .collect();
        paginate(&matching, self.state.page(), self.page_size)
    }
}

/// Faculty listing layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Where a scroll lands in the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Start,
    Center,
}

/// One scroll-into-view step, run `delay` after the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollStep {
    pub target: &'static str,
    pub delay: Duration,
    pub block: ScrollBlock,
}

pub const FACULTY_MEMBERS_SECTION: &str = "faculty-members";
pub const RESEARCH_AREAS_SECTION: &str = "research-areas";

/// Scroll steps for a URL fragment; unknown fragments scroll nowhere
///
/// The first step waits for layout to settle; `#faculty-members` then
/// brings the active grid or list into view.
pub fn scroll_plan(fragment: &str, mode: ViewMode) -> Vec<ScrollStep> {
    let section = match fragment.trim_start_matches('#') {
        FACULTY_MEMBERS_SECTION => FACULTY_MEMBERS_SECTION,
        RESEARCH_AREAS_SECTION => RESEARCH_AREAS_SECTION,
        _ => return Vec::new(),
    };

    let mut steps = vec![ScrollStep {
        target: section,
        delay: Duration::from_millis(500),
        block: ScrollBlock::Start,
    }];

    if section == FACULTY_MEMBERS_SECTION {
        let target = match mode {
            ViewMode::Grid => "faculty-cards",
            ViewMode::List => "faculty-list",
        };
        steps.push(ScrollStep {
            target,
            delay: Duration::from_millis(300),
            block: ScrollBlock::Center,
        });
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, position: &str, interests: &[&str]) -> FacultySummary {
        let mut f = FacultySummary::new(0, name, None);
        f.position = position.to_string();
        f.interests = interests.iter().map(|s| s.to_string()).collect();
        f
    }

    fn directory() -> Vec<FacultySummary> {
        vec![
            member("Dr. Masilamani V", "Professor", &["Image Processing", "Biometrics"]),
            member("Dr. Noor Mahammad", "Associate Professor", &["VLSI Design", "High Speed Networks"]),
            member("Dr. Sadagopan N", "Assistant Professor", &["Algorithms", "Graph Theory"]),
            member("Dr. Jayaraman U", "Professor & Head", &["Biometrics", "Machine Learning"]),
        ]
    }

    #[test]
    fn test_professor_excludes_associate_and_assistant() {
        let faculty = directory();
        let filters = FacultyFilters {
            position: PROFESSOR.to_string(),
            ..Default::default()
        };
        let names: Vec<&str> = filter_faculty(&faculty, &filters)
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["Dr. Masilamani V", "Dr. Jayaraman U"]);

        let filters = FacultyFilters {
            position: "Assistant".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_faculty(&faculty, &filters).len(), 1);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let faculty = directory();
        let filters = FacultyFilters {
            area: "Biometrics".to_string(),
            position: PROFESSOR.to_string(),
            search: "jaya".to_string(),
        };
        let found = filter_faculty(&faculty, &filters);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Dr. Jayaraman U");
    }

    #[test]
    fn test_search_covers_position_and_interests() {
        let faculty = directory();
        let by_interest = FacultyFilters {
            search: "graph".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_faculty(&faculty, &by_interest).len(), 1);

        let by_position = FacultyFilters {
            search: "associate".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_faculty(&faculty, &by_position).len(), 1);
    }

    #[test]
    fn test_stats() {
        let stats = faculty_stats(&directory());
        assert_eq!(
            stats,
            FacultyStats {
                total: 4,
                professors: 2,
                associate_professors: 1,
                assistant_professors: 1,
            }
        );
    }

    #[test]
    fn test_faculty_in_area_bidirectional() {
        let faculty = directory();
        assert_eq!(faculty_in_area(&faculty, "VLSI"), 1);
        assert_eq!(faculty_in_area(&faculty, "Biometrics"), 2);
        // "Algorithms" interest is contained in the longer area name
        assert_eq!(faculty_in_area(&faculty, "Algorithms & Graph Theory"), 1);
    }

    #[test]
    fn test_resolve_area_param() {
        assert_eq!(
            resolve_area_param("machine%20learning"),
            Some(AreaParam::Area("Machine Learning"))
        );
        assert_eq!(resolve_area_param("vlsi"), Some(AreaParam::Area("VLSI")));
        assert_eq!(
            resolve_area_param("Quantum%20Computing"),
            Some(AreaParam::Search("Quantum Computing".to_string()))
        );
        assert_eq!(resolve_area_param(""), None);
    }

    #[test]
    fn test_scroll_plan() {
        let plan = scroll_plan("#faculty-members", ViewMode::List);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].target, "faculty-members");
        assert_eq!(plan[0].delay, Duration::from_millis(500));
        assert_eq!(plan[1].target, "faculty-list");
        assert_eq!(plan[1].delay, Duration::from_millis(300));
        assert_eq!(plan[1].block, ScrollBlock::Center);

        assert_eq!(scroll_plan("faculty-members", ViewMode::Grid)[1].target, "faculty-cards");
        assert_eq!(scroll_plan("#research-areas", ViewMode::Grid).len(), 1);
        assert!(scroll_plan("#contact", ViewMode::Grid).is_empty());
    }

    #[test]
    fn test_view_paginates_and_resets_on_filter_change() {
        let mut faculty = directory();
        for i in 0..8 {
            faculty.push(member(&format!("Dr. Extra {}", i), "Professor", &["Algorithms"]));
        }

        let mut view = FacultyView::new(9);
        view.set_page(2);
        let page = view.current_page(&faculty);
        assert_eq!(page.total_items, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 3);

        view.set_position(PROFESSOR);
        assert_eq!(view.page(), 1);
        assert_eq!(view.current_page(&faculty).total_items, 10);

        // unchanged value keeps the page
        view.set_page(2);
        view.set_position(PROFESSOR);
        assert_eq!(view.page(), 2);

        view.set_search("extra 7");
        assert_eq!(view.page(), 1);
        assert_eq!(view.current_page(&faculty).items[0].name, "Dr. Extra 7");

        view.set_page(2);
        view.apply_area_param("biometrics");
        assert_eq!(view.page(), 1);
        assert_eq!(view.filters().area, "Biometrics");

        view.set_page(2);
        view.apply_area_param("Quantum%20Computing");
        assert_eq!(view.page(), 1);
        assert_eq!(view.filters().search, "Quantum Computing");
    }
}
