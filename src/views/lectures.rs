//! Lecture-note browser: selector filters, tabs and distinct option lists.

use std::cmp::Reverse;

use super::pagination::{paginate, FilterState, Page};
use crate::models::{LectureNote, NoteCategory};

/// Ordering tabs of the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteTab {
    /// Source order
    #[default]
    All,
    /// Newest (highest id) first
    Recent,
    /// Most downloaded first; notes without a count rank as zero
    Popular,
}

impl std::str::FromStr for NoteTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(NoteTab::All),
            "recent" => Ok(NoteTab::Recent),
            "popular" => Ok(NoteTab::Popular),
            other => Err(format!("unknown tab: {}", other)),
        }
    }
}

/// Active selectors; `None` means "any"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilters {
    pub instructor: Option<String>,
    pub course: Option<String>,
    pub category: Option<NoteCategory>,
    pub tab: NoteTab,
}

impl NoteFilters {
    pub fn matches(&self, note: &LectureNote) -> bool {
        self.instructor.as_ref().map_or(true, |i| note.instructor == *i)
            && self.course.as_ref().map_or(true, |c| note.course == *c)
            && self.category.map_or(true, |c| note.category == Some(c))
    }
}

/// Notes passing every selector, ordered by the active tab
///
/// Sorting is stable, so ties keep their source order.
pub fn filter_notes<'a>(notes: &'a [LectureNote], filters: &NoteFilters) -> Vec<&'a LectureNote> {
    let mut matching: Vec<&LectureNote> = notes.iter().filter(|n| filters.matches(n)).collect();
    match filters.tab {
        NoteTab::All => {}
        NoteTab::Recent => matching.sort_by_key(|n| Reverse(n.id)),
        NoteTab::Popular => matching.sort_by_key(|n| Reverse(n.downloads.unwrap_or(0))),
    }
    matching
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Instructor options, in order of first appearance
pub fn instructors(notes: &[LectureNote]) -> Vec<&str> {
    distinct(notes.iter().map(|n| n.instructor.as_str()))
}

/// Course options, in order of first appearance
pub fn courses(notes: &[LectureNote]) -> Vec<&str> {
    distinct(notes.iter().map(|n| n.course.as_str()))
}

/// Lecture-note listing state: selectors, tab and current page
///
/// Switching tabs counts as a filter change and returns to page 1.
#[derive(Debug, Clone)]
pub struct NotesView {
    state: FilterState<NoteFilters>,
    page_size: usize,
}

impl NotesView {
    pub fn new(page_size: usize) -> Self {
        Self {
            state: FilterState::new(NoteFilters::default()),
            page_size,
        }
    }

    pub fn filters(&self) -> &NoteFilters {
        self.state.filters()
    }

    pub fn set_instructor(&mut self, instructor: Option<String>) {
        self.state.update(|f| f.instructor = instructor);
    }

    pub fn set_course(&mut self, course: Option<String>) {
        self.state.update(|f| f.course = course);
    }

    pub fn set_category(&mut self, category: Option<NoteCategory>) {
        self.state.update(|f| f.category = category);
    }

    pub fn set_tab(&mut self, tab: NoteTab) {
        self.state.update(|f| f.tab = tab);
    }

    pub fn set_page(&mut self, page: usize) {
        self.state.set_page(page);
    }

    pub fn page(&self) -> usize {
        self.state.page()
    }

    pub fn current_page(&self, notes: &[LectureNote]) -> Page<LectureNote> {
        let matching: Vec<LectureNote> = filter_notes(notes, self.state.filters())
            .into_iter()
            .cloned()
            .collect();
        paginate(&matching, self.state.page(), self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileType;

    fn notes() -> Vec<LectureNote> {
        vec![
            LectureNote::new(101, "Logic", "Discrete Structures", "Dr. N Sadagopan", FileType::Pdf, "/doc/logic.pdf")
                .with_category(NoteCategory::Lecture)
                .with_downloads(40),
            LectureNote::new(102, "Sets", "Discrete Structures", "Dr. N Sadagopan", FileType::Pdf, "/doc/sets.pdf")
                .with_category(NoteCategory::Assignment),
            LectureNote::new(201, "Pipelining", "Computer Architecture", "Dr. Noor Mahammad", FileType::Ppt, "/doc/pipe.ppt")
                .with_category(NoteCategory::Lecture)
                .with_downloads(75),
            LectureNote::new(103, "Relations", "Discrete Structures", "Dr. N Sadagopan", FileType::Video, "/vid/rel.mp4")
                .with_category(NoteCategory::Video)
                .with_downloads(40),
        ]
    }

    fn ids(notes: &[&LectureNote]) -> Vec<u32> {
        notes.iter().map(|n| n.id).collect()
    }

    #[test]
    fn test_tabs() {
        let notes = notes();
        let mut filters = NoteFilters::default();
        assert_eq!(ids(&filter_notes(&notes, &filters)), vec![101, 102, 201, 103]);

        filters.tab = NoteTab::Recent;
        assert_eq!(ids(&filter_notes(&notes, &filters)), vec![201, 103, 102, 101]);

        // ties (101 and 103 at 40) keep source order; missing counts sort last
        filters.tab = NoteTab::Popular;
        assert_eq!(ids(&filter_notes(&notes, &filters)), vec![201, 101, 103, 102]);
    }

    #[test]
    fn test_selectors_are_exact_and_conjunctive() {
        let notes = notes();
        let filters = NoteFilters {
            instructor: Some("Dr. N Sadagopan".to_string()),
            category: Some(NoteCategory::Lecture),
            ..Default::default()
        };
        assert_eq!(ids(&filter_notes(&notes, &filters)), vec![101]);

        let partial = NoteFilters {
            course: Some("Discrete".to_string()),
            ..Default::default()
        };
        assert!(filter_notes(&notes, &partial).is_empty());
    }

    #[test]
    fn test_distinct_options() {
        let notes = notes();
        assert_eq!(instructors(&notes), vec!["Dr. N Sadagopan", "Dr. Noor Mahammad"]);
        assert_eq!(courses(&notes), vec!["Discrete Structures", "Computer Architecture"]);
    }

    #[test]
    fn test_tab_from_str() {
        assert_eq!("Popular".parse::<NoteTab>(), Ok(NoteTab::Popular));
        assert!("trending".parse::<NoteTab>().is_err());
    }

    #[test]
    fn test_view_paginates_and_resets_on_tab_change() {
        let mut notes = notes();
        for id in 300..305 {
            notes.push(
                LectureNote::new(id, "Extra", "Theory of Computation", "Dr. N Sadagopan", FileType::Doc, "/doc/x.doc"),
            );
        }

        let mut view = NotesView::new(5);
        view.set_page(2);
        let page = view.current_page(&notes);
        assert_eq!(page.total_items, 9);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 4);

        view.set_tab(NoteTab::Recent);
        assert_eq!(view.page(), 1);
        assert_eq!(view.current_page(&notes).items[0].id, 304);

        // same value again is not a change
        view.set_page(2);
        view.set_tab(NoteTab::Recent);
        assert_eq!(view.page(), 2);

        view.set_course(Some("Computer Architecture".to_string()));
        assert_eq!(view.page(), 1);
        assert_eq!(view.current_page(&notes).total_items, 1);
    }
}
