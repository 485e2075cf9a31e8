//! In-memory listing views: filter, order, then paginate.
//!
//! Everything here is synchronous and recomputed from the source collection
//! whenever the filters or page change. The one exception is
//! [`PublicationDirectory::load`], which gathers the data the views run over.

mod faculty;
mod lectures;
mod pagination;
mod publications;

pub use faculty::{
    faculty_in_area, faculty_stats, filter_faculty, resolve_area_param, scroll_plan, AreaParam,
    FacultyFilters, FacultyStats, FacultyView, ScrollBlock, ScrollStep, ViewMode,
    FACULTY_MEMBERS_SECTION, PROFESSOR, RESEARCH_AREAS_SECTION,
};
pub use lectures::{courses, filter_notes, instructors, NoteFilters, NoteTab, NotesView};
pub use pagination::{paginate, total_pages, FilterState, Page};
pub use publications::{
    filter_publications, FacultyPublications, PublicationDirectory, PublicationFilters,
    PublicationView, DEFAULT_AREA,
};
