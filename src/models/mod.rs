//! Core data models for the faculty directory, publications and lecture notes.

mod faculty;
mod lecture;
mod publication;

pub use faculty::{
    split_list_field, Degree, Education, Experience, FacultyDetailInfo, FacultyDetailResponse,
    FacultyListEntry, FacultyListResponse, FacultySummary, ResearchArea, ALL_AREAS,
    PLACEHOLDER_IMAGE, RESEARCH_AREAS,
};
pub use lecture::{FileType, LectureNote, NoteCategory};
pub use publication::{PublicationBuilder, PublicationRecord, PublicationType};
