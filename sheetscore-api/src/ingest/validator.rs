//! Admissibility of candidate records
//!
//! A candidate is stored only if all three identity fields are present.
//! Points never affect admissibility.

use super::mapper::trim_cell;
use crate::models::{CandidateRecord, NewStudent};

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| !trim_cell(text).is_empty())
}

/// True when studentName, houseName and campusName are all non-empty
pub fn is_admissible(candidate: &CandidateRecord) -> bool {
    present(&candidate.student_name) && present(&candidate.house_name) && present(&candidate.campus_name)
}

/// Promote an admissible candidate to a storable record
pub fn admit(candidate: CandidateRecord) -> Option<NewStudent> {
    if !is_admissible(&candidate) {
        return None;
    }

    Some(NewStudent {
        student_name: candidate.student_name?,
        house_name: candidate.house_name?,
        campus_name: candidate.campus_name?,
        points: candidate.points,
    })
}
