//! Student scoring records and the spreadsheet column contract
//!
//! The sheet layout is fixed: three identity columns followed by sixteen
//! points columns. [`STUDENT_COLUMNS`] is the single source of truth for which
//! column feeds which field; a sheet with a different column order silently
//! mismaps and that is the sheet owner's responsibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Required text fields identifying a student
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    StudentName,
    HouseName,
    CampusName,
}

/// Numeric points fields (default 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsField {
    AdditionalEffort,
    SupportingPeersAcademics,
    SupportingSmallerGroup,
    SupportLargeGroup,
    TotalAcademicPoints,
    AdditionalEffortsLifeSkills,
    SupportingPeersLifeSkills,
    SupportingCommunityLifeSkills,
    EffortsToLearnEnglish,
    CompetitionWinners,
    CouncilActiveness,
    SolvingProblem,
    TaskWinners,
    GettingAJob,
    TotalCulturePoints,
    TotalAcademicAndCulture,
}

impl PointsField {
    /// All points fields in sheet column order
    pub const ALL: [PointsField; 16] = [
        PointsField::AdditionalEffort,
        PointsField::SupportingPeersAcademics,
        PointsField::SupportingSmallerGroup,
        PointsField::SupportLargeGroup,
        PointsField::TotalAcademicPoints,
        PointsField::AdditionalEffortsLifeSkills,
        PointsField::SupportingPeersLifeSkills,
        PointsField::SupportingCommunityLifeSkills,
        PointsField::EffortsToLearnEnglish,
        PointsField::CompetitionWinners,
        PointsField::CouncilActiveness,
        PointsField::SolvingProblem,
        PointsField::TaskWinners,
        PointsField::GettingAJob,
        PointsField::TotalCulturePoints,
        PointsField::TotalAcademicAndCulture,
    ];

    /// Database column name
    pub fn column(self) -> &'static str {
        match self {
            PointsField::AdditionalEffort => "additional_effort",
            PointsField::SupportingPeersAcademics => "supporting_peers_academics",
            PointsField::SupportingSmallerGroup => "supporting_smaller_group",
            PointsField::SupportLargeGroup => "support_large_group",
            PointsField::TotalAcademicPoints => "total_academic_points",
            PointsField::AdditionalEffortsLifeSkills => "additional_efforts_life_skills",
            PointsField::SupportingPeersLifeSkills => "supporting_peers_life_skills",
            PointsField::SupportingCommunityLifeSkills => "supporting_community_life_skills",
            PointsField::EffortsToLearnEnglish => "efforts_to_learn_english",
            PointsField::CompetitionWinners => "competition_winners",
            PointsField::CouncilActiveness => "council_activeness",
            PointsField::SolvingProblem => "solving_problem",
            PointsField::TaskWinners => "task_winners",
            PointsField::GettingAJob => "getting_a_job",
            PointsField::TotalCulturePoints => "total_culture_points",
            PointsField::TotalAcademicAndCulture => "total_academic_and_culture",
        }
    }
}

/// What a column holds and where it lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Identity(IdentityField),
    Points(PointsField),
}

/// One entry of the column contract: (column index, field name, field kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// 0-based column position in the sheet
    pub index: usize,
    /// Field name as serialized in API responses
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn identity(index: usize, name: &'static str, field: IdentityField) -> ColumnSpec {
    ColumnSpec {
        index,
        name,
        kind: FieldKind::Identity(field),
    }
}

const fn points(index: usize, name: &'static str, field: PointsField) -> ColumnSpec {
    ColumnSpec {
        index,
        name,
        kind: FieldKind::Points(field),
    }
}

/// Sheet column contract, in column order
pub const STUDENT_COLUMNS: [ColumnSpec; 19] = [
    identity(0, "studentName", IdentityField::StudentName),
    identity(1, "houseName", IdentityField::HouseName),
    identity(2, "campusName", IdentityField::CampusName),
    points(3, "additionalEffort", PointsField::AdditionalEffort),
    points(4, "supportingPeersAcademics", PointsField::SupportingPeersAcademics),
    points(5, "supportingSmallerGroup", PointsField::SupportingSmallerGroup),
    points(6, "supportLargeGroup", PointsField::SupportLargeGroup),
    points(7, "totalAcademicPoints", PointsField::TotalAcademicPoints),
    points(8, "additionalEffortsLifeSkills", PointsField::AdditionalEffortsLifeSkills),
    points(9, "supportingPeersLifeSkills", PointsField::SupportingPeersLifeSkills),
    points(10, "supportingCommunityLifeSkills", PointsField::SupportingCommunityLifeSkills),
    points(11, "effortsToLearnEnglish", PointsField::EffortsToLearnEnglish),
    points(12, "competitionWinners", PointsField::CompetitionWinners),
    points(13, "councilActiveness", PointsField::CouncilActiveness),
    points(14, "solvingProblem", PointsField::SolvingProblem),
    points(15, "taskWinners", PointsField::TaskWinners),
    points(16, "gettingAJob", PointsField::GettingAJob),
    points(17, "totalCulturePoints", PointsField::TotalCulturePoints),
    points(18, "totalAcademicAndCulture", PointsField::TotalAcademicAndCulture),
];

/// Points components of a student record
///
/// Totals are stored exactly as read from their own columns, never recomputed
/// from the components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPoints {
    pub additional_effort: i64,
    pub supporting_peers_academics: i64,
    pub supporting_smaller_group: i64,
    pub support_large_group: i64,
    pub total_academic_points: i64,
    pub additional_efforts_life_skills: i64,
    pub supporting_peers_life_skills: i64,
    pub supporting_community_life_skills: i64,
    pub efforts_to_learn_english: i64,
    pub competition_winners: i64,
    pub council_activeness: i64,
    pub solving_problem: i64,
    pub task_winners: i64,
    pub getting_a_job: i64,
    pub total_culture_points: i64,
    pub total_academic_and_culture: i64,
}

impl StudentPoints {
    fn slot_mut(&mut self, field: PointsField) -> &mut i64 {
        match field {
            PointsField::AdditionalEffort => &mut self.additional_effort,
            PointsField::SupportingPeersAcademics => &mut self.supporting_peers_academics,
            PointsField::SupportingSmallerGroup => &mut self.supporting_smaller_group,
            PointsField::SupportLargeGroup => &mut self.support_large_group,
            PointsField::TotalAcademicPoints => &mut self.total_academic_points,
            PointsField::AdditionalEffortsLifeSkills => &mut self.additional_efforts_life_skills,
            PointsField::SupportingPeersLifeSkills => &mut self.supporting_peers_life_skills,
            PointsField::SupportingCommunityLifeSkills => {
                &mut self.supporting_community_life_skills
            }
            PointsField::EffortsToLearnEnglish => &mut self.efforts_to_learn_english,
            PointsField::CompetitionWinners => &mut self.competition_winners,
            PointsField::CouncilActiveness => &mut self.council_activeness,
            PointsField::SolvingProblem => &mut self.solving_problem,
            PointsField::TaskWinners => &mut self.task_winners,
            PointsField::GettingAJob => &mut self.getting_a_job,
            PointsField::TotalCulturePoints => &mut self.total_culture_points,
            PointsField::TotalAcademicAndCulture => &mut self.total_academic_and_culture,
        }
    }

    pub fn set(&mut self, field: PointsField, value: i64) {
        *self.slot_mut(field) = value;
    }

    pub fn get(&self, field: PointsField) -> i64 {
        match field {
            PointsField::AdditionalEffort => self.additional_effort,
            PointsField::SupportingPeersAcademics => self.supporting_peers_academics,
            PointsField::SupportingSmallerGroup => self.supporting_smaller_group,
            PointsField::SupportLargeGroup => self.support_large_group,
            PointsField::TotalAcademicPoints => self.total_academic_points,
            PointsField::AdditionalEffortsLifeSkills => self.additional_efforts_life_skills,
            PointsField::SupportingPeersLifeSkills => self.supporting_peers_life_skills,
            PointsField::SupportingCommunityLifeSkills => self.supporting_community_life_skills,
            PointsField::EffortsToLearnEnglish => self.efforts_to_learn_english,
            PointsField::CompetitionWinners => self.competition_winners,
            PointsField::CouncilActiveness => self.council_activeness,
            PointsField::SolvingProblem => self.solving_problem,
            PointsField::TaskWinners => self.task_winners,
            PointsField::GettingAJob => self.getting_a_job,
            PointsField::TotalCulturePoints => self.total_culture_points,
            PointsField::TotalAcademicAndCulture => self.total_academic_and_culture,
        }
    }
}

/// Output of the row mapper, before admissibility filtering
///
/// Identity fields are `None` when the cell was absent or blank after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRecord {
    pub student_name: Option<String>,
    pub house_name: Option<String>,
    pub campus_name: Option<String>,
    pub points: StudentPoints,
}

impl CandidateRecord {
    pub fn set_identity(&mut self, field: IdentityField, value: Option<String>) {
        match field {
            IdentityField::StudentName => self.student_name = value,
            IdentityField::HouseName => self.house_name = value,
            IdentityField::CampusName => self.campus_name = value,
        }
    }
}

/// An admissible student, ready to be persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub student_name: String,
    pub house_name: String,
    pub campus_name: String,
    #[serde(flatten)]
    pub points: StudentPoints,
}

/// A persisted student with store-assigned id and timestamps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub student: NewStudent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
