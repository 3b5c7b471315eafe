use crate::domain::id::{Id, Type};
use crate::domain::locale::DisplayText;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub fn default_genus_type() -> Type {
    Id::new("GenusType", "DEFAULT", "DLKIT.MIT.EDU")
}

/// Attributes every external object carries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectBasics {
    pub id: Id,
    #[serde(rename = "type")]
    pub object_type: &'static str,
    pub display_name: DisplayText,
    pub description: DisplayText,
    pub genus_type_id: Type,
    pub record_type_ids: Vec<Type>,
}

impl ObjectBasics {
    pub fn new(id: Id, object_type: &'static str) -> Self {
        Self {
            id,
            object_type,
            display_name: DisplayText::empty(),
            description: DisplayText::empty(),
            genus_type_id: default_genus_type(),
            record_type_ids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Book {
    #[serde(flatten)]
    pub basics: ObjectBasics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(flatten)]
    pub basics: ObjectBasics,
    pub book_id: Id,
    pub reference_id: Id,
    pub commentor_id: Id,
    pub commenting_agent_id: Id,
    pub text: DisplayText,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Gradebook {
    #[serde(flatten)]
    pub basics: ObjectBasics,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    #[serde(flatten)]
    pub basics: ObjectBasics,
    pub grade_system_id: Id,
    pub input_score_start_range: Option<f64>,
    pub input_score_end_range: Option<f64>,
    pub output_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSystem {
    #[serde(flatten)]
    pub basics: ObjectBasics,
    pub gradebook_id: Id,
    pub based_on_grades: bool,
    pub highest_numeric_score: Option<f64>,
    pub lowest_numeric_score: Option<f64>,
    pub numeric_score_increment: Option<f64>,
    pub grades: Vec<Grade>,
}

impl GradeSystem {
    pub fn is_based_on_grades(&self) -> bool {
        self.based_on_grades
    }

    pub fn grade(&self, grade_id: &Id) -> Option<&Grade> {
        self.grades.iter().find(|g| &g.basics.id == grade_id)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradebookColumn {
    #[serde(flatten)]
    pub basics: ObjectBasics,
    pub gradebook_id: Id,
    pub grade_system_id: Id,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeEntry {
    #[serde(flatten)]
    pub basics: ObjectBasics,
    pub gradebook_id: Id,
    pub gradebook_column_id: Id,
    pub key_resource_id: Id,
    pub grade_id: Option<Id>,
    pub score: Option<f64>,
    pub ignored_for_calculations: bool,
    pub grading_agent_id: Id,
    pub time_graded: DateTime<Utc>,
}
