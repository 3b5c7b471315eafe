use crate::core::payload::{display_text_value, float_value, Payload};
use crate::domain::forms::{FormBasics, GradeForm};
use crate::domain::id::Id;
use crate::domain::locale::{DisplayText, Locale};
use crate::domain::model::GradeSystem;
use crate::domain::ports::GradingManager;
use crate::utils::error::{Result, ServiceError};
use serde_json::{Map, Value};

pub const NUMERIC_SCORE_INPUTS: [&str; 3] = [
    "highestNumericScore",
    "lowestNumericScore",
    "numericScoreIncrement",
];

/// Short names accepted on grade system updates, paired with their full names.
pub const SCORE_INPUT_ALIASES: [(&str, &str); 3] = [
    ("highestScore", "highestNumericScore"),
    ("lowestScore", "lowestNumericScore"),
    ("scoreIncrement", "numericScoreIncrement"),
];

pub fn check_grade_inputs(data: &Payload) -> Result<&Vec<Value>> {
    data.verify_keys_present(&["grades"])?;
    data.array("grades")
        .map_err(|_| ServiceError::invalid_argument("Grades must be a list of objects."))
}

pub fn check_numeric_score_inputs(data: &Payload) -> Result<()> {
    data.verify_keys_present(&NUMERIC_SCORE_INPUTS)
}

/// Looks up a numeric score setting by full name, falling back to its alias.
pub fn score_setting(data: &Payload, full_name: &str) -> Result<Option<f64>> {
    if data.contains(full_name) {
        return data.float(full_name).map(Some);
    }
    match SCORE_INPUT_ALIASES.iter().find(|(_, full)| *full == full_name) {
        Some((alias, _)) if data.contains(alias) => data.float(alias).map(Some),
        _ => Ok(None),
    }
}

pub fn has_score_settings(data: &Payload) -> bool {
    data.contains_any(&NUMERIC_SCORE_INPUTS)
        || SCORE_INPUT_ALIASES
            .iter()
            .any(|(alias, _)| data.contains(alias))
}

/// Attributes of one requested grade, checked before anything is written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeInput {
    pub display_name: Option<DisplayText>,
    pub description: Option<DisplayText>,
    pub input_score_start_range: Option<f64>,
    pub input_score_end_range: Option<f64>,
    pub output_score: Option<f64>,
}

impl GradeInput {
    fn apply_to(&self, form: &mut GradeForm) {
        form.input_score_start_range = self.input_score_start_range;
        form.input_score_end_range = self.input_score_end_range;
        form.output_score = self.output_score;
        if let Some(name) = &self.display_name {
            form.set_display_name(name.clone());
        }
        if let Some(description) = &self.description {
            form.set_description(description.clone());
        }
    }
}

fn optional_float(attrs: &Map<String, Value>, key: &str) -> Result<Option<f64>> {
    attrs.get(key).map(|value| float_value(key, value)).transpose()
}

fn optional_text(
    attrs: &Map<String, Value>,
    key: &str,
    locale: &Locale,
) -> Result<Option<DisplayText>> {
    attrs
        .get(key)
        .map(|value| display_text_value(key, value, locale))
        .transpose()
}

/// Converts every grade object up front so a bad value fails the whole list.
pub fn parse_grade_inputs(grades: &[Value], locale: &Locale) -> Result<Vec<GradeInput>> {
    grades
        .iter()
        .map(|grade| {
            let attrs = match grade {
                Value::Object(attrs) => attrs,
                _ => return Err(ServiceError::invalid_argument("Grades must be a list of objects.")),
            };
            Ok(GradeInput {
                display_name: optional_text(attrs, "name", locale)?,
                description: optional_text(attrs, "description", locale)?,
                input_score_start_range: optional_float(attrs, "inputScoreStartRange")?,
                input_score_end_range: optional_float(attrs, "inputScoreEndRange")?,
                output_score: optional_float(attrs, "outputScore")?,
            })
        })
        .collect()
}

/// Creates one grade per parsed input on the given grade system.
pub async fn add_grades_to_grade_system(
    manager: &dyn GradingManager,
    gradebook_id: &Id,
    grade_system_id: &Id,
    grades: &[GradeInput],
) -> Result<()> {
    for grade in grades {
        let mut form = manager
            .grade_form_for_create(gradebook_id, grade_system_id)
            .await?;
        grade.apply_to(&mut form);
        manager.create_grade(gradebook_id, form).await?;
    }
    Ok(())
}

pub fn validate_score_and_grades_against_system(
    grade_system: &GradeSystem,
    data: &Payload,
) -> Result<()> {
    if grade_system.is_based_on_grades() && data.contains("score") {
        return Err(ServiceError::invalid_argument(
            "You cannot set a numeric score when using a grade-based system.",
        ));
    }
    if !grade_system.is_based_on_grades() && data.contains("grade") {
        return Err(ServiceError::invalid_argument(
            "You cannot set a grade when using a numeric score-based system.",
        ));
    }
    Ok(())
}
