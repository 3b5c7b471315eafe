//! Forms stage attribute changes before a create or update call.
//!
//! A manager hands out a form (`*_form_for_create` starts from defaults,
//! `*_form_for_update` from the current object), the caller mutates it, and
//! the form is passed back to `create_*`/`update_*`.

use crate::domain::id::{Id, Type};
use crate::domain::locale::DisplayText;
use crate::domain::model::{
    default_genus_type, Book, Comment, GradeEntry, GradeSystem, Gradebook, GradebookColumn,
    ObjectBasics,
};
use crate::utils::error::{Result, ServiceError};

#[derive(Debug, Clone, PartialEq)]
pub struct BasicsForm {
    pub display_name: DisplayText,
    pub description: DisplayText,
    pub genus_type_id: Type,
}

impl Default for BasicsForm {
    fn default() -> Self {
        Self {
            display_name: DisplayText::empty(),
            description: DisplayText::empty(),
            genus_type_id: default_genus_type(),
        }
    }
}

impl BasicsForm {
    pub fn from_object(basics: &ObjectBasics) -> Self {
        Self {
            display_name: basics.display_name.clone(),
            description: basics.description.clone(),
            genus_type_id: basics.genus_type_id.clone(),
        }
    }

    pub fn apply_to(&self, basics: &mut ObjectBasics) {
        basics.display_name = self.display_name.clone();
        basics.description = self.description.clone();
        basics.genus_type_id = self.genus_type_id.clone();
    }
}

/// Access to the shared name/description/genus attributes of any form.
pub trait FormBasics {
    fn basics_mut(&mut self) -> &mut BasicsForm;

    fn set_display_name(&mut self, text: DisplayText) {
        self.basics_mut().display_name = text;
    }

    fn set_description(&mut self, text: DisplayText) {
        self.basics_mut().description = text;
    }

    fn set_genus_type(&mut self, genus_type: Type) {
        self.basics_mut().genus_type_id = genus_type;
    }
}

macro_rules! impl_form_basics {
    ($($form:ty),* $(,)?) => {
        $(impl FormBasics for $form {
            fn basics_mut(&mut self) -> &mut BasicsForm {
                &mut self.basics
            }
        })*
    };
}

/// Form for books and gradebooks. `id` is set on update forms only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogForm {
    pub id: Option<Id>,
    pub basics: BasicsForm,
}

impl CatalogForm {
    pub fn for_book(book: &Book) -> Self {
        Self {
            id: Some(book.basics.id.clone()),
            basics: BasicsForm::from_object(&book.basics),
        }
    }

    pub fn for_gradebook(gradebook: &Gradebook) -> Self {
        Self {
            id: Some(gradebook.basics.id.clone()),
            basics: BasicsForm::from_object(&gradebook.basics),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentForm {
    pub id: Option<Id>,
    pub reference_id: Id,
    pub basics: BasicsForm,
    pub text: DisplayText,
}

impl CommentForm {
    pub fn for_create(reference_id: Id) -> Self {
        Self {
            id: None,
            reference_id,
            basics: BasicsForm::default(),
            text: DisplayText::empty(),
        }
    }

    pub fn for_update(comment: &Comment) -> Self {
        Self {
            id: Some(comment.basics.id.clone()),
            reference_id: comment.reference_id.clone(),
            basics: BasicsForm::from_object(&comment.basics),
            text: comment.text.clone(),
        }
    }

    pub fn set_text(&mut self, text: DisplayText) {
        self.text = text;
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradeSystemForm {
    pub id: Option<Id>,
    pub basics: BasicsForm,
    pub based_on_grades: bool,
    pub highest_numeric_score: Option<f64>,
    pub lowest_numeric_score: Option<f64>,
    pub numeric_score_increment: Option<f64>,
}

impl GradeSystemForm {
    pub fn for_update(grade_system: &GradeSystem) -> Self {
        Self {
            id: Some(grade_system.basics.id.clone()),
            basics: BasicsForm::from_object(&grade_system.basics),
            based_on_grades: grade_system.based_on_grades,
            highest_numeric_score: grade_system.highest_numeric_score,
            lowest_numeric_score: grade_system.lowest_numeric_score,
            numeric_score_increment: grade_system.numeric_score_increment,
        }
    }

    pub fn set_based_on_grades(&mut self, based_on_grades: bool) {
        self.based_on_grades = based_on_grades;
    }

    pub fn set_highest_numeric_score(&mut self, score: f64) {
        self.highest_numeric_score = Some(score);
    }

    pub fn set_lowest_numeric_score(&mut self, score: f64) {
        self.lowest_numeric_score = Some(score);
    }

    pub fn set_numeric_score_increment(&mut self, increment: f64) {
        self.numeric_score_increment = Some(increment);
    }

    pub fn clear_numeric_scores(&mut self) {
        self.highest_numeric_score = None;
        self.lowest_numeric_score = None;
        self.numeric_score_increment = None;
    }

    /// Lowest must not exceed highest and the increment must not be negative.
    pub fn validate_numeric_settings(&self) -> Result<()> {
        if let (Some(lowest), Some(highest)) = (self.lowest_numeric_score, self.highest_numeric_score)
        {
            if lowest > highest {
                return Err(ServiceError::invalid_argument(format!(
                    "lowest numeric score {} is greater than highest {}",
                    lowest, highest
                )));
            }
        }
        if self.numeric_score_increment.is_some_and(|inc| inc < 0.0) {
            return Err(ServiceError::invalid_argument(
                "numeric score increment cannot be negative",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeForm {
    pub grade_system_id: Id,
    pub basics: BasicsForm,
    pub input_score_start_range: Option<f64>,
    pub input_score_end_range: Option<f64>,
    pub output_score: Option<f64>,
}

impl GradeForm {
    pub fn for_create(grade_system_id: Id) -> Self {
        Self {
            grade_system_id,
            basics: BasicsForm::default(),
            input_score_start_range: None,
            input_score_end_range: None,
            output_score: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnForm {
    pub id: Option<Id>,
    pub basics: BasicsForm,
    pub grade_system_id: Option<Id>,
}

impl ColumnForm {
    pub fn for_update(column: &GradebookColumn) -> Self {
        Self {
            id: Some(column.basics.id.clone()),
            basics: BasicsForm::from_object(&column.basics),
            grade_system_id: Some(column.grade_system_id.clone()),
        }
    }

    pub fn set_grade_system(&mut self, grade_system_id: Id) {
        self.grade_system_id = Some(grade_system_id);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryForm {
    pub id: Option<Id>,
    pub column_id: Id,
    pub resource_id: Id,
    pub basics: BasicsForm,
    pub grade_id: Option<Id>,
    pub score: Option<f64>,
    pub ignored_for_calculations: bool,
}

impl EntryForm {
    pub fn for_create(column_id: Id, resource_id: Id) -> Self {
        Self {
            id: None,
            column_id,
            resource_id,
            basics: BasicsForm::default(),
            grade_id: None,
            score: None,
            ignored_for_calculations: false,
        }
    }

    pub fn for_update(entry: &GradeEntry) -> Self {
        Self {
            id: Some(entry.basics.id.clone()),
            column_id: entry.gradebook_column_id.clone(),
            resource_id: entry.key_resource_id.clone(),
            basics: BasicsForm::from_object(&entry.basics),
            grade_id: entry.grade_id.clone(),
            score: entry.score,
            ignored_for_calculations: entry.ignored_for_calculations,
        }
    }

    pub fn set_grade(&mut self, grade_id: Id) {
        self.grade_id = Some(grade_id);
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = Some(score);
    }

    pub fn set_ignored_for_calculations(&mut self, ignored: bool) {
        self.ignored_for_calculations = ignored;
    }
}

impl_form_basics!(
    CatalogForm,
    CommentForm,
    GradeSystemForm,
    GradeForm,
    ColumnForm,
    EntryForm,
);
