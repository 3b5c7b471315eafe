use super::IdMinter;
use crate::domain::forms::{
    CatalogForm, ColumnForm, EntryForm, GradeForm, GradeSystemForm,
};
use crate::domain::id::Id;
use crate::domain::locale::Proxy;
use crate::domain::model::{
    Grade, GradeEntry, GradeSystem, Gradebook, GradebookColumn, ObjectBasics,
};
use crate::domain::ports::GradingManager;
use crate::domain::summary::ColumnSummary;
use crate::utils::error::{Result, ServiceError};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub(crate) struct GradingStore {
    gradebooks: Vec<Gradebook>,
    aliases: HashMap<Id, Id>,
    grade_systems: Vec<GradeSystem>,
    columns: Vec<GradebookColumn>,
    entries: Vec<GradeEntry>,
}

impl GradingStore {
    fn resolve_gradebook(&self, gradebook_id: &Id) -> Result<Id> {
        if self.gradebooks.iter().any(|g| &g.basics.id == gradebook_id) {
            return Ok(gradebook_id.clone());
        }
        self.aliases
            .get(gradebook_id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(format!("gradebook {}", gradebook_id)))
    }

    fn grade_system_index(&self, gradebook_id: &Id, grade_system_id: &Id) -> Result<usize> {
        self.grade_systems
            .iter()
            .position(|s| &s.gradebook_id == gradebook_id && &s.basics.id == grade_system_id)
            .ok_or_else(|| ServiceError::not_found(format!("grade system {}", grade_system_id)))
    }

    fn column_index(&self, gradebook_id: &Id, column_id: &Id) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| &c.gradebook_id == gradebook_id && &c.basics.id == column_id)
            .ok_or_else(|| ServiceError::not_found(format!("gradebook column {}", column_id)))
    }

    fn entry_index(&self, gradebook_id: &Id, entry_id: &Id) -> Result<usize> {
        self.entries
            .iter()
            .position(|e| &e.gradebook_id == gradebook_id && &e.basics.id == entry_id)
            .ok_or_else(|| ServiceError::not_found(format!("grade entry {}", entry_id)))
    }

    fn column_grade_system(&self, gradebook_id: &Id, column_id: &Id) -> Result<&GradeSystem> {
        let column = &self.columns[self.column_index(gradebook_id, column_id)?];
        let index = self.grade_system_index(gradebook_id, &column.grade_system_id)?;
        Ok(&self.grade_systems[index])
    }

    /// Checks the graded value of an entry against its column's grade system.
    fn validate_entry(&self, gradebook_id: &Id, form: &EntryForm) -> Result<()> {
        let grade_system = self.column_grade_system(gradebook_id, &form.column_id)?;

        if let Some(grade_id) = &form.grade_id {
            if !grade_system.is_based_on_grades() {
                return Err(ServiceError::invalid_argument(
                    "grade set on an entry of a numeric score-based system",
                ));
            }
            if grade_system.grade(grade_id).is_none() {
                return Err(ServiceError::invalid_argument(format!(
                    "grade {} does not belong to grade system {}",
                    grade_id, grade_system.basics.id
                )));
            }
        }

        if let Some(score) = form.score {
            if grade_system.is_based_on_grades() {
                return Err(ServiceError::invalid_argument(
                    "score set on an entry of a grade-based system",
                ));
            }
            if let (Some(lowest), Some(highest)) = (
                grade_system.lowest_numeric_score,
                grade_system.highest_numeric_score,
            ) {
                if score < lowest || score > highest {
                    return Err(ServiceError::invalid_argument(format!(
                        "score {} outside of range {} - {}",
                        score, lowest, highest
                    )));
                }
            }
        }

        Ok(())
    }

    fn entry_value(&self, entry: &GradeEntry) -> Option<f64> {
        if let Some(score) = entry.score {
            return Some(score);
        }
        let grade_id = entry.grade_id.as_ref()?;
        self.grade_systems
            .iter()
            .filter(|s| s.gradebook_id == entry.gradebook_id)
            .find_map(|s| s.grade(grade_id))
            .and_then(|g| g.output_score)
    }
}

fn apply_grade_system_form(grade_system: &mut GradeSystem, form: &GradeSystemForm) {
    form.basics.apply_to(&mut grade_system.basics);
    grade_system.based_on_grades = form.based_on_grades;
    if form.based_on_grades {
        grade_system.highest_numeric_score = None;
        grade_system.lowest_numeric_score = None;
        grade_system.numeric_score_increment = None;
    } else {
        grade_system.highest_numeric_score = form.highest_numeric_score;
        grade_system.lowest_numeric_score = form.lowest_numeric_score;
        grade_system.numeric_score_increment = form.numeric_score_increment;
    }
}

pub struct InMemoryGradingManager {
    store: Arc<RwLock<GradingStore>>,
    minter: IdMinter,
    proxy: Proxy,
}

impl InMemoryGradingManager {
    pub(crate) fn new(store: Arc<RwLock<GradingStore>>, minter: IdMinter, proxy: Proxy) -> Self {
        Self {
            store,
            minter,
            proxy,
        }
    }
}

#[async_trait]
impl GradingManager for InMemoryGradingManager {
    async fn gradebooks(&self) -> Result<Vec<Gradebook>> {
        Ok(self.store.read().await.gradebooks.clone())
    }

    async fn gradebook(&self, gradebook_id: &Id) -> Result<Gradebook> {
        let store = self.store.read().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        store
            .gradebooks
            .iter()
            .find(|g| g.basics.id == resolved)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(format!("gradebook {}", gradebook_id)))
    }

    async fn gradebook_form_for_create(&self) -> Result<CatalogForm> {
        Ok(CatalogForm::default())
    }

    async fn gradebook_form_for_update(&self, gradebook_id: &Id) -> Result<CatalogForm> {
        let gradebook = self.gradebook(gradebook_id).await?;
        Ok(CatalogForm::for_gradebook(&gradebook))
    }

    async fn create_gradebook(&self, form: CatalogForm) -> Result<Gradebook> {
        if form.id.is_some() {
            return Err(ServiceError::invalid_argument(
                "form is not a gradebook create form",
            ));
        }

        let mut basics = ObjectBasics::new(self.minter.mint("grading.Gradebook"), "Gradebook");
        form.basics.apply_to(&mut basics);
        let gradebook = Gradebook { basics };

        self.store.write().await.gradebooks.push(gradebook.clone());
        tracing::debug!("Created gradebook {}", gradebook.basics.id);
        Ok(gradebook)
    }

    async fn update_gradebook(&self, form: CatalogForm) -> Result<Gradebook> {
        let form_id = form
            .id
            .as_ref()
            .ok_or_else(|| ServiceError::invalid_argument("form is not a gradebook update form"))?;

        let mut store = self.store.write().await;
        let resolved = store.resolve_gradebook(form_id)?;
        let gradebook = store
            .gradebooks
            .iter_mut()
            .find(|g| g.basics.id == resolved)
            .ok_or_else(|| ServiceError::not_found(format!("gradebook {}", form_id)))?;

        form.basics.apply_to(&mut gradebook.basics);
        Ok(gradebook.clone())
    }

    async fn delete_gradebook(&self, gradebook_id: &Id) -> Result<()> {
        let mut store = self.store.write().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;

        let in_use = store.grade_systems.iter().any(|s| s.gradebook_id == resolved)
            || store.columns.iter().any(|c| c.gradebook_id == resolved)
            || store.entries.iter().any(|e| e.gradebook_id == resolved);
        if in_use {
            return Err(ServiceError::illegal_state(format!(
                "gradebook {} is not empty",
                gradebook_id
            )));
        }

        store.gradebooks.retain(|g| g.basics.id != resolved);
        store.aliases.retain(|_, target| target != &resolved);
        tracing::debug!("Deleted gradebook {}", resolved);
        Ok(())
    }

    async fn alias_gradebook(&self, gradebook_id: &Id, alias_id: &Id) -> Result<()> {
        let mut store = self.store.write().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;

        if store.gradebooks.iter().any(|g| &g.basics.id == alias_id) {
            return Err(ServiceError::illegal_state(format!(
                "alias {} is already a gradebook id",
                alias_id
            )));
        }

        store.aliases.insert(alias_id.clone(), resolved);
        Ok(())
    }

    async fn grade_systems(&self, gradebook_id: &Id) -> Result<Vec<GradeSystem>> {
        let store = self.store.read().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        Ok(store
            .grade_systems
            .iter()
            .filter(|s| s.gradebook_id == resolved)
            .cloned()
            .collect())
    }

    async fn grade_system(&self, gradebook_id: &Id, grade_system_id: &Id) -> Result<GradeSystem> {
        let store = self.store.read().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        let index = store.grade_system_index(&resolved, grade_system_id)?;
        Ok(store.grade_systems[index].clone())
    }

    async fn grade_system_form_for_create(&self, gradebook_id: &Id) -> Result<GradeSystemForm> {
        self.store.read().await.resolve_gradebook(gradebook_id)?;
        Ok(GradeSystemForm::default())
    }

    async fn grade_system_form_for_update(
        &self,
        gradebook_id: &Id,
        grade_system_id: &Id,
    ) -> Result<GradeSystemForm> {
        let grade_system = self.grade_system(gradebook_id, grade_system_id).await?;
        Ok(GradeSystemForm::for_update(&grade_system))
    }

    async fn create_grade_system(
        &self,
        gradebook_id: &Id,
        form: GradeSystemForm,
    ) -> Result<GradeSystem> {
        if form.id.is_some() {
            return Err(ServiceError::invalid_argument(
                "form is not a grade system create form",
            ));
        }
        form.validate_numeric_settings()?;

        let mut store = self.store.write().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;

        let mut grade_system = GradeSystem {
            basics: ObjectBasics::new(self.minter.mint("grading.GradeSystem"), "GradeSystem"),
            gradebook_id: resolved,
            based_on_grades: false,
            highest_numeric_score: None,
            lowest_numeric_score: None,
            numeric_score_increment: None,
            grades: Vec::new(),
        };
        apply_grade_system_form(&mut grade_system, &form);

        store.grade_systems.push(grade_system.clone());
        tracing::debug!(
            "Created grade system {} (based on grades: {})",
            grade_system.basics.id,
            grade_system.based_on_grades
        );
        Ok(grade_system)
    }

    async fn update_grade_system(
        &self,
        gradebook_id: &Id,
        form: GradeSystemForm,
    ) -> Result<GradeSystem> {
        let form_id = form.id.as_ref().ok_or_else(|| {
            ServiceError::invalid_argument("form is not a grade system update form")
        })?;
        form.validate_numeric_settings()?;

        let mut store = self.store.write().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        let index = store.grade_system_index(&resolved, form_id)?;

        let grade_system = &mut store.grade_systems[index];
        apply_grade_system_form(grade_system, &form);
        Ok(grade_system.clone())
    }

    async fn delete_grade_system(&self, gradebook_id: &Id, grade_system_id: &Id) -> Result<()> {
        let mut store = self.store.write().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        let index = store.grade_system_index(&resolved, grade_system_id)?;

        if store
            .columns
            .iter()
            .any(|c| c.gradebook_id == resolved && &c.grade_system_id == grade_system_id)
        {
            return Err(ServiceError::illegal_state(format!(
                "grade system {} is used by a gradebook column",
                grade_system_id
            )));
        }

        store.grade_systems.remove(index);
        Ok(())
    }

    async fn grade_form_for_create(
        &self,
        gradebook_id: &Id,
        grade_system_id: &Id,
    ) -> Result<GradeForm> {
        let grade_system = self.grade_system(gradebook_id, grade_system_id).await?;
        if !grade_system.is_based_on_grades() {
            return Err(ServiceError::illegal_state(format!(
                "grade system {} is not based on grades",
                grade_system_id
            )));
        }
        Ok(GradeForm::for_create(grade_system.basics.id))
    }

    async fn create_grade(&self, gradebook_id: &Id, form: GradeForm) -> Result<Grade> {
        let mut store = self.store.write().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        let index = store.grade_system_index(&resolved, &form.grade_system_id)?;

        let mut basics = ObjectBasics::new(self.minter.mint("grading.Grade"), "Grade");
        form.basics.apply_to(&mut basics);
        let grade = Grade {
            basics,
            grade_system_id: form.grade_system_id,
            input_score_start_range: form.input_score_start_range,
            input_score_end_range: form.input_score_end_range,
            output_score: form.output_score,
        };

        store.grade_systems[index].grades.push(grade.clone());
        Ok(grade)
    }

    async fn delete_grade(&self, gradebook_id: &Id, grade_id: &Id) -> Result<()> {
        let mut store = self.store.write().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;

        let grade_system = store
            .grade_systems
            .iter_mut()
            .filter(|s| s.gradebook_id == resolved)
            .find(|s| s.grade(grade_id).is_some())
            .ok_or_else(|| ServiceError::not_found(format!("grade {}", grade_id)))?;

        grade_system.grades.retain(|g| &g.basics.id != grade_id);
        Ok(())
    }

    async fn gradebook_columns(&self, gradebook_id: &Id) -> Result<Vec<GradebookColumn>> {
        let store = self.store.read().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        Ok(store
            .columns
            .iter()
            .filter(|c| c.gradebook_id == resolved)
            .cloned()
            .collect())
    }

    async fn gradebook_column(&self, gradebook_id: &Id, column_id: &Id) -> Result<GradebookColumn> {
        let store = self.store.read().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        let index = store.column_index(&resolved, column_id)?;
        Ok(store.columns[index].clone())
    }

    async fn column_form_for_create(&self, gradebook_id: &Id) -> Result<ColumnForm> {
        self.store.read().await.resolve_gradebook(gradebook_id)?;
        Ok(ColumnForm::default())
    }

    async fn column_form_for_update(&self, gradebook_id: &Id, column_id: &Id) -> Result<ColumnForm> {
        let column = self.gradebook_column(gradebook_id, column_id).await?;
        Ok(ColumnForm::for_update(&column))
    }

    async fn create_gradebook_column(
        &self,
        gradebook_id: &Id,
        form: ColumnForm,
    ) -> Result<GradebookColumn> {
        if form.id.is_some() {
            return Err(ServiceError::invalid_argument(
                "form is not a gradebook column create form",
            ));
        }
        let grade_system_id = form
            .grade_system_id
            .clone()
            .ok_or_else(|| ServiceError::null_argument("gradebook column needs a grade system"))?;

        let mut store = self.store.write().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        store.grade_system_index(&resolved, &grade_system_id)?;

        let mut basics =
            ObjectBasics::new(self.minter.mint("grading.GradebookColumn"), "GradebookColumn");
        form.basics.apply_to(&mut basics);
        let column = GradebookColumn {
            basics,
            gradebook_id: resolved,
            grade_system_id,
        };

        store.columns.push(column.clone());
        tracing::debug!("Created gradebook column {}", column.basics.id);
        Ok(column)
    }

    async fn update_gradebook_column(
        &self,
        gradebook_id: &Id,
        form: ColumnForm,
    ) -> Result<GradebookColumn> {
        let form_id = form.id.as_ref().ok_or_else(|| {
            ServiceError::invalid_argument("form is not a gradebook column update form")
        })?;

        let mut store = self.store.write().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        let index = store.column_index(&resolved, form_id)?;

        if let Some(grade_system_id) = &form.grade_system_id {
            store.grade_system_index(&resolved, grade_system_id)?;
            let has_entries = store
                .entries
                .iter()
                .any(|e| &e.gradebook_column_id == form_id);
            if has_entries && &store.columns[index].grade_system_id != grade_system_id {
                return Err(ServiceError::illegal_state(format!(
                    "gradebook column {} already has entries",
                    form_id
                )));
            }
        }

        let column = &mut store.columns[index];
        form.basics.apply_to(&mut column.basics);
        if let Some(grade_system_id) = &form.grade_system_id {
            column.grade_system_id = grade_system_id.clone();
        }
        Ok(column.clone())
    }

    async fn delete_gradebook_column(&self, gradebook_id: &Id, column_id: &Id) -> Result<()> {
        let mut store = self.store.write().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        let index = store.column_index(&resolved, column_id)?;

        if store
            .entries
            .iter()
            .any(|e| &e.gradebook_column_id == column_id)
        {
            return Err(ServiceError::illegal_state(format!(
                "gradebook column {} still has grade entries",
                column_id
            )));
        }

        store.columns.remove(index);
        Ok(())
    }

    async fn grade_entries(&self, gradebook_id: &Id) -> Result<Vec<GradeEntry>> {
        let store = self.store.read().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        Ok(store
            .entries
            .iter()
            .filter(|e| e.gradebook_id == resolved)
            .cloned()
            .collect())
    }

    async fn grade_entries_for_column(
        &self,
        gradebook_id: &Id,
        column_id: &Id,
    ) -> Result<Vec<GradeEntry>> {
        let store = self.store.read().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        Ok(store
            .entries
            .iter()
            .filter(|e| e.gradebook_id == resolved && &e.gradebook_column_id == column_id)
            .cloned()
            .collect())
    }

    async fn grade_entry(&self, gradebook_id: &Id, entry_id: &Id) -> Result<GradeEntry> {
        let store = self.store.read().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        let index = store.entry_index(&resolved, entry_id)?;
        Ok(store.entries[index].clone())
    }

    async fn entry_form_for_create(
        &self,
        gradebook_id: &Id,
        column_id: &Id,
        resource_id: &Id,
    ) -> Result<EntryForm> {
        let column = self.gradebook_column(gradebook_id, column_id).await?;
        Ok(EntryForm::for_create(column.basics.id, resource_id.clone()))
    }

    async fn entry_form_for_update(&self, gradebook_id: &Id, entry_id: &Id) -> Result<EntryForm> {
        let entry = self.grade_entry(gradebook_id, entry_id).await?;
        Ok(EntryForm::for_update(&entry))
    }

    async fn create_grade_entry(&self, gradebook_id: &Id, form: EntryForm) -> Result<GradeEntry> {
        if form.id.is_some() {
            return Err(ServiceError::invalid_argument(
                "form is not a grade entry create form",
            ));
        }

        let mut store = self.store.write().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        store.validate_entry(&resolved, &form)?;

        let mut basics = ObjectBasics::new(self.minter.mint("grading.GradeEntry"), "GradeEntry");
        form.basics.apply_to(&mut basics);
        let entry = GradeEntry {
            basics,
            gradebook_id: resolved,
            gradebook_column_id: form.column_id,
            key_resource_id: form.resource_id,
            grade_id: form.grade_id,
            score: form.score,
            ignored_for_calculations: form.ignored_for_calculations,
            grading_agent_id: self.proxy.agent_id.clone(),
            time_graded: Utc::now(),
        };

        store.entries.push(entry.clone());
        tracing::debug!(
            "Created grade entry {} in column {}",
            entry.basics.id,
            entry.gradebook_column_id
        );
        Ok(entry)
    }

    async fn update_grade_entry(&self, gradebook_id: &Id, form: EntryForm) -> Result<GradeEntry> {
        let form_id = form.id.as_ref().ok_or_else(|| {
            ServiceError::invalid_argument("form is not a grade entry update form")
        })?;

        let mut store = self.store.write().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        let index = store.entry_index(&resolved, form_id)?;
        store.validate_entry(&resolved, &form)?;

        let agent_id = self.proxy.agent_id.clone();
        let entry = &mut store.entries[index];
        form.basics.apply_to(&mut entry.basics);
        entry.grade_id = form.grade_id.clone();
        entry.score = form.score;
        entry.ignored_for_calculations = form.ignored_for_calculations;
        entry.grading_agent_id = agent_id;
        entry.time_graded = Utc::now();
        Ok(entry.clone())
    }

    async fn delete_grade_entry(&self, gradebook_id: &Id, entry_id: &Id) -> Result<()> {
        let mut store = self.store.write().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        let index = store.entry_index(&resolved, entry_id)?;
        store.entries.remove(index);
        Ok(())
    }

    async fn gradebook_column_summary(
        &self,
        gradebook_id: &Id,
        column_id: &Id,
    ) -> Result<ColumnSummary> {
        let store = self.store.read().await;
        let resolved = store.resolve_gradebook(gradebook_id)?;
        store.column_index(&resolved, column_id)?;

        let values: Vec<f64> = store
            .entries
            .iter()
            .filter(|e| &e.gradebook_column_id == column_id && !e.ignored_for_calculations)
            .filter_map(|e| store.entry_value(e))
            .collect();

        Ok(ColumnSummary::from_values(&values))
    }
}
