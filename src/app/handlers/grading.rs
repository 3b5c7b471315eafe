use super::{clean_id, success};
use crate::app::context::RequestContext;
use crate::app::state::AppState;
use crate::core::grading::{
    add_grades_to_grade_system, check_grade_inputs, check_numeric_score_inputs,
    has_score_settings, parse_grade_inputs, score_setting,
    validate_score_and_grades_against_system,
};
use crate::core::payload::Payload;
use crate::domain::model::{GradeEntry, GradeSystem, Gradebook, GradebookColumn};
use crate::domain::ports::GradingManager;
use crate::domain::summary::ColumnSummary;
use crate::utils::error::Result;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

async fn manager(state: &AppState, ctx: &RequestContext) -> Result<Arc<dyn GradingManager>> {
    state.runtime.grading_manager(&ctx.proxy).await
}

// Gradebooks

pub async fn list_gradebooks(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Vec<Gradebook>>> {
    let gm = manager(&state, &ctx).await?;
    Ok(Json(gm.gradebooks().await?))
}

pub async fn create_gradebook(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Bytes,
) -> Result<Json<Gradebook>> {
    let gm = manager(&state, &ctx).await?;
    let mut form = gm.gradebook_form_for_create().await?;
    let data = Payload::from_body(&body)?;

    data.set_form_basics(&mut form, ctx.locale())?;
    let gradebook = gm.create_gradebook(form).await?;

    if data.contains("aliasId") {
        gm.alias_gradebook(&gradebook.basics.id, &data.id("aliasId")?)
            .await?;
    }

    tracing::info!("Created gradebook {}", gradebook.basics.id);
    Ok(Json(gradebook))
}

pub async fn get_gradebook(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(gradebook_id): Path<String>,
) -> Result<Json<Gradebook>> {
    let gm = manager(&state, &ctx).await?;
    Ok(Json(gm.gradebook(&clean_id(&gradebook_id)?).await?))
}

pub async fn update_gradebook(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(gradebook_id): Path<String>,
    body: Bytes,
) -> Result<Json<Gradebook>> {
    let gm = manager(&state, &ctx).await?;
    let data = Payload::from_body(&body)?;

    let mut form = gm
        .gradebook_form_for_update(&clean_id(&gradebook_id)?)
        .await?;
    data.verify_at_least_one_key_present(&["name", "description", "displayName"])?;

    data.set_form_basics(&mut form, ctx.locale())?;
    let updated = gm.update_gradebook(form).await?;

    if data.contains("aliasId") {
        gm.alias_gradebook(&updated.basics.id, &data.id("aliasId")?)
            .await?;
    }

    Ok(Json(updated))
}

pub async fn delete_gradebook(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(gradebook_id): Path<String>,
) -> Result<Json<Value>> {
    let gm = manager(&state, &ctx).await?;
    gm.delete_gradebook(&clean_id(&gradebook_id)?).await?;
    tracing::info!("Deleted gradebook {}", gradebook_id);
    Ok(success())
}

// Grade systems

const GRADE_SYSTEM_UPDATE_KEYS: [&str; 11] = [
    "name",
    "displayName",
    "description",
    "basedOnGrades",
    "grades",
    "highestNumericScore",
    "lowestNumericScore",
    "numericScoreIncrement",
    "highestScore",
    "lowestScore",
    "scoreIncrement",
];

pub async fn list_grade_systems(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(gradebook_id): Path<String>,
) -> Result<Json<Vec<GradeSystem>>> {
    let gm = manager(&state, &ctx).await?;
    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    Ok(Json(gm.grade_systems(&gradebook.basics.id).await?))
}

pub async fn create_grade_system(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(gradebook_id): Path<String>,
    body: Bytes,
) -> Result<Json<GradeSystem>> {
    let gm = manager(&state, &ctx).await?;
    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    let gb = &gradebook.basics.id;

    let mut form = gm.grade_system_form_for_create(gb).await?;
    let data = Payload::from_body(&body)?;
    data.set_form_basics(&mut form, ctx.locale())?;

    if data.contains("basedOnGrades") {
        form.set_based_on_grades(data.boolean("basedOnGrades")?);
    }

    let grades = if form.based_on_grades {
        Some(parse_grade_inputs(check_grade_inputs(&data)?, ctx.locale())?)
    } else {
        check_numeric_score_inputs(&data)?;
        form.set_highest_numeric_score(data.float("highestNumericScore")?);
        form.set_lowest_numeric_score(data.float("lowestNumericScore")?);
        form.set_numeric_score_increment(data.float("numericScoreIncrement")?);
        None
    };

    let grade_system = gm.create_grade_system(gb, form).await?;
    let grade_system_id = grade_system.basics.id;

    if let Some(grades) = grades {
        if let Err(err) = add_grades_to_grade_system(gm.as_ref(), gb, &grade_system_id, &grades)
            .await
        {
            // leave nothing half-built behind
            if let Err(cleanup) = gm.delete_grade_system(gb, &grade_system_id).await {
                tracing::warn!(
                    "Failed to remove grade system {} after error: {}",
                    grade_system_id,
                    cleanup
                );
            }
            return Err(err);
        }
    }

    tracing::info!("Created grade system {}", grade_system_id);
    Ok(Json(gm.grade_system(gb, &grade_system_id).await?))
}

pub async fn get_grade_system(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((gradebook_id, grade_system_id)): Path<(String, String)>,
) -> Result<Json<GradeSystem>> {
    let gm = manager(&state, &ctx).await?;
    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    Ok(Json(
        gm.grade_system(&gradebook.basics.id, &clean_id(&grade_system_id)?)
            .await?,
    ))
}

pub async fn update_grade_system(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((gradebook_id, grade_system_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<GradeSystem>> {
    let gm = manager(&state, &ctx).await?;
    let data = Payload::from_body(&body)?;
    data.verify_at_least_one_key_present(&GRADE_SYSTEM_UPDATE_KEYS)?;

    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    let gb = &gradebook.basics.id;
    let grade_system = gm.grade_system(gb, &clean_id(&grade_system_id)?).await?;
    let mut form = gm
        .grade_system_form_for_update(gb, &grade_system.basics.id)
        .await?;
    data.set_form_basics(&mut form, ctx.locale())?;

    if data.contains("basedOnGrades") {
        form.set_based_on_grades(data.boolean("basedOnGrades")?);
        if form.based_on_grades {
            form.clear_numeric_scores();
        }
    }

    let replacement_grades = if form.based_on_grades && data.contains("grades") {
        parse_grade_inputs(check_grade_inputs(&data)?, ctx.locale())?
    } else {
        Vec::new()
    };

    if !form.based_on_grades && has_score_settings(&data) {
        if let Some(score) = score_setting(&data, "highestNumericScore")? {
            form.set_highest_numeric_score(score);
        }
        if let Some(score) = score_setting(&data, "lowestNumericScore")? {
            form.set_lowest_numeric_score(score);
        }
        if let Some(increment) = score_setting(&data, "numericScoreIncrement")? {
            form.set_numeric_score_increment(increment);
        }
    }
    form.validate_numeric_settings()?;

    // grades are only touched once the system itself is updated
    let updated = gm.update_grade_system(gb, form).await?;

    let drop_grades = !updated.based_on_grades || !replacement_grades.is_empty();
    if drop_grades {
        for grade in &updated.grades {
            gm.delete_grade(gb, &grade.basics.id).await?;
        }
    }
    add_grades_to_grade_system(gm.as_ref(), gb, &updated.basics.id, &replacement_grades)
        .await?;

    Ok(Json(gm.grade_system(gb, &updated.basics.id).await?))
}

pub async fn delete_grade_system(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((gradebook_id, grade_system_id)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let gm = manager(&state, &ctx).await?;
    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    gm.delete_grade_system(&gradebook.basics.id, &clean_id(&grade_system_id)?)
        .await?;
    Ok(success())
}

// Gradebook columns

pub async fn list_columns(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(gradebook_id): Path<String>,
) -> Result<Json<Vec<GradebookColumn>>> {
    let gm = manager(&state, &ctx).await?;
    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    Ok(Json(gm.gradebook_columns(&gradebook.basics.id).await?))
}

pub async fn create_column(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(gradebook_id): Path<String>,
    body: Bytes,
) -> Result<Json<GradebookColumn>> {
    let gm = manager(&state, &ctx).await?;
    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    let gb = &gradebook.basics.id;

    let data = Payload::from_body(&body)?;
    data.verify_keys_present(&["gradeSystemId"])?;
    let grade_system = gm.grade_system(gb, &data.id("gradeSystemId")?).await?;

    let mut form = gm.column_form_for_create(gb).await?;
    data.set_form_basics(&mut form, ctx.locale())?;
    form.set_grade_system(grade_system.basics.id);

    Ok(Json(gm.create_gradebook_column(gb, form).await?))
}

pub async fn get_column(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((gradebook_id, column_id)): Path<(String, String)>,
) -> Result<Json<GradebookColumn>> {
    let gm = manager(&state, &ctx).await?;
    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    Ok(Json(
        gm.gradebook_column(&gradebook.basics.id, &clean_id(&column_id)?)
            .await?,
    ))
}

pub async fn update_column(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((gradebook_id, column_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<GradebookColumn>> {
    let gm = manager(&state, &ctx).await?;
    let data = Payload::from_body(&body)?;
    data.verify_at_least_one_key_present(&["name", "displayName", "description", "gradeSystemId"])?;

    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    let gb = &gradebook.basics.id;
    let column = gm.gradebook_column(gb, &clean_id(&column_id)?).await?;

    let mut form = gm.column_form_for_update(gb, &column.basics.id).await?;
    data.set_form_basics(&mut form, ctx.locale())?;
    if data.contains("gradeSystemId") {
        form.set_grade_system(data.id("gradeSystemId")?);
    }

    gm.update_gradebook_column(gb, form).await?;

    Ok(Json(gm.gradebook_column(gb, &column.basics.id).await?))
}

pub async fn delete_column(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((gradebook_id, column_id)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let gm = manager(&state, &ctx).await?;
    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    gm.delete_gradebook_column(&gradebook.basics.id, &clean_id(&column_id)?)
        .await?;
    Ok(success())
}

pub async fn column_summary(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((gradebook_id, column_id)): Path<(String, String)>,
) -> Result<Json<ColumnSummary>> {
    let gm = manager(&state, &ctx).await?;
    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    let gb = &gradebook.basics.id;
    let column_id = clean_id(&column_id)?;

    let entries = gm.grade_entries_for_column(gb, &column_id).await?;
    let summary = if entries.is_empty() {
        ColumnSummary::empty()
    } else {
        gm.gradebook_column_summary(gb, &column_id).await?
    };

    Ok(Json(summary))
}

// Grade entries

const ENTRY_UPDATE_KEYS: [&str; 6] = [
    "name",
    "displayName",
    "description",
    "grade",
    "score",
    "ignoredForCalculations",
];

pub async fn list_gradebook_entries(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(gradebook_id): Path<String>,
) -> Result<Json<Vec<GradeEntry>>> {
    let gm = manager(&state, &ctx).await?;
    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    Ok(Json(gm.grade_entries(&gradebook.basics.id).await?))
}

pub async fn list_column_entries(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((gradebook_id, column_id)): Path<(String, String)>,
) -> Result<Json<Vec<GradeEntry>>> {
    let gm = manager(&state, &ctx).await?;
    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    Ok(Json(
        gm.grade_entries_for_column(&gradebook.basics.id, &clean_id(&column_id)?)
            .await?,
    ))
}

pub async fn create_gradebook_entry(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(gradebook_id): Path<String>,
    body: Bytes,
) -> Result<Json<GradeEntry>> {
    create_entry(&state, &ctx, &gradebook_id, None, &body).await
}

pub async fn create_column_entry(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((gradebook_id, column_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<GradeEntry>> {
    create_entry(&state, &ctx, &gradebook_id, Some(&column_id), &body).await
}

/// Without a column in the path the payload must name one in `columnId`.
async fn create_entry(
    state: &AppState,
    ctx: &RequestContext,
    gradebook_id: &str,
    column_id: Option<&str>,
    body: &[u8],
) -> Result<Json<GradeEntry>> {
    let gm = manager(state, ctx).await?;

    let data = Payload::from_body(body)?;
    data.verify_at_least_one_key_present(&["grade", "score", "ignoredForCalculations"])?;
    data.verify_keys_present(&["resourceId"])?;
    let column_id = match column_id {
        Some(raw) => clean_id(raw)?,
        None => {
            data.verify_keys_present(&["columnId"])?;
            data.id("columnId")?
        }
    };

    let gradebook = gm.gradebook(&clean_id(gradebook_id)?).await?;
    let gb = &gradebook.basics.id;
    let column = gm.gradebook_column(gb, &column_id).await?;
    let grade_system = gm.grade_system(gb, &column.grade_system_id).await?;

    validate_score_and_grades_against_system(&grade_system, &data)?;

    let mut form = gm
        .entry_form_for_create(gb, &column.basics.id, &data.id("resourceId")?)
        .await?;
    data.set_form_basics(&mut form, ctx.locale())?;
    if data.contains("ignoredForCalculations") {
        form.set_ignored_for_calculations(data.boolean("ignoredForCalculations")?);
    }
    if data.contains("grade") {
        form.set_grade(data.id("grade")?);
    }
    if data.contains("score") {
        form.set_score(data.float("score")?);
    }

    let entry = gm.create_grade_entry(gb, form).await?;
    tracing::info!(
        "Created grade entry {} in column {}",
        entry.basics.id,
        entry.gradebook_column_id
    );
    Ok(Json(entry))
}

pub async fn get_entry(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((gradebook_id, entry_id)): Path<(String, String)>,
) -> Result<Json<GradeEntry>> {
    let gm = manager(&state, &ctx).await?;
    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    Ok(Json(
        gm.grade_entry(&gradebook.basics.id, &clean_id(&entry_id)?)
            .await?,
    ))
}

pub async fn update_entry(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((gradebook_id, entry_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<GradeEntry>> {
    let gm = manager(&state, &ctx).await?;
    let data = Payload::from_body(&body)?;
    data.verify_at_least_one_key_present(&ENTRY_UPDATE_KEYS)?;

    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    let gb = &gradebook.basics.id;
    let entry = gm.grade_entry(gb, &clean_id(&entry_id)?).await?;
    let column = gm.gradebook_column(gb, &entry.gradebook_column_id).await?;
    let grade_system = gm.grade_system(gb, &column.grade_system_id).await?;

    validate_score_and_grades_against_system(&grade_system, &data)?;

    let mut form = gm.entry_form_for_update(gb, &entry.basics.id).await?;
    data.set_form_basics(&mut form, ctx.locale())?;
    if data.contains("grade") {
        form.set_grade(data.id("grade")?);
    }
    if data.contains("score") {
        form.set_score(data.float("score")?);
    }
    if data.contains("ignoredForCalculations") {
        form.set_ignored_for_calculations(data.boolean("ignoredForCalculations")?);
    }

    gm.update_grade_entry(gb, form).await?;

    Ok(Json(gm.grade_entry(gb, &entry.basics.id).await?))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((gradebook_id, entry_id)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let gm = manager(&state, &ctx).await?;
    let gradebook = gm.gradebook(&clean_id(&gradebook_id)?).await?;
    gm.delete_grade_entry(&gradebook.basics.id, &clean_id(&entry_id)?)
        .await?;
    Ok(success())
}
