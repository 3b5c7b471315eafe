use super::{clean_id, success};
use crate::app::context::RequestContext;
use crate::app::state::AppState;
use crate::core::payload::Payload;
use crate::domain::model::{Book, Comment};
use crate::domain::ports::{CommentQuery, CommentingManager};
use crate::utils::error::Result;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

async fn manager(state: &AppState, ctx: &RequestContext) -> Result<Arc<dyn CommentingManager>> {
    state.runtime.commenting_manager(&ctx.proxy).await
}

pub async fn list_books(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> Result<Json<Vec<Book>>> {
    let cm = manager(&state, &ctx).await?;
    Ok(Json(cm.books().await?))
}

pub async fn create_book(
    State(state): State<AppState>,
    ctx: RequestContext,
    body: Bytes,
) -> Result<Json<Book>> {
    let cm = manager(&state, &ctx).await?;
    let mut form = cm.book_form_for_create().await?;
    let data = Payload::from_body(&body)?;

    data.set_form_basics(&mut form, ctx.locale())?;
    let book = cm.create_book(form).await?;

    if data.contains("aliasId") {
        cm.alias_book(&book.basics.id, &data.id("aliasId")?).await?;
    }

    tracing::info!("Created book {}", book.basics.id);
    Ok(Json(book))
}

pub async fn get_book(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(book_id): Path<String>,
) -> Result<Json<Book>> {
    let cm = manager(&state, &ctx).await?;
    Ok(Json(cm.book(&clean_id(&book_id)?).await?))
}

pub async fn update_book(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(book_id): Path<String>,
    body: Bytes,
) -> Result<Json<Book>> {
    let cm = manager(&state, &ctx).await?;
    let data = Payload::from_body(&body)?;

    let mut form = cm.book_form_for_update(&clean_id(&book_id)?).await?;
    data.verify_at_least_one_key_present(&["name", "description", "displayName"])?;

    data.set_form_basics(&mut form, ctx.locale())?;
    let updated = cm.update_book(form).await?;

    if data.contains("aliasId") {
        cm.alias_book(&updated.basics.id, &data.id("aliasId")?).await?;
    }

    Ok(Json(updated))
}

pub async fn delete_book(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(book_id): Path<String>,
) -> Result<Json<Value>> {
    let cm = manager(&state, &ctx).await?;
    cm.delete_book(&clean_id(&book_id)?).await?;
    tracing::info!("Deleted book {}", book_id);
    Ok(success())
}

fn comment_query(inputs: &Payload) -> Result<CommentQuery> {
    let mut query = CommentQuery::default();
    if inputs.contains("genusTypeId") {
        query.genus_type_id = Some(inputs.id("genusTypeId")?);
    }
    if inputs.contains("referenceId") {
        query.reference_id = Some(inputs.id("referenceId")?);
    }
    if inputs.contains("commentorId") {
        query.commentor_id = Some(inputs.id("commentorId")?);
    }
    Ok(query)
}

pub async fn list_comments(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(book_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<Comment>>> {
    let cm = manager(&state, &ctx).await?;
    let book = cm.book(&clean_id(&book_id)?).await?;

    let query = comment_query(&Payload::from_query(params))?;
    let comments = if query.is_empty() {
        cm.comments(&book.basics.id).await?
    } else {
        tracing::debug!("Querying comments in book {}: {:?}", book.basics.id, query);
        cm.comments_by_query(&book.basics.id, &query).await?
    };

    Ok(Json(comments))
}

pub async fn create_comment(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(book_id): Path<String>,
    body: Bytes,
) -> Result<Json<Comment>> {
    let cm = manager(&state, &ctx).await?;
    let book = cm.book(&clean_id(&book_id)?).await?;

    let data = Payload::from_body(&body)?;
    data.verify_keys_present(&["referenceId", "text"])?;

    let mut form = cm
        .comment_form_for_create(&book.basics.id, &data.id("referenceId")?)
        .await?;
    data.set_form_basics(&mut form, ctx.locale())?;
    form.set_text(data.display_text("text", ctx.locale())?);

    let comment = cm.create_comment(&book.basics.id, form).await?;
    Ok(Json(comment))
}

pub async fn get_comment(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((book_id, comment_id)): Path<(String, String)>,
) -> Result<Json<Comment>> {
    let cm = manager(&state, &ctx).await?;
    let book = cm.book(&clean_id(&book_id)?).await?;
    Ok(Json(cm.comment(&book.basics.id, &clean_id(&comment_id)?).await?))
}

pub async fn update_comment(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((book_id, comment_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Comment>> {
    let cm = manager(&state, &ctx).await?;
    let data = Payload::from_body(&body)?;
    data.verify_at_least_one_key_present(&["name", "displayName", "description", "text"])?;

    let book = cm.book(&clean_id(&book_id)?).await?;
    let comment = cm.comment(&book.basics.id, &clean_id(&comment_id)?).await?;

    let mut form = cm
        .comment_form_for_update(&book.basics.id, &comment.basics.id)
        .await?;
    data.set_form_basics(&mut form, ctx.locale())?;
    if data.contains("text") {
        form.set_text(data.display_text("text", ctx.locale())?);
    }

    cm.update_comment(&book.basics.id, form).await?;

    Ok(Json(cm.comment(&book.basics.id, &comment.basics.id).await?))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path((book_id, comment_id)): Path<(String, String)>,
) -> Result<Json<Value>> {
    let cm = manager(&state, &ctx).await?;
    let book = cm.book(&clean_id(&book_id)?).await?;
    cm.delete_comment(&book.basics.id, &clean_id(&comment_id)?)
        .await?;
    Ok(success())
}
