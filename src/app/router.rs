use crate::app::handlers::{commenting, grading, misc};
use crate::app::state::AppState;
use axum::routing::get;
use axum::{middleware, Router};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1/commenting", commenting_routes())
        .nest("/api/v1/grading", grading_routes())
        .route("/version", get(misc::version))
        .fallback(misc::fallback)
        .layer(middleware::from_fn(misc::log_requests))
        .with_state(state)
}

fn commenting_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/books",
            get(commenting::list_books).post(commenting::create_book),
        )
        .route(
            "/books/{book_id}",
            get(commenting::get_book)
                .put(commenting::update_book)
                .delete(commenting::delete_book),
        )
        .route(
            "/books/{book_id}/comments",
            get(commenting::list_comments).post(commenting::create_comment),
        )
        .route(
            "/books/{book_id}/comments/{comment_id}",
            get(commenting::get_comment)
                .put(commenting::update_comment)
                .delete(commenting::delete_comment),
        )
}

fn grading_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/gradebooks",
            get(grading::list_gradebooks).post(grading::create_gradebook),
        )
        .route(
            "/gradebooks/{gradebook_id}",
            get(grading::get_gradebook)
                .put(grading::update_gradebook)
                .delete(grading::delete_gradebook),
        )
        .route(
            "/gradebooks/{gradebook_id}/gradesystems",
            get(grading::list_grade_systems).post(grading::create_grade_system),
        )
        .route(
            "/gradebooks/{gradebook_id}/gradesystems/{grade_system_id}",
            get(grading::get_grade_system)
                .put(grading::update_grade_system)
                .delete(grading::delete_grade_system),
        )
        .route(
            "/gradebooks/{gradebook_id}/columns",
            get(grading::list_columns).post(grading::create_column),
        )
        .route(
            "/gradebooks/{gradebook_id}/columns/{column_id}",
            get(grading::get_column)
                .put(grading::update_column)
                .delete(grading::delete_column),
        )
        .route(
            "/gradebooks/{gradebook_id}/columns/{column_id}/entries",
            get(grading::list_column_entries).post(grading::create_column_entry),
        )
        .route(
            "/gradebooks/{gradebook_id}/columns/{column_id}/summary",
            get(grading::column_summary),
        )
        .route(
            "/gradebooks/{gradebook_id}/entries",
            get(grading::list_gradebook_entries).post(grading::create_gradebook_entry),
        )
        .route(
            "/gradebooks/{gradebook_id}/entries/{entry_id}",
            get(grading::get_entry)
                .put(grading::update_entry)
                .delete(grading::delete_entry),
        )
}
