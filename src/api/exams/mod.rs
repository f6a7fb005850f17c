mod handlers;
mod queries;

use axum::{routing::get, Router};

use crate::core::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_exams).post(handlers::create_exam))
        .route("/search/:name", get(handlers::search_exams))
        .route(
            "/:exam_id",
            get(handlers::get_exam).put(handlers::update_exam).delete(handlers::delete_exam),
        )
}

#[cfg(test)]
mod tests;
