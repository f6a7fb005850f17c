use axum::{extract::Query, Json};

use crate::api::errors::ApiError;
use crate::api::gates::{self, Action};
use crate::api::guards::CurrentUser;
use crate::api::pagination::{page_links, page_meta, ExamPage};
use crate::core::state::AppState;
use crate::repositories;
use crate::schemas::exam::{ExamList, ExamResource};

use super::super::queries::ListExamsQuery;

pub(in crate::api::exams) async fn list_exams(
    Query(params): Query<ListExamsQuery>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<ExamPage>, ApiError> {
    gates::authorize(Action::ViewAllExams, &user, None)?;

    let filter = params.into_filter();

    let total = repositories::exams::count(state.db(), &filter)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to count exams"))?;
    let exams = repositories::exams::list(state.db(), &filter)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to list exams"))?;

    let meta = page_meta(total, filter.page, filter.limit, exams.len());
    let path = format!("{}/exams", state.settings().api().api_prefix);
    let links = page_links(&path, filter.page, meta.last_page);

    Ok(Json(ExamPage {
        exams: exams.into_iter().map(ExamResource::from_db).collect(),
        links,
        meta,
    }))
}

// Candidates look their own bookings up by name before the exam day, so
// this stays reachable without a token.
pub(in crate::api::exams) async fn search_exams(
    axum::extract::Path(name): axum::extract::Path<String>,
    state: axum::extract::State<AppState>,
) -> Result<Json<ExamList>, ApiError> {
    let exams = repositories::exams::search_by_candidate_name(state.db(), &name)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to search exams"))?;

    Ok(Json(ExamList { exams: exams.into_iter().map(ExamResource::from_db).collect() }))
}
