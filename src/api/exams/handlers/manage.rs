use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::extract::Json;
use crate::api::gates::{self, Action};
use crate::api::guards::CurrentUser;
use crate::api::validation;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::models::Exam;
use crate::repositories;
use crate::schemas::exam::{
    is_plausible_exam_date, ExamItem, ExamResource, ExamResponse, ExamUpdate,
};

pub(in crate::api::exams) async fn get_exam(
    axum::extract::Path(exam_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<ExamItem>, ApiError> {
    let exam = load_exam(&state, &exam_id).await?;
    gates::authorize(Action::ViewExam, &user, Some(&exam))?;

    Ok(Json(ExamItem { exam: ExamResource::from_db(exam) }))
}

pub(in crate::api::exams) async fn update_exam(
    axum::extract::Path(exam_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<ExamUpdate>,
) -> Result<Json<ExamResponse>, ApiError> {
    let exam = load_exam(&state, &exam_id).await?;
    gates::authorize(Action::UpdateExam, &user, Some(&exam))?;

    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if let Some(date) = payload.date.as_deref() {
        if !is_plausible_exam_date(date) {
            return Err(ApiError::BadRequest("date must be a valid date or datetime".to_string()));
        }
    }

    repositories::exams::update(
        state.db(),
        exam.id,
        repositories::exams::UpdateExam {
            title: payload.title,
            description: payload.description,
            candidate_id: payload.candidate_id,
            candidate_name: payload.candidate_name,
            date: payload.date,
            location_name: payload.location_name,
            latitude: payload.latitude,
            longitude: payload.longitude,
            updated_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to update exam"))?;

    let updated = repositories::exams::fetch_one_by_id(state.db(), exam.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch exam"))?;

    Ok(Json(ExamResponse::from_db(updated)))
}

pub(in crate::api::exams) async fn delete_exam(
    axum::extract::Path(exam_id): axum::extract::Path<String>,
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
) -> Result<Json<u64>, ApiError> {
    let exam = load_exam(&state, &exam_id).await?;
    gates::authorize(Action::DeleteExam, &user, Some(&exam))?;

    // The body is the number of deleted rows, as the store reports it.
    let deleted = repositories::exams::delete_by_id(state.db(), exam.id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to delete exam"))?;

    Ok(Json(deleted))
}

async fn load_exam(state: &AppState, raw_id: &str) -> Result<Exam, ApiError> {
    let id = validation::parse_id(raw_id)?;

    let exam = repositories::exams::find_by_id(state.db(), id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to fetch exam"))?;

    exam.ok_or_else(ApiError::not_found)
}
