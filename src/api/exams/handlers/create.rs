use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::extract::Json;
use crate::api::gates::{self, Action};
use crate::api::guards::CurrentUser;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::repositories;
use crate::schemas::exam::{is_plausible_exam_date, ExamCreate, ExamResponse};

const DUPLICATE_BOOKING: &str = "Candidate is already booked in for an exam at this time.";

pub(in crate::api::exams) async fn create_exam(
    CurrentUser(user): CurrentUser,
    state: axum::extract::State<AppState>,
    Json(payload): Json<ExamCreate>,
) -> Result<(axum::http::StatusCode, Json<ExamResponse>), ApiError> {
    gates::authorize(Action::CreateExam, &user, None)?;

    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    if !is_plausible_exam_date(&payload.date) {
        return Err(ApiError::BadRequest("date must be a valid date or datetime".to_string()));
    }

    let duplicate = repositories::exams::find_duplicate_booking(
        state.db(),
        &payload.candidate_name,
        &payload.date,
        &payload.description,
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to check existing bookings"))?;

    if duplicate.is_some() {
        return Err(ApiError::BadRequest(DUPLICATE_BOOKING.to_string()));
    }

    let now = primitive_now_utc();
    let exam = repositories::exams::create(
        state.db(),
        repositories::exams::CreateExam {
            title: &payload.title,
            description: &payload.description,
            candidate_id: payload.candidate_id,
            candidate_name: &payload.candidate_name,
            date: &payload.date,
            location_name: &payload.location_name,
            latitude: payload.latitude,
            longitude: payload.longitude,
            created_at: now,
            updated_at: now,
        },
    )
    .await
    .map_err(|e| ApiError::internal(e, "Failed to create exam"))?;

    Ok((axum::http::StatusCode::CREATED, Json(ExamResponse::from_db(exam))))
}
