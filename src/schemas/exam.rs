use serde::{Deserialize, Serialize};
use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
    PrimitiveDateTime,
};
use validator::Validate;

use crate::core::time::format_primitive;
use crate::db::models::Exam;

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ExamCreate {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub(crate) description: String,
    pub(crate) candidate_id: i64,
    #[validate(length(min = 1, message = "candidate_name must not be empty"))]
    pub(crate) candidate_name: String,
    pub(crate) date: String,
    #[validate(length(min = 1, message = "location_name must not be empty"))]
    pub(crate) location_name: String,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub(crate) latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    pub(crate) longitude: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ExamUpdate {
    #[serde(default)]
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub(crate) title: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub(crate) description: Option<String>,
    #[serde(default)]
    pub(crate) candidate_id: Option<i64>,
    #[serde(default)]
    #[validate(length(min = 1, message = "candidate_name must not be empty"))]
    pub(crate) candidate_name: Option<String>,
    #[serde(default)]
    pub(crate) date: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "location_name must not be empty"))]
    pub(crate) location_name: Option<String>,
    #[serde(default)]
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub(crate) latitude: Option<f64>,
    #[serde(default)]
    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    pub(crate) longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExamResponse {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) candidate_id: i64,
    pub(crate) candidate_name: String,
    pub(crate) date: String,
    pub(crate) location_name: String,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl ExamResponse {
    pub(crate) fn from_db(exam: Exam) -> Self {
        Self {
            id: exam.id,
            title: exam.title,
            description: exam.description,
            candidate_id: exam.candidate_id,
            candidate_name: exam.candidate_name,
            date: exam.date,
            location_name: exam.location_name,
            latitude: exam.latitude,
            longitude: exam.longitude,
            created_at: format_primitive(exam.created_at),
            updated_at: format_primitive(exam.updated_at),
        }
    }
}

/// Wire shape of the read routes (list, single-record read, search). These
/// went through a resource layer in the original API, which camelCases its
/// keys and drops the timestamps; create and update echo the bare stored
/// record ([`ExamResponse`]) instead.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExamResource {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) candidate_id: i64,
    pub(crate) candidate_name: String,
    pub(crate) date: String,
    pub(crate) location_name: String,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
}

impl ExamResource {
    pub(crate) fn from_db(exam: Exam) -> Self {
        Self {
            id: exam.id,
            title: exam.title,
            description: exam.description,
            candidate_id: exam.candidate_id,
            candidate_name: exam.candidate_name,
            date: exam.date,
            location_name: exam.location_name,
            latitude: exam.latitude,
            longitude: exam.longitude,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ExamItem {
    pub(crate) exam: ExamResource,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExamList {
    pub(crate) exams: Vec<ExamResource>,
}

/// Booking dates arrive as free-form text from several client versions.
/// Accept the formats seen in the wild and reject everything else.
pub(crate) fn is_plausible_exam_date(raw: &str) -> bool {
    if OffsetDateTime::parse(raw, &Rfc3339).is_ok() {
        return true;
    }

    if PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )
    .is_ok()
    {
        return true;
    }
    if PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .is_ok()
    {
        return true;
    }
    if Date::parse(raw, &format_description!("[year]-[month]-[day]")).is_ok() {
        return true;
    }

    if PrimitiveDateTime::parse(
        raw,
        &format_description!("[month]/[day]/[year] [hour]:[minute]:[second]"),
    )
    .is_ok()
    {
        return true;
    }
    if Date::parse(raw, &format_description!("[month]/[day]/[year]")).is_ok() {
        return true;
    }

    false
}
