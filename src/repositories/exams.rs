use sqlx::PgPool;
use sqlx::{Postgres, QueryBuilder};
use time::PrimitiveDateTime;

use crate::db::models::Exam;

const COLUMNS: &str = "\
    id, title, description, candidate_id, candidate_name, date, location_name, \
    latitude, longitude, created_at, updated_at";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ListExams {
    pub order: SortOrder,
    pub limit: i64,
    pub page: i64,
    pub location: Option<String>,
    pub date: Option<String>,
}

pub(crate) async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Exam>, sqlx::Error> {
    sqlx::query_as::<_, Exam>(&format!("SELECT {COLUMNS} FROM exams WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub(crate) async fn fetch_one_by_id(pool: &PgPool, id: i64) -> Result<Exam, sqlx::Error> {
    sqlx::query_as::<_, Exam>(&format!("SELECT {COLUMNS} FROM exams WHERE id = $1"))
        .bind(id)
        .fetch_one(pool)
        .await
}

pub(crate) struct CreateExam<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub candidate_id: i64,
    pub candidate_name: &'a str,
    pub date: &'a str,
    pub location_name: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: PrimitiveDateTime,
    pub updated_at: PrimitiveDateTime,
}

pub(crate) async fn create(pool: &PgPool, params: CreateExam<'_>) -> Result<Exam, sqlx::Error> {
    sqlx::query_as::<_, Exam>(&format!(
        "INSERT INTO exams (
            title, description, candidate_id, candidate_name, date,
            location_name, latitude, longitude, created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10)
        RETURNING {COLUMNS}",
    ))
    .bind(params.title)
    .bind(params.description)
    .bind(params.candidate_id)
    .bind(params.candidate_name)
    .bind(params.date)
    .bind(params.location_name)
    .bind(params.latitude)
    .bind(params.longitude)
    .bind(params.created_at)
    .bind(params.updated_at)
    .fetch_one(pool)
    .await
}

pub(crate) struct UpdateExam {
    pub title: Option<String>,
    pub description: Option<String>,
    pub candidate_id: Option<i64>,
    pub candidate_name: Option<String>,
    pub date: Option<String>,
    pub location_name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub updated_at: PrimitiveDateTime,
}

pub(crate) async fn update(pool: &PgPool, id: i64, params: UpdateExam) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE exams SET
            title = COALESCE($1, title),
            description = COALESCE($2, description),
            candidate_id = COALESCE($3, candidate_id),
            candidate_name = COALESCE($4, candidate_name),
            date = COALESCE($5, date),
            location_name = COALESCE($6, location_name),
            latitude = COALESCE($7, latitude),
            longitude = COALESCE($8, longitude),
            updated_at = $9
         WHERE id = $10",
    )
    .bind(params.title)
    .bind(params.description)
    .bind(params.candidate_id)
    .bind(params.candidate_name)
    .bind(params.date)
    .bind(params.location_name)
    .bind(params.latitude)
    .bind(params.longitude)
    .bind(params.updated_at)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn delete_by_id(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM exams WHERE id = $1").bind(id).execute(pool).await?;
    Ok(result.rows_affected())
}

pub(crate) async fn list(pool: &PgPool, params: &ListExams) -> Result<Vec<Exam>, sqlx::Error> {
    let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT {COLUMNS} FROM exams"));
    push_filters(&mut builder, params);

    builder.push(" ORDER BY date ");
    builder.push(params.order.as_sql());
    builder.push(", id ");
    builder.push(params.order.as_sql());

    let offset = (params.page - 1).max(0).saturating_mul(params.limit.max(1));
    builder.push(" OFFSET ");
    builder.push_bind(offset);
    builder.push(" LIMIT ");
    builder.push_bind(params.limit.max(1));

    builder.build_query_as::<Exam>().fetch_all(pool).await
}

pub(crate) async fn count(pool: &PgPool, params: &ListExams) -> Result<i64, sqlx::Error> {
    let mut builder = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM exams");
    push_filters(&mut builder, params);
    builder.build_query_scalar::<i64>().fetch_one(pool).await
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, params: &ListExams) {
    let mut has_where = false;

    if let Some(location) = params.location.as_ref() {
        if !has_where {
            builder.push(" WHERE ");
            has_where = true;
        } else {
            builder.push(" AND ");
        }
        builder.push("location_name ILIKE ");
        builder.push_bind(format!("%{}%", escape_like(location)));
    }
    if let Some(date) = params.date.as_ref() {
        if !has_where {
            builder.push(" WHERE ");
        } else {
            builder.push(" AND ");
        }
        builder.push("date LIKE ");
        builder.push_bind(format!("%{}%", escape_like(date)));
    }
}

pub(crate) async fn search_by_candidate_name(
    pool: &PgPool,
    name: &str,
) -> Result<Vec<Exam>, sqlx::Error> {
    sqlx::query_as::<_, Exam>(&format!(
        "SELECT {COLUMNS} FROM exams WHERE candidate_name ILIKE $1 ORDER BY id"
    ))
    .bind(format!("%{}%", escape_like(name)))
    .fetch_all(pool)
    .await
}

pub(crate) async fn find_duplicate_booking(
    pool: &PgPool,
    candidate_name: &str,
    date: &str,
    description: &str,
) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        "SELECT 1 FROM exams
         WHERE candidate_name = $1 AND date = $2 AND description = $3
         LIMIT 1",
    )
    .bind(candidate_name)
    .bind(date)
    .bind(description)
    .fetch_optional(pool)
    .await
}

// LIKE wildcards in user input must match literally.
fn escape_like(value: &str) -> String {
    value.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
