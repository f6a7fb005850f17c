use sqlx::PgPool;
use time::PrimitiveDateTime;

use crate::db::models::AccessToken;

pub(crate) struct CreateAccessToken<'a> {
    pub jti: &'a str,
    pub user_id: i64,
    pub created_at: PrimitiveDateTime,
    pub expires_at: PrimitiveDateTime,
}

pub(crate) async fn insert(pool: &PgPool, params: CreateAccessToken<'_>) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO access_tokens (jti, user_id, created_at, expires_at) VALUES ($1,$2,$3,$4)",
    )
    .bind(params.jti)
    .bind(params.user_id)
    .bind(params.created_at)
    .bind(params.expires_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub(crate) async fn find_by_jti(pool: &PgPool, jti: &str) -> Result<Option<AccessToken>, sqlx::Error> {
    sqlx::query_as::<_, AccessToken>(
        "SELECT jti, user_id, created_at, expires_at FROM access_tokens WHERE jti = $1",
    )
    .bind(jti)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn delete_for_user(pool: &PgPool, user_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM access_tokens WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
