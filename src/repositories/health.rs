use sqlx::PgPool;

/// Round-trips a trivial statement so /healthz reflects real connectivity,
/// not just pool liveness.
pub(crate) async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await?;
    Ok(())
}
