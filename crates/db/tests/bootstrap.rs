use assert_matches::assert_matches;
use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    candidly_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "sessions",
        "feedback_templates",
        "questions",
        "feedback_requests",
        "responses",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert!(count.0 >= 0, "{table} should be queryable");
    }
}

/// Email uniqueness is enforced at the schema level.
#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_rejected(pool: PgPool) {
    candidly_db::repositories::UserRepo::create(
        &pool,
        "dev@example.com",
        "Dev User",
        "hash",
        false,
        false,
        false,
    )
    .await
    .unwrap();

    let duplicate = candidly_db::repositories::UserRepo::create(
        &pool,
        "DEV@example.com",
        "Dev User Again",
        "hash",
        false,
        false,
        false,
    )
    .await;

    assert_matches!(duplicate, Err(sqlx::Error::Database(_)));
}
