use candidly_db::repositories::{TemplateRepo, UserRepo};
use sqlx::PgPool;

async fn seed_creator(pool: &PgPool) -> i64 {
    UserRepo::create(pool, "creator@example.com", "Creator", "hash", true, true, false)
        .await
        .unwrap()
        .id
}

/// Creating a template with N questions yields exactly N question rows
/// in submitted order.
#[sqlx::test(migrations = "./migrations")]
async fn test_template_creates_questions_in_order(pool: PgPool) {
    let creator_id = seed_creator(&pool).await;

    let questions = vec![
        ("Rate leadership skills".to_string(), "rating".to_string()),
        ("They delegate effectively".to_string(), "agreement".to_string()),
        ("Describe management style".to_string(), "discussion".to_string()),
    ];

    let template = TemplateRepo::create(
        &pool,
        creator_id,
        "Complete Supervisor Template",
        Some("Full-featured supervisor template"),
        Some("Supervisor feedback survey."),
        true,
        &questions,
    )
    .await
    .unwrap();

    assert!(template.is_supervisor_feedback);
    assert_eq!(template.intro_text.as_deref(), Some("Supervisor feedback survey."));

    let rows = TemplateRepo::list_questions(&pool, template.id).await.unwrap();
    assert_eq!(rows.len(), 3);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.order_index, i as i32);
    }
    assert_eq!(rows[0].question_type, "rating");
    assert_eq!(rows[1].question_type, "agreement");
    assert_eq!(rows[2].question_text, "Describe management style");
}

/// The template listing carries per-template question counts.
#[sqlx::test(migrations = "./migrations")]
async fn test_template_list_counts_questions(pool: PgPool) {
    let creator_id = seed_creator(&pool).await;

    TemplateRepo::create(
        &pool,
        creator_id,
        "Basic Template",
        None,
        None,
        false,
        &[("How is their communication?".to_string(), "rating".to_string())],
    )
    .await
    .unwrap();

    TemplateRepo::create(&pool, creator_id, "Empty Template", None, None, false, &[])
        .await
        .unwrap();

    let summaries = TemplateRepo::list(&pool).await.unwrap();
    assert_eq!(summaries.len(), 2);

    let basic = summaries.iter().find(|t| t.name == "Basic Template").unwrap();
    assert_eq!(basic.question_count, 1);

    let empty = summaries.iter().find(|t| t.name == "Empty Template").unwrap();
    assert_eq!(empty.question_count, 0);
}

/// An unknown question type is rejected by the schema check constraint.
#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_question_type_rejected_by_schema(pool: PgPool) {
    let creator_id = seed_creator(&pool).await;

    let result = TemplateRepo::create(
        &pool,
        creator_id,
        "Broken Template",
        None,
        None,
        false,
        &[("Anything".to_string(), "freeform".to_string())],
    )
    .await;

    assert!(result.is_err());
}
