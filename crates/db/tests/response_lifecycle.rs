use candidly_db::models::request::CreateFeedbackRequest;
use candidly_db::models::response::NewResponse;
use candidly_db::repositories::{RequestRepo, ResponseRepo, TemplateRepo, UserRepo};
use chrono::Utc;
use sqlx::PgPool;

/// Seed a creator, a two-question template, and a request; returns
/// (request_id, rating_question_id, discussion_question_id).
async fn seed_request(pool: &PgPool) -> (i64, i64, i64) {
    let creator = UserRepo::create(pool, "creator@example.com", "Creator", "hash", true, true, false)
        .await
        .unwrap();

    let template = TemplateRepo::create(
        pool,
        creator.id,
        "Test Template",
        None,
        None,
        false,
        &[
            ("How would you rate their communication?".to_string(), "rating".to_string()),
            ("What are their greatest strengths?".to_string(), "discussion".to_string()),
        ],
    )
    .await
    .unwrap();

    let request = RequestRepo::create(
        pool,
        creator.id,
        &CreateFeedbackRequest {
            target_name: "John Doe".to_string(),
            target_email: None,
            template_id: template.id,
            assigned_to_email: "assignee@example.com".to_string(),
            reviewer_id: None,
            context: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(request.status, "pending");

    let questions = TemplateRepo::list_questions(pool, template.id).await.unwrap();
    (request.id, questions[0].id, questions[1].id)
}

fn rating_answer(question_id: i64, value: i32) -> NewResponse {
    NewResponse {
        question_id,
        rating_value: Some(value),
        agreement_value: None,
        discussion_summary: None,
        chat_history: None,
    }
}

/// Saving a draft twice replaces rather than accumulates rows.
#[sqlx::test(migrations = "./migrations")]
async fn test_draft_save_replaces_rows(pool: PgPool) {
    let (request_id, rating_q, discussion_q) = seed_request(&pool).await;

    let first = vec![
        rating_answer(rating_q, 4),
        NewResponse {
            question_id: discussion_q,
            rating_value: None,
            agreement_value: None,
            discussion_summary: Some("They are excellent communicators".to_string()),
            chat_history: Some(serde_json::json!([
                {"role": "user", "content": "They are excellent communicators"}
            ])),
        },
    ];
    ResponseRepo::replace_drafts(&pool, request_id, &first).await.unwrap();

    let second = vec![rating_answer(rating_q, 5)];
    ResponseRepo::replace_drafts(&pool, request_id, &second).await.unwrap();

    let drafts = ResponseRepo::list_drafts(&pool, request_id).await.unwrap();
    assert_eq!(drafts.len(), 1, "second save must replace the first set");
    assert_eq!(drafts[0].rating_value, Some(5));
}

/// A response row is draft until submit; after submit `is_draft` is
/// false and `submitted_at` is stamped.
#[sqlx::test(migrations = "./migrations")]
async fn test_submit_freezes_drafts(pool: PgPool) {
    let (request_id, rating_q, _) = seed_request(&pool).await;

    ResponseRepo::replace_drafts(&pool, request_id, &[rating_answer(rating_q, 3)])
        .await
        .unwrap();

    let drafts = ResponseRepo::list_drafts(&pool, request_id).await.unwrap();
    assert!(drafts[0].is_draft);
    assert!(drafts[0].submitted_at.is_none());

    let now = Utc::now();
    let frozen = ResponseRepo::submit_drafts(&pool, request_id, now).await.unwrap();
    assert_eq!(frozen, 1);

    RequestRepo::mark_completed(&pool, request_id, "completed", now).await.unwrap();
    let request = RequestRepo::find_by_id(&pool, request_id).await.unwrap().unwrap();
    assert_eq!(request.status, "completed");
    assert!(request.completed_at.is_some());

    let report = ResponseRepo::report(&pool, request_id).await.unwrap();
    assert_eq!(report.len(), 1);
    assert!(report[0].submitted_at.is_some());
}

/// Draft responses never appear in the report query.
#[sqlx::test(migrations = "./migrations")]
async fn test_drafts_excluded_from_report(pool: PgPool) {
    let (request_id, rating_q, _) = seed_request(&pool).await;

    ResponseRepo::replace_drafts(&pool, request_id, &[rating_answer(rating_q, 3)])
        .await
        .unwrap();

    let report = ResponseRepo::report(&pool, request_id).await.unwrap();
    assert!(report.is_empty(), "draft rows must not reach the report");

    ResponseRepo::submit_drafts(&pool, request_id, Utc::now()).await.unwrap();

    let report = ResponseRepo::report(&pool, request_id).await.unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].question_text, "How would you rate their communication?");
}

/// A later draft save must not disturb already-submitted rows.
#[sqlx::test(migrations = "./migrations")]
async fn test_replace_drafts_leaves_submitted_rows(pool: PgPool) {
    let (request_id, rating_q, discussion_q) = seed_request(&pool).await;

    ResponseRepo::replace_drafts(&pool, request_id, &[rating_answer(rating_q, 4)])
        .await
        .unwrap();
    ResponseRepo::submit_drafts(&pool, request_id, Utc::now()).await.unwrap();

    ResponseRepo::replace_drafts(
        &pool,
        request_id,
        &[NewResponse {
            question_id: discussion_q,
            rating_value: None,
            agreement_value: None,
            discussion_summary: Some("New draft".to_string()),
            chat_history: None,
        }],
    )
    .await
    .unwrap();

    let report = ResponseRepo::report(&pool, request_id).await.unwrap();
    assert_eq!(report.len(), 1, "submitted row survives later draft saves");
    assert_eq!(report[0].rating_value, Some(4));
}

/// Dashboard visibility: parties see the request, strangers do not,
/// admins see everything.
#[sqlx::test(migrations = "./migrations")]
async fn test_dashboard_visibility(pool: PgPool) {
    let (request_id, _, _) = seed_request(&pool).await;

    let creator =
        UserRepo::find_by_email(&pool, "creator@example.com").await.unwrap().unwrap();

    let visible = RequestRepo::list_visible(&pool, creator.id, &creator.email, false)
        .await
        .unwrap();
    assert!(visible.iter().any(|r| r.id == request_id));

    let visible = RequestRepo::list_visible(&pool, 9999, "assignee@example.com", false)
        .await
        .unwrap();
    assert!(visible.iter().any(|r| r.id == request_id));

    let visible = RequestRepo::list_visible(&pool, 9999, "stranger@example.com", false)
        .await
        .unwrap();
    assert!(visible.is_empty());

    let visible = RequestRepo::list_visible(&pool, 9999, "admin@example.com", true)
        .await
        .unwrap();
    assert!(visible.iter().any(|r| r.id == request_id));
}
