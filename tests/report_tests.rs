mod common;

use common::{Backends, RecordingMailer};
use survey_server::{
    errors::AppError,
    models::domain::{user::UserRole, Response},
    repositories::{QuestionRepository, ResponseRepository},
};

async fn record(backends: &Backends, user_id: &str, question_id: &str, answer: &str, score: Option<f64>) {
    let mut response = Response::new(user_id, question_id, answer, 0.0, false, None);
    response.score = score;
    backends
        .responses
        .create(response)
        .await
        .expect("response is stored");
}

#[tokio::test]
async fn categories_with_the_same_name_share_a_bucket() {
    let backends = Backends::default();
    let state = backends.app_state().await;
    let user = backends.seed_user("student@example.com", UserRole::User).await;
    let math_a = backends.seed_category("Math").await;
    let math_b = backends.seed_category("Math").await;
    let q1 = backends.seed_question(&math_a.id, Some(10.0)).await;
    let q2 = backends.seed_question(&math_b.id, Some(10.0)).await;
    record(&backends, &user.id, &q1.id, "4", Some(8.0)).await;
    record(&backends, &user.id, &q2.id, "4", Some(7.0)).await;

    let report = state
        .report_service
        .build_report(&user.id)
        .await
        .expect("report builds");

    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.categories[0].score, 15.0);
    assert_eq!(report.categories[0].total, 2);
    assert_eq!(report.total_score, 15.0);
    assert_eq!(report.total_possible, 2);

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["userEmail"], "student@example.com");
    assert_eq!(json["percentage"], "750.00");
    assert_eq!(json["categories"][0]["questions"][0]["correctOption"], "4");
}

#[tokio::test]
async fn deleted_questions_drop_out_of_the_report() {
    let backends = Backends::default();
    let state = backends.app_state().await;
    let user = backends.seed_user("student@example.com", UserRole::User).await;
    let category = backends.seed_category("Science").await;
    let kept = backends.seed_question(&category.id, None).await;
    let removed = backends.seed_question(&category.id, None).await;
    record(&backends, &user.id, &kept.id, "4", Some(1.0)).await;
    record(&backends, &user.id, &removed.id, "4", Some(1.0)).await;
    backends.questions.delete(&removed.id).await.expect("deleted");

    let report = state
        .report_service
        .build_report(&user.id)
        .await
        .expect("report builds");
    assert_eq!(report.total_possible, 1);
    assert_eq!(report.total_score, 1.0);
}

#[tokio::test]
async fn report_of_only_deleted_questions_is_not_found() {
    let backends = Backends::default();
    let state = backends.app_state().await;
    let user = backends.seed_user("student@example.com", UserRole::User).await;
    record(&backends, &user.id, "gone", "4", Some(1.0)).await;

    let result = state.report_service.build_report(&user.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn question_without_category_is_uncategorized() {
    let backends = Backends::default();
    let state = backends.app_state().await;
    let user = backends.seed_user("student@example.com", UserRole::User).await;
    let orphan = backends.seed_question("category-that-was-deleted", None).await;
    record(&backends, &user.id, &orphan.id, "", None).await;

    let report = state
        .report_service
        .build_report(&user.id)
        .await
        .expect("report builds");

    let bucket = &report.categories[0];
    assert_eq!(bucket.name, "Uncategorized");
    assert_eq!(bucket.questions[0].answer, "No answer");
    assert_eq!(bucket.questions[0].score, 0.0);
    assert_eq!(report.percentage_display(), "0.00");
}

#[tokio::test]
async fn send_report_delivers_to_the_stored_address() {
    let backends = Backends::default();
    let state = backends.app_state().await;
    let user = backends.seed_user("student@example.com", UserRole::User).await;
    let category = backends.seed_category("Math").await;
    let question = backends.seed_question(&category.id, Some(10.0)).await;
    record(&backends, &user.id, &question.id, "4", Some(10.0)).await;

    let receipt = state
        .report_service
        .send_report(&user.id)
        .await
        .expect("report delivered");
    assert_eq!(receipt.report.percentage_display(), "1000.00");

    let sent = backends.mailer.sent.lock().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "student@example.com");
    assert_eq!(sent[0].subject, "Test Report");
    assert!(sent[0].html.contains("<h3>Math</h3>"));
}

#[tokio::test]
async fn relay_failure_is_reported_as_delivery_error() {
    let backends = Backends::with_mailer(RecordingMailer::failing());
    let state = backends.app_state().await;
    let user = backends.seed_user("student@example.com", UserRole::User).await;
    let category = backends.seed_category("Math").await;
    let question = backends.seed_question(&category.id, Some(10.0)).await;
    record(&backends, &user.id, &question.id, "4", Some(10.0)).await;

    let result = state.report_service.send_report(&user.id).await;
    assert!(matches!(result, Err(AppError::DeliveryError(_))));
}

#[tokio::test]
async fn user_without_responses_gets_no_mail() {
    let backends = Backends::default();
    let state = backends.app_state().await;
    let user = backends.seed_user("student@example.com", UserRole::User).await;

    let result = state.report_service.send_report(&user.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(backends.mailer.sent.lock().await.is_empty());
}
