
use std::sync::Arc;

use actix_web::{http::StatusCode, test};
use async_trait::async_trait;
use mockall::mock;
use portfolio_site::{
    entities::contact::{Contact, NewContact},
    errors::AppError,
    mail::mailer::MailError,
    repositories::{contact::ContactRepository, in_memory::InMemoryPortfolioStore},
    settings::AppConfig,
    shared_repos::SharedRepositories,
};
use serde_json::{json, Value};
use test_utils::*;

mock! {
    pub ContactRepo {}

    #[async_trait]
    impl ContactRepository for ContactRepo {
        async fn create_contact(&self, contact: &NewContact) -> Result<Contact, AppError>;
    }
}

fn valid_form() -> Value {
    json!({
        "needs": "Website",
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "projectType": "Landing page",
        "budget": "$1k-$5k",
        "additional": "Launch in <two> weeks"
    })
}

fn post_contact(body: &Value) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/contact")
        .peer_addr("10.0.0.1:4000".parse().unwrap())
        .set_json(body)
}

#[actix_web::test]
async fn submission_is_stored_and_notified() {
    let mut mailer = MockNotifier::new();
    mailer
        .expect_send()
        .withf(|mail| {
            mail.reply_to == "ada@example.com"
                && mail.subject == "Website Project Inquiry: Landing page (Budget: $1k-$5k)"
                && mail.html_body.contains("&lt;two&gt;")
        })
        .times(1)
        .returning(|_| Ok(()));

    let ctx = TestApp::with_mailer(Arc::new(mailer));
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, post_contact(&valid_form()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-ratelimit-limit").unwrap(), "5");
    assert_eq!(resp.headers().get("x-ratelimit-remaining").unwrap(), "4");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Contact form submitted successfully");

    let contacts = ctx.store.contacts();
    assert_eq!(contacts.len(), 1);
    assert_eq!(body["contactId"], contacts[0].id);
    assert_eq!(contacts[0].additional, "Launch in <two> weeks");
}

#[actix_web::test]
async fn mail_failure_does_not_fail_submission() {
    let mut mailer = MockNotifier::new();
    mailer
        .expect_send()
        .times(1)
        .returning(|_| Err(MailError::Transport("connection refused".into())));

    let ctx = TestApp::with_mailer(Arc::new(mailer));
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, post_contact(&valid_form()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.store.contacts().len(), 1);
}

#[actix_web::test]
async fn missing_field_is_rejected_without_saving() {
    let mut mailer = MockNotifier::new();
    mailer.expect_send().never();

    let ctx = TestApp::with_mailer(Arc::new(mailer));
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let mut form = valid_form();
    form["email"] = json!("   ");
    let resp = test::call_service(&app, post_contact(&form).to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "email is required");
    assert!(ctx.store.contacts().is_empty());
}

#[actix_web::test]
async fn email_without_top_level_domain_is_rejected() {
    let mut mailer = MockNotifier::new();
    mailer.expect_send().never();

    let ctx = TestApp::with_mailer(Arc::new(mailer));
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let mut form = valid_form();
    form["email"] = json!("ada@example");
    let resp = test::call_service(&app, post_contact(&form).to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid email format");
    assert!(ctx.store.contacts().is_empty());
}

#[actix_web::test]
async fn malformed_body_is_a_bad_request() {
    let ctx = TestApp::new();
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/contact")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"needs\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("JSON error"));
}

#[actix_web::test]
async fn storage_failure_is_reported_as_500() {
    let mut repo = MockContactRepo::new();
    repo.expect_create_contact()
        .returning(|_| Err(AppError::InternalError("connection reset".into())));

    let mut mailer = MockNotifier::new();
    mailer.expect_send().never();

    let mut repos = SharedRepositories::in_memory(InMemoryPortfolioStore::new());
    repos.contact_repo = Arc::new(repo);
    let ctx = TestApp::with_repos_and_mailer(repos, Arc::new(mailer));
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let resp = test::call_service(&app, post_contact(&valid_form()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"success": false, "message": "Database error creating contact entry"})
    );
}

#[actix_web::test]
async fn sixth_attempt_in_window_is_rate_limited() {
    let ctx = TestApp::new();
    let app = test::init_service(build_app(ctx.state.clone())).await;

    for remaining in (0..5).rev() {
        let resp = test::call_service(&app, post_contact(&valid_form()).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("x-ratelimit-remaining").unwrap(),
            remaining.to_string().as_str()
        );
        ctx.advance_ms(1_000);
    }

    let resp = test::call_service(&app, post_contact(&valid_form()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    // The oldest attempt is 5s old, so it leaves the hour window in 3595s.
    assert_eq!(resp.headers().get("retry-after").unwrap(), "3595");
    assert_eq!(resp.headers().get("x-ratelimit-reset").unwrap(), "3595");

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Too many contact requests. Please try again later.");
    assert_eq!(body["limit"], 5);
    assert_eq!(body["remaining"], 0);
    assert_eq!(body["reset"], 3_595_000);
    assert_eq!(ctx.store.contacts().len(), 5);

    ctx.advance_ms(3_595_000);
    let resp = test::call_service(&app, post_contact(&valid_form()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn malformed_attempts_count_against_the_limit() {
    let ctx = TestApp::new();
    let app = test::init_service(build_app(ctx.state.clone())).await;

    for _ in 0..5 {
        let req = post_contact(&json!({})).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    let resp = test::call_service(&app, post_contact(&valid_form()).to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(ctx.store.contacts().is_empty());
}

#[actix_web::test]
async fn forwarded_clients_are_limited_separately_when_trusted() {
    let config = AppConfig {
        trust_x_forwarded_for: true,
        contact_rate_limit_max: 1,
        ..test_config()
    };
    let ctx = TestApp::with_config(config);
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let first = post_contact(&valid_form())
        .insert_header(("x-forwarded-for", "203.0.113.7, 10.0.0.1"))
        .to_request();
    assert_eq!(test::call_service(&app, first).await.status(), StatusCode::OK);

    let again = post_contact(&valid_form())
        .insert_header(("x-forwarded-for", "203.0.113.7"))
        .to_request();
    assert_eq!(
        test::call_service(&app, again).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    let other = post_contact(&valid_form())
        .insert_header(("x-forwarded-for", "198.51.100.2"))
        .to_request();
    assert_eq!(test::call_service(&app, other).await.status(), StatusCode::OK);
}
