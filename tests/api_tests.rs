
use actix_web::{http::StatusCode, test};
use serde_json::Value;
use test_utils::*;

#[actix_web::test]
async fn experiences_are_paged_newest_first() {
    let ctx = TestApp::new();
    add_experiences(
        &ctx.store,
        vec![
            experience("First", (2019, 1, 1), false),
            experience("Second", (2021, 6, 1), false),
            experience("Third", (2023, 4, 1), false),
        ],
    )
    .await;
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/experiences?page=2&limit=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["experiences"].as_array().unwrap().len(), 1);
    assert_eq!(body["experiences"][0]["title"], "First");
    assert_eq!(body["pagination"]["page"], 2);
    assert_eq!(body["pagination"]["limit"], 2);
    assert_eq!(body["pagination"]["totalItems"], 3);
    assert_eq!(body["pagination"]["totalPages"], 2);

    let req = test::TestRequest::get()
        .uri("/api/experiences?page=5&limit=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["experiences"], serde_json::json!([]));
    assert_eq!(body["pagination"]["totalItems"], 3);
    assert_eq!(body["pagination"]["page"], 5);
}

#[actix_web::test]
async fn list_limit_is_clamped_and_garbage_falls_back() {
    let ctx = TestApp::new();
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/experiences?page=abc&limit=500")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 50);

    let req = test::TestRequest::get()
        .uri("/api/projects?limit=-3")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["limit"], 1);
    assert_eq!(body["projects"], serde_json::json!([]));
    assert_eq!(body["pagination"]["totalPages"], 0);
}

#[actix_web::test]
async fn hidden_experiences_are_invisible() {
    let ctx = TestApp::new();
    let ids = add_experiences(
        &ctx.store,
        vec![
            experience("Visible", (2020, 1, 1), false),
            experience("Hidden", (2022, 1, 1), true),
        ],
    )
    .await;
    let (visible_id, hidden_id) = (ids[0], ids[1]);
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/experiences").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["totalItems"], 1);
    assert_eq!(body["experiences"][0]["title"], "Visible");

    let req = test::TestRequest::get()
        .uri(&format!("/api/experiences/{visible_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["title"], "Visible");
    assert_eq!(body["tags"][0]["name"], "Rust");

    let req = test::TestRequest::get()
        .uri(&format!("/api/experiences/{hidden_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn experience_lookup_distinguishes_bad_and_missing_ids() {
    let ctx = TestApp::new();
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/experiences/abc").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid ID format");

    let req = test::TestRequest::get().uri("/api/experiences/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Experience not found");
}

#[actix_web::test]
async fn projects_list_featured_first_and_filters() {
    let ctx = TestApp::new();
    add_projects(
        &ctx.store,
        vec![
            project("Ranked first", 1, false),
            project("Featured late", 5, true),
            project("Featured early", 2, true),
        ],
    )
    .await;
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/projects").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = body["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Featured early", "Featured late", "Ranked first"]);

    let req = test::TestRequest::get()
        .uri("/api/projects?featured=true")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["totalItems"], 2);
}

#[actix_web::test]
async fn blogs_list_only_published_posts() {
    let ctx = TestApp::new();
    add_blogs(
        &ctx.store,
        vec![blog("Draft Post", false), blog("Published Post", true)],
    )
    .await;
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/blogs").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["pagination"]["totalItems"], 1);
    assert_eq!(body["blogs"][0]["slug"], "published-post");
    assert_eq!(body["pagination"]["limit"], 9);
}

#[actix_web::test]
async fn tech_tags_are_deduplicated_and_sorted() {
    let ctx = TestApp::new();
    add_experiences(&ctx.store, vec![experience("Engineer", (2020, 1, 1), false)]).await;
    add_projects(&ctx.store, vec![project("Sites", 1, true)]).await;
    add_blogs(&ctx.store, vec![blog("Notes", true)]).await;

    let mut go = project("Services", 2, false);
    go.tags = vec![tag("Go", true), tag("Rust", false)];
    add_projects(&ctx.store, vec![go]).await;

    let app = test::init_service(build_app(ctx.state.clone())).await;
    let req = test::TestRequest::get().uri("/api/tech-tags").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        serde_json::json!([
            {"name": "Go", "iconUrl": "/images/tags/icon/go.svg"},
            {"name": "Rust", "iconUrl": "/images/tags/icon/rust.svg"}
        ])
    );
    assert_eq!(ctx.store.tags().len(), 3);
}

#[actix_web::test]
async fn trailing_slash_is_normalized() {
    let ctx = TestApp::new();
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/experiences/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
