
use std::sync::Arc;

use actix_web::{http::StatusCode, test};
use async_trait::async_trait;
use mockall::mock;
use portfolio_site::{
    entities::{
        blog::{Blog, BlogSitemapEntry, NewBlog},
        pagination::PageWindow,
        project::{NewProject, Project, ProjectFilter, ProjectOrdering},
    },
    errors::AppError,
    repositories::{
        blog::BlogRepository, in_memory::InMemoryPortfolioStore, project::ProjectRepository,
    },
    shared_repos::SharedRepositories,
};
use serde_json::{json, Value};
use test_utils::*;

mock! {
    pub ProjectRepo {}

    #[async_trait]
    impl ProjectRepository for ProjectRepo {
        async fn list_projects(
            &self,
            filter: ProjectFilter,
            ordering: ProjectOrdering,
            window: Option<PageWindow>,
        ) -> Result<Vec<Project>, AppError>;
        async fn count_projects(&self, filter: ProjectFilter) -> Result<u64, AppError>;
        async fn create_project(&self, project: &NewProject) -> Result<Project, AppError>;
    }
}

mock! {
    pub BlogRepo {}

    #[async_trait]
    impl BlogRepository for BlogRepo {
        async fn list_published_blogs(&self, window: PageWindow) -> Result<Vec<Blog>, AppError>;
        async fn count_published_blogs(&self) -> Result<u64, AppError>;
        async fn get_published_blog_by_slug(&self, slug: &str) -> Result<Option<Blog>, AppError>;
        async fn list_sitemap_entries(&self) -> Result<Vec<BlogSitemapEntry>, AppError>;
        async fn create_blog(&self, blog: &NewBlog) -> Result<Blog, AppError>;
    }
}

fn db_down() -> AppError {
    AppError::InternalError("Database error: pool timed out".into())
}

fn failing_repos() -> SharedRepositories {
    let mut projects = MockProjectRepo::new();
    projects.expect_list_projects().returning(|_, _, _| Err(db_down()));
    projects.expect_count_projects().returning(|_| Err(db_down()));

    let mut blogs = MockBlogRepo::new();
    blogs.expect_list_published_blogs().returning(|_| Err(db_down()));
    blogs.expect_count_published_blogs().returning(|| Err(db_down()));
    blogs.expect_get_published_blog_by_slug().returning(|_| Err(db_down()));
    blogs.expect_list_sitemap_entries().returning(|| Err(db_down()));

    let mut repos = SharedRepositories::in_memory(InMemoryPortfolioStore::new());
    repos.project_repo = Arc::new(projects);
    repos.blog_repo = Arc::new(blogs);
    repos
}

#[actix_web::test]
async fn home_reports_site_settings() {
    let ctx = TestApp::new();
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["showBlogs"], true);
    assert_eq!(
        body["resumeUrl"],
        "https://drive.google.com/file/d/drive-file/view"
    );
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn projects_page_follows_manual_rank() {
    let ctx = TestApp::new();
    add_projects(
        &ctx.store,
        vec![
            project("Third", 3, true),
            project("First", 1, false),
            project("Second", 2, true),
        ],
    )
    .await;
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/projects").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let titles: Vec<&str> = body["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert!(body.get("error").is_none());
}

#[actix_web::test]
async fn blog_index_uses_fixed_page_size() {
    let ctx = TestApp::new();
    let posts = (1..=10).map(|i| blog(&format!("Post {i}"), true)).collect();
    add_blogs(&ctx.store, posts).await;
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/blog?page=2&limit=50").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["blogs"].as_array().unwrap().len(), 1);
    assert_eq!(
        body["pagination"],
        json!({"page": 2, "limit": 9, "totalItems": 10, "totalPages": 2})
    );
}

#[actix_web::test]
async fn published_post_renders_sanitized_html() {
    let ctx = TestApp::new();
    let mut post = blog("Safe Rendering", true);
    post.content = "## Heading\n\n<script>alert('x')</script>\n\n[home](/)".into();
    add_blogs(&ctx.store, vec![post]).await;
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/blog/safe-rendering").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let html = body["blog"]["contentHtml"].as_str().unwrap();
    assert!(html.contains("<h2>Heading</h2>"));
    assert!(html.contains("href=\"/\""));
    assert!(!html.contains("<script>"));
    assert_eq!(body["blog"]["slug"], "safe-rendering");
    assert_eq!(body["blog"]["tags"][0]["name"], "Writing");
}

#[actix_web::test]
async fn unpublished_post_is_not_found_anywhere() {
    let ctx = TestApp::new();
    add_blogs(&ctx.store, vec![blog("Secret Draft", false), blog("Out Now", true)]).await;
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/blog/secret-draft").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Blog post not found");

    let req = test::TestRequest::get().uri("/blog").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["pagination"]["totalItems"], 1);

    let req = test::TestRequest::get().uri("/sitemap.xml").to_request();
    let xml = test::call_and_read_body(&app, req).await;
    let xml = std::str::from_utf8(&xml).unwrap();
    assert!(xml.contains("<loc>https://portfolio.test/blog/out-now</loc>"));
    assert!(!xml.contains("secret-draft"));
}

#[actix_web::test]
async fn sitemap_lists_static_pages_with_cache_headers() {
    let ctx = TestApp::new();
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/sitemap.xml").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("content-type").unwrap(), "application/xml");
    assert_eq!(
        resp.headers().get("cache-control").unwrap(),
        "max-age=0, s-maxage=3600"
    );

    let xml = test::read_body(resp).await;
    let xml = std::str::from_utf8(&xml).unwrap();
    assert!(xml.starts_with("<?xml"));
    for page in ["/", "/projects", "/blog"] {
        assert!(xml.contains(&format!("<loc>https://portfolio.test{page}</loc>")));
    }
    assert!(!xml.contains("<lastmod>"));
}

#[actix_web::test]
async fn list_endpoints_fail_with_empty_envelope() {
    let ctx = TestApp::with_repos(failing_repos());
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/api/projects").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "Failed to load projects",
            "projects": [],
            "pagination": {"page": 1, "limit": 6, "totalItems": 0, "totalPages": 0}
        })
    );

    let req = test::TestRequest::get().uri("/api/blogs").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["blogs"], json!([]));
}

#[actix_web::test]
async fn pages_degrade_instead_of_failing() {
    let ctx = TestApp::with_repos(failing_repos());
    let app = test::init_service(build_app(ctx.state.clone())).await;

    let req = test::TestRequest::get().uri("/projects").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"projects": [], "error": "Failed to load projects"}));

    let req = test::TestRequest::get().uri("/blog").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Failed to load blogs");
    assert_eq!(body["blogs"], json!([]));

    let req = test::TestRequest::get().uri("/blog/anything").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert!(!body.to_string().contains("pool timed out"));
}
