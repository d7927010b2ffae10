use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    errors::AppError,
    use_cases::pages::{blog_list_page, blog_page, projects_page},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct BlogPageQuery {
    pub page: Option<String>,
}

/// Always 200; load failures are reported inside the page data.
#[instrument(skip(state))]
pub async fn projects(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(projects_page(&state.project_handler).await)
}

/// Always 200; load failures are reported inside the page data.
#[instrument(skip(state))]
pub async fn blog_index(
    state: web::Data<AppState>,
    query: web::Query<BlogPageQuery>,
) -> impl Responder {
    HttpResponse::Ok().json(blog_list_page(&state.blog_handler, query.page.as_deref()).await)
}

#[instrument(skip(state))]
pub async fn blog_post(
    slug: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let data = blog_page(&state.blog_handler, &slug).await?;
    Ok(HttpResponse::Ok().json(data))
}
