use actix_web::{web, Responder};
use tracing::{error, instrument};

use crate::{
    entities::pagination::{ListQuery, BLOG_LIST},
    handlers::json_error::{list_failure, list_response},
    AppState,
};

#[instrument(skip(state, query))]
pub async fn get_blogs(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    match state.blog_handler.list_blogs(&query).await {
        Ok(page) => list_response("blogs", page),
        Err(e) => {
            error!("Error fetching blogs: {}", e);
            list_failure("blogs", BLOG_LIST)
        }
    }
}
