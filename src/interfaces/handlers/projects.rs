use actix_web::{web, Responder};
use tracing::{error, instrument};

use crate::{
    entities::pagination::{ListQuery, PROJECT_LIST},
    handlers::json_error::{list_failure, list_response},
    AppState,
};

#[instrument(skip(state, query))]
pub async fn get_projects(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    match state.project_handler.list_projects(&query).await {
        Ok(page) => list_response("projects", page),
        Err(e) => {
            error!("Error fetching projects: {}", e);
            list_failure("projects", PROJECT_LIST)
        }
    }
}
