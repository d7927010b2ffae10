use actix_web::{web, HttpResponse, Responder};
use tracing::{error, instrument};

use crate::{
    entities::pagination::{ListQuery, EXPERIENCE_LIST},
    errors::AppError,
    handlers::json_error::{list_failure, list_response},
    AppState,
};

#[instrument(skip(state, query))]
pub async fn get_experiences(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> impl Responder {
    match state.experience_handler.list_experiences(&query).await {
        Ok(page) => list_response("experiences", page),
        Err(e) => {
            error!("Error fetching experiences: {}", e);
            list_failure("experiences", EXPERIENCE_LIST)
        }
    }
}

#[instrument(skip(state))]
pub async fn get_experience_by_id(
    experience_id: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let experience = state
        .experience_handler
        .get_experience(&experience_id)
        .await?;

    Ok(HttpResponse::Ok().json(experience))
}
