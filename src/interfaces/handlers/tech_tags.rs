use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use tracing::{error, instrument};

use crate::{handlers::json_error::json_error, AppState};

#[instrument(skip(state))]
pub async fn get_tech_tags(state: web::Data<AppState>) -> impl Responder {
    match state.tag_handler.list_tech_tags().await {
        Ok(tags) => HttpResponse::Ok().json(tags),
        Err(e) => {
            error!("Error fetching tech tags: {}", e);
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load tech tags",
                "Failed to load tech tags",
            )
        }
    }
}
