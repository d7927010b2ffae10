use actix_web::{get, web, HttpResponse, Responder};

use crate::{use_cases::pages::home_page, AppState};

#[get("/")]
pub async fn home(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(home_page(&state.config))
}
