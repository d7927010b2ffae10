use actix_web::web;

use crate::handlers::home::home;

mod api;
pub mod json_error;
mod pages;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .configure(api::config_routes)
    );

    cfg.configure(pages::config_routes);
    cfg.configure(json_error::config_routes);
}
