use actix_web::web;

use crate::handlers::{blogs, contact, experiences, projects, tech_tags};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/experiences")
            .route(web::get().to(experiences::get_experiences))
    )
    .service(
        web::resource("/experiences/{experience_id}")
            .route(web::get().to(experiences::get_experience_by_id))
    )
    .service(
        web::resource("/projects")
            .route(web::get().to(projects::get_projects))
    )
    .service(
        web::resource("/blogs")
            .route(web::get().to(blogs::get_blogs))
    )
    .service(
        web::resource("/tech-tags")
            .route(web::get().to(tech_tags::get_tech_tags))
    )
    .service(
        web::resource("/contact")
            .route(web::post().to(contact::submit_contact))
    );
}
