use actix_web::web;

use crate::handlers::{pages, sitemap, system};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/projects")
            .route(web::get().to(pages::projects))
    )
    .service(
        web::resource("/blog")
            .route(web::get().to(pages::blog_index))
    )
    .service(
        web::resource("/blog/{slug}")
            .route(web::get().to(pages::blog_post))
    )
    .service(
        web::resource("/sitemap.xml")
            .route(web::get().to(sitemap::sitemap))
    )
    .service(
        web::resource("/health")
            .route(web::get().to(system::health_check))
    );
}
