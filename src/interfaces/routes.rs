use actix_web::web;

use crate::{
    handlers::{home::welcome, system::health_check},
    repositories::experience::ExperienceRepository,
};

mod experience;
mod users;
mod json_error;

pub fn configure_routes<R>(cfg: &mut web::ServiceConfig)
where
    R: ExperienceRepository + 'static,
{
    cfg.configure(json_error::config_routes);

    cfg.service(
        web::resource("/health")
            .route(web::get().to(health_check::<R>))
    );

    cfg.service(
        web::scope("/api")
            .service(
                web::resource("")
                    .route(web::get().to(welcome))
            )
            .configure(experience::config_routes::<R>)
            .configure(users::config_routes)
    );
}
