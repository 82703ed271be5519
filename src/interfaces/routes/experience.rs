use actix_web::web;

use crate::{
    handlers::experience,
    repositories::experience::ExperienceRepository,
    routes::json_error::json_config,
};

pub fn config_routes<R>(cfg: &mut web::ServiceConfig)
where
    R: ExperienceRepository + 'static,
{
    cfg.service(
        web::scope("/workexperience")
            .service(
                web::resource("")
                    // Clients that omit Content-Type still get per-field errors
                    .app_data(json_config().content_type_required(false))
                    .route(web::get().to(experience::list_experiences::<R>))
                    .route(web::post().to(experience::create_experience::<R>))
            )
            .service(
                web::resource("/{experience_id}")
                    .route(web::put().to(experience::update_experience::<R>))
                    .route(web::delete().to(experience::delete_experience::<R>))
            )
    );
}
