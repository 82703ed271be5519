use actix_web::web;
use crate::handlers::users;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(
                web::resource("")
                    .route(web::get().to(users::get_users))
                    .route(web::post().to(users::add_user))
            )
            .service(
                web::resource("/{user_id}")
                    .route(web::put().to(users::update_user))
                    .route(web::delete().to(users::delete_user))
            )
    );
}
