mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, web};

use repositories::{experience::ExperienceRepository, sqlx_repo::SqlxExperienceRepo};
use use_cases::experience::ExperienceHandler;

pub struct AppState<R = SqlxExperienceRepo>
where
    R: ExperienceRepository,
{
    pub experience_handler: ExperienceHandler<R>,
}

impl AppState<SqlxExperienceRepo> {
    pub fn new(pool: sqlx::PgPool) -> Self {
        AppState::with_repository(SqlxExperienceRepo::new(pool))
    }
}

impl<R> AppState<R>
where
    R: ExperienceRepository,
{
    pub fn with_repository(experience_repo: R) -> Self {
        AppState {
            experience_handler: ExperienceHandler::new(experience_repo),
        }
    }
}
