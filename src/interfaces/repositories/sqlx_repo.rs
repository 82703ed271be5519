use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxExperienceRepo {
    pub pool: PgPool,
}
