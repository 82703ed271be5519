use async_trait::async_trait;

use crate::{
    entities::experience::{UpdateWorkExperience, WorkExperience, WorkExperienceInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxExperienceRepo,
};

#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    /// Round-trips a trivial statement to the database
    async fn check_connection(&self) -> Result<(), AppError>;

    /// Lists every record, newest id first
    async fn list_experiences(&self) -> Result<Vec<WorkExperience>, AppError>;

    /// Inserts a record and returns it with its assigned id
    async fn create_experience(&self, insert: &WorkExperienceInsert) -> Result<WorkExperience, AppError>;

    /// Replaces all six fields of a record; `None` when no row has this id
    async fn update_experience(
        &self,
        id: i32,
        update: &UpdateWorkExperience
    ) -> Result<Option<WorkExperience>, AppError>;

    /// Hard-deletes a record and returns its prior values; `None` when no row has this id
    async fn delete_experience(&self, id: i32) -> Result<Option<WorkExperience>, AppError>;
}

impl SqlxExperienceRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxExperienceRepo { pool }
    }
}

#[async_trait]
impl ExperienceRepository for SqlxExperienceRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn list_experiences(&self) -> Result<Vec<WorkExperience>, AppError> {
        let experiences = sqlx::query_as::<_, WorkExperience>(
            r#"
            SELECT id, companyname, jobtitle, location, startdate, enddate, description
            FROM workexperience
            ORDER BY id DESC
            "#
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(experiences)
    }

    async fn create_experience(&self, insert: &WorkExperienceInsert) -> Result<WorkExperience, AppError> {
        let created = sqlx::query_as::<_, WorkExperience>(
            r#"
            INSERT INTO workexperience (companyname, jobtitle, location, startdate, enddate, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, companyname, jobtitle, location, startdate, enddate, description
            "#
        )
        .bind(&insert.companyname)
        .bind(&insert.jobtitle)
        .bind(&insert.location)
        .bind(insert.startdate)
        .bind(insert.enddate)
        .bind(&insert.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_experience(
        &self,
        id: i32,
        update: &UpdateWorkExperience
    ) -> Result<Option<WorkExperience>, AppError> {
        let updated = sqlx::query_as::<_, WorkExperience>(
            r#"
            UPDATE workexperience
            SET
                companyname = $1,
                jobtitle = $2,
                location = $3,
                startdate = $4,
                enddate = $5,
                description = $6
            WHERE id = $7
            RETURNING id, companyname, jobtitle, location, startdate, enddate, description
            "#
        )
        .bind(&update.companyname)
        .bind(&update.jobtitle)
        .bind(&update.location)
        .bind(update.startdate)
        .bind(update.enddate)
        .bind(&update.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_experience(&self, id: i32) -> Result<Option<WorkExperience>, AppError> {
        let deleted = sqlx::query_as::<_, WorkExperience>(
            r#"
            DELETE FROM workexperience
            WHERE id = $1
            RETURNING id, companyname, jobtitle, location, startdate, enddate, description
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }
}
