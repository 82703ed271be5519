use crate::{
    entities::experience::{
        ExperienceCreatedResponse, ExperienceDeletedResponse, ExperienceUpdatedResponse,
        NewWorkExperience, UpdateWorkExperience, WorkExperience, WorkExperienceInsert
    },
    errors::AppError,
    repositories::experience::ExperienceRepository,
};

pub const NOT_FOUND_MESSAGE: &str = "Work experience not found";

pub struct ExperienceHandler<R>
where
    R: ExperienceRepository,
{
    pub experience_repo: R,
}

impl<R> ExperienceHandler<R>
where
    R: ExperienceRepository,
{
    pub fn new(experience_repo: R) -> Self {
        ExperienceHandler { experience_repo }
    }

    /// Lists all work experiences, newest first
    pub async fn list_experiences(&self) -> Result<Vec<WorkExperience>, AppError> {
        self.experience_repo.list_experiences().await
    }

    /// Validates and stores a new work experience
    pub async fn create_experience(
        &self,
        request: NewWorkExperience
    ) -> Result<ExperienceCreatedResponse, AppError> {
        let insert: WorkExperienceInsert = request.try_into()?;

        let created = self.experience_repo.create_experience(&insert).await?;
        tracing::info!(id = created.id, "work experience created");

        Ok(ExperienceCreatedResponse {
            message: "Work experience created successfully".to_string(),
            new_experience: created,
        })
    }

    /// Replaces every field of an existing work experience
    pub async fn update_experience(
        &self,
        id: i32,
        request: UpdateWorkExperience
    ) -> Result<ExperienceUpdatedResponse, AppError> {
        let updated = self.experience_repo
            .update_experience(id, &request)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        Ok(ExperienceUpdatedResponse {
            message: "Work experience updated successfully".to_string(),
            updated_experience: updated,
        })
    }

    /// Deletes a work experience, returning what was removed
    pub async fn delete_experience(&self, id: i32) -> Result<ExperienceDeletedResponse, AppError> {
        let deleted = self.experience_repo
            .delete_experience(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;
        tracing::info!(id = deleted.id, "work experience deleted");

        Ok(ExperienceDeletedResponse {
            message: "Work experience deleted successfully".to_string(),
            deleted,
        })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use mockall::{mock, predicate::eq};

    use super::*;

    mock! {
        pub ExperienceRepo {}

        #[async_trait]
        impl ExperienceRepository for ExperienceRepo {
            async fn check_connection(&self) -> Result<(), AppError>;
            async fn list_experiences(&self) -> Result<Vec<WorkExperience>, AppError>;
            async fn create_experience(&self, insert: &WorkExperienceInsert) -> Result<WorkExperience, AppError>;
            async fn update_experience(&self, id: i32, update: &UpdateWorkExperience) -> Result<Option<WorkExperience>, AppError>;
            async fn delete_experience(&self, id: i32) -> Result<Option<WorkExperience>, AppError>;
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn acme(id: i32) -> WorkExperience {
        WorkExperience {
            id,
            companyname: "Acme".into(),
            jobtitle: "Engineer".into(),
            location: "Remote".into(),
            startdate: date(2020, 1, 1),
            enddate: date(2021, 1, 1),
            description: "Built things".into(),
        }
    }

    fn acme_request() -> NewWorkExperience {
        NewWorkExperience {
            companyname: Some("Acme".into()),
            jobtitle: Some("Engineer".into()),
            location: Some("Remote".into()),
            startdate: Some("2020-01-01".into()),
            enddate: Some("2021-01-01".into()),
            description: Some("Built things".into()),
        }
    }

    #[tokio::test]
    async fn create_returns_stored_record() {
        let mut repo = MockExperienceRepo::new();
        repo.expect_create_experience()
            .withf(|insert| insert.companyname == "Acme" && insert.startdate == date(2020, 1, 1))
            .times(1)
            .returning(|_| Ok(acme(1)));

        let handler = ExperienceHandler::new(repo);
        let response = handler.create_experience(acme_request()).await.unwrap();

        assert_eq!(response.new_experience, acme(1));
        assert_eq!(response.message, "Work experience created successfully");
    }

    #[tokio::test]
    async fn create_with_missing_fields_never_reaches_storage() {
        let mut repo = MockExperienceRepo::new();
        repo.expect_create_experience().never();

        let handler = ExperienceHandler::new(repo);
        let request = NewWorkExperience {
            companyname: None,
            enddate: Some(String::new()),
            ..acme_request()
        };

        match handler.create_experience(request).await {
            Err(AppError::ValidationError(fields)) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["companyname", "enddate"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_passes_storage_order_through() {
        let mut repo = MockExperienceRepo::new();
        repo.expect_list_experiences()
            .returning(|| Ok(vec![acme(2), acme(1)]));

        let handler = ExperienceHandler::new(repo);
        let ids: Vec<i32> = handler.list_experiences().await.unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();

        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn list_storage_failure_is_storage_error() {
        let mut repo = MockExperienceRepo::new();
        repo.expect_list_experiences()
            .returning(|| Err(AppError::StorageError("connection refused".into())));

        let handler = ExperienceHandler::new(repo);
        let result = handler.list_experiences().await;

        assert!(matches!(result, Err(AppError::StorageError(_))));
    }

    #[tokio::test]
    async fn update_missing_row_is_not_found() {
        let mut repo = MockExperienceRepo::new();
        repo.expect_update_experience()
            .with(eq(42), mockall::predicate::always())
            .returning(|_, _| Ok(None));

        let handler = ExperienceHandler::new(repo);
        let result = handler.update_experience(42, UpdateWorkExperience::default()).await;

        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, NOT_FOUND_MESSAGE),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_echoes_new_values() {
        let mut repo = MockExperienceRepo::new();
        repo.expect_update_experience()
            .returning(|id, update| {
                Ok(Some(WorkExperience {
                    id,
                    companyname: update.companyname.clone().unwrap_or_default(),
                    ..acme(id)
                }))
            });

        let handler = ExperienceHandler::new(repo);
        let request = UpdateWorkExperience {
            companyname: Some("Globex".into()),
            ..UpdateWorkExperience::default()
        };
        let response = handler.update_experience(7, request).await.unwrap();

        assert_eq!(response.updated_experience.id, 7);
        assert_eq!(response.updated_experience.companyname, "Globex");
    }

    #[tokio::test]
    async fn delete_returns_prior_values() {
        let mut repo = MockExperienceRepo::new();
        repo.expect_delete_experience()
            .with(eq(3))
            .returning(|id| Ok(Some(acme(id))));

        let handler = ExperienceHandler::new(repo);
        let response = handler.delete_experience(3).await.unwrap();

        assert_eq!(response.deleted, acme(3));
    }

    #[tokio::test]
    async fn delete_missing_row_is_not_found() {
        let mut repo = MockExperienceRepo::new();
        repo.expect_delete_experience().returning(|_| Ok(None));

        let handler = ExperienceHandler::new(repo);
        let result = handler.delete_experience(99).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
