use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::experience::{NewWorkExperience, UpdateWorkExperience},
    errors::AppError,
    repositories::experience::ExperienceRepository,
    AppState
};

#[instrument(skip(state))]
pub async fn list_experiences<R>(
    state: web::Data<AppState<R>>,
) -> Result<impl Responder, AppError>
where
    R: ExperienceRepository + 'static,
{
    let experiences = state.experience_handler.list_experiences().await?;

    Ok(HttpResponse::Ok().json(experiences))
}

#[instrument(skip(state))]
pub async fn create_experience<R>(
    state: web::Data<AppState<R>>,
    data: web::Json<NewWorkExperience>,
) -> Result<impl Responder, AppError>
where
    R: ExperienceRepository + 'static,
{
    let response = state.experience_handler
        .create_experience(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state))]
pub async fn update_experience<R>(
    experience_id: web::Path<i32>,
    state: web::Data<AppState<R>>,
    data: web::Json<UpdateWorkExperience>,
) -> Result<impl Responder, AppError>
where
    R: ExperienceRepository + 'static,
{
    let response = state.experience_handler
        .update_experience(experience_id.into_inner(), data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state))]
pub async fn delete_experience<R>(
    experience_id: web::Path<i32>,
    state: web::Data<AppState<R>>,
) -> Result<impl Responder, AppError>
where
    R: ExperienceRepository + 'static,
{
    let response = state.experience_handler
        .delete_experience(experience_id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
