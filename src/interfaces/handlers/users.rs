use actix_web::{web, HttpResponse, Responder};

use crate::entities::user::{NewUser, UserAddedResponse, UserErrorResponse};

// Legacy endpoints: nothing here touches storage.

pub async fn get_users() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({"message": "Get users"}))
}

pub async fn add_user(payload: web::Json<NewUser>) -> impl Responder {
    match payload.into_inner().into_user() {
        Some(user) => HttpResponse::Ok().json(UserAddedResponse {
            message: "User added".to_string(),
            user,
        }),
        None => HttpResponse::BadRequest().json(UserErrorResponse::missing_fields()),
    }
}

pub async fn update_user(user_id: web::Path<String>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": format!("User updated: {}", user_id)
    }))
}

pub async fn delete_user(user_id: web::Path<String>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": format!("User deleted: {}", user_id)
    }))
}
