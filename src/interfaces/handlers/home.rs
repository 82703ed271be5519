use actix_web::{HttpResponse, Responder};

pub async fn welcome() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to my API"
    }))
}
