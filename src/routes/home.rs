use actix_web::HttpResponse;

pub async fn home() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "message": "Hello from actix-web!" }))
}
