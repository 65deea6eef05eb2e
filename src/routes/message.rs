use actix_web::{get, post, web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;

use crate::databases::messages;

/// Incoming create payload. Creation time is always server-assigned, so a
/// client-supplied `timestamp` has no field to land in and is ignored.
#[derive(Debug, Deserialize)]
pub struct NewMessage {
    pub name: Option<String>,
    pub body: Option<String>,
}

#[get("/api/v1/message")]
pub async fn get_messages(pool: web::Data<SqlitePool>) -> impl Responder {
    match messages::list_all(pool.get_ref()).await {
        Ok(messages) => HttpResponse::Ok().json(json!({ "messages": messages })),
        Err(e) => {
            log::error!("Error fetching messages: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/api/v1/message")]
pub async fn post_message(
    pool: web::Data<SqlitePool>,
    payload: web::Json<NewMessage>,
) -> impl Responder {
    let NewMessage { name, body } = payload.into_inner();

    let (name, body) = match (name, body) {
        (Some(name), Some(body)) => (name, body),
        (name, body) => {
            let mut missing = Vec::new();
            if name.is_none() {
                missing.push("name");
            }
            if body.is_none() {
                missing.push("body");
            }
            return HttpResponse::BadRequest().json(json!({
                "error": "missing required fields",
                "fields": missing,
            }));
        }
    };

    match messages::create(pool.get_ref(), &name, &body, None).await {
        Ok(message) => HttpResponse::Created().json(message),
        Err(e) => {
            log::error!("Error creating message: {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(get_messages);
    cfg.service(post_message);
}
