use actix_web::http::StatusCode;
use actix_web::{get, web, HttpResponse, ResponseError};
use serde_json::json;

use crate::services::news::RequestError;

pub mod news;
pub mod sources;

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidParameter(#[from] RequestError),
    #[error("Malformed query string: {0}")]
    MalformedQuery(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidParameter(_) | ApiError::MalformedQuery(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({"type": "/problem/invalid-parameter",
            "title": "Invalid request parameter",
            "status": self.status_code().as_u16(),
            "detail": self.to_string()}))
    }
}

#[get("/ping")]
#[tracing::instrument]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("pong")
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|error, _| ApiError::MalformedQuery(error.to_string()).into()),
    )
    .service(ping)
    .configure(news::configure)
    .configure(sources::configure);
}
