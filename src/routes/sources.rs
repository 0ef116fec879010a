use actix_web::{get, web, HttpResponse};

use crate::model::{SourceList, STATUS_OK};
use crate::services::NewsService;

#[get("/sources")]
#[tracing::instrument(skip(news_service))]
pub async fn get_sources(news_service: web::Data<NewsService>) -> HttpResponse {
    HttpResponse::Ok().json(SourceList {
        status: STATUS_OK.to_owned(),
        sources: news_service.sources().to_vec(),
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_sources);
}
