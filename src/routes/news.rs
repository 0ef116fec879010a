use actix_web::{get, web, HttpResponse};

use crate::model::NewsParameters;
use crate::routes::ApiError;
use crate::services::NewsService;

#[get("/news")]
#[tracing::instrument(skip(news_service))]
pub async fn get_news(
    parameters: web::Query<NewsParameters>,
    news_service: web::Data<NewsService>,
) -> Result<HttpResponse, ApiError> {
    let request = news_service.validate(parameters.into_inner())?;
    let page = news_service.get_news(&request).await;

    Ok(HttpResponse::Ok()
        .content_type("application/json; charset=utf-8")
        .json(page))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_news);
}
