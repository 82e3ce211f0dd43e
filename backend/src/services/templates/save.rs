use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::template::Template;
use common::requests::SaveTemplateRequest;
use uuid::Uuid;

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::serialize::canonicalize;
use crate::state::AppState;

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SaveTemplateRequest>,
) -> impl Responder {
    let result = save_template(&state.store, payload.into_inner())
        .await
        .and_then(|template| canonicalize(&template));

    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => err.error_response(),
    }
}

pub(crate) async fn save_template(store: &Store, payload: SaveTemplateRequest) -> Result<Template> {
    if payload.template_url.trim().is_empty() {
        return Err(AppError::Invalid("template_url must not be empty".to_string()));
    }

    let template = Template {
        template_id: Uuid::now_v7(),
        template_url: payload.template_url,
    };
    store.insert_template(&template)?;
    Ok(template)
}
