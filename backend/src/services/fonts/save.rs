use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::font::Font;
use common::requests::SaveFontRequest;
use uuid::Uuid;

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::serialize::canonicalize;
use crate::state::AppState;

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SaveFontRequest>,
) -> impl Responder {
    let result = save_font(&state.store, payload.into_inner())
        .await
        .and_then(|font| canonicalize(&font));

    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => err.error_response(),
    }
}

pub(crate) async fn save_font(store: &Store, payload: SaveFontRequest) -> Result<Font> {
    if payload.font_url.trim().is_empty() {
        return Err(AppError::Invalid("font_url must not be empty".to_string()));
    }

    let font = Font {
        font_id: Uuid::now_v7(),
        font_url: payload.font_url,
    };
    store.insert_font(&font)?;
    Ok(font)
}
