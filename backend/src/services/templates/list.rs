use std::collections::BTreeMap;

use actix_web::{web, HttpResponse, Responder, ResponseError};
use serde_json::Value;

use crate::db::Store;
use crate::error::Result;
use crate::serialize::canonicalize;
use crate::state::AppState;

pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    match list_templates(&state.store).await {
        Ok(templates) => HttpResponse::Ok().json(serde_json::json!({ "templates": templates })),
        Err(err) => err.error_response(),
    }
}

async fn list_templates(store: &Store) -> Result<Vec<BTreeMap<String, Value>>> {
    store.select_templates()?.iter().map(canonicalize).collect()
}
