use std::collections::BTreeMap;

use actix_web::{web, HttpResponse, Responder, ResponseError};
use serde_json::Value;

use crate::db::Store;
use crate::error::Result;
use crate::services::configurations::canonical_view;
use crate::state::AppState;

pub(crate) async fn process(state: web::Data<AppState>) -> impl Responder {
    match list_configurations(&state.store).await {
        Ok(configurations) => {
            HttpResponse::Ok().json(serde_json::json!({ "configurations": configurations }))
        }
        Err(err) => err.error_response(),
    }
}

/// Lists every stored configuration as an independently canonicalized
/// joined view, in store-native order. No pagination.
async fn list_configurations(
    store: &Store,
) -> Result<Vec<BTreeMap<String, BTreeMap<String, Value>>>> {
    store
        .select_resolved_all()?
        .iter()
        .map(canonical_view)
        .collect()
}
