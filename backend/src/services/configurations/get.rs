//! # Configuration Resolution Service
//!
//! This module resolves a configuration identifier into the fully joined
//! view a caller (or the certificate pipeline) needs: the configuration row
//! together with the template and font rows it references. It provides the
//! backend logic for the `GET /api/configurations/{template_config_id}`
//! endpoint.
//!
//! ## Workflow
//!
//! 1.  **HTTP Request**: The `process` function serves as the Actix web
//!     handler. It receives a GET request carrying a `template_config_id`
//!     in the URL path.
//!
//! 2.  **Join Query**: It delegates to `resolve_configuration`, which runs
//!     a three-way join across the `configurations`, `templates` and
//!     `fonts` tables filtered by the given id. Configuration ids are
//!     unique, so the join yields at most one row.
//!
//! 3.  **Not-found Handling**: Zero rows means the id was never created.
//!     That is a client error, mapped to a `404` response; it is never
//!     retried and never treated as a server fault.
//!
//! 4.  **Canonical View**: `canonical_view` serializes each joined entity
//!     with lexicographically ordered keys, grouped under
//!     `template_config` / `template` / `font`, so response bodies are
//!     stable and diff-friendly.
//!
//! The resolution logic is shared: `list` reuses `canonical_view` for each
//! row of the unfiltered join, and certificate generation calls
//! `resolve_configuration` before it talks to the renderer.

use std::collections::BTreeMap;

use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::configuration::ResolvedConfiguration;
use serde_json::Value;
use uuid::Uuid;

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::serialize::canonicalize;
use crate::state::AppState;

pub(crate) async fn process(
    template_config_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> impl Responder {
    let result = resolve_configuration(&state.store, template_config_id.into_inner())
        .await
        .and_then(|resolved| canonical_view(&resolved));

    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => err.error_response(),
    }
}

/// Resolves a configuration id into its joined view, or fails with a
/// client-visible not-found when the id does not exist.
pub(crate) async fn resolve_configuration(
    store: &Store,
    template_config_id: Uuid,
) -> Result<ResolvedConfiguration> {
    store
        .select_resolved(template_config_id)?
        .ok_or_else(|| AppError::NotFound(format!("no configuration with id {template_config_id}")))
}

/// Canonicalizes each entity of a resolved view independently, keeping the
/// outer `template_config` / `template` / `font` grouping.
pub(crate) fn canonical_view(
    resolved: &ResolvedConfiguration,
) -> Result<BTreeMap<String, BTreeMap<String, Value>>> {
    Ok(BTreeMap::from([
        (
            "template_config".to_string(),
            canonicalize(&resolved.template_config)?,
        ),
        ("template".to_string(), canonicalize(&resolved.template)?),
        ("font".to_string(), canonicalize(&resolved.font)?),
    ]))
}
