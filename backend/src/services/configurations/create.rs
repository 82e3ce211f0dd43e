//! Idempotent creation of named template configurations.
//!
//! The configuration name is the idempotency key: the first writer for a
//! given name wins permanently, and every later submission of that name
//! gets the stored row back with its payload discarded. The lookup and the
//! insert are two separate store operations, so two concurrent writers can
//! both observe "not found"; the `UNIQUE` constraint on the name column
//! settles that race, and the loser re-selects and returns the winner.

use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::configuration::TemplateConfiguration;
use common::requests::NewTemplateConfiguration;
use log::{info, warn};
use uuid::Uuid;

use crate::db::{self, Store};
use crate::error::{AppError, Result};
use crate::serialize::canonicalize;
use crate::state::AppState;

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<NewTemplateConfiguration>,
) -> impl Responder {
    let result = create_or_get(&state.store, payload.into_inner())
        .await
        .and_then(|config| canonicalize(&config));

    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => err.error_response(),
    }
}

/// Returns the stored configuration for the submitted name, creating it on
/// first use.
///
/// When a configuration with the same name already exists, the submitted
/// descriptors and references are discarded and the existing row comes back
/// unchanged, id included.
pub(crate) async fn create_or_get(
    store: &Store,
    proposed: NewTemplateConfiguration,
) -> Result<TemplateConfiguration> {
    if proposed.template_config_name.trim().is_empty() {
        return Err(AppError::Invalid(
            "template_config_name must not be empty".to_string(),
        ));
    }

    if let Some(existing) = store.select_config_by_name(&proposed.template_config_name)? {
        return Ok(existing);
    }

    let config = TemplateConfiguration {
        template_config_id: Uuid::now_v7(),
        template_config_name: proposed.template_config_name,
        recipient_name_meta: proposed.recipient_name_meta,
        issuance_date_meta: proposed.issuance_date_meta,
        template_id: proposed.template_id,
        font_id: proposed.font_id,
    };

    match store.insert_config(&config) {
        Ok(()) => {
            info!(
                "created template configuration {} ({})",
                config.template_config_name, config.template_config_id
            );
            Ok(config)
        }
        // Another writer raced us on the same name and won; its row is the
        // canonical one.
        Err(err) if db::is_unique_violation(&err) => {
            warn!(
                "configuration name {:?} was created concurrently, returning the stored row",
                config.template_config_name
            );
            store
                .select_config_by_name(&config.template_config_name)?
                .ok_or(err)
        }
        Err(err) => Err(err),
    }
}
