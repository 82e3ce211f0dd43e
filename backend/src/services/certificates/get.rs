use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::certificate::CertificateRecord;
use uuid::Uuid;

use crate::db::Store;
use crate::error::{AppError, Result};
use crate::serialize::canonicalize;
use crate::state::AppState;

pub(crate) async fn process(
    certificate_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> impl Responder {
    let result = get_certificate(&state.store, certificate_id.into_inner())
        .await
        .and_then(|record| canonicalize(&record));

    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => err.error_response(),
    }
}

async fn get_certificate(store: &Store, certificate_id: Uuid) -> Result<CertificateRecord> {
    store
        .select_certificate(certificate_id)?
        .ok_or_else(|| AppError::NotFound(format!("no certificate with id {certificate_id}")))
}
