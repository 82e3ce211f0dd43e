//! # Certificate Service Module
//!
//! This module aggregates the API endpoints for certificate generation and
//! retrieval under the `/api/certificates` path.
//!
//! ## Sub-modules:
//! - `generate`: Assembles a renderer request from a resolved configuration
//!   and caller-supplied recipient data, dispatches it to the external
//!   renderer, and persists the resulting artifact.
//! - `get`: Retrieves a previously persisted certificate record.

mod generate;
mod get;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all certificate-related API endpoints.
const API_PATH: &str = "/api/certificates";

/// Configures and returns the Actix `Scope` for all certificate routes.
///
/// # Registered Routes:
///
/// *   **`POST /generate`**:
///     - **Handler**: `generate::process`
///     - **Description**: Generates certificates for a list of recipients
///       from a stored configuration. Responds `404` when the referenced
///       configuration does not exist; renderer or storage failures abort
///       the whole operation with nothing written.
///
/// *   **`GET /{certificate_id}`**:
///     - **Handler**: `get::process`
///     - **Description**: Returns the persisted certificate record for the
///       given id, artifact included, or `404` when the id is unknown.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/generate", post().to(generate::process))
        .route("/{certificate_id}", get().to(get::process))
}
