//! # Configuration Service Module
//!
//! This module aggregates all API endpoints related to template
//! configurations. It acts as a router, directing incoming HTTP requests
//! under the `/api/configurations` path to the handler logic defined in its
//! sub-modules.
//!
//! ## Sub-modules:
//! - `create`: Idempotent create-or-fetch of a named configuration.
//! - `get`: Resolves one configuration into its joined template/font view.
//! - `list`: Lists every stored configuration as a joined view.

mod create;
mod get;
mod list;

pub(crate) use get::{canonical_view, resolve_configuration};

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all configuration-related API endpoints.
const API_PATH: &str = "/api/configurations";

/// Configures and returns the Actix `Scope` for all configuration routes.
///
/// # Registered Routes:
///
/// *   **`POST /save`**:
///     - **Handler**: `create::process`
///     - **Description**: Creates a new named configuration, or returns the
///       stored one unchanged when the name is already taken. The name acts
///       as an idempotency key, so retried creation requests converge on a
///       single row.
///
/// *   **`GET /list`**:
///     - **Handler**: `list::process`
///     - **Description**: Returns every configuration joined with its
///       template and font, each entity canonically key-ordered.
///
/// *   **`GET /{template_config_id}`**:
///     - **Handler**: `get::process`
///     - **Description**: Resolves a single configuration by id into its
///       joined view, or responds `404` when the id is unknown.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(create::process))
        .route("/list", get().to(list::process))
        .route("/{template_config_id}", get().to(get::process))
}
