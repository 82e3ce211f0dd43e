//! # Template Asset Service Module
//!
//! Endpoints for registering and listing the visual template assets that
//! configurations reference. The service stores only the asset URL; the
//! asset itself lives wherever the URL points.

mod list;
mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all template-asset API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for template-asset routes.
///
/// # Registered Routes:
///
/// *   **`POST /save`**: Registers a template URL under a freshly minted id.
/// *   **`GET /list`**: Returns every registered template.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(save::process))
        .route("/list", get().to(list::process))
}
