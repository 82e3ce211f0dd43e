//! # Font Asset Service Module
//!
//! Endpoints for registering and listing the font assets that
//! configurations reference. Mirrors the template-asset service.

mod list;
mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all font-asset API endpoints.
const API_PATH: &str = "/api/fonts";

/// Configures and returns the Actix `Scope` for font-asset routes.
///
/// # Registered Routes:
///
/// *   **`POST /save`**: Registers a font URL under a freshly minted id.
/// *   **`GET /list`**: Returns every registered font.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(save::process))
        .route("/list", get().to(list::process))
}
