//! Shared application state injected into every handler.
//!
//! The store handle and the renderer client are created once in `main.rs`
//! and handed to handlers through `web::Data`. Keeping them here, rather
//! than in any ambient global, ties their lifetime to the server process:
//! they exist from startup to shutdown and nowhere else.

use crate::db::Store;
use crate::renderer::RendererClient;

/// Long-lived resources shared across requests.
///
/// Cloning is cheap: the store holds a database path and the renderer
/// client clones a handle to its underlying connection pool.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub renderer: RendererClient,
}
