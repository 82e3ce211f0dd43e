use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A font asset registered with the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub font_id: Uuid,
    pub font_url: String,
}
