use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A visual template asset registered with the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub template_id: Uuid,
    pub template_url: String,
}
