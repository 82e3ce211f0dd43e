use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::model::configuration::TextPositionMeta;

/// The request body sent to the external image renderer.
///
/// The two placement descriptors are fixed design constants of the
/// generation pipeline; only the template and font URLs come from the
/// resolved configuration. The recipient entries are forwarded untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateMeta {
    pub recipient_name_meta: TextPositionMeta,
    pub issuance_date_meta: TextPositionMeta,
    pub template_url: String,
    pub font_url: String,
    pub issuance_date: String,
    pub recipients: Vec<Value>,
}

/// A generated certificate as persisted: the renderer's opaque artifact
/// plus the configuration it was generated from. Written once, never
/// updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateRecord {
    pub certificate_id: Uuid,
    pub certificate: Value,
    pub template_config_id: Uuid,
}
