use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::model::configuration::TextPositionMeta;

/// Request payload for the configuration-creation endpoint.
/// Unknown fields are rejected so open-ended mappings never travel past
/// the boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewTemplateConfiguration {
    pub template_config_name: String,
    pub recipient_name_meta: TextPositionMeta,
    pub issuance_date_meta: TextPositionMeta,
    pub template_id: Uuid,
    pub font_id: Uuid,
}

/// Request payload for the certificate-generation endpoint.
/// The recipient entries are opaque and reach the renderer as-is.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateCertificateRequest {
    pub template_config_id: Uuid,
    pub issuance_date: String,
    pub recipients: Vec<Value>,
}

/// Request payload for registering a template asset.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveTemplateRequest {
    pub template_url: String,
}

/// Request payload for registering a font asset.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveFontRequest {
    pub font_url: String,
}
