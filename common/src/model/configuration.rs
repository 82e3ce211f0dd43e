use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::font::Font;
use crate::model::template::Template;

/// A point on the certificate canvas, in pixels from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// Placement of one line of rendered text: where it goes and how large it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPositionMeta {
    pub position: Position,
    pub font_size: u32,
}

/// A stored template configuration: a named bundle of template and font
/// references plus the text-placement metadata captured at creation time.
///
/// The name is globally unique and acts as an idempotency key for creation.
/// The id is minted once and never changes; rows are never updated or
/// deleted after they are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfiguration {
    pub template_config_id: Uuid,
    pub template_config_name: String,
    pub recipient_name_meta: TextPositionMeta,
    pub issuance_date_meta: TextPositionMeta,
    pub template_id: Uuid,
    pub font_id: Uuid,
}

/// A configuration joined with the template and font rows it references.
/// Assembled fresh per request; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedConfiguration {
    pub template_config: TemplateConfiguration,
    pub template: Template,
    pub font: Font,
}
