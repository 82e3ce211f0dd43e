pub mod certificates;
pub mod configurations;
pub mod fonts;
pub mod templates;
