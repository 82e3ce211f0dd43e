//! SQLite-backed row store for configurations, assets and certificates.
//!
//! Each operation opens its own short-lived connection against the database
//! file, runs a single statement (or one join), and returns typed rows from
//! the `common` model. The schema is created once at startup.
//!
//! The `UNIQUE` constraint on `template_config_name` is load-bearing: the
//! configuration-creation service relies on it to detect concurrent
//! duplicate creation (see `services::configurations::create`).

use std::path::{Path, PathBuf};

use common::model::certificate::CertificateRecord;
use common::model::configuration::{ResolvedConfiguration, TemplateConfiguration};
use common::model::font::Font;
use common::model::template::Template;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use uuid::Uuid;

use crate::error::{AppError, Result};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS configurations (
    template_config_id   BLOB PRIMARY KEY,
    template_config_name TEXT NOT NULL UNIQUE,
    recipient_name_meta  TEXT NOT NULL,
    issuance_date_meta   TEXT NOT NULL,
    template_id          BLOB NOT NULL,
    font_id              BLOB NOT NULL
);
CREATE TABLE IF NOT EXISTS templates (
    template_id  BLOB PRIMARY KEY,
    template_url TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS fonts (
    font_id  BLOB PRIMARY KEY,
    font_url TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS certificates (
    certificate_id     BLOB PRIMARY KEY,
    certificate        TEXT NOT NULL,
    template_config_id BLOB NOT NULL
);
";

const RESOLVED_COLUMNS: &str = "c.template_config_id, c.template_config_name, \
     c.recipient_name_meta, c.issuance_date_meta, \
     t.template_id, t.template_url, f.font_id, f.font_url";

/// Raw column values of one joined configuration row, in `RESOLVED_COLUMNS`
/// order. The JSON text columns are parsed outside the rusqlite row closure
/// so their errors surface as serialization failures, not storage ones.
type ResolvedRow = (Uuid, String, String, String, Uuid, String, Uuid, String);

/// Handle to the SQLite database file.
#[derive(Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.path)?)
    }

    /// Creates the tables on first start; a no-op afterwards.
    pub fn init_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    pub fn select_config_by_name(&self, name: &str) -> Result<Option<TemplateConfiguration>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT template_config_id, template_config_name, recipient_name_meta, \
             issuance_date_meta, template_id, font_id \
             FROM configurations WHERE template_config_name = ?1",
        )?;

        let row: Option<(Uuid, String, String, String, Uuid, Uuid)> = stmt
            .query_row(params![name], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })
            .optional()?;

        match row {
            Some((id, name, recipient_meta, issuance_meta, template_id, font_id)) => {
                Ok(Some(TemplateConfiguration {
                    template_config_id: id,
                    template_config_name: name,
                    recipient_name_meta: serde_json::from_str(&recipient_meta)?,
                    issuance_date_meta: serde_json::from_str(&issuance_meta)?,
                    template_id,
                    font_id,
                }))
            }
            None => Ok(None),
        }
    }

    pub fn insert_config(&self, config: &TemplateConfiguration) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO configurations (template_config_id, template_config_name, \
             recipient_name_meta, issuance_date_meta, template_id, font_id) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                config.template_config_id,
                config.template_config_name,
                serde_json::to_string(&config.recipient_name_meta)?,
                serde_json::to_string(&config.issuance_date_meta)?,
                config.template_id,
                config.font_id,
            ],
        )?;
        Ok(())
    }

    /// Three-way join of one configuration with its template and font.
    /// At most one row can match because configuration ids are unique.
    pub fn select_resolved(
        &self,
        template_config_id: Uuid,
    ) -> Result<Option<ResolvedConfiguration>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {RESOLVED_COLUMNS} \
             FROM configurations c \
             JOIN templates t ON t.template_id = c.template_id \
             JOIN fonts f ON f.font_id = c.font_id \
             WHERE c.template_config_id = ?1",
        ))?;

        let row: Option<ResolvedRow> = stmt
            .query_row(params![template_config_id], read_resolved_row)
            .optional()?;

        row.map(build_resolved).transpose()
    }

    /// Same join as `select_resolved`, unfiltered. Store-native order.
    pub fn select_resolved_all(&self) -> Result<Vec<ResolvedConfiguration>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {RESOLVED_COLUMNS} \
             FROM configurations c \
             JOIN templates t ON t.template_id = c.template_id \
             JOIN fonts f ON f.font_id = c.font_id",
        ))?;

        let rows = stmt
            .query_map([], read_resolved_row)?
            .collect::<std::result::Result<Vec<ResolvedRow>, rusqlite::Error>>()?;

        rows.into_iter().map(build_resolved).collect()
    }

    pub fn insert_template(&self, template: &Template) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO templates (template_id, template_url) VALUES (?1, ?2)",
            params![template.template_id, template.template_url],
        )?;
        Ok(())
    }

    pub fn select_templates(&self) -> Result<Vec<Template>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT template_id, template_url FROM templates")?;
        let rows = stmt.query_map([], |row| {
            Ok(Template {
                template_id: row.get(0)?,
                template_url: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<_, _>>()?)
    }

    pub fn insert_font(&self, font: &Font) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO fonts (font_id, font_url) VALUES (?1, ?2)",
            params![font.font_id, font.font_url],
        )?;
        Ok(())
    }

    pub fn select_fonts(&self) -> Result<Vec<Font>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT font_id, font_url FROM fonts")?;
        let rows = stmt.query_map([], |row| {
            Ok(Font {
                font_id: row.get(0)?,
                font_url: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<_, _>>()?)
    }

    pub fn insert_certificate(&self, record: &CertificateRecord) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO certificates (certificate_id, certificate, template_config_id) \
             VALUES (?1, ?2, ?3)",
            params![
                record.certificate_id,
                serde_json::to_string(&record.certificate)?,
                record.template_config_id,
            ],
        )?;
        Ok(())
    }

    pub fn select_certificate(&self, certificate_id: Uuid) -> Result<Option<CertificateRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT certificate_id, certificate, template_config_id \
             FROM certificates WHERE certificate_id = ?1",
        )?;

        let row: Option<(Uuid, String, Uuid)> = stmt
            .query_row(params![certificate_id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .optional()?;

        match row {
            Some((certificate_id, certificate, template_config_id)) => {
                Ok(Some(CertificateRecord {
                    certificate_id,
                    certificate: serde_json::from_str(&certificate)?,
                    template_config_id,
                }))
            }
            None => Ok(None),
        }
    }
}

fn read_resolved_row(row: &rusqlite::Row<'_>) -> std::result::Result<ResolvedRow, rusqlite::Error> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn build_resolved(row: ResolvedRow) -> Result<ResolvedConfiguration> {
    let (config_id, name, recipient_meta, issuance_meta, template_id, template_url, font_id, font_url) =
        row;

    Ok(ResolvedConfiguration {
        template_config: TemplateConfiguration {
            template_config_id: config_id,
            template_config_name: name,
            recipient_name_meta: serde_json::from_str(&recipient_meta)?,
            issuance_date_meta: serde_json::from_str(&issuance_meta)?,
            template_id,
            font_id,
        },
        template: Template {
            template_id,
            template_url,
        },
        font: Font { font_id, font_url },
    })
}

/// True when the error is SQLite reporting a violated constraint, which for
/// the configurations table means a duplicate name lost the insert race.
pub fn is_unique_violation(err: &AppError) -> bool {
    match err {
        AppError::Store(e) => e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use common::model::configuration::{Position, TextPositionMeta};
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn temp_store(dir: &TempDir) -> Store {
        let store = Store::new(dir.path().join("store.sqlite"));
        store.init_schema().unwrap();
        store
    }

    fn sample_meta(x: i32, y: i32, font_size: u32) -> TextPositionMeta {
        TextPositionMeta {
            position: Position { x, y },
            font_size,
        }
    }

    fn sample_config(name: &str, template_id: Uuid, font_id: Uuid) -> TemplateConfiguration {
        TemplateConfiguration {
            template_config_id: Uuid::now_v7(),
            template_config_name: name.to_string(),
            recipient_name_meta: sample_meta(100, 200, 32),
            issuance_date_meta: sample_meta(150, 250, 24),
            template_id,
            font_id,
        }
    }

    #[test]
    fn config_roundtrips_through_name_lookup() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        let config = sample_config("cert-A", Uuid::now_v7(), Uuid::now_v7());
        store.insert_config(&config).unwrap();

        let found = store.select_config_by_name("cert-A").unwrap().unwrap();
        assert_eq!(found, config);

        assert!(store.select_config_by_name("cert-B").unwrap().is_none());
    }

    #[test]
    fn duplicate_name_insert_reports_unique_violation() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        let first = sample_config("cert-A", Uuid::now_v7(), Uuid::now_v7());
        store.insert_config(&first).unwrap();

        let second = sample_config("cert-A", Uuid::now_v7(), Uuid::now_v7());
        let err = store.insert_config(&second).unwrap_err();
        assert!(is_unique_violation(&err));

        // The first writer's row is untouched.
        let winner = store.select_config_by_name("cert-A").unwrap().unwrap();
        assert_eq!(winner.template_config_id, first.template_config_id);
    }

    #[test]
    fn resolve_joins_the_referenced_template_and_font() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        let template = Template {
            template_id: Uuid::now_v7(),
            template_url: "https://assets.example/template.png".to_string(),
        };
        let font = Font {
            font_id: Uuid::now_v7(),
            font_url: "https://assets.example/font.ttf".to_string(),
        };
        store.insert_template(&template).unwrap();
        store.insert_font(&font).unwrap();

        let config = sample_config("cert-A", template.template_id, font.font_id);
        store.insert_config(&config).unwrap();

        let resolved = store
            .select_resolved(config.template_config_id)
            .unwrap()
            .unwrap();
        assert_eq!(resolved.template_config, config);
        assert_eq!(resolved.template.template_url, template.template_url);
        assert_eq!(resolved.font.font_url, font.font_url);

        assert!(store.select_resolved(Uuid::now_v7()).unwrap().is_none());
    }

    #[test]
    fn resolve_all_returns_every_joined_configuration() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        let template = Template {
            template_id: Uuid::now_v7(),
            template_url: "https://assets.example/template.png".to_string(),
        };
        let font = Font {
            font_id: Uuid::now_v7(),
            font_url: "https://assets.example/font.ttf".to_string(),
        };
        store.insert_template(&template).unwrap();
        store.insert_font(&font).unwrap();

        store
            .insert_config(&sample_config("cert-A", template.template_id, font.font_id))
            .unwrap();
        store
            .insert_config(&sample_config("cert-B", template.template_id, font.font_id))
            .unwrap();

        let all = store.select_resolved_all().unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn certificate_roundtrips_with_its_config_reference() {
        let dir = TempDir::new().unwrap();
        let store = temp_store(&dir);

        let record = CertificateRecord {
            certificate_id: Uuid::now_v7(),
            certificate: json!({"image_url": "https://cdn.example/cert.png"}),
            template_config_id: Uuid::now_v7(),
        };
        store.insert_certificate(&record).unwrap();

        let found = store
            .select_certificate(record.certificate_id)
            .unwrap()
            .unwrap();
        assert_eq!(found, record);
        assert_eq!(found.template_config_id, record.template_config_id);

        assert!(store.select_certificate(Uuid::now_v7()).unwrap().is_none());
    }
}
