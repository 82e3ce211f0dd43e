//! # Certificate Generation Service
//!
//! This module provides the `POST /api/certificates/generate` endpoint,
//! which turns a stored configuration plus caller-supplied recipient data
//! into a rendered certificate artifact.
//!
//! ## Workflow:
//!
//! 1.  **HTTP Request**: The `process` handler receives a
//!     `GenerateCertificateRequest` containing a `template_config_id`, an
//!     issuance date and a list of recipients.
//!
//! 2.  **Resolution**: It resolves the configuration through the
//!     configuration service's join. An unknown id fails the request with
//!     `404` before anything else happens.
//!
//! 3.  **Request Assembly**: `build_certificate_meta` merges the fixed
//!     placement descriptors with the resolved template URL, resolved font
//!     URL, issuance date and recipients. The placements are design
//!     constants of this pipeline; the descriptors stored on the
//!     configuration itself are not consulted here.
//!
//! 4.  **Rendering**: The assembled metadata is POSTed to the external
//!     renderer. Its reply is an opaque JSON object and is passed through
//!     without inspection.
//!
//! 5.  **Persistence**: A fresh time-ordered certificate id is minted (its
//!     own namespace, independent of configuration ids) and the artifact is
//!     persisted as a `CertificateRecord` referencing the configuration.
//!
//! 6.  **Response**: The artifact goes back to the caller augmented with
//!     `certificate_id` and `template_config_id`, so the client receives
//!     both the rendered payload and its persisted coordinates.
//!
//! A renderer failure or a storage failure aborts the whole operation; no
//! partial certificate record is ever written.

use actix_web::{web, HttpResponse, Responder, ResponseError};
use common::model::certificate::{CertificateMeta, CertificateRecord};
use common::model::configuration::{Position, ResolvedConfiguration, TextPositionMeta};
use common::requests::GenerateCertificateRequest;
use log::info;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::db::Store;
use crate::error::Result;
use crate::renderer::RendererClient;
use crate::services::configurations::resolve_configuration;
use crate::state::AppState;

/// Placement of the recipient name on every generated certificate.
const RECIPIENT_NAME_LAYOUT: TextPositionMeta = TextPositionMeta {
    position: Position { x: 522, y: 420 },
    font_size: 64,
};

/// Placement of the issuance date on every generated certificate.
const ISSUANCE_DATE_LAYOUT: TextPositionMeta = TextPositionMeta {
    position: Position { x: 310, y: 514 },
    font_size: 48,
};

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<GenerateCertificateRequest>,
) -> impl Responder {
    match generate_certificate(&state.store, &state.renderer, payload.into_inner()).await {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => err.error_response(),
    }
}

/// Runs the full generation pipeline: resolve, render, persist, respond.
pub(crate) async fn generate_certificate(
    store: &Store,
    renderer: &RendererClient,
    request: GenerateCertificateRequest,
) -> Result<Map<String, Value>> {
    let template_config_id = request.template_config_id;
    let resolved = resolve_configuration(store, template_config_id).await?;

    let meta = build_certificate_meta(&resolved, request.issuance_date, request.recipients);
    let artifact = renderer.render(&meta).await?;

    let certificate_id = Uuid::now_v7();
    store.insert_certificate(&CertificateRecord {
        certificate_id,
        certificate: Value::Object(artifact.clone()),
        template_config_id,
    })?;

    info!(
        "generated certificate {certificate_id} from configuration {template_config_id}"
    );

    let mut body = artifact;
    body.insert(
        "certificate_id".to_string(),
        Value::String(certificate_id.to_string()),
    );
    body.insert(
        "template_config_id".to_string(),
        Value::String(template_config_id.to_string()),
    );
    Ok(body)
}

/// Assembles the renderer request from a resolved configuration.
///
/// Only the template and font URLs come from the configuration; the
/// placement descriptors are the fixed pipeline constants above, not the
/// per-configuration metadata stored alongside them.
fn build_certificate_meta(
    resolved: &ResolvedConfiguration,
    issuance_date: String,
    recipients: Vec<Value>,
) -> CertificateMeta {
    CertificateMeta {
        recipient_name_meta: RECIPIENT_NAME_LAYOUT,
        issuance_date_meta: ISSUANCE_DATE_LAYOUT,
        template_url: resolved.template.template_url.clone(),
        font_url: resolved.font.font_url.clone(),
        issuance_date,
        recipients,
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    use common::model::configuration::TemplateConfiguration;
    use common::model::font::Font;
    use common::model::template::Template;
    use serde_json::json;
    use tempfile::TempDir;

    use crate::error::AppError;

    use super::*;

    /// One-shot HTTP stub standing in for the external renderer.
    fn spawn_stub_renderer(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 65536];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "{status_line}\r\nContent-Type: application/json\r\n\
                     Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len(),
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/render")
    }

    fn seeded_store(dir: &TempDir) -> (Store, TemplateConfiguration) {
        let store = Store::new(dir.path().join("store.sqlite"));
        store.init_schema().unwrap();

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

        let config = TemplateConfiguration {
            template_config_id: Uuid::now_v7(),
            template_config_name: "cert-A".to_string(),
            recipient_name_meta: TextPositionMeta {
                position: Position { x: 1, y: 2 },
                font_size: 10,
            },
            issuance_date_meta: TextPositionMeta {
                position: Position { x: 3, y: 4 },
                font_size: 12,
            },
            template_id: template.template_id,
            font_id: font.font_id,
        };
        store.insert_config(&config).unwrap();
        (store, config)
    }

    fn certificate_count(dir: &TempDir) -> i64 {
        let conn = rusqlite::Connection::open(dir.path().join("store.sqlite")).unwrap();
        conn.query_row("SELECT COUNT(*) FROM certificates", [], |row| row.get(0))
            .unwrap()
    }

    fn sample_resolved() -> ResolvedConfiguration {
        let template_id = Uuid::now_v7();
        let font_id = Uuid::now_v7();
        ResolvedConfiguration {
            template_config: TemplateConfiguration {
                template_config_id: Uuid::now_v7(),
                template_config_name: "cert-A".to_string(),
                // Stored placements differ from the pipeline constants so
                // the tests can tell them apart.
                recipient_name_meta: TextPositionMeta {
                    position: Position { x: 1, y: 2 },
                    font_size: 10,
                },
                issuance_date_meta: TextPositionMeta {
                    position: Position { x: 3, y: 4 },
                    font_size: 12,
                },
                template_id,
                font_id,
            },
            template: Template {
                template_id,
                template_url: "https://assets.example/template.png".to_string(),
            },
            font: Font {
                font_id,
                font_url: "https://assets.example/font.ttf".to_string(),
            },
        }
    }

    #[test]
    fn renderer_request_uses_the_fixed_placements() {
        let resolved = sample_resolved();
        let meta = build_certificate_meta(
            &resolved,
            "2024-01-01".to_string(),
            vec![json!({"name": "Alice"})],
        );

        assert_eq!(meta.recipient_name_meta, RECIPIENT_NAME_LAYOUT);
        assert_eq!(meta.issuance_date_meta, ISSUANCE_DATE_LAYOUT);
        assert_ne!(
            meta.recipient_name_meta,
            resolved.template_config.recipient_name_meta
        );
        assert_eq!(meta.template_url, "https://assets.example/template.png");
        assert_eq!(meta.font_url, "https://assets.example/font.ttf");
        assert_eq!(meta.recipients, vec![json!({"name": "Alice"})]);
    }

    #[actix_web::test]
    async fn persists_the_artifact_and_augments_the_response() {
        let dir = TempDir::new().unwrap();
        let (store, config) = seeded_store(&dir);

        let endpoint = spawn_stub_renderer(
            "HTTP/1.1 200 OK",
            r#"{"image_url": "https://cdn.example/cert.png"}"#,
        );
        let renderer = RendererClient::new(endpoint, Duration::from_secs(5)).unwrap();

        let request = GenerateCertificateRequest {
            template_config_id: config.template_config_id,
            issuance_date: "2024-01-01".to_string(),
            recipients: vec![json!({"name": "Alice"})],
        };

        let body = generate_certificate(&store, &renderer, request)
            .await
            .unwrap();

        assert_eq!(body["image_url"], "https://cdn.example/cert.png");
        assert_eq!(
            body["template_config_id"],
            config.template_config_id.to_string()
        );

        let certificate_id: Uuid = body["certificate_id"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        let record = store.select_certificate(certificate_id).unwrap().unwrap();
        assert_eq!(record.template_config_id, config.template_config_id);
        assert_eq!(
            record.certificate,
            json!({"image_url": "https://cdn.example/cert.png"})
        );
    }

    #[actix_web::test]
    async fn renderer_failure_leaves_the_store_untouched() {
        let dir = TempDir::new().unwrap();
        let (store, config) = seeded_store(&dir);

        let endpoint = spawn_stub_renderer("HTTP/1.1 500 Internal Server Error", "{}");
        let renderer = RendererClient::new(endpoint, Duration::from_secs(5)).unwrap();

        let request = GenerateCertificateRequest {
            template_config_id: config.template_config_id,
            issuance_date: "2024-01-01".to_string(),
            recipients: vec![json!({"name": "Alice"})],
        };

        let err = generate_certificate(&store, &renderer, request)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Renderer(_)));
        assert_eq!(certificate_count(&dir), 0);
    }

    #[actix_web::test]
    async fn unknown_configuration_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(dir.path().join("store.sqlite"));
        store.init_schema().unwrap();
        // Never contacted: resolution fails first.
        let renderer =
            RendererClient::new("http://127.0.0.1:9/render", Duration::from_secs(1)).unwrap();

        let request = GenerateCertificateRequest {
            template_config_id: Uuid::now_v7(),
            issuance_date: "2024-01-01".to_string(),
            recipients: vec![json!({"name": "Alice"})],
        };

        let err = generate_certificate(&store, &renderer, request)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(certificate_count(&dir), 0);
    }
}
