use actix_web::http::{header, Method};
use actix_web::{get, web, HttpRequest, HttpResponse, Responder};
use bytes::BytesMut;
use futures::StreamExt;
use serde::Serialize;

use media_store::{ObjectStore, ObjectStores};

use crate::config::GatewayConfig;
use crate::errors::{UploadErr, CORS_ALLOW_ORIGIN};
use crate::keygen;
use crate::multipart::{self, FALLBACK_CONTENT_TYPE};
use crate::sniff::MimeSniff;

/// Everything a request handler needs; built once in `main` from a validated
/// `GatewayConfig`, so misconfiguration cannot reach the per-request path.
pub struct AppState {
    pub config: GatewayConfig,
    pub store: ObjectStores,
    pub sniffer: Option<Box<dyn MimeSniff>>,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub url: String,
    pub filename: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

/// Headroom for multipart boundaries and part headers when pre-checking the
/// raw body against the file-size ceiling.
const MULTIPART_FRAMING_ALLOWANCE: u64 = 64 * 1024;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/")
            .route(web::post().to(upload))
            .route(web::method(Method::OPTIONS).to(preflight))
            .route(web::route().to(method_not_allowed)),
    )
    .service(health)
    .default_service(web::route().to(method_not_allowed));
}

/// `Upload`: one multipart `file` part in, one stored object and its public
/// descriptor out.
async fn upload(
    req: HttpRequest,
    mut payload: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, UploadErr> {
    let content_type_header = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    // The whole body is buffered before the store write begins. The loop
    // aborts as soon as the body can no longer fit under the ceiling, so a
    // hostile client cannot force unbounded buffering before the 413.
    let hard_cap = state.config.max_upload_bytes + MULTIPART_FRAMING_ALLOWANCE;
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            tracing::error!("failed to read request body: {e}");
            UploadErr::UploadFailed {
                message: "failed to read request body".to_string(),
            }
        })?;
        if (body.len() + chunk.len()) as u64 > hard_cap {
            return Err(UploadErr::PayloadTooLarge {
                limit_mb: state.config.max_upload_mb(),
            });
        }
        body.extend_from_slice(&chunk);
    }

    let file = multipart::extract_file(&content_type_header, body.freeze()).await?;

    let size = file.data.len() as u64;
    if size > state.config.max_upload_bytes {
        return Err(UploadErr::PayloadTooLarge {
            limit_mb: state.config.max_upload_mb(),
        });
    }

    let content_type = resolve_content_type(&file.content_type, &file.data, state.sniffer.as_deref());
    let key = keygen::generate_object_key(&file.original_name);

    tracing::info!(key = %key, size, content_type = %content_type, "storing upload");

    if let Err(e) = state.store.as_trait().put_object(&key, &file.data, &content_type).await {
        tracing::error!(key = %key, "object store write failed: {e}");
        return Err(UploadErr::UploadFailed {
            message: "object store write failed".to_string(),
        });
    }

    let url = state.config.public_url_for(&key);
    Ok(HttpResponse::Ok()
        .insert_header(CORS_ALLOW_ORIGIN)
        .json(UploadResponse {
            success: true,
            url,
            filename: key,
            size,
            content_type,
        }))
}

/// Declared types are trusted; sniffing only fills in a generic declared type
/// and flags disagreements in the logs.
fn resolve_content_type(declared: &str, data: &[u8], sniffer: Option<&dyn MimeSniff>) -> String {
    let Some(sniffer) = sniffer else {
        return declared.to_string();
    };
    match sniffer.sniff(data) {
        Some(detected) if declared == FALLBACK_CONTENT_TYPE => detected.to_string(),
        Some(detected) if detected != declared => {
            tracing::warn!(declared, detected, "declared content type does not match magic bytes");
            declared.to_string()
        }
        _ => declared.to_string(),
    }
}

async fn preflight() -> impl Responder {
    HttpResponse::NoContent()
        .insert_header(CORS_ALLOW_ORIGIN)
        .insert_header(("Access-Control-Allow-Methods", "POST, GET, OPTIONS"))
        .insert_header(("Access-Control-Allow-Headers", "Content-Type"))
        .insert_header(("Access-Control-Max-Age", "86400"))
        .finish()
}

async fn method_not_allowed() -> Result<HttpResponse, UploadErr> {
    Err(UploadErr::MethodNotAllowed)
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok()
        .insert_header(CORS_ALLOW_ORIGIN)
        .json(Health { status: "ok" })
}
