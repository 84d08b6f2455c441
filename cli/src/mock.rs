//! Mock extraction service for local development and end-to-end tests.
//!
//! Stands in for the real comparison backend so the browser form and the CLI
//! can be exercised without it.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                               |
//! |--------|-------------------|-------------------------------------------|
//! | GET    | `/health`         | Health check                              |
//! | POST   | `/api/v1/compare` | Multipart `file` + `doc_type` → envelope  |
//!
//! The compare endpoint answers with a canned envelope in one of the observed
//! schema flavors, a fixture file verbatim, or a forced error status.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Multipart, State},
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::error::{ServerError, ServerResult};
use intelli_extract_core::config::{DOC_TYPE_FIELD, FILE_FIELD};

/// Path of the compare endpoint.
pub const COMPARE_PATH: &str = "/api/v1/compare";

/// Uploads kept for inspection; older ones are dropped.
pub const MAX_RECORDED_UPLOADS: usize = 100;

/// Envelope revision served by the canned responses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MockFlavor {
    /// `M1`/`M2`/`M3` with `consensus_score`
    #[default]
    MSeries,
    /// Named model methods with `Cumulative_Score`
    Legacy,
    /// `M1`/`M2`/`M3` with `"NN%"` score strings
    Percent,
}

impl MockFlavor {
    fn method_keys(&self) -> [&'static str; 3] {
        match self {
            MockFlavor::MSeries | MockFlavor::Percent => ["M1", "M2", "M3"],
            MockFlavor::Legacy => ["legacy_ocr_regex", "llama_maverick_17b", "llama_11b"],
        }
    }

    fn score_field(&self) -> &'static str {
        match self {
            MockFlavor::MSeries | MockFlavor::Percent => "consensus_score",
            MockFlavor::Legacy => "Cumulative_Score",
        }
    }

    fn score(&self, fraction: f64) -> Value {
        match self {
            MockFlavor::Percent => json!(format!("{}%", (fraction * 100.0).round())),
            _ => json!(fraction),
        }
    }
}

/// What the compare endpoint answers with.
#[derive(Clone, Debug, PartialEq)]
pub enum MockResponse {
    /// Per-category sample data in a schema flavor
    Canned(MockFlavor),
    /// A fixed JSON body
    Fixture(Value),
    /// An error status with a small JSON body
    Status(StatusCode),
}

impl MockResponse {
    /// Load a fixture body from disk.
    pub fn fixture_file(path: &std::path::Path) -> ServerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let value = serde_json::from_str(&content).map_err(|e| ServerError::InvalidFixture(e.to_string()))?;
        Ok(MockResponse::Fixture(value))
    }

    /// Force a status code.
    pub fn status(code: u16) -> ServerResult<Self> {
        StatusCode::from_u16(code)
            .map(MockResponse::Status)
            .map_err(|_| ServerError::InvalidStatus(code))
    }
}

/// One upload as seen by the mock.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReceivedUpload {
    pub filename: Option<String>,
    pub size: usize,
    pub doc_type: Option<String>,
}

/// Shared state of the mock service.
#[derive(Clone)]
pub struct MockService {
    response: MockResponse,
    received: Arc<Mutex<Vec<ReceivedUpload>>>,
}

impl MockService {
    pub fn new(response: MockResponse) -> Self {
        Self {
            response,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// The most recent uploads, oldest first.
    pub fn received(&self) -> Vec<ReceivedUpload> {
        self.received.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn record(&self, upload: ReceivedUpload) {
        if let Ok(mut received) = self.received.lock() {
            if received.len() >= MAX_RECORDED_UPLOADS {
                let excess = received.len() + 1 - MAX_RECORDED_UPLOADS;
                received.drain(..excess);
            }
            received.push(upload);
        }
    }
}

/// Build the router.
pub fn router(service: MockService) -> Router {
    // Permissive CORS so the browser form can call the mock from another port
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route(COMPARE_PATH, post(compare))
        .layer(cors)
        .with_state(service)
}

/// Bind and serve until the process exits.
pub async fn start_server(port: u16, service: MockService) -> ServerResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Mock extraction service running on http://localhost:{}", port);
    println!("   POST {} - Compare extraction methods", COMPARE_PATH);
    println!("   GET  /health          - Health check");
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(service)).await?;
    Ok(())
}

/// Serve on a background task; returns the bound address.
/// Bind to port 0 for an ephemeral port.
pub async fn spawn(addr: SocketAddr, service: MockService) -> ServerResult<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router(service)).await {
            log::error!("Mock server stopped: {}", e);
        }
    });
    Ok(local)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "intelli-extract-mock",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "compare": format!("POST {}", COMPARE_PATH)
        }
    }))
}

async fn compare(
    State(service): State<MockService>,
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let mut upload = ReceivedUpload {
        filename: None,
        size: 0,
        doc_type: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error_reply(StatusCode::BAD_REQUEST, &format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == FILE_FIELD {
            upload.filename = field.file_name().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| error_reply(StatusCode::BAD_REQUEST, &format!("Read error: {}", e)))?;
            upload.size = bytes.len();
        } else if name == DOC_TYPE_FIELD {
            upload.doc_type = Some(
                field
                    .text()
                    .await
                    .map_err(|e| error_reply(StatusCode::BAD_REQUEST, &format!("Read error: {}", e)))?,
            );
        }
    }

    log::info!(
        "📄 Upload: {} ({} bytes) doc_type={}",
        upload.filename.as_deref().unwrap_or("unknown"),
        upload.size,
        upload.doc_type.as_deref().unwrap_or("-")
    );
    service.record(upload.clone());

    if upload.filename.is_none() && upload.size == 0 {
        return Err(error_reply(StatusCode::BAD_REQUEST, "No file provided"));
    }

    match &service.response {
        MockResponse::Status(status) => Err(error_reply(*status, "Forced failure")),
        MockResponse::Fixture(body) => Ok(Json(body.clone())),
        MockResponse::Canned(flavor) => Ok(Json(canned_envelope(
            *flavor,
            upload.doc_type.as_deref().unwrap_or(""),
            upload.filename.as_deref().unwrap_or("upload"),
        ))),
    }
}

fn error_reply(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "success": false, "error": message })))
}

/// Sample attribute values (clean form) for a category.
fn sample_fields(doc_type: &str) -> Vec<(&'static str, &'static str)> {
    match doc_type {
        "passport" => vec![
            ("name", "Rahul Sharma"),
            ("passport_number", "K1234567"),
            ("dob", "1988-03-12"),
            ("nationality", "Indian"),
        ],
        "voterid" => vec![
            ("name", "Anita Desai"),
            ("epic_number", "ABC1234567"),
            ("father_name", "Mohan Desai"),
        ],
        "domicile" => vec![
            ("name", "Vikram Rao"),
            ("address", "14 MG Road, Bengaluru"),
            ("district", "Bengaluru Urban"),
        ],
        "license" => vec![
            ("name", "Priya Patil"),
            ("license_number", "MH12 20110012345"),
            ("valid_till", "2031-05-30"),
        ],
        "marksheet" => vec![
            ("name", "Arjun Mehta"),
            ("roll_number", "2219034"),
            ("total_marks", "452"),
        ],
        "aadhaar" => vec![
            ("name", "Sneha Iyer"),
            ("aadhaar_number", "1234 5678 9012"),
            ("dob", "1995-07-21"),
            ("gender", "Female"),
        ],
        _ => vec![("name", "Unknown")],
    }
}

const SAMPLE_SCORES: [f64; 4] = [0.99, 0.91, 0.62, 0.97];

/// Build a response envelope for a category in a schema flavor.
///
/// Method 1 reports upper-cased OCR values plus raw text, method 2 the clean
/// values under capitalized keys, and method 3 omits the last attribute.
pub fn canned_envelope(flavor: MockFlavor, doc_type: &str, filename: &str) -> Value {
    let fields = sample_fields(doc_type);
    let [m1_key, m2_key, m3_key] = flavor.method_keys();

    let mut matrix = Map::new();
    let mut m1 = Map::new();
    let mut m2 = Map::new();
    let mut m3 = Map::new();

    for (i, (attribute, value)) in fields.iter().enumerate() {
        let score = SAMPLE_SCORES[i % SAMPLE_SCORES.len()];
        matrix.insert(attribute.to_string(), json!({ flavor.score_field(): flavor.score(score) }));

        m1.insert(attribute.to_string(), json!(value.to_uppercase()));
        m2.insert(capitalize(attribute), json!(value));
        if i + 1 < fields.len() {
            m3.insert(attribute.to_string(), json!(value));
        }
    }

    let raw_text = fields
        .iter()
        .map(|(_, value)| value.to_uppercase())
        .collect::<Vec<_>>()
        .join("\n");
    m1.insert("raw_text".to_string(), json!(raw_text));

    json!({
        "success": true,
        "filename": filename,
        "document_type": doc_type,
        "results": {
            "confidence_matrix": matrix,
            "extractions": {
                m1_key: m1,
                m2_key: m2,
                m3_key: m3,
            }
        }
    })
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
