use crate::core::service::BarcodeService;
use crate::core::BarcodeRenderer;
use crate::domain::model::BarcodeResponse;
use crate::utils::error::BarcodeError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const LINE_PARAMETER: &str = "line";

const FALLBACK_BODY: &str =
    r#"{"success":false,"message":"Internal error: failed to serialize response"}"#;

/// API Gateway proxy event. Only the query string is read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeRequest {
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl BarcodeRequest {
    pub fn with_line(line: impl Into<String>) -> Self {
        let mut params = HashMap::new();
        params.insert(LINE_PARAMETER.to_string(), line.into());
        Self {
            query_string_parameters: Some(params),
        }
    }

    /// The `line` parameter, if present and non-empty.
    pub fn line(&self) -> Option<&str> {
        self.query_string_parameters
            .as_ref()?
            .get(LINE_PARAMETER)
            .map(String::as_str)
            .filter(|line| !line.is_empty())
    }
}

/// API Gateway proxy response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl HttpResponse {
    pub fn json(status_code: u16, body: &BarcodeResponse) -> Self {
        let (status_code, body) = match serde_json::to_string(body) {
            Ok(body) => (status_code, body),
            Err(e) => {
                tracing::error!("Failed to serialize response body: {}", e);
                (500, FALLBACK_BODY.to_string())
            }
        };

        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        Self {
            status_code,
            headers,
            body,
            is_base64_encoded: false,
        }
    }

    pub fn parse_body(&self) -> serde_json::Result<BarcodeResponse> {
        serde_json::from_str(&self.body)
    }
}

/// Runs one request through the pipeline. Every failure becomes a JSON
/// response; nothing is propagated.
pub fn handle_request<R: BarcodeRenderer>(
    service: &BarcodeService<R>,
    request: &BarcodeRequest,
) -> HttpResponse {
    let outcome = request
        .line()
        .ok_or(BarcodeError::MissingLine)
        .and_then(|line| service.generate_base64(line));

    match outcome {
        Ok(base_64) => {
            tracing::info!(encoded_len = base_64.len(), "Barcode generated");
            HttpResponse::json(200, &BarcodeResponse::success(base_64))
        }
        Err(e) => {
            let status = e.status_code();
            if e.is_client_error() {
                tracing::warn!(status, "Rejected request: {}", e);
            } else {
                tracing::error!(status, category = ?e.category(), "Barcode generation failed: {}", e);
            }
            HttpResponse::json(status, &BarcodeResponse::failure(e.response_message()))
        }
    }
}
