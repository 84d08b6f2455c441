//! Browser transport for document submissions.

use gloo_net::http::Request;
use intelli_extract_core::config::{ACCEPT_JSON, DOC_TYPE_FIELD, FILE_FIELD};
use intelli_extract_core::{check_status, parse_response, ExtractError, ExtractResult, ResultSet, SchemaProfile};
use web_sys::{File, FormData};

/// Upload an image for a category and normalize the response.
///
/// The endpoint is used as-is; nothing is appended to it.
pub async fn submit_document(
    file: &File,
    category_id: &str,
    endpoint: &str,
    profile: &SchemaProfile,
) -> ExtractResult<ResultSet> {
    if endpoint.is_empty() {
        return Err(ExtractError::MissingEndpoint);
    }

    let form_data = FormData::new()
        .map_err(|e| ExtractError::Transport(format!("Failed to create FormData: {:?}", e)))?;

    form_data
        .append_with_blob_and_filename(FILE_FIELD, file, &file.name())
        .map_err(|e| ExtractError::Transport(format!("Failed to append file: {:?}", e)))?;
    form_data
        .append_with_str(DOC_TYPE_FIELD, category_id)
        .map_err(|e| ExtractError::Transport(format!("Failed to append doc_type: {:?}", e)))?;

    log::info!("📤 Uploading {} ({} bytes) as '{}'", file.name(), file.size(), category_id);

    let response = Request::post(endpoint)
        .header("accept", ACCEPT_JSON)
        .body(form_data)
        .map_err(|e| ExtractError::Transport(format!("Failed to build request: {}", e)))?
        .send()
        .await
        .map_err(|e| ExtractError::Transport(e.to_string()))?;

    check_status(response.status(), &response.status_text())?;

    let body = response
        .text()
        .await
        .map_err(|e| ExtractError::Transport(e.to_string()))?;

    parse_response(&body, profile)
}
