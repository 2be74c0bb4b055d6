use std::path::Path as FsPath;

use adcat_assets::AssetError;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Extension,
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tokio_util::io::ReaderStream;

use super::validation::validate_asset_params;
use super::{ApiError, AppState};
use crate::middleware::RequestId;

fn map_asset_error(request_id: String, error: &AssetError) -> ApiError {
    match error {
        AssetError::NotFound(_) => ApiError::new(request_id, "not_found", "Asset not found"),
        AssetError::AccessDenied(_) => ApiError::new(request_id, "forbidden", "Access denied"),
        AssetError::Io { .. } => {
            tracing::error!(error = %error, "failed to resolve asset");
            ApiError::new(request_id, "internal_error", "Failed to serve asset")
        }
    }
}

fn io_error(request_id: String, path: &FsPath, error: &std::io::Error) -> ApiError {
    tracing::error!(path = %path.display(), error = %error, "failed to open asset");
    ApiError::new(request_id, "internal_error", "Failed to serve asset")
}

/// Builds an inline `Content-Disposition` value for `filename`.
///
/// The quoted `filename` parameter only carries printable ASCII with `"` and
/// `\` replaced; when anything had to be replaced, the exact name follows as
/// an RFC 5987 `filename*` parameter.
fn inline_disposition(filename: &str) -> Option<HeaderValue> {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();

    let value = if fallback == filename {
        format!("inline; filename=\"{fallback}\"")
    } else {
        let encoded = utf8_percent_encode(filename, NON_ALPHANUMERIC);
        format!("inline; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
    };

    HeaderValue::from_str(&value).ok()
}

/// Streams `<assets root>/<category>/<filename>` back to the client.
pub(super) async fn serve_asset(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((category, filename)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let category = validate_asset_params(&req_id.0, &category, &filename)?;

    let resolver = state.assets.clone();
    let lookup = filename.clone();
    let resolved = tokio::task::spawn_blocking(move || resolver.resolve(category, &lookup))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "asset resolution task failed");
            ApiError::new(req_id.0.clone(), "internal_error", "Failed to serve asset")
        })?
        .map_err(|e| map_asset_error(req_id.0.clone(), &e))?;

    let file = tokio::fs::File::open(&resolved)
        .await
        .map_err(|e| io_error(req_id.0.clone(), &resolved, &e))?;
    let len = file
        .metadata()
        .await
        .map_err(|e| io_error(req_id.0.clone(), &resolved, &e))?
        .len();

    let content_type = mime_guess::from_path(&resolved).first_or_octet_stream();

    let mut response = Body::from_stream(ReaderStream::new(file)).into_response();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(content_type.as_ref()) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    if let Some(value) = inline_disposition(&filename) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok(response)
}
