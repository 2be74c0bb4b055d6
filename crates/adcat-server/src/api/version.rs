use std::path::Path;

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use serde_json::Value;

use super::{ApiResponse, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub(super) enum VersionInfo {
    /// Contents of the deployed version file, passed through as-is.
    File(Value),
    Package(PackageVersion),
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub(super) struct PackageVersion {
    name: &'static str,
    version: &'static str,
    description: &'static str,
}

impl PackageVersion {
    pub(super) const fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
        }
    }
}

/// Reads the version file, falling back to package metadata on any failure.
pub(super) async fn load_version_info(version_file: Option<&Path>) -> VersionInfo {
    let Some(path) = version_file else {
        return VersionInfo::Package(PackageVersion::current());
    };

    let parsed = match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice::<Value>(&bytes).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match parsed {
        Ok(value) => VersionInfo::File(value),
        Err(error) => {
            tracing::debug!(path = %path.display(), %error, "version file unavailable; using package metadata");
            VersionInfo::Package(PackageVersion::current())
        }
    }
}

pub(super) async fn version(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<VersionInfo>> {
    let info = load_version_info(state.version_file.as_deref()).await;
    Json(ApiResponse::new(req_id.0, info))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_version_file_falls_back_to_package() {
        assert_eq!(
            load_version_info(None).await,
            VersionInfo::Package(PackageVersion::current())
        );

        let tmp = tempfile::tempdir().expect("tempdir");
        let missing = tmp.path().join("version.json");
        assert_eq!(
            load_version_info(Some(&missing)).await,
            VersionInfo::Package(PackageVersion::current())
        );
    }

    #[tokio::test]
    async fn malformed_version_file_falls_back_to_package() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("version.json");
        std::fs::write(&path, b"{not json").expect("write");

        assert_eq!(
            load_version_info(Some(&path)).await,
            VersionInfo::Package(PackageVersion::current())
        );
    }

    #[tokio::test]
    async fn version_file_is_passed_through() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let path = tmp.path().join("version.json");
        std::fs::write(&path, br#"{"version":"1.4.2","commit":"abc123"}"#).expect("write");

        let info = load_version_info(Some(&path)).await;
        assert_eq!(
            info,
            VersionInfo::File(serde_json::json!({"version": "1.4.2", "commit": "abc123"}))
        );
    }

    #[test]
    fn package_version_serializes_flat() {
        let json = serde_json::to_value(VersionInfo::Package(PackageVersion::current()))
            .expect("serialize");
        assert_eq!(json["name"], "adcat-server");
        assert!(json["version"].is_string());
    }
}
