//! Request-shape checks applied before any store or filesystem access.

use adcat_core::{AdFilters, AdStatus, AssetCategory};
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use super::ApiError;

/// Raw query string of `GET /api/ads`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct AdListQuery {
    pub status: Option<String>,
    pub platform: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub multiple_versions: Option<String>,
}

fn validation_error(req_id: &str, message: impl Into<String>) -> ApiError {
    ApiError::new(req_id, "validation_error", message)
}

/// Empty query values are treated as absent, except `multipleVersions`,
/// which must be spelled out when present.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, keeping only the date.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

pub(in crate::api) fn parse_filters(req_id: &str, query: AdListQuery) -> Result<AdFilters, ApiError> {
    let status = match present(query.status).as_deref() {
        None => None,
        Some("active") => Some(AdStatus::Active),
        Some("inactive") => Some(AdStatus::Inactive),
        Some(_) => {
            return Err(validation_error(
                req_id,
                "Invalid status. Must be \"active\" or \"inactive\"",
            ))
        }
    };

    let start_date = match present(query.start_date) {
        None => None,
        Some(raw) => Some(
            parse_date(&raw).ok_or_else(|| validation_error(req_id, "Invalid startDate format"))?,
        ),
    };

    let end_date = match present(query.end_date) {
        None => None,
        Some(raw) => Some(
            parse_date(&raw).ok_or_else(|| validation_error(req_id, "Invalid endDate format"))?,
        ),
    };

    if let (Some(from), Some(until)) = (start_date, end_date) {
        if from > until {
            return Err(validation_error(req_id, "startDate must be before endDate"));
        }
    }

    let multiple_versions = match query.multiple_versions.as_deref() {
        None => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(_) => {
            return Err(validation_error(
                req_id,
                "multipleVersions must be \"true\" or \"false\"",
            ))
        }
    };

    Ok(AdFilters {
        status,
        platform: present(query.platform),
        start_date,
        end_date,
        multiple_versions,
    })
}

pub(in crate::api) fn validate_ad_id(req_id: &str, ad_id: &str) -> Result<(), ApiError> {
    if ad_id.trim().is_empty() {
        return Err(validation_error(req_id, "Ad ID is required"));
    }
    if !ad_id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(validation_error(req_id, "Invalid Ad ID format"));
    }
    Ok(())
}

pub(in crate::api) fn validate_asset_params(
    req_id: &str,
    category: &str,
    filename: &str,
) -> Result<AssetCategory, ApiError> {
    let category = category.parse::<AssetCategory>().map_err(|_| {
        validation_error(
            req_id,
            "Invalid asset type. Must be \"images\" or \"videos\"",
        )
    })?;

    if filename.trim().is_empty() {
        return Err(validation_error(req_id, "Filename is required"));
    }
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(validation_error(req_id, "Invalid filename"));
    }

    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> AdListQuery {
        AdListQuery::default()
    }

    fn message(err: &ApiError) -> &str {
        &err.error.message
    }

    #[test]
    fn empty_query_yields_empty_filters() {
        let filters = parse_filters("req", query()).expect("valid");
        assert!(filters.is_empty());
    }

    #[test]
    fn full_query_is_parsed() {
        let filters = parse_filters(
            "req",
            AdListQuery {
                status: Some("inactive".to_string()),
                platform: Some("instagram".to_string()),
                start_date: Some("2024-01-01".to_string()),
                end_date: Some("2024-06-30T12:00:00Z".to_string()),
                multiple_versions: Some("true".to_string()),
            },
        )
        .expect("valid");

        assert_eq!(filters.status, Some(AdStatus::Inactive));
        assert_eq!(filters.platform.as_deref(), Some("instagram"));
        assert_eq!(filters.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filters.end_date, NaiveDate::from_ymd_opt(2024, 6, 30));
        assert_eq!(filters.multiple_versions, Some(true));
    }

    #[test]
    fn empty_values_are_ignored() {
        let filters = parse_filters(
            "req",
            AdListQuery {
                status: Some(String::new()),
                platform: Some(String::new()),
                start_date: Some(String::new()),
                ..query()
            },
        )
        .expect("valid");
        assert!(filters.is_empty());
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = parse_filters(
            "req",
            AdListQuery {
                status: Some("unknown".to_string()),
                ..query()
            },
        )
        .unwrap_err();
        assert_eq!(err.error.code, "validation_error");
        assert!(message(&err).starts_with("Invalid status"));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let err = parse_filters(
            "req",
            AdListQuery {
                start_date: Some("yesterday".to_string()),
                ..query()
            },
        )
        .unwrap_err();
        assert_eq!(message(&err), "Invalid startDate format");

        let err = parse_filters(
            "req",
            AdListQuery {
                end_date: Some("2024-13-01".to_string()),
                ..query()
            },
        )
        .unwrap_err();
        assert_eq!(message(&err), "Invalid endDate format");
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let err = parse_filters(
            "req",
            AdListQuery {
                start_date: Some("2024-06-01".to_string()),
                end_date: Some("2024-01-01".to_string()),
                ..query()
            },
        )
        .unwrap_err();
        assert_eq!(message(&err), "startDate must be before endDate");
    }

    #[test]
    fn multiple_versions_must_be_boolean_literal() {
        for raw in ["", "yes", "TRUE", "1"] {
            let err = parse_filters(
                "req",
                AdListQuery {
                    multiple_versions: Some(raw.to_string()),
                    ..query()
                },
            )
            .unwrap_err();
            assert!(message(&err).starts_with("multipleVersions"), "raw: {raw:?}");
        }
    }

    #[test]
    fn ad_id_must_be_alphanumeric() {
        assert!(validate_ad_id("req", "1234567890").is_ok());
        assert!(validate_ad_id("req", "abcDEF123").is_ok());
        assert_eq!(
            message(&validate_ad_id("req", "  ").unwrap_err()),
            "Ad ID is required"
        );
        assert_eq!(
            message(&validate_ad_id("req", "12-34").unwrap_err()),
            "Invalid Ad ID format"
        );
    }

    #[test]
    fn asset_params_reject_traversal() {
        assert_eq!(
            validate_asset_params("req", "images", "foo.jpg").expect("valid"),
            AssetCategory::Images
        );
        for filename in ["../../etc/passwd", "..", "a/b.jpg", "a\\b.jpg", "x..y"] {
            let err = validate_asset_params("req", "images", filename).unwrap_err();
            assert_eq!(message(&err), "Invalid filename", "filename: {filename:?}");
        }
    }

    #[test]
    fn asset_params_require_known_category_and_filename() {
        assert!(message(&validate_asset_params("req", "audio", "a.mp3").unwrap_err())
            .starts_with("Invalid asset type"));
        assert_eq!(
            message(&validate_asset_params("req", "videos", " ").unwrap_err()),
            "Filename is required"
        );
    }
}
