use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdStatus {
    Active,
    Inactive,
    Unknown,
}

impl AdStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AdStatus::Active => "active",
            AdStatus::Inactive => "inactive",
            AdStatus::Unknown => "unknown",
        }
    }

    /// Maps a value read from the `status` column.
    ///
    /// The scraper owns that column, so anything unrecognized is reported as
    /// [`AdStatus::Unknown`] instead of failing the whole row.
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        raw.parse().unwrap_or(AdStatus::Unknown)
    }
}

impl std::fmt::Display for AdStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AdStatus::Active),
            "inactive" => Ok(AdStatus::Inactive),
            "unknown" => Ok(AdStatus::Unknown),
            other => Err(CoreError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Image,
    Video,
}

impl AssetType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            AssetType::Image => "image",
            AssetType::Video => "video",
        }
    }

    #[must_use]
    pub fn from_stored(raw: &str) -> Option<Self> {
        match raw {
            "image" => Some(AssetType::Image),
            "video" => Some(AssetType::Video),
            _ => None,
        }
    }

    /// The asset directory this kind of creative is stored under.
    #[must_use]
    pub const fn category(self) -> AssetCategory {
        match self {
            AssetType::Image => AssetCategory::Images,
            AssetType::Video => AssetCategory::Videos,
        }
    }
}

/// Directory segment under the assets root: `images` or `videos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Images,
    Videos,
}

impl AssetCategory {
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            AssetCategory::Images => "images",
            AssetCategory::Videos => "videos",
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for AssetCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "images" => Ok(AssetCategory::Images),
            "videos" => Ok(AssetCategory::Videos),
            other => Err(CoreError::InvalidAssetCategory(other.to_string())),
        }
    }
}

/// One scraped advertisement as exposed by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ad {
    pub id: i64,
    /// Ad library identifier; unique across the store.
    pub ad_id: String,
    pub status: AdStatus,
    pub platforms: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub asset_url: Option<String>,
    pub asset_type: Option<AssetType>,
    /// Relative path of the form `assets/<images|videos>/<filename>`.
    pub asset_path: Option<String>,
    pub multiple_versions: bool,
    /// Absent when the scraper's table left the column NULL.
    pub scraped_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ad {
    /// Splits `asset_path` into its category and filename.
    ///
    /// Returns `None` when no asset was captured or the stored path does not
    /// have the `assets/<images|videos>/<filename>` shape.
    #[must_use]
    pub fn asset_location(&self) -> Option<(AssetCategory, &str)> {
        let rest = self.asset_path.as_deref()?.strip_prefix("assets/")?;
        let (category, filename) = rest.split_once('/')?;
        if filename.is_empty() || filename.contains('/') {
            return None;
        }
        Some((category.parse().ok()?, filename))
    }

    #[must_use]
    pub fn has_platform(&self, platform: &str) -> bool {
        self.platforms.iter().any(|p| p == platform)
    }
}
