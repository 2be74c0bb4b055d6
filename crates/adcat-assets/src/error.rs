use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(PathBuf),
    /// The request resolved outside the assets root.
    #[error("access denied: {0}")]
    AccessDenied(PathBuf),
    #[error("failed to resolve asset path {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
