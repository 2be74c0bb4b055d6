use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use adcat_core::{AssetCategory, AssetRootsConfig};

use crate::AssetError;

/// Resolves asset requests against the first existing candidate root.
///
/// The selected root is cached for the lifetime of the resolver once a
/// candidate exists. While none exists the fallback is used and not cached,
/// so a root created after startup is still picked up.
#[derive(Debug)]
pub struct AssetResolver {
    candidates: Vec<PathBuf>,
    fallback: PathBuf,
    selected: OnceLock<PathBuf>,
}

impl AssetResolver {
    #[must_use]
    pub fn new(config: AssetRootsConfig) -> Self {
        Self {
            candidates: config.candidates,
            fallback: config.fallback,
            selected: OnceLock::new(),
        }
    }

    /// A resolver with a single candidate that is also the fallback.
    #[must_use]
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self::new(AssetRootsConfig {
            candidates: vec![root.clone()],
            fallback: root,
        })
    }

    /// The assets root used for the next lookup.
    #[must_use]
    pub fn assets_root(&self) -> PathBuf {
        if let Some(root) = self.selected.get() {
            return root.clone();
        }

        match self.candidates.iter().find(|c| c.is_dir()) {
            Some(found) => self
                .selected
                .get_or_init(|| {
                    tracing::info!(root = %found.display(), "selected assets root");
                    found.clone()
                })
                .clone(),
            None => {
                tracing::debug!(
                    fallback = %self.fallback.display(),
                    "no assets root candidate exists; using fallback"
                );
                self.fallback.clone()
            }
        }
    }

    /// Maps `(category, filename)` to a symlink-resolved file under the
    /// assets root.
    ///
    /// Callers are expected to reject separators and `..` in `filename`
    /// already; containment is checked here regardless, both on the lexical
    /// path and on the fully resolved one.
    ///
    /// # Errors
    ///
    /// - [`AssetError::AccessDenied`] if the path leaves the assets root.
    /// - [`AssetError::NotFound`] if no regular file exists at the path.
    /// - [`AssetError::Io`] for any other filesystem failure.
    pub fn resolve(&self, category: AssetCategory, filename: &str) -> Result<PathBuf, AssetError> {
        let root = self.assets_root();
        let root = std::path::absolute(&root).map_err(|source| AssetError::Io {
            path: root.clone(),
            source,
        })?;
        let target = root.join(category.dir_name()).join(filename);

        if !normalize_lexically(&target).starts_with(normalize_lexically(&root)) {
            return Err(deny(category, filename, target));
        }

        let resolved_root = canonicalize(&root, &target)?;
        let resolved = canonicalize(&target, &target)?;

        if !resolved.starts_with(&resolved_root) {
            return Err(deny(category, filename, resolved));
        }

        if !resolved.is_file() {
            tracing::debug!(path = %resolved.display(), "asset path is not a regular file");
            return Err(AssetError::NotFound(target));
        }

        Ok(resolved)
    }
}

fn deny(category: AssetCategory, filename: &str, path: PathBuf) -> AssetError {
    tracing::warn!(
        %category,
        filename,
        path = %path.display(),
        "asset request resolved outside the assets root"
    );
    AssetError::AccessDenied(path)
}

/// Canonicalizes `path`, reporting a missing path as not-found for `target`.
fn canonicalize(path: &Path, target: &Path) -> Result<PathBuf, AssetError> {
    path.canonicalize().map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            tracing::debug!(path = %path.display(), "asset path does not exist");
            AssetError::NotFound(target.to_path_buf())
        } else {
            AssetError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Folds `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
