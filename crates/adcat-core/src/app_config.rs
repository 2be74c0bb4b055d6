use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where the process runs from; used to derive the default asset roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentLayout {
    /// Directory containing the running binary, when it can be determined.
    pub exe_dir: Option<PathBuf>,
    pub cwd: PathBuf,
}

impl DeploymentLayout {
    /// Reads the layout of the current process.
    #[must_use]
    pub fn current() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { exe_dir, cwd }
    }

    /// Default candidate roots in priority order: next to the build output
    /// (`<repo>/target/<profile>/` → `<repo>/scraper/assets`), under the
    /// working directory, then the container mount point.
    #[must_use]
    pub fn default_asset_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::with_capacity(3);
        if let Some(exe_dir) = &self.exe_dir {
            candidates.push(exe_dir.join("../../scraper/assets"));
        }
        candidates.push(self.default_asset_fallback());
        candidates.push(PathBuf::from("/app/scraper/assets"));
        candidates
    }

    #[must_use]
    pub fn default_asset_fallback(&self) -> PathBuf {
        self.cwd.join("scraper").join("assets")
    }

    /// Anchors a relative path at the working directory captured at startup.
    #[must_use]
    pub fn absolutize(&self, path: PathBuf) -> PathBuf {
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }
}

/// Ordered candidate directories for the assets root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRootsConfig {
    /// Tried in order; the first existing directory wins.
    pub candidates: Vec<PathBuf>,
    /// Used when no candidate exists, so lookups report not-found.
    pub fallback: PathBuf,
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub db_idle_timeout_secs: u64,
    pub asset_roots: AssetRootsConfig,
    pub version_file: Option<PathBuf>,
    pub client_build_dir: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("db_idle_timeout_secs", &self.db_idle_timeout_secs)
            .field("asset_roots", &self.asset_roots)
            .field("version_file", &self.version_file)
            .field("client_build_dir", &self.client_build_dir)
            .finish()
    }
}
