use crate::error::{EcfError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BATCH_SIZE: usize = 20;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Optional `.ecf.yml` file contents. Everything here can also come from
/// flags or environment; flags win over the file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub site_url: Option<String>,

    #[serde(default)]
    pub batch_size: Option<usize>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub access_token: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Loads `path` if given; otherwise `.ecf.yml` in the working directory
    /// when present, else empty defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default = Path::new(".ecf.yml");
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Fully resolved run configuration.
#[derive(Debug, Clone)]
pub struct EcfConfig {
    /// PWA site URL, e.g. `https://contoso.sharepoint.com/sites/pwa`.
    pub site_url: String,
    /// Slots per project query.
    pub batch_size: usize,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Bearer token of an already established session, if the site wants one.
    pub access_token: Option<String>,
}

impl EcfConfig {
    pub fn resolve(
        file: FileConfig,
        site_url: Option<String>,
        batch_size: Option<usize>,
        access_token: Option<String>,
    ) -> Result<Self> {
        let site_url = site_url.or(file.site_url).ok_or_else(|| {
            EcfError::Config(
                "Site URL is required (pass --site-url, set ECF_SITE_URL, or add site_url to .ecf.yml)"
                    .to_string(),
            )
        })?;

        let batch_size = batch_size
            .or(file.batch_size)
            .unwrap_or(DEFAULT_BATCH_SIZE);
        if batch_size == 0 {
            return Err(EcfError::Config("Batch size must be positive".to_string()));
        }

        Ok(Self {
            site_url,
            batch_size,
            timeout_secs: file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            access_token: access_token.or(file.access_token),
        })
    }
}
