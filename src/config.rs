use std::{
    fmt,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Credential, Error, Result};
use crate::models::Credentials;

/// Overrides where [`JsonFileStore::default_location`] looks.
pub const CONFIG_ENV_VAR: &str = "DOCAI_CONFIG";

const CONFIG_DIR: &str = "rusty_docai";
const CONFIG_FILE: &str = "access.json";

/// The persisted `{url, token}` pair. Either half may be unset.
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AccessConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AccessConfig {
    pub fn credentials(&self) -> Result<Credentials> {
        let url = self
            .url
            .as_deref()
            .ok_or(Error::MissingCredential(Credential::Url))?;
        let token = self
            .token
            .as_deref()
            .ok_or(Error::MissingCredential(Credential::Token))?;
        Credentials::new(url, token)
    }
}

impl fmt::Debug for AccessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessConfig")
            .field("url", &self.url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Somewhere the default access pair is kept between runs.
pub trait AccessStore {
    fn load(&self) -> Result<AccessConfig>;
    fn save(&self, config: &AccessConfig) -> Result<()>;
}

/// `access.json` on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$DOCAI_CONFIG` if set, otherwise `<config dir>/rusty_docai/access.json`.
    pub fn default_location() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Ok(Self::at(path));
        }
        let dir = dirs::config_dir().ok_or_else(|| {
            Error::Config(format!(
                "No configuration directory on this platform; set {CONFIG_ENV_VAR}"
            ))
        })?;
        Ok(Self::at(dir.join(CONFIG_DIR).join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AccessStore for JsonFileStore {
    /// A missing file reads as an empty config.
    fn load(&self) -> Result<AccessConfig> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No access file, using empty config");
                return Ok(AccessConfig::default());
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_slice(&raw).map_err(|e| {
            Error::Config(format!("Unable to parse {}: {e}", self.path.display()))
        })
    }

    fn save(&self, config: &AccessConfig) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_vec_pretty(config)
            .map_err(|e| Error::Config(format!("Unable to encode access config: {e}")))?;
        fs::write(&self.path, raw)?;
        debug!(path = %self.path.display(), "Saved access file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::at(dir.path().join("absent.json"));
        assert_eq!(store.load().unwrap(), AccessConfig::default());
    }

    #[test]
    fn save_then_load_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::at(dir.path().join("nested/docai/access.json"));
        let config = AccessConfig {
            url: Some("https://docai.test".to_owned()),
            token: Some("abc".to_owned()),
        };

        store.save(&config).unwrap();

        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn unparseable_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("access.json");
        fs::write(&path, "{not json").unwrap();
        let err = JsonFileStore::at(&path).load().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn credentials_require_both_halves() {
        let only_url = AccessConfig {
            url: Some("https://docai.test".to_owned()),
            token: None,
        };
        assert!(matches!(
            only_url.credentials(),
            Err(Error::MissingCredential(Credential::Token))
        ));
        assert!(matches!(
            AccessConfig::default().credentials(),
            Err(Error::MissingCredential(Credential::Url))
        ));
    }

    #[test]
    fn debug_hides_the_token() {
        let config = AccessConfig {
            url: None,
            token: Some("super-secret".to_owned()),
        };
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
