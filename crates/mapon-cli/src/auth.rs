//! Stored API credentials
//!
//! The key lives in `auth.json` next to the config file, readable by the
//! owner only.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::APP_DIR;

#[derive(Debug, Default, Serialize, Deserialize)]
struct AuthFile {
    #[serde(rename = "apiKey", default, skip_serializing_if = "String::is_empty")]
    api_key: String,
}

/// File-backed API key store
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config dir>/mapon-cli/auth.json`
    pub fn default_location() -> Result<Self> {
        let path = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(APP_DIR)
            .join("auth.json");
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored key, if any
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read credentials: {}", self.path.display()))?;
        let file: AuthFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse credentials: {}", self.path.display()))?;

        Ok(Some(file.api_key).filter(|k| !k.is_empty()))
    }

    pub fn save(&self, api_key: &str) -> Result<()> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            bail!("API key must not be empty");
        }
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let content = serde_json::to_string_pretty(&AuthFile {
            api_key: api_key.to_string(),
        })?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write credentials: {}", self.path.display()))?;
        restrict_permissions(&self.path)?;
        Ok(())
    }

    /// Remove the stored key; a missing file is fine
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove credentials: {}", self.path.display())),
        }
    }

    /// Key from the flag or environment first, then from the store
    pub fn resolve(&self, explicit: Option<&str>) -> Result<String> {
        if let Some(key) = explicit.map(str::trim).filter(|k| !k.is_empty()) {
            return Ok(key.to_string());
        }
        match self.load()? {
            Some(key) => Ok(key),
            None => bail!("no API key found, please login using 'mapon auth login'"),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

/// Ask for a key on stderr and read one line from `input`
pub fn prompt_api_key(input: &mut impl BufRead) -> Result<String> {
    eprint!("Enter API key: ");
    std::io::stderr().flush().ok();

    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read API key")?;
    let key = line.trim();
    if key.is_empty() {
        bail!("API key must not be empty");
    }
    Ok(key.to_string())
}
