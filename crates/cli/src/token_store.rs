// Persisted API token (~/.vani/token)

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TOKEN_PATH: &str = "~/.vani/token";
pub const TOKEN_PATH_ENV: &str = "VANI_TOKEN_PATH";

pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `$VANI_TOKEN_PATH`, or `~/.vani/token`
    pub fn from_env() -> Self {
        let raw = std::env::var(TOKEN_PATH_ENV).unwrap_or_else(|_| DEFAULT_TOKEN_PATH.to_string());
        Self::new(shellexpand::tilde(&raw).into_owned())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored token, `None` if the file is missing or blank
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read token from {}", self.path.display())),
        }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, token.trim())
            .with_context(|| format!("Failed to write token to {}", self.path.display()))?;
        restrict_permissions(&self.path)?;
        Ok(())
    }

    /// Remove the stored token; returns whether one existed
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove {}", self.path.display()))
            }
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to restrict permissions on {}", path.display()))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

/// Explicit token (flag/env) wins over the stored one
pub fn resolve_token(explicit: Option<String>, store: &TokenStore) -> Result<Option<String>> {
    match explicit.filter(|t| !t.trim().is_empty()) {
        Some(token) => Ok(Some(token)),
        None => store.load(),
    }
}

/// `abcd…wxyz` style mask for display
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}
