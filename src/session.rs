//! Persisted login session.
//!
//! The browser original kept the token in localStorage; the CLI keeps it
//! in `session.json` next to the config so separate invocations share one
//! login. `logout` deletes the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Session {
    pub fn save(&self) -> Result<()> {
        self.save_to(&session_path())
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self).context("Failed to serialize session")?;
        fs::write(path, raw).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Load the stored session, or `None` when nobody is logged in.
pub fn load() -> Result<Option<Session>> {
    load_from(&session_path())
}

fn load_from(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let session = serde_json::from_str(&raw)
        .with_context(|| format!("Corrupt session file at {}", path.display()))?;
    Ok(Some(session))
}

/// Remove the stored session. Succeeds when none exists.
pub fn clear() -> Result<bool> {
    clear_at(&session_path())
}

fn clear_at(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    Ok(true)
}

fn session_path() -> PathBuf {
    config::config_dir().join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Session {
        Session {
            token: "jwt-abc".to_string(),
            user_id: Some(9),
            username: Some("ada".to_string()),
            email: Some("ada@example.com".to_string()),
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        sample().save_to(&path).unwrap();
        let loaded = load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.token, "jwt-abc");
        assert_eq!(loaded.username.as_deref(), Some("ada"));
    }

    #[test]
    fn missing_file_means_logged_out() {
        let dir = tempdir().unwrap();
        assert!(load_from(&dir.path().join("session.json")).unwrap().is_none());
    }

    #[test]
    fn clear_removes_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        sample().save_to(&path).unwrap();

        assert!(clear_at(&path).unwrap());
        assert!(!path.exists());
        // Clearing again is a no-op.
        assert!(!clear_at(&path).unwrap());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        assert!(load_from(&path).is_err());
    }
}
