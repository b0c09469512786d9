//! Persisted cooldown window for the export flow.
//!
//! One JSON file holding a single future timestamp; an absent file or a
//! past timestamp means "not in cooldown". The store is an explicit
//! object constructed with its path and passed into the workflow, not
//! ambient global state. It loads on open and saves on every mutation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use swarm_console_sdk::CooldownWindow;

#[derive(Debug, Serialize, Deserialize)]
struct StoredWindow {
    expires_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct CooldownStore {
    path: PathBuf,
    window: Option<CooldownWindow>,
}

impl CooldownStore {
    /// Default location under the platform data directory.
    pub fn default_path() -> PathBuf {
        use directories::ProjectDirs;

        if let Some(proj_dirs) = ProjectDirs::from("com", "swarm-console", "swarm-console") {
            proj_dirs.data_dir().join("export_cooldown.json")
        } else {
            PathBuf::from(".swarm-console-cooldown.json")
        }
    }

    /// Open the store at `path`, loading any persisted window. A window
    /// that already expired is cleared from disk on open.
    pub fn open(path: PathBuf) -> Result<Self> {
        let mut store = Self { path, window: None };
        if let Ok(content) = std::fs::read_to_string(&store.path) {
            if let Ok(stored) = serde_json::from_str::<StoredWindow>(&content) {
                let window = CooldownWindow {
                    expires_at: stored.expires_at,
                };
                if window.is_active(Utc::now()) {
                    store.window = Some(window);
                } else {
                    store.clear()?;
                }
            }
        }
        Ok(store)
    }

    pub fn window(&self) -> Option<CooldownWindow> {
        self.window
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Arm a new window and persist it immediately.
    pub fn arm(&mut self, window: CooldownWindow) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        let stored = StoredWindow {
            expires_at: window.expires_at,
        };
        let content = serde_json::to_string_pretty(&stored)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("writing {}", self.path.display()))?;
        self.window = Some(window);
        Ok(())
    }

    /// Drop the window from memory and disk.
    pub fn clear(&mut self) -> Result<()> {
        self.window = None;
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("removing {}", self.path.display()))?;
        }
        Ok(())
    }
}
