//! Named route persistence.
//!
//! The store is a single JSON file holding the saved-route collection,
//! the filesystem analog of the overlay's localStorage entry. Saving
//! under an existing name overwrites that entry; the last save wins.
//! A missing or unreadable file loads as an empty collection rather
//! than failing, so a corrupt store never blocks planning.

use anyhow::{Context, Result};
use overmap_core::SavedRoute;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct RouteStore {
    path: PathBuf,
}

impl RouteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All saved routes, in stored order. A store that has not been
    /// created yet loads silently as empty; any other read failure is
    /// logged, since a later save would overwrite the unreadable file.
    pub fn load_all(&self) -> Vec<SavedRoute> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                tracing::warn!(
                    "Failed to read route store {}: {}",
                    self.path.display(),
                    err
                );
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(routes) => routes,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse route store {}: {}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<SavedRoute> {
        self.load_all().into_iter().find(|route| route.name == name)
    }

    /// Insert or overwrite by name.
    pub fn save(&self, route: SavedRoute) -> Result<()> {
        let mut routes = self.load_all();
        match routes.iter_mut().find(|existing| existing.name == route.name) {
            Some(existing) => *existing = route,
            None => routes.push(route),
        }
        self.write_all(&routes)
    }

    /// Remove by name; returns whether an entry was deleted.
    pub fn delete(&self, name: &str) -> Result<bool> {
        let mut routes = self.load_all();
        let before = routes.len();
        routes.retain(|route| route.name != name);
        if routes.len() == before {
            return Ok(false);
        }
        self.write_all(&routes)?;
        Ok(true)
    }

    fn write_all(&self, routes: &[SavedRoute]) -> Result<()> {
        let raw = serde_json::to_string_pretty(routes).context("serializing route store")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing route store {}", self.path.display()))
    }
}
