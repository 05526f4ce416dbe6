//! Cell-data ingestion.
//!
//! The grid is populated once from a pre-parsed JSON cell array, the
//! same shape the map overlay's cell loader produces.

use anyhow::{Context, Result};
use overmap_core::{Cell, GridStore};
use std::fs;
use std::path::Path;

pub fn load_grid(path: &Path) -> Result<GridStore> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading cell data from {}", path.display()))?;
    let cells: Vec<Cell> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing cell data in {}", path.display()))?;
    let grid = GridStore::from_cells(cells);
    tracing::info!("Loaded {} cells from {}", grid.len(), path.display());
    Ok(grid)
}
