//! CLI configuration from environment.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON cell-data export to load the grid from.
    pub cell_data_path: String,
    /// JSON file holding the named saved-route collection.
    pub route_store_path: String,
    /// Manhattan-ring bound for the nearest-road search.
    pub road_search_radius: i32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            cell_data_path: env::var("OVERMAP_CELLS")
                .unwrap_or_else(|_| "cells.json".to_string()),
            route_store_path: env::var("OVERMAP_ROUTES")
                .unwrap_or_else(|_| "routes.json".to_string()),
            road_search_radius: env::var("OVERMAP_ROAD_SEARCH_RADIUS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(overmap_core::DEFAULT_ROAD_SEARCH_RADIUS),
        }
    }
}
