//! overmap CLI - route planning tools for the overview map.
//!
//! Loads a cell-data export, plans multi-waypoint routes with the core
//! engine, and keeps a named saved-route collection on disk.

pub mod config;
pub mod loader;
pub mod store;

pub use config::Config;
pub use loader::load_grid;
pub use store::RouteStore;
