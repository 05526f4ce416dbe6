//! Planner session: the ordered waypoint sequence and current route.
//!
//! One session owns the grid it plans against, so multiple independent
//! map sessions can coexist. Everything here is single-threaded and
//! synchronous: each mutation recomputes the full route before
//! returning when a route is being displayed.

use crate::compose::{compose_route, Route, RouteError, DEFAULT_ROAD_SEARCH_RADIUS};
use crate::grid::GridStore;
use crate::models::{CellCoord, SavedRoute, Waypoint};
use crate::transform::display_to_cell;
use chrono::Utc;

pub struct PlannerSession {
    grid: GridStore,
    waypoints: Vec<Waypoint>,
    route: Option<Route>,
    road_search_radius: i32,
}

impl PlannerSession {
    pub fn new(grid: GridStore) -> Self {
        Self {
            grid,
            waypoints: Vec::new(),
            route: None,
            road_search_radius: DEFAULT_ROAD_SEARCH_RADIUS,
        }
    }

    pub fn with_road_search_radius(mut self, radius: i32) -> Self {
        self.road_search_radius = radius;
        self
    }

    pub fn grid(&self) -> &GridStore {
        &self.grid
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Append a waypoint placed at a display coordinate (map click).
    /// Returns the index of the new waypoint.
    pub fn add_waypoint(&mut self, lat: f64, lng: f64, name: Option<String>) -> usize {
        let cell = display_to_cell(lat, lng);
        self.add_waypoint_at(cell, lat, lng, name)
    }

    /// Append a waypoint whose cell coordinate is already known (a
    /// pinned POI marker). Auto-names when `name` is empty.
    pub fn add_waypoint_at(
        &mut self,
        cell: CellCoord,
        lat: f64,
        lng: f64,
        name: Option<String>,
    ) -> usize {
        let name = name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Waypoint {}", self.waypoints.len() + 1));
        self.waypoints.push(Waypoint {
            x: cell.x,
            y: cell.y,
            lat,
            lng,
            name,
        });
        self.recompute_if_routed();
        self.waypoints.len() - 1
    }

    /// Remove the waypoint at `index`; out-of-bounds is a no-op.
    pub fn remove_waypoint(&mut self, index: usize) {
        if index >= self.waypoints.len() {
            return;
        }
        self.waypoints.remove(index);
        self.recompute_if_routed();
    }

    /// Reposition a waypoint after a marker drag: the cell coordinate
    /// is re-derived from the new display coordinate. Out-of-bounds is
    /// a no-op.
    pub fn move_waypoint(&mut self, index: usize, lat: f64, lng: f64) {
        let Some(waypoint) = self.waypoints.get_mut(index) else {
            return;
        };
        let cell = display_to_cell(lat, lng);
        waypoint.lat = lat;
        waypoint.lng = lng;
        waypoint.x = cell.x;
        waypoint.y = cell.y;
        self.recompute_if_routed();
    }

    /// Drop all waypoints and any computed route.
    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.route = None;
    }

    /// Compute and store the route over the current waypoint sequence.
    pub fn compute_route(&mut self) -> Result<&Route, RouteError> {
        let route = compose_route(&self.grid, &self.waypoints, self.road_search_radius)?;
        Ok(self.route.insert(route))
    }

    /// Snapshot the current waypoints as a named saved route.
    pub fn save_route(&self, name: &str) -> Result<SavedRoute, RouteError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RouteError::EmptyRouteName);
        }
        if self.waypoints.len() < 2 {
            return Err(RouteError::InsufficientWaypoints(self.waypoints.len()));
        }
        Ok(SavedRoute {
            name: name.to_string(),
            waypoints: self.waypoints.clone(),
            saved_at: Utc::now(),
        })
    }

    /// Replace the current waypoints with a saved route's and
    /// recompute. A degenerate saved route leaves no route displayed.
    pub fn load_route(&mut self, saved: &SavedRoute) {
        self.waypoints = saved.waypoints.clone();
        self.route = compose_route(&self.grid, &self.waypoints, self.road_search_radius).ok();
    }

    /// Full recompute after a mutation, but only while a route is
    /// being displayed; composing can fail once fewer than two
    /// waypoints remain, which clears the display.
    fn recompute_if_routed(&mut self) {
        if self.route.is_some() {
            self.route = compose_route(&self.grid, &self.waypoints, self.road_search_radius).ok();
        }
    }
}
