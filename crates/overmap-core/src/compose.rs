//! Route composition: per-pair path selection and multi-waypoint
//! stitching.
//!
//! For each consecutive waypoint pair the composer runs both searches,
//! optionally stitches a road path with open-terrain connectors to the
//! nearest road cells, and keeps the shortest result by raw cell
//! count. Pathfinding failure is recovered locally; the worst case is
//! a straight two-point fallback, never an error.

use crate::grid::GridStore;
use crate::models::{CellCoord, DisplayPoint, PathKind, Waypoint};
use crate::pathfind::{find_open_path, find_road_path};
use crate::transform::{cell_center, points_close};
use thiserror::Error;

/// Default Manhattan-ring bound for the nearest-road search.
pub const DEFAULT_ROAD_SEARCH_RADIUS: i32 = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("need at least 2 waypoints, have {0}")]
    InsufficientWaypoints(usize),
    #[error("route name must not be empty")]
    EmptyRouteName,
}

/// A single composed segment between two cells.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPath {
    pub cells: Vec<CellCoord>,
    pub kind: PathKind,
}

/// A full route spanning an ordered waypoint sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Cell-center display points for the renderer's polyline.
    pub points: Vec<DisplayPoint>,
    /// The underlying cell sequence, deduplicated at segment splices.
    pub cells: Vec<CellCoord>,
    /// Which strategy produced each waypoint-pair segment.
    pub segment_kinds: Vec<PathKind>,
    pub waypoint_count: usize,
}

impl Route {
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Status line for the UI, matching the planner's success message.
    pub fn summary(&self) -> String {
        format!(
            "Route calculated successfully! {} waypoints, {} path points",
            self.waypoint_count,
            self.points.len()
        )
    }
}

/// Find the closest road-bearing, non-water cell to `origin` within
/// `max_radius`, searching outward in discrete Manhattan rings.
///
/// The first ring containing any qualifying cell wins; within a ring
/// the pick follows scan order, which is not part of the contract.
pub fn nearest_road(grid: &GridStore, origin: CellCoord, max_radius: i32) -> Option<CellCoord> {
    for radius in 0..=max_radius.max(0) {
        for dx in -radius..=radius {
            for dy in -radius..=radius {
                if dx.abs() + dy.abs() != radius {
                    continue;
                }
                let coord = CellCoord::new(origin.x + dx, origin.y + dy);
                let Some(cell) = grid.get(coord) else {
                    continue;
                };
                if cell.is_water() || cell.roads.is_empty() {
                    continue;
                }
                return Some(coord);
            }
        }
    }
    None
}

/// Compose the path between one pair of cells.
///
/// Candidates are the open-terrain path and a road-based path (direct,
/// or stitched via the nearest road cells when no direct road path
/// exists). Shortest raw cell count wins; ties favor open terrain. If
/// every search fails the straight two-point fallback is returned, so
/// the result is never empty.
pub fn compose_segment(
    grid: &GridStore,
    a: CellCoord,
    b: CellCoord,
    max_road_search_radius: i32,
) -> ComposedPath {
    let open_path = find_open_path(grid, a, b);
    let road_path = find_road_path(grid, a, b)
        .or_else(|| road_assisted_path(grid, a, b, max_road_search_radius));

    match (open_path, road_path) {
        (Some(open), Some(road)) => {
            if road.len() < open.len() {
                ComposedPath {
                    cells: road,
                    kind: PathKind::Road,
                }
            } else {
                ComposedPath {
                    cells: open,
                    kind: PathKind::Shortest,
                }
            }
        }
        (Some(open), None) => ComposedPath {
            cells: open,
            kind: PathKind::Shortest,
        },
        (None, Some(road)) => ComposedPath {
            cells: road,
            kind: PathKind::Road,
        },
        (None, None) => ComposedPath {
            cells: vec![a, b],
            kind: PathKind::DirectLine,
        },
    }
}

/// Three-leg alternative when no direct road path exists: open terrain
/// to the nearest road cell on each side, road path between them,
/// junction cells deduplicated at the splices.
fn road_assisted_path(
    grid: &GridStore,
    a: CellCoord,
    b: CellCoord,
    max_radius: i32,
) -> Option<Vec<CellCoord>> {
    let road_a = nearest_road(grid, a, max_radius)?;
    let road_b = nearest_road(grid, b, max_radius)?;
    let leg_a = find_open_path(grid, a, road_a)?;
    let leg_mid = find_road_path(grid, road_a, road_b)?;
    let leg_b = find_open_path(grid, road_b, b)?;

    let mut cells = leg_a;
    cells.extend(leg_mid.into_iter().skip(1));
    cells.extend(leg_b.into_iter().skip(1));
    Some(cells)
}

/// Compose one continuous route over an ordered waypoint sequence.
///
/// Each consecutive pair is composed independently and the segments
/// are concatenated as cell-center display points, dropping a vertex
/// that lands within tolerance of the previous one so splices do not
/// produce zero-length doubled points.
pub fn compose_route(
    grid: &GridStore,
    waypoints: &[Waypoint],
    max_road_search_radius: i32,
) -> Result<Route, RouteError> {
    if waypoints.len() < 2 {
        return Err(RouteError::InsufficientWaypoints(waypoints.len()));
    }

    let mut points: Vec<DisplayPoint> = Vec::new();
    let mut cells: Vec<CellCoord> = Vec::new();
    let mut segment_kinds = Vec::with_capacity(waypoints.len() - 1);

    for pair in waypoints.windows(2) {
        let segment = compose_segment(grid, pair[0].cell(), pair[1].cell(), max_road_search_radius);
        segment_kinds.push(segment.kind);
        for cell in segment.cells {
            let point = cell_center(cell);
            if let Some(last) = points.last() {
                if points_close(*last, point) {
                    continue;
                }
            }
            points.push(point);
            cells.push(cell);
        }
    }

    Ok(Route {
        points,
        cells,
        segment_kinds,
        waypoint_count: waypoints.len(),
    })
}
