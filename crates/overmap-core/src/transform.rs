//! Conversions between display coordinates and grid cell coordinates.
//!
//! The map uses a simple planar CRS: display lng maps to the world x
//! axis and display lat to the world y axis. One cell spans half a
//! grid unit (32 display units) on each axis.

use crate::models::{CellCoord, DisplayPoint};

/// World grid size; one cell-graph unit is `GRID_SIZE` fine units.
pub const GRID_SIZE: i32 = 64;

/// Cell edge length in display units.
const HALF_GRID: f64 = (GRID_SIZE / 2) as f64;

/// Tolerance for treating two display points as the same vertex.
///
/// Approximate by design: path points round-trip through cell-center
/// conversion, so exact equality is too strict.
pub const POINT_EQ_TOLERANCE: f64 = 0.001;

/// Map a display coordinate to the coarse cell-graph coordinate used
/// by pathfinding.
pub fn display_to_cell(lat: f64, lng: f64) -> CellCoord {
    let x = (lng * 2.0).floor() as i32;
    let y = (lat * 2.0).floor() as i32 + GRID_SIZE;
    CellCoord::new(x.div_euclid(GRID_SIZE), y.div_euclid(GRID_SIZE))
}

/// Display-space center of a cell's tile.
pub fn cell_center(cell: CellCoord) -> DisplayPoint {
    let start_x = HALF_GRID * cell.x as f64;
    let start_y = HALF_GRID * cell.y as f64 - HALF_GRID;
    DisplayPoint::new(start_y + HALF_GRID / 2.0, start_x + HALF_GRID / 2.0)
}

/// Approximate display-point equality used for route vertex dedup.
pub fn points_close(a: DisplayPoint, b: DisplayPoint) -> bool {
    (a.lat - b.lat).abs() < POINT_EQ_TOLERANCE && (a.lng - b.lng).abs() < POINT_EQ_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_center_round_trips_to_same_cell() {
        for x in -3..4 {
            for y in -3..4 {
                let cell = CellCoord::new(x, y);
                let center = cell_center(cell);
                assert_eq!(display_to_cell(center.lat, center.lng), cell, "cell {cell:?}");
            }
        }
    }

    #[test]
    fn cell_center_of_origin() {
        let center = cell_center(CellCoord::new(0, 0));
        assert_eq!(center.lng, 16.0);
        assert_eq!(center.lat, -16.0);
    }

    #[test]
    fn negative_display_coords_floor_toward_negative() {
        // floor semantics, not truncation: x = floor(-1.0) = -1, then
        // floor(-1 / 64) = -1; y = floor(-2080.0) + 64 = -2016, then
        // floor(-2016 / 64) = -32.
        let cell = display_to_cell(-1040.0, -0.5);
        assert_eq!(cell, CellCoord::new(-1, -32));
    }

    #[test]
    fn points_close_tolerance() {
        let a = DisplayPoint::new(16.0, 16.0);
        let b = DisplayPoint::new(16.0009, 15.9995);
        let c = DisplayPoint::new(16.002, 16.0);
        assert!(points_close(a, b));
        assert!(!points_close(a, c));
    }
}
