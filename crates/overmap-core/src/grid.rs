//! Sparse grid store and cell classification queries.

use crate::models::{Cell, CellCoord, Direction};
use std::collections::HashMap;

/// Read-only lookup surface over the loaded world cells.
///
/// The grid is sparse: coordinates with no record are unknown terrain
/// and pathfinding treats them as impassable, not as an error.
#[derive(Debug, Default)]
pub struct GridStore {
    cells: HashMap<(i32, i32), Cell>,
}

impl GridStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the store from a pre-parsed cell array. Later duplicates
    /// of the same coordinate win.
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        let mut store = Self::new();
        for cell in cells {
            store.insert(cell);
        }
        store
    }

    pub fn insert(&mut self, cell: Cell) {
        self.cells.insert((cell.x, cell.y), cell);
    }

    pub fn get(&self, coord: CellCoord) -> Option<&Cell> {
        self.cells.get(&(coord.x, coord.y))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True if pathfinding must not enter this coordinate: the cell is
    /// absent from the grid, water terrain, or a water-associated POI.
    pub fn is_blocked(&self, coord: CellCoord) -> bool {
        match self.get(coord) {
            Some(cell) => cell.is_water(),
            None => true,
        }
    }

    /// Road edges declared by the cell at `coord`; empty for absent or
    /// road-less cells.
    pub fn road_edges(&self, coord: CellCoord) -> &[Direction] {
        self.get(coord)
            .map(|cell| cell.roads.as_slice())
            .unwrap_or(&[])
    }

    /// True if the cell at `coord` declares a road edge toward `dir`.
    pub fn has_road_edge(&self, coord: CellCoord, dir: Direction) -> bool {
        self.get(coord)
            .map(|cell| cell.has_road(dir))
            .unwrap_or(false)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn open_cell(x: i32, y: i32) -> Cell {
        Cell {
            x,
            y,
            kind: "MEADOW".to_string(),
            poi_kind: None,
            tile_id: 0,
            rotation: 0,
            roads: Vec::new(),
        }
    }

    pub fn water_cell(x: i32, y: i32) -> Cell {
        Cell {
            kind: "LAKE".to_string(),
            ..open_cell(x, y)
        }
    }

    pub fn road_cell(x: i32, y: i32, roads: &[Direction]) -> Cell {
        Cell {
            roads: roads.to_vec(),
            ..open_cell(x, y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn absent_cell_is_blocked() {
        let store = GridStore::new();
        assert!(store.is_blocked(CellCoord::new(5, 5)));
        assert!(store.road_edges(CellCoord::new(5, 5)).is_empty());
    }

    #[test]
    fn water_cell_is_blocked() {
        let store = GridStore::from_cells(vec![water_cell(0, 0), open_cell(1, 0)]);
        assert!(store.is_blocked(CellCoord::new(0, 0)));
        assert!(!store.is_blocked(CellCoord::new(1, 0)));
    }

    #[test]
    fn water_poi_is_blocked() {
        let mut cell = open_cell(2, 2);
        cell.poi_kind = Some("POI_LAKE_RANDOM".to_string());
        let store = GridStore::from_cells(vec![cell]);
        assert!(store.is_blocked(CellCoord::new(2, 2)));
    }

    #[test]
    fn duplicate_coordinate_last_wins() {
        let store = GridStore::from_cells(vec![open_cell(0, 0), water_cell(0, 0)]);
        assert_eq!(store.len(), 1);
        assert!(store.is_blocked(CellCoord::new(0, 0)));
    }

    #[test]
    fn road_edges_reported() {
        let store = GridStore::from_cells(vec![road_cell(
            0,
            0,
            &[Direction::North, Direction::East],
        )]);
        let coord = CellCoord::new(0, 0);
        assert!(store.has_road_edge(coord, Direction::North));
        assert!(!store.has_road_edge(coord, Direction::South));
        assert_eq!(store.road_edges(coord).len(), 2);
    }
}
