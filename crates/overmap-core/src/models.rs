//! Core data models for the overview-map route planner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terrain kind tag marking a water cell.
pub const WATER_KIND: &str = "LAKE";

/// POI kinds that sit on water and block land traversal.
pub const WATER_POI_KINDS: [&str; 3] = [
    "POI_CHEMLAKE_MEDIUM",
    "POI_LAKE_UNDERWATER_MEDIUM",
    "POI_LAKE_RANDOM",
];

/// Cardinal direction of a road edge declared on a cell.
///
/// Serialized as the single-letter tags used in the cell data export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "W")]
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit step in cell coordinates. North is negative y.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}

/// Integer coordinate of a cell in the coarse pathfinding grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent coordinate one step in `dir`.
    pub fn step(self, dir: Direction) -> CellCoord {
        let (dx, dy) = dir.offset();
        CellCoord::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance to another coordinate. Saturates rather than
    /// overflowing for coordinate pairs spanning the full `i32` range.
    pub fn manhattan(self, other: CellCoord) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }
}

/// One grid square of the game world, populated once at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    /// Terrain kind tag from the cell data export (e.g. "LAKE", "FOREST").
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, rename = "poiType")]
    pub poi_kind: Option<String>,
    #[serde(default, rename = "tileId")]
    pub tile_id: i64,
    /// Tile rotation quarter-turns, 0..3.
    #[serde(default)]
    pub rotation: u8,
    /// Road edges this cell declares toward its neighbors.
    #[serde(default)]
    pub roads: Vec<Direction>,
}

impl Cell {
    pub fn coord(&self) -> CellCoord {
        CellCoord::new(self.x, self.y)
    }

    /// True for water terrain or a water-associated POI.
    pub fn is_water(&self) -> bool {
        if self.kind == WATER_KIND {
            return true;
        }
        match &self.poi_kind {
            Some(poi) => WATER_POI_KINDS.iter().any(|kind| kind == poi),
            None => false,
        }
    }

    pub fn has_road(&self, dir: Direction) -> bool {
        self.roads.contains(&dir)
    }
}

/// A point in the map's display coordinate space (Leaflet-style lat/lng).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayPoint {
    pub lat: f64,
    pub lng: f64,
}

impl DisplayPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A user-placed route anchor.
///
/// Carries both the coarse cell coordinate used by pathfinding and the
/// fine display coordinate the marker was dropped at. The rendering
/// layer keeps its marker handle separately and links by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: i32,
    pub y: i32,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

impl Waypoint {
    pub fn cell(&self) -> CellCoord {
        CellCoord::new(self.x, self.y)
    }
}

/// A named waypoint list persisted to the route store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedRoute {
    pub name: String,
    pub waypoints: Vec<Waypoint>,
    pub saved_at: DateTime<Utc>,
}

/// Which search strategy produced a composed path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathKind {
    /// Road-network path (direct or stitched via nearest road cells).
    Road,
    /// Open-terrain path avoiding water.
    Shortest,
    /// Straight two-point fallback; may cross water.
    DirectLine,
}

impl PathKind {
    /// Display label shown in the route status line.
    pub fn label(self) -> &'static str {
        match self {
            PathKind::Road => "Road Route",
            PathKind::Shortest => "Shortest Route",
            PathKind::DirectLine => "Direct Line (may cross water)",
        }
    }
}
