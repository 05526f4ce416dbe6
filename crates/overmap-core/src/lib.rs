pub mod compose;
pub mod grid;
pub mod models;
pub mod pathfind;
pub mod session;
pub mod transform;

pub use compose::{
    compose_route, compose_segment, nearest_road, ComposedPath, Route, RouteError,
    DEFAULT_ROAD_SEARCH_RADIUS,
};
pub use grid::GridStore;
pub use models::{
    Cell, CellCoord, Direction, DisplayPoint, PathKind, SavedRoute, Waypoint, WATER_KIND,
    WATER_POI_KINDS,
};
pub use pathfind::{find_open_path, find_road_path};
pub use session::PlannerSession;
pub use transform::{cell_center, display_to_cell, points_close, GRID_SIZE, POINT_EQ_TOLERANCE};
