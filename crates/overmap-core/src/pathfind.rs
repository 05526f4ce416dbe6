//! A* searches over the cell grid.
//!
//! Both the open-terrain and road-network searches share one A*
//! skeleton parameterized by neighbor generation: uniform step cost 1,
//! Manhattan heuristic, 4-connected neighbors.

use crate::grid::GridStore;
use crate::models::{CellCoord, Direction};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: u32,
    g: u32,
    cell: CellCoord,
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f
            .cmp(&other.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| self.cell.cmp(&other.cell))
    }
}

/// Generic A* over unit-cost grid steps.
///
/// `neighbors` yields the coordinates reachable in one step from a
/// cell. Returns the path from `start` to `goal` inclusive, or `None`
/// once the open set is exhausted. Equal-f tie-break follows heap
/// order and is not part of the contract.
fn astar<F>(start: CellCoord, goal: CellCoord, mut neighbors: F) -> Option<Vec<CellCoord>>
where
    F: FnMut(CellCoord) -> Vec<CellCoord>,
{
    let mut open_set: BinaryHeap<Reverse<OpenNode>> = BinaryHeap::new();
    let mut closed_set: HashSet<CellCoord> = HashSet::new();
    let mut g_score: HashMap<CellCoord, u32> = HashMap::new();
    let mut came_from: HashMap<CellCoord, CellCoord> = HashMap::new();

    g_score.insert(start, 0);
    open_set.push(Reverse(OpenNode {
        f: start.manhattan(goal),
        g: 0,
        cell: start,
    }));

    while let Some(Reverse(current)) = open_set.pop() {
        if closed_set.contains(&current.cell) {
            continue;
        }
        let best_g = g_score.get(&current.cell).copied().unwrap_or(u32::MAX);
        if current.g > best_g {
            // Stale heap entry superseded by a cheaper path.
            continue;
        }

        if current.cell == goal {
            return Some(reconstruct_path(&came_from, current.cell));
        }

        closed_set.insert(current.cell);

        for next in neighbors(current.cell) {
            if closed_set.contains(&next) {
                continue;
            }
            let tentative_g = current.g + 1;
            if tentative_g < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                came_from.insert(next, current.cell);
                g_score.insert(next, tentative_g);
                open_set.push(Reverse(OpenNode {
                    // Saturating: the heuristic alone can near u32::MAX
                    // for coordinates at the i32 extremes.
                    f: tentative_g.saturating_add(next.manhattan(goal)),
                    g: tentative_g,
                    cell: next,
                }));
            }
        }
    }

    None
}

fn reconstruct_path(came_from: &HashMap<CellCoord, CellCoord>, goal: CellCoord) -> Vec<CellCoord> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Open-terrain search: any non-blocked neighbor is visitable.
///
/// Start and goal themselves are not required to be unblocked; only
/// the cells entered during the search are filtered. Callers needing
/// that guarantee check separately.
pub fn find_open_path(
    grid: &GridStore,
    start: CellCoord,
    goal: CellCoord,
) -> Option<Vec<CellCoord>> {
    astar(start, goal, |cell| {
        Direction::ALL
            .iter()
            .filter_map(|dir| {
                let next = cell.step(*dir);
                (!grid.is_blocked(next)).then_some(next)
            })
            .collect()
    })
}

/// Road-network search: a step is allowed only when both endpoints
/// declare the connecting road edge (current toward the neighbor and
/// the neighbor's reciprocal back) and neither endpoint is blocked.
///
/// Fails immediately when the start or goal cell itself is blocked.
pub fn find_road_path(
    grid: &GridStore,
    start: CellCoord,
    goal: CellCoord,
) -> Option<Vec<CellCoord>> {
    if grid.is_blocked(start) || grid.is_blocked(goal) {
        return None;
    }
    astar(start, goal, |cell| {
        Direction::ALL
            .iter()
            .filter_map(|dir| {
                if !grid.has_road_edge(cell, *dir) {
                    return None;
                }
                let next = cell.step(*dir);
                if grid.is_blocked(next) {
                    return None;
                }
                grid.has_road_edge(next, dir.opposite()).then_some(next)
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::test_support::*;

    #[test]
    fn straight_open_corridor() {
        let grid = GridStore::from_cells(vec![
            open_cell(0, 0),
            open_cell(1, 0),
            open_cell(2, 0),
        ]);
        let path = find_open_path(&grid, CellCoord::new(0, 0), CellCoord::new(2, 0))
            .expect("path exists");
        assert_eq!(
            path,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(2, 0)
            ]
        );
    }

    #[test]
    fn start_equals_goal_is_single_cell() {
        let grid = GridStore::from_cells(vec![open_cell(4, 4)]);
        let path = find_open_path(&grid, CellCoord::new(4, 4), CellCoord::new(4, 4))
            .expect("trivial path");
        assert_eq!(path, vec![CellCoord::new(4, 4)]);
    }

    #[test]
    fn blocked_pair_has_no_open_path() {
        let grid = GridStore::from_cells(vec![water_cell(0, 0), water_cell(1, 0)]);
        assert!(find_open_path(&grid, CellCoord::new(0, 0), CellCoord::new(1, 0)).is_none());
    }

    #[test]
    fn open_path_routes_around_water() {
        // 3x3 block with a water wall in the middle column, open at the top row.
        let mut cells = Vec::new();
        for x in 0..3 {
            for y in 0..3 {
                if x == 1 && y > 0 {
                    cells.push(water_cell(x, y));
                } else {
                    cells.push(open_cell(x, y));
                }
            }
        }
        let grid = GridStore::from_cells(cells);
        let path = find_open_path(&grid, CellCoord::new(0, 2), CellCoord::new(2, 2))
            .expect("detour exists");
        assert_eq!(path.first(), Some(&CellCoord::new(0, 2)));
        assert_eq!(path.last(), Some(&CellCoord::new(2, 2)));
        // Detour over the top row: 4 extra steps beyond the Manhattan distance.
        assert_eq!(path.len(), 7);
        for cell in &path {
            assert!(!grid.is_blocked(*cell));
        }
    }

    #[test]
    fn unobstructed_path_length_is_manhattan_plus_one() {
        let mut cells = Vec::new();
        for x in 0..5 {
            for y in 0..5 {
                cells.push(open_cell(x, y));
            }
        }
        let grid = GridStore::from_cells(cells);
        let start = CellCoord::new(0, 0);
        let goal = CellCoord::new(4, 3);
        let path = find_open_path(&grid, start, goal).expect("path exists");
        assert_eq!(path.len() as u32, start.manhattan(goal) + 1);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow_scores() {
        let grid = GridStore::from_cells(vec![
            open_cell(i32::MIN, i32::MIN),
            open_cell(i32::MIN + 1, i32::MIN),
        ]);
        // The heuristic for this pair is at the u32 ceiling; the search
        // must exhaust the open set and return None, not panic.
        let start = CellCoord::new(i32::MIN, i32::MIN);
        let goal = CellCoord::new(i32::MAX, i32::MAX);
        assert!(find_open_path(&grid, start, goal).is_none());
    }

    #[test]
    fn road_path_requires_reciprocal_edges() {
        let grid = GridStore::from_cells(vec![
            road_cell(0, 0, &[Direction::East]),
            road_cell(1, 0, &[Direction::West]),
            open_cell(2, 0),
        ]);
        let path = find_road_path(&grid, CellCoord::new(0, 0), CellCoord::new(1, 0))
            .expect("reciprocal edge pair");
        assert_eq!(path, vec![CellCoord::new(0, 0), CellCoord::new(1, 0)]);

        // (1,0)-(2,0) has no road edge, so the longer hop fails.
        assert!(find_road_path(&grid, CellCoord::new(0, 0), CellCoord::new(2, 0)).is_none());
    }

    #[test]
    fn one_sided_road_edge_is_not_traversable() {
        let grid = GridStore::from_cells(vec![
            road_cell(0, 0, &[Direction::East]),
            road_cell(1, 0, &[Direction::East]),
        ]);
        assert!(find_road_path(&grid, CellCoord::new(0, 0), CellCoord::new(1, 0)).is_none());
    }

    #[test]
    fn road_path_fails_from_blocked_endpoint() {
        let mut wet = water_cell(0, 0);
        wet.roads = vec![Direction::East];
        let grid = GridStore::from_cells(vec![wet, road_cell(1, 0, &[Direction::West])]);
        assert!(find_road_path(&grid, CellCoord::new(0, 0), CellCoord::new(1, 0)).is_none());
        assert!(find_road_path(&grid, CellCoord::new(1, 0), CellCoord::new(0, 0)).is_none());
    }

    #[test]
    fn road_path_steps_all_have_reciprocal_edges() {
        // L-shaped road: (0,0) E (1,0) S (1,1).
        let grid = GridStore::from_cells(vec![
            road_cell(0, 0, &[Direction::East]),
            road_cell(1, 0, &[Direction::West, Direction::South]),
            road_cell(1, 1, &[Direction::North]),
        ]);
        let path = find_road_path(&grid, CellCoord::new(0, 0), CellCoord::new(1, 1))
            .expect("road path");
        for pair in path.windows(2) {
            let dir = Direction::ALL
                .into_iter()
                .find(|dir| pair[0].step(*dir) == pair[1])
                .expect("adjacent step");
            assert!(grid.has_road_edge(pair[0], dir));
            assert!(grid.has_road_edge(pair[1], dir.opposite()));
        }
    }
}
