//! Uniform-cost shortest path over the tile grid.
//!
//! Dijkstra over the implicit 4-connected graph of non-wall cells; with unit
//! edge weights this degenerates to breadth-first search, but the frontier
//! stays a priority heap keyed by (distance, insertion sequence) so ties pop
//! in insertion order and the same grid always yields the same path.
//! Distances and predecessors are dense per-cell arrays indexed by
//! `y * width + x`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::map::{Grid, Pos};

fn pos_of(idx: usize, width: i32) -> Pos {
    Pos::new(idx as i32 % width, idx as i32 / width)
}

/// Shortest path from `start` to `stop`, both inclusive. `start == stop`
/// yields the single-element sequence. An unreachable `stop` yields the
/// empty sequence; carving guarantees this does not happen for cells inside
/// the dungeon.
pub fn shortest_path(grid: &Grid, start: Pos, stop: Pos) -> Vec<Pos> {
    if start == stop {
        return vec![start];
    }
    let (Some(start_idx), Some(stop_idx)) = (grid.idx(start), grid.idx(stop)) else {
        return Vec::new();
    };

    let size = (grid.width * grid.height) as usize;
    let mut dist: Vec<Option<u32>> = vec![None; size];
    let mut prev: Vec<Option<usize>> = vec![None; size];
    let mut visited = vec![false; size];

    let mut fringe: BinaryHeap<Reverse<(u32, u64, usize)>> = BinaryHeap::new();
    let mut insert_seq = 0u64;
    dist[start_idx] = Some(0);
    fringe.push(Reverse((0, insert_seq, start_idx)));

    while let Some(Reverse((d, _, idx))) = fringe.pop() {
        if visited[stop_idx] {
            break;
        }
        if visited[idx] {
            continue;
        }
        visited[idx] = true;

        for neighbor in grid.neighbors(pos_of(idx, grid.width)) {
            if grid.is_wall(neighbor) {
                continue;
            }
            let Some(n_idx) = grid.idx(neighbor) else {
                continue;
            };
            if visited[n_idx] {
                continue;
            }
            let candidate = d + 1;
            if dist[n_idx].is_none_or(|current| current > candidate) {
                dist[n_idx] = Some(candidate);
                prev[n_idx] = Some(idx);
                insert_seq += 1;
                fringe.push(Reverse((candidate, insert_seq, n_idx)));
            }
        }
    }

    if prev[stop_idx].is_none() {
        return Vec::new();
    }

    let mut result = vec![stop];
    let mut cursor = stop_idx;
    while cursor != start_idx {
        match prev[cursor] {
            Some(p) => cursor = p,
            None => return Vec::new(),
        }
        result.push(pos_of(cursor, grid.width));
    }
    result.reverse();
    result
}

#[cfg(test)]
mod tests {
    use super::shortest_path;
    use crate::map::{Grid, Pos, Tile};

    fn open_grid(width: i32, height: i32) -> Grid {
        let mut grid = Grid::new(width, height);
        for y in 0..height {
            for x in 0..width {
                grid.set_tile(Pos::new(x, y), Tile::floor());
            }
        }
        grid
    }

    #[test]
    fn start_equals_stop_returns_singleton() {
        let grid = open_grid(5, 5);
        let p = Pos::new(2, 2);
        assert_eq!(shortest_path(&grid, p, p), vec![p]);
    }

    #[test]
    fn open_room_path_has_manhattan_length() {
        let grid = open_grid(10, 10);
        let path = shortest_path(&grid, Pos::new(1, 1), Pos::new(7, 4));
        assert_eq!(path.len(), 6 + 3 + 1);
        assert_eq!(path.first(), Some(&Pos::new(1, 1)));
        assert_eq!(path.last(), Some(&Pos::new(7, 4)));
        for pair in path.windows(2) {
            let step = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
            assert_eq!(step, 1);
        }
    }

    #[test]
    fn walls_force_a_detour() {
        let mut grid = open_grid(7, 7);
        // Vertical wall with one gap at the top.
        for y in 0..6 {
            grid.set_tile(Pos::new(3, y), Tile::wall());
        }
        let path = shortest_path(&grid, Pos::new(1, 1), Pos::new(5, 1));
        assert!(!path.is_empty());
        assert!(path.iter().all(|&p| !grid.is_wall(p)));
        assert!(path.len() > 5, "path must route around the wall");
    }

    #[test]
    fn unreachable_stop_yields_empty_path() {
        let mut grid = open_grid(7, 7);
        for y in 0..7 {
            grid.set_tile(Pos::new(3, y), Tile::wall());
        }
        assert!(shortest_path(&grid, Pos::new(1, 1), Pos::new(5, 1)).is_empty());
    }

    #[test]
    fn equal_cost_ties_resolve_identically_every_run() {
        let grid = open_grid(12, 12);
        let first = shortest_path(&grid, Pos::new(0, 0), Pos::new(9, 9));
        for _ in 0..5 {
            assert_eq!(shortest_path(&grid, Pos::new(0, 0), Pos::new(9, 9)), first);
        }
    }
}
