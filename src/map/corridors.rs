//! Corridor carving over the chamber grid.
//!
//! Each spanning-tree edge becomes an L-shaped path between chamber
//! centers: a horizontal sweep at the source's y, then a vertical sweep at
//! the destination's x. The interior-floor predicate keeps a later corridor
//! from re-walling a junction where it meets a chamber or an earlier
//! corridor.

use super::chambers::Chamber;
use super::{Grid, Pos, Tile};
use crate::graph::Edge;

/// Floor cell already enclosed by a chamber or an earlier corridor:
/// floor with at least two orthogonal floor neighbors.
fn is_interior_floor(grid: &Grid, pos: Pos) -> bool {
    if !grid.is_floor(pos) {
        return false;
    }
    let floor_neighbors = [
        Pos::new(pos.x, pos.y - 1),
        Pos::new(pos.x, pos.y + 1),
        Pos::new(pos.x - 1, pos.y),
        Pos::new(pos.x + 1, pos.y),
    ]
    .into_iter()
    .filter(|&n| grid.is_floor(n))
    .count();
    floor_neighbors >= 2
}

fn carve_cell(grid: &mut Grid, pos: Pos) {
    if is_interior_floor(grid, pos) {
        return;
    }
    grid.set_tile(pos, Tile::floor());
    for neighbor in [
        Pos::new(pos.x, pos.y - 1),
        Pos::new(pos.x, pos.y + 1),
        Pos::new(pos.x - 1, pos.y),
        Pos::new(pos.x + 1, pos.y),
    ] {
        if grid.in_bounds(neighbor) && !grid.is_floor(neighbor) {
            grid.set_tile(neighbor, Tile::wall());
        }
    }
}

fn sweep(from: i32, to: i32) -> Box<dyn Iterator<Item = i32>> {
    if from <= to {
        Box::new(from..=to)
    } else {
        Box::new((to..=from).rev())
    }
}

/// Carve one L between two chamber centers.
fn carve_between(grid: &mut Grid, start: Pos, end: Pos) {
    for x in sweep(start.x, end.x) {
        carve_cell(grid, Pos::new(x, start.y));
    }
    for y in sweep(start.y, end.y) {
        carve_cell(grid, Pos::new(end.x, y));
    }
}

/// Carve every spanning-tree edge, in acceptance order.
pub fn carve(grid: &mut Grid, chambers: &[Chamber], edges: &[Edge]) {
    for edge in edges {
        carve_between(
            grid,
            chambers[edge.source].center(),
            chambers[edge.dest].center(),
        );
    }
}
