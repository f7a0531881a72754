//! Rejection-sampling chamber placement.
//!
//! Candidates are drawn from the shared generator and accepted only when
//! they fit inside the grid with a one-tile margin and their padded bounding
//! box touches no previously accepted chamber. The draw loop is bounded;
//! pathological grid/seed combinations fail typed instead of hanging.

use serde::{Deserialize, Serialize};

use super::{Grid, Pos, Tile};
use crate::error::{GameError, Result};
use crate::rng::GameRng;

/// Draw budget for one world's worth of chambers.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 100_000;

/// Axis-aligned rectangular room described by its center and extents.
/// Fixed once accepted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chamber {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Chamber {
    /// Draw a candidate. Width and height are bounded by the distance from
    /// the drawn center to the nearest grid edge, so most candidates are at
    /// least plausible before the acceptance checks run.
    fn sample(rng: &mut GameRng, grid_w: i32, grid_h: i32) -> Self {
        let x = rng.range(2, grid_w - 2);
        let y = rng.range(2, grid_h - 2);
        let width = rng.range(2, 3 + (grid_w / 2).min(2 * x.min(grid_w - x)));
        let height = rng.range(2, 3 + (grid_h / 2).min(2 * y.min(grid_h - y)));
        Self {
            x,
            y,
            width,
            height,
        }
    }

    // Wall-ring edges. The interior is strictly inside these.
    pub fn left(&self) -> i32 {
        self.x - self.width / 2
    }

    pub fn right(&self) -> i32 {
        self.x + (self.width + 1) / 2
    }

    pub fn bottom(&self) -> i32 {
        self.y - self.height / 2
    }

    pub fn up(&self) -> i32 {
        self.y + (self.height + 1) / 2
    }

    pub fn center(&self) -> Pos {
        Pos::new(self.x, self.y)
    }

    /// Manhattan distance between centers; the corridor-graph edge weight.
    pub fn center_distance(&self, other: &Chamber) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Fully inside the grid with a one-tile margin on every side.
    pub fn fits_within(&self, grid_w: i32, grid_h: i32) -> bool {
        self.left() >= 1
            && self.right() <= grid_w - 2
            && self.bottom() >= 1
            && self.up() <= grid_h - 2
    }

    /// True when the one-tile-padded bounding boxes intersect.
    pub fn padded_overlap(&self, other: &Chamber) -> bool {
        let x_overlap = self.right() + 1 >= other.left() && other.right() + 1 >= self.left();
        let y_overlap = self.up() + 1 >= other.bottom() && other.up() + 1 >= self.bottom();
        x_overlap && y_overlap
    }
}

/// Sample chambers until `target` have been accepted.
pub fn generate(
    rng: &mut GameRng,
    grid_w: i32,
    grid_h: i32,
    target: usize,
) -> Result<Vec<Chamber>> {
    let mut chambers: Vec<Chamber> = Vec::with_capacity(target);
    let mut attempts = 0u32;
    while chambers.len() < target {
        if attempts >= MAX_PLACEMENT_ATTEMPTS {
            return Err(GameError::GenerationFailed { attempts });
        }
        attempts += 1;

        let candidate = Chamber::sample(rng, grid_w, grid_h);
        if candidate.fits_within(grid_w, grid_h)
            && !chambers.iter().any(|c| c.padded_overlap(&candidate))
        {
            chambers.push(candidate);
        }
    }
    Ok(chambers)
}

/// Reset the grid and stamp every chamber: wall ring on the border
/// rectangle, floor strictly inside.
pub fn fill_into_grid(chambers: &[Chamber], grid: &mut Grid) {
    for y in 0..grid.height {
        for x in 0..grid.width {
            grid.set_tile(Pos::new(x, y), Tile::nothing());
        }
    }

    for chamber in chambers {
        for x in chamber.left()..=chamber.right() {
            grid.set_tile(Pos::new(x, chamber.up()), Tile::wall());
            grid.set_tile(Pos::new(x, chamber.bottom()), Tile::wall());
        }
        for y in chamber.bottom()..=chamber.up() {
            grid.set_tile(Pos::new(chamber.left(), y), Tile::wall());
            grid.set_tile(Pos::new(chamber.right(), y), Tile::wall());
        }
        for x in (chamber.left() + 1)..chamber.right() {
            for y in (chamber.bottom() + 1)..chamber.up() {
                grid.set_tile(Pos::new(x, y), Tile::floor());
            }
        }
    }
}
