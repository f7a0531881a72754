//! World state and turn-by-turn mutation.
//!
//! Owns the generator, the chamber list, the grid, and both actor
//! positions. Generation runs once, in a fixed order, entirely from the
//! seeded generator; afterwards only movement, pursuit, and the light
//! toggle mutate the grid. The whole struct is the unit of persistence.

use crate::error::Result;
use crate::graph::ConnectivityGraph;
use crate::map::chambers::{self, Chamber};
use crate::map::{corridors, BLACK, Grid, LOCKED_DOOR_GLYPH, Pos, Tile};
use crate::path::shortest_path;
use crate::rng::GameRng;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PursuitOutcome {
    Advanced,
    /// The adversary is already on (or next to) the avatar.
    Caught,
}

#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub rng: GameRng,
    pub chambers: Vec<Chamber>,
    pub grid: Grid,
    pub avatar: Pos,
    pub adversary: Pos,
    /// The literal tile the avatar is standing on, written back when the
    /// avatar leaves the cell.
    pub tile_under_avatar: Tile,
}

impl World {
    /// Generate a complete world from a seed. The draw order is part of the
    /// determinism contract: target chamber count, chamber candidates,
    /// avatar, adversary, then door.
    pub fn generate(width: i32, height: i32, seed: u64) -> Result<Self> {
        let mut rng = GameRng::seeded(seed);
        let target = rng.range(5, 15) as usize;
        let chambers = chambers::generate(&mut rng, width, height, target)?;

        let mut grid = Grid::new(width, height);
        chambers::fill_into_grid(&chambers, &mut grid);

        let mst = ConnectivityGraph::complete(&chambers).minimum_spanning_tree()?;
        corridors::carve(&mut grid, &chambers, &mst);

        let avatar = place_on_floor(&mut rng, &grid, &chambers[0]);
        let tile_under_avatar = grid
            .tile_at(avatar)
            .cloned()
            .unwrap_or_else(Tile::floor);
        grid.set_tile(avatar, Tile::avatar());

        let last = chambers[chambers.len() - 1];
        let adversary = place_on_floor(&mut rng, &grid, &last);
        grid.set_tile(adversary, Tile::adversary());

        place_door(&mut rng, &mut grid, &last);

        let mut world = Self {
            rng,
            chambers,
            grid,
            avatar,
            adversary,
            tile_under_avatar,
        };
        // The middle chamber starts lit.
        world.toggle_light();
        Ok(world)
    }

    pub fn move_up(&mut self) {
        self.step(0, 1);
    }

    pub fn move_down(&mut self) {
        self.step(0, -1);
    }

    pub fn move_left(&mut self) {
        self.step(-1, 0);
    }

    pub fn move_right(&mut self) {
        self.step(1, 0);
    }

    /// One avatar step. Walls block; the outer wall ring makes a separate
    /// bounds check unnecessary, but an out-of-bounds target still blocks.
    fn step(&mut self, dx: i32, dy: i32) {
        let target = Pos::new(self.avatar.x + dx, self.avatar.y + dy);
        let Some(ahead) = self.grid.tile_at(target) else {
            return;
        };
        if ahead.is_wall() {
            return;
        }

        let arrived = ahead.clone();
        self.grid
            .set_tile(self.avatar, self.tile_under_avatar.clone());
        self.avatar = target;
        self.tile_under_avatar = arrived;
        let bg = self.tile_under_avatar.bg;
        self.grid.set_tile(self.avatar, Tile::avatar_over(bg));
    }

    /// The avatar has stepped onto the locked door.
    pub fn has_won(&self) -> bool {
        self.tile_under_avatar.glyph == LOCKED_DOOR_GLYPH
    }

    /// Freshly computed avatar-to-adversary path for this turn.
    pub fn pursuit_path(&self) -> Vec<Pos> {
        shortest_path(&self.grid, self.avatar, self.adversary)
    }

    /// Overlay path markers on every cell strictly between the endpoints,
    /// returning the literal prior tiles for restoration. Restoring the
    /// exact tiles (not generic floor) keeps any special cell the path
    /// happens to cross intact.
    pub fn overlay_pursuit_path(&mut self, path: &[Pos]) -> Vec<(Pos, Tile)> {
        let mut saved = Vec::new();
        for &pos in path {
            if pos == self.avatar || pos == self.adversary {
                continue;
            }
            if let Some(prior) = self.grid.tile_at(pos).cloned() {
                let marker = Tile::path_marker_over(prior.bg);
                self.grid.set_tile(pos, marker);
                saved.push((pos, prior));
            }
        }
        saved
    }

    pub fn restore_pursuit_path(&mut self, saved: Vec<(Pos, Tile)>) {
        for (pos, tile) in saved {
            self.grid.set_tile(pos, tile);
        }
    }

    /// Advance the adversary one cell along `path` toward the avatar. A
    /// path of length one or less means the chase is over.
    pub fn pursuit_step(&mut self, path: &[Pos]) -> PursuitOutcome {
        if path.len() <= 1 {
            return PursuitOutcome::Caught;
        }

        let old_bg = self
            .grid
            .tile_at(self.adversary)
            .map_or(BLACK, |tile| tile.bg);
        self.grid.set_tile(self.adversary, Tile::floor_over(old_bg));

        self.adversary = path[path.len() - 2];
        let new_bg = self
            .grid
            .tile_at(self.adversary)
            .map_or(BLACK, |tile| tile.bg);
        self.grid
            .set_tile(self.adversary, Tile::adversary_over(new_bg));
        PursuitOutcome::Advanced
    }

    /// Toggle the light in the middle chamber. State is read off the
    /// chamber-center cell's background rather than a flag, so a restored
    /// snapshot needs no extra bookkeeping.
    pub fn toggle_light(&mut self) {
        let chamber = self.chambers[self.chambers.len() / 2];
        let center_bg = self
            .grid
            .tile_at(chamber.center())
            .map_or(BLACK, |tile| tile.bg);
        if center_bg != BLACK {
            self.light_off(&chamber);
        } else {
            self.light_on(&chamber);
        }
    }

    fn light_on(&mut self, chamber: &Chamber) {
        for x in (chamber.left() + 1)..chamber.right() {
            for y in (chamber.bottom() + 1)..chamber.up() {
                let pos = Pos::new(x, y);
                let dist = (chamber.x - x).abs().max((chamber.y - y).abs());
                if let Some(tile) = self.grid.tile_at(pos) {
                    let relit = tile.with_bg(lit_background(dist));
                    self.grid.set_tile(pos, relit);
                }
            }
        }
    }

    fn light_off(&mut self, chamber: &Chamber) {
        for x in (chamber.left() + 1)..chamber.right() {
            for y in (chamber.bottom() + 1)..chamber.up() {
                let pos = Pos::new(x, y);
                if let Some(tile) = self.grid.tile_at(pos) {
                    let dark = tile.with_bg(BLACK);
                    self.grid.set_tile(pos, dark);
                }
            }
        }
    }
}

/// Brightness falls off with Chebyshev distance from the chamber center but
/// never reaches black: the implicit lit/unlit check depends on lit cells
/// staying distinguishable from the dark state.
fn lit_background(dist: i32) -> (u8, u8, u8) {
    let level = (200 - 35 * dist).clamp(16, 200) as u8;
    (level, level, level / 3)
}

/// Rejection-sample a floor cell in the chamber's open interior. The
/// interior always contains floor, so this terminates.
fn place_on_floor(rng: &mut GameRng, grid: &Grid, chamber: &Chamber) -> Pos {
    loop {
        let x = rng.range(chamber.left() + 1, chamber.right());
        let y = rng.range(chamber.bottom() + 1, chamber.up());
        let pos = Pos::new(x, y);
        if grid.is_floor(pos) {
            return pos;
        }
    }
}

/// Overwrite one cell on a random border midline of the chamber with the
/// locked door. Deliberately unconditional, matching the source behavior:
/// the overwritten cell is not checked to be a wall.
fn place_door(rng: &mut GameRng, grid: &mut Grid, chamber: &Chamber) {
    if rng.coin_flip() {
        let y = rng.range(chamber.bottom() + 1, chamber.up());
        let x = if rng.coin_flip() {
            chamber.left()
        } else {
            chamber.right()
        };
        grid.set_tile(Pos::new(x, y), Tile::locked_door());
    } else {
        let x = rng.range(chamber.left() + 1, chamber.right());
        let y = if rng.coin_flip() {
            chamber.up()
        } else {
            chamber.bottom()
        };
        grid.set_tile(Pos::new(x, y), Tile::locked_door());
    }
}
