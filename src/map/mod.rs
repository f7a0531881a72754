//! Tile grid owned by the world.
//!
//! Origin (0, 0), x increasing rightward, y increasing upward; the renderer
//! flips y for the screen. Tiles are immutable values: "mutation" replaces
//! the array slot wholesale, never a field behind a shared reference.

#![allow(dead_code)]

pub mod chambers;
pub mod corridors;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub const WORLD_WIDTH: i32 = 80;
pub const WORLD_HEIGHT: i32 = 30;

pub const NOTHING_GLYPH: u16 = b' ' as u16;
pub const WALL_GLYPH: u16 = b'#' as u16;
pub const FLOOR_GLYPH: u16 = b'.' as u16;
pub const AVATAR_GLYPH: u16 = b'@' as u16;
pub const ADVERSARY_GLYPH: u16 = b'^' as u16;
pub const LOCKED_DOOR_GLYPH: u16 = b'+' as u16;
pub const PATH_MARKER_GLYPH: u16 = b'*' as u16;

pub const BLACK: (u8, u8, u8) = (0, 0, 0);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub glyph: u16,
    pub fg: (u8, u8, u8),
    pub bg: (u8, u8, u8),
    pub desc: String,
}

impl Tile {
    fn build(glyph: u16, fg: (u8, u8, u8), bg: (u8, u8, u8), desc: &str) -> Self {
        Self {
            glyph,
            fg,
            bg,
            desc: desc.to_string(),
        }
    }

    pub fn nothing() -> Self {
        Self::build(NOTHING_GLYPH, BLACK, BLACK, "nothing")
    }

    pub fn wall() -> Self {
        Self::build(WALL_GLYPH, (120, 100, 60), BLACK, "wall")
    }

    pub fn floor() -> Self {
        Self::build(FLOOR_GLYPH, (128, 192, 128), BLACK, "floor")
    }

    pub fn locked_door() -> Self {
        Self::build(LOCKED_DOOR_GLYPH, (255, 170, 64), BLACK, "locked door")
    }

    pub fn avatar() -> Self {
        Self::build(AVATAR_GLYPH, (255, 255, 255), BLACK, "you")
    }

    /// Avatar marker preserving the background of the cell it stands on.
    pub fn avatar_over(bg: (u8, u8, u8)) -> Self {
        Self::build(AVATAR_GLYPH, (255, 255, 255), bg, "you")
    }

    pub fn adversary() -> Self {
        Self::build(ADVERSARY_GLYPH, (255, 95, 86), BLACK, "adversary")
    }

    pub fn adversary_over(bg: (u8, u8, u8)) -> Self {
        Self::build(ADVERSARY_GLYPH, (255, 95, 86), bg, "adversary")
    }

    pub fn floor_over(bg: (u8, u8, u8)) -> Self {
        Self::build(FLOOR_GLYPH, (128, 192, 128), bg, "floor")
    }

    /// Pursuit-path overlay marker; display only, always restored.
    pub fn path_marker_over(bg: (u8, u8, u8)) -> Self {
        Self::build(PATH_MARKER_GLYPH, (96, 165, 255), bg, "pursuit path")
    }

    /// Same tile with a replacement background.
    pub fn with_bg(&self, bg: (u8, u8, u8)) -> Self {
        Self {
            glyph: self.glyph,
            fg: self.fg,
            bg,
            desc: self.desc.clone(),
        }
    }

    pub fn is_wall(&self) -> bool {
        self.glyph == WALL_GLYPH
    }

    pub fn is_floor(&self) -> bool {
        self.glyph == FLOOR_GLYPH
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        let size = (width * height) as usize;
        Self {
            width,
            height,
            tiles: vec![Tile::nothing(); size],
        }
    }

    pub fn idx(&self, pos: Pos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.y * self.width + pos.x) as usize)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    pub fn tile_at(&self, pos: Pos) -> Option<&Tile> {
        self.idx(pos).map(|idx| &self.tiles[idx])
    }

    pub fn set_tile(&mut self, pos: Pos, tile: Tile) {
        if let Some(idx) = self.idx(pos) {
            self.tiles[idx] = tile;
        }
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.tile_at(pos).is_some_and(|tile| tile.is_wall())
    }

    pub fn is_floor(&self, pos: Pos) -> bool {
        self.tile_at(pos).is_some_and(|tile| tile.is_floor())
    }

    /// In-bounds orthogonal neighbors, enumerated left, right, down, up.
    /// The pathfinder's determinism leans on this order.
    pub fn neighbors(&self, pos: Pos) -> SmallVec<[Pos; 4]> {
        let mut result = SmallVec::new();
        for candidate in [
            Pos::new(pos.x - 1, pos.y),
            Pos::new(pos.x + 1, pos.y),
            Pos::new(pos.x, pos.y - 1),
            Pos::new(pos.x, pos.y + 1),
        ] {
            if self.in_bounds(candidate) {
                result.push(candidate);
            }
        }
        result
    }

    pub fn count_glyph(&self, glyph: u16) -> usize {
        self.tiles.iter().filter(|tile| tile.glyph == glyph).count()
    }
}

#[cfg(test)]
mod tests {
    use super::{Grid, Pos, Tile};

    #[test]
    fn out_of_bounds_reads_and_writes_are_inert() {
        let mut grid = Grid::new(4, 3);
        assert!(grid.tile_at(Pos::new(4, 0)).is_none());
        assert!(grid.tile_at(Pos::new(0, -1)).is_none());
        grid.set_tile(Pos::new(9, 9), Tile::wall());
        assert_eq!(grid.count_glyph(super::WALL_GLYPH), 0);
    }

    #[test]
    fn set_tile_replaces_the_slot_value() {
        let mut grid = Grid::new(2, 2);
        let pos = Pos::new(1, 1);
        grid.set_tile(pos, Tile::floor());
        assert!(grid.is_floor(pos));
        grid.set_tile(pos, Tile::wall());
        assert!(grid.is_wall(pos));
    }

    #[test]
    fn neighbors_are_clipped_and_ordered() {
        let grid = Grid::new(3, 3);
        let corner: Vec<Pos> = grid.neighbors(Pos::new(0, 0)).into_vec();
        assert_eq!(corner, vec![Pos::new(1, 0), Pos::new(0, 1)]);
        let center: Vec<Pos> = grid.neighbors(Pos::new(1, 1)).into_vec();
        assert_eq!(
            center,
            vec![
                Pos::new(0, 1),
                Pos::new(2, 1),
                Pos::new(1, 0),
                Pos::new(1, 2)
            ]
        );
    }
}
