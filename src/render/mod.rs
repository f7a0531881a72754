use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::*;

use crate::map::{Grid, Pos};

/// Blit the grid. World y grows upward, screen y grows downward, so rows
/// are flipped around the grid height.
pub fn draw_grid(ctx: &mut BTerm, grid: &Grid, origin: Point) {
    for y in 0..grid.height {
        let screen_y = origin.y + (grid.height - 1 - y);
        for x in 0..grid.width {
            if let Some(tile) = grid.tile_at(Pos::new(x, y)) {
                let fg = RGB::from_u8(tile.fg.0, tile.fg.1, tile.fg.2);
                let bg = RGB::from_u8(tile.bg.0, tile.bg.1, tile.bg.2);
                ctx.set(origin.x + x, screen_y, fg, bg, tile.glyph);
            }
        }
    }
}

pub fn draw_status(ctx: &mut BTerm, y: i32, text: &str) {
    ctx.print_color(1, y, RGB::named(WHITE), RGB::named(BLACK), text);
}

pub fn draw_banner(ctx: &mut BTerm, y: i32, text: &str) {
    ctx.print_color_centered(y, RGB::named(YELLOW), RGB::named(BLACK), text);
}
