mod engine;
mod error;
mod graph;
mod map;
mod path;
mod render;
mod rng;
mod save;
mod world;

use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::*;

use map::{WORLD_HEIGHT, WORLD_WIDTH};
use world::{PursuitOutcome, World};

const SCREEN_WIDTH: i32 = 80;
const SCREEN_HEIGHT: i32 = 32;
const MAP_ORIGIN: Point = Point { x: 0, y: 1 };
const STATUS_ROW: i32 = SCREEN_HEIGHT - 1;

enum Mode {
    Menu,
    SeedEntry(String),
    Playing(World),
    Finished(String),
}

struct MazeboundState {
    mode: Mode,
    status: String,
}

impl MazeboundState {
    fn new() -> Self {
        Self {
            mode: Mode::Menu,
            status: String::new(),
        }
    }

    fn handle_menu(&mut self, ctx: &mut BTerm) {
        if let Some(key) = ctx.key {
            match key {
                VirtualKeyCode::N => self.mode = Mode::SeedEntry(String::new()),
                VirtualKeyCode::L => match save::load(&save::default_path()) {
                    Ok(world) => {
                        self.status.clear();
                        self.mode = Mode::Playing(world);
                    }
                    Err(err) => self.status = format!("No resumable session ({err})"),
                },
                VirtualKeyCode::Q | VirtualKeyCode::Escape => ctx.quitting = true,
                _ => {}
            }
        }
    }

    fn handle_seed_entry(&mut self, ctx: &mut BTerm) {
        let Mode::SeedEntry(digits) = &mut self.mode else {
            return;
        };
        let Some(key) = ctx.key else {
            return;
        };
        if let Some(digit) = digit_of(key) {
            digits.push(digit);
            return;
        }
        match key {
            VirtualKeyCode::Back => {
                digits.pop();
            }
            VirtualKeyCode::S | VirtualKeyCode::Return => match digits.parse::<u64>() {
                Ok(seed) => match World::generate(WORLD_WIDTH, WORLD_HEIGHT, seed) {
                    Ok(world) => {
                        self.status.clear();
                        self.mode = Mode::Playing(world);
                    }
                    Err(err) => {
                        self.status = format!("Generation failed: {err}");
                        self.mode = Mode::Menu;
                    }
                },
                Err(_) => self.status = "Seed must be base-10 digits".to_string(),
            },
            VirtualKeyCode::Escape => self.mode = Mode::Menu,
            _ => {}
        }
    }

    fn handle_playing(&mut self, ctx: &mut BTerm) {
        let Mode::Playing(world) = &mut self.mode else {
            return;
        };
        let Some(key) = ctx.key else {
            return;
        };

        let moved = match key {
            VirtualKeyCode::Up | VirtualKeyCode::W | VirtualKeyCode::K => {
                world.move_up();
                true
            }
            VirtualKeyCode::Down | VirtualKeyCode::S | VirtualKeyCode::J => {
                world.move_down();
                true
            }
            VirtualKeyCode::Left | VirtualKeyCode::A | VirtualKeyCode::H => {
                world.move_left();
                true
            }
            VirtualKeyCode::Right | VirtualKeyCode::D | VirtualKeyCode::L => {
                world.move_right();
                true
            }
            VirtualKeyCode::T => {
                world.toggle_light();
                true
            }
            VirtualKeyCode::Q | VirtualKeyCode::Escape => {
                match save::save(world, &save::default_path()) {
                    Ok(()) => ctx.quitting = true,
                    Err(err) => self.status = format!("Save failed: {err}"),
                }
                false
            }
            _ => false,
        };
        if !moved {
            return;
        }

        if world.has_won() {
            self.mode = Mode::Finished("You reached the door and escaped!".to_string());
            return;
        }
        let path = world.pursuit_path();
        if world.pursuit_step(&path) == PursuitOutcome::Caught {
            self.mode = Mode::Finished("The adversary caught you.".to_string());
        }
    }

    fn draw(&mut self, ctx: &mut BTerm) {
        match &mut self.mode {
            Mode::Menu => {
                render::draw_banner(ctx, 8, "M A Z E B O U N D");
                render::draw_banner(ctx, 12, "New game (N)");
                render::draw_banner(ctx, 14, "Load (L)");
                render::draw_banner(ctx, 16, "Quit (Q)");
            }
            Mode::SeedEntry(digits) => {
                render::draw_banner(ctx, 10, "Type a seed, then press S");
                render::draw_banner(ctx, 14, digits);
            }
            Mode::Playing(world) => {
                // Overlay the pursuit path for this frame only; the literal
                // prior tiles go straight back.
                let path = world.pursuit_path();
                let saved = world.overlay_pursuit_path(&path);
                render::draw_grid(ctx, &world.grid, MAP_ORIGIN);
                world.restore_pursuit_path(saved);
                let desc = world.tile_under_avatar.desc.clone();
                render::draw_status(ctx, STATUS_ROW, &format!("Standing on: {desc}"));
            }
            Mode::Finished(message) => {
                render::draw_banner(ctx, 12, message);
                render::draw_banner(ctx, 16, "Press Q to quit");
            }
        }
        if !self.status.is_empty() {
            render::draw_status(ctx, 0, &self.status.clone());
        }
    }
}

impl GameState for MazeboundState {
    fn tick(&mut self, ctx: &mut BTerm) {
        match self.mode {
            Mode::Menu => self.handle_menu(ctx),
            Mode::SeedEntry(_) => self.handle_seed_entry(ctx),
            Mode::Playing(_) => self.handle_playing(ctx),
            Mode::Finished(_) => {
                if let Some(VirtualKeyCode::Q | VirtualKeyCode::Escape) = ctx.key {
                    ctx.quitting = true;
                }
            }
        }
        ctx.cls();
        self.draw(ctx);
    }
}

fn digit_of(key: VirtualKeyCode) -> Option<char> {
    match key {
        VirtualKeyCode::Key0 | VirtualKeyCode::Numpad0 => Some('0'),
        VirtualKeyCode::Key1 | VirtualKeyCode::Numpad1 => Some('1'),
        VirtualKeyCode::Key2 | VirtualKeyCode::Numpad2 => Some('2'),
        VirtualKeyCode::Key3 | VirtualKeyCode::Numpad3 => Some('3'),
        VirtualKeyCode::Key4 | VirtualKeyCode::Numpad4 => Some('4'),
        VirtualKeyCode::Key5 | VirtualKeyCode::Numpad5 => Some('5'),
        VirtualKeyCode::Key6 | VirtualKeyCode::Numpad6 => Some('6'),
        VirtualKeyCode::Key7 | VirtualKeyCode::Numpad7 => Some('7'),
        VirtualKeyCode::Key8 | VirtualKeyCode::Numpad8 => Some('8'),
        VirtualKeyCode::Key9 | VirtualKeyCode::Numpad9 => Some('9'),
        _ => None,
    }
}

/// Headless mode: run a whole command string (e.g. `n12345sddd:q`) and dump
/// the final grid to stdout. The interactive terminal loop starts when no
/// argument is given.
fn run_headless(commands: &str) -> BError {
    let session = engine::Engine::new().interact(commands)?;
    let grid = &session.world.grid;
    for y in (0..grid.height).rev() {
        let mut row = String::with_capacity(grid.width as usize);
        for x in 0..grid.width {
            let glyph = grid
                .tile_at(map::Pos::new(x, y))
                .map_or(b' ' as u16, |tile| tile.glyph);
            row.push(char::from_u32(glyph as u32).unwrap_or(' '));
        }
        println!("{row}");
    }
    Ok(())
}

fn main() -> BError {
    if let Some(commands) = std::env::args().nth(1) {
        return run_headless(&commands);
    }
    let context = BTermBuilder::simple(SCREEN_WIDTH, SCREEN_HEIGHT)?
        .with_title("Mazebound")
        .build()?;
    main_loop(context, MazeboundState::new())
}
