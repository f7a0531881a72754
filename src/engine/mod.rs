//! Command-string session driver.
//!
//! One character is one token: `n<seed>s` starts a fresh world, `l` resumes
//! the saved one, `w a s d` move, `t` toggles the light, and the
//! consecutive pair `:q` saves and ends the session. Unrecognized tokens
//! are ignored and consume no turn. Every recognized mutation is one atomic
//! turn: apply it, check the win, then run one pursuit step.

#![allow(dead_code)]

use std::path::PathBuf;

use crate::error::{GameError, Result};
use crate::map::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::save;
use crate::world::{PursuitOutcome, World};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    InProgress,
    Won,
    Caught,
    Saved,
}

#[derive(Debug)]
pub struct Session {
    pub world: World,
    pub outcome: SessionOutcome,
}

pub struct Engine {
    save_path: PathBuf,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            save_path: save::default_path(),
        }
    }

    /// Point the engine at a different snapshot file. Tests use this to
    /// keep sessions out of the working directory.
    pub fn with_save_path(save_path: PathBuf) -> Self {
        Self { save_path }
    }

    /// Run a whole command string and return the finished session. The
    /// same string always produces the same world, and a string split at a
    /// `:q` marker resumes via `l` into the identical state.
    pub fn interact(&self, input: &str) -> Result<Session> {
        let mut chars = input.chars();
        match chars.next() {
            Some('n' | 'N') => {
                let (seed, rest) = extract_seed(input)?;
                let world = World::generate(WORLD_WIDTH, WORLD_HEIGHT, seed)?;
                self.play(world, rest)
            }
            Some('l' | 'L') => {
                let world = save::load(&self.save_path)?;
                self.play(world, &input[1..])
            }
            _ => Err(GameError::InvalidSeed(input.to_string())),
        }
    }

    fn play(&self, mut world: World, commands: &str) -> Result<Session> {
        let mut prev = ' ';
        for ch in commands.chars() {
            if prev == ':' && matches!(ch, 'q' | 'Q') {
                save::save(&world, &self.save_path)?;
                return Ok(Session {
                    world,
                    outcome: SessionOutcome::Saved,
                });
            }
            prev = ch;

            let mutated = match ch {
                'w' | 'W' => {
                    world.move_up();
                    true
                }
                's' | 'S' => {
                    world.move_down();
                    true
                }
                'a' | 'A' => {
                    world.move_left();
                    true
                }
                'd' | 'D' => {
                    world.move_right();
                    true
                }
                't' | 'T' => {
                    world.toggle_light();
                    true
                }
                _ => false,
            };
            if !mutated {
                continue;
            }

            if world.has_won() {
                return Ok(Session {
                    world,
                    outcome: SessionOutcome::Won,
                });
            }
            let path = world.pursuit_path();
            if world.pursuit_step(&path) == PursuitOutcome::Caught {
                return Ok(Session {
                    world,
                    outcome: SessionOutcome::Caught,
                });
            }
        }
        Ok(Session {
            world,
            outcome: SessionOutcome::InProgress,
        })
    }
}

/// Parse the base-10 seed between the leading `n` and the first `s`/`S`,
/// returning the seed and the remaining command suffix.
fn extract_seed(input: &str) -> Result<(u64, &str)> {
    let terminator = input[1..]
        .find(['s', 'S'])
        .ok_or_else(|| GameError::InvalidSeed(input.to_string()))?;
    let digits = &input[1..1 + terminator];
    let seed = digits
        .parse::<u64>()
        .map_err(|_| GameError::InvalidSeed(input.to_string()))?;
    Ok((seed, &input[1 + terminator + 1..]))
}

#[cfg(test)]
mod tests {
    use super::{Engine, SessionOutcome, extract_seed};
    use crate::error::GameError;
    use tempfile::tempdir;

    #[test]
    fn seed_parses_up_to_the_first_terminator() {
        assert_eq!(extract_seed("n12345sddd").unwrap(), (12345, "ddd"));
        assert_eq!(extract_seed("N42Swasd").unwrap(), (42, "wasd"));
        // 's' doubles as move-down after the terminator.
        assert_eq!(extract_seed("n7ssss").unwrap(), (7, "sss"));
    }

    #[test]
    fn malformed_seeds_are_format_errors() {
        for input in ["n12x34s", "n123", "ns", "x123s"] {
            let engine = Engine::with_save_path(std::env::temp_dir().join("unused.json"));
            let result = if input.starts_with(['n', 'N']) {
                extract_seed(input).map(|_| ())
            } else {
                engine.interact(input).map(|_| ())
            };
            assert!(
                matches!(result, Err(GameError::InvalidSeed(_))),
                "expected InvalidSeed for {input:?}"
            );
        }
    }

    #[test]
    fn identical_command_strings_yield_identical_grids() {
        let dir = tempdir().unwrap();
        let engine = Engine::with_save_path(dir.path().join("previous_world.json"));
        let first = engine.interact("n12345sddd").unwrap();
        let second = engine.interact("n12345sddd").unwrap();
        assert_eq!(first.world, second.world);
        assert_eq!(first.outcome, SessionOutcome::InProgress);
    }

    #[test]
    fn unrecognized_tokens_consume_no_turn() {
        let dir = tempdir().unwrap();
        let engine = Engine::with_save_path(dir.path().join("previous_world.json"));
        let plain = engine.interact("n5s").unwrap();
        let noisy = engine.interact("n5szz!z").unwrap();
        assert_eq!(plain.world, noisy.world);
    }

    #[test]
    fn save_quit_then_load_replays_into_the_same_state() {
        let dir = tempdir().unwrap();
        let engine = Engine::with_save_path(dir.path().join("previous_world.json"));

        let split_head = engine.interact("n987sdw:q").unwrap();
        assert_eq!(split_head.outcome, SessionOutcome::Saved);
        let split = engine.interact("lad").unwrap();

        let continuous = engine.interact("n987sdwad").unwrap();
        assert_eq!(split.world, continuous.world);
        assert_eq!(split.outcome, continuous.outcome);
    }

    #[test]
    fn load_without_a_snapshot_is_an_io_error() {
        let dir = tempdir().unwrap();
        let engine = Engine::with_save_path(dir.path().join("previous_world.json"));
        assert!(matches!(
            engine.interact("lwww"),
            Err(GameError::Io(_))
        ));
    }

    #[test]
    fn save_marker_must_be_consecutive() {
        let dir = tempdir().unwrap();
        let engine = Engine::with_save_path(dir.path().join("previous_world.json"));
        // ':' followed by a non-q is not a save; the session just runs out.
        let session = engine.interact("n11s:d:q").unwrap();
        assert_eq!(session.outcome, SessionOutcome::Saved);
        let session = engine.interact("n11s:w").unwrap();
        assert_eq!(session.outcome, SessionOutcome::InProgress);
    }
}
