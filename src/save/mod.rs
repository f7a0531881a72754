//! Snapshot persistence.
//!
//! One versioned snapshot at a fixed well-known file per working directory;
//! each save overwrites the last. The snapshot captures every mutable field
//! of the world, including the generator's internal position, so a reloaded
//! session replays bit-identically.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::map::chambers::Chamber;
use crate::map::{Grid, Pos, Tile};
use crate::rng::GameRng;
use crate::world::World;

pub const SNAPSHOT_FILE: &str = "previous_world.json";
pub const FORMAT_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub format_version: u32,
    pub saved_at_unix_ms: i64,
    pub rng: GameRng,
    pub chambers: Vec<Chamber>,
    pub grid: Grid,
    pub avatar: Pos,
    pub adversary: Pos,
    pub tile_under_avatar: Tile,
}

impl Snapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            saved_at_unix_ms: Utc::now().timestamp_millis(),
            rng: world.rng.clone(),
            chambers: world.chambers.clone(),
            grid: world.grid.clone(),
            avatar: world.avatar,
            adversary: world.adversary,
            tile_under_avatar: world.tile_under_avatar.clone(),
        }
    }

    pub fn into_world(self) -> World {
        World {
            rng: self.rng,
            chambers: self.chambers,
            grid: self.grid,
            avatar: self.avatar,
            adversary: self.adversary,
            tile_under_avatar: self.tile_under_avatar,
        }
    }
}

/// Snapshot location for the current working directory.
pub fn default_path() -> PathBuf {
    PathBuf::from(SNAPSHOT_FILE)
}

/// Serialize the world to `path`, overwriting any prior snapshot. The write
/// goes through a temp file and a rename so a crash mid-write cannot leave
/// a truncated snapshot behind.
pub fn save(world: &World, path: &Path) -> Result<()> {
    let snapshot = Snapshot::capture(world);
    let json = serde_json::to_string_pretty(&snapshot)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Deserialize a world from `path`. Absent, unreadable, undecodable, or
/// version-mismatched snapshots fail typed; the caller decides how to fall
/// back.
pub fn load(path: &Path) -> Result<World> {
    let content = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&content)?;
    if snapshot.format_version != FORMAT_VERSION {
        return Err(GameError::BadSnapshotVersion {
            found: snapshot.format_version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(snapshot.into_world())
}

#[cfg(test)]
mod tests {
    use super::{FORMAT_VERSION, load, save};
    use crate::error::GameError;
    use crate::world::World;
    use tempfile::tempdir;

    #[test]
    fn save_then_load_round_trips_the_whole_world() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("previous_world.json");

        let mut world = World::generate(80, 30, 12345).unwrap();
        world.move_right();
        world.toggle_light();

        save(&world, &path).unwrap();
        let restored = load(&path).unwrap();
        assert_eq!(restored, world);

        // No stray temp file.
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn restored_rng_resumes_the_exact_draw_sequence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("previous_world.json");

        let mut world = World::generate(80, 30, 777).unwrap();
        save(&world, &path).unwrap();
        let mut restored = load(&path).unwrap();
        for _ in 0..25 {
            assert_eq!(world.rng.next_u64(), restored.rng.next_u64());
        }
    }

    #[test]
    fn save_overwrites_the_prior_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("previous_world.json");

        let first = World::generate(80, 30, 1).unwrap();
        save(&first, &path).unwrap();
        let second = World::generate(80, 30, 2).unwrap();
        save(&second, &path).unwrap();

        assert_eq!(load(&path).unwrap(), second);
    }

    #[test]
    fn missing_snapshot_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = load(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(GameError::Io(_))));
    }

    #[test]
    fn version_mismatch_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("previous_world.json");

        let world = World::generate(80, 30, 5).unwrap();
        save(&world, &path).unwrap();

        let mut doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        doc["format_version"] = serde_json::json!(FORMAT_VERSION + 1);
        std::fs::write(&path, doc.to_string()).unwrap();

        assert!(matches!(
            load(&path),
            Err(GameError::BadSnapshotVersion { .. })
        ));
    }
}
