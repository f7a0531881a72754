use thiserror::Error;

/// Failure taxonomy for the whole crate.
///
/// `InvalidSeed` and `InvalidIndex` are contract violations that abort the
/// operation which triggered them. I/O and codec failures on load yield no
/// usable world; on save they are reported without touching in-memory state.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid seed {0:?}: expected base-10 digits terminated by 's'")]
    InvalidSeed(String),

    #[error("union-find index {index} out of range for {size} items")]
    InvalidIndex { index: usize, size: usize },

    #[error("chamber placement failed after {attempts} attempts")]
    GenerationFailed { attempts: u32 },

    #[error("unsupported snapshot version {found}, expected {expected}")]
    BadSnapshotVersion { found: u32, expected: u32 },

    #[error("snapshot io: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot codec: {0}")]
    Codec(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
