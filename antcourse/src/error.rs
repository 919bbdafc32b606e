use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while setting up or running an episode.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to read course map '{}': {source}", path.display())]
    MapLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode course map '{}': {reason}", path.display())]
    MapDecode { path: PathBuf, reason: String },

    #[error("failed to decode image: {0}")]
    ImageDecode(String),

    #[error("course map has no pixels ({width}x{height})")]
    EmptyMap { width: usize, height: usize },

    #[error("controller for ant {agent} returned {len} outputs, at least {expected} required")]
    ControllerOutput {
        agent: usize,
        len: usize,
        expected: usize,
    },

    #[error("champion file '{}': {source}", path.display())]
    ChampionIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode champion: {0}")]
    ChampionEncode(#[from] bincode::error::EncodeError),

    #[error("failed to decode champion: {0}")]
    ChampionDecode(#[from] bincode::error::DecodeError),
}
