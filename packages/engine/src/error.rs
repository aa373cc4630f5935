//! Error types for the engine.
//!
//! Every fallible entry point returns one of these through `Result`; the wasm
//! facade turns them into JS strings.

use crate::domain::cells::CellType;
use crate::spatial::chunks::ChunkPos;

/// Malformed or truncated world data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The stream ended inside a record.
    #[error("world data truncated at byte {offset}: need {needed} more byte(s)")]
    Truncated {
        /// Offset where the read started.
        offset: usize,
        /// Bytes missing to finish the read.
        needed: usize,
    },

    /// A type group named a cell type this engine does not know.
    #[error("unknown cell type {value} at byte {offset}")]
    UnknownCellType {
        /// Raw type byte.
        value: u8,
        /// Offset of the type byte.
        offset: usize,
    },

    /// Bytes left over after the declared chunks.
    #[error("{count} trailing byte(s) after the last chunk")]
    TrailingBytes {
        /// Number of unread bytes.
        count: usize,
    },

    /// The base64 transport layer could not be decoded.
    #[error("invalid base64 transport: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// A world that cannot be expressed in the binary format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Chunk coordinates are stored as unsigned 16-bit values.
    #[error("chunk {0:?} is outside the encodable range 0..=65535")]
    ChunkOutOfRange(ChunkPos),

    #[error("{0} populated chunks exceed the format limit of 65535")]
    TooManyChunks(usize),
}

/// Rejected configuration value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("ticks per second must be in (0, {max}], got {value}")]
    TicksPerSecond { value: f32, max: f32 },

    #[error("frame rate must be positive and finite, got {0}")]
    FrameRate(f32),

    #[error("thread count must be at least 1, got {0}")]
    Threads(usize),

    #[error("dormancy threshold must be at least 1")]
    DormancyThreshold,

    #[error("invalid config json: {0}")]
    Json(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

/// A cell rule reached behaviour that is deliberately not implemented.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("{kind:?} cell at ({x}, {y}) has no rule; the element is reserved")]
    Unimplemented { kind: CellType, x: i32, y: i32 },
}

/// Top-level engine error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("tick aborted: {0}")]
    Rule(#[from] RuleError),

    /// A previous tick failed; the world state is no longer trustworthy.
    #[error("engine is faulted ({0}); clear the world to continue")]
    Faulted(RuleError),
}
