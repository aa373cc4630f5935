//! Spatial storage: chunk tiles and the sparse store that owns them.

pub mod chunks;
