//! World Codec - compact binary world description
//!
//! Layout (little-endian):
//! ```text
//! u16 version
//! u16 chunk_count
//! chunk_count x {
//!     u16 chunk_x, u16 chunk_y
//!     u8  type_groups - 1
//!     type_groups x {
//!         u8 cell_type
//!         u8 run_length - 1
//!         run_length x { u8 pos (lo nibble x, hi nibble y), u8 dir | flip << 2 }
//!     }
//! }
//! ```
//! Text transport wraps the bytes in standard base64.

mod decode;
mod encode;
mod transport;

pub use decode::decode;
pub use encode::encode;
pub use transport::{decode_base64, encode_base64};

use crate::domain::cells::Cell;

/// A cell placed at absolute coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedCell {
    pub x: i32,
    pub y: i32,
    pub cell: Cell,
}

/// Fully decoded world, ready to be committed to a store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldImage {
    pub version: u16,
    pub chunk_count: u16,
    pub cells: Vec<PlacedCell>,
}
