//! Chunk System - fixed-size tiles of the unbounded circuit plane.
//!
//! A chunk is the unit of lazy allocation, parallel evaluation and dormancy.
//! Cells are stored row-major by local `(x, y)`.

use crate::domain::cells::Cell;

mod indexing;
mod lifecycle;
mod store;

pub use indexing::{local_index, local_offset};
pub use store::{ChunkSlot, ChunkStore};

/// Chunk edge length in cells (16x16 matches the packed nibble positions
/// of the world format).
pub const CHUNK_SIZE: i32 = 16;

/// Cells per chunk.
pub const CHUNK_AREA: usize = (CHUNK_SIZE * CHUNK_SIZE) as usize;

/// Chunk coordinate: `floor(x / CHUNK_SIZE), floor(y / CHUNK_SIZE)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
}

impl ChunkPos {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// What a message does to its target cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Power,
    Block,
}

/// A pulse queued by a cell during evaluate and delivered during apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Message {
    pub kind: MessageKind,
    pub x: i32,
    pub y: i32,
}

impl Message {
    #[inline]
    pub fn power(x: i32, y: i32) -> Self {
        Self { kind: MessageKind::Power, x, y }
    }

    #[inline]
    pub fn block(x: i32, y: i32) -> Self {
        Self { kind: MessageKind::Block, x, y }
    }
}

/// One tile: cells, dormancy counter and the messages its own cells queued
/// during the current evaluate phase.
#[derive(Clone, Debug)]
pub struct Chunk {
    cells: [Cell; CHUNK_AREA],
    idle_ticks: u8,
    outbox: Vec<Message>,
}

impl Chunk {
    pub fn new() -> Self {
        Self {
            cells: [Cell::EMPTY; CHUNK_AREA],
            idle_ticks: 0,
            outbox: Vec::new(),
        }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell; CHUNK_AREA] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell; CHUNK_AREA] {
        &mut self.cells
    }

    #[inline]
    pub fn cell(&self, local: usize) -> &Cell {
        &self.cells[local]
    }

    #[inline]
    pub fn cell_mut(&mut self, local: usize) -> &mut Cell {
        &mut self.cells[local]
    }

    #[inline]
    pub fn outbox(&self) -> &[Message] {
        &self.outbox
    }

    /// Split borrow used by the evaluate pass: every cell plus the outbox
    /// they write into.
    #[inline]
    pub(crate) fn cells_and_outbox(&mut self) -> (&mut [Cell; CHUNK_AREA], &mut Vec<Message>) {
        (&mut self.cells, &mut self.outbox)
    }

    /// Move the pending messages out, leaving an empty outbox.
    #[inline]
    pub(crate) fn take_outbox(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.outbox)
    }

    /// Hand back a drained outbox so its allocation is reused next tick.
    #[inline]
    pub(crate) fn restore_outbox(&mut self, mut outbox: Vec<Message>) {
        outbox.clear();
        if self.outbox.is_empty() {
            self.outbox = outbox;
        }
    }

    #[inline]
    pub(crate) fn clear_outbox(&mut self) {
        self.outbox.clear();
    }

    /// True when no cell holds an element.
    pub fn is_vacant(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}
