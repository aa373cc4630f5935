//! Sparse chunk store: an arena of chunk records plus a coordinate index.
//!
//! Chunks are never removed during a run, so arena ids stay valid and
//! iteration follows creation order. That order decides how concurrent
//! messages to the same cell resolve, so it must not depend on hashing.

use std::collections::HashMap;

use super::*;

/// Arena entry: a chunk and the coordinate it covers.
#[derive(Clone, Debug)]
pub struct ChunkSlot {
    pub pos: ChunkPos,
    pub chunk: Chunk,
}

#[derive(Clone, Debug, Default)]
pub struct ChunkStore {
    slots: Vec<ChunkSlot>,
    index: HashMap<ChunkPos, usize>,
}

impl ChunkStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Chunk access ===

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn chunk_id(&self, pos: ChunkPos) -> Option<usize> {
        self.index.get(&pos).copied()
    }

    pub fn get(&self, pos: ChunkPos) -> Option<&Chunk> {
        self.chunk_id(pos).map(|id| &self.slots[id].chunk)
    }

    pub fn get_mut(&mut self, pos: ChunkPos) -> Option<&mut Chunk> {
        let id = self.chunk_id(pos)?;
        Some(&mut self.slots[id].chunk)
    }

    /// Arena id of the chunk at `pos`, creating an empty chunk if absent.
    /// Second tuple field is true when the chunk was just created.
    pub fn get_or_create_id(&mut self, pos: ChunkPos) -> (usize, bool) {
        if let Some(id) = self.chunk_id(pos) {
            return (id, false);
        }
        let id = self.slots.len();
        self.slots.push(ChunkSlot { pos, chunk: Chunk::new() });
        self.index.insert(pos, id);
        (id, true)
    }

    pub fn get_or_create(&mut self, pos: ChunkPos) -> &mut Chunk {
        let (id, _) = self.get_or_create_id(pos);
        &mut self.slots[id].chunk
    }

    #[inline]
    pub fn slot(&self, id: usize) -> &ChunkSlot {
        &self.slots[id]
    }

    #[inline]
    pub fn slot_mut(&mut self, id: usize) -> &mut ChunkSlot {
        &mut self.slots[id]
    }

    /// All chunks in creation order; the evaluate pass fans out over this.
    #[inline]
    pub fn slots(&self) -> &[ChunkSlot] {
        &self.slots
    }

    #[inline]
    pub fn slots_mut(&mut self) -> &mut [ChunkSlot] {
        &mut self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChunkPos, &Chunk)> {
        self.slots.iter().map(|slot| (slot.pos, &slot.chunk))
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }

    // === Cell access ===

    /// Cell at `(x, y)`, allocating its chunk on first touch.
    pub fn get_cell(&mut self, x: i32, y: i32) -> &Cell {
        self.cell_mut(x, y)
    }

    /// Mutable cell at `(x, y)`, allocating its chunk on first touch.
    pub fn cell_mut(&mut self, x: i32, y: i32) -> &mut Cell {
        self.get_or_create(ChunkPos::containing(x, y))
            .cell_mut(local_index(x, y))
    }

    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        *self.cell_mut(x, y) = cell;
    }

    /// Read without allocating; `None` when the chunk was never touched.
    pub fn peek_cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.get(ChunkPos::containing(x, y))
            .map(|chunk| chunk.cell(local_index(x, y)))
    }

    /// Every non-empty cell with absolute coordinates, in store order.
    pub fn populated_cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.slots.iter().flat_map(|slot| {
            slot.chunk
                .cells()
                .iter()
                .enumerate()
                .filter(|(_, cell)| !cell.is_empty())
                .map(move |(local, cell)| {
                    let (x, y) = slot.pos.cell_coords(local);
                    (x, y, *cell)
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cells::{CellType, Direction};

    #[test]
    fn get_cell_creates_chunk_lazily() {
        let mut store = ChunkStore::new();
        assert!(store.peek_cell(3, 4).is_none());
        assert_eq!(*store.get_cell(3, 4), Cell::EMPTY);
        assert_eq!(store.len(), 1);
        store.get_cell(15, 15);
        assert_eq!(store.len(), 1);
        store.get_cell(16, 15);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn negative_cells_live_in_their_own_chunks() {
        let mut store = ChunkStore::new();
        let wire = Cell::new(CellType::Arrow, Direction::East);
        store.set_cell(-1, -1, wire);
        store.set_cell(0, 0, Cell::new(CellType::Source, Direction::North));

        assert_eq!(store.len(), 2);
        assert_eq!(store.peek_cell(-1, -1), Some(&wire));
        assert_eq!(store.peek_cell(15, 15).map(|c| c.kind), Some(CellType::Empty));
        let dormant = store.get(ChunkPos::new(-1, -1)).unwrap();
        assert_eq!(dormant.cell(CHUNK_AREA - 1), &wire);
    }

    #[test]
    fn iteration_follows_creation_order() {
        let mut store = ChunkStore::new();
        let order = [(5, 5), (-40, 2), (100, -100), (-1, -1)];
        for (x, y) in order {
            store.get_or_create(ChunkPos::containing(x, y));
        }
        let seen: Vec<ChunkPos> = store.iter().map(|(pos, _)| pos).collect();
        let expected: Vec<ChunkPos> = order.iter().map(|&(x, y)| ChunkPos::containing(x, y)).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn populated_cells_reports_absolute_coordinates() {
        let mut store = ChunkStore::new();
        store.set_cell(-20, 7, Cell::new(CellType::Not, Direction::West));
        store.set_cell(33, -2, Cell::new(CellType::And, Direction::South));
        let mut cells: Vec<(i32, i32, CellType)> =
            store.populated_cells().map(|(x, y, c)| (x, y, c.kind)).collect();
        cells.sort();
        assert_eq!(cells, vec![(-20, 7, CellType::Not), (33, -2, CellType::And)]);
    }
}
