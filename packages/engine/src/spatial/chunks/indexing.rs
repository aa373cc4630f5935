use super::*;

// === Coordinate mapping ===
//
// Floor division / Euclidean remainder so that negative coordinates land in
// the chunk to their left/top and the local offset stays in [0, CHUNK_SIZE).

impl ChunkPos {
    /// Chunk owning the absolute cell `(x, y)`.
    #[inline]
    pub fn containing(x: i32, y: i32) -> Self {
        Self {
            x: x.div_euclid(CHUNK_SIZE),
            y: y.div_euclid(CHUNK_SIZE),
        }
    }

    /// Absolute coordinates of this chunk's top-left cell.
    #[inline]
    pub fn origin(self) -> (i32, i32) {
        (self.x.wrapping_mul(CHUNK_SIZE), self.y.wrapping_mul(CHUNK_SIZE))
    }

    /// Absolute coordinates of local cell index `local`.
    #[inline]
    pub fn cell_coords(self, local: usize) -> (i32, i32) {
        let (ox, oy) = self.origin();
        let lx = (local as i32) % CHUNK_SIZE;
        let ly = (local as i32) / CHUNK_SIZE;
        (ox.wrapping_add(lx), oy.wrapping_add(ly))
    }
}

/// In-chunk offset of an absolute coordinate, each axis in `[0, CHUNK_SIZE)`.
#[inline]
pub fn local_offset(x: i32, y: i32) -> (i32, i32) {
    (x.rem_euclid(CHUNK_SIZE), y.rem_euclid(CHUNK_SIZE))
}

/// Row-major index into a chunk's cell array.
#[inline]
pub fn local_index(x: i32, y: i32) -> usize {
    let (lx, ly) = local_offset(x, y);
    (ly * CHUNK_SIZE + lx) as usize
}
