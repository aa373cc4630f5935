use std::collections::BTreeMap;

use crate::domain::cells::CellType;
use crate::error::EncodeError;
use crate::spatial::chunks::{ChunkStore, CHUNK_SIZE};

/// Encode every populated cell of `store`. Chunks are written in store
/// order, type groups in ascending type id, cells in row-major order.
/// Signals are runtime state and are not persisted.
pub fn encode(version: u16, store: &ChunkStore) -> Result<Vec<u8>, EncodeError> {
    let mut body = Vec::new();
    let mut chunk_count = 0usize;

    for (pos, chunk) in store.iter() {
        let mut groups: BTreeMap<CellType, Vec<[u8; 2]>> = BTreeMap::new();
        for (local, cell) in chunk.cells().iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            let lx = (local as i32 % CHUNK_SIZE) as u8;
            let ly = (local as i32 / CHUNK_SIZE) as u8;
            groups
                .entry(cell.kind)
                .or_default()
                .push([lx | (ly << 4), cell.packed_orientation()]);
        }
        if groups.is_empty() {
            continue;
        }

        let chunk_x = u16::try_from(pos.x).map_err(|_| EncodeError::ChunkOutOfRange(pos))?;
        let chunk_y = u16::try_from(pos.y).map_err(|_| EncodeError::ChunkOutOfRange(pos))?;
        chunk_count += 1;

        body.extend_from_slice(&chunk_x.to_le_bytes());
        body.extend_from_slice(&chunk_y.to_le_bytes());
        // At most CELL_TYPE_COUNT groups, each at most CHUNK_AREA (256) long,
        // so both "minus one" bytes fit.
        body.push((groups.len() - 1) as u8);
        for (kind, cells) in groups {
            body.push(kind.id());
            body.push((cells.len() - 1) as u8);
            for pair in cells {
                body.extend_from_slice(&pair);
            }
        }
    }

    let chunk_count = u16::try_from(chunk_count).map_err(|_| EncodeError::TooManyChunks(chunk_count))?;
    let mut out = Vec::with_capacity(body.len() + 4);
    out.extend_from_slice(&version.to_le_bytes());
    out.extend_from_slice(&chunk_count.to_le_bytes());
    out.extend_from_slice(&body);
    Ok(out)
}
