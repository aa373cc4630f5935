use crate::domain::cells::{Cell, CellType};
use crate::error::DecodeError;
use crate::spatial::chunks::CHUNK_SIZE;

use super::{PlacedCell, WorldImage};

/// Bounds-checked cursor over the input bytes.
struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let end = self.pos + N;
        let Some(bytes) = self.buf.get(self.pos..end) else {
            return Err(DecodeError::Truncated {
                offset: self.pos,
                needed: end - self.buf.len(),
            });
        };
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.pos = end;
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, DecodeError> {
        self.take::<1>().map(|[b]| b)
    }

    fn u16(&mut self) -> Result<u16, DecodeError> {
        self.take::<2>().map(u16::from_le_bytes)
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

/// Decode a world. Nothing is written anywhere until the whole stream has
/// been validated, so callers can commit the result atomically.
pub fn decode(bytes: &[u8]) -> Result<WorldImage, DecodeError> {
    let mut r = ByteReader::new(bytes);
    let version = r.u16()?;
    let chunk_count = r.u16()?;
    let mut cells = Vec::new();

    for _ in 0..chunk_count {
        let chunk_x = i32::from(r.u16()?);
        let chunk_y = i32::from(r.u16()?);
        let (origin_x, origin_y) = (chunk_x * CHUNK_SIZE, chunk_y * CHUNK_SIZE);

        let groups = usize::from(r.u8()?) + 1;
        for _ in 0..groups {
            let offset = r.pos;
            let raw_type = r.u8()?;
            let kind = CellType::from_id(raw_type)
                .ok_or(DecodeError::UnknownCellType { value: raw_type, offset })?;

            let run = usize::from(r.u8()?) + 1;
            cells.reserve(run);
            for _ in 0..run {
                let packed_pos = r.u8()?;
                let orientation = r.u8()?;
                let x = origin_x + i32::from(packed_pos & 0x0F);
                let y = origin_y + i32::from(packed_pos >> 4);
                cells.push(PlacedCell { x, y, cell: Cell::from_packed(kind, orientation) });
            }
        }
    }

    if r.remaining() > 0 {
        return Err(DecodeError::TrailingBytes { count: r.remaining() });
    }

    Ok(WorldImage { version, chunk_count, cells })
}
