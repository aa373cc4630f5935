use tracing::{debug, info};

use crate::codec::{self, WorldImage};
use crate::error::{DecodeError, EncodeError};

use super::commands::set_cell;
use super::WorldCore;

/// Decode first, then commit, so a malformed stream leaves the world as it
/// was. Imported cells are placed on top of whatever is already there.
pub(super) fn import(world: &mut WorldCore, bytes: &[u8]) -> Result<(), DecodeError> {
    let image = codec::decode(bytes)?;
    commit(world, image);
    Ok(())
}

pub(super) fn import_base64(world: &mut WorldCore, text: &str) -> Result<(), DecodeError> {
    let bytes = codec::decode_base64(text)?;
    debug!(len = bytes.len(), "base64 world payload decoded");
    import(world, &bytes)
}

fn commit(world: &mut WorldCore, image: WorldImage) {
    let placed = image.cells.len();
    for placed in image.cells {
        set_cell(world, placed.x, placed.y, placed.cell);
    }
    world.version = image.version;
    info!(
        version = image.version,
        chunks = image.chunk_count,
        cells = placed,
        "world imported"
    );
}

pub(super) fn export(world: &WorldCore) -> Result<Vec<u8>, EncodeError> {
    codec::encode(world.version, &world.store)
}

pub(super) fn export_base64(world: &WorldCore) -> Result<String, EncodeError> {
    export(world).map(|bytes| codec::encode_base64(&bytes))
}
