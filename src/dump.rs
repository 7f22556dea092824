use std::io::Write;
use std::path::Path;

use q2parser::bsp::BspReader;

use crate::entities::write_entity_string;
use crate::error::DumpError;
use crate::inventory::{load_surfaces, write_inventory, MissingTextures};
use crate::loader::{display_name, read_map_file};
use crate::textures::WalStore;

/// Prints the texture inventory and entity string of one map.
///
/// Open, allocation, version and lump table failures are returned. Problems
/// inside the texinfo or entity lumps are reported to `out` and skipped.
pub fn dump_file<W: Write>(
    path: &Path,
    store: &WalStore,
    missing: &mut MissingTextures,
    out: &mut W,
) -> Result<(), DumpError> {
    let file_data = read_map_file(path)?;
    writeln!(out, "Opening file: {}", path.display())?;

    let map_name = display_name(path);
    let reader = BspReader::read(file_data).map_err(|err| DumpError::map(&map_name, err))?;

    writeln!(out, "Map textures:")?;
    match load_surfaces(&reader) {
        Ok(surfaces) => {
            write_inventory(&surfaces, &map_name, store, missing, out)?;
        }
        Err(err) => writeln!(out, "ERROR: {}: {}", map_name, err)?,
    }

    writeln!(out, "Map entities:")?;
    match reader.read_entities() {
        Ok(entities) => write_entity_string(entities, out)?,
        Err(err) => writeln!(out, "ERROR: {}: {}", map_name, err)?,
    }

    Ok(())
}
