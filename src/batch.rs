//! Texture inventories for every map matching a wildcard pattern.

use std::io::Write;
use std::path::{Path, PathBuf};

use glob::glob;
use log::{debug, warn};
use q2parser::bsp::BspReader;

use crate::error::DumpError;
use crate::inventory::{load_surfaces, write_inventory, MissingTextures};
use crate::loader::{display_name, read_map_file};
use crate::textures::WalStore;

pub fn has_wildcard(file: &str) -> bool {
    file.contains(['*', '?'])
}

/// Runs the texture inventory over every file matching `pattern` and returns
/// how many files matched.
///
/// Files that cannot be opened or read, are too short, or have the wrong
/// version are reported and skipped. A lump table pointing outside its file ends the
/// whole batch.
pub fn run_batch<W: Write>(
    pattern: &str,
    store: &WalStore,
    missing: &mut MissingTextures,
    out: &mut W,
) -> Result<usize, DumpError> {
    let paths = matching_files(pattern)?;
    if paths.is_empty() {
        writeln!(out, "No files named {} found.", pattern)?;
        writeln!(out, "0 map files processed.")?;
        return Err(DumpError::NoMatches {
            pattern: pattern.to_string(),
        });
    }

    process_files(&paths, out, |path, map_name, out| {
        inventory_file(path, map_name, store, missing, out)
    })?;

    writeln!(out, "{} map files processed.", paths.len())?;
    Ok(paths.len())
}

/// [`run_batch`] followed by the run-wide missing texture total, which is
/// printed even when nothing matched.
pub fn run_with_totals<W: Write>(
    pattern: &str,
    store: &WalStore,
    missing: &mut MissingTextures,
    out: &mut W,
) -> Result<(), DumpError> {
    let result = run_batch(pattern, store, missing, out);
    writeln!(out, "{} total missing textures.", missing.total())?;
    result.map(|_| ())
}

fn process_files<W, F>(paths: &[PathBuf], out: &mut W, mut process: F) -> Result<(), DumpError>
where
    W: Write,
    F: FnMut(&Path, &str, &mut W) -> Result<(), DumpError>,
{
    for path in paths {
        let map_name = display_name(path);
        writeln!(out, "Opening {}", map_name)?;
        let result = process(path, &map_name, out);
        skip_failed_file(result, &map_name, out)?;
    }
    Ok(())
}

/// Reports a failure confined to one file so the batch can move on. A lump
/// table pointing outside its file and failed writes to `out` are passed up.
fn skip_failed_file<W: Write>(
    result: Result<(), DumpError>,
    map_name: &str,
    out: &mut W,
) -> Result<(), DumpError> {
    match result {
        Ok(()) => Ok(()),
        Err(DumpError::Open { path, source }) => {
            debug!("skipping {}: {}", path.display(), source);
            Ok(())
        }
        Err(err @ (DumpError::Read { .. } | DumpError::Alloc { .. })) => {
            writeln!(out, "ERROR: {}: {}", map_name, err)?;
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn matching_files(pattern: &str) -> Result<Vec<PathBuf>, DumpError> {
    let mut paths = Vec::new();
    for entry in glob(pattern)? {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(err) => warn!("{}", err),
        }
    }
    Ok(paths)
}

// The lump table is checked before the version here, unlike single file mode.
fn inventory_file<W: Write>(
    path: &Path,
    map_name: &str,
    store: &WalStore,
    missing: &mut MissingTextures,
    out: &mut W,
) -> Result<(), DumpError> {
    let file_data = read_map_file(path)?;
    let reader = match BspReader::new(file_data) {
        Ok(reader) => reader,
        Err(err) => {
            writeln!(out, "ERROR: {}: {}", map_name, err)?;
            return Ok(());
        }
    };

    reader
        .header()
        .validate_lumps(reader.file_size())
        .map_err(|err| DumpError::map(map_name, err))?;

    if reader.header().check_version().is_err() {
        writeln!(out, "ERROR: {} is not a valid BSP file.", map_name)?;
        return Ok(());
    }

    writeln!(out, "Map textures:")?;
    match load_surfaces(&reader) {
        Ok(surfaces) => {
            write_inventory(&surfaces, map_name, store, missing, out)?;
        }
        Err(err) => writeln!(out, "ERROR: {}: {}", map_name, err)?,
    }
    Ok(())
}
