use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::DumpError;

/// Reads a whole map file into memory. A short read is an error.
pub fn read_map_file(path: &Path) -> Result<Vec<u8>, DumpError> {
    let mut file = File::open(path).map_err(|source| DumpError::Open {
        path: path.to_owned(),
        source,
    })?;
    let read_error = |source| DumpError::Read {
        path: path.to_owned(),
        source,
    };
    let file_size = file.metadata().map_err(read_error)?.len();

    let mut file_data = Vec::new();
    file_data
        .try_reserve_exact(file_size as usize)
        .map_err(|_| DumpError::Alloc { size: file_size })?;
    file_data.resize(file_size as usize, 0);
    file.read_exact(&mut file_data).map_err(read_error)?;

    debug!("read {} bytes from {}", file_size, path.display());
    Ok(file_data)
}

/// The bare file name, used to attribute messages to a map.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
