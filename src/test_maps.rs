//! Synthetic map files and texture trees for tests.

use std::path::{Path, PathBuf};

use q2parser::bsp::{HEADER_LUMPS, HEADER_SIZE, LUMP_ENTITIES, LUMP_TEXINFO, TEXTURE_INFO_SIZE};
use tempfile::TempDir;

/// A map with an entity lump followed by a texinfo lump of `(name, flags, value)` records.
pub fn build_map(version: i32, entities: &[u8], textures: &[(&str, i32, i32)]) -> Vec<u8> {
    let mut texinfo = Vec::with_capacity(textures.len() * TEXTURE_INFO_SIZE);
    for (name, flags, value) in textures {
        texinfo.extend_from_slice(&[0u8; 32]);
        texinfo.extend_from_slice(&flags.to_le_bytes());
        texinfo.extend_from_slice(&value.to_le_bytes());
        let mut texture = [0u8; 32];
        texture[..name.len()].copy_from_slice(name.as_bytes());
        texinfo.extend_from_slice(&texture);
        texinfo.extend_from_slice(&(-1i32).to_le_bytes());
    }

    let mut lumps = [(0i32, 0i32); HEADER_LUMPS];
    lumps[LUMP_ENTITIES] = (HEADER_SIZE as i32, entities.len() as i32);
    lumps[LUMP_TEXINFO] = ((HEADER_SIZE + entities.len()) as i32, texinfo.len() as i32);

    let mut data = Vec::new();
    data.extend_from_slice(b"IBSP");
    data.extend_from_slice(&version.to_le_bytes());
    for (offset, len) in lumps {
        data.extend_from_slice(&offset.to_le_bytes());
        data.extend_from_slice(&len.to_le_bytes());
    }
    data.extend_from_slice(entities);
    data.extend_from_slice(&texinfo);
    data
}

/// Overwrites one lump table entry of an already built map.
pub fn set_lump(data: &mut [u8], index: usize, offset: i32, len: i32) {
    let start = 8 + index * 8;
    data[start..start + 4].copy_from_slice(&offset.to_le_bytes());
    data[start + 4..start + 8].copy_from_slice(&len.to_le_bytes());
}

pub fn write_map(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

/// A game directory holding an empty `.wal` file for each given texture name.
pub fn texture_root(names: &[&str]) -> TempDir {
    let root = tempfile::tempdir().unwrap();
    for name in names {
        let path = root.path().join(format!("textures/{}.wal", name));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"").unwrap();
    }
    root
}
