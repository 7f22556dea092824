//! Texture inventory of a map: one line per distinct surface texture, with
//! missing `.wal` files flagged and counted.

use std::io::Write;

use log::debug;
use q2parser::bsp::{BspReader, BspTextureInfo};

use crate::textures::WalStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapSurface {
    pub name: String,
    pub flags: i32,
    pub value: i32,
    pub duplicate: bool,
}

impl MapSurface {
    fn from_texture_info(info: &BspTextureInfo) -> Self {
        Self {
            name: info.texture_name().into_owned(),
            flags: info.flags,
            value: info.value,
            duplicate: false,
        }
    }
}

/// Running count of missing textures across every map processed in a run.
#[derive(Debug, Default)]
pub struct MissingTextures {
    total: usize,
}

impl MissingTextures {
    pub fn record(&mut self) {
        self.total += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

pub fn load_surfaces(reader: &BspReader) -> q2parser::Result<Vec<MapSurface>> {
    let infos = reader.read_texture_infos()?;
    let mut surfaces = infos
        .iter()
        .map(MapSurface::from_texture_info)
        .collect::<Vec<_>>();
    mark_duplicates(&mut surfaces);
    Ok(surfaces)
}

/// Flags every surface whose name is shared with any other surface, earlier
/// or later in the list. Empty names never match.
pub fn mark_duplicates(surfaces: &mut [MapSurface]) {
    for i in 0..surfaces.len() {
        let duplicate = surfaces
            .iter()
            .enumerate()
            .any(|(j, other)| j != i && !other.name.is_empty() && other.name == surfaces[i].name);
        surfaces[i].duplicate = duplicate;
    }
}

/// Writes one line per unique texture and returns how many are missing.
pub fn write_inventory<W: Write>(
    surfaces: &[MapSurface],
    map_name: &str,
    store: &WalStore,
    missing: &mut MissingTextures,
    out: &mut W,
) -> std::io::Result<usize> {
    let mut uniques = 0;
    let mut map_missing = 0;
    for surface in surfaces.iter().filter(|surface| !surface.duplicate) {
        uniques += 1;
        debug!(
            "{}: flags {:#x} value {}",
            surface.name, surface.flags, surface.value
        );
        let wal_path = WalStore::wal_path(&surface.name);
        if store.contains(&surface.name) {
            writeln!(out, "{}", wal_path)?;
        } else {
            writeln!(out, "{} file is MISSING for {}", wal_path, map_name)?;
            map_missing += 1;
            missing.record();
        }
    }
    writeln!(out, "Map uses {} unique textures {} times", uniques, surfaces.len())?;
    writeln!(out, "Missing {} textures.", map_missing)?;
    debug!("{}: {} of {} textures missing", map_name, map_missing, uniques);
    Ok(map_missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_maps::{build_map, texture_root};

    fn surfaces(names: &[&str]) -> Vec<MapSurface> {
        let mut surfaces = names
            .iter()
            .map(|name| MapSurface {
                name: name.to_string(),
                flags: 0,
                value: 0,
                duplicate: false,
            })
            .collect::<Vec<_>>();
        mark_duplicates(&mut surfaces);
        surfaces
    }

    fn duplicate_flags(surfaces: &[MapSurface]) -> Vec<bool> {
        surfaces.iter().map(|surface| surface.duplicate).collect()
    }

    #[test]
    fn shared_names_are_flagged_on_both_sides() {
        let surfaces = surfaces(&["e1u1/floor", "e1u1/wall", "e1u1/floor"]);
        assert_eq!(duplicate_flags(&surfaces), vec![true, false, true]);
    }

    #[test]
    fn distinct_names_are_not_flagged() {
        let surfaces = surfaces(&["e1u1/floor", "e1u1/wall", "e1u1/sky"]);
        assert_eq!(duplicate_flags(&surfaces), vec![false, false, false]);
    }

    #[test]
    fn empty_names_never_match() {
        let surfaces = surfaces(&["", "", "e1u1/wall"]);
        assert_eq!(duplicate_flags(&surfaces), vec![false, false, false]);
    }

    #[test]
    fn load_surfaces_decodes_flags_and_values() {
        let textures = [("e1u1/floor", 4, 100), ("e1u1/floor", 0, 0), ("e1u1/sky", 8, 0)];
        let data = build_map(38, b"", &textures);
        let reader = BspReader::read(data).unwrap();
        let surfaces = load_surfaces(&reader).unwrap();
        assert_eq!(surfaces.len(), 3);
        assert_eq!(surfaces[0].flags, 4);
        assert_eq!(surfaces[0].value, 100);
        assert_eq!(duplicate_flags(&surfaces), vec![true, true, false]);
    }

    #[test]
    fn inventory_lists_present_and_missing_textures() {
        let root = texture_root(&["e1u1/floor"]);
        let store = WalStore::new(root.path());
        let mut missing = MissingTextures::default();
        let mut out = Vec::new();

        let surfaces = surfaces(&["e1u1/floor", "e1u1/sky", "e1u1/wall", "e1u1/wall"]);
        let map_missing =
            write_inventory(&surfaces, "base1.bsp", &store, &mut missing, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "textures/e1u1/floor.wal\n\
             textures/e1u1/sky.wal file is MISSING for base1.bsp\n\
             Map uses 2 unique textures 4 times\n\
             Missing 1 textures.\n"
        );
        assert_eq!(map_missing, 1);
        assert_eq!(missing.total(), 1);
    }

    #[test]
    fn missing_count_accumulates_across_maps() {
        let root = texture_root(&["e1u1/floor"]);
        let store = WalStore::new(root.path());
        let mut missing = MissingTextures::default();
        let mut out = Vec::new();

        let base1 = surfaces(&["e1u1/floor", "e1u1/sky"]);
        let base2 = surfaces(&["e1u1/floor", "e1u2/sky"]);
        write_inventory(&base1, "base1.bsp", &store, &mut missing, &mut out).unwrap();
        write_inventory(&base2, "base2.bsp", &store, &mut missing, &mut out).unwrap();
        assert_eq!(missing.total(), 2);
    }
}
