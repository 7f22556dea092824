use std::io::Write;

/// Writes the entity text followed by a single newline.
pub fn write_entity_string<W: Write>(entities: &[u8], out: &mut W) -> std::io::Result<()> {
    out.write_all(entities)?;
    out.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_maps::build_map;
    use q2parser::bsp::BspReader;

    fn dump(entity_lump: &[u8]) -> String {
        let reader = BspReader::read(build_map(38, entity_lump, &[("e1u1/floor", 0, 0)])).unwrap();
        let mut out = Vec::new();
        write_entity_string(reader.read_entities().unwrap(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn trailing_newline_is_not_doubled() {
        assert_eq!(dump(b"classname worldspawn\n"), "classname worldspawn\n");
    }

    #[test]
    fn text_without_trailing_newline_gets_one() {
        assert_eq!(dump(b"classname worldspawn"), "classname worldspawn\n");
    }

    #[test]
    fn embedded_newlines_are_kept() {
        let entities =
            b"{\n\"classname\" \"worldspawn\"\n}\n{\n\"classname\" \"info_player_start\"\n}\n";
        assert_eq!(
            dump(entities),
            "{\n\"classname\" \"worldspawn\"\n}\n{\n\"classname\" \"info_player_start\"\n}\n"
        );
    }

    #[test]
    fn empty_lump_prints_blank_line() {
        assert_eq!(dump(b""), "\n");
    }
}
