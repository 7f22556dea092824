// Sources:
// https://www.flipcode.com/archives/Quake_2_BSP_File_Format.shtml
// https://github.com/id-Software/Quake-2/blob/master/qcommon/qfiles.h

use std::borrow::Cow;
use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, warn};

use crate::error::{Error, Result};

pub const LUMP_ENTITIES     :usize =  0;
pub const LUMP_PLANES       :usize =  1;
pub const LUMP_VERTEXES     :usize =  2;
pub const LUMP_VISIBILITY   :usize =  3;
pub const LUMP_NODES        :usize =  4;
pub const LUMP_TEXINFO      :usize =  5;
pub const LUMP_FACES        :usize =  6;
pub const LUMP_LIGHTING     :usize =  7;
pub const LUMP_LEAFS        :usize =  8;
pub const LUMP_LEAFFACES    :usize =  9;
pub const LUMP_LEAFBRUSHES  :usize = 10;
pub const LUMP_EDGES        :usize = 11;
pub const LUMP_SURFEDGES    :usize = 12;
pub const LUMP_MODELS       :usize = 13;
pub const LUMP_BRUSHES      :usize = 14;
pub const LUMP_BRUSHSIDES   :usize = 15;
pub const LUMP_POP          :usize = 16;
pub const LUMP_AREAS        :usize = 17;
pub const LUMP_AREAPORTALS  :usize = 18;
pub const HEADER_LUMPS      :usize = 19;

/// "IBSP", read as a little-endian tag.
pub const BSP_IDENT: [u8; 4] = *b"IBSP";
pub const BSP_VERSION: i32 = 38;

/// ident + version + lump table.
pub const HEADER_SIZE: usize = 4 + 4 + HEADER_LUMPS * 8;

pub const MAX_MAP_TEXINFO: usize = 8192;
pub const MAX_MAP_ENTSTRING: usize = 0x40000;

/// 2x4 floats, flags, value, 32 byte name, next index.
pub const TEXTURE_INFO_SIZE: usize = 8 * 4 + 4 + 4 + TEXTURE_NAME_SIZE + 4;
const TEXTURE_NAME_SIZE: usize = 32;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BspLump {
    pub offset: i32,
    pub len: i32,
}

impl BspLump {
    fn read<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let offset = reader.read_i32::<LittleEndian>()?;
        let len = reader.read_i32::<LittleEndian>()?;
        Ok(Self { offset, len })
    }

    /// True when the lump's byte range lies entirely inside a file of `file_size` bytes.
    pub fn in_bounds(&self, file_size: usize) -> bool {
        self.offset >= 0
            && self.len >= 0
            && self.offset as u64 + self.len as u64 <= file_size as u64
    }

    fn range(&self) -> std::ops::Range<usize> {
        let start = self.offset as usize;
        start..start + self.len as usize
    }
}

#[derive(Copy, Clone, Debug)]
pub struct BspHeader {
    pub ident: [u8; 4],
    pub version: i32,
    pub lumps: [BspLump; HEADER_LUMPS],
}

impl BspHeader {
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::TruncatedHeader { len: data.len() });
        }

        let mut reader = Cursor::new(data);
        let mut ident = [0u8; 4];
        reader.read_exact(&mut ident)?;
        let version = reader.read_i32::<LittleEndian>()?;
        let mut lumps = [BspLump::default(); HEADER_LUMPS];
        for lump in lumps.iter_mut() {
            *lump = BspLump::read(&mut reader)?;
        }

        if ident != BSP_IDENT {
            warn!("unexpected BSP ident {:?}", ident);
        }
        debug!("BSP header: version {}, lumps {:?}", version, lumps);

        Ok(Self {
            ident,
            version,
            lumps,
        })
    }

    pub fn check_version(&self) -> Result<()> {
        if self.version != BSP_VERSION {
            return Err(Error::UnsupportedVersion {
                version: self.version,
                expected: BSP_VERSION,
            });
        }
        Ok(())
    }

    /// Checks every lump range against the file size. The POP lump is skipped
    /// because shipped maps carry garbage in it.
    pub fn validate_lumps(&self, file_size: usize) -> Result<()> {
        for (index, lump) in self.lumps.iter().enumerate() {
            if index == LUMP_POP {
                continue;
            }
            if !lump.in_bounds(file_size) {
                return Err(Error::LumpOutOfBounds {
                    index,
                    offset: lump.offset,
                    length: lump.len,
                    file_size,
                });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct BspTextureInfo {
    pub vecs: [[f32; 4]; 2],
    pub flags: i32,
    pub value: i32,
    pub texture: [u8; TEXTURE_NAME_SIZE],
    pub next_texinfo: i32,
}

impl BspTextureInfo {
    fn read<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let mut vecs = [[0.0f32; 4]; 2];
        for axis in vecs.iter_mut() {
            reader.read_f32_into::<LittleEndian>(axis)?;
        }
        let flags = reader.read_i32::<LittleEndian>()?;
        let value = reader.read_i32::<LittleEndian>()?;
        let mut texture = [0u8; TEXTURE_NAME_SIZE];
        reader.read_exact(&mut texture)?;
        let next_texinfo = reader.read_i32::<LittleEndian>()?;
        Ok(Self {
            vecs,
            flags,
            value,
            texture,
            next_texinfo,
        })
    }

    /// The texture name, at most 31 bytes and cut at the first NUL.
    pub fn texture_name(&self) -> Cow<'_, str> {
        let name = null_terminated_bytes(&self.texture[..TEXTURE_NAME_SIZE - 1]);
        String::from_utf8_lossy(name)
    }
}

pub fn null_terminated_bytes(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().position(|x| *x == 0).unwrap_or(bytes.len());
    &bytes[..end]
}

pub struct BspReader {
    header: BspHeader,
    data: Vec<u8>,
}

impl BspReader {
    /// Decodes the header without validating it.
    pub fn new(data: Vec<u8>) -> Result<Self> {
        let header = BspHeader::parse(&data)?;
        Ok(Self { header, data })
    }

    /// Decodes the header, then rejects bad versions and out of range lumps.
    pub fn read(data: Vec<u8>) -> Result<Self> {
        let reader = Self::new(data)?;
        reader.header.check_version()?;
        reader.header.validate_lumps(reader.file_size())?;
        Ok(reader)
    }

    pub fn header(&self) -> &BspHeader {
        &self.header
    }

    pub fn file_size(&self) -> usize {
        self.data.len()
    }

    pub fn lump_data(&self, index: usize) -> Result<&[u8]> {
        let lump = self.header.lumps[index];
        if !lump.in_bounds(self.file_size()) {
            return Err(Error::LumpOutOfBounds {
                index,
                offset: lump.offset,
                length: lump.len,
                file_size: self.file_size(),
            });
        }
        Ok(&self.data[lump.range()])
    }

    pub fn read_texture_infos(&self) -> Result<Vec<BspTextureInfo>> {
        let lump = self.header.lumps[LUMP_TEXINFO];
        if lump.len < 0 || lump.len as usize % TEXTURE_INFO_SIZE != 0 {
            return Err(Error::TexInfoLumpSize { length: lump.len });
        }
        let count = lump.len as usize / TEXTURE_INFO_SIZE;
        if count < 1 {
            return Err(Error::NoSurfaces);
        }
        if count > MAX_MAP_TEXINFO {
            return Err(Error::TooManySurfaces {
                count,
                max: MAX_MAP_TEXINFO,
            });
        }

        let lump_data = self.lump_data(LUMP_TEXINFO)?;
        debug!("reading {} texinfo records", count);
        let mut reader = Cursor::new(lump_data);
        let mut infos = Vec::with_capacity(count);
        for _ in 0..count {
            infos.push(BspTextureInfo::read(&mut reader)?);
        }
        Ok(infos)
    }

    /// Returns the entity text with at most one trailing newline removed.
    /// Anything after an embedded NUL is dropped.
    pub fn read_entities(&self) -> Result<&[u8]> {
        let lump = self.header.lumps[LUMP_ENTITIES];
        if lump.len as i64 > MAX_MAP_ENTSTRING as i64 {
            return Err(Error::EntityLumpTooLarge {
                length: lump.len,
                max: MAX_MAP_ENTSTRING,
            });
        }
        if !lump.in_bounds(self.file_size()) {
            return Err(Error::EntityLumpOutOfBounds {
                offset: lump.offset,
                length: lump.len,
                file_size: self.file_size(),
            });
        }

        let entities = null_terminated_bytes(&self.data[lump.range()]);
        Ok(entities.strip_suffix(b"\n").unwrap_or(entities))
    }
}
