//! Errors produced while decoding a BSP buffer.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The buffer is too small to hold the fixed-size header.
    #[error("file is {len} bytes, too small for a BSP header")]
    TruncatedHeader { len: usize },

    #[error("unsupported BSP version {version} (expected {expected})")]
    UnsupportedVersion { version: i32, expected: i32 },

    /// A lump table entry points outside the file.
    #[error("lump {index} offset {offset} of size {length} is out of bounds")]
    LumpOutOfBounds {
        index: usize,
        offset: i32,
        length: i32,
        file_size: usize,
    },

    #[error("funny texinfo lump size {length}")]
    TexInfoLumpSize { length: i32 },

    #[error("map with no surfaces")]
    NoSurfaces,

    #[error("map has too many surfaces ({count} > {max})")]
    TooManySurfaces { count: usize, max: usize },

    #[error("map has too large entity lump ({length} > {max})")]
    EntityLumpTooLarge { length: i32, max: usize },

    #[error("entity lump offset {offset} + length {length} exceeds filesize {file_size}")]
    EntityLumpOutOfBounds {
        offset: i32,
        length: i32,
        file_size: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
