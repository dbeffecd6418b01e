use std::io;

use thiserror::Error;

use crate::binaries::Tag;

/// Everything that can stop a model from decoding. All of these abort the
/// whole file; the only recoverable condition (a chunk handler consuming less
/// than its declared length) is logged and skipped by the reader instead.
#[derive(Debug, Error)]
pub enum PofError {
    #[error("short read: wanted {wanted} bytes at offset {offset}")]
    ShortRead { offset: u64, wanted: usize },
    #[error("bad magic {0}, expected PSPO")]
    BadMagic(Tag),
    #[error("unknown chunk {tag} at offset {offset}")]
    UnknownChunk { tag: Tag, offset: u64 },
    #[error("unsupported chunk {0}")]
    UnsupportedChunk(Tag),
    #[error("chunk {tag} ends at {next}, past the end of the file at {file_len}")]
    ChunkOverrun { tag: Tag, next: u64, file_len: u64 },
    #[error("chunk {tag} was read up to {position}, past its end at {next}")]
    ChunkOverread { tag: Tag, position: u64, next: u64 },
    #[error("unknown BSP record id {id} at offset {offset}")]
    UnknownRecord { id: i32, offset: usize },
    #[error("BSP record at offset {offset} has size {size}")]
    BadRecordSize { offset: usize, size: i32 },
    #[error("BSP split node at offset {offset} has child offset {child}")]
    BadChildOffset { offset: usize, child: i32 },
    #[error("BSP record at offset {offset} is nested too deep or visited too often")]
    BspTooDeep { offset: usize },
    #[error("negative {what}: {value}")]
    NegativeCount { what: &'static str, value: i32 },
    #[error("light count {0:#x} is a chunk tag, the header layout does not match the version")]
    BadLightCount(i32),
    #[error("light type {0} is neither 1 nor 2")]
    BadLightType(i32),
    #[error("eye count {0} is neither 0 nor 1")]
    BadEyeCount(i32),
    #[error("autocenter chunk has length {0}, expected 12")]
    BadAutocenterLength(u64),
    #[error("sub-object {number} has reserved field {value}, expected 0")]
    ReservedField { number: i32, value: i32 },
    #[error("sub-object {index} names parent {parent}, which has not been read")]
    ParentOutOfOrder { index: usize, parent: i32 },
    #[error("{what} index {index} out of range for {count} sub-objects")]
    SubObjectIndex {
        what: &'static str,
        index: i32,
        count: usize,
    },
    #[error("polygon {what} index {index} out of range for {count} entries")]
    PolygonIndex {
        what: &'static str,
        index: usize,
        count: usize,
    },
    #[error("sub-object {0} does not lead to a root")]
    UnresolvedRoot(usize),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, PofError>;
