pub mod block;

use std::{
    fmt,
    io::{self, BufReader, Read, Seek},
};

pub use block::BlockSlice;

use crate::error::{PofError, Result};

/// Fixed-size little-endian value that can be read straight off the stream.
pub trait BinaryData {
    fn read<R: Read + Seek>(buffer: &mut BufReader<R>) -> Result<Self>
    where
        Self: Sized;
}

impl<T: bytemuck::Pod> BinaryData for T {
    fn read<R: Read + Seek>(buffer: &mut BufReader<R>) -> Result<Self> {
        let mut value = T::zeroed();
        read_exact(buffer, bytemuck::bytes_of_mut(&mut value))?;
        Ok(value)
    }
}

/// Four character tag, kept in file order so it prints as text.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    /// Value of the tag read as a big-endian integer.
    pub fn value(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &c in &self.0 {
            if c.is_ascii_graphic() || c == b' ' {
                write!(f, "{}", c as char)?;
            } else {
                write!(f, "\\x{c:02x}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{self}\")")
    }
}

fn read_exact<R: Read + Seek>(buffer: &mut BufReader<R>, bytes: &mut [u8]) -> Result<()> {
    match buffer.read_exact(bytes) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(PofError::ShortRead {
            offset: buffer.stream_position()?,
            wanted: bytes.len(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Reads an int32 element count, rejecting negative values.
pub fn read_count<R: Read + Seek>(buffer: &mut BufReader<R>, what: &'static str) -> Result<usize> {
    let value = i32::read(buffer)?;
    usize::try_from(value).map_err(|_| PofError::NegativeCount { what, value })
}

/// Reads an int32 count followed by that many elements.
pub fn read_list<R: Read + Seek, T>(
    buffer: &mut BufReader<R>,
    what: &'static str,
    f: impl FnMut(&mut BufReader<R>) -> Result<T>,
) -> Result<Vec<T>> {
    let n = read_count(buffer, what)?;
    read_list_n(buffer, n, f)
}

pub fn read_list_n<R: Read + Seek, T>(
    buffer: &mut BufReader<R>,
    n: usize,
    mut f: impl FnMut(&mut BufReader<R>) -> Result<T>,
) -> Result<Vec<T>> {
    (0..n).map(|_| f(buffer)).collect()
}

/// Reads exactly `n` raw bytes. The buffer only grows as data actually arrives,
/// so a corrupt length cannot force a huge allocation up front.
pub fn read_bytes<R: Read + Seek>(buffer: &mut BufReader<R>, n: usize) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    buffer.by_ref().take(n as u64).read_to_end(&mut bytes)?;
    if bytes.len() < n {
        return Err(PofError::ShortRead {
            offset: buffer.stream_position()?,
            wanted: n - bytes.len(),
        });
    }
    Ok(bytes)
}

/// Length-prefixed string. NUL bytes anywhere in the run are dropped, and the
/// whole declared length is consumed.
pub fn read_string<R: Read + Seek>(buffer: &mut BufReader<R>) -> Result<String> {
    let len = read_count(buffer, "string length")?;
    let mut bytes = read_bytes(buffer, len)?;
    bytes.retain(|&c| c != 0);

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
