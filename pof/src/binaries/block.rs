use std::mem;

use glam::Vec3;

use crate::error::{PofError, Result};

/// Bounds-checked view into a geometry blob, addressed by byte offsets
/// relative to the start of the view.
///
/// Offsets reported in errors are absolute within the whole blob, so a bad
/// record deep inside a split tree can still be located.
#[derive(Copy, Clone, Debug)]
pub struct BlockSlice<'a> {
    data: &'a [u8],
    base: usize,
}

impl<'a> BlockSlice<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, base: 0 }
    }

    /// Offset of this view within the blob.
    pub fn offset(&self) -> usize {
        self.base
    }

    /// Bytes remaining from the start of this view to the end of the blob.
    pub fn len(&self) -> usize {
        self.data.len() - self.base
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A new view starting `rel` bytes into this one. The view may be empty.
    pub fn at(&self, rel: usize) -> Result<BlockSlice<'a>> {
        match self.base.checked_add(rel) {
            Some(base) if base <= self.data.len() => Ok(Self {
                data: self.data,
                base,
            }),
            _ => Err(self.short(rel, 0)),
        }
    }

    pub fn bytes_at(&self, rel: usize, n: usize) -> Result<&'a [u8]> {
        let start = self.base.checked_add(rel);
        let end = start.and_then(|s| s.checked_add(n));
        match (start, end) {
            (Some(start), Some(end)) if end <= self.data.len() => Ok(&self.data[start..end]),
            _ => Err(self.short(rel, n)),
        }
    }

    pub fn pod_at<T: bytemuck::Pod>(&self, rel: usize) -> Result<T> {
        let bytes = self.bytes_at(rel, mem::size_of::<T>())?;
        Ok(bytemuck::pod_read_unaligned(bytes))
    }

    pub fn u8_at(&self, rel: usize) -> Result<u8> {
        self.pod_at(rel)
    }

    pub fn u16_at(&self, rel: usize) -> Result<u16> {
        Ok(u16::from_le_bytes(self.pod_at(rel)?))
    }

    pub fn i32_at(&self, rel: usize) -> Result<i32> {
        Ok(i32::from_le_bytes(self.pod_at(rel)?))
    }

    pub fn f32_at(&self, rel: usize) -> Result<f32> {
        Ok(f32::from_le_bytes(self.pod_at(rel)?))
    }

    pub fn vec3_at(&self, rel: usize) -> Result<Vec3> {
        Ok(Vec3::new(
            self.f32_at(rel)?,
            self.f32_at(rel + 4)?,
            self.f32_at(rel + 8)?,
        ))
    }

    fn short(&self, rel: usize, wanted: usize) -> PofError {
        PofError::ShortRead {
            offset: self.base.saturating_add(rel) as u64,
            wanted,
        }
    }
}
