pub mod records;

use std::mem;

use glam::{Vec2, Vec3};
use num_traits::FromPrimitive;

use crate::{
    binaries::BlockSlice,
    consts::RecordId,
    error::{PofError, Result},
    model::{BoundingBox, Polygon, PolygonKind},
};

use records::{
    BoundBoxRecord, FlatVertex, PointsHeader, PolygonHeader, SortNormHeader, TexturedVertex,
    POINTS_COUNTS_OFFSET, POLYGON_VERTS_OFFSET,
};

// Geometry blob embedded in each sub-object
//
// Unlike the chunk stream around it, the blob is not read with a cursor. It is
// a chain of records, each starting with an id and a total size, and the next
// record always starts `size` bytes after the current one no matter how much
// of it was interpreted. Points records and split nodes carry their own
// offsets (relative to the record start) to data that may lie outside that
// span: the vertex block and the two subtrees respectively.
//
// Indices in decoded polygons are local to the blob: vertex indices into
// `vertices`, normal indices into `normals`.

/// Scratch geometry for one sub-object, merged into the model right after.
#[derive(Debug, Default)]
pub struct BspData {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub polygons: Vec<Polygon>,
    pub boxes: Vec<BoundingBox>,
}

/// Deepest split nesting accepted in any blob.
pub const MAX_BSP_DEPTH: usize = 1024;

/// Work allowed for one blob. Split children are offsets, so a crafted blob
/// can point many nodes at the same records; both limits keep that finite.
struct Walk {
    max_depth: usize,
    records_left: usize,
}

impl Walk {
    fn for_blob(len: usize) -> Self {
        Self {
            max_depth: (len / mem::size_of::<SortNormHeader>() + 1).min(MAX_BSP_DEPTH),
            records_left: 4 * (len / 8 + 1),
        }
    }
}

pub fn decode_bsp(data: &[u8]) -> Result<BspData> {
    let mut bsp = BspData::default();
    let mut walk = Walk::for_blob(data.len());
    read_records(BlockSlice::new(data), &mut bsp, &mut walk, 0)?;
    Ok(bsp)
}

/// Decodes records from `block` until an end record or the end of the blob.
fn read_records(
    mut block: BlockSlice,
    bsp: &mut BspData,
    walk: &mut Walk,
    depth: usize,
) -> Result<()> {
    if depth > walk.max_depth {
        return Err(PofError::BspTooDeep {
            offset: block.offset(),
        });
    }

    while !block.is_empty() {
        walk.records_left = match walk.records_left.checked_sub(1) {
            Some(left) => left,
            None => {
                return Err(PofError::BspTooDeep {
                    offset: block.offset(),
                })
            }
        };

        let id = block.i32_at(0)?;

        let kind = match RecordId::from_i32(id) {
            Some(RecordId::End) => break,
            Some(kind) => kind,
            None => {
                return Err(PofError::UnknownRecord {
                    id,
                    offset: block.offset(),
                })
            }
        };

        let size = block.i32_at(4)?;
        if size < 8 {
            return Err(PofError::BadRecordSize {
                offset: block.offset(),
                size,
            });
        }

        match kind {
            RecordId::Points => read_points(block, bsp)?,
            RecordId::FlatPoly => bsp.polygons.push(read_flat_poly(block)?),
            RecordId::TexturedPoly => bsp.polygons.push(read_textured_poly(block)?),
            RecordId::SortNorm => read_sort_norm(block, bsp, walk, depth)?,
            RecordId::BoundBox => {
                let record: BoundBoxRecord = block.pod_at(0)?;
                bsp.boxes.push(BoundingBox {
                    min: record.min,
                    max: record.max,
                });
            }
            // stops the loop above
            RecordId::End => {}
        }

        block = block.at(size as usize)?;
    }
    Ok(())
}

fn count(value: i32, what: &'static str) -> Result<usize> {
    usize::try_from(value).map_err(|_| PofError::NegativeCount { what, value })
}

fn read_points(block: BlockSlice, bsp: &mut BspData) -> Result<()> {
    let header: PointsHeader = block.pod_at(0)?;
    let num_verts = count(header.num_verts, "point count")?;
    let num_norms = header.num_norms;

    log::debug!(
        "points at {} : {num_verts} vertices, {num_norms} normals",
        block.offset()
    );

    let normal_counts = block.bytes_at(POINTS_COUNTS_OFFSET, num_verts)?;
    let mut cursor = count(header.data_offset, "point data offset")?;

    // Normals are interleaved, each vertex followed by its own normals
    for &normal_count in normal_counts {
        bsp.vertices.push(block.vec3_at(cursor)?);
        cursor += 12;

        for _ in 0..normal_count {
            bsp.normals.push(block.vec3_at(cursor)?);
            cursor += 12;
        }
    }
    Ok(())
}

fn read_flat_poly(block: BlockSlice) -> Result<Polygon> {
    let header: PolygonHeader = block.pod_at(0)?;
    let n = count(header.num_verts, "polygon vertex count")?;

    let mut vertices = Vec::with_capacity(n.min(block.len() / 4));
    let mut normals = Vec::with_capacity(vertices.capacity());

    for i in 0..n {
        let vert: FlatVertex = block.pod_at(POLYGON_VERTS_OFFSET + i * 4)?;
        vertices.push(vert.vertex as usize);
        normals.push(vert.normal as usize);
    }

    Ok(Polygon {
        kind: PolygonKind::Flat {
            color: header.color,
        },
        subobj_index: 0,
        center: header.center,
        normal: header.normal,
        radius: header.radius,
        vertices,
        normals,
    })
}

fn read_textured_poly(block: BlockSlice) -> Result<Polygon> {
    let header: PolygonHeader = block.pod_at(0)?;
    let n = count(header.num_verts, "polygon vertex count")?;

    let capacity = n.min(block.len() / 12);
    let mut vertices = Vec::with_capacity(capacity);
    let mut normals = Vec::with_capacity(capacity);
    let mut uv = Vec::with_capacity(capacity);

    for i in 0..n {
        let vert: TexturedVertex = block.pod_at(POLYGON_VERTS_OFFSET + i * 12)?;
        vertices.push(vert.vertex as usize);
        normals.push(vert.normal as usize);
        uv.push(Vec2::new(vert.u, vert.v));
    }

    Ok(Polygon {
        kind: PolygonKind::Textured {
            texture: header.color,
            uv,
        },
        subobj_index: 0,
        center: header.center,
        normal: header.normal,
        radius: header.radius,
        vertices,
        normals,
    })
}

fn read_sort_norm(
    block: BlockSlice,
    bsp: &mut BspData,
    walk: &mut Walk,
    depth: usize,
) -> Result<()> {
    let header: SortNormHeader = block.pod_at(0)?;

    // Front and back land in the same flat output, order does not matter
    for child in [header.front, header.back] {
        match child {
            0 => {}
            c if c > 0 => read_records(block.at(c as usize)?, bsp, walk, depth + 1)?,
            _ => {
                return Err(PofError::BadChildOffset {
                    offset: block.offset(),
                    child,
                })
            }
        }
    }
    Ok(())
}
