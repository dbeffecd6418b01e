use std::io::{BufReader, Read, Seek};

use glam::Vec3;

use crate::{
    binaries::{read_bytes, read_count, read_string, BinaryData},
    bsp::decode_bsp,
    consts::ChunkId,
    error::{PofError, Result},
    hierarchy::merge_bsp,
    model::{BoundingBox, Movement, PofModel, SubObject},
};

/// `SOBJ` and `OBJ2`: one hierarchy node and its geometry. The two layouts
/// only differ in where the radius sits.
pub fn read_subobject<R: Read + Seek>(
    buffer: &mut BufReader<R>,
    id: ChunkId,
    model: &mut PofModel,
) -> Result<()> {
    let index = model.subobjs.len();
    let mut subobj = SubObject {
        number: i32::read(buffer)?,
        ..Default::default()
    };
    log::info!("sub-object : {}", subobj.number);

    if id == ChunkId::Obj2 {
        subobj.radius = f32::read(buffer)?;
    }

    let parent = i32::read(buffer)?;
    subobj.raw_offset = Vec3::read(buffer)?;

    subobj.parent = match parent {
        -1 => None,
        p => match usize::try_from(p) {
            Ok(p) if p < index => Some(p),
            _ => return Err(PofError::ParentOutOfOrder { index, parent }),
        },
    };
    subobj.offset = match subobj.parent {
        Some(p) => subobj.raw_offset + model.subobjs[p].offset,
        None => subobj.raw_offset,
    };

    if id == ChunkId::Sobj {
        subobj.radius = f32::read(buffer)?;
    }

    subobj.center = Vec3::read(buffer)?;
    subobj.bbox = BoundingBox::read(buffer)?;

    subobj.name = read_string(buffer)?;
    subobj.properties = read_string(buffer)?;
    log::info!("name : {}", subobj.name);
    log::info!("properties : {}", subobj.properties);

    subobj.movement = Movement {
        kind: i32::read(buffer)?,
        axis: i32::read(buffer)?,
    };

    let reserved = i32::read(buffer)?;
    if reserved != 0 {
        return Err(PofError::ReservedField {
            number: subobj.number,
            value: reserved,
        });
    }

    let n = read_count(buffer, "BSP data size")?;
    log::info!("BSP data : {n} bytes");

    let blob = read_bytes(buffer, n)?;
    let bsp = decode_bsp(&blob)?;

    model.subobjs.push(subobj);
    merge_bsp(model, index, bsp)
}
