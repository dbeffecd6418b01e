use std::io::{BufReader, Read, Seek};

use glam::{Mat3, Vec3};
use num_traits::FromPrimitive;

use crate::{
    binaries::{read_list, read_list_n, BinaryData},
    config::DecodeConfig,
    consts::{ChunkId, AREA_MASS_FACTOR},
    error::{PofError, Result},
    model::{BoundingBox, CrossSection, Light, LightKind, PofModel},
};

/// `HDR2`: global extents, detail and debris lists, then the version gated
/// mass properties, cross-sections and lights.
pub fn read_header<R: Read + Seek>(
    buffer: &mut BufReader<R>,
    config: &DecodeConfig,
    model: &mut PofModel,
) -> Result<()> {
    model.radius = f32::read(buffer)?;
    model.flags = i32::read(buffer)?;

    let subobj_count = i32::read(buffer)?;
    log::info!("sub-objects : {subobj_count}");

    model.bbox = BoundingBox::read(buffer)?;

    model.detail_subobjs = read_list(buffer, "detail count", i32::read)?;
    log::info!("details : {}", model.detail_subobjs.len());

    model.debris_subobjs = read_list(buffer, "debris count", i32::read)?;
    log::info!("debris : {}", model.debris_subobjs.len());

    if config.has_mass_properties {
        let mut mass = f32::read(buffer)?;
        model.mass_center = Vec3::read(buffer)?;

        let mut scale = 1.0;
        if config.mass_is_area {
            (mass, scale) = convert_area_mass(mass);
        }
        model.mass = mass;

        // Stored one column at a time
        let cols = <[Vec3; 3]>::read(buffer)?;
        model.inertia_tensor = Mat3::from_cols(cols[0], cols[1], cols[2]) * scale;
    } else {
        model.mass = 1.0;
        model.mass_center = Vec3::ZERO;
        model.inertia_tensor = Mat3::ZERO;
    }

    log::info!("mass : {}", model.mass);
    log::info!("mass center : {}", model.mass_center);

    if config.has_cross_sections {
        // A negative count means no table
        let n = i32::read(buffer)?.max(0) as usize;
        model.cross_sections = read_list_n(buffer, n, CrossSection::read)?;
        log::info!("cross-sections : {n}");
    }

    if config.has_lights {
        let n = i32::read(buffer)?;
        if is_object_tag(n) {
            return Err(PofError::BadLightCount(n));
        }
        let n = usize::try_from(n).map_err(|_| PofError::NegativeCount {
            what: "light count",
            value: n,
        })?;

        model.lights = read_list_n(buffer, n, read_light)?;
        log::info!("lights : {n}");
    }

    Ok(())
}

/// Old headers store an area in the mass field. Returns the corrected mass
/// and the factor the inertia tensor has to be scaled by.
pub fn convert_area_mass(area: f32) -> (f32, f32) {
    let area = area as f64;
    let mass = AREA_MASS_FACTOR * area.powf(2.0 / 3.0);
    let scale = if mass == 0.0 { 1.0 } else { area / mass };
    (mass as f32, scale as f32)
}

/// A light count that is really a sub-object tag means the header layout does
/// not match the file version.
fn is_object_tag(n: i32) -> bool {
    [ChunkId::Sobj, ChunkId::Obj2].into_iter().any(|id| {
        let tag = id.tag();
        n == tag.value() as i32 || n == i32::from_le_bytes(tag.0)
    })
}

fn read_light<R: Read + Seek>(buffer: &mut BufReader<R>) -> Result<Light> {
    let pos = Vec3::read(buffer)?;
    let kind = i32::read(buffer)?;
    let kind = LightKind::from_i32(kind).ok_or(PofError::BadLightType(kind))?;
    Ok(Light { pos, kind })
}
