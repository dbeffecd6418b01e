use std::io::{BufReader, Read, Seek};

use glam::Vec3;

use crate::{
    binaries::{read_bytes, read_list, read_string, BinaryData},
    error::{PofError, Result},
    model::{EyePoint, Subsystem},
};

/// `TXTR`: texture names, in the order polygons refer to them.
pub fn read_textures<R: Read + Seek>(buffer: &mut BufReader<R>) -> Result<Vec<String>> {
    read_list(buffer, "texture count", |buffer| {
        let name = read_string(buffer)?;
        log::info!("texture : {name}");
        Ok(name)
    })
}

/// `SPCL`: named special points.
pub fn read_subsystems<R: Read + Seek>(buffer: &mut BufReader<R>) -> Result<Vec<Subsystem>> {
    read_list(buffer, "subsystem count", |buffer| {
        Ok(Subsystem {
            name: read_string(buffer)?,
            properties: read_string(buffer)?,
            pos: Vec3::read(buffer)?,
            radius: f32::read(buffer)?,
        })
    })
}

/// `PINF`: free text notes from the exporter. Logged, never kept.
pub fn read_info<R: Read + Seek>(buffer: &mut BufReader<R>, len: usize) -> Result<String> {
    let text: String = read_bytes(buffer, len)?
        .into_iter()
        .map(|c| if c == 0 { '\n' } else { c as char })
        .collect();
    log::info!("compilation data :\n\"{text}\"");
    Ok(text)
}

/// `EYE `: at most one viewpoint.
pub fn read_eye<R: Read + Seek>(buffer: &mut BufReader<R>) -> Result<Option<EyePoint>> {
    let n = i32::read(buffer)?;
    log::info!("eyes : {n}");
    match n {
        0 => Ok(None),
        1 => {
            let eye = EyePoint::read(buffer)?;
            log::info!("eye sub-object : {}", eye.subobj_index);
            Ok(Some(eye))
        }
        _ => Err(PofError::BadEyeCount(n)),
    }
}

/// `INSG`: only checks that the payload has a first word, then steps back
/// over it. The rest is left for the reader to skip.
pub fn peek_insignia<R: Read + Seek>(buffer: &mut BufReader<R>) -> Result<()> {
    i32::read(buffer)?;
    buffer.seek_relative(-4)?;
    Ok(())
}

/// `ACEN`: the autocenter point, a single vector.
pub fn read_autocenter<R: Read + Seek>(buffer: &mut BufReader<R>, len: u64) -> Result<Vec3> {
    if len != 12 {
        return Err(PofError::BadAutocenterLength(len));
    }
    Vec3::read(buffer)
}
