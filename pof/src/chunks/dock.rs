use std::io::{BufReader, Read, Seek};

use glam::Vec3;

use crate::{
    binaries::{read_count, read_list, read_list_n, read_string, BinaryData},
    error::Result,
    model::Dock,
};

/// `DOCK`: docking points, each with parallel position and normal lists.
pub fn read_docks<R: Read + Seek>(buffer: &mut BufReader<R>) -> Result<Vec<Dock>> {
    let docks = read_list(buffer, "dock count", |buffer| {
        let properties = read_string(buffer)?;
        let splines = read_list(buffer, "spline count", i32::read)?;

        let n = read_count(buffer, "dock point count")?;
        let (positions, normals) = read_list_n(buffer, n, |buffer| {
            Ok((Vec3::read(buffer)?, Vec3::read(buffer)?))
        })?
        .into_iter()
        .unzip();

        Ok(Dock {
            properties,
            splines,
            positions,
            normals,
        })
    })?;

    log::info!("docks : {}", docks.len());
    Ok(docks)
}

/// `PATH`: navigation paths. Nothing is kept, the chunk is walked so the
/// cursor ends up where the data does.
pub fn skip_paths<R: Read + Seek>(buffer: &mut BufReader<R>) -> Result<()> {
    let n = read_count(buffer, "path count")?;
    log::info!("paths : {n} (ignored)");

    for _ in 0..n {
        read_string(buffer)?;
        read_string(buffer)?;

        let verts = read_count(buffer, "path vertex count")?;
        for _ in 0..verts {
            Vec3::read(buffer)?;
            f32::read(buffer)?;
            read_list(buffer, "path turret count", i32::read)?;
        }
    }
    Ok(())
}
