use std::io::{BufReader, Read, Seek};

use glam::Vec3;

use crate::{
    binaries::{read_list, BinaryData},
    error::Result,
    model::{Shield, ShieldFace},
};

/// `SHLD`: the collision mesh. Face adjacency is stored as read.
pub fn read_shield<R: Read + Seek>(buffer: &mut BufReader<R>) -> Result<Shield> {
    let vertices = read_list(buffer, "shield vertex count", Vec3::read)?;
    let faces = read_list(buffer, "shield face count", ShieldFace::read)?;
    log::info!(
        "shield : {} vertices, {} faces",
        vertices.len(),
        faces.len()
    );
    Ok(Shield { vertices, faces })
}
