use std::io::{BufReader, Read, Seek};

use crate::{
    binaries::{read_count, read_list, read_list_n, read_string, BinaryData},
    config::DecodeConfig,
    error::Result,
    model::{Thruster, ThrusterGlow},
};

/// `FUEL`: engine thrusters. The glow count comes before the properties
/// string on files that have one.
pub fn read_thrusters<R: Read + Seek>(
    buffer: &mut BufReader<R>,
    config: &DecodeConfig,
) -> Result<Vec<Thruster>> {
    let thrusters = read_list(buffer, "thruster count", |buffer| {
        let n = read_count(buffer, "glow count")?;
        log::info!("glows : {n}");

        let properties = if config.has_thruster_properties {
            read_string(buffer)?
        } else {
            String::new()
        };
        let glows = read_list_n(buffer, n, ThrusterGlow::read)?;

        Ok(Thruster { properties, glows })
    })?;

    log::info!("thrusters : {}", thrusters.len());
    Ok(thrusters)
}
