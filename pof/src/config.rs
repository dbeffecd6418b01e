use crate::consts::{
    VERSION_CROSS_SECTIONS, VERSION_LIGHTS, VERSION_MASS_IS_VOLUME, VERSION_MASS_PROPERTIES,
    VERSION_THRUSTER_PROPERTIES,
};

/// Field layout switches resolved once from the file version.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodeConfig {
    pub version: i32,
    /// Header carries mass, center of mass and inertia tensor.
    pub has_mass_properties: bool,
    /// Stored mass is really an area and has to be converted.
    pub mass_is_area: bool,
    /// Header carries a light list.
    pub has_lights: bool,
    /// Header carries a cross-section list.
    pub has_cross_sections: bool,
    /// Each thruster carries a properties string.
    pub has_thruster_properties: bool,
}

impl DecodeConfig {
    pub fn for_version(version: i32) -> Self {
        Self {
            version,
            has_mass_properties: version >= VERSION_MASS_PROPERTIES,
            mass_is_area: version < VERSION_MASS_IS_VOLUME,
            has_lights: version >= VERSION_LIGHTS,
            has_cross_sections: version >= VERSION_CROSS_SECTIONS,
            has_thruster_properties: version >= VERSION_THRUSTER_PROPERTIES,
        }
    }
}
