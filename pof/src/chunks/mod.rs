//! Handlers for the outer chunk stream, one per tag or family of tags. Each
//! reads from the current cursor and leaves boundary checks to the reader.

pub mod dock;
pub mod fuel;
pub mod header;
pub mod misc;
pub mod shield;
pub mod subobject;
pub mod weapons;

pub use dock::{read_docks, skip_paths};
pub use fuel::read_thrusters;
pub use header::{convert_area_mass, read_header};
pub use misc::{
    peek_insignia, read_autocenter, read_eye, read_info, read_subsystems, read_textures,
};
pub use shield::read_shield;
pub use subobject::read_subobject;
pub use weapons::{read_gun_points, read_turrets};
