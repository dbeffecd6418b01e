use num_derive::FromPrimitive;

use crate::binaries::Tag;

/// File identifier, stored as big-endian text at the start of every model.
pub const POF_MAGIC: Tag = Tag(*b"PSPO");

// Version gates for the header and thruster layouts.
pub const VERSION_MASS_PROPERTIES: i32 = 1903;
pub const VERSION_LIGHTS: i32 = 2007;
pub const VERSION_MASS_IS_VOLUME: i32 = 2009;
pub const VERSION_CROSS_SECTIONS: i32 = 2014;
pub const VERSION_THRUSTER_PROPERTIES: i32 = 2117;

/// Detail level given to every debris sub-object.
pub const DEBRIS_DETAIL: u32 = 9;

/// Area to mass conversion factor used by pre-2009 headers.
pub const AREA_MASS_FACTOR: f64 = 4.65;

/// Outer chunk tags, valued as the big-endian reading of their four characters.
#[derive(Copy, Clone, FromPrimitive, Debug, PartialEq, Eq)]
pub enum ChunkId {
    Ohdr = 0x4F48_4452, // "OHDR"
    Hdr2 = 0x4844_5232, // "HDR2"
    Txtr = 0x5458_5452, // "TXTR"
    Shld = 0x5348_4C44, // "SHLD"
    Sobj = 0x534F_424A, // "SOBJ"
    Obj2 = 0x4F42_4A32, // "OBJ2"
    Gpnt = 0x4750_4E54, // "GPNT"
    Mpnt = 0x4D50_4E54, // "MPNT"
    Tgun = 0x5447_554E, // "TGUN"
    Tmis = 0x544D_4953, // "TMIS"
    Spcl = 0x5350_434C, // "SPCL"
    Dock = 0x444F_434B, // "DOCK"
    Path = 0x5041_5448, // "PATH"
    Fuel = 0x4655_454C, // "FUEL"
    Pinf = 0x5049_4E46, // "PINF"
    Eye = 0x4559_4520,  // "EYE "
    Insg = 0x494E_5347, // "INSG"
    Acen = 0x4143_454E, // "ACEN"
}

impl ChunkId {
    pub fn tag(self) -> Tag {
        Tag((self as u32).to_be_bytes())
    }
}

/// Record ids of the geometry blob embedded in every sub-object.
#[derive(Copy, Clone, FromPrimitive, Debug, PartialEq, Eq)]
pub enum RecordId {
    End = 0,
    Points = 1,
    FlatPoly = 2,
    TexturedPoly = 3,
    SortNorm = 4,
    BoundBox = 5,
}
