pub use crate::binaries::Tag;
pub use crate::config::DecodeConfig;
pub use crate::consts::ChunkId;
pub use crate::error::{PofError, Result};
pub use crate::loader::{load_pof, PofReader, ToleratedGap};
pub use crate::model::{
    BankTable, BoundingBox, CrossSection, Dock, EyePoint, GunBank, GunPoint, Light, LightKind,
    ModelSummary, Movement, PofModel, Polygon, PolygonKind, Shield, ShieldFace, SubObject,
    Subsystem, Thruster, ThrusterGlow, TurretBank, WeaponClass, WeaponKind, WeaponMount,
};
