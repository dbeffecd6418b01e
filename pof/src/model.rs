use std::fmt;

use glam::{Mat3, Vec2, Vec3};
use num_derive::FromPrimitive;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn translated(self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CrossSection {
    pub depth: f32,
    pub radius: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, FromPrimitive)]
pub enum LightKind {
    Muzzle = 1,
    Thruster = 2,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Light {
    pub pos: Vec3,
    pub kind: LightKind,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Movement {
    pub kind: i32,
    pub axis: i32,
}

/// One node of the rigid hierarchy. Sub-objects refer to each other by index
/// into [`PofModel::subobjs`]; a parent always precedes its children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubObject {
    pub number: i32,
    /// `None` for a root.
    pub parent: Option<usize>,
    /// `None` until resolved, and for trees whose root has no detail level.
    pub detail: Option<u32>,
    pub name: String,
    pub properties: String,
    pub center: Vec3,
    /// Offset relative to the parent, as stored.
    pub raw_offset: Vec3,
    /// Offset relative to the root, the sum of raw offsets up the parent chain.
    pub offset: Vec3,
    pub bbox: BoundingBox,
    pub radius: f32,
    pub movement: Movement,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PolygonKind {
    Flat { color: i32 },
    Textured { texture: i32, uv: Vec<Vec2> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub kind: PolygonKind,
    pub subobj_index: usize,
    pub center: Vec3,
    pub normal: Vec3,
    pub radius: f32,
    pub vertices: Vec<usize>,
    pub normals: Vec<usize>,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShieldFace {
    pub normal: Vec3,
    pub vertices: [i32; 3],
    /// Adjacent faces, one per edge.
    pub neighbors: [i32; 3],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shield {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<ShieldFace>,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ThrusterGlow {
    pub pos: Vec3,
    pub normal: Vec3,
    pub radius: f32,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Thruster {
    pub properties: String,
    pub glows: Vec<ThrusterGlow>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dock {
    pub properties: String,
    pub splines: Vec<i32>,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Subsystem {
    pub name: String,
    pub properties: String,
    pub pos: Vec3,
    pub radius: f32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WeaponKind {
    Gun = 1,
    Missile = 2,
    GunTurret = 3,
    MissileTurret = 4,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WeaponClass {
    Primary,
    Secondary,
}

/// Flattened entry for every firing point, whatever table it came from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WeaponMount {
    pub pos: Vec3,
    pub normal: Vec3,
    /// Always 0 here, binding to turret sub-objects happens elsewhere.
    pub subobj: usize,
    pub kind: WeaponKind,
    pub bank: usize,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GunPoint {
    pub pos: Vec3,
    pub normal: Vec3,
}

pub type GunBank = Vec<GunPoint>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TurretBank {
    pub barrel_subobj: i32,
    pub mount_subobj: i32,
    pub normal: Vec3,
    pub positions: Vec<Vec3>,
}

/// A primary and a secondary table of the same kind of bank.
#[derive(Clone, Debug, PartialEq)]
pub struct BankTable<T> {
    pub primary: Vec<T>,
    pub secondary: Vec<T>,
}

impl<T> Default for BankTable<T> {
    fn default() -> Self {
        Self {
            primary: Vec::new(),
            secondary: Vec::new(),
        }
    }
}

impl<T> BankTable<T> {
    pub fn get(&self, class: WeaponClass) -> &[T] {
        match class {
            WeaponClass::Primary => &self.primary,
            WeaponClass::Secondary => &self.secondary,
        }
    }

    pub fn get_mut(&mut self, class: WeaponClass) -> &mut Vec<T> {
        match class {
            WeaponClass::Primary => &mut self.primary,
            WeaponClass::Secondary => &mut self.secondary,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct EyePoint {
    pub subobj_index: i32,
    pub offset: Vec3,
    pub normal: Vec3,
}

/// A decoded model. Owns every collection; sub-objects, vertices and polygons
/// cross-reference each other by index only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PofModel {
    pub version: i32,
    pub flags: i32,
    pub bbox: BoundingBox,
    pub radius: f32,

    pub mass: f32,
    pub mass_center: Vec3,
    pub inertia_tensor: Mat3,
    pub autocenter: Vec3,

    pub cross_sections: Vec<CrossSection>,
    pub lights: Vec<Light>,

    pub subobjs: Vec<SubObject>,
    /// Sub-object index per detail level, in level order.
    pub detail_subobjs: Vec<i32>,
    pub debris_subobjs: Vec<i32>,

    /// Vertex pool shared by every sub-object, in root-relative space.
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Owning sub-object of each entry in `vertices`.
    pub subobj_indices: Vec<usize>,
    pub polygons: Vec<Polygon>,
    /// Geometry bounding boxes, in root-relative space.
    pub boxes: Vec<BoundingBox>,

    pub textures: Vec<String>,
    pub shield: Shield,
    pub thrusters: Vec<Thruster>,
    pub docks: Vec<Dock>,
    pub subsystems: Vec<Subsystem>,

    pub weapons: Vec<WeaponMount>,
    pub gun_banks: BankTable<GunBank>,
    pub turret_banks: BankTable<TurretBank>,
    pub eye: Option<EyePoint>,
}

impl PofModel {
    /// An empty model of `version`, with unit mass and no inertia until a
    /// header says otherwise.
    pub fn new(version: i32) -> Self {
        Self {
            version,
            mass: 1.0,
            inertia_tensor: Mat3::ZERO,
            ..Default::default()
        }
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            version: self.version,
            subobjs: self.subobjs.len(),
            details: self.detail_subobjs.len(),
            debris: self.debris_subobjs.len(),
            vertices: self.vertices.len(),
            normals: self.normals.len(),
            polygons: self.polygons.len(),
            textures: self.textures.len(),
            weapons: self.weapons.len(),
            thrusters: self.thrusters.len(),
            docks: self.docks.len(),
            subsystems: self.subsystems.len(),
            shield_faces: self.shield.faces.len(),
        }
    }
}

/// Element counts of a decoded model.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelSummary {
    pub version: i32,
    pub subobjs: usize,
    pub details: usize,
    pub debris: usize,
    pub vertices: usize,
    pub normals: usize,
    pub polygons: usize,
    pub textures: usize,
    pub weapons: usize,
    pub thrusters: usize,
    pub docks: usize,
    pub subsystems: usize,
    pub shield_faces: usize,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version : {}", self.version)?;
        writeln!(
            f,
            "sub-objects : {} ({} details, {} debris)",
            self.subobjs, self.details, self.debris
        )?;
        writeln!(
            f,
            "geometry : {} vertices, {} normals, {} polygons",
            self.vertices, self.normals, self.polygons
        )?;
        writeln!(f, "textures : {}", self.textures)?;
        writeln!(f, "weapons : {}", self.weapons)?;
        writeln!(f, "thrusters : {}", self.thrusters)?;
        writeln!(f, "docks : {}", self.docks)?;
        writeln!(f, "subsystems : {}", self.subsystems)?;
        write!(f, "shield faces : {}", self.shield_faces)
    }
}
