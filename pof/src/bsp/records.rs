use std::mem;

use glam::Vec3;

// Record headers as laid out in the geometry blob. Every record starts with
// its id and total size.

#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointsHeader {
    pub id: i32,
    pub size: i32,
    pub num_verts: i32,
    pub num_norms: i32,
    /// Offset from the record start to the vertex data.
    pub data_offset: i32,
}

/// Per-vertex normal counts follow the points header.
pub const POINTS_COUNTS_OFFSET: usize = mem::size_of::<PointsHeader>();

/// Shared by flat and textured polygons; `color` is a texture index for the
/// textured kind.
#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PolygonHeader {
    pub id: i32,
    pub size: i32,
    pub normal: Vec3,
    pub center: Vec3,
    pub radius: f32,
    pub num_verts: i32,
    pub color: i32,
}

pub const POLYGON_VERTS_OFFSET: usize = mem::size_of::<PolygonHeader>();

#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FlatVertex {
    pub vertex: u16,
    pub normal: u16,
}

#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TexturedVertex {
    pub vertex: u16,
    pub normal: u16,
    pub u: f32,
    pub v: f32,
}

#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SortNormHeader {
    pub id: i32,
    pub size: i32,
    pub plane_normal: Vec3,
    pub plane_point: Vec3,
    pub reserved: i32,
    /// Offsets from the record start to the front and back subtrees.
    pub front: i32,
    pub back: i32,
}

#[repr(C, packed)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BoundBoxRecord {
    pub id: i32,
    pub size: i32,
    pub min: Vec3,
    pub max: Vec3,
}
