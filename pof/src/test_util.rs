//! Byte builders for synthetic models and geometry blobs.

use std::io::{BufReader, Cursor};

use glam::{Vec2, Vec3};

/// Little-endian byte sink with chainable writers.
#[derive(Default)]
pub struct ByteWriter {
    pub bytes: Vec<u8>,
}

impl ByteWriter {
    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.bytes.push(v);
        self
    }

    pub fn f32(&mut self, v: f32) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn vec3(&mut self, v: Vec3) -> &mut Self {
        self.f32(v.x).f32(v.y).f32(v.z)
    }

    pub fn bytes(&mut self, v: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(v);
        self
    }

    /// Length-prefixed string, no terminator.
    pub fn string(&mut self, s: &str) -> &mut Self {
        self.i32(s.len() as i32).bytes(s.as_bytes())
    }

    pub fn tag(&mut self, tag: &[u8; 4]) -> &mut Self {
        self.bytes(tag)
    }

    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.bytes)
    }
}

pub fn reader(bytes: Vec<u8>) -> BufReader<Cursor<Vec<u8>>> {
    BufReader::new(Cursor::new(bytes))
}

/// Whole files: magic, version, then chunks.
pub struct PofBuilder {
    w: ByteWriter,
}

impl PofBuilder {
    pub fn new(version: i32) -> Self {
        let mut w = ByteWriter::default();
        w.tag(b"PSPO").i32(version);
        Self { w }
    }

    pub fn chunk(mut self, tag: &[u8; 4], payload: &[u8]) -> Self {
        self.w.tag(tag).i32(payload.len() as i32).bytes(payload);
        self
    }

    /// Chunk whose declared length differs from its payload.
    pub fn chunk_with_len(mut self, tag: &[u8; 4], len: i32, payload: &[u8]) -> Self {
        self.w.tag(tag).i32(len).bytes(payload);
        self
    }

    pub fn bytes(mut self) -> Vec<u8> {
        self.w.take()
    }

    pub fn build(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.bytes())
    }
}

/// `HDR2` payload for a current file: no details, debris, cross-sections or
/// lights, and the given mass with an identity tensor.
pub fn hdr2_payload(radius: f32, mass: f32, details: &[i32], debris: &[i32]) -> Vec<u8> {
    let mut w = ByteWriter::default();
    w.f32(radius).i32(0).i32(1).vec3(Vec3::ZERO).vec3(Vec3::ZERO);
    w.i32(details.len() as i32);
    details.iter().for_each(|&d| {
        w.i32(d);
    });
    w.i32(debris.len() as i32);
    debris.iter().for_each(|&d| {
        w.i32(d);
    });
    w.f32(mass).vec3(Vec3::ZERO);
    w.vec3(Vec3::X).vec3(Vec3::Y).vec3(Vec3::Z);
    w.i32(0).i32(0);
    w.take()
}

/// `OBJ2` payload with empty name and properties.
pub fn obj2_payload(number: i32, parent: i32, offset: Vec3, bsp: &[u8]) -> Vec<u8> {
    let mut w = ByteWriter::default();
    w.i32(number).f32(1.0).i32(parent).vec3(offset);
    w.vec3(Vec3::ZERO).vec3(Vec3::ZERO).vec3(Vec3::ZERO);
    w.string("").string("");
    w.i32(0).i32(0).i32(0);
    w.i32(bsp.len() as i32).bytes(bsp);
    w.take()
}

/// Geometry blob records. Every builder returns one complete record.
pub struct BlockBuilder;

impl BlockBuilder {
    pub fn record(id: i32, body: &[u8]) -> Vec<u8> {
        let mut w = ByteWriter::default();
        w.i32(id).i32(8 + body.len() as i32).bytes(body);
        w.take()
    }

    pub fn vec3_bytes(v: Vec3) -> Vec<u8> {
        let mut w = ByteWriter::default();
        w.vec3(v);
        w.take()
    }

    pub fn end() -> Vec<u8> {
        Self::record(0, &[])
    }

    pub fn points(points: &[(Vec3, Vec<Vec3>)]) -> Vec<u8> {
        let counts_len = (points.len() + 3) & !3;
        let data_offset = 20 + counts_len;
        let num_norms: usize = points.iter().map(|(_, n)| n.len()).sum();

        let mut body = ByteWriter::default();
        body.i32(points.len() as i32)
            .i32(num_norms as i32)
            .i32(data_offset as i32);
        for (_, normals) in points {
            body.u8(normals.len() as u8);
        }
        body.bytes(&vec![0; counts_len - points.len()]);
        for (vertex, normals) in points {
            body.vec3(*vertex);
            for &normal in normals {
                body.vec3(normal);
            }
        }
        Self::record(1, &body.bytes)
    }

    fn polygon_header(
        body: &mut ByteWriter,
        normal: Vec3,
        center: Vec3,
        radius: f32,
        n: usize,
        color: i32,
    ) {
        body.vec3(normal)
            .vec3(center)
            .f32(radius)
            .i32(n as i32)
            .i32(color);
    }

    pub fn flat_poly(
        normal: Vec3,
        center: Vec3,
        radius: f32,
        color: i32,
        verts: &[(u16, u16)],
    ) -> Vec<u8> {
        let mut body = ByteWriter::default();
        Self::polygon_header(&mut body, normal, center, radius, verts.len(), color);
        for &(vertex, normal) in verts {
            body.u16(vertex).u16(normal);
        }
        Self::record(2, &body.bytes)
    }

    pub fn textured_poly(
        normal: Vec3,
        center: Vec3,
        radius: f32,
        texture: i32,
        verts: &[(u16, u16, Vec2)],
    ) -> Vec<u8> {
        let mut body = ByteWriter::default();
        Self::polygon_header(&mut body, normal, center, radius, verts.len(), texture);
        for &(vertex, normal, uv) in verts {
            body.u16(vertex).u16(normal).f32(uv.x).f32(uv.y);
        }
        Self::record(3, &body.bytes)
    }

    pub fn bound_box(min: Vec3, max: Vec3) -> Vec<u8> {
        let mut body = ByteWriter::default();
        body.vec3(min).vec3(max);
        Self::record(5, &body.bytes)
    }

    /// Split node followed by an end record, then the front and back
    /// subtrees. An empty subtree is written as a zero offset.
    pub fn sort_norm(front: &[u8], back: &[u8]) -> Vec<u8> {
        const HEADER: usize = 80;
        let front_at = HEADER + 8;
        let back_at = front_at + front.len();

        let mut w = ByteWriter::default();
        w.i32(4)
            .i32(HEADER as i32)
            .vec3(Vec3::Z)
            .vec3(Vec3::ZERO)
            .i32(0)
            .i32(if front.is_empty() { 0 } else { front_at as i32 })
            .i32(if back.is_empty() { 0 } else { back_at as i32 });
        w.bytes(&vec![0; HEADER - w.bytes.len()]);
        w.bytes(&Self::end()).bytes(front).bytes(back);
        w.take()
    }
}
