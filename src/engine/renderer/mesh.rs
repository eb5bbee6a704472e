// Unit mesh generation
//
// Every shape is drawn from a unit mesh scaled by its instance matrix, so one
// GPU buffer pair serves every object of the same kind.

use glam::{Mat4, Vec3};
use std::f32::consts::TAU;

use super::Vertex;
use crate::engine::scene::Shape;

/// Which unit mesh a shape is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Cube spanning -1..1 on every axis
    Cube,
    /// Cylinder of radius 1 spanning -1..1 on Y, capped
    Cylinder { segments: u32 },
    /// Disc of radius 1 in the XY plane facing +Z
    Disc { segments: u32 },
    /// Square spanning -1..1 in the XY plane facing +Z
    Quad,
}

/// CPU-side mesh data
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshKind {
    /// Unit mesh and scale that draw `shape`
    pub fn for_shape(shape: &Shape) -> (MeshKind, Vec3) {
        match *shape {
            Shape::Cuboid { half_extents } => (MeshKind::Cube, half_extents),
            Shape::Cylinder {
                radius,
                half_height,
                segments,
            } => (
                MeshKind::Cylinder { segments },
                Vec3::new(radius, half_height, radius),
            ),
            Shape::Disc { radius, segments } => {
                (MeshKind::Disc { segments }, Vec3::new(radius, radius, 1.0))
            }
            Shape::Plane {
                half_width,
                half_height,
            } => (MeshKind::Quad, Vec3::new(half_width, half_height, 1.0)),
        }
    }

    /// Generate the unit mesh
    pub fn build(&self) -> MeshData {
        match *self {
            MeshKind::Cube => cube(),
            MeshKind::Cylinder { segments } => cylinder(segments),
            MeshKind::Disc { segments } => disc(segments),
            MeshKind::Quad => quad(),
        }
    }
}

/// Model matrix for a shape placed by `world` (translation * rotation)
pub fn model_matrix(world: Mat4, shape: &Shape) -> Mat4 {
    let (_, scale) = MeshKind::for_shape(shape);
    world * Mat4::from_scale(scale)
}

fn cube() -> MeshData {
    let faces = [
        (Vec3::X, Vec3::Y),
        (Vec3::NEG_X, Vec3::Y),
        (Vec3::Y, Vec3::Z),
        (Vec3::NEG_Y, Vec3::Z),
        (Vec3::Z, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y),
    ];

    let mut mesh = MeshData::default();
    for (normal, up) in faces {
        // right x up == normal keeps every face counter-clockwise from outside
        let right = up.cross(normal);
        let base = mesh.vertices.len() as u32;
        for (u, v) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = normal + right * u + up * v;
            mesh.vertices.push(Vertex::new(position, normal));
        }
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
    mesh
}

fn cylinder(segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::default();

    // Side
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        let normal = Vec3::new(sin, 0.0, cos);
        mesh.vertices.push(Vertex::new(Vec3::new(sin, -1.0, cos), normal));
        mesh.vertices.push(Vertex::new(Vec3::new(sin, 1.0, cos), normal));
    }
    for i in 0..segments {
        let a = i * 2;
        let (b, c, d) = (a + 1, a + 2, a + 3);
        mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
    }

    // Caps
    for (y, normal) in [(1.0, Vec3::Y), (-1.0, Vec3::NEG_Y)] {
        let center = mesh.vertices.len() as u32;
        mesh.vertices.push(Vertex::new(Vec3::new(0.0, y, 0.0), normal));
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.vertices.push(Vertex::new(Vec3::new(sin, y, cos), normal));
        }
        for i in 0..segments {
            let a = center + 1 + i;
            if y > 0.0 {
                mesh.indices.extend_from_slice(&[center, a, a + 1]);
            } else {
                mesh.indices.extend_from_slice(&[center, a + 1, a]);
            }
        }
    }
    mesh
}

fn disc(segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::default();

    mesh.vertices.push(Vertex::new(Vec3::ZERO, Vec3::Z));
    for i in 0..=segments {
        let theta = i as f32 / segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        mesh.vertices.push(Vertex::new(Vec3::new(cos, sin, 0.0), Vec3::Z));
    }
    for i in 0..segments {
        mesh.indices.extend_from_slice(&[0, i + 1, i + 2]);
    }
    mesh
}

fn quad() -> MeshData {
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    MeshData {
        vertices: corners
            .iter()
            .map(|&(x, y)| Vertex::new(Vec3::new(x, y, 0.0), Vec3::Z))
            .collect(),
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}
