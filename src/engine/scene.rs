// Scene graph: the visual side of the game world
//
// Objects are never removed, only hidden, so an `ObjectId` stays valid for the
// lifetime of the scene.

use glam::{Mat4, Quat, Vec3};
use parry3d::bounding_volume::{Aabb, BoundingVolume};
use parry3d::math::Point;

/// Index of an object inside a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Create a color from sRGB components in 0..=1
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a `0xRRGGBB` literal
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Convert to linear RGB for shading
    pub fn to_linear(self) -> [f32; 3] {
        fn decode(c: f32) -> f32 {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        [decode(self.r), decode(self.g), decode(self.b)]
    }
}

/// Geometry of a scene object, in its local frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Axis-aligned box centered at the origin
    Cuboid { half_extents: Vec3 },
    /// Cylinder along local Y, centered at the origin
    Cylinder {
        radius: f32,
        half_height: f32,
        segments: u32,
    },
    /// Flat disc in the local XY plane, facing +Z
    Disc { radius: f32, segments: u32 },
    /// Flat rectangle in the local XY plane, facing +Z
    Plane { half_width: f32, half_height: f32 },
}

impl Shape {
    /// Half extents of the local bounding box
    pub fn local_half_extents(&self) -> Vec3 {
        match *self {
            Shape::Cuboid { half_extents } => half_extents,
            Shape::Cylinder {
                radius,
                half_height,
                ..
            } => Vec3::new(radius, half_height, radius),
            Shape::Disc { radius, .. } => Vec3::new(radius, radius, 0.0),
            Shape::Plane {
                half_width,
                half_height,
            } => Vec3::new(half_width, half_height, 0.0),
        }
    }
}

/// Position and orientation of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_translation(Vec3::ZERO)
    }
}

/// A renderable object
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub shape: Shape,
    pub transform: Transform,
    pub color: Color,
    pub visible: bool,
}

impl SceneObject {
    pub fn new(shape: Shape, transform: Transform, color: Color) -> Self {
        Self {
            shape,
            transform,
            color,
            visible: true,
        }
    }

    /// World-space axis-aligned bounding box
    ///
    /// The eight corners of the local bounding box are transformed into world
    /// space and re-boxed, so a rotated object gets a conservative box.
    pub fn world_aabb(&self) -> Aabb {
        let half = self.shape.local_half_extents();
        let mut aabb = Aabb::new_invalid();
        for sx in [-1.0, 1.0] {
            for sy in [-1.0, 1.0] {
                for sz in [-1.0, 1.0] {
                    let local = half * Vec3::new(sx, sy, sz);
                    let world = self.transform.translation + self.transform.rotation * local;
                    aabb.take_point(Point::new(world.x, world.y, world.z));
                }
            }
        }
        aabb
    }

    /// Whether this object's world box touches or overlaps `other`'s
    pub fn overlaps(&self, other: &SceneObject) -> bool {
        self.world_aabb().intersects(&other.world_aabb())
    }

    /// Translation * rotation; shape scale is applied by the renderer
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.transform.rotation, self.transform.translation)
    }
}

/// Ambient plus one directional light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient_color: Color,
    pub ambient_intensity: f32,
    pub directional_color: Color,
    pub directional_intensity: f32,
    /// Light position; it shines toward the origin
    pub directional_position: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient_color: Color::WHITE,
            ambient_intensity: 0.6,
            directional_color: Color::WHITE,
            directional_intensity: 0.8,
            directional_position: Vec3::new(10.0, 20.0, -10.0),
        }
    }
}

impl Lighting {
    /// Unit vector pointing from the lit surface toward the light
    pub fn direction_to_light(&self) -> Vec3 {
        self.directional_position.normalize_or_zero()
    }
}

/// The visual world
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Color,
    pub lighting: Lighting,
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new(background: Color, lighting: Lighting) -> Self {
        Self {
            background,
            lighting,
            objects: Vec::new(),
        }
    }

    /// Add an object and return its id
    pub fn add(&mut self, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0)
    }

    /// Objects that should be drawn this frame
    pub fn visible_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|object| object.visible)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn unit_box_at(translation: Vec3) -> SceneObject {
        SceneObject::new(
            Shape::Cuboid {
                half_extents: Vec3::ONE,
            },
            Transform::from_translation(translation),
            Color::WHITE,
        )
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex(0x5555ff);
        assert_relative_eq!(c.r, 85.0 / 255.0);
        assert_relative_eq!(c.g, 85.0 / 255.0);
        assert_relative_eq!(c.b, 1.0);
    }

    #[test]
    fn test_linear_conversion_endpoints() {
        assert_eq!(Color::rgb(0.0, 0.0, 0.0).to_linear(), [0.0, 0.0, 0.0]);
        let white = Color::WHITE.to_linear();
        assert_relative_eq!(white[0], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_box_aabb() {
        let aabb = unit_box_at(Vec3::new(2.0, 0.0, 0.0)).world_aabb();
        assert_relative_eq!(aabb.mins.x, 1.0);
        assert_relative_eq!(aabb.maxs.x, 3.0);
        assert_relative_eq!(aabb.mins.y, -1.0);
    }

    #[test]
    fn test_flat_disc_aabb_lies_on_xz() {
        let disc = SceneObject::new(
            Shape::Disc {
                radius: 1.0,
                segments: 32,
            },
            Transform::from_translation(Vec3::new(0.0, 0.06, 20.0))
                .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            Color::WHITE,
        );
        let aabb = disc.world_aabb();

        assert_relative_eq!(aabb.mins.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(aabb.maxs.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(aabb.mins.y, 0.06, epsilon = 1e-5);
        assert_relative_eq!(aabb.maxs.y, 0.06, epsilon = 1e-5);
        assert_relative_eq!(aabb.mins.z, 19.0, epsilon = 1e-5);
        assert_relative_eq!(aabb.maxs.z, 21.0, epsilon = 1e-5);
    }

    #[test]
    fn test_rotated_box_aabb_grows() {
        let mut object = unit_box_at(Vec3::ZERO);
        object.transform.rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
        let aabb = object.world_aabb();
        assert_relative_eq!(aabb.maxs.x, 2.0_f32.sqrt(), epsilon = 1e-5);
    }

    #[test]
    fn test_overlap_and_touching() {
        let a = unit_box_at(Vec3::ZERO);
        assert!(a.overlaps(&unit_box_at(Vec3::new(1.5, 0.0, 0.0))));
        // Touching faces count as an overlap
        assert!(a.overlaps(&unit_box_at(Vec3::new(2.0, 0.0, 0.0))));
        assert!(!a.overlaps(&unit_box_at(Vec3::new(2.1, 0.0, 0.0))));
    }

    #[test]
    fn test_scene_hides_objects() {
        let mut scene = Scene::new(Color::WHITE, Lighting::default());
        let a = scene.add(unit_box_at(Vec3::ZERO));
        scene.add(unit_box_at(Vec3::X));
        assert_eq!(scene.visible_objects().count(), 2);

        scene.get_mut(a).unwrap().visible = false;
        assert_eq!(scene.visible_objects().count(), 1);
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn test_light_direction() {
        let dir = Lighting::default().direction_to_light();
        assert_relative_eq!(dir.length(), 1.0, epsilon = 1e-6);
        assert!(dir.y > 0.0);
    }
}
