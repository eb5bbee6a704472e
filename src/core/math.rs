// Math utilities and conversions between the physics and scene math types
//
// rapier3d speaks nalgebra, the scene and renderer speak glam. Conversions
// happen here so neither side needs to know about the other.

use glam::{Quat, Vec3};
use rapier3d::prelude::{Isometry, Real, Rotation, Vector};

/// Convert a physics vector into a scene vector
pub fn to_vec3(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// Convert a physics rotation into a scene rotation
pub fn to_quat(q: &Rotation<Real>) -> Quat {
    let c = q.coords;
    Quat::from_xyzw(c.x, c.y, c.z, c.w)
}

/// Split a physics pose into scene translation and rotation
pub fn from_isometry(iso: &Isometry<Real>) -> (Vec3, Quat) {
    (to_vec3(&iso.translation.vector), to_quat(&iso.rotation))
}
