// Chase camera that trails the car

use glam::Vec3;

use crate::engine::renderer::Camera;

/// Camera height above the ground
pub const CAMERA_HEIGHT: f32 = 8.0;
/// How far behind the car the camera sits
pub const FOLLOW_DISTANCE: f32 = 15.0;
/// How far ahead of the car the camera looks
pub const LOOK_AHEAD: f32 = 20.0;
/// Height of the look-at point
pub const LOOK_HEIGHT: f32 = 1.0;

/// Where the camera sits before the car has moved
pub const INITIAL_POSITION: Vec3 = Vec3::new(0.0, CAMERA_HEIGHT, -FOLLOW_DISTANCE);
/// Where the camera looks before the car has moved
pub const INITIAL_TARGET: Vec3 = Vec3::new(0.0, 0.0, LOOK_AHEAD);

/// Camera position for a car at `car`
pub fn chase_position(car: Vec3) -> Vec3 {
    Vec3::new(car.x, CAMERA_HEIGHT, car.z - FOLLOW_DISTANCE)
}

/// Look-at point for a car at `car`
pub fn chase_target(car: Vec3) -> Vec3 {
    Vec3::new(car.x, LOOK_HEIGHT, car.z + LOOK_AHEAD)
}

/// Move `camera` behind the car and point it down the track
pub fn follow(camera: &mut Camera, car: Vec3) {
    camera.set_position(chase_position(car));
    camera.look_at(chase_target(car));
}
