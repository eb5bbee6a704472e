// The player's car: a physics body mirrored by a box mesh, plus four
// decorative wheels that follow it

use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;

use crate::core::math;
use crate::engine::input::{Action, InputEvent};
use crate::engine::physics::{presets, PhysicsWorld, RigidBodyHandle};
use crate::engine::scene::{Color, ObjectId, Scene, SceneObject, Shape, Transform};

use super::tuning::DrivingTuning;
use super::GameError;

pub const WHEEL_COUNT: usize = 4;
pub const WHEEL_RADIUS: f32 = 0.5;
pub const WHEEL_WIDTH: f32 = 0.3;
const WHEEL_SEGMENTS: u32 = 16;
/// Wheels are not simulated and stay at this height
pub const WHEEL_HEIGHT: f32 = 0.5;

const CAR_COLOR: u32 = 0x808080;
const WHEEL_COLOR: u32 = 0x222222;

/// Player controls accumulated from key events
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlState {
    /// Forward impulse; decays every update, unbounded
    pub speed: f32,
    /// Lateral offset applied every update while a steering key is down
    pub steering: f32,
}

impl ControlState {
    /// Apply one key event
    pub fn apply_input(&mut self, event: InputEvent, tuning: &DrivingTuning) {
        match (event.action, event.pressed) {
            (Action::Accelerate, true) => self.speed += tuning.speed_step,
            (Action::Brake, true) => self.speed -= tuning.speed_step,
            (Action::SteerLeft, true) => self.steering = -tuning.steer_step,
            (Action::SteerRight, true) => self.steering = tuning.steer_step,
            // Releasing either steering key straightens out
            (action, false) if action.is_steering() => self.steering = 0.0,
            _ => {}
        }
    }

    /// Apply rolling friction to the speed
    pub fn decay(&mut self, friction: f32) {
        self.speed *= friction;
    }
}

/// Offset of wheel `index` from the car, on the ground plane
pub fn wheel_offset(index: usize) -> Vec3 {
    let x = if index < 2 { -1.2 } else { 1.2 };
    let z = if index % 2 == 0 { -1.5 } else { 1.5 };
    Vec3::new(x, 0.0, z)
}

/// World position of wheel `index` for a car at `car`
pub fn wheel_position(car: Vec3, index: usize) -> Vec3 {
    let offset = wheel_offset(index);
    Vec3::new(car.x + offset.x, WHEEL_HEIGHT, car.z + offset.z)
}

/// The car entity
#[derive(Debug)]
pub struct Car {
    /// Handle to the car's rigid body in the physics world
    pub body_handle: RigidBodyHandle,
    /// Box mesh mirroring the body
    pub mesh: ObjectId,
    /// Decorative wheel meshes
    pub wheels: [ObjectId; WHEEL_COUNT],
}

impl Car {
    /// Create the car body in `physics` and its meshes in `scene`
    pub fn spawn(physics: &mut PhysicsWorld, scene: &mut Scene, tuning: &DrivingTuning) -> Self {
        let [x, y, z] = tuning.car_spawn;
        let body_handle =
            physics.add_rigid_body(presets::car_body(x, y, z, tuning.linear_damping));
        physics.add_collider(
            presets::car_collider(
                tuning.car_half_extents,
                tuning.car_mass,
                tuning.surface_friction,
            ),
            body_handle,
        );

        let spawn = Vec3::from(tuning.car_spawn);
        let mesh = scene.add(SceneObject::new(
            Shape::Cuboid {
                half_extents: Vec3::from(tuning.car_half_extents),
            },
            Transform::from_translation(spawn),
            Color::from_hex(CAR_COLOR),
        ));

        let wheel_shape = Shape::Cylinder {
            radius: WHEEL_RADIUS,
            half_height: WHEEL_WIDTH / 2.0,
            segments: WHEEL_SEGMENTS,
        };
        let wheels = std::array::from_fn(|i| {
            scene.add(SceneObject::new(
                wheel_shape,
                Transform::from_translation(wheel_position(spawn, i))
                    .with_rotation(Quat::from_rotation_z(FRAC_PI_2)),
                Color::from_hex(WHEEL_COLOR),
            ))
        });

        Self {
            body_handle,
            mesh,
            wheels,
        }
    }

    /// Push the controls into the body: speed adds forward velocity,
    /// steering shifts the body sideways directly
    pub fn apply_controls(
        &self,
        physics: &mut PhysicsWorld,
        controls: &ControlState,
        tuning: &DrivingTuning,
    ) -> Result<(), GameError> {
        let body = physics
            .get_rigid_body_mut(self.body_handle)
            .ok_or(GameError::MissingBody(self.body_handle))?;

        let mut linvel = *body.linvel();
        linvel.z += controls.speed * tuning.speed_to_velocity;
        body.set_linvel(linvel, true);

        let mut translation = *body.translation();
        translation.x += controls.steering;
        body.set_translation(translation, true);

        Ok(())
    }

    /// Copy the body pose onto the car mesh, move the wheels along, and
    /// return the car position
    pub fn sync_visuals(&self, physics: &PhysicsWorld, scene: &mut Scene) -> Result<Vec3, GameError> {
        let body = physics
            .get_rigid_body(self.body_handle)
            .ok_or(GameError::MissingBody(self.body_handle))?;
        let (translation, rotation) = math::from_isometry(body.position());

        let mesh = scene
            .get_mut(self.mesh)
            .ok_or(GameError::MissingObject(self.mesh))?;
        mesh.transform.translation = translation;
        mesh.transform.rotation = rotation;

        for (i, &wheel) in self.wheels.iter().enumerate() {
            let wheel_mesh = scene
                .get_mut(wheel)
                .ok_or(GameError::MissingObject(wheel))?;
            wheel_mesh.transform.translation = wheel_position(translation, i);
        }

        Ok(translation)
    }

    /// Current body position
    pub fn position(&self, physics: &PhysicsWorld) -> Result<Vec3, GameError> {
        physics
            .get_rigid_body(self.body_handle)
            .map(|body| math::to_vec3(body.translation()))
            .ok_or(GameError::MissingBody(self.body_handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::Vector;
    use crate::engine::scene::Lighting;
    use approx::assert_relative_eq;

    fn press(action: Action) -> InputEvent {
        InputEvent {
            action,
            pressed: true,
        }
    }

    fn release(action: Action) -> InputEvent {
        InputEvent {
            action,
            pressed: false,
        }
    }

    fn spawn_car() -> (PhysicsWorld, Scene, Car) {
        let mut physics = PhysicsWorld::new();
        let mut scene = Scene::new(Color::WHITE, Lighting::default());
        let car = Car::spawn(&mut physics, &mut scene, &DrivingTuning::default());
        (physics, scene, car)
    }

    #[test]
    fn test_speed_keys_accumulate_without_clamp() {
        let tuning = DrivingTuning::default();
        let mut controls = ControlState::default();

        for _ in 0..50 {
            controls.apply_input(press(Action::Accelerate), &tuning);
        }
        assert_eq!(controls.speed, 100.0);

        controls.apply_input(press(Action::Brake), &tuning);
        assert_eq!(controls.speed, 98.0);

        // Releasing a speed key does nothing
        controls.apply_input(release(Action::Accelerate), &tuning);
        assert_eq!(controls.speed, 98.0);
    }

    #[test]
    fn test_steering_set_and_cleared() {
        let tuning = DrivingTuning::default();
        let mut controls = ControlState::default();

        controls.apply_input(press(Action::SteerLeft), &tuning);
        assert_eq!(controls.steering, -0.05);
        controls.apply_input(press(Action::SteerRight), &tuning);
        assert_eq!(controls.steering, 0.05);

        // Key-up of either steering key zeroes steering
        controls.apply_input(release(Action::SteerLeft), &tuning);
        assert_eq!(controls.steering, 0.0);
    }

    #[test]
    fn test_speed_decays_toward_zero() {
        let mut controls = ControlState {
            speed: 2.0,
            steering: 0.0,
        };

        controls.decay(0.95);
        assert_relative_eq!(controls.speed, 1.9);

        for _ in 0..500 {
            let before = controls.speed;
            controls.decay(0.95);
            assert_relative_eq!(controls.speed, before * 0.95);
        }
        assert!(controls.speed.abs() < 1e-9);
    }

    #[test]
    fn test_wheel_offsets() {
        assert_eq!(wheel_offset(0), Vec3::new(-1.2, 0.0, -1.5));
        assert_eq!(wheel_offset(1), Vec3::new(-1.2, 0.0, 1.5));
        assert_eq!(wheel_offset(2), Vec3::new(1.2, 0.0, -1.5));
        assert_eq!(wheel_offset(3), Vec3::new(1.2, 0.0, 1.5));
    }

    #[test]
    fn test_spawn_creates_body_and_meshes() {
        let (physics, scene, car) = spawn_car();

        assert_eq!(physics.body_count(), 1);
        let body = physics.get_rigid_body(car.body_handle).unwrap();
        assert_eq!(body.colliders().len(), 1);
        assert_eq!(scene.len(), 1 + WHEEL_COUNT);
        assert_eq!(
            car.position(&physics).unwrap(),
            Vec3::new(0.0, 1.0, 0.0)
        );
    }

    #[test]
    fn test_accelerate_once_adds_forward_velocity() {
        let tuning = DrivingTuning::default();
        let (mut physics, _scene, car) = spawn_car();
        let mut controls = ControlState::default();
        controls.apply_input(press(Action::Accelerate), &tuning);

        let before = *physics.get_rigid_body(car.body_handle).unwrap().linvel();
        let x_before = car.position(&physics).unwrap().x;

        car.apply_controls(&mut physics, &controls, &tuning).unwrap();

        let after = *physics.get_rigid_body(car.body_handle).unwrap().linvel();
        assert_relative_eq!(after.z - before.z, 0.02, epsilon = 1e-6);
        assert_eq!(car.position(&physics).unwrap().x, x_before);
    }

    #[test]
    fn test_steering_shifts_body_exactly() {
        let tuning = DrivingTuning::default();
        let (mut physics, _scene, car) = spawn_car();
        let mut controls = ControlState::default();
        controls.apply_input(press(Action::SteerRight), &tuning);

        for frame in 1..=3 {
            car.apply_controls(&mut physics, &controls, &tuning).unwrap();
            let x = car.position(&physics).unwrap().x;
            assert_relative_eq!(x, 0.05 * frame as f32, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_sync_copies_pose_and_places_wheels() {
        let (mut physics, mut scene, car) = spawn_car();
        {
            let body = physics.get_rigid_body_mut(car.body_handle).unwrap();
            body.set_translation(Vector::new(2.0, 0.5, 30.0), true);
        }

        let position = car.sync_visuals(&physics, &mut scene).unwrap();

        assert_eq!(position, Vec3::new(2.0, 0.5, 30.0));
        assert_eq!(
            scene.get(car.mesh).unwrap().transform.translation,
            Vec3::new(2.0, 0.5, 30.0)
        );
        let wheel = |i: usize| scene.get(car.wheels[i]).unwrap().transform.translation;
        assert!(wheel(0).abs_diff_eq(Vec3::new(0.8, 0.5, 28.5), 1e-5));
        assert!(wheel(3).abs_diff_eq(Vec3::new(3.2, 0.5, 31.5), 1e-5));
    }
}
