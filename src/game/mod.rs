// Game logic: the driving mini-game
//
// `Game` owns the physics world, the scene and the camera. Every fixed update
// runs the same sequence:
//
// 1. respawn points whose timers expired
// 2. step physics
// 3. push speed and steering into the car body
// 4. decay speed
// 5. mirror the body onto the car mesh and wheels
// 6. move the chase camera
// 7. pick up overlapped points
//
// Rendering is not part of the update; the driver draws `scene()` from
// `camera()` once per displayed frame.

pub mod car;
pub mod chase_camera;
pub mod collectibles;
pub mod score;
pub mod tuning;

use glam::{Quat, Vec3};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::FRAC_PI_2;
use std::time::Instant;

use crate::core::config::GameConfig;
use crate::engine::input::InputEvent;
use crate::engine::physics::{presets, PhysicsWorld, RigidBodyHandle, Vector};
use crate::engine::renderer::Camera;
use crate::engine::scene::{
    Color, Lighting, ObjectId, Scene, SceneObject, Shape, Transform,
};

use car::{Car, ControlState};
use collectibles::Collectibles;
use score::Score;
use tuning::DrivingTuning;

/// Sky color behind the track
pub const BACKGROUND_COLOR: u32 = 0x5555ff;
/// Visual ground size (the physics ground is infinite)
pub const GROUND_WIDTH: f32 = 30.0;
pub const GROUND_LENGTH: f32 = 2000.0;
const GROUND_COLOR: u32 = 0x111111;

/// Errors raised while updating the game
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Car body {0:?} is missing from the physics world")]
    MissingBody(RigidBodyHandle),

    #[error("Scene object {0:?} is missing")]
    MissingObject(ObjectId),
}

/// The whole game state
pub struct Game {
    tuning: DrivingTuning,
    physics: PhysicsWorld,
    scene: Scene,
    camera: Camera,
    car: Car,
    controls: ControlState,
    collectibles: Collectibles,
    score: Score,
    rng: StdRng,
}

impl Game {
    /// Build the world for a viewport of `width` x `height` pixels
    pub fn new(config: &GameConfig, width: u32, height: u32) -> Result<Self, GameError> {
        let tuning = config.tuning.clone();
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut physics = PhysicsWorld::with_gravity(Vector::new(0.0, tuning.gravity, 0.0));
        let mut scene = Scene::new(Color::from_hex(BACKGROUND_COLOR), Lighting::default());

        // Ground
        let ground = physics.add_rigid_body(presets::ground_body());
        physics.add_collider(presets::ground_collider(tuning.surface_friction), ground);
        scene.add(SceneObject::new(
            Shape::Plane {
                half_width: GROUND_WIDTH / 2.0,
                half_height: GROUND_LENGTH / 2.0,
            },
            Transform::default().with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            Color::from_hex(GROUND_COLOR),
        ));

        let car = Car::spawn(&mut physics, &mut scene, &tuning);
        let collectibles = Collectibles::spawn(&mut scene, &tuning, &mut rng);

        let camera = Camera::new(
            chase_camera::INITIAL_POSITION,
            chase_camera::INITIAL_TARGET,
            width as f32,
            height as f32,
        );

        car.sync_visuals(&physics, &mut scene)?;

        info!(
            "Game initialized: {} scene objects, {} physics bodies",
            scene.len(),
            physics.body_count()
        );

        Ok(Self {
            tuning,
            physics,
            scene,
            camera,
            car,
            controls: ControlState::default(),
            collectibles,
            score: Score::new(),
            rng,
        })
    }

    /// Apply a key event to the controls
    pub fn handle_input(&mut self, event: InputEvent) {
        self.controls.apply_input(event, &self.tuning);
    }

    /// Run one fixed update at monotonic time `now`
    pub fn update(&mut self, now: Instant) -> Result<(), GameError> {
        let car_z = self.car.position(&self.physics)?.z;
        self.collectibles.respawn_due(
            &mut self.scene,
            car_z,
            now,
            &self.tuning,
            &mut self.rng,
        )?;

        self.physics.step();

        self.car
            .apply_controls(&mut self.physics, &self.controls, &self.tuning)?;
        self.controls.decay(self.tuning.friction);

        let car_position = self.car.sync_visuals(&self.physics, &mut self.scene)?;
        chase_camera::follow(&mut self.camera, car_position);

        let picked = self
            .collectibles
            .check_pickups(&mut self.scene, self.car.mesh, now, &self.tuning)?;
        for _ in 0..picked {
            self.score.increment();
            info!("{}", self.score.text());
        }

        Ok(())
    }

    /// Track a new viewport size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width as f32, height as f32);
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn controls(&self) -> ControlState {
        self.controls
    }

    /// Current car position
    pub fn car_position(&self) -> Result<Vec3, GameError> {
        self.car.position(&self.physics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use approx::assert_relative_eq;
    use std::time::Duration;

    fn seeded_game() -> Game {
        let config = GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        };
        Game::new(&config, 800, 600).unwrap()
    }

    fn press(game: &mut Game, action: Action) {
        game.handle_input(InputEvent {
            action,
            pressed: true,
        });
    }

    fn release(game: &mut Game, action: Action) {
        game.handle_input(InputEvent {
            action,
            pressed: false,
        });
    }

    fn point_object(game: &Game, index: usize) -> &SceneObject {
        let id = game.collectibles.point(index).unwrap();
        game.scene.get(id).unwrap()
    }

    /// Put the car on the ground, at rest, at (x, z)
    fn place_car(game: &mut Game, x: f32, z: f32) {
        let body = game.physics.get_rigid_body_mut(game.car.body_handle).unwrap();
        body.set_translation(Vector::new(x, 0.5, z), true);
        body.set_linvel(Vector::zeros(), true);
    }

    #[test]
    fn test_initial_world() {
        let game = seeded_game();

        // Ground + car + 4 wheels + 9 points
        assert_eq!(game.scene().len(), 1 + 1 + car::WHEEL_COUNT + collectibles::POINT_COUNT);
        assert_eq!(game.scene().background, Color::from_hex(0x5555ff));
        assert_eq!(game.score().points(), 0);
        assert_eq!(game.controls(), ControlState::default());
        assert_eq!(game.car_position().unwrap(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(game.camera().position(), Vec3::new(0.0, 8.0, -15.0));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = seeded_game();
        let b = seeded_game();
        for i in 0..collectibles::POINT_COUNT {
            assert_eq!(
                point_object(&a, i).transform.translation,
                point_object(&b, i).transform.translation
            );
        }
    }

    #[test]
    fn test_speed_decays_each_update() {
        let mut game = seeded_game();
        press(&mut game, Action::Accelerate);
        assert_eq!(game.controls().speed, 2.0);

        let start = Instant::now();
        let mut expected = 2.0_f32;
        for frame in 0..20 {
            game.update(start + Duration::from_millis(16 * frame)).unwrap();
            expected *= 0.95;
            assert_relative_eq!(game.controls().speed, expected, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_steering_moves_car_while_held() {
        let mut game = seeded_game();
        let start = Instant::now();
        game.update(start).unwrap();

        press(&mut game, Action::SteerLeft);
        let before = game.car_position().unwrap().x;
        game.update(start).unwrap();
        let after = game.car_position().unwrap().x;
        // Physics adds no lateral motion to a car resting on flat ground
        assert_relative_eq!(after - before, -0.05, epsilon = 1e-3);

        release(&mut game, Action::SteerLeft);
        assert_eq!(game.controls().steering, 0.0);
    }

    #[test]
    fn test_camera_follows_car() {
        let mut game = seeded_game();
        place_car(&mut game, 2.0, 50.0);
        game.update(Instant::now()).unwrap();

        let car = game.car_position().unwrap();
        let camera = game.camera();
        assert_relative_eq!(camera.position().x, car.x, epsilon = 1e-5);
        assert_relative_eq!(camera.position().y, 8.0);
        assert_relative_eq!(camera.position().z, car.z - 15.0, epsilon = 1e-4);
        assert_relative_eq!(camera.target().y, 1.0);
        assert_relative_eq!(camera.target().z, car.z + 20.0, epsilon = 1e-4);
    }

    #[test]
    fn test_pickup_scores_and_respawns_ahead() {
        let mut game = seeded_game();
        let target = point_object(&game, 3).transform.translation;
        assert!(point_object(&game, 3).visible);

        place_car(&mut game, target.x, target.z);
        let start = Instant::now();
        game.update(start).unwrap();

        assert!(!point_object(&game, 3).visible);
        assert_eq!(game.score().points(), 1);
        assert_eq!(game.score().text(), "Points: 1");

        // Sitting on the hidden point neither scores again nor brings it back
        game.update(start + Duration::from_millis(250)).unwrap();
        game.update(start + Duration::from_millis(499)).unwrap();
        assert!(!point_object(&game, 3).visible);
        assert_eq!(game.score().points(), 1);

        game.update(start + Duration::from_millis(500)).unwrap();
        let point = point_object(&game, 3);
        assert!(point.visible);
        assert!(point.transform.translation.z >= target.z + 100.0);
        assert_eq!(game.score().points(), 1);
    }

    #[test]
    fn test_resize_updates_camera_aspect() {
        let mut game = seeded_game();
        assert_relative_eq!(game.camera().aspect(), 800.0 / 600.0);

        game.resize(1024, 768);
        assert_relative_eq!(game.camera().aspect(), 1024.0 / 768.0);
    }
}
