// Driving tuning - every gameplay constant in one place
//
// Every field can be overridden from the config file; missing fields keep
// the values in `BASE_TUNING`.

use serde::Deserialize;

/// Gameplay constants for the car, the controls and the collectibles
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DrivingTuning {
    // Controls
    /// Speed added by one accelerate key-down (subtracted by brake)
    pub speed_step: f32,
    /// Lateral offset per update while a steering key is held
    pub steer_step: f32,
    /// Fraction of speed converted into forward velocity each update
    pub speed_to_velocity: f32,
    /// Multiplier applied to speed after every update
    pub friction: f32,

    // Physics
    /// Vertical gravity (m/s²)
    pub gravity: f32,
    /// Car mass (kg)
    pub car_mass: f32,
    /// Car collider half extents (x, y, z)
    pub car_half_extents: [f32; 3],
    /// Car spawn position
    pub car_spawn: [f32; 3],
    /// Contact friction of the ground and the car
    pub surface_friction: f32,
    /// Linear damping of the car body
    pub linear_damping: f32,

    // Collectibles
    /// Lateral spread of collectibles, centered on the track
    pub lateral_spread: f32,
    /// Distance between initial collectibles
    pub point_spacing: f32,
    /// Distance ahead of the car where collectibles respawn
    pub respawn_ahead: f32,
    /// Random extra distance added on respawn
    pub respawn_jitter: f32,
    /// Delay between pickup and respawn (milliseconds)
    pub respawn_delay_ms: u64,
}

/// The tuning used unless the config file says otherwise
pub const BASE_TUNING: DrivingTuning = DrivingTuning {
    // Controls
    speed_step: 2.0,
    steer_step: 0.05,
    speed_to_velocity: 0.01,
    friction: 0.95,

    // Physics
    gravity: -9.82,
    car_mass: 150.0,
    car_half_extents: [1.0, 0.5, 2.0],
    car_spawn: [0.0, 1.0, 0.0],
    surface_friction: 0.3,
    linear_damping: 0.01,

    // Collectibles
    lateral_spread: 20.0,
    point_spacing: 20.0,
    respawn_ahead: 100.0,
    respawn_jitter: 50.0,
    respawn_delay_ms: 500,
};

impl Default for DrivingTuning {
    fn default() -> Self {
        BASE_TUNING
    }
}
