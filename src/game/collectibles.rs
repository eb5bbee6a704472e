// Collectible points scattered along the track
//
// Points are never removed. A picked-up point is hidden and a respawn timer
// brings it back further down the track.

use glam::{Quat, Vec3};
use log::debug;
use rand::Rng;
use std::f32::consts::FRAC_PI_2;
use std::time::{Duration, Instant};

use crate::engine::scene::{Color, ObjectId, Scene, SceneObject, Shape, Transform};
use crate::engine::timer::TimerQueue;

use super::tuning::DrivingTuning;
use super::GameError;

/// Number of points on the track at any time
pub const POINT_COUNT: usize = 9;
/// Points float just above the ground to avoid z-fighting
pub const POINT_HEIGHT: f32 = 0.06;
pub const POINT_RADIUS: f32 = 1.0;
const POINT_SEGMENTS: u32 = 32;
const POINT_COLOR: u32 = 0xffff00;

/// A respawn waiting on its timer
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingRespawn {
    index: usize,
    /// Forward position where the point was picked up
    picked_at_z: f32,
}

/// Random lateral position, centered on the track
fn lateral_offset<R: Rng>(rng: &mut R, spread: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * spread
}

/// The track's collectible points
#[derive(Debug)]
pub struct Collectibles {
    points: [ObjectId; POINT_COUNT],
    respawns: TimerQueue<PendingRespawn>,
}

impl Collectibles {
    /// Place the points at fixed forward intervals with random lateral offsets
    pub fn spawn<R: Rng>(scene: &mut Scene, tuning: &DrivingTuning, rng: &mut R) -> Self {
        let points = std::array::from_fn(|i| {
            let z = tuning.point_spacing * (i + 1) as f32;
            let x = lateral_offset(&mut *rng, tuning.lateral_spread);
            scene.add(SceneObject::new(
                Shape::Disc {
                    radius: POINT_RADIUS,
                    segments: POINT_SEGMENTS,
                },
                Transform::from_translation(Vec3::new(x, POINT_HEIGHT, z))
                    .with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
                Color::from_hex(POINT_COLOR),
            ))
        });

        Self {
            points,
            respawns: TimerQueue::new(),
        }
    }

    /// Scene object of point `index`
    pub fn point(&self, index: usize) -> Option<ObjectId> {
        self.points.get(index).copied()
    }

    /// Number of points hidden and waiting to respawn
    pub fn pending(&self) -> usize {
        self.respawns.len()
    }

    /// Hide every visible point the car touches and schedule its respawn
    ///
    /// Returns the number of points picked up.
    pub fn check_pickups(
        &mut self,
        scene: &mut Scene,
        car_mesh: ObjectId,
        now: Instant,
        tuning: &DrivingTuning,
    ) -> Result<u32, GameError> {
        let car_box = scene
            .get(car_mesh)
            .ok_or(GameError::MissingObject(car_mesh))?
            .clone();
        let delay = Duration::from_millis(tuning.respawn_delay_ms);

        let mut picked = 0;
        for (index, &id) in self.points.iter().enumerate() {
            let point = scene.get_mut(id).ok_or(GameError::MissingObject(id))?;
            if !point.visible || !car_box.overlaps(point) {
                continue;
            }

            point.visible = false;
            picked += 1;
            self.respawns.schedule(
                PendingRespawn {
                    index,
                    picked_at_z: point.transform.translation.z,
                },
                now,
                delay,
            );
        }
        Ok(picked)
    }

    /// Bring back every point whose respawn timer has expired
    ///
    /// A point reappears ahead of the car, and always ahead of where it was
    /// picked up, even if the car has since backed up. Returns the number of
    /// points respawned.
    pub fn respawn_due<R: Rng>(
        &mut self,
        scene: &mut Scene,
        car_z: f32,
        now: Instant,
        tuning: &DrivingTuning,
        rng: &mut R,
    ) -> Result<usize, GameError> {
        let due = self.respawns.drain_due(now);
        for pending in &due {
            let id = self.points[pending.index];
            let point = scene.get_mut(id).ok_or(GameError::MissingObject(id))?;

            let base = car_z.max(pending.picked_at_z);
            let x = lateral_offset(rng, tuning.lateral_spread);
            let z = base + tuning.respawn_ahead + rng.gen::<f32>() * tuning.respawn_jitter;

            point.transform.translation = Vec3::new(x, POINT_HEIGHT, z);
            point.visible = true;
            debug!("Point {} respawned at ({:.1}, {:.1})", pending.index, x, z);
        }
        Ok(due.len())
    }
}
