// Engine modules: frame timing, input, physics, scene, rendering

pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod scene;
pub mod timer;
