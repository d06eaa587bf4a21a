// extensions/mod.rs
//
// Optional helpers decoupled from the game loop.
// Games opt in by calling them directly.

pub mod easing;

pub use easing::{Easing, lerp, lerp_vec3, ease};
