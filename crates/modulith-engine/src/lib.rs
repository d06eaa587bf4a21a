pub mod api;
pub mod core;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;
pub mod glyph;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{EntityId, SoundEvent, GameEvent};
pub use core::rng::Rng;
pub use core::schedule::TimerQueue;
pub use core::time::{FixedTimestep, GameClock};
pub use renderer::instance::{CubeInstance, RenderBuffer};
pub use renderer::camera::Camera3D;
pub use renderer::orbit::{OrbitConfig, OrbitController};
pub use renderer::Renderer;
pub use input::queue::{keys, InputEvent, InputQueue};
pub use bridge::protocol::ProtocolLayout;
pub use glyph::{char_code, points_of, style_of, hsb_to_css, HsbColor, PointSet, NODE_POSITIONS};

// Extensions: decoupled optional helpers
pub use extensions::{Easing, lerp, lerp_vec3, ease};
