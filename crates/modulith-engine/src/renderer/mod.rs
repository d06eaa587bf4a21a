pub mod instance;
pub mod camera;
pub mod orbit;
pub mod traits;

// Re-export key types for convenient access
pub use traits::Renderer;
