use bytemuck::{Pod, Zeroable};

/// Per-cube render data written to the shared buffer for the JS renderer.
/// Must match the JS protocol: 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct CubeInstance {
    /// Center in world space.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Edge length in world units.
    pub size: f32,
    /// Euler rotation (radians), applied X then Y then Z.
    pub rot_x: f32,
    pub rot_y: f32,
    pub rot_z: f32,
    /// HSB colour (hue 0-360, saturation/brightness 0-100).
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    /// Active glyph nodes as an 8-bit mask.
    pub points_mask: f32,
    /// Stroke weight in pixels.
    pub stroke: f32,
}

impl CubeInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer containing all cube instances for one frame.
/// Instances are stored in draw order.
pub struct RenderBuffer {
    pub instances: Vec<CubeInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: CubeInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Instance data as a flat float slice.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for shared-buffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
