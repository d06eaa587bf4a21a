//! A single floating letter cube.

use glam::Vec3;

use modulith_engine::{lerp, EntityId, Rng};

/// What a module is currently doing in the round.
///
/// `Decoy` and `Anchor` modules are *active*: they collide, can be hovered
/// and count toward pool capacity. `Matched` and `Despawning` modules only
/// shrink until they are dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Decoy,
    /// Carries the next required letter. At most one per pool.
    Anchor,
    /// Picked correctly; shrinking out.
    Matched,
    /// Cycled out of the pool; shrinking out.
    Despawning,
}

#[derive(Debug, Clone)]
pub struct Module {
    pub id: EntityId,
    letter: char,
    role: Role,
    pub position: Vec3,
    pub velocity: Vec3,
    pub rotation: Vec3,
    pub rotation_velocity: Vec3,
    pub size: f32,
    pub target_size: f32,
    pub hovered: bool,
    /// Remaining fixed steps of the error flash.
    pub error_frames: u32,
    dead: bool,
}

impl Module {
    /// A new decoy at a random spot inside 80% of the bounds, growing from zero.
    pub fn spawn(id: EntityId, letter: char, target_size: f32, bounds: f32, rng: &mut Rng) -> Self {
        let range = bounds * 0.8;
        let position = Vec3::new(
            rng.range(-range, range),
            rng.range(-range, range),
            rng.range(-range, range),
        );
        let speed = rng.range(0.2, 0.8);
        Self {
            id,
            letter,
            role: Role::Decoy,
            position,
            velocity: rng.unit_vec3() * speed,
            rotation: Vec3::new(
                rng.range(0.0, std::f32::consts::TAU),
                rng.range(0.0, std::f32::consts::TAU),
                0.0,
            ),
            rotation_velocity: Vec3::new(rng.range(-0.02, 0.02), rng.range(-0.02, 0.02), 0.0),
            size: 0.0,
            target_size,
            hovered: false,
            error_frames: 0,
            dead: false,
        }
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_active(&self) -> bool {
        !self.dead && matches!(self.role, Role::Decoy | Role::Anchor)
    }

    pub fn is_anchor(&self) -> bool {
        self.role == Role::Anchor && !self.dead
    }

    pub fn is_matched(&self) -> bool {
        self.role == Role::Matched
    }

    /// Active decoy that is not under the pointer; safe to recycle.
    pub fn is_recyclable(&self) -> bool {
        self.is_active() && self.role == Role::Decoy && !self.hovered
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    // ---- Role transitions ----
    //
    // Each returns false and leaves the module untouched when the transition
    // is not allowed from the current role.

    /// Relabel an active decoy in place.
    pub fn relabel(&mut self, letter: char) -> bool {
        if !self.is_active() || self.role != Role::Decoy {
            return false;
        }
        self.letter = letter;
        true
    }

    /// Make an active module the anchor for `letter`.
    pub fn promote(&mut self, letter: char) -> bool {
        if !self.is_active() {
            return false;
        }
        self.letter = letter;
        self.role = Role::Anchor;
        true
    }

    /// Anchor back to decoy.
    pub fn demote(&mut self) -> bool {
        if self.role != Role::Anchor || self.dead {
            return false;
        }
        self.role = Role::Decoy;
        true
    }

    pub fn mark_matched(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.role = Role::Matched;
        self.hovered = false;
        true
    }

    pub fn despawn(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.role = Role::Despawning;
        self.hovered = false;
        true
    }

    /// Start the error flash and kick the module away.
    pub fn flash_error(&mut self, frames: u32) {
        self.error_frames = frames;
        self.velocity *= 3.0;
    }

    /// Per-step size animation and error countdown.
    /// Shrinking modules die once they are smaller than one unit.
    pub fn update(&mut self) {
        if self.dead {
            return;
        }
        match self.role {
            Role::Matched | Role::Despawning => {
                self.size = lerp(self.size, 0.0, 0.2);
                if self.size < 1.0 {
                    self.dead = true;
                }
            }
            Role::Decoy | Role::Anchor => {
                if self.size < self.target_size {
                    self.size = lerp(self.size, self.target_size, 0.1);
                }
            }
        }
        self.error_frames = self.error_frames.saturating_sub(1);
    }
}
