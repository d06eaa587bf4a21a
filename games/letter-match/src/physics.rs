//! Soft pairwise separation plus free flight inside the play cube.
//!
//! Not physically rigorous. Two guarantees hold: modules never leave
//! `[-bounds, bounds]` on any axis, and collisions only remove energy.

use glam::Vec3;

use crate::module::Module;

/// Contact distance as a fraction of the summed sizes.
const CONTACT_FACTOR: f32 = 0.7;
/// Fraction of the penetration depth corrected per step.
const SEPARATION_FACTOR: f32 = 0.05;
/// Velocity kept after an exchange.
const COLLISION_DAMPING: f32 = 0.95;

/// One physics step: resolve overlaps, then animate and integrate every module.
pub fn step(modules: &mut [Module], bounds: f32) {
    resolve_collisions(modules);
    for module in modules.iter_mut() {
        module.update();
        if !module.is_dead() {
            integrate(module, bounds);
        }
    }
}

/// Push overlapping active modules apart and swap their damped velocities.
pub fn resolve_collisions(modules: &mut [Module]) {
    for i in 0..modules.len() {
        let (head, tail) = modules.split_at_mut(i + 1);
        let a = &mut head[i];
        if !a.is_active() {
            continue;
        }
        for b in tail.iter_mut().filter(|m| m.is_active()) {
            let contact = (a.size + b.size) * CONTACT_FACTOR;
            let offset = a.position - b.position;
            let dist_sq = offset.length_squared();
            if dist_sq >= contact * contact {
                continue;
            }
            let push = offset.normalize_or_zero() * (contact - dist_sq.sqrt()) * SEPARATION_FACTOR;
            a.position += push;
            b.position -= push;

            let va = a.velocity;
            a.velocity = b.velocity * COLLISION_DAMPING;
            b.velocity = va * COLLISION_DAMPING;
        }
    }
}

/// Advance position and spin; bounce off the cube walls.
pub fn integrate(module: &mut Module, bounds: f32) {
    module.position += module.velocity;
    module.rotation += module.rotation_velocity;

    let mut p = module.position.to_array();
    let mut v = module.velocity.to_array();
    for axis in 0..3 {
        if p[axis] > bounds {
            p[axis] = bounds;
            v[axis] = -v[axis].abs();
        } else if p[axis] < -bounds {
            p[axis] = -bounds;
            v[axis] = v[axis].abs();
        }
    }
    module.position = Vec3::from_array(p);
    module.velocity = Vec3::from_array(v);
}

/// Sum of squared speeds of active modules.
pub fn kinetic_energy(modules: &[Module]) -> f32 {
    modules
        .iter()
        .filter(|m| m.is_active())
        .map(|m| m.velocity.length_squared())
        .sum()
}
