//! Screen-space hover selection.

use glam::Vec2;

use modulith_engine::{EntityId, Renderer};

use crate::module::Module;

/// Recompute hover for every module and return the winner.
///
/// Candidates are active modules whose projected centre lies strictly within
/// `radius` pixels of the pointer. Among them the one nearest the camera eye
/// wins, so at most one module is hovered afterwards.
pub fn update_hover<R: Renderer>(
    modules: &mut [Module],
    renderer: &R,
    pointer: Option<Vec2>,
    radius: f32,
) -> Option<EntityId> {
    for module in modules.iter_mut() {
        module.hovered = false;
    }
    let pointer = pointer?;
    let eye = renderer.camera_eye();

    let mut best: Option<(usize, f32)> = None;
    for (i, module) in modules.iter().enumerate() {
        if !module.is_active() {
            continue;
        }
        let Some(screen) = renderer.project(module.position) else {
            continue;
        };
        if screen.distance(pointer) >= radius {
            continue;
        }
        let depth = module.position.distance(eye);
        if best.map_or(true, |(_, d)| depth < d) {
            best = Some((i, depth));
        }
    }

    let (index, _) = best?;
    let module = &mut modules[index];
    module.hovered = true;
    Some(module.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use modulith_engine::Rng;

    /// Orthographic stand-in: drops z, eye on +z.
    struct FlatRenderer;

    impl Renderer for FlatRenderer {
        fn project(&self, point: Vec3) -> Option<Vec2> {
            Some(Vec2::new(point.x, point.y))
        }

        fn camera_eye(&self) -> Vec3 {
            Vec3::new(0.0, 0.0, 1000.0)
        }
    }

    fn module_at(id: u32, pos: Vec3) -> Module {
        let mut m = Module::spawn(EntityId(id), 'A', 50.0, 350.0, &mut Rng::new(id as u64 + 1));
        m.position = pos;
        m
    }

    #[test]
    fn nearest_to_camera_wins_among_overlapping() {
        let mut modules = vec![
            module_at(1, Vec3::new(0.0, 0.0, -100.0)),
            module_at(2, Vec3::new(10.0, 0.0, 200.0)),
            module_at(3, Vec3::new(5.0, 5.0, 50.0)),
        ];
        let hit = update_hover(&mut modules, &FlatRenderer, Some(Vec2::ZERO), 45.0);
        assert_eq!(hit, Some(EntityId(2)));
        assert_eq!(modules.iter().filter(|m| m.hovered).count(), 1);
    }

    #[test]
    fn outside_radius_is_not_a_candidate() {
        let mut modules = vec![module_at(1, Vec3::new(45.0, 0.0, 0.0))];
        assert_eq!(update_hover(&mut modules, &FlatRenderer, Some(Vec2::ZERO), 45.0), None);
        assert!(!modules[0].hovered);
    }

    #[test]
    fn matched_and_despawning_are_skipped() {
        let mut modules = vec![
            module_at(1, Vec3::new(0.0, 0.0, 300.0)),
            module_at(2, Vec3::new(0.0, 0.0, 200.0)),
            module_at(3, Vec3::new(0.0, 0.0, 0.0)),
        ];
        modules[0].mark_matched();
        modules[1].despawn();
        let hit = update_hover(&mut modules, &FlatRenderer, Some(Vec2::ZERO), 45.0);
        assert_eq!(hit, Some(EntityId(3)));
    }

    #[test]
    fn no_pointer_clears_hover() {
        let mut modules = vec![module_at(1, Vec3::ZERO)];
        modules[0].hovered = true;
        assert_eq!(update_hover(&mut modules, &FlatRenderer, None, 45.0), None);
        assert!(!modules[0].hovered);
    }
}
