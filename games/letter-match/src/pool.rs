//! Keeps a bounded, fresh set of modules in play.
//!
//! Every step the pool cycles one stale decoy out, reaps dead modules,
//! despawns overflow, guarantees exactly one anchor for the target letter,
//! makes a best effort to show the next few letters, then tops up with
//! random decoys. Only active modules count toward capacity; matched and
//! despawning ones are on their way out.

use modulith_engine::{EngineContext, EntityId, Rng};

use crate::module::{Module, Role};

/// Letters random decoys are drawn from.
const DECOY_ALPHABET: [char; 27] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'Ñ',
];

/// What the pool should provide this step.
#[derive(Debug, Clone, Copy)]
pub struct PoolPlan<'a> {
    /// Letter the anchor must carry; `None` between rounds.
    pub target: Option<char>,
    /// Letters after the target that should be on screen.
    pub lookahead: &'a [char],
    pub capacity: usize,
    /// Chance a new decoy duplicates the target letter.
    pub duplicate_chance: f32,
    pub cycle_interval_ms: f64,
    pub module_size: f32,
    pub bounds: f32,
}

#[derive(Debug, Clone, Default)]
pub struct ModulePool {
    modules: Vec<Module>,
    last_cycle_at: f64,
}

impl ModulePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn modules_mut(&mut self) -> &mut [Module] {
        &mut self.modules
    }

    pub fn get(&self, id: EntityId) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.modules.iter().filter(|m| m.is_active()).count()
    }

    pub fn anchor(&self) -> Option<&Module> {
        self.modules.iter().find(|m| m.is_anchor())
    }

    /// Send every active module out, e.g. when a new round starts.
    pub fn despawn_all(&mut self) {
        for module in &mut self.modules {
            module.despawn();
        }
    }

    /// Run all maintenance passes for one step.
    pub fn maintain(&mut self, plan: &PoolPlan, ctx: &mut EngineContext) {
        let now_ms = ctx.now_ms();
        if now_ms - self.last_cycle_at >= plan.cycle_interval_ms {
            self.last_cycle_at = now_ms;
            self.cycle(plan.target, &mut ctx.rng);
        }
        self.reap();
        self.trim_overflow(plan.capacity);
        self.ensure_anchor(plan, ctx);
        self.ensure_lookahead(plan, ctx);
        self.top_up(plan, ctx);
    }

    /// Despawn one recyclable decoy, preferring a duplicate of the target.
    fn cycle(&mut self, target: Option<char>, rng: &mut Rng) {
        let duplicate = target.and_then(|t| {
            self.modules
                .iter()
                .position(|m| m.is_recyclable() && m.letter() == t)
        });
        let index = duplicate.or_else(|| {
            let eligible = self.indices(|m| m.is_recyclable());
            rng.pick(&eligible).copied()
        });
        if let Some(i) = index {
            self.modules[i].despawn();
        }
    }

    fn reap(&mut self) {
        self.modules.retain(|m| !m.is_dead());
    }

    fn trim_overflow(&mut self, capacity: usize) {
        let mut excess = self.active_count().saturating_sub(capacity);
        for module in self.modules.iter_mut().rev() {
            if excess == 0 {
                break;
            }
            if module.is_recyclable() && module.despawn() {
                excess -= 1;
            }
        }
    }

    fn ensure_anchor(&mut self, plan: &PoolPlan, ctx: &mut EngineContext) {
        let Some(target) = plan.target else {
            for module in &mut self.modules {
                module.demote();
            }
            return;
        };

        let mut kept = false;
        for module in self.modules.iter_mut().filter(|m| m.is_anchor()) {
            if !kept && module.letter() == target {
                kept = true;
            } else {
                module.demote();
            }
        }
        if kept {
            return;
        }

        // A decoy already showing the letter.
        if let Some(i) = self
            .modules
            .iter()
            .position(|m| m.is_active() && m.role() == Role::Decoy && m.letter() == target)
        {
            self.modules[i].promote(target);
            return;
        }

        // Relabel a decoy, sparing look-ahead letters when possible.
        let mut candidates =
            self.indices(|m| m.is_recyclable() && !plan.lookahead.contains(&m.letter()));
        if candidates.is_empty() {
            candidates = self.indices(|m| m.is_recyclable());
        }
        if let Some(&i) = ctx.rng.pick(&candidates) {
            self.modules[i].promote(target);
            return;
        }

        if self.active_count() < plan.capacity {
            let i = self.spawn(target, plan, ctx);
            self.modules[i].promote(target);
            return;
        }

        // Only a hovered decoy is left.
        if let Some(i) = self
            .modules
            .iter()
            .position(|m| m.is_active() && m.role() == Role::Decoy)
        {
            self.modules[i].promote(target);
        }
    }

    fn ensure_lookahead(&mut self, plan: &PoolPlan, ctx: &mut EngineContext) {
        for &letter in plan.lookahead {
            if self
                .modules
                .iter()
                .any(|m| m.is_active() && m.letter() == letter)
            {
                continue;
            }
            if self.active_count() < plan.capacity {
                self.spawn(letter, plan, ctx);
                continue;
            }
            let candidates = self.indices(|m| {
                m.is_recyclable()
                    && Some(m.letter()) != plan.target
                    && !plan.lookahead.contains(&m.letter())
            });
            match ctx.rng.pick(&candidates) {
                Some(&i) => {
                    self.modules[i].relabel(letter);
                }
                None => log::debug!("no room to show upcoming letter {}", letter),
            }
        }
    }

    fn top_up(&mut self, plan: &PoolPlan, ctx: &mut EngineContext) {
        let missing = plan.capacity.saturating_sub(self.active_count());
        for _ in 0..missing {
            let letter = match plan.target {
                Some(t) if ctx.rng.chance(plan.duplicate_chance) => t,
                _ => random_letter(&mut ctx.rng),
            };
            self.spawn(letter, plan, ctx);
        }
    }

    fn spawn(&mut self, letter: char, plan: &PoolPlan, ctx: &mut EngineContext) -> usize {
        let id = ctx.next_id();
        let module = Module::spawn(id, letter, plan.module_size, plan.bounds, &mut ctx.rng);
        self.modules.push(module);
        self.modules.len() - 1
    }

    fn indices(&self, pred: impl Fn(&Module) -> bool) -> Vec<usize> {
        self.modules
            .iter()
            .enumerate()
            .filter(|&(_, m)| pred(m))
            .map(|(i, _)| i)
            .collect()
    }
}

fn random_letter(rng: &mut Rng) -> char {
    rng.pick(&DECOY_ALPHABET).copied().unwrap_or('A')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan<'a>(target: Option<char>, lookahead: &'a [char]) -> PoolPlan<'a> {
        PoolPlan {
            target,
            lookahead,
            capacity: 24,
            duplicate_chance: 0.08,
            cycle_interval_ms: 1500.0,
            module_size: 50.0,
            bounds: 350.0,
        }
    }

    fn anchors(pool: &ModulePool) -> Vec<&Module> {
        pool.modules().iter().filter(|m| m.is_anchor()).collect()
    }

    fn settle(pool: &mut ModulePool) {
        for _ in 0..60 {
            for m in pool.modules_mut() {
                m.update();
            }
        }
    }

    #[test]
    fn fills_to_capacity_with_anchor_and_lookahead() {
        let mut ctx = EngineContext::with_seed(1);
        let mut pool = ModulePool::new();
        pool.maintain(&plan(Some('S'), &['O', 'L']), &mut ctx);

        assert_eq!(pool.active_count(), 24);
        let a = anchors(&pool);
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].letter(), 'S');
        for letter in ['O', 'L'] {
            assert!(pool.modules().iter().any(|m| m.is_active() && m.letter() == letter));
        }
    }

    #[test]
    fn exactly_one_anchor_through_a_word() {
        let word: Vec<char> = "CONSTELACION".chars().collect();
        let mut ctx = EngineContext::with_seed(77);
        let mut pool = ModulePool::new();

        for (index, &target) in word.iter().enumerate() {
            let lookahead = &word[(index + 1).min(word.len())..(index + 3).min(word.len())];
            for frame in 0..40 {
                ctx.clock.advance_ms(16.0);
                // Hover some random module now and then.
                if frame % 7 == 0 {
                    let n = pool.len() as u32;
                    let pick = ctx.rng.next_int(n) as usize;
                    for (i, m) in pool.modules_mut().iter_mut().enumerate() {
                        m.hovered = i == pick && m.is_active();
                    }
                }
                pool.maintain(&plan(Some(target), lookahead), &mut ctx);
                for m in pool.modules_mut() {
                    m.update();
                }

                let a = anchors(&pool);
                assert_eq!(a.len(), 1, "letter {} frame {}", target, frame);
                assert_eq!(a[0].letter(), target);
                assert!(pool.active_count() <= 24);
            }
            let anchor_id = pool.anchor().map(|m| m.id).unwrap();
            pool.get_mut(anchor_id).unwrap().mark_matched();
        }

        pool.maintain(&plan(None, &[]), &mut ctx);
        assert!(anchors(&pool).is_empty());
    }

    #[test]
    fn cycling_prefers_target_duplicates() {
        let mut ctx = EngineContext::with_seed(3);
        let mut pool = ModulePool::new();
        let p = PoolPlan {
            duplicate_chance: 0.0,
            ..plan(Some('S'), &[])
        };
        pool.maintain(&p, &mut ctx);
        let anchor = pool.anchor().map(|m| m.id).unwrap();
        let dup = pool
            .modules_mut()
            .iter_mut()
            .find(|m| m.id != anchor && m.role() == Role::Decoy)
            .map(|m| {
                m.relabel('S');
                m.id
            })
            .unwrap();

        ctx.clock.advance_ms(1500.0);
        pool.maintain(&p, &mut ctx);
        assert_eq!(pool.get(dup).map(|m| m.role()), Some(Role::Despawning));
        assert_eq!(pool.active_count(), 24);
    }

    #[test]
    fn cycling_waits_for_the_interval() {
        let mut ctx = EngineContext::with_seed(4);
        let mut pool = ModulePool::new();
        ctx.clock.advance_ms(1500.0);
        pool.maintain(&plan(Some('A'), &[]), &mut ctx);
        ctx.clock.advance_ms(100.0);
        pool.maintain(&plan(Some('A'), &[]), &mut ctx);
        assert!(pool.modules().iter().all(|m| m.role() != Role::Despawning));
    }

    #[test]
    fn lookahead_is_best_effort() {
        let mut ctx = EngineContext::with_seed(5);
        let mut pool = ModulePool::new();
        let p = PoolPlan {
            capacity: 1,
            ..plan(Some('H'), &['O', 'L'])
        };
        pool.maintain(&p, &mut ctx);
        assert_eq!(pool.active_count(), 1);
        assert_eq!(pool.anchor().map(|m| m.letter()), Some('H'));
    }

    #[test]
    fn zero_capacity_is_empty_and_quiet() {
        let mut ctx = EngineContext::with_seed(6);
        let mut pool = ModulePool::new();
        let p = PoolPlan {
            capacity: 0,
            ..plan(Some('H'), &['O'])
        };
        pool.maintain(&p, &mut ctx);
        assert!(pool.is_empty());
    }

    #[test]
    fn new_round_replaces_everything() {
        let mut ctx = EngineContext::with_seed(8);
        let mut pool = ModulePool::new();
        pool.maintain(&plan(Some('S'), &[]), &mut ctx);
        let old: Vec<EntityId> = pool.modules().iter().map(|m| m.id).collect();

        pool.despawn_all();
        pool.maintain(&plan(Some('M'), &['U']), &mut ctx);
        assert_eq!(pool.active_count(), 24);
        assert_eq!(pool.len(), 48);

        settle(&mut pool);
        pool.maintain(&plan(Some('M'), &['U']), &mut ctx);
        assert!(pool.modules().iter().all(|m| !old.contains(&m.id)));
        assert_eq!(pool.anchor().map(|m| m.letter()), Some('M'));
    }

    #[test]
    fn shrinking_capacity_despawns_overflow() {
        let mut ctx = EngineContext::with_seed(9);
        let mut pool = ModulePool::new();
        pool.maintain(&plan(Some('S'), &[]), &mut ctx);
        let p = PoolPlan {
            capacity: 10,
            ..plan(Some('S'), &[])
        };
        pool.maintain(&p, &mut ctx);
        assert_eq!(pool.active_count(), 10);
        assert_eq!(pool.anchor().map(|m| m.letter()), Some('S'));
    }
}
