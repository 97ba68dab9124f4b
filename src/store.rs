/// Entity store: sole owner of the projectile and target lists.

use rand::Rng;

use crate::config::Rules;
use crate::constants::{PROJECTILE_EXIT_Y, TARGET_SIZE, TARGET_SPAWN_Y};
use crate::entities::{FallingTarget, Projectile};

/// What one `advance` step pruned.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AdvanceReport {
    pub projectiles_pruned: usize,
    pub targets_pruned: usize,
    /// A target that ends the game left through the bottom.
    pub breached: bool,
}

#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    pub(crate) projectiles: Vec<Projectile>,
    pub(crate) targets: Vec<FallingTarget>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn targets(&self) -> &[FallingTarget] {
        &self.targets
    }

    /// Drop a new target just above the screen at a random column.
    /// Bonus targets are only rolled for outside auto-assist.
    pub fn spawn_target(
        &mut self,
        assist: bool,
        rules: &Rules,
        rng: &mut impl Rng,
    ) -> FallingTarget {
        let max_x = rules.width.saturating_sub(TARGET_SIZE as u32);
        let x = rng.gen_range(0..=max_x) as f32;
        let bonus = !assist && rng.gen_bool(rules.bonus_chance);
        let target = FallingTarget {
            x,
            y: TARGET_SPAWN_Y,
            bonus,
            spawned_during_assist: assist,
        };
        log::debug!("spawned target at x={} bonus={}", x, bonus);
        self.insert_target(target.clone());
        target
    }

    pub fn insert_target(&mut self, target: FallingTarget) {
        self.targets.push(target);
    }

    pub fn spawn_projectile(&mut self, x: f32, y: f32, speed: f32) {
        self.projectiles.push(Projectile::new(x, y, speed));
    }

    /// One fixed step: move everything, then prune what left the play area.
    pub fn advance(&mut self, rules: &Rules) -> AdvanceReport {
        for p in &mut self.projectiles {
            p.y -= p.speed;
        }
        for t in &mut self.targets {
            t.y += rules.fall_speed;
        }

        let before = self.projectiles.len();
        self.projectiles.retain(|p| p.y >= PROJECTILE_EXIT_Y);
        let projectiles_pruned = before - self.projectiles.len();

        let bottom = rules.height as f32;
        let mut breached = false;
        let mut targets_pruned = 0;
        self.targets.retain(|t| {
            if t.y > bottom {
                breached |= t.is_fatal();
                targets_pruned += 1;
                false
            } else {
                true
            }
        });

        AdvanceReport {
            projectiles_pruned,
            targets_pruned,
            breached,
        }
    }

    /// Exempt every target currently on screen from ending the game.
    pub fn mark_all_assisted(&mut self) {
        for t in &mut self.targets {
            t.spawned_during_assist = true;
        }
    }

    /// The target closest to the bottom. Earlier entries win ties.
    pub fn lowest_target(&self) -> Option<&FallingTarget> {
        self.targets
            .iter()
            .fold(None, |best: Option<&FallingTarget>, t| match best {
                Some(b) if b.y >= t.y => Some(b),
                _ => Some(t),
            })
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
        self.targets.clear();
    }
}
