/// Projectile ↔ target collision pass.

use crate::entities::Rect;
use crate::store::EntityStore;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Resolution {
    /// Pairs removed this tick. Each is worth one point.
    pub hits: u32,
    /// At least one of the removed targets was a bonus target.
    pub bonus_hit: bool,
}

/// Strict overlap: boxes that share only an edge do not collide.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Match each live projectile against the first overlapping target in list
/// order, then remove every matched pair.
pub fn resolve(store: &mut EntityStore) -> Resolution {
    let mut killed_targets: Vec<usize> = Vec::new();
    let mut resolution = Resolution::default();

    for projectile in store.projectiles.iter_mut() {
        if !projectile.alive {
            continue;
        }
        let shot = projectile.rect();
        let hit = store
            .targets
            .iter()
            .enumerate()
            .find(|(ti, t)| !killed_targets.contains(ti) && overlaps(&shot, &t.rect()));
        if let Some((ti, target)) = hit {
            projectile.alive = false;
            killed_targets.push(ti);
            resolution.hits += 1;
            resolution.bonus_hit |= target.bonus;
        }
    }

    store.projectiles.retain(|p| p.alive);
    let mut index = 0;
    store.targets.retain(|_| {
        let keep = !killed_targets.contains(&index);
        index += 1;
        keep
    });

    resolution
}
