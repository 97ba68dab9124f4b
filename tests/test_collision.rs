use sprite_shooter::collision::*;
use sprite_shooter::config::Rules;
use sprite_shooter::entities::*;
use sprite_shooter::store::EntityStore;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn store_with(projectile: (f32, f32), targets: &[(f32, f32)]) -> EntityStore {
    let mut store = EntityStore::new();
    store.spawn_projectile(projectile.0, projectile.1, 20.0);
    for &(x, y) in targets {
        store.insert_target(FallingTarget::new(x, y));
    }
    store
}

// ── overlaps ──────────────────────────────────────────────────────────────────

#[test]
fn touching_edges_do_not_overlap() {
    let a = Rect { x: 0.0, y: 0.0, w: 10.0, h: 10.0 };
    let right = Rect { x: 10.0, y: 0.0, w: 10.0, h: 10.0 };
    let below = Rect { x: 0.0, y: 10.0, w: 10.0, h: 10.0 };
    assert!(!overlaps(&a, &right));
    assert!(!overlaps(&a, &below));
    let nudged = Rect { x: 9.0, y: 9.0, w: 10.0, h: 10.0 };
    assert!(overlaps(&a, &nudged));
}

#[test]
fn disjoint_pairs_never_collide() {
    let mut rng = seeded_rng();
    for _ in 0..2000 {
        let tx = rng.gen_range(0..720) as f32;
        let ty = rng.gen_range(-80..600) as f32;
        let gap = rng.gen_range(0..200) as f32;
        let along_x = rng.gen_range(-3..84) as f32;
        let along_y = rng.gen_range(-3..84) as f32;
        // Projectile radius is 3: place its square fully on one side.
        let (px, py) = match rng.gen_range(0..4) {
            0 => (tx - 3.0 - gap, ty + along_y),
            1 => (tx + 80.0 + 3.0 + gap, ty + along_y),
            2 => (tx + along_x, ty - 3.0 - gap),
            _ => (tx + along_x, ty + 80.0 + 3.0 + gap),
        };
        let mut store = store_with((px, py), &[(tx, ty)]);
        let res = resolve(&mut store);
        assert_eq!(res.hits, 0, "false hit: shot ({px}, {py}) target ({tx}, {ty})");
        assert_eq!(store.projectiles().len(), 1);
        assert_eq!(store.targets().len(), 1);
    }
}

#[test]
fn overlapping_pairs_always_collide() {
    let mut rng = seeded_rng();
    for _ in 0..2000 {
        let tx = rng.gen_range(0..720) as f32;
        let ty = rng.gen_range(-80..600) as f32;
        // Overlap of at least one unit on both axes.
        let px = tx + rng.gen_range(-2..=82) as f32;
        let py = ty + rng.gen_range(-2..=82) as f32;
        let mut store = store_with((px, py), &[(tx, ty)]);
        let res = resolve(&mut store);
        assert_eq!(res.hits, 1, "missed hit: shot ({px}, {py}) target ({tx}, {ty})");
        assert!(store.projectiles().is_empty());
        assert!(store.targets().is_empty());
    }
}

// ── resolve ───────────────────────────────────────────────────────────────────

#[test]
fn first_target_in_list_order_wins() {
    // Both targets cover the shot; the later one is closer to it.
    let mut store = store_with((140.0, 150.0), &[(100.0, 80.0), (100.0, 110.0)]);
    let res = resolve(&mut store);
    assert_eq!(res.hits, 1);
    assert_eq!(store.targets().len(), 1);
    assert_eq!(store.targets()[0].y, 110.0);
}

#[test]
fn each_target_is_taken_once() {
    let mut store = store_with((140.0, 150.0), &[(100.0, 100.0)]);
    store.spawn_projectile(150.0, 150.0, 20.0);
    let res = resolve(&mut store);
    assert_eq!(res.hits, 1);
    assert!(store.targets().is_empty());
    assert_eq!(store.projectiles().len(), 1);
    assert_eq!(store.projectiles()[0].x, 150.0);
}

#[test]
fn two_shots_two_targets_two_hits() {
    let mut store = store_with((140.0, 150.0), &[(100.0, 100.0), (400.0, 100.0)]);
    store.spawn_projectile(440.0, 150.0, 20.0);
    let res = resolve(&mut store);
    assert_eq!(res.hits, 2);
    assert!(!res.bonus_hit);
    assert!(store.targets().is_empty());
    assert!(store.projectiles().is_empty());
}

#[test]
fn bonus_hit_is_reported() {
    let mut store = EntityStore::new();
    store.spawn_projectile(140.0, 150.0, 20.0);
    let mut bonus = FallingTarget::new(100.0, 100.0);
    bonus.bonus = true;
    store.insert_target(bonus);
    let res = resolve(&mut store);
    assert_eq!(res, Resolution { hits: 1, bonus_hit: true });
}

#[test]
fn misses_leave_everything_in_place() {
    let mut store = store_with((600.0, 500.0), &[(100.0, 100.0)]);
    let res = resolve(&mut store);
    assert_eq!(res, Resolution::default());
    assert_eq!(store.projectiles().len(), 1);
    assert_eq!(store.targets().len(), 1);
}

// ── Scenario ──────────────────────────────────────────────────────────────────

#[test]
fn falling_target_meets_player_shot() {
    let rules = Rules::default();
    let mut store = EntityStore::new();
    store.insert_target(FallingTarget::new(100.0, -80.0));
    for _ in 0..40 {
        store.advance(&rules);
    }
    assert_eq!(store.targets()[0].y, 0.0);

    store.spawn_projectile(140.0, rules.height as f32 - 85.0, 20.0);
    let mut score = 0;
    for _ in 0..30 {
        store.advance(&rules);
        score += resolve(&mut store).hits;
        if store.projectiles().is_empty() {
            break;
        }
    }
    assert_eq!(score, 1);
    assert!(store.projectiles().is_empty());
    assert!(store.targets().is_empty());
}
