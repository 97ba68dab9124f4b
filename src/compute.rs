/// Frame driver.
///
/// `tick` takes the current `GameState` by value and returns the next one
/// along with a `FrameReport` of what happened. Side effects are limited to
/// the injected clock and RNG, so tests control both.

use rand::Rng;

use crate::clock::Clock;
use crate::collision;
use crate::config::Rules;
use crate::constants::{SHOOTER_MARGIN, SHOOTER_START_OFFSET};
use crate::entities::{GameState, GameStatus, Shooter, Shot};
use crate::mode::ModeController;
use crate::store::EntityStore;

/// Directions currently held by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Held {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Input collected since the previous tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub held: Held,
    /// Restart request. Only honoured after game over.
    pub reset: bool,
}

/// Everything observable that happened during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    pub hits: u32,
    pub entered_assist: bool,
    pub assist_ended: bool,
    pub shot: Option<Shot>,
    /// The game ended this tick.
    pub game_over: bool,
    pub reset: bool,
}

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn init_state(rules: Rules, now: std::time::Duration) -> GameState {
    GameState {
        shooter: start_position(&rules),
        store: EntityStore::new(),
        controller: ModeController::new(now, &rules),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        rules,
    }
}

fn start_position(rules: &Rules) -> Shooter {
    Shooter {
        x: (rules.width / 2) as f32,
        y: rules.height as f32 - SHOOTER_START_OFFSET,
    }
}

// ── Input-driven transitions ────────────────────────────────────────────────

/// Step the shooter one tick in every held direction. A direction only
/// applies while the shooter is still more than the margin from that edge.
pub fn move_shooter(shooter: &Shooter, held: &Held, rules: &Rules) -> Shooter {
    let speed = rules.shooter_speed;
    let (w, h) = (rules.width as f32, rules.height as f32);
    let mut next = shooter.clone();
    if held.left && next.x > SHOOTER_MARGIN {
        next.x -= speed;
    }
    if held.right && next.x < w - SHOOTER_MARGIN {
        next.x += speed;
    }
    if held.up && next.y > SHOOTER_MARGIN {
        next.y -= speed;
    }
    if held.down && next.y < h - SHOOTER_MARGIN {
        next.y += speed;
    }
    next
}

/// Clear the board after a game over. The shooter stays where it was.
pub fn reset(mut state: GameState, now: std::time::Duration) -> GameState {
    state.store.clear();
    state.controller.reset(now, &state.rules);
    state.score = 0;
    state.status = GameStatus::Playing;
    log::info!("game reset");
    state
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Order: reset request → movement → spawn trial → advance → collisions →
/// mode/fire timer → game-over check. Nothing but a reset changes a game
/// that is already over.
pub fn tick(
    mut state: GameState,
    input: &FrameInput,
    clock: &impl Clock,
    rng: &mut impl Rng,
) -> (GameState, FrameReport) {
    let now = clock.now();
    let mut report = FrameReport::default();

    if state.status == GameStatus::GameOver {
        if !input.reset {
            return (state, report);
        }
        state = reset(state, now);
        report.reset = true;
    }

    state.frame += 1;

    // ── 1. Movement (player input is ignored during auto-assist) ────────────
    if !state.controller.is_assist(now) {
        state.shooter = move_shooter(&state.shooter, &input.held, &state.rules);
    }

    // ── 2. Spawn trial ───────────────────────────────────────────────────────
    if rng.gen_bool(state.rules.spawn_chance) {
        let assist = state.controller.is_assist(now);
        state.store.spawn_target(assist, &state.rules, rng);
    }

    // ── 3. Move and prune ────────────────────────────────────────────────────
    let advance = state.store.advance(&state.rules);

    // ── 4. Collisions ────────────────────────────────────────────────────────
    let resolution = collision::resolve(&mut state.store);
    state.score += resolution.hits;
    report.hits = resolution.hits;
    if resolution.bonus_hit {
        let duration = state.rules.assist_duration();
        state
            .controller
            .enter_assist(now, duration, &mut state.store);
        report.entered_assist = true;
    }

    // ── 5. Mode expiry and fire timer ────────────────────────────────────────
    let mode_tick = state.controller.tick(
        now,
        &mut state.store,
        &mut state.shooter,
        &state.rules,
        rng,
    );
    report.assist_ended = mode_tick.expired;
    report.shot = mode_tick.shot;

    // ── 6. Game over ─────────────────────────────────────────────────────────
    if advance.breached {
        state.status = GameStatus::GameOver;
        report.game_over = true;
        log::info!("game over, final score {}", state.score);
    }

    (state, report)
}
