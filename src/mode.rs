/// Game mode state machine and the fire timer.
///
/// Normal → AutoAssist when a bonus target is hit; AutoAssist → Normal once
/// the clock passes the expiry. While auto-assist is active the fire timer
/// aims at the lowest target instead of shooting from the player's ship.

use std::time::Duration;

use rand::Rng;

use crate::config::Rules;
use crate::constants::{AUTO_RANDOM_MARGIN, AUTO_SHOOTER_OFFSET, MUZZLE_OFFSET};
use crate::entities::{GameMode, Shooter, Shot};
use crate::store::EntityStore;

// ── Fire timer ────────────────────────────────────────────────────────────────

/// Periodic deadline polled once per frame. Independent of the frame rate.
#[derive(Clone, Debug, PartialEq)]
pub struct FireTimer {
    next_at: Duration,
    interval: Duration,
}

impl FireTimer {
    /// First shot is due one interval after `now`.
    pub fn new(now: Duration, interval: Duration) -> Self {
        Self {
            next_at: now + interval,
            interval,
        }
    }

    /// True at most once per call. After a stall longer than one interval
    /// the schedule restarts from `now` instead of firing a backlog.
    pub fn poll(&mut self, now: Duration) -> bool {
        if now < self.next_at {
            return false;
        }
        self.next_at += self.interval;
        if self.next_at <= now {
            self.next_at = now + self.interval;
        }
        true
    }

    pub fn next_at(&self) -> Duration {
        self.next_at
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

/// What the controller did during one `tick`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModeTick {
    /// Auto-assist ran out this tick.
    pub expired: bool,
    pub shot: Option<Shot>,
}

#[derive(Clone, Debug)]
pub struct ModeController {
    mode: GameMode,
    fire: FireTimer,
}

impl ModeController {
    pub fn new(now: Duration, rules: &Rules) -> Self {
        Self {
            mode: GameMode::Normal,
            fire: FireTimer::new(now, rules.fire_interval()),
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn is_assist(&self, now: Duration) -> bool {
        matches!(self.mode, GameMode::AutoAssist { expires_at } if now < expires_at)
    }

    /// Time left in the current auto-assist window, if one is running.
    pub fn assist_remaining(&self, now: Duration) -> Option<Duration> {
        match self.mode {
            GameMode::AutoAssist { expires_at } if now < expires_at => Some(expires_at - now),
            _ => None,
        }
    }

    /// Whole seconds left, rounded up: exactly 7 s left reads as 7.
    pub fn assist_seconds_left(&self, now: Duration) -> Option<u64> {
        self.assist_remaining(now)
            .map(|left| left.as_millis().div_ceil(1000) as u64)
    }

    pub fn fire_timer(&self) -> &FireTimer {
        &self.fire
    }

    /// Start (or restart) an auto-assist window. Every target already on
    /// screen becomes exempt from ending the game, for good.
    pub fn enter_assist(&mut self, now: Duration, duration: Duration, store: &mut EntityStore) {
        let expires_at = now.saturating_add(duration);
        self.mode = GameMode::AutoAssist { expires_at };
        store.mark_all_assisted();
        log::info!(
            "auto-assist on for {:?}, {} targets exempted",
            duration,
            store.targets().len()
        );
    }

    /// Expire auto-assist if due, then fire if the timer elapsed.
    pub fn tick(
        &mut self,
        now: Duration,
        store: &mut EntityStore,
        shooter: &mut Shooter,
        rules: &Rules,
        rng: &mut impl Rng,
    ) -> ModeTick {
        let mut out = ModeTick::default();

        if let GameMode::AutoAssist { expires_at } = self.mode {
            if now >= expires_at {
                self.mode = GameMode::Normal;
                out.expired = true;
                log::info!("auto-assist over");
            }
        }

        if self.fire.poll(now) {
            let shot = if self.is_assist(now) {
                auto_aim(store, shooter, rules, rng)
            } else {
                Shot {
                    x: shooter.x,
                    y: shooter.y - MUZZLE_OFFSET,
                    auto: false,
                }
            };
            store.spawn_projectile(shot.x, shot.y, rules.projectile_speed);
            log::debug!("fired from ({}, {}) auto={}", shot.x, shot.y, shot.auto);
            out.shot = Some(shot);
        }

        out
    }

    pub fn reset(&mut self, now: Duration, rules: &Rules) {
        *self = Self::new(now, rules);
    }
}

/// Park the shooter under the lowest target and aim at its centre. With
/// nothing on screen, fire blind from a random column.
pub fn auto_aim(
    store: &EntityStore,
    shooter: &mut Shooter,
    rules: &Rules,
    rng: &mut impl Rng,
) -> Shot {
    shooter.y = rules.height as f32 - AUTO_SHOOTER_OFFSET;
    match store.lowest_target() {
        Some(target) => {
            shooter.x = target.center_x();
            Shot {
                x: shooter.x,
                y: shooter.y - MUZZLE_OFFSET,
                auto: true,
            }
        }
        None => {
            let hi = rules.width.saturating_sub(AUTO_RANDOM_MARGIN);
            shooter.x = rng.gen_range(AUTO_RANDOM_MARGIN..=hi) as f32;
            // Blind shots leave from the ship itself, not the muzzle.
            Shot {
                x: shooter.x,
                y: shooter.y,
                auto: true,
            }
        }
    }
}
