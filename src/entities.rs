/// All game entity types — pure data, no logic.

use std::time::Duration;

use crate::config::Rules;
use crate::constants::{PROJECTILE_RADIUS, TARGET_SIZE};
use crate::mode::ModeController;
use crate::store::EntityStore;

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Global game mode. Auto-assist carries the instant it runs out; it is
/// only in force while the clock reads earlier than that.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameMode {
    Normal,
    AutoAssist { expires_at: Duration },
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box: top-left corner plus size. y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Centre.
    pub x: f32,
    pub y: f32,
    /// Distance climbed per tick.
    pub speed: f32,
    pub radius: f32,
    pub alive: bool,
}

impl Projectile {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            x,
            y,
            speed,
            radius: PROJECTILE_RADIUS,
            alive: true,
        }
    }

    /// Bounding square of side 2×radius.
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x - self.radius,
            y: self.y - self.radius,
            w: self.radius * 2.0,
            h: self.radius * 2.0,
        }
    }
}

/// A projectile the game emitted this tick, by value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shot {
    pub x: f32,
    pub y: f32,
    /// Whether the fire timer aimed it (auto-assist) rather than the player.
    pub auto: bool,
}

// ── Targets ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct FallingTarget {
    /// Top-left corner.
    pub x: f32,
    pub y: f32,
    /// Hitting it starts auto-assist.
    pub bonus: bool,
    /// Set when spawned during auto-assist, or when auto-assist began while
    /// it was on screen. Such targets never end the game.
    pub spawned_during_assist: bool,
}

impl FallingTarget {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            bonus: false,
            spawned_during_assist: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            w: TARGET_SIZE,
            h: TARGET_SIZE,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + TARGET_SIZE / 2.0
    }

    /// Whether letting this one through ends the game.
    pub fn is_fatal(&self) -> bool {
        !self.bonus && !self.spawned_during_assist
    }
}

// ── Shooter ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Shooter {
    pub x: f32,
    pub y: f32,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Owned by the frame loop and handed by value to
/// `compute::tick`, which returns the next one.
#[derive(Clone, Debug)]
pub struct GameState {
    pub shooter: Shooter,
    pub store: EntityStore,
    pub controller: ModeController,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub rules: Rules,
}
