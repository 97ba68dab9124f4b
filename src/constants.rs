//! Fixed geometry. Anything tunable lives in `config::Rules` instead.

/// Side of a falling target's square bounding box.
pub const TARGET_SIZE: f32 = 80.0;
/// Targets enter from just above the top edge.
pub const TARGET_SPAWN_Y: f32 = -TARGET_SIZE;

pub const PROJECTILE_RADIUS: f32 = 3.0;
/// Projectiles are dropped once they climb past this y.
pub const PROJECTILE_EXIT_Y: f32 = -20.0;

/// Shooter starts this far above the bottom edge.
pub const SHOOTER_START_OFFSET: f32 = 60.0;
/// Shots leave this far above the shooter's centre.
pub const MUZZLE_OFFSET: f32 = 25.0;
/// The shooter may only step toward an edge while further than this from it.
pub const SHOOTER_MARGIN: f32 = 25.0;

/// During auto-assist the shooter is parked this far above the bottom edge.
pub const AUTO_SHOOTER_OFFSET: f32 = 100.0;
/// Blind auto-shots keep this far from either side.
pub const AUTO_RANDOM_MARGIN: u32 = 50;

/// How long the auto-assist banner stays up after it starts (seconds).
pub const ASSIST_BANNER_SECS: f32 = 1.0;
