//! Falling-target shooter: the simulation core plus the small seams
//! (clock, audio, config) the terminal front end plugs into.

pub mod audio;
pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod constants;
pub mod entities;
pub mod mode;
pub mod store;
