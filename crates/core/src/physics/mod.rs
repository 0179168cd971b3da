//! Droplet physics needed to classify collisions

pub mod collision_kinetics;
pub mod terminal_velocity;

pub use terminal_velocity::{SimmelTerminalVelocity, TerminalVelocity};
