//! Slinger - a fixed-screen arcade shooter.
//!
//! The simulation is pure: every step takes the current `ArenaState` and
//! returns a new one. Time and randomness are injected so a session can be
//! driven synchronously in tests.

pub mod clock;
pub mod compute;
pub mod config;
pub mod driver;
pub mod entities;
pub mod input;
