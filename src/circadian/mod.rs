//! Circadian phase classification.
//!
//! Given the wall-clock time the recording started, each window gets a
//! 1-based day index and a night flag. Day 1 is the acclimation day.

mod anchor;
mod classifier;

pub use anchor::{known_anchor, parse_anchor};
pub use classifier::{CircadianPhase, NightHours, classify_windows, phase_at};
