//! Small file helpers shared across modules.

pub mod channel_labels;
