//! Fixed-length windowing of recording time.

mod partition;

pub use partition::{Window, partition_windows};
