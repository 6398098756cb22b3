//! Interictal window selection.
//!
//! Eligible windows (away from events, daytime, past the acclimation day)
//! are grouped into contiguous segments. The longest segment is kept, capped
//! to a fixed number of windows.

mod segment;
mod selector;

pub use segment::{Segment, find_segments};
pub use selector::{
    ExtractionMask, SelectionPolicy, SelectionReport, is_eligible, select_windows,
};
