//! Event annotation of recording windows.
//!
//! Events from device annotations and manual seizure validation are merged
//! into one start-ordered list, then matched against windows by interval
//! overlap. Windows near any event-bearing window are flagged for exclusion.

mod event;
mod overlap;
mod sources;

pub use event::{Event, merge_events, without_ignored};
pub use overlap::{AnnotatedWindow, annotate_windows};
pub use sources::{read_annotation_table, read_seizure_table, seizure_event};
