//! Labeled event intervals.

use serde::{Deserialize, Serialize};

/// A labeled time interval from an annotation source.
///
/// Field names follow the annotation table layout used on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Annotation layer the event belongs to.
    pub layer: String,
    /// Who or what produced the annotation.
    pub annotator: String,
    /// Free-text description.
    pub description: String,
    /// Annotation kind.
    #[serde(rename = "type")]
    pub kind: String,
    /// Start offset in microseconds.
    #[serde(rename = "start_time_usec")]
    pub start_usec: i64,
    /// End offset in microseconds. Equal to the start for instantaneous marks.
    #[serde(rename = "end_time_usec")]
    pub end_usec: i64,
}

impl Event {
    /// Whether this event intersects the half-open span `[start_usec, end_usec)`.
    ///
    /// Zero-length events overlap only the span containing their instant.
    pub const fn overlaps(&self, start_usec: i64, end_usec: i64) -> bool {
        if self.start_usec == self.end_usec {
            start_usec <= self.start_usec && self.start_usec < end_usec
        } else {
            self.start_usec < end_usec && self.end_usec > start_usec
        }
    }

    /// Whether the description contains any of `needles`, ignoring ASCII case.
    pub fn description_matches(&self, needles: &[String]) -> bool {
        let haystack = self.description.to_lowercase();
        needles
            .iter()
            .any(|needle| !needle.is_empty() && haystack.contains(&needle.to_lowercase()))
    }
}

/// Merge events from several sources into one list ordered by start time.
///
/// The sort is stable: events sharing a start time keep source order.
pub fn merge_events<I>(sources: I) -> Vec<Event>
where
    I: IntoIterator<Item = Vec<Event>>,
{
    let mut merged: Vec<Event> = sources.into_iter().flatten().collect();
    merged.sort_by_key(|e| e.start_usec);
    merged
}

/// Drop events whose description matches any ignored description.
pub fn without_ignored(events: &[Event], ignored: &[String]) -> Vec<Event> {
    events
        .iter()
        .filter(|e| !e.description_matches(ignored))
        .cloned()
        .collect()
}
