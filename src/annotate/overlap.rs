//! Window-event overlap annotation and exclusion buffering.

use std::collections::BTreeSet;

use tracing::debug;

use super::Event;
use crate::circadian::CircadianPhase;
use crate::error::{Error, Result};
use crate::window::Window;

/// A window with its event metadata and circadian phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedWindow {
    /// The underlying window.
    pub window: Window,
    /// At least one event overlaps this window.
    pub has_event: bool,
    /// Descriptions of overlapping events.
    pub event_descriptions: BTreeSet<String>,
    /// Annotators of overlapping events.
    pub annotators: BTreeSet<String>,
    /// Layers of overlapping events.
    pub layers: BTreeSet<String>,
    /// Lies within the exclusion radius of an event-bearing window.
    pub close_to_event: bool,
    /// Day/night phase; `None` when no anchor time is known.
    pub phase: Option<CircadianPhase>,
    /// Physical file the window was cut from, if the recording is split.
    pub file_num: Option<u32>,
}

impl AnnotatedWindow {
    /// Wrap a window with empty annotation state.
    pub const fn new(window: Window, file_num: Option<u32>) -> Self {
        Self {
            window,
            has_event: false,
            event_descriptions: BTreeSet::new(),
            annotators: BTreeSet::new(),
            layers: BTreeSet::new(),
            close_to_event: false,
            phase: None,
            file_num,
        }
    }

    /// Window start in microseconds.
    pub const fn start_usec(&self) -> i64 {
        self.window.start_usec
    }

    /// Window end in microseconds.
    pub const fn end_usec(&self) -> i64 {
        self.window.end_usec
    }

    /// 1-based recording day, if classified.
    pub fn day_index(&self) -> Option<i64> {
        self.phase.as_ref().map(|p| p.day_index)
    }

    /// Night flag, if classified.
    pub fn is_night(&self) -> Option<bool> {
        self.phase.as_ref().map(|p| p.is_night)
    }

    fn absorb(&mut self, event: &Event) {
        self.has_event = true;
        self.event_descriptions.insert(event.description.clone());
        self.annotators.insert(event.annotator.clone());
        self.layers.insert(event.layer.clone());
    }
}

/// Tag `windows` with the events overlapping them and mark exclusion zones.
///
/// Every window overlapped by an event gets the event's description,
/// annotator and layer. Each such window then marks `close_to_event` on all
/// windows lying fully within `[start - radius, end + radius]` of it,
/// itself included. Zones from neighbouring flagged windows compound.
///
/// Windows must be in ascending, non-overlapping order (as produced by
/// [`crate::window::partition_windows`]); gaps between them are allowed.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if the radius is negative or the windows
/// are out of order.
pub fn annotate_windows(
    windows: &[Window],
    events: &[Event],
    exclusion_radius_usec: i64,
    file_num: Option<u32>,
) -> Result<Vec<AnnotatedWindow>> {
    if exclusion_radius_usec < 0 {
        return Err(Error::Configuration {
            message: format!(
                "exclusion radius must be non-negative, got {exclusion_radius_usec} usec"
            ),
        });
    }
    if windows
        .windows(2)
        .any(|pair| pair[0].end_usec > pair[1].start_usec)
    {
        return Err(Error::Configuration {
            message: "windows must be ordered by start time and must not overlap".to_string(),
        });
    }

    let mut annotated: Vec<AnnotatedWindow> = windows
        .iter()
        .map(|w| AnnotatedWindow::new(*w, file_num))
        .collect();

    // Overlapping windows form a contiguous run starting at the first window
    // ending after the event start.
    for event in events {
        let first = windows.partition_point(|w| w.end_usec <= event.start_usec);
        for (window, slot) in windows[first..].iter().zip(&mut annotated[first..]) {
            if !event.overlaps(window.start_usec, window.end_usec) {
                break;
            }
            slot.absorb(event);
        }
    }

    mark_close_to_event(&mut annotated, windows, exclusion_radius_usec);

    debug!(
        "Annotated {} windows against {} events: {} with events, {} close to events",
        annotated.len(),
        events.len(),
        annotated.iter().filter(|w| w.has_event).count(),
        annotated.iter().filter(|w| w.close_to_event).count()
    );

    Ok(annotated)
}

/// Union the exclusion zones of every event-bearing window.
fn mark_close_to_event(annotated: &mut [AnnotatedWindow], windows: &[Window], radius_usec: i64) {
    // Difference array over window positions; a position is excluded when
    // any zone covers it.
    let mut delta = vec![0_i64; windows.len() + 1];

    for flagged in annotated.iter().filter(|w| w.has_event) {
        let lo = flagged.start_usec().saturating_sub(radius_usec);
        let hi = flagged.end_usec().saturating_add(radius_usec);
        let from = windows.partition_point(|w| w.start_usec < lo);
        let to = windows.partition_point(|w| w.end_usec <= hi);
        if from < to {
            delta[from] += 1;
            delta[to] -= 1;
        }
    }

    let mut depth = 0;
    for (slot, d) in annotated.iter_mut().zip(&delta) {
        depth += d;
        slot.close_to_event = depth > 0;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::window::partition_windows;

    const SEC: i64 = 1_000_000;
    const MINUTE: i64 = 60 * SEC;
    const HOUR: i64 = 60 * MINUTE;

    fn event(description: &str, annotator: &str, start_usec: i64, end_usec: i64) -> Event {
        Event {
            layer: "Imported Natus ENT annotations".to_string(),
            annotator: annotator.to_string(),
            description: description.to_string(),
            kind: "Annotation".to_string(),
            start_usec,
            end_usec,
        }
    }

    #[test]
    fn test_event_spanning_two_windows() {
        let windows = partition_windows(10 * MINUTE, MINUTE).unwrap();
        let events = vec![event("seizure", "Natus", 90 * SEC, 150 * SEC)];
        let annotated = annotate_windows(&windows, &events, 0, None).unwrap();

        assert!(!annotated[0].has_event);
        assert!(annotated[1].has_event);
        assert!(annotated[2].has_event);
        assert!(!annotated[3].has_event);
        assert!(annotated[1].event_descriptions.contains("seizure"));
    }

    #[test]
    fn test_sets_union_distinct_values() {
        let windows = partition_windows(2 * MINUTE, MINUTE).unwrap();
        let events = vec![
            event("spike", "alice", 10 * SEC, 20 * SEC),
            event("spike", "bob", 30 * SEC, 40 * SEC),
            event("artifact", "alice", 50 * SEC, 55 * SEC),
        ];
        let annotated = annotate_windows(&windows, &events, 0, None).unwrap();
        let first = &annotated[0];
        assert_eq!(first.event_descriptions.len(), 2);
        assert_eq!(first.annotators.len(), 2);
        assert_eq!(first.layers.len(), 1);
        assert!(!annotated[1].has_event);
    }

    #[test]
    fn test_zero_length_event_on_boundary() {
        let windows = partition_windows(3 * MINUTE, MINUTE).unwrap();
        let events = vec![event("mark", "tech", MINUTE, MINUTE)];
        let annotated = annotate_windows(&windows, &events, 0, None).unwrap();
        assert!(!annotated[0].has_event);
        assert!(annotated[1].has_event);
        assert!(!annotated[2].has_event);
    }

    #[test]
    fn test_event_covering_many_windows() {
        let windows = partition_windows(10 * MINUTE, MINUTE).unwrap();
        let events = vec![event("sleep", "tech", 0, 10 * MINUTE)];
        let annotated = annotate_windows(&windows, &events, 0, None).unwrap();
        assert!(annotated.iter().all(|w| w.has_event));
    }

    #[test]
    fn test_exclusion_radius_boundaries() {
        // 5 hours of windows; event at 90s-150s flags windows 1 and 2.
        let windows = partition_windows(5 * HOUR, MINUTE).unwrap();
        let events = vec![event("seizure", "Natus", 90 * SEC, 150 * SEC)];
        let annotated = annotate_windows(&windows, &events, 2 * HOUR, None).unwrap();

        // Zone of window 2 ends at 180s + 2h; the window ending there is close.
        let last_close = ((180 * SEC + 2 * HOUR) / MINUTE - 1) as usize;
        assert!(annotated[..=last_close].iter().all(|w| w.close_to_event));
        assert!(!annotated[last_close + 1].close_to_event);
        assert!(
            annotated[last_close + 1..]
                .iter()
                .all(|w| !w.close_to_event)
        );
    }

    #[test]
    fn test_exclusion_zones_compound() {
        let windows = partition_windows(20 * MINUTE, MINUTE).unwrap();
        let events = vec![
            event("a", "tech", 5 * MINUTE, 5 * MINUTE + SEC),
            event("b", "tech", 9 * MINUTE, 9 * MINUTE + SEC),
        ];
        let annotated = annotate_windows(&windows, &events, 2 * MINUTE, None).unwrap();
        let close: Vec<usize> = annotated
            .iter()
            .filter(|w| w.close_to_event)
            .map(|w| w.window.index)
            .collect();
        assert_eq!(close, (3..=11).collect::<Vec<_>>());
    }

    #[test]
    fn test_no_events_leaves_windows_clean() {
        let windows = partition_windows(5 * MINUTE, MINUTE).unwrap();
        let annotated = annotate_windows(&windows, &[], 2 * HOUR, Some(3)).unwrap();
        assert!(annotated.iter().all(|w| !w.has_event && !w.close_to_event));
        assert!(annotated.iter().all(|w| w.file_num == Some(3)));
    }

    #[test]
    fn test_rejects_negative_radius() {
        let windows = partition_windows(MINUTE, MINUTE).unwrap();
        assert!(matches!(
            annotate_windows(&windows, &[], -1, None),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn test_rejects_unordered_windows() {
        let mut windows = partition_windows(3 * MINUTE, MINUTE).unwrap();
        windows.swap(0, 2);
        assert!(matches!(
            annotate_windows(&windows, &[], 0, None),
            Err(Error::Configuration { .. })
        ));
    }
}
