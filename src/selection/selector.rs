//! Longest-segment selection with a window cap.

use tracing::debug;

use super::{Segment, find_segments};
use crate::annotate::AnnotatedWindow;
use crate::constants::circadian::ACCLIMATION_DAY;
use crate::constants::selection::DEFAULT_CAP_WINDOWS;
use crate::constants::windowing::DEFAULT_WINDOW_SECS;
use crate::constants::USEC_PER_SEC;
use crate::error::{Error, Result};

/// Parameters of the selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// Largest start-to-start difference that keeps two windows in one segment.
    pub continuity_gap_usec: i64,
    /// Maximum number of windows kept from the selected segment.
    pub cap_windows: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        #[allow(clippy::cast_possible_wrap)]
        let continuity_gap_usec = DEFAULT_WINDOW_SECS as i64 * USEC_PER_SEC;
        Self {
            continuity_gap_usec,
            cap_windows: DEFAULT_CAP_WINDOWS,
        }
    }
}

impl SelectionPolicy {
    /// Create a policy, rejecting a non-positive gap or a zero cap.
    pub fn new(continuity_gap_usec: i64, cap_windows: usize) -> Result<Self> {
        if continuity_gap_usec <= 0 {
            return Err(Error::Configuration {
                message: format!(
                    "continuity gap must be positive, got {continuity_gap_usec} usec"
                ),
            });
        }
        if cap_windows == 0 {
            return Err(Error::Configuration {
                message: "cap_windows must be at least 1".to_string(),
            });
        }
        Ok(Self {
            continuity_gap_usec,
            cap_windows,
        })
    }
}

/// Final keep/drop decision per window, aligned with the selector input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMask {
    keep: Vec<bool>,
}

impl ExtractionMask {
    /// All-false mask for `len` windows.
    pub fn none(len: usize) -> Self {
        Self {
            keep: vec![false; len],
        }
    }

    /// Whether the window at `pos` is kept. Out-of-range positions are not.
    pub fn is_kept(&self, pos: usize) -> bool {
        self.keep.get(pos).copied().unwrap_or(false)
    }

    /// Number of kept windows.
    pub fn kept_count(&self) -> usize {
        self.keep.iter().filter(|&&k| k).count()
    }

    /// Positions of kept windows in ascending order.
    pub fn kept_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.keep
            .iter()
            .enumerate()
            .filter_map(|(pos, &k)| k.then_some(pos))
    }

    /// Number of windows covered by the mask.
    pub fn len(&self) -> usize {
        self.keep.len()
    }

    /// Whether the mask covers no windows.
    pub fn is_empty(&self) -> bool {
        self.keep.is_empty()
    }

    /// Per-window flags.
    pub fn as_slice(&self) -> &[bool] {
        &self.keep
    }
}

/// Outcome of a selection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionReport {
    /// Keep/drop decision per input window.
    pub mask: ExtractionMask,
    /// Number of windows passing the eligibility filter.
    pub candidate_count: usize,
    /// All contiguous segments, in scan order.
    pub segments: Vec<Segment>,
    /// Index into `segments` of the chosen segment.
    pub selected: Option<usize>,
}

impl SelectionReport {
    /// No window was eligible; there is no interictal data to extract.
    pub fn is_empty_pool(&self) -> bool {
        self.candidate_count == 0
    }

    /// The chosen segment, if any.
    pub fn selected_segment(&self) -> Option<&Segment> {
        self.selected.and_then(|i| self.segments.get(i))
    }
}

/// Whether a window may be considered for extraction.
///
/// Windows near events are never eligible. Night windows and acclimation-day
/// windows are excluded only when the window has a circadian phase.
pub fn is_eligible(window: &AnnotatedWindow) -> bool {
    !window.close_to_event
        && window.is_night() != Some(true)
        && window.day_index() != Some(ACCLIMATION_DAY)
}

/// Choose the windows to extract.
///
/// Eligible windows are grouped into contiguous segments; the longest
/// segment wins, ties going to the first in scan order. Only its first
/// `cap_windows` windows are kept.
pub fn select_windows(windows: &[AnnotatedWindow], policy: &SelectionPolicy) -> SelectionReport {
    let candidates: Vec<usize> = windows
        .iter()
        .enumerate()
        .filter_map(|(pos, w)| is_eligible(w).then_some(pos))
        .collect();

    let mut mask = ExtractionMask::none(windows.len());

    if candidates.is_empty() {
        debug!("No eligible windows among {}", windows.len());
        return SelectionReport {
            mask,
            candidate_count: 0,
            segments: Vec::new(),
            selected: None,
        };
    }

    let segments = find_segments(windows, &candidates, policy.continuity_gap_usec);

    let mut selected: Option<usize> = None;
    for (i, segment) in segments.iter().enumerate() {
        if selected.is_none_or(|best| segment.len() > segments[best].len()) {
            selected = Some(i);
        }
    }

    if let Some(segment) = selected.map(|i| &segments[i]) {
        for &pos in segment.members.iter().take(policy.cap_windows) {
            mask.keep[pos] = true;
        }
        debug!(
            "Selected segment {}-{} usec ({} windows) out of {} segments, keeping {}",
            segment.start_usec,
            segment.end_usec,
            segment.len(),
            segments.len(),
            segment.len().min(policy.cap_windows)
        );
    }

    SelectionReport {
        mask,
        candidate_count: candidates.len(),
        segments,
        selected,
    }
}
