//! Grouping of kept windows into clip containers.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::annotate::AnnotatedWindow;
use crate::selection::ExtractionMask;

/// Container a clip is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(tag = "kind", content = "number", rename_all = "snake_case")]
pub enum ClipGroup {
    /// One physical recording file.
    File(u32),
    /// One recording day, for single-file recordings with a known anchor.
    Day(i64),
    /// The whole recording, when neither is known.
    Whole,
}

impl ClipGroup {
    /// Group a window belongs to: its file number, else its day index.
    pub fn of(window: &AnnotatedWindow) -> Self {
        match (window.file_num, window.day_index()) {
            (Some(file_num), _) => Self::File(file_num),
            (None, Some(day)) => Self::Day(day),
            (None, None) => Self::Whole,
        }
    }

    /// Number used in container names.
    pub fn number(&self) -> Option<i64> {
        match self {
            Self::File(n) => Some(i64::from(*n)),
            Self::Day(n) => Some(*n),
            Self::Whole => None,
        }
    }
}

impl fmt::Display for ClipGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(n) => write!(f, "file {n}"),
            Self::Day(n) => write!(f, "day {n}"),
            Self::Whole => write!(f, "recording"),
        }
    }
}

/// Kept window positions per group.
///
/// Groups come out in ascending order; positions within a group are
/// chronological.
pub fn group_selected(
    windows: &[AnnotatedWindow],
    mask: &ExtractionMask,
) -> Vec<(ClipGroup, Vec<usize>)> {
    let mut groups: BTreeMap<ClipGroup, Vec<usize>> = BTreeMap::new();

    for pos in mask.kept_positions().filter(|&pos| pos < windows.len()) {
        groups
            .entry(ClipGroup::of(&windows[pos]))
            .or_default()
            .push(pos);
    }

    for positions in groups.values_mut() {
        positions.sort_by_key(|&pos| windows[pos].start_usec());
    }

    groups.into_iter().collect()
}
