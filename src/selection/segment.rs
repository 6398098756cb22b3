//! Contiguous segment detection.

use crate::annotate::AnnotatedWindow;

/// A maximal run of candidate windows without a time gap or file change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// File shared by all members.
    pub file_num: Option<u32>,
    /// Positions of the member windows in the input slice, chronological.
    pub members: Vec<usize>,
    /// Start of the first member in microseconds.
    pub start_usec: i64,
    /// End of the last member in microseconds.
    pub end_usec: i64,
}

impl Segment {
    /// Number of windows in the segment.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the segment has no windows.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Group candidate windows into contiguous segments.
///
/// Candidates are ordered by file number, then start time. A new segment
/// begins when the file changes or when consecutive start times differ by
/// more than `continuity_gap_usec`.
pub fn find_segments(
    windows: &[AnnotatedWindow],
    candidates: &[usize],
    continuity_gap_usec: i64,
) -> Vec<Segment> {
    let mut ordered = candidates.to_vec();
    ordered.sort_by_key(|&pos| (windows[pos].file_num, windows[pos].start_usec()));

    let mut segments: Vec<Segment> = Vec::new();

    for pos in ordered {
        let window = &windows[pos];

        let continues = |current: &Segment| {
            current.file_num == window.file_num
                && current.members.last().is_some_and(|&prev| {
                    window.start_usec() - windows[prev].start_usec() <= continuity_gap_usec
                })
        };

        if let Some(current) = segments.last_mut()
            && continues(current)
        {
            current.members.push(pos);
            current.end_usec = window.end_usec();
            continue;
        }

        segments.push(Segment {
            file_num: window.file_num,
            members: vec![pos],
            start_usec: window.start_usec(),
            end_usec: window.end_usec(),
        });
    }

    segments
}
