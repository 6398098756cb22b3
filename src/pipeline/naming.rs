//! Recording file naming conventions.

/// Recording file number embedded in a file name.
///
/// Looks for `run-` followed by digits first, then `day` followed by digits.
/// Leading zeros are ignored, so `run-0003` and `day3` both give 3.
pub fn file_number_from_name(name: &str) -> Option<u32> {
    number_after(name, "run-").or_else(|| number_after(name, "day"))
}

/// First number directly following an occurrence of `marker`.
fn number_after(name: &str, marker: &str) -> Option<u32> {
    name.match_indices(marker).find_map(|(at, _)| {
        let rest = &name[at + marker.len()..];
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        rest[..digits_end].parse().ok()
    })
}
