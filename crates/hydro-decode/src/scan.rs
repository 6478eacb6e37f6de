//! Byte pattern scanning.

/// Find every non-overlapping occurrence of `pattern` in `data`.
///
/// Scanning is leftmost-first and resumes right after the end of each match,
/// so occurrences overlapping an earlier match are not reported. An empty
/// pattern never matches.
#[must_use]
pub fn find_all_offsets(pattern: &[u8], data: &[u8]) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut start = 0;
    while let Some(offset) = find_from(pattern, data, start) {
        offsets.push(offset);
        start = offset + pattern.len();
    }
    offsets
}

/// Offset of the first occurrence of `pattern` in `data`.
#[must_use]
pub fn find_first(pattern: &[u8], data: &[u8]) -> Option<usize> {
    find_from(pattern, data, 0)
}

fn find_from(pattern: &[u8], data: &[u8], start: usize) -> Option<usize> {
    if pattern.is_empty() {
        return None;
    }
    data.get(start..)?
        .windows(pattern.len())
        .position(|window| window == pattern)
        .map(|i| start + i)
}
