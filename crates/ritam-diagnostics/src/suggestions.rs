// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Did-you-mean suggestions.

/// Suggestions must be strictly closer than this.
const MAX_DISTANCE: usize = 3;

/// Compute edit distance (Levenshtein) between two strings, by characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let b_len = b.len();

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, a_ch) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &b_ch) in b.iter().enumerate() {
            let cost = if a_ch == b_ch { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// The known name closest to `candidate`, if any is within distance 2.
///
/// Of equally close names the first one wins.
pub fn suggest<'a>(candidate: &str, known: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut best: Option<(&'a str, usize)> = None;
    for name in known {
        let dist = edit_distance(candidate, name);
        if dist < best.map_or(MAX_DISTANCE, |(_, d)| d) {
            best = Some((name, dist));
        }
    }
    best.map(|(name, _)| name)
}
