//! Query-term occurrence scanning
//!
//! The index decides which pages match; this module finds where the query
//! words sit inside one page's text so the excerpt layer can emphasize
//! them. Positions are character offsets into the original text.

use crate::excerpt::MatchRange;

/// Cap on ranges reported per page; beyond this the excerpt never changes.
pub const MAX_MATCH_RANGES: usize = 100;

/// Case-insensitive occurrences of each whitespace-separated query word
/// in `text`, sorted by offset. Overlapping occurrences are all reported.
pub fn match_positions(text: &str, query: &str) -> Vec<MatchRange> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let haystack: Vec<char> = text.chars().map(fold_case).collect();
    let mut ranges = Vec::new();

    'words: for word in query.split_whitespace() {
        let needle: Vec<char> = word.chars().map(fold_case).collect();
        if needle.is_empty() {
            continue;
        }
        let mut start = 0;
        while start + needle.len() <= haystack.len() {
            if haystack[start..start + needle.len()] == needle[..] {
                ranges.push(MatchRange::new(start, needle.len()));
                if ranges.len() >= MAX_MATCH_RANGES {
                    break 'words;
                }
            }
            start += 1;
        }
    }

    ranges.sort_by_key(|r| r.offset);
    ranges
}

/// True when any query word occurs in the title (case-insensitive).
/// Drives the emphasized-title treatment on result rows.
pub fn title_matches(title: &str, query: &str) -> bool {
    let title: Vec<char> = title.chars().map(fold_case).collect();
    query.split_whitespace().any(|word| {
        let needle: Vec<char> = word.chars().map(fold_case).collect();
        !needle.is_empty()
            && title.windows(needle.len()).any(|window| window == &needle[..])
    })
}

// Per-character lowercasing keeps offsets 1:1 with the original text;
// multi-char expansions (e.g. İ) would shift every later position.
fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
