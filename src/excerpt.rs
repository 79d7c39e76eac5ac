//! Excerpt selection and rendering for search results
//!
//! A search hit carries the positions where query terms occurred in the
//! page text. Only a fixed-width slice of that text fits in a result row,
//! so the excerpt is anchored at whichever match starts the densest
//! cluster: for every match taken as a window anchor, count how many
//! matches end inside the window, and keep the anchor with the highest
//! count. The selected run is then rendered as alternating plain and
//! emphasized segments.

use std::borrow::Cow;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExcerptError {
    #[error("no match ranges to select from")]
    EmptyRanges,
}

/// A half-open span `[offset, offset + length)` where a query term
/// occurred, in character positions of the page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRange {
    pub offset: usize,
    pub length: usize,
}

impl MatchRange {
    pub fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    /// Exclusive end of the span.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// The slice of the sorted match list chosen for display:
/// `sorted[start_index..start_index + run_length]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSelection {
    pub start_index: usize,
    pub run_length: usize,
}

/// Excerpt geometry, in characters: window width and the amount of
/// leading context shown before the first match.
#[derive(Debug, Clone, Copy)]
pub struct ExcerptConfig {
    pub width: usize,
    pub padding: usize,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self { width: 200, padding: 50 }
    }
}

/// One piece of a rendered excerpt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Match(String),
}

/// A rendered excerpt: alternating plain/emphasized segments, with flags
/// telling the presentation layer whether text was cut off on either side.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Excerpt {
    pub segments: Vec<Segment>,
    pub leading_gap: bool,
    pub trailing_gap: bool,
}

impl Excerpt {
    /// Concatenation of all segments without emphasis markers.
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Plain(t) | Segment::Match(t) => t.as_str(),
            })
            .collect()
    }

    /// True if any segment is an emphasized match.
    pub fn has_matches(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Match(_)))
    }
}

/// Pick the anchor whose window of `width` characters covers the most
/// matches.
///
/// Producers do not guarantee order, so the list is sorted by offset
/// first (stable, ties keep producer order); the returned indices refer
/// to that sorted order. A match counts as inside the window only when
/// it ends strictly before `anchor.offset + width`; one ending exactly
/// at the boundary is excluded. Ties between anchors go to the leftmost
/// one. Overlapping and duplicate ranges all count independently.
///
/// Fails on an empty list; callers handle the no-matches case before
/// asking for a run (see [`truncated_excerpt`]).
pub fn select_densest_run(
    ranges: &[MatchRange],
    width: usize,
) -> Result<RunSelection, ExcerptError> {
    if ranges.is_empty() {
        return Err(ExcerptError::EmptyRanges);
    }

    let sorted = sorted_by_offset(ranges);
    let mut best = RunSelection {
        start_index: 0,
        run_length: window_count(&sorted, 0, width),
    };
    for anchor in 1..sorted.len() {
        let count = window_count(&sorted, anchor, width);
        if count > best.run_length {
            best = RunSelection { start_index: anchor, run_length: count };
        }
    }
    Ok(best)
}

/// Number of matches at or after `anchor` that end inside the window
/// anchored there.
fn window_count(sorted: &[MatchRange], anchor: usize, width: usize) -> usize {
    let window_end = sorted[anchor].offset.saturating_add(width);
    sorted[anchor..].iter().filter(|r| r.end() < window_end).count()
}

fn sorted_by_offset(ranges: &[MatchRange]) -> Cow<'_, [MatchRange]> {
    if ranges.windows(2).all(|w| w[0].offset <= w[1].offset) {
        Cow::Borrowed(ranges)
    } else {
        let mut owned = ranges.to_vec();
        owned.sort_by_key(|r| r.offset);
        Cow::Owned(owned)
    }
}

/// Render the selected run: up to `padding` characters of left context
/// (leading whitespace trimmed), then each match of the run emphasized,
/// interleaved with the plain text between consecutive matches and from
/// the last match to the window end.
///
/// `ranges` is the same list handed to [`select_densest_run`]; it is
/// re-sorted here so the selection indices line up. All slicing is
/// character-based and clamped to the text, so ranges hanging past the
/// window or the document never panic.
pub fn render_excerpt(
    text: &str,
    ranges: &[MatchRange],
    selection: RunSelection,
    config: ExcerptConfig,
) -> Excerpt {
    let sorted = sorted_by_offset(ranges);
    let Some(anchor) = sorted.get(selection.start_index) else {
        return Excerpt::default();
    };

    let chars: Vec<char> = text.chars().collect();
    let window_start = anchor.offset;
    let window_end = window_start.saturating_add(config.width);
    let run_end = (selection.start_index + selection.run_length).min(sorted.len());
    let run = &sorted[selection.start_index..run_end];

    let mut segments = Vec::new();

    let lead_start = window_start.saturating_sub(config.padding);
    let lead = slice_chars(&chars, lead_start, window_start);
    let lead = lead.trim_start();
    if !lead.is_empty() {
        segments.push(Segment::Plain(lead.to_string()));
    }

    for (i, range) in run.iter().enumerate() {
        let word = slice_chars(&chars, range.offset, range.end());
        if !word.is_empty() {
            segments.push(Segment::Match(word));
        }
        let filler_end = run.get(i + 1).map(|next| next.offset).unwrap_or(window_end);
        let filler = slice_chars(&chars, range.end(), filler_end);
        if !filler.is_empty() {
            segments.push(Segment::Plain(filler));
        }
    }

    Excerpt {
        segments,
        leading_gap: lead_start > 0,
        trailing_gap: window_end < chars.len(),
    }
}

/// Fallback for hits without text matches: the head of the page, plain.
pub fn truncated_excerpt(text: &str, config: ExcerptConfig) -> Excerpt {
    let chars: Vec<char> = text.chars().collect();
    let shown = slice_chars(&chars, 0, config.width);
    let mut segments = Vec::new();
    if !shown.is_empty() {
        segments.push(Segment::Plain(shown));
    }
    Excerpt {
        segments,
        leading_gap: false,
        trailing_gap: chars.len() > config.width,
    }
}

fn slice_chars(chars: &[char], start: usize, end: usize) -> String {
    let end = end.min(chars.len());
    if start >= end {
        return String::new();
    }
    chars[start..end].iter().collect()
}
