//! Patterns-report segmenter
//!
//! The patterns report arrives as free-form narrative text per labeled
//! section. Within a section, individual findings are introduced by a
//! numbered, emphasis-wrapped marker:
//!
//! ```text
//! 1. **Strong Hooks**: Open with a question ...
//! ```
//!
//! This module splits a section into ordered (title, content) entries. The
//! marker contract is: a decimal integer, a period, whitespace, a `**` pair
//! with at least one non-colon character inside, and an optional trailing
//! colon. Recognition is an explicit scanner walk over the text rather than
//! a regex split, but matches the same spans a regex would.
//!
//! Malformed or marker-free text degrades to an empty entry list; nothing
//! here returns an error.

use serde::Serialize;

use crate::model::PatternsReport;

/// One segmented finding: the emphasized title with numbering and emphasis
/// stripped, and the trimmed body up to the next marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberedEntry {
    pub title: String,
    pub content: String,
}

/// A recognized marker occurrence inside the section text.
#[derive(Debug, Clone)]
struct Marker {
    /// Byte offset of the leading digit.
    start: usize,
    /// Byte offset just past the optional trailing colon.
    end: usize,
    /// Inner emphasized text, untrimmed.
    title: String,
}

/// Scanner over marker occurrences, leftmost-first and non-overlapping.
struct MarkerScan<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> MarkerScan<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for MarkerScan<'a> {
    type Item = Marker;

    fn next(&mut self) -> Option<Marker> {
        while self.pos < self.text.len() {
            // Markers start with an ASCII digit; skip ahead to the next one.
            let rel = self.text.as_bytes()[self.pos..]
                .iter()
                .position(|b| b.is_ascii_digit())?;
            let start = self.pos + rel;

            match match_marker_at(self.text, start) {
                Some(marker) => {
                    self.pos = marker.end;
                    return Some(marker);
                }
                None => {
                    // Not a marker; resume after this digit run so "12."
                    // is not retried from the "2".
                    let after_digits = self.text[start..]
                        .find(|c: char| !c.is_ascii_digit())
                        .map(|off| start + off)
                        .unwrap_or(self.text.len());
                    self.pos = after_digits;
                }
            }
        }
        None
    }
}

/// Try to match the full marker pattern at `start` (which must point at a
/// digit). Returns the marker span and its inner title on success.
fn match_marker_at(text: &str, start: usize) -> Option<Marker> {
    let mut chars = text[start..].char_indices().peekable();

    // Ordinal: one or more digits.
    let mut saw_digit = false;
    while let Some(&(_, c)) = chars.peek() {
        if c.is_ascii_digit() {
            saw_digit = true;
            chars.next();
        } else {
            break;
        }
    }
    if !saw_digit {
        return None;
    }

    // Period.
    match chars.next() {
        Some((_, '.')) => {}
        _ => return None,
    }

    // At least one whitespace character.
    let mut saw_space = false;
    while let Some(&(_, c)) = chars.peek() {
        if c.is_whitespace() {
            saw_space = true;
            chars.next();
        } else {
            break;
        }
    }
    if !saw_space {
        return None;
    }

    // Opening "**".
    for _ in 0..2 {
        match chars.next() {
            Some((_, '*')) => {}
            _ => return None,
        }
    }

    // Title: everything up to the closing "**". A colon inside the
    // emphasis pair disqualifies the match; the title must be non-empty.
    let mut title = String::new();
    loop {
        let (_, c) = chars.next()?;
        match c {
            ':' => return None,
            '*' => {
                if let Some(&(closing, '*')) = chars.peek() {
                    if title.is_empty() {
                        return None;
                    }
                    chars.next();
                    // Optional trailing colon.
                    let mut end = start + closing + 1;
                    if text[end..].starts_with(':') {
                        end += 1;
                    }
                    return Some(Marker { start, end, title });
                }
                title.push('*');
            }
            other => title.push(other),
        }
    }
}

/// Uppercase the first character only; internal casing is untouched.
pub(crate) fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lazy entry iterator over a section's text. Restartable: build a new one
/// from the same input and it yields the same sequence.
pub struct Entries<'a> {
    text: &'a str,
    scan: std::iter::Peekable<MarkerScan<'a>>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = NumberedEntry;

    fn next(&mut self) -> Option<NumberedEntry> {
        let marker = self.scan.next()?;
        let content_end = self
            .scan
            .peek()
            .map(|next| next.start)
            .unwrap_or(self.text.len());
        Some(NumberedEntry {
            title: capitalize_first(marker.title.trim()),
            content: self.text[marker.end..content_end].trim().to_string(),
        })
    }
}

/// Iterate the numbered entries of `section_text` in source order.
pub fn entries(section_text: &str) -> Entries<'_> {
    Entries {
        text: section_text,
        scan: MarkerScan::new(section_text).peekable(),
    }
}

/// Split a section into its ordered numbered entries. Text with no
/// recognizable markers yields an empty list.
pub fn segment(section_text: &str) -> Vec<NumberedEntry> {
    entries(section_text).collect()
}

/// The positional "second half" of the numbered list: entries after the
/// first ⌈n/2⌉, by index. This is a content-blind heuristic carried over
/// from the source data layout, where one numbered list encodes patterns
/// first and success factors second. Lists of 0 or 1 entries have no
/// second half.
pub fn second_half(section_text: &str) -> Vec<NumberedEntry> {
    let all = segment(section_text);
    let skip = (all.len() + 1) / 2;
    all.into_iter().skip(skip).collect()
}

/// Segment a labeled section of the patterns report; a missing label
/// yields an empty list.
pub fn segment_section(report: &PatternsReport, label: &str) -> Vec<NumberedEntry> {
    report.section(label).map(segment).unwrap_or_default()
}

/// Second-half split of a labeled section; missing label yields empty.
pub fn second_half_of_section(report: &PatternsReport, label: &str) -> Vec<NumberedEntry> {
    report.section(label).map(second_half).unwrap_or_default()
}
