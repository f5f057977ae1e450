//! Text parser for correspondence files.
//!
//! ```text
//! 2
//! 10 10 40 10   12 14 44 12
//! 20 30 20 60   18 30 22 58
//! ```
//!
//! Blank lines before the count are skipped. Only the first token of the
//! count line is read. Each data line must start with eight finite reals;
//! trailing tokens are ignored, as is anything after the last announced pair.

use super::Correspondences;
use crate::geometry::LineSegment;
use crate::util::{MorphError, MorphResult};

pub(super) fn parse_correspondences(text: &str) -> MorphResult<Correspondences> {
    let mut lines = text.lines().enumerate().map(|(idx, line)| (idx + 1, line));

    let (count_line, count_text) = lines
        .by_ref()
        .find(|(_, line)| !line.trim().is_empty())
        .ok_or(MorphError::MissingCount)?;
    let expected = parse_count(count_text).ok_or_else(|| MorphError::MalformedCount {
        line: count_line,
        content: count_text.to_string(),
    })?;

    let mut pairs = Vec::with_capacity(expected.min(1 << 16));
    for (line_no, line) in lines.take(expected) {
        let index = pairs.len();
        let pair = parse_pair(line).ok_or_else(|| MorphError::MalformedSegment {
            index,
            line: line_no,
            content: line.to_string(),
        })?;
        pairs.push(pair);
    }

    if pairs.len() != expected {
        return Err(MorphError::TruncatedCorrespondences {
            expected,
            found: pairs.len(),
        });
    }

    Ok(Correspondences::from_pairs(pairs))
}

fn parse_count(line: &str) -> Option<usize> {
    line.split_whitespace().next()?.parse().ok()
}

fn parse_pair(line: &str) -> Option<(LineSegment, LineSegment)> {
    let mut values = [0.0f64; 8];
    let mut tokens = line.split_whitespace();
    for slot in values.iter_mut() {
        let value: f64 = tokens.next()?.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        *slot = value;
    }
    let [asx, asy, aex, aey, bsx, bsy, bex, bey] = values;
    Some((
        LineSegment::from_coords(asx, asy, aex, aey),
        LineSegment::from_coords(bsx, bsy, bex, bey),
    ))
}
