//! Paired line-segment features linking two images.
//!
//! Pair `i` couples `source()[i]` in the first image with `target()[i]` in the
//! second. The two lists always have the same length.

use crate::geometry::LineSegment;
use crate::util::{MorphError, MorphResult};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

mod parse;

/// Ordered set of segment correspondences.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Correspondences {
    source: Vec<LineSegment>,
    target: Vec<LineSegment>,
}

impl Correspondences {
    /// Pairs two segment lists; fails if their lengths differ.
    pub fn new(source: Vec<LineSegment>, target: Vec<LineSegment>) -> MorphResult<Self> {
        if source.len() != target.len() {
            return Err(MorphError::SegmentCountMismatch {
                source_len: source.len(),
                target_len: target.len(),
            });
        }
        Ok(Self { source, target })
    }

    /// Builds a set from `(source, target)` tuples.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (LineSegment, LineSegment)>,
    {
        let (source, target) = pairs.into_iter().unzip();
        Self { source, target }
    }

    /// Parses the text format (count line, then eight reals per pair).
    pub fn parse(text: &str) -> MorphResult<Self> {
        parse::parse_correspondences(text)
    }

    /// Reads and parses a correspondence file.
    pub fn load<P: AsRef<Path>>(path: P) -> MorphResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| MorphError::CorrespondenceIo {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        Self::parse(&text)
    }

    /// Segments in the first image.
    pub fn source(&self) -> &[LineSegment] {
        &self.source
    }

    /// Segments in the second image.
    pub fn target(&self) -> &[LineSegment] {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Iterates over `(source, target)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&LineSegment, &LineSegment)> + '_ {
        self.source.iter().zip(self.target.iter())
    }

    /// Swaps the roles of the two images.
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}

impl FromStr for Correspondences {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Writes the same text format accepted by [`Correspondences::parse`].
impl fmt::Display for Correspondences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.len())?;
        for (a, b) in self.pairs() {
            writeln!(
                f,
                "{} {} {} {} {} {} {} {}",
                a.start().x,
                a.start().y,
                a.end().x,
                a.end().y,
                b.start().x,
                b.start().y,
                b.end().x,
                b.end().y
            )?;
        }
        Ok(())
    }
}
