//! Span module - Source location tracking.
//!
//! This module provides [`Span`], a byte range into a buffer owned by
//! someone else, and [`SourceFile`], a named text with a precomputed line
//! index for turning byte offsets into line/column pairs.
//!
//! # Examples
//!
//! ```
//! use cfl_util::span::{SourceFile, Span};
//!
//! let file = SourceFile::new("main.c", "int x;\nint y;");
//! let span = Span::new(11, 12);
//! assert_eq!(&file.content()[span.range()], "y");
//! assert_eq!(file.offset_to_line_col(span.start), (2, 5));
//! ```

mod source_map;

pub use source_map::SourceFile;

use std::ops::Range;

/// Byte range into a buffer
///
/// A `Span` never owns memory; it is meaningful only together with the
/// buffer it was produced for.
///
/// # Examples
///
/// ```
/// use cfl_util::span::Span;
///
/// let span = Span::new(10, 20);
/// assert_eq!(span.len(), 10);
/// assert!(!span.is_empty());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    ///
    /// # Arguments
    ///
    /// * `start` - Start byte offset
    /// * `end` - End byte offset
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns true if this span is empty (start == end)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the length of the span in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// The span as a `Range`, for slicing
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Join two adjacent spans into a single span
    ///
    /// Returns `None` if the spans are not adjacent (self.end != other.start).
    ///
    /// # Examples
    ///
    /// ```
    /// use cfl_util::span::Span;
    ///
    /// assert_eq!(Span::new(10, 20).join(Span::new(20, 30)), Some(Span::new(10, 30)));
    /// assert_eq!(Span::new(10, 20).join(Span::new(21, 30)), None);
    /// ```
    #[inline]
    pub fn join(self, other: Span) -> Option<Span> {
        if self.end == other.start {
            Some(Span {
                start: self.start,
                end: other.end,
            })
        } else {
            None
        }
    }
}
