//! Buffers owned by a lexer.
//!
//! A [`SourceText`] holds the original text of one source unit, the
//! normalized copy the tokens are cut from, and the map between the two.
//! It is shared (never copied) by the lexer and every token it produced.

use std::sync::Arc;

use cfl_util::{Location, SourceFile, Span};

/// One segment of the normalized buffer.
///
/// A verbatim segment maps normalized bytes one-to-one onto original bytes
/// from `orig` on. A comment segment is a single normalized space standing
/// for the original range `orig..comment_end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Segment {
    norm: usize,
    orig: usize,
    comment_end: Option<usize>,
}

/// Maps normalized offsets back to offsets in the original text.
#[derive(Clone, Debug, Default)]
pub(crate) struct OffsetMap {
    segments: Vec<Segment>,
}

impl OffsetMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records that normalized byte `norm` is a verbatim copy of original
    /// byte `orig`. Consecutive copies collapse into one segment.
    pub(crate) fn copied(&mut self, norm: usize, orig: usize) {
        if let Some(last) = self.segments.last() {
            if last.comment_end.is_none() && last.orig + (norm - last.norm) == orig {
                return;
            }
        }
        self.segments.push(Segment {
            norm,
            orig,
            comment_end: None,
        });
    }

    /// Records that normalized byte `norm` replaces the comment at
    /// `orig_start..orig_end`.
    pub(crate) fn comment(&mut self, norm: usize, orig_start: usize, orig_end: usize) {
        self.segments.push(Segment {
            norm,
            orig: orig_start,
            comment_end: Some(orig_end),
        });
    }

    fn segment(&self, norm: usize) -> Option<&Segment> {
        let idx = self.segments.partition_point(|s| s.norm <= norm);
        idx.checked_sub(1).map(|i| &self.segments[i])
    }

    /// Original offset of the normalized byte at `norm`.
    fn start_of(&self, norm: usize) -> usize {
        match self.segment(norm) {
            Some(seg) if seg.comment_end.is_some() => seg.orig,
            Some(seg) => seg.orig + (norm - seg.norm),
            None => norm,
        }
    }

    /// Original offset just past the normalized byte at `norm`.
    fn end_of(&self, norm: usize) -> usize {
        match self.segment(norm) {
            Some(Segment {
                comment_end: Some(end),
                ..
            }) => *end,
            Some(seg) => seg.orig + (norm - seg.norm) + 1,
            None => norm + 1,
        }
    }

    /// Original range covered by a non-empty normalized span.
    pub(crate) fn unmerged(&self, span: Span) -> Span {
        if span.is_empty() {
            let at = self.start_of(span.start);
            return Span::new(at, at);
        }
        Span::new(self.start_of(span.start), self.end_of(span.end - 1))
    }
}

/// The buffers behind one lexed source unit.
///
/// # Example
///
/// ```
/// use cfl_lex::Lexer;
///
/// let lexer = Lexer::lex("a/**/b", "x.c");
/// let source = lexer.source();
/// assert_eq!(source.original(), "a/**/b");
/// assert_eq!(source.normalized(), "a b");
/// assert_eq!(source.file_name(), "x.c");
/// ```
#[derive(Debug)]
pub struct SourceText {
    file: SourceFile,
    normalized: String,
    offsets: OffsetMap,
}

impl SourceText {
    pub(crate) fn new(file: SourceFile, normalized: String, offsets: OffsetMap) -> Arc<Self> {
        Arc::new(Self {
            file,
            normalized,
            offsets,
        })
    }

    /// The file label given to the lexer.
    pub fn file_name(&self) -> &str {
        self.file.name()
    }

    /// The text exactly as it was handed to the lexer.
    pub fn original(&self) -> &str {
        self.file.content()
    }

    /// The text after splices were merged and comments blanked.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// The original text with its line index.
    pub fn file(&self) -> &SourceFile {
        &self.file
    }

    pub(crate) fn normalized_slice(&self, span: Span) -> &str {
        &self.normalized[span.range()]
    }

    pub(crate) fn original_slice(&self, span: Span) -> &str {
        &self.file.content()[span.range()]
    }

    pub(crate) fn unmerged(&self, span: Span) -> Span {
        self.offsets.unmerged(span)
    }

    /// Location of an original byte offset, for diagnostics.
    pub fn location_of(&self, original_offset: usize) -> Location {
        let (line, column) = self.file.offset_to_line_col(original_offset);
        Location::new(self.file.name(), line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbatim_copies_collapse() {
        let mut map = OffsetMap::new();
        for i in 0..5 {
            map.copied(i, i);
        }
        assert_eq!(map.segments.len(), 1);
        assert_eq!(map.unmerged(Span::new(1, 4)), Span::new(1, 4));
    }

    #[test]
    fn test_gap_starts_new_segment() {
        // "ab\<nl>cd" -> "abcd"
        let mut map = OffsetMap::new();
        map.copied(0, 0);
        map.copied(1, 1);
        map.copied(2, 4);
        map.copied(3, 5);
        assert_eq!(map.segments.len(), 2);
        assert_eq!(map.unmerged(Span::new(0, 4)), Span::new(0, 6));
        assert_eq!(map.unmerged(Span::new(2, 3)), Span::new(4, 5));
    }

    #[test]
    fn test_comment_space_covers_whole_comment() {
        // "a/*x*/b" -> "a b"
        let mut map = OffsetMap::new();
        map.copied(0, 0);
        map.comment(1, 1, 6);
        map.copied(2, 6);
        assert_eq!(map.unmerged(Span::new(1, 2)), Span::new(1, 6));
        assert_eq!(map.unmerged(Span::new(2, 3)), Span::new(6, 7));
    }
}
