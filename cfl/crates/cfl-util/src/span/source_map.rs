//! Named source text with a line index.
//!
//! [`SourceFile`] keeps the text exactly as it was read, plus the byte
//! offset of every line start, so byte offsets can be turned into the
//! 1-based line/column pairs diagnostics report.

use std::sync::Arc;

/// A source file with its content and metadata
///
/// Cloning is cheap: the content and the line index are shared.
///
/// # Examples
///
/// ```
/// use cfl_util::span::SourceFile;
///
/// let file = SourceFile::new("main.c", "int main() {}");
/// assert_eq!(file.name(), "main.c");
/// assert_eq!(file.content(), "int main() {}");
/// ```
#[derive(Clone)]
pub struct SourceFile {
    /// File name (path or display label)
    name: Arc<str>,
    /// File content
    content: Arc<str>,
    /// Precomputed line start offsets
    line_starts: Arc<[usize]>,
}

impl SourceFile {
    /// Create a new source file
    ///
    /// # Arguments
    ///
    /// * `name` - File name or display label
    /// * `content` - File content
    pub fn new(name: impl Into<Arc<str>>, content: impl Into<Arc<str>>) -> Self {
        let content = content.into();
        let line_starts = Self::line_starts(&content);
        Self {
            name: name.into(),
            content,
            line_starts,
        }
    }

    /// Compute line start offsets from content
    fn line_starts(content: &str) -> Arc<[usize]> {
        let mut line_starts = vec![0];
        line_starts.extend(
            content
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        line_starts.into()
    }

    /// Get the file name
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the file content
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the total number of lines
    ///
    /// # Examples
    ///
    /// ```
    /// use cfl_util::span::SourceFile;
    ///
    /// let file = SourceFile::new("main.c", "line1\nline2\nline3");
    /// assert_eq!(file.line_count(), 3);
    /// ```
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to (line, column) coordinates
    ///
    /// Line and column are 1-indexed. Column is measured in bytes from the
    /// start of the line. Offsets past the end clamp to the last line.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfl_util::span::SourceFile;
    ///
    /// let file = SourceFile::new("main.c", "int x;\nfloat y;");
    /// assert_eq!(file.offset_to_line_col(0), (1, 1));
    /// assert_eq!(file.offset_to_line_col(4), (1, 5));
    /// assert_eq!(file.offset_to_line_col(7), (2, 1));
    /// ```
    pub fn offset_to_line_col(&self, offset: usize) -> (usize, usize) {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => (line + 1, 1),
            Err(insert_point) => {
                // line_starts[0] == 0, so insert_point >= 1 here
                let line = insert_point - 1;
                let col = offset - self.line_starts[line] + 1;
                (line + 1, col)
            },
        }
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("line_count", &self.line_count())
            .finish()
    }
}
