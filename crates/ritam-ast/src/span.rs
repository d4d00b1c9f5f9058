// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source location tracking.

/// A span in the source code.
///
/// `start..end` is a byte range into the original source. `line` and
/// `column` are 1-based and locate `start`; columns count characters, not
/// bytes, so a caret can be aligned under non-Latin scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32, column: u32) -> Self {
        Self { start, end, line, column }
    }

    /// Byte length of the spanned source text.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Span from the start of `self` to the end of `last`.
    pub fn to(self, last: Span) -> Span {
        Span {
            start: self.start,
            end: last.end.max(self.start),
            line: self.line,
            column: self.column,
        }
    }
}

/// Precomputed line-start offsets for O(log n) byte-offset → line:col lookup.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Byte offset of the start of each line. line_starts[0] is always 0.
    line_starts: Vec<usize>,
}

impl LineMap {
    /// Build a line map by scanning source for newlines. O(n).
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        LineMap { line_starts }
    }

    /// Convert byte offset to (line, col), both 1-based, with the column
    /// counted in characters.
    pub fn offset_to_line_col(&self, source: &str, offset: usize) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let line_start = self.line_starts[line_idx];
        let col = source
            .get(line_start..offset.min(source.len()))
            .map(|s| s.chars().count())
            .unwrap_or(0);
        ((line_idx + 1) as u32, (col + 1) as u32)
    }

    /// Get the source text of a 1-based line number, without its newline.
    pub fn line_text<'a>(&self, source: &'a str, line: u32) -> Option<&'a str> {
        let idx = (line as usize).checked_sub(1)?;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| s.saturating_sub(1)) // exclude the \n
            .unwrap_or(source.len());
        source.get(start..end).map(|s| s.strip_suffix('\r').unwrap_or(s))
    }

    /// Number of lines in the source.
    pub fn line_count(&self) -> u32 {
        self.line_starts.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source() {
        let lm = LineMap::new("");
        assert_eq!(lm.offset_to_line_col("", 0), (1, 1));
        assert_eq!(lm.line_count(), 1);
        assert_eq!(lm.line_text("", 1), Some(""));
    }

    #[test]
    fn multi_line() {
        let src = "abc\ndef\nghi";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_count(), 3);
        assert_eq!(lm.offset_to_line_col(src, 2), (1, 3)); // 'c'
        assert_eq!(lm.offset_to_line_col(src, 4), (2, 1)); // 'd'
        assert_eq!(lm.offset_to_line_col(src, 8), (3, 1)); // 'g'

        assert_eq!(lm.line_text(src, 2), Some("def"));
        assert_eq!(lm.line_text(src, 3), Some("ghi"));
        assert_eq!(lm.line_text(src, 4), None);
    }

    #[test]
    fn columns_count_characters() {
        // Each Tamil letter below is three bytes.
        let src = "மாறி x";
        let lm = LineMap::new(src);
        let x = src.find('x').unwrap();
        assert_eq!(lm.offset_to_line_col(src, x), (1, 6));
    }

    #[test]
    fn trailing_newline_and_crlf() {
        let src = "abc\r\n";
        let lm = LineMap::new(src);
        assert_eq!(lm.line_count(), 2);
        assert_eq!(lm.line_text(src, 1), Some("abc"));
        assert_eq!(lm.line_text(src, 2), Some(""));
    }

    #[test]
    fn span_covers_to_last() {
        let first = Span::new(4, 7, 1, 5);
        let last = Span::new(10, 12, 2, 3);
        let joined = first.to(last);
        assert_eq!(joined, Span::new(4, 12, 1, 5));
        assert_eq!(joined.len(), 8);
    }
}
