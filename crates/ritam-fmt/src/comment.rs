// SPDX-License-Identifier: (MIT OR Apache-2.0)

/// A `//` line comment and the byte offset it starts at.
#[derive(Debug, Clone)]
pub struct Comment {
    pub start: usize,
    pub text: String,
}

/// Sorted list of comments with a cursor for sequential consumption.
pub struct CommentList {
    comments: Vec<Comment>,
    cursor: usize,
}

impl CommentList {
    pub fn new(comments: Vec<Comment>) -> Self {
        Self { comments, cursor: 0 }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Take all comments whose start position is before `pos`.
    pub fn take_before(&mut self, pos: usize) -> Vec<Comment> {
        let mut result = Vec::new();
        while self.cursor < self.comments.len() && self.comments[self.cursor].start < pos {
            result.push(self.comments[self.cursor].clone());
            self.cursor += 1;
        }
        result
    }

    /// Peek at the next unconsumed comment without advancing.
    pub fn peek_next(&self) -> Option<&Comment> {
        self.comments.get(self.cursor)
    }

    /// Advance cursor by one (consume the peeked comment).
    pub fn advance(&mut self) -> Option<Comment> {
        let c = self.comments.get(self.cursor).cloned();
        if c.is_some() {
            self.cursor += 1;
        }
        c
    }

    /// Drain any remaining comments.
    pub fn take_rest(&mut self) -> Vec<Comment> {
        let rest = self.comments[self.cursor..].to_vec();
        self.cursor = self.comments.len();
        rest
    }
}

/// Extract all line comments from source, skipping string literals.
///
/// Strings run to the matching quote or the end of input; there are no
/// escapes.
pub fn extract_comments(source: &str) -> Vec<Comment> {
    let mut comments = Vec::new();
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    while i < len {
        match bytes[i] {
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < len && bytes[i] != quote {
                    i += 1;
                }
                i += 1;
            }
            b'/' if i + 1 < len && bytes[i + 1] == b'/' => {
                let start = i;
                while i < len && bytes[i] != b'\n' {
                    i += 1;
                }
                comments.push(Comment {
                    start,
                    text: source[start..i].trim_end().to_string(),
                });
            }
            _ => {
                i += 1;
            }
        }
    }

    comments
}
