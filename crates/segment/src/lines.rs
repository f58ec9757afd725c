//! Line splitting with absolute byte offsets.

/// One physical line of the document.
///
/// `text` excludes the `\n` terminator and a trailing `\r`; `start..end`
/// is the byte range of `text` inside the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl Line<'_> {
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Splits on `\n`. A trailing newline does not produce an extra empty line,
/// and empty input produces no lines.
pub(crate) fn split_lines(text: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::with_capacity(text.len() / 40 + 1);
    let mut cursor = 0usize;
    for piece in text.split_inclusive('\n') {
        let content = piece.strip_suffix('\n').unwrap_or(piece);
        let content = content.strip_suffix('\r').unwrap_or(content);
        lines.push(Line {
            text: content,
            start: cursor,
            end: cursor + content.len(),
        });
        cursor += piece.len();
    }
    lines
}
