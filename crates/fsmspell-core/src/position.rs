// Byte offset to (line, column) translation for multi-line buffers

/// A 1-based line and 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Newline table for one buffer snapshot.
///
/// Line numbers count the `\n` characters before an offset, plus one. The
/// column is the offset minus the index of the preceding `\n` minus one, or
/// the offset itself on the first line. `\r` is not a line break and counts
/// as an ordinary column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offsets of every `\n` in the buffer, ascending.
    newlines: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        Self {
            newlines: text.match_indices('\n').map(|(i, _)| i).collect(),
        }
    }

    /// Number of lines in the buffer (a trailing `\n` opens an empty line).
    pub fn line_count(&self) -> usize {
        self.newlines.len() + 1
    }

    /// Byte offset at which the 1-based `line` starts, if it exists.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        match line {
            0 => None,
            1 => Some(0),
            n => self.newlines.get(n - 2).map(|nl| nl + 1),
        }
    }

    /// Translate a byte offset into a line and a byte column.
    pub fn position(&self, offset: usize) -> Position {
        let preceding = self.newlines.partition_point(|&nl| nl < offset);
        let column = match preceding {
            0 => offset,
            n => offset - self.newlines[n - 1] - 1,
        };
        Position::new(preceding + 1, column)
    }

    /// Like [`position`](Self::position), but the column counts characters.
    ///
    /// Hosts whose text widgets address columns by character (rather than by
    /// UTF-8 byte) need this for any line containing non-ASCII text. `text`
    /// must be the buffer this index was built from, and `offset` must lie on
    /// a char boundary.
    pub fn char_position(&self, text: &str, offset: usize) -> Position {
        let byte_pos = self.position(offset);
        let line_start = offset - byte_pos.column;
        Position::new(byte_pos.line, text[line_start..offset].chars().count())
    }
}

/// One-shot translation of `offset` into a [`Position`].
///
/// Scans the buffer prefix; build a [`LineIndex`] when translating many
/// offsets of the same buffer.
pub fn line_col(text: &str, offset: usize) -> Position {
    let prefix = &text.as_bytes()[..offset];
    let line = prefix.iter().filter(|&&b| b == b'\n').count() + 1;
    let column = match prefix.iter().rposition(|&b| b == b'\n') {
        Some(nl) => offset - nl - 1,
        None => offset,
    };
    Position::new(line, column)
}
