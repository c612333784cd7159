use std::fmt;

/// Position of a character in the source: byte offset plus 1-based line and column.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Default)]
pub struct CodePosition {
    pub byte_pos: usize,
    pub line_no: usize,
    pub column_no: usize,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Span {
    pub start_pos: CodePosition,
    pub end_pos: CodePosition,
}

impl CodePosition {
    pub fn new(byte_pos: usize, line_no: usize, column_no: usize) -> Self {
        CodePosition {
            byte_pos,
            line_no,
            column_no,
        }
    }
}

impl fmt::Display for CodePosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line_no, self.column_no)
    }
}

impl Span {
    pub fn new(start_pos: CodePosition, end_pos: CodePosition) -> Self {
        Span { start_pos, end_pos }
    }

    pub fn extend(&self, other: Self) -> Self {
        Span {
            start_pos: std::cmp::min(self.start_pos, other.start_pos),
            end_pos: std::cmp::max(self.end_pos, other.end_pos),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::more_asserts::*;

    #[test]
    fn test_extend_covers_both_spans() {
        let a = Span::new(CodePosition::new(0, 1, 1), CodePosition::new(3, 1, 4));
        let b = Span::new(CodePosition::new(6, 1, 7), CodePosition::new(9, 1, 10));
        let joined = a.extend(b);

        assert_lt!(joined.start_pos, joined.end_pos);
        assert_eq!(joined.start_pos.byte_pos, 0);
        assert_eq!(b.extend(a).end_pos.column_no, 10);
        assert_eq!(format!("{}", b.start_pos), "1:7");
    }
}
