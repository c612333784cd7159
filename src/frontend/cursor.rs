use super::span::CodePosition;
use std::iter::Peekable;
use std::str::CharIndices;

/// Character stream over the source that tracks line and column as it goes.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    chars: Peekable<CharIndices<'src>>,
    position: CodePosition,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Cursor {
            source,
            chars: source.char_indices().peekable(),
            position: CodePosition::new(0, 1, 1),
        }
    }

    pub fn position(&self) -> CodePosition {
        self.position
    }

    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    /// Peeks the character after the next one without consuming anything.
    pub fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, ch)| ch)
    }

    pub fn take(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;

        self.position.byte_pos = self
            .chars
            .peek()
            .map_or(self.source.len(), |&(idx, _)| idx);
        if ch == '\n' {
            self.position.line_no += 1;
            self.position.column_no = 1;
        } else {
            self.position.column_no += 1;
        }

        Some(ch)
    }

    /// Consumes the next character only if it equals `target`.
    pub fn take_if(&mut self, target: char) -> bool {
        if self.peek() == Some(target) {
            self.take();
            true
        } else {
            false
        }
    }

    /// Consumes characters while `condition` holds; the next character fails it.
    pub fn take_while<F>(&mut self, condition: F)
    where
        F: Fn(char) -> bool,
    {
        while let Some(ch) = self.peek() {
            if !condition(ch) {
                break;
            }
            self.take();
        }
    }

    /// Source text from `start` up to the cursor.
    pub fn lexeme_from(&self, start: usize) -> &'src str {
        &self.source[start..self.position.byte_pos]
    }
}
