use super::cursor::Cursor;
use super::span::Span;
use super::token::{SpannedToken, Token};

pub struct Lexer<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
        }
    }

    /// Returns the next token. Keeps returning `EndOfFile` once the source is exhausted.
    pub fn next_token(&mut self) -> SpannedToken {
        loop {
            self.cursor.take_while(|ch| matches!(ch, ' ' | '\t' | '\n' | '\r'));

            let start_pos = self.cursor.position();
            let token = self.lex_token();
            let end_pos = self.cursor.position();

            if let Some(token) = token {
                return SpannedToken::new(token, Span::new(start_pos, end_pos));
            }
        }
    }

    /// Lexes one token, or returns None after skipping a comment.
    fn lex_token(&mut self) -> Option<Token> {
        let start_idx = self.cursor.position().byte_pos;
        let ch = match self.cursor.take() {
            Some(ch) => ch,
            None => return Some(Token::EndOfFile),
        };

        let token = match ch {
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '{' => Token::LeftBrace,
            '}' => Token::RightBrace,
            '[' => Token::LeftBracket,
            ']' => Token::RightBracket,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            ':' => Token::Colon,
            '.' => Token::Dot,
            '%' => Token::Percent,

            '+' => self.lex_operator(Token::Plus, &[('=', Token::PlusEq), ('+', Token::Increment)]),
            '-' => self.lex_operator(Token::Minus, &[('=', Token::MinusEq), ('-', Token::Decrement)]),
            '*' => self.lex_operator(Token::Asterisk, &[('=', Token::AsteriskEq)]),
            '=' => self.lex_operator(Token::Equals, &[('=', Token::DoubleEq)]),
            '!' => self.lex_operator(Token::Bang, &[('=', Token::BangEq)]),
            '<' => self.lex_operator(Token::LeftAngle, &[('=', Token::LeftAngleEq)]),
            '>' => self.lex_operator(Token::RightAngle, &[('=', Token::RightAngleEq)]),
            '&' => self.lex_operator(Token::Illegal("&".to_owned()), &[('&', Token::And)]),
            '|' => self.lex_operator(Token::Illegal("|".to_owned()), &[('|', Token::Or)]),

            // Slash can be a comment, division or divide-assign.
            '/' => {
                if self.cursor.take_if('/') {
                    self.cursor.take_while(|ch| ch != '\n');
                    return None;
                }
                self.lex_operator(Token::Slash, &[('=', Token::SlashEq)])
            }

            '"' | '\'' => self.lex_string(ch),

            _ if ch.is_ascii_digit() => self.lex_number(start_idx),

            _ if is_identifier_start(ch) => {
                self.cursor.take_while(is_identifier_char);
                Token::keyword_or_identifier(self.cursor.lexeme_from(start_idx))
            }

            _ => Token::Illegal(ch.to_string()),
        };

        Some(token)
    }

    /// Extends a one-character operator into a two-character one when the
    /// next character matches one of `pairs`.
    fn lex_operator(&mut self, single: Token, pairs: &[(char, Token)]) -> Token {
        for (next, token) in pairs {
            if self.cursor.take_if(*next) {
                return token.clone();
            }
        }
        single
    }

    /// Scans up to the closing quote. No escape sequences are processed.
    fn lex_string(&mut self, quote: char) -> Token {
        let start_idx = self.cursor.position().byte_pos;
        self.cursor.take_while(|ch| ch != quote);
        let contents = self.cursor.lexeme_from(start_idx).to_owned();

        if self.cursor.take_if(quote) {
            Token::String(contents)
        } else {
            Token::Illegal(format!("{}{}", quote, contents))
        }
    }

    /// Digits and dots. Any dot makes it a float; the parser validates the text.
    fn lex_number(&mut self, start_idx: usize) -> Token {
        self.cursor.take_while(|ch| ch.is_ascii_digit() || ch == '.');

        let text = self.cursor.lexeme_from(start_idx).to_owned();
        if text.contains('.') {
            Token::Float(text)
        } else {
            Token::Integer(text)
        }
    }

    pub fn iter(self) -> LexerIterator<'src> {
        LexerIterator { lexer: self }
    }
}

pub struct LexerIterator<'src> {
    lexer: Lexer<'src>,
}

impl<'src> Iterator for LexerIterator<'src> {
    type Item = SpannedToken;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.lexer.next_token();

        if token.token == Token::EndOfFile {
            return None;
        }

        Some(token)
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::span::CodePosition;

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source).iter().map(|t| t.token).collect()
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            lex("a += 1; b++ -- c /= 2 && d || !e != f"),
            vec![
                Token::Identifier("a".to_owned()),
                Token::PlusEq,
                Token::Integer("1".to_owned()),
                Token::Semicolon,
                Token::Identifier("b".to_owned()),
                Token::Increment,
                Token::Decrement,
                Token::Identifier("c".to_owned()),
                Token::SlashEq,
                Token::Integer("2".to_owned()),
                Token::And,
                Token::Identifier("d".to_owned()),
                Token::Or,
                Token::Bang,
                Token::Identifier("e".to_owned()),
                Token::BangEq,
                Token::Identifier("f".to_owned()),
            ]
        );
    }

    #[test]
    fn test_literals_and_keywords() {
        assert_eq!(
            lex("let s = 'hi' + \"there\"; 3.25 for typeof null"),
            vec![
                Token::Let,
                Token::Identifier("s".to_owned()),
                Token::Equals,
                Token::String("hi".to_owned()),
                Token::Plus,
                Token::String("there".to_owned()),
                Token::Semicolon,
                Token::Float("3.25".to_owned()),
                Token::For,
                Token::Typeof,
                Token::Null,
            ]
        );
    }

    #[test]
    fn test_comments_and_illegal_tokens() {
        assert_eq!(
            lex("1 // ignored\n& 'open"),
            vec![
                Token::Integer("1".to_owned()),
                Token::Illegal("&".to_owned()),
                Token::Illegal("'open".to_owned()),
            ]
        );
    }

    #[test]
    fn test_positions() {
        let mut lexer = Lexer::new("let\n  x");
        assert_eq!(lexer.next_token().span.start_pos, CodePosition::new(0, 1, 1));
        assert_eq!(lexer.next_token().span.start_pos, CodePosition::new(6, 2, 3));
        assert_eq!(lexer.next_token().token, Token::EndOfFile);
        assert_eq!(lexer.next_token().token, Token::EndOfFile);
    }
}
