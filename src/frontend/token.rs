use super::span::Span;
use std::fmt;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    // Delimiters.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Semicolon,
    Colon,
    Dot,

    // Operators.
    Plus,
    PlusEq,
    Increment,
    Minus,
    MinusEq,
    Decrement,
    Asterisk,
    AsteriskEq,
    Slash,
    SlashEq,
    Percent,
    Bang,
    BangEq,
    Equals,
    DoubleEq,
    LeftAngle,
    LeftAngleEq,
    RightAngle,
    RightAngleEq,
    And,
    Or,

    // Literals. Numbers keep their source text; the parser converts them.
    Identifier(String),
    Integer(String),
    Float(String),
    String(String),

    // Keywords.
    Let,
    Delete,
    Return,
    Function,
    If,
    Else,
    While,
    For,
    Break,
    Continue,
    Typeof,
    Null,
    True,
    False,

    Illegal(String),
    EndOfFile,
}

#[derive(Debug, PartialEq, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

impl Token {
    pub fn keyword_or_identifier(word: &str) -> Token {
        match word {
            "let" => Token::Let,
            "delete" => Token::Delete,
            "return" => Token::Return,
            "function" => Token::Function,
            "if" => Token::If,
            "else" => Token::Else,
            "while" => Token::While,
            "for" => Token::For,
            "break" => Token::Break,
            "continue" => Token::Continue,
            "typeof" => Token::Typeof,
            "null" => Token::Null,
            "true" => Token::True,
            "false" => Token::False,
            other => Token::Identifier(other.to_owned()),
        }
    }

    /// Source text of the token, as written.
    pub fn literal(&self) -> &str {
        match self {
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::LeftBrace => "{",
            Token::RightBrace => "}",
            Token::LeftBracket => "[",
            Token::RightBracket => "]",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Colon => ":",
            Token::Dot => ".",
            Token::Plus => "+",
            Token::PlusEq => "+=",
            Token::Increment => "++",
            Token::Minus => "-",
            Token::MinusEq => "-=",
            Token::Decrement => "--",
            Token::Asterisk => "*",
            Token::AsteriskEq => "*=",
            Token::Slash => "/",
            Token::SlashEq => "/=",
            Token::Percent => "%",
            Token::Bang => "!",
            Token::BangEq => "!=",
            Token::Equals => "=",
            Token::DoubleEq => "==",
            Token::LeftAngle => "<",
            Token::LeftAngleEq => "<=",
            Token::RightAngle => ">",
            Token::RightAngleEq => ">=",
            Token::And => "&&",
            Token::Or => "||",
            Token::Identifier(s)
            | Token::Integer(s)
            | Token::Float(s)
            | Token::String(s)
            | Token::Illegal(s) => s,
            Token::Let => "let",
            Token::Delete => "delete",
            Token::Return => "return",
            Token::Function => "function",
            Token::If => "if",
            Token::Else => "else",
            Token::While => "while",
            Token::For => "for",
            Token::Break => "break",
            Token::Continue => "continue",
            Token::Typeof => "typeof",
            Token::Null => "null",
            Token::True => "true",
            Token::False => "false",
            Token::EndOfFile => "",
        }
    }

    /// Name of the token kind used in syntax error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Identifier(_) => "IDENT",
            Token::Integer(_) => "INT",
            Token::Float(_) => "FLOAT",
            Token::String(_) => "STRING",
            Token::Illegal(_) => "ILLEGAL",
            Token::EndOfFile => "EOF",
            Token::Let => "LET",
            Token::Delete => "DELETE",
            Token::Return => "RETURN",
            Token::Function => "FUNCTION",
            Token::If => "IF",
            Token::Else => "ELSE",
            Token::While => "WHILE",
            Token::For => "FOR",
            Token::Break => "BREAK",
            Token::Continue => "CONTINUE",
            Token::Typeof => "TYPEOF",
            Token::Null => "NULL",
            Token::True => "TRUE",
            Token::False => "FALSE",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::LeftBrace => "{",
            Token::RightBrace => "}",
            Token::LeftBracket => "[",
            Token::RightBracket => "]",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Colon => ":",
            Token::Dot => ".",
            Token::Plus => "+",
            Token::PlusEq => "+=",
            Token::Increment => "++",
            Token::Minus => "-",
            Token::MinusEq => "-=",
            Token::Decrement => "--",
            Token::Asterisk => "*",
            Token::AsteriskEq => "*=",
            Token::Slash => "/",
            Token::SlashEq => "/=",
            Token::Percent => "%",
            Token::Bang => "!",
            Token::BangEq => "!=",
            Token::Equals => "=",
            Token::DoubleEq => "==",
            Token::LeftAngle => "<",
            Token::LeftAngleEq => "<=",
            Token::RightAngle => ">",
            Token::RightAngleEq => ">=",
            Token::And => "&&",
            Token::Or => "||",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.kind_name())
    }
}

impl SpannedToken {
    pub fn new(token: Token, span: Span) -> Self {
        SpannedToken { token, span }
    }
}
