use super::span::CodePosition;
use super::token::Token;

use std::fmt;
use thiserror::Error;

#[derive(Debug, PartialEq, Clone, Error)]
pub enum ParserErrorType {
    #[error("expected token to be {0}, got {1} instead")]
    ExpectedToken(Token, Token),
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(Token),
    #[error("could not parse \"{0}\" as integer")]
    InvalidInteger(String),
    #[error("could not parse \"{0}\" as float")]
    InvalidFloat(String),
    #[error("expected assign token to be an identifier, got {0} instead")]
    InvalidAssignTarget(String),
}

/// A syntax error together with the position of the offending token.
#[derive(Debug, PartialEq, Clone)]
pub struct ParserError {
    pub position: CodePosition,
    pub error: ParserErrorType,
}

pub type ParserResult<T> = Result<T, ParserError>;

impl ParserError {
    pub fn new(position: CodePosition, error: ParserErrorType) -> Self {
        ParserError { position, error }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]{}", self.position, self.error)
    }
}

impl std::error::Error for ParserError {}
