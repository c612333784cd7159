pub mod ast;
pub mod cursor;
pub mod errors;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod span;
pub mod token;

pub use lexer::Lexer;
pub use parser::{parse_program, Parser};
