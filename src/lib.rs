pub mod frontend;
pub mod interpreter;
mod stack;

use frontend::errors::ParserError;
use interpreter::{Cancellation, Interpreter, Object};

use std::time::Duration;

/// Parses and evaluates `source` in a fresh scope, returning the rendered
/// result and everything `print` wrote. Syntax errors are returned instead of
/// evaluating anything.
pub fn run_program(
    source: &str,
    timeout: Option<Duration>,
) -> Result<(Object, String), Vec<ParserError>> {
    let (program, errors) = frontend::parse_program(source);
    if !errors.is_empty() {
        return Err(errors);
    }

    let mut interpreter = Interpreter::new_with_output(Vec::new());
    if let Some(timeout) = timeout {
        interpreter.set_cancellation(Cancellation::with_timeout(timeout));
    }
    let result = interpreter.eval_program(&program);
    let output = String::from_utf8_lossy(&interpreter.into_output()).into_owned();

    Ok((result, output))
}
