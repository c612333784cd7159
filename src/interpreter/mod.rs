mod arithmetic;
mod cancel;
mod errors;
mod function;
mod hash_key;
mod indexing;
mod interpreter;
mod native_function;
mod object;
mod scope;

pub use cancel::Cancellation;
pub use errors::{RuntimeError, RuntimeResult};
pub use function::Function;
pub use hash_key::HashKey;
pub use interpreter::{Flow, Interpreter};
pub use native_function::{get_native_func, NativeFn};
pub use object::{Array, Hash, Object, ObjectKind};
pub use scope::Scope;

use crate::frontend::ast::Program;

/// Evaluates `program` against `scope`, giving up with a timeout error once
/// `cancellation` fires. `print` output goes to stdout.
pub fn eval(program: &Program, scope: Scope, cancellation: Cancellation) -> Object {
    let mut interpreter = Interpreter::new().with_scope(scope);
    interpreter.set_cancellation(cancellation);
    interpreter.eval_program(program)
}
