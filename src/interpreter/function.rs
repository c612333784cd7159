use super::errors::{RuntimeError, RuntimeResult};
use super::interpreter::{Flow, Interpreter};
use super::object::Object;
use super::scope::Scope;
use crate::frontend::ast::FunctionLiteral;

use std::fmt;
use std::io::Write;
use std::rc::Rc;

pub struct FunctionData {
    literal: Rc<FunctionLiteral>,
    closure: Scope,
}

/// A function literal paired with the scope it was evaluated in.
#[derive(Clone)]
pub struct Function(Rc<FunctionData>);

impl Function {
    pub fn new(literal: Rc<FunctionLiteral>, closure: Scope) -> Self {
        Function(Rc::new(FunctionData { literal, closure }))
    }

    pub fn arity(&self) -> usize {
        self.0.literal.params.len()
    }

    /// Binds `args` in a fresh child of the captured scope and runs the body.
    /// A `return` stops at this boundary; loop signals that reach it yield null.
    pub fn execute<W: Write>(
        &self,
        args: Vec<Object>,
        interpreter: &mut Interpreter<W>,
    ) -> RuntimeResult<Object> {
        if args.len() != self.arity() {
            return Err(RuntimeError::ArgumentCount(
                self.arity().to_string(),
                args.len(),
            ));
        }

        let scope = Scope::with_parent(&self.0.closure);
        for (param, arg) in self.0.literal.params.iter().zip(args.into_iter()) {
            scope.define(param.name.clone(), arg);
        }

        let prev_scope = interpreter.swap_scope(scope);
        let result = interpreter.eval_block(&self.0.literal.body);
        interpreter.swap_scope(prev_scope);

        match result? {
            Flow::Value(value) | Flow::Return(value) => Ok(value),
            Flow::Break | Flow::Continue => Ok(Object::Null),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let params: Vec<_> = self
            .0
            .literal
            .params
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        write!(f, "function({}) {{ {} }}", params.join(", "), self.0.literal.body)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<function/{}>", self.arity())
    }
}

impl PartialEq<Function> for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Function {}
