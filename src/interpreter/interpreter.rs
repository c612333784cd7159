use super::arithmetic;
use super::cancel::Cancellation;
use super::errors::{RuntimeError, RuntimeResult};
use super::function::Function;
use super::hash_key::HashKey;
use super::indexing;
use super::native_function::get_native_func;
use super::object::{Array, Hash, Object};
use super::scope::Scope;
use crate::frontend::ast::{Block, Expr, ExprType, ForLoop, Literal, Program, Stmt, StmtType};
use crate::frontend::operator::{AssignOperator, PostfixOperator, PrefixOperator};
use crate::stack::ensure_sufficient_stack;

use std::io::{Stdout, Write};
use std::rc::Rc;
use tracing::{debug, instrument, trace};

/// How evaluation of a node completed. Failures travel separately as
/// `Err(RuntimeError)`.
#[derive(Debug, PartialEq, Clone)]
pub enum Flow {
    Value(Object),
    Return(Object),
    Break,
    Continue,
}

/// Unwraps a plain value, handing any other completion straight back to the
/// caller.
macro_rules! value {
    ($flow:expr) => {
        match $flow? {
            Flow::Value(value) => value,
            flow => return Ok(flow),
        }
    };
}

pub struct Interpreter<W: Write> {
    scope: Scope,
    output: W,
    cancellation: Cancellation,
}

impl Interpreter<Stdout> {
    pub fn new() -> Self {
        Interpreter::new_with_output(std::io::stdout())
    }
}

impl Default for Interpreter<Stdout> {
    fn default() -> Self {
        Interpreter::new()
    }
}

impl<W: Write> Interpreter<W> {
    pub fn new_with_output(output: W) -> Self {
        Interpreter {
            scope: Scope::new(),
            output,
            cancellation: Cancellation::none(),
        }
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn set_cancellation(&mut self, cancellation: Cancellation) {
        self.cancellation = cancellation;
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn swap_scope(&mut self, mut scope: Scope) -> Scope {
        std::mem::swap(&mut self.scope, &mut scope);
        scope
    }

    /// Runs a whole program. A runtime failure becomes the program's result
    /// as an `Object::Error`.
    #[instrument(level = "debug", skip_all, fields(stmts = program.stmts.len()))]
    pub fn eval_program(&mut self, program: &Program) -> Object {
        match self.eval_statements(&program.stmts) {
            Ok(Flow::Value(value)) | Ok(Flow::Return(value)) => value,
            Ok(Flow::Break) | Ok(Flow::Continue) => Object::Null,
            Err(e) => {
                debug!(error = %e, "evaluation failed");
                Object::Error(e.to_string())
            }
        }
    }

    fn check_cancelled(&self) -> RuntimeResult<()> {
        if self.cancellation.is_cancelled() {
            return Err(RuntimeError::Timeout);
        }
        Ok(())
    }

    /// Runs statements in order, stopping at the first one that does not
    /// complete normally. Blocks share the enclosing scope.
    pub fn eval_statements(&mut self, stmts: &[Stmt]) -> RuntimeResult<Flow> {
        let mut result = Object::Null;
        for stmt in stmts.iter().filter(|stmt| !stmt.is_empty()) {
            result = value!(self.eval_statement(stmt));
        }
        Ok(Flow::Value(result))
    }

    pub fn eval_block(&mut self, block: &Block) -> RuntimeResult<Flow> {
        self.eval_statements(&block.stmts)
    }

    pub fn eval_statement(&mut self, stmt: &Stmt) -> RuntimeResult<Flow> {
        ensure_sufficient_stack(|| self.eval_statement_inner(stmt))
    }

    fn eval_statement_inner(&mut self, stmt: &Stmt) -> RuntimeResult<Flow> {
        self.check_cancelled()?;

        match &stmt.stmt {
            StmtType::Let(ident, expr) => {
                if self.scope.get_current(&ident.name).is_some() {
                    return Err(RuntimeError::Redefined(ident.name.clone()));
                }
                let value = value!(self.eval_expression(expr));
                trace!(name = %ident.name, "define");
                self.scope.define(ident.name.clone(), value.clone());
                Ok(Flow::Value(value))
            }
            StmtType::Delete(target) => self.eval_delete(target),
            StmtType::Return(expr) => {
                let value = match expr {
                    Some(expr) => value!(self.eval_expression(expr)),
                    None => Object::Null,
                };
                Ok(Flow::Return(value))
            }
            StmtType::Expression(expr) => self.eval_expression(expr),
        }
    }

    /// Evaluates one expression. Nested expressions and calls recurse through
    /// here, so this is where the stack is grown for deep programs.
    pub fn eval_expression(&mut self, expr: &Expr) -> RuntimeResult<Flow> {
        ensure_sufficient_stack(|| self.eval_expression_inner(expr))
    }

    fn eval_expression_inner(&mut self, expr: &Expr) -> RuntimeResult<Flow> {
        self.check_cancelled()?;

        let value = match &expr.expr {
            ExprType::Missing => Object::Null,
            ExprType::Identifier(ident) => self.lookup(&ident.name)?,
            ExprType::Literal(literal) => match literal {
                Literal::Integer(n) => Object::Integer(*n),
                Literal::Float(n) => Object::Float(*n),
                Literal::Boolean(b) => Object::Boolean(*b),
                Literal::Str(s) => Object::String(s.clone()),
                Literal::Null => Object::Null,
            },
            ExprType::Array(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements.iter() {
                    values.push(value!(self.eval_expression(element)));
                }
                Object::Array(Array::new(values))
            }
            ExprType::Hash(pairs) => {
                let hash = Hash::new();
                for (key, value) in pairs.iter() {
                    let key = match &key.expr {
                        ExprType::Identifier(ident) => Object::String(ident.name.clone()),
                        _ => value!(self.eval_expression(key)),
                    };
                    HashKey::from_object(&key)?;
                    let value = value!(self.eval_expression(value));
                    hash.insert(key, value)?;
                }
                Object::Hash(hash)
            }
            ExprType::Function(literal) => {
                Object::Function(Function::new(Rc::clone(literal), self.scope.clone()))
            }
            ExprType::Prefix(op, operand) => match op {
                PrefixOperator::Increment => return self.eval_step(operand, 1, true),
                PrefixOperator::Decrement => return self.eval_step(operand, -1, true),
                _ => {
                    let value = value!(self.eval_expression(operand));
                    arithmetic::eval_prefix(*op, value)?
                }
            },
            ExprType::Infix(op, lhs, rhs) => {
                let lhs = value!(self.eval_expression(lhs));
                let rhs = value!(self.eval_expression(rhs));
                arithmetic::eval_infix(*op, lhs, rhs)?
            }
            ExprType::Postfix(op, operand) => {
                let delta = match op {
                    PostfixOperator::Increment => 1,
                    PostfixOperator::Decrement => -1,
                };
                return self.eval_step(operand, delta, false);
            }
            ExprType::Assign(op, target, value) => return self.eval_assign(*op, target, value),
            ExprType::If(condition, consequence, alternative) => {
                let condition = value!(self.eval_expression(condition));
                if condition.is_truthy() {
                    return self.eval_block(consequence);
                }
                match alternative {
                    Some(alternative) => return self.eval_block(alternative),
                    None => Object::Null,
                }
            }
            ExprType::While(condition, body) => {
                let loop_scope = Scope::with_parent(&self.scope);
                let prev_scope = self.swap_scope(loop_scope);
                let result = self.eval_while(condition, body);
                self.swap_scope(prev_scope);
                return result;
            }
            ExprType::For(for_loop) => {
                let loop_scope = Scope::with_parent(&self.scope);
                let prev_scope = self.swap_scope(loop_scope);
                let result = self.eval_for(for_loop);
                self.swap_scope(prev_scope);
                return result;
            }
            ExprType::Break => return Ok(Flow::Break),
            ExprType::Continue => return Ok(Flow::Continue),
            ExprType::Typeof(operand) => {
                let value = value!(self.eval_expression(operand));
                Object::String(value.kind().name().to_owned())
            }
            ExprType::Call(callee, args) => {
                let callee = value!(self.eval_expression(callee));
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args.iter() {
                    arg_values.push(value!(self.eval_expression(arg)));
                }
                self.call(callee, arg_values)?
            }
            ExprType::MethodCall(object, call) => {
                let object = value!(self.eval_expression(object));
                match &call.expr {
                    ExprType::Call(method, args) => {
                        let mut arg_values = Vec::with_capacity(args.len());
                        for arg in args.iter() {
                            arg_values.push(value!(self.eval_expression(arg)));
                        }
                        object.call_method(&method.to_string(), arg_values)?
                    }
                    _ => return Err(RuntimeError::NoMethod(expr.to_string(), object.kind())),
                }
            }
            ExprType::Index(container, index) => {
                let container = value!(self.eval_expression(container));
                match &index.expr {
                    ExprType::Slice(start, end) => {
                        let start = value!(self.eval_expression(start));
                        let end = match end {
                            Some(end) => Some(value!(self.eval_expression(end))),
                            None => None,
                        };
                        indexing::slice(&container, &start, end.as_ref())?
                    }
                    _ => {
                        let index = value!(self.eval_expression(index));
                        indexing::index_read(&container, &index)?
                    }
                }
            }
            ExprType::Slice(..) => {
                return Err(RuntimeError::Custom(format!(
                    "slice {} used outside of an index",
                    expr
                )))
            }
        };

        Ok(Flow::Value(value))
    }

    fn lookup(&self, name: &str) -> RuntimeResult<Object> {
        if let Some(value) = self.scope.get(name) {
            return Ok(value);
        }
        get_native_func(name)
            .map(Object::Builtin)
            .ok_or_else(|| RuntimeError::UnknownIdentifier(name.to_owned()))
    }

    fn call(&mut self, callee: Object, args: Vec<Object>) -> RuntimeResult<Object> {
        match callee {
            Object::Function(function) => {
                trace!(function = ?function, argc = args.len(), "call");
                function.execute(args, self)
            }
            Object::Builtin(native) => {
                trace!(builtin = native.name, argc = args.len(), "call");
                native.execute(args, &mut self.output)
            }
            other => Err(RuntimeError::NotAFunction(other.render(0))),
        }
    }

    fn eval_delete(&mut self, target: &Expr) -> RuntimeResult<Flow> {
        let value = match &target.expr {
            ExprType::Identifier(ident) => self
                .scope
                .delete(&ident.name)
                .ok_or_else(|| RuntimeError::UnknownIdentifier(ident.name.clone()))?,
            ExprType::Index(container, index) => {
                let container = value!(self.eval_expression(container));
                let index = value!(self.eval_expression(index));
                indexing::delete_element(&container, &index)?
            }
            _ => return Err(RuntimeError::NotAnLvalue(target.to_string())),
        };
        Ok(Flow::Value(value))
    }

    /// Evaluates the new value first, then resolves the target. Identifiers
    /// must already be bound somewhere in the scope chain.
    fn eval_assign(
        &mut self,
        op: AssignOperator,
        target: &Expr,
        value: &Expr,
    ) -> RuntimeResult<Flow> {
        let value = value!(self.eval_expression(value));

        let stored = match &target.expr {
            ExprType::Identifier(ident) => {
                let old = self
                    .scope
                    .get(&ident.name)
                    .ok_or_else(|| RuntimeError::UnknownIdentifier(ident.name.clone()))?;
                let new = arithmetic::eval_compound(op, old, value)?;
                self.scope.reset(&ident.name, new.clone());
                new
            }
            ExprType::Index(container, index) if !is_slice(index) => {
                let container = value!(self.eval_expression(container));
                let index = value!(self.eval_expression(index));
                indexing::assign_element(&container, index, op, value)?
            }
            _ => return Err(RuntimeError::NotAnLvalue(target.to_string())),
        };
        Ok(Flow::Value(stored))
    }

    /// `++` and `--`. The stepped value is written back when the operand is
    /// a variable or an element; non-numbers give null and store nothing.
    fn eval_step(&mut self, operand: &Expr, delta: i64, prefix: bool) -> RuntimeResult<Flow> {
        let (old, new) = match &operand.expr {
            ExprType::Identifier(ident) => {
                let old = self.lookup(&ident.name)?;
                let new = arithmetic::step(&old, delta);
                if let Some(new) = &new {
                    self.scope.reset(&ident.name, new.clone());
                }
                (old, new)
            }
            ExprType::Index(container, index) if !is_slice(index) => {
                let container = value!(self.eval_expression(container));
                let index = value!(self.eval_expression(index));
                let old = indexing::index_read(&container, &index)?;
                let new = arithmetic::step(&old, delta);
                if let Some(new) = &new {
                    indexing::assign_element(&container, index, AssignOperator::Assign, new.clone())?;
                }
                (old, new)
            }
            _ => {
                let old = value!(self.eval_expression(operand));
                let new = arithmetic::step(&old, delta);
                (old, new)
            }
        };

        let value = match new {
            Some(new) if prefix => new,
            Some(_) => old,
            None => Object::Null,
        };
        Ok(Flow::Value(value))
    }

    fn eval_while(&mut self, condition: &Expr, body: &Block) -> RuntimeResult<Flow> {
        let mut result = Object::Null;
        let mut keep_going = value!(self.eval_expression(condition)).is_truthy();

        while keep_going {
            match self.eval_block(body)? {
                Flow::Value(value) => result = value,
                Flow::Continue => result = Object::Null,
                Flow::Break => {
                    result = Object::Null;
                    break;
                }
                flow @ Flow::Return(_) => return Ok(flow),
            }
            keep_going = value!(self.eval_expression(condition)).is_truthy();
        }

        Ok(Flow::Value(result))
    }

    /// Runs inside the loop scope, where `init` binds. Each iteration gets a
    /// fresh child scope of it.
    fn eval_for(&mut self, for_loop: &ForLoop) -> RuntimeResult<Flow> {
        if let Some(init) = &for_loop.init {
            value!(self.eval_statement(init));
        }

        let mut result = Object::Null;
        let mut keep_going = value!(self.eval_for_condition(for_loop)).is_truthy();

        while keep_going {
            let iteration_scope = Scope::with_parent(&self.scope);
            let loop_scope = self.swap_scope(iteration_scope);
            let step = self.eval_for_iteration(for_loop, &mut result);
            self.swap_scope(loop_scope);

            match step? {
                Flow::Value(condition) => keep_going = condition.is_truthy(),
                Flow::Break => break,
                flow => return Ok(flow),
            }
        }

        Ok(Flow::Value(result))
    }

    /// Body, then update, then condition. Completes with the next condition
    /// value unless the body broke out or returned.
    fn eval_for_iteration(&mut self, for_loop: &ForLoop, result: &mut Object) -> RuntimeResult<Flow> {
        match self.eval_block(&for_loop.body)? {
            Flow::Value(value) => *result = value,
            Flow::Continue => *result = Object::Null,
            Flow::Break => {
                *result = Object::Null;
                return Ok(Flow::Break);
            }
            flow @ Flow::Return(_) => return Ok(flow),
        }

        if let Some(update) = &for_loop.update {
            value!(self.eval_expression(update));
        }
        self.eval_for_condition(for_loop)
    }

    fn eval_for_condition(&mut self, for_loop: &ForLoop) -> RuntimeResult<Flow> {
        match &for_loop.condition {
            Some(condition) => self.eval_expression(condition),
            None => Ok(Flow::Value(Object::Boolean(true))),
        }
    }
}

fn is_slice(expr: &Expr) -> bool {
    matches!(expr.expr, ExprType::Slice(..))
}
