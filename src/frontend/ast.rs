use super::operator::{AssignOperator, InfixOperator, PostfixOperator, PrefixOperator};
use super::span::Span;

use std::fmt;
use std::rc::Rc;

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Stmt {
    pub stmt: StmtType,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone)]
pub enum StmtType {
    Let(Identifier, Expr),
    Delete(Expr),
    Return(Option<Expr>),
    Expression(Expr),
}

#[derive(Debug, PartialEq, Clone)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Expr {
    pub expr: ExprType,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone)]
pub enum ExprType {
    /// Stands in for an expression the source left out, such as the
    /// statement formed by a lone `;`. Evaluates to null.
    Missing,
    Identifier(Identifier),
    Literal(Literal),
    Array(Vec<Expr>),
    Hash(Vec<(Expr, Expr)>),
    Function(Rc<FunctionLiteral>),
    Prefix(PrefixOperator, Box<Expr>),
    Infix(InfixOperator, Box<Expr>, Box<Expr>),
    Postfix(PostfixOperator, Box<Expr>),
    Assign(AssignOperator, Box<Expr>, Box<Expr>),
    If(Box<Expr>, Block, Option<Block>),
    While(Box<Expr>, Block),
    For(Box<ForLoop>),
    Break,
    Continue,
    Typeof(Box<Expr>),
    Call(Box<Expr>, Vec<Expr>),
    MethodCall(Box<Expr>, Box<Expr>),
    Index(Box<Expr>, Box<Expr>),
    Slice(Box<Expr>, Option<Box<Expr>>),
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Str(String),
    Null,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FunctionLiteral {
    pub params: Vec<Identifier>,
    pub body: Block,
    pub span: Span,
}

/// `for (init; condition; update) body`, every clause optional.
#[derive(Debug, PartialEq, Clone)]
pub struct ForLoop {
    pub init: Option<Stmt>,
    pub condition: Option<Expr>,
    pub update: Option<Expr>,
    pub body: Block,
}

impl Identifier {
    pub fn new(name: String, span: Span) -> Self {
        Identifier { name, span }
    }
}

impl Stmt {
    pub fn new(stmt: StmtType, span: Span) -> Self {
        Stmt { stmt, span }
    }

    /// True for the statement a stray `;` produces.
    pub fn is_empty(&self) -> bool {
        matches!(&self.stmt, StmtType::Expression(e) if e.is_missing())
    }

    pub fn token_literal(&self) -> String {
        match &self.stmt {
            StmtType::Let(..) => "let".to_owned(),
            StmtType::Delete(_) => "delete".to_owned(),
            StmtType::Return(_) => "return".to_owned(),
            StmtType::Expression(e) => e.token_literal(),
        }
    }
}

impl Expr {
    pub fn new(expr: ExprType, span: Span) -> Self {
        Expr { expr, span }
    }

    pub fn missing(span: Span) -> Self {
        Expr::new(ExprType::Missing, span)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.expr, ExprType::Missing)
    }

    /// Text of the token that introduces this expression.
    pub fn token_literal(&self) -> String {
        let literal = match &self.expr {
            ExprType::Missing => "",
            ExprType::Identifier(ident) => ident.name.as_str(),
            ExprType::Literal(literal) => return literal.to_string(),
            ExprType::Array(_) | ExprType::Index(..) => "[",
            ExprType::Hash(_) => "{",
            ExprType::Function(_) => "function",
            ExprType::Prefix(op, _) => op.symbol(),
            ExprType::Infix(op, ..) => op.symbol(),
            ExprType::Postfix(op, _) => op.symbol(),
            ExprType::Assign(op, ..) => op.symbol(),
            ExprType::If(..) => "if",
            ExprType::While(..) => "while",
            ExprType::For(_) => "for",
            ExprType::Break => "break",
            ExprType::Continue => "continue",
            ExprType::Typeof(_) => "typeof",
            ExprType::Call(..) => "(",
            ExprType::MethodCall(..) => ".",
            ExprType::Slice(..) => ":",
        };
        literal.to_owned()
    }
}

fn join<T: fmt::Display>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for stmt in &self.stmts {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.stmt {
            StmtType::Let(name, value) => write!(f, "let {} = {}", name.name, value),
            StmtType::Delete(target) => write!(f, "delete {}", target),
            StmtType::Return(Some(value)) => write!(f, "return {}", value),
            StmtType::Return(None) => write!(f, "return "),
            StmtType::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for stmt in self.stmts.iter().filter(|s| !s.is_empty()) {
            write!(f, "{}; ", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Float(n) => write!(f, "{}", n),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Str(s) => write!(f, "{}", s),
            Literal::Null => write!(f, "null"),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "function({}){}", join(&self.params, ","), self.body)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.expr {
            ExprType::Missing => Ok(()),
            ExprType::Identifier(ident) => write!(f, "{}", ident),
            ExprType::Literal(literal) => write!(f, "{}", literal),
            ExprType::Array(elements) => write!(f, "[{}]", join(elements, ", ")),
            ExprType::Hash(pairs) => {
                let pairs: Vec<_> = pairs.iter().map(|(k, v)| format!("{}:{}", k, v)).collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            ExprType::Function(func) => write!(f, "{}", func),
            ExprType::Prefix(op, right) => write!(f, "({}{})", op.symbol(), right),
            ExprType::Infix(op, left, right) => write!(f, "({} {} {})", left, op.symbol(), right),
            ExprType::Postfix(op, left) => write!(f, "({}{})", left, op.symbol()),
            ExprType::Assign(op, target, value) => write!(f, "{}{}{}", target, op.symbol(), value),
            ExprType::If(condition, consequence, alternative) => {
                write!(f, "if{} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, "else {}", alternative)?;
                }
                Ok(())
            }
            ExprType::While(condition, body) => write!(f, "while ( {} ) {{ {}}}", condition, body),
            ExprType::For(for_loop) => {
                let init = for_loop.init.as_ref().map(|s| s.to_string()).unwrap_or_default();
                let condition = for_loop.condition.as_ref().map(|e| e.to_string()).unwrap_or_default();
                let update = for_loop.update.as_ref().map(|e| e.to_string()).unwrap_or_default();
                write!(
                    f,
                    "for ( {} ; {} ; {} ) {{ {}}}",
                    init, condition, update, for_loop.body
                )
            }
            ExprType::Break => write!(f, "break"),
            ExprType::Continue => write!(f, "continue"),
            ExprType::Typeof(expr) => write!(f, "typeof{}", expr),
            ExprType::Call(function, args) => write!(f, "{}({})", function, join(args, ", ")),
            ExprType::MethodCall(object, call) => write!(f, "{}.{}", object, call),
            ExprType::Index(left, index) => write!(f, "({}[{}])", left, index),
            ExprType::Slice(start, end) => match end {
                Some(end) => write!(f, "({}:{})", start, end),
                None => write!(f, "({}:)", start),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Expr {
        Expr::new(
            ExprType::Identifier(Identifier::new(name.to_owned(), Span::default())),
            Span::default(),
        )
    }

    fn int(n: i64) -> Expr {
        Expr::new(ExprType::Literal(Literal::Integer(n)), Span::default())
    }

    #[test]
    fn test_render_let() {
        let program = Program {
            stmts: vec![Stmt::new(
                StmtType::Let(
                    Identifier::new("myVar".to_owned(), Span::default()),
                    ident("anotherVar"),
                ),
                Span::default(),
            )],
        };
        assert_eq!(program.to_string(), "let myVar = anotherVar");
    }

    #[test]
    fn test_render_operators() {
        let negate = Expr::new(
            ExprType::Prefix(PrefixOperator::Negate, Box::new(ident("a"))),
            Span::default(),
        );
        let product = Expr::new(
            ExprType::Infix(InfixOperator::Multiply, Box::new(negate), Box::new(ident("b"))),
            Span::default(),
        );
        assert_eq!(product.to_string(), "((-a) * b)");

        let postfix = Expr::new(
            ExprType::Postfix(PostfixOperator::Increment, Box::new(ident("i"))),
            Span::default(),
        );
        assert_eq!(postfix.to_string(), "(i++)");

        let slice = Expr::new(
            ExprType::Slice(Box::new(int(1)), None),
            Span::default(),
        );
        let index = Expr::new(
            ExprType::Index(Box::new(ident("arr")), Box::new(slice)),
            Span::default(),
        );
        assert_eq!(index.to_string(), "(arr[(1:)])");
    }

    #[test]
    fn test_empty_statements_are_skipped_in_blocks() {
        let block = Block {
            stmts: vec![
                Stmt::new(StmtType::Expression(int(1)), Span::default()),
                Stmt::new(StmtType::Expression(Expr::missing(Span::default())), Span::default()),
                Stmt::new(StmtType::Return(Some(ident("x"))), Span::default()),
            ],
            span: Span::default(),
        };
        assert_eq!(block.to_string(), "1; return x; ");
    }
}
