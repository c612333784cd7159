use super::ast::{Block, Expr, ExprType, ForLoop, FunctionLiteral, Identifier, Literal};
use super::ast::{Program, Stmt, StmtType};
use super::errors::{ParserError, ParserErrorType, ParserResult};
use super::lexer::Lexer;
use super::operator::{token_precedence, ParserOperator, Precedence, PrefixOperator};
use super::span::Span;
use super::token::{SpannedToken, Token};
use crate::stack::ensure_sufficient_stack;

use std::rc::Rc;

/// Pratt parser. Every parse function starts with `current` on the first
/// token of its construct and returns with `current` on the construct's
/// last token, leaving the token after it in `peek`.
pub struct Parser<'s> {
    lexer: Lexer<'s>,
    current: SpannedToken,
    peek: SpannedToken,
    errors: Vec<ParserError>,
}

/// Parses `source` into a program and the syntax errors found along the way.
pub fn parse_program(source: &str) -> (Program, Vec<ParserError>) {
    Parser::new(Lexer::new(source)).parse()
}

impl<'s> Parser<'s> {
    pub fn new(mut lexer: Lexer<'s>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        Parser {
            lexer,
            current,
            peek,
            errors: vec![],
        }
    }

    fn bump(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    fn current_is(&self, t: &Token) -> bool {
        &self.current.token == t
    }

    fn peek_is(&self, t: &Token) -> bool {
        &self.peek.token == t
    }

    /// Advances only if the next token is `expected`.
    fn expect_peek(&mut self, expected: Token) -> ParserResult<()> {
        if self.peek_is(&expected) {
            self.bump();
            Ok(())
        } else {
            Err(ParserError::new(
                self.peek.span.start_pos,
                ParserErrorType::ExpectedToken(expected, self.peek.token.clone()),
            ))
        }
    }

    fn expect_current(&self, expected: Token) -> ParserResult<()> {
        if self.current_is(&expected) {
            Ok(())
        } else {
            Err(ParserError::new(
                self.current.span.start_pos,
                ParserErrorType::ExpectedToken(expected, self.current.token.clone()),
            ))
        }
    }

    /// Span from `start` through the current token.
    fn span_from(&self, start: Span) -> Span {
        start.extend(self.current.span)
    }

    /// Parses the whole token stream. A failed statement is dropped, its
    /// error recorded, and parsing resumes at the following token.
    pub fn parse(mut self) -> (Program, Vec<ParserError>) {
        let mut stmts = vec![];

        while !self.current_is(&Token::EndOfFile) {
            if let Some(stmt) = self.parse_statement_with_recovery() {
                stmts.push(stmt);
            }
            self.bump();
        }

        (Program { stmts }, self.errors)
    }

    fn parse_statement_with_recovery(&mut self) -> Option<Stmt> {
        match self.parse_statement() {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                self.errors.push(err);
                None
            }
        }
    }

    fn parse_statement(&mut self) -> ParserResult<Stmt> {
        let start = self.current.span;

        let stmt = match self.current.token {
            Token::Let => self.parse_let()?,
            Token::Delete => {
                self.bump();
                StmtType::Delete(self.parse_expression(Precedence::Lowest)?)
            }
            Token::Return => self.parse_return()?,
            _ => StmtType::Expression(self.parse_expression(Precedence::Lowest)?),
        };

        Ok(Stmt::new(stmt, self.span_from(start)))
    }

    fn parse_let(&mut self) -> ParserResult<StmtType> {
        let name = self.parse_identifier_after()?;
        self.expect_peek(Token::Equals)?;
        self.bump();

        let value = self.parse_expression(Precedence::Lowest)?;
        Ok(StmtType::Let(name, value))
    }

    fn parse_return(&mut self) -> ParserResult<StmtType> {
        if matches!(
            self.peek.token,
            Token::Semicolon | Token::RightBrace | Token::EndOfFile
        ) {
            if self.peek_is(&Token::Semicolon) {
                self.bump();
            }
            return Ok(StmtType::Return(None));
        }

        self.bump();
        let value = self.parse_expression(Precedence::Lowest)?;
        Ok(StmtType::Return(Some(value)))
    }

    /// Expects the next token to be an identifier and moves onto it.
    fn parse_identifier_after(&mut self) -> ParserResult<Identifier> {
        if let Token::Identifier(name) = &self.peek.token {
            let ident = Identifier::new(name.clone(), self.peek.span);
            self.bump();
            Ok(ident)
        } else {
            Err(ParserError::new(
                self.peek.span.start_pos,
                ParserErrorType::ExpectedToken(
                    Token::Identifier(String::new()),
                    self.peek.token.clone(),
                ),
            ))
        }
    }

    /// Parses statements up to the matching `}`. Starts on the `{`.
    fn parse_block(&mut self) -> ParserResult<Block> {
        let start = self.current.span;
        self.bump();

        let mut stmts = vec![];
        while !self.current_is(&Token::RightBrace) && !self.current_is(&Token::EndOfFile) {
            if let Some(stmt) = self.parse_statement_with_recovery() {
                stmts.push(stmt);
            }
            self.bump();
        }
        self.expect_current(Token::RightBrace)?;

        Ok(Block {
            stmts,
            span: self.span_from(start),
        })
    }

    /// Core of the Pratt algorithm. Keeps folding infix operators into the
    /// left operand while the next operator binds tighter than `precedence`.
    fn parse_expression(&mut self, precedence: Precedence) -> ParserResult<Expr> {
        ensure_sufficient_stack(|| self.parse_expression_inner(precedence))
    }

    fn parse_expression_inner(&mut self, precedence: Precedence) -> ParserResult<Expr> {
        if self.current_is(&Token::Semicolon) {
            return Ok(Expr::missing(self.current.span));
        }

        let mut left = self.parse_prefix()?;

        while !self.peek_is(&Token::Semicolon) && precedence < token_precedence(&self.peek.token) {
            let op = match ParserOperator::from_token(&self.peek.token) {
                Some(op) => op,
                None => break,
            };
            self.bump();
            left = self.parse_infix(op, left)?;
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> ParserResult<Expr> {
        let start = self.current.span;

        let expr = match &self.current.token {
            Token::Identifier(name) => ExprType::Identifier(Identifier::new(name.clone(), start)),
            Token::Integer(text) => match text.parse::<i64>() {
                Ok(value) => ExprType::Literal(Literal::Integer(value)),
                Err(_) => {
                    return Err(ParserError::new(
                        start.start_pos,
                        ParserErrorType::InvalidInteger(text.clone()),
                    ))
                }
            },
            Token::Float(text) => match text.parse::<f64>() {
                Ok(value) => ExprType::Literal(Literal::Float(value)),
                Err(_) => {
                    return Err(ParserError::new(
                        start.start_pos,
                        ParserErrorType::InvalidFloat(text.clone()),
                    ))
                }
            },
            Token::String(s) => ExprType::Literal(Literal::Str(s.clone())),
            Token::True => ExprType::Literal(Literal::Boolean(true)),
            Token::False => ExprType::Literal(Literal::Boolean(false)),
            Token::Null => ExprType::Literal(Literal::Null),
            Token::Break => ExprType::Break,
            Token::Continue => ExprType::Continue,
            Token::LeftParen => return self.parse_grouping(),
            Token::LeftBracket => ExprType::Array(self.parse_expression_list(Token::RightBracket)?),
            Token::LeftBrace => self.parse_hash()?,
            Token::Function => ExprType::Function(Rc::new(self.parse_function()?)),
            Token::If => self.parse_if()?,
            Token::While => self.parse_while()?,
            Token::For => self.parse_for()?,
            Token::Typeof => {
                self.bump();
                ExprType::Typeof(Box::new(self.parse_expression(Precedence::Lowest)?))
            }
            token => match PrefixOperator::from_token(token) {
                Some(op) => {
                    self.bump();
                    let right = self.parse_expression(Precedence::Prefix)?;
                    ExprType::Prefix(op, Box::new(right))
                }
                None => {
                    return Err(ParserError::new(
                        start.start_pos,
                        ParserErrorType::NoPrefixParseFn(token.clone()),
                    ))
                }
            },
        };

        Ok(Expr::new(expr, self.span_from(start)))
    }

    /// Starts with `current` on the operator token.
    fn parse_infix(&mut self, op: ParserOperator, left: Expr) -> ParserResult<Expr> {
        let start = left.span;

        let expr = match op {
            ParserOperator::Infix(infix_op) => {
                self.bump();
                let right = self.parse_expression(op.precedence())?;
                ExprType::Infix(infix_op, Box::new(left), Box::new(right))
            }
            ParserOperator::Postfix(postfix_op) => ExprType::Postfix(postfix_op, Box::new(left)),
            ParserOperator::Assign(assign_op) => {
                let op_position = self.current.span.start_pos;
                self.bump();
                let value = self.parse_expression(Precedence::Lowest)?;

                if !matches!(left.expr, ExprType::Identifier(_) | ExprType::Index(..)) {
                    return Err(ParserError::new(
                        op_position,
                        ParserErrorType::InvalidAssignTarget(left.token_literal()),
                    ));
                }
                ExprType::Assign(assign_op, Box::new(left), Box::new(value))
            }
            ParserOperator::Call => {
                let args = self.parse_expression_list(Token::RightParen)?;
                ExprType::Call(Box::new(left), args)
            }
            ParserOperator::MethodCall => {
                let name = self.parse_identifier_after()?;
                let name_span = name.span;
                let callee = Expr::new(ExprType::Identifier(name), name_span);

                // `obj.name` without parentheses stays a bare identifier.
                let call = if self.peek_is(&Token::LeftParen) {
                    self.bump();
                    let args = self.parse_expression_list(Token::RightParen)?;
                    Expr::new(
                        ExprType::Call(Box::new(callee), args),
                        self.span_from(name_span),
                    )
                } else {
                    callee
                };
                ExprType::MethodCall(Box::new(left), Box::new(call))
            }
            ParserOperator::Index => {
                let index = if self.peek_is(&Token::Colon) {
                    let implicit_start = Expr::new(
                        ExprType::Literal(Literal::Integer(0)),
                        self.current.span,
                    );
                    self.bump();
                    self.parse_slice(implicit_start)?
                } else {
                    self.bump();
                    self.parse_expression(Precedence::Lowest)?
                };
                self.expect_peek(Token::RightBracket)?;
                ExprType::Index(Box::new(left), Box::new(index))
            }
            ParserOperator::Slice => return self.parse_slice(left),
        };

        Ok(Expr::new(expr, self.span_from(start)))
    }

    /// Starts on the `:`. The end is absent when `]` follows directly.
    fn parse_slice(&mut self, start: Expr) -> ParserResult<Expr> {
        let start_span = start.span;

        let end = if self.peek_is(&Token::RightBracket) {
            None
        } else {
            self.bump();
            Some(Box::new(self.parse_expression(Precedence::Lowest)?))
        };

        Ok(Expr::new(
            ExprType::Slice(Box::new(start), end),
            self.span_from(start_span),
        ))
    }

    fn parse_grouping(&mut self) -> ParserResult<Expr> {
        self.bump();
        let expr = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(Token::RightParen)?;
        Ok(expr)
    }

    /// Comma separated expressions up to `end`. Starts on the opening token.
    fn parse_expression_list(&mut self, end: Token) -> ParserResult<Vec<Expr>> {
        let mut exprs = vec![];

        if self.peek_is(&end) {
            self.bump();
            return Ok(exprs);
        }

        self.bump();
        exprs.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(&Token::Comma) {
            self.bump();
            self.bump();
            exprs.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Ok(exprs)
    }

    /// Keys bind at slice precedence so the `:` separator is not taken as a slice.
    fn parse_hash(&mut self) -> ParserResult<ExprType> {
        let mut pairs = vec![];

        if self.peek_is(&Token::RightBrace) {
            self.bump();
            return Ok(ExprType::Hash(pairs));
        }

        loop {
            self.bump();
            let key = self.parse_expression(Precedence::Slice)?;
            self.expect_peek(Token::Colon)?;
            self.bump();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if self.peek_is(&Token::Comma) {
                self.bump();
            } else {
                self.expect_peek(Token::RightBrace)?;
                break;
            }
        }

        Ok(ExprType::Hash(pairs))
    }

    fn parse_function(&mut self) -> ParserResult<FunctionLiteral> {
        let start = self.current.span;
        self.expect_peek(Token::LeftParen)?;

        let mut params = vec![];
        if self.peek_is(&Token::RightParen) {
            self.bump();
        } else {
            params.push(self.parse_identifier_after()?);
            while self.peek_is(&Token::Comma) {
                self.bump();
                params.push(self.parse_identifier_after()?);
            }
            self.expect_peek(Token::RightParen)?;
        }

        self.expect_peek(Token::LeftBrace)?;
        let body = self.parse_block()?;

        Ok(FunctionLiteral {
            params,
            body,
            span: self.span_from(start),
        })
    }

    /// `(condition)` as used by `if` and `while`. Ends on the `)`.
    fn parse_condition(&mut self) -> ParserResult<Expr> {
        self.expect_peek(Token::LeftParen)?;
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_current(Token::RightParen)?;
        Ok(condition)
    }

    fn parse_if(&mut self) -> ParserResult<ExprType> {
        let condition = self.parse_condition()?;
        self.expect_peek(Token::LeftBrace)?;
        let consequence = self.parse_block()?;

        let alternative = if self.peek_is(&Token::Else) {
            self.bump();
            self.expect_peek(Token::LeftBrace)?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(ExprType::If(Box::new(condition), consequence, alternative))
    }

    fn parse_while(&mut self) -> ParserResult<ExprType> {
        let condition = self.parse_condition()?;
        self.expect_peek(Token::LeftBrace)?;
        let body = self.parse_block()?;

        Ok(ExprType::While(Box::new(condition), body))
    }

    /// `for (init; cond; update) {}` with every clause optional, or a bare `for {}`.
    fn parse_for(&mut self) -> ParserResult<ExprType> {
        if self.peek_is(&Token::LeftBrace) {
            self.bump();
            let body = self.parse_block()?;
            return Ok(ExprType::For(Box::new(ForLoop {
                init: None,
                condition: None,
                update: None,
                body,
            })));
        }

        self.expect_peek(Token::LeftParen)?;
        self.bump();

        let init = if self.current_is(&Token::Semicolon) {
            None
        } else {
            let start = self.current.span;
            let stmt = if self.current_is(&Token::Let) {
                self.parse_let()?
            } else {
                StmtType::Expression(self.parse_expression(Precedence::Lowest)?)
            };
            let init = Stmt::new(stmt, self.span_from(start));
            self.expect_peek(Token::Semicolon)?;
            Some(init)
        };

        self.bump();
        let condition = if self.current_is(&Token::Semicolon) {
            None
        } else {
            let condition = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(Token::Semicolon)?;
            Some(condition)
        };

        self.bump();
        let update = if self.current_is(&Token::RightParen) {
            None
        } else {
            let update = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(Token::RightParen)?;
            Some(update)
        };

        self.expect_peek(Token::LeftBrace)?;
        let body = self.parse_block()?;

        Ok(ExprType::For(Box::new(ForLoop {
            init,
            condition,
            update,
            body,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::operator::{AssignOperator, InfixOperator, PostfixOperator};
    use pretty_assertions::assert_eq;

    fn parse_ok(source: &str) -> Program {
        let (program, errors) = parse_program(source);
        assert!(errors.is_empty(), "unexpected errors for {:?}: {:?}", source, errors);
        program
    }

    fn single_expr(source: &str) -> Expr {
        let mut program = parse_ok(source);
        assert_eq!(program.stmts.len(), 1);
        match program.stmts.remove(0).stmt {
            StmtType::Expression(expr) => expr,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    fn error_messages(source: &str) -> Vec<String> {
        let (_, errors) = parse_program(source);
        errors.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_operator_precedence() {
        let cases = [
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("true", "true"),
            ("3 > 5 == false", "((3 > 5) == false)"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            (
                "add(a + b + c * d / f + g)",
                "add((((a + b) + ((c * d) / f)) + g))",
            ),
            (
                "a * [1, 2, 3, 4][b * c] * d",
                "((a * ([1, 2, 3, 4][(b * c)])) * d)",
            ),
            (
                "add(a * b[2], b[1], 2 * [1, 2][1])",
                "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
            ),
            ("a ++ - b--", "((a++) - (b--))"),
            ("++a * b", "((++a) * b)"),
            ("a || b && c", "(a || (b && c))"),
            ("a % b * c", "((a % b) * c)"),
            ("x = y = 1 + 2", "x=y=(1 + 2)"),
            ("x += a * b", "x+=(a * b)"),
            ("arr[1:2]", "(arr[(1:2)])"),
            ("arr[:n - 1]", "(arr[(0:(n - 1))])"),
            ("arr[2:]", "(arr[(2:)])"),
            ("s.split(\",\")", "s.split(,)"),
            ("typeof 1 + 2", "typeof(1 + 2)"),
        ];

        for (source, expected) in cases.iter() {
            assert_eq!(parse_ok(source).to_string(), *expected, "source: {}", source);
        }
    }

    #[test]
    fn test_let_and_return_statements() {
        let program = parse_ok("let x = 5; let y = true; return x + y; return;");
        let rendered: Vec<_> = program
            .stmts
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            rendered,
            vec!["let x = 5", "let y = true", "return (x + y)", "return "]
        );
    }

    #[test]
    fn test_semicolons_become_empty_statements() {
        let program = parse_ok("a;; b");
        assert_eq!(program.stmts.len(), 4);
        assert!(program.stmts[1].is_empty());
        assert!(program.stmts[2].is_empty());
    }

    #[test]
    fn test_literals() {
        match single_expr("3.5").expr {
            ExprType::Literal(Literal::Float(f)) => assert_eq!(f, 3.5),
            other => panic!("unexpected {:?}", other),
        }
        match single_expr("'hello world'").expr {
            ExprType::Literal(Literal::Str(s)) => assert_eq!(s, "hello world"),
            other => panic!("unexpected {:?}", other),
        }
        match single_expr("null").expr {
            ExprType::Literal(Literal::Null) => {}
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(single_expr("[]").to_string(), "[]");
        assert_eq!(single_expr("{}").to_string(), "{}");
        assert_eq!(
            single_expr("{one: 1, 'two': 2, 3: 2 + 1}").to_string(),
            "{one:1, two:2, 3:(2 + 1)}"
        );
    }

    #[test]
    fn test_if_else() {
        let expr = single_expr("if (x < y) { x } else { y; }");
        assert_eq!(expr.to_string(), "if(x < y) x; else y; ");

        match expr.expr {
            ExprType::If(condition, consequence, alternative) => {
                assert_eq!(condition.to_string(), "(x < y)");
                assert_eq!(consequence.stmts.len(), 1);
                assert!(alternative.is_some());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_function_literal() {
        let expr = single_expr("function(x, y) { return x + y; }");
        match &expr.expr {
            ExprType::Function(func) => {
                let names: Vec<_> = func.params.iter().map(|p| p.name.as_str()).collect();
                assert_eq!(names, vec!["x", "y"]);
                assert_eq!(func.body.to_string(), "return (x + y); ");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(single_expr("function() {}").to_string(), "function()");
    }

    #[test]
    fn test_loops() {
        let expr = single_expr("for (let i = 0; i < 10; i++) { sum += i; }");
        match &expr.expr {
            ExprType::For(for_loop) => {
                assert_eq!(
                    for_loop.init.as_ref().map(|s| s.to_string()),
                    Some("let i = 0".to_owned())
                );
                assert_eq!(
                    for_loop.condition.as_ref().map(|e| e.to_string()),
                    Some("(i < 10)".to_owned())
                );
                assert_eq!(
                    for_loop.update.as_ref().map(|e| e.to_string()),
                    Some("(i++)".to_owned())
                );
                assert_eq!(for_loop.body.stmts.len(), 2);
            }
            other => panic!("unexpected {:?}", other),
        }

        for source in ["for (;;) { break; }", "for { break }"].iter() {
            match single_expr(source).expr {
                ExprType::For(for_loop) => {
                    assert!(for_loop.init.is_none());
                    assert!(for_loop.condition.is_none());
                    assert!(for_loop.update.is_none());
                }
                other => panic!("unexpected {:?}", other),
            }
        }

        assert_eq!(
            single_expr("while (i > 0) { i -= 1 }").to_string(),
            "while ( (i > 0) ) { i-=1; }"
        );
    }

    #[test]
    fn test_assignment_targets() {
        match single_expr("a[0] *= 2").expr {
            ExprType::Assign(AssignOperator::MultiplyAssign, target, _) => {
                assert!(matches!(target.expr, ExprType::Index(..)));
            }
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(
            error_messages("1 = 2"),
            vec!["[1:3]expected assign token to be an identifier, got 1 instead"]
        );
        assert_eq!(
            error_messages("a + b = c"),
            vec!["[1:7]expected assign token to be an identifier, got + instead"]
        );
    }

    #[test]
    fn test_method_calls() {
        match single_expr("arr.push(1, 2)").expr {
            ExprType::MethodCall(object, call) => {
                assert_eq!(object.to_string(), "arr");
                match call.expr {
                    ExprType::Call(function, args) => {
                        assert_eq!(function.to_string(), "push");
                        assert_eq!(args.len(), 2);
                    }
                    other => panic!("unexpected {:?}", other),
                }
            }
            other => panic!("unexpected {:?}", other),
        }

        match single_expr("arr.length").expr {
            ExprType::MethodCall(_, call) => {
                assert!(matches!(call.expr, ExprType::Identifier(_)));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_postfix_and_prefix_increments() {
        match single_expr("i--").expr {
            ExprType::Postfix(PostfixOperator::Decrement, operand) => {
                assert_eq!(operand.to_string(), "i");
            }
            other => panic!("unexpected {:?}", other),
        }
        match single_expr("a && b").expr {
            ExprType::Infix(InfixOperator::And, ..) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_syntax_errors() {
        assert_eq!(
            error_messages("let = 5"),
            vec![
                "[1:5]expected token to be IDENT, got = instead",
                "[1:5]no prefix parse function for = found",
            ]
        );
        assert_eq!(
            error_messages("(1 + 2"),
            vec!["[1:7]expected token to be ), got EOF instead"]
        );
        assert_eq!(
            error_messages("if (x) { 1"),
            vec!["[1:11]expected token to be }, got EOF instead"]
        );
        assert_eq!(
            error_messages("99999999999999999999"),
            vec!["[1:1]could not parse \"99999999999999999999\" as integer"]
        );
        assert_eq!(
            error_messages("1.2.3"),
            vec!["[1:1]could not parse \"1.2.3\" as float"]
        );
    }

    #[test]
    fn test_deeply_nested_grouping() {
        let depth = 20_000;
        let source = format!("{}1 + 2{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(single_expr(&source).to_string(), "(1 + 2)");
    }

    #[test]
    fn test_parsing_resumes_after_errors() {
        let (program, errors) = parse_program("let x 5; let y = 10;");
        assert_eq!(errors.len(), 1);
        assert!(program
            .stmts
            .iter()
            .any(|s| s.to_string() == "let y = 10"));
    }
}
