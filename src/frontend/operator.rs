use super::token::Token;

/// Binding power of operators, lowest first.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Precedence {
    Lowest,
    Assign,
    Or,
    And,
    Equals,
    LessGreater,
    Slice,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
    IncrDecr,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrefixOperator {
    Negate,
    LogicalNot,
    Increment,
    Decrement,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InfixOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterEq,
    LessThan,
    LessEq,
    And,
    Or,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PostfixOperator {
    Increment,
    Decrement,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AssignOperator {
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
}

/// Every operator that can follow a complete left operand.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParserOperator {
    Infix(InfixOperator),
    Assign(AssignOperator),
    Postfix(PostfixOperator),
    Call,
    MethodCall,
    Index,
    Slice,
}

impl PrefixOperator {
    pub fn from_token(token: &Token) -> Option<PrefixOperator> {
        let op = match token {
            Token::Minus => PrefixOperator::Negate,
            Token::Bang => PrefixOperator::LogicalNot,
            Token::Increment => PrefixOperator::Increment,
            Token::Decrement => PrefixOperator::Decrement,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            PrefixOperator::Negate => "-",
            PrefixOperator::LogicalNot => "!",
            PrefixOperator::Increment => "++",
            PrefixOperator::Decrement => "--",
        }
    }
}

impl InfixOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            InfixOperator::Add => "+",
            InfixOperator::Subtract => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::Modulo => "%",
            InfixOperator::EqualTo => "==",
            InfixOperator::NotEqualTo => "!=",
            InfixOperator::GreaterThan => ">",
            InfixOperator::GreaterEq => ">=",
            InfixOperator::LessThan => "<",
            InfixOperator::LessEq => "<=",
            InfixOperator::And => "&&",
            InfixOperator::Or => "||",
        }
    }
}

impl PostfixOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            PostfixOperator::Increment => "++",
            PostfixOperator::Decrement => "--",
        }
    }
}

impl AssignOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            AssignOperator::Assign => "=",
            AssignOperator::AddAssign => "+=",
            AssignOperator::SubtractAssign => "-=",
            AssignOperator::MultiplyAssign => "*=",
            AssignOperator::DivideAssign => "/=",
        }
    }

    /// The arithmetic a compound assignment applies, None for plain `=`.
    pub fn arithmetic(&self) -> Option<InfixOperator> {
        match self {
            AssignOperator::Assign => None,
            AssignOperator::AddAssign => Some(InfixOperator::Add),
            AssignOperator::SubtractAssign => Some(InfixOperator::Subtract),
            AssignOperator::MultiplyAssign => Some(InfixOperator::Multiply),
            AssignOperator::DivideAssign => Some(InfixOperator::Divide),
        }
    }
}

impl ParserOperator {
    pub fn from_token(token: &Token) -> Option<ParserOperator> {
        let op = match token {
            Token::Plus => ParserOperator::Infix(InfixOperator::Add),
            Token::Minus => ParserOperator::Infix(InfixOperator::Subtract),
            Token::Asterisk => ParserOperator::Infix(InfixOperator::Multiply),
            Token::Slash => ParserOperator::Infix(InfixOperator::Divide),
            Token::Percent => ParserOperator::Infix(InfixOperator::Modulo),
            Token::DoubleEq => ParserOperator::Infix(InfixOperator::EqualTo),
            Token::BangEq => ParserOperator::Infix(InfixOperator::NotEqualTo),
            Token::RightAngle => ParserOperator::Infix(InfixOperator::GreaterThan),
            Token::RightAngleEq => ParserOperator::Infix(InfixOperator::GreaterEq),
            Token::LeftAngle => ParserOperator::Infix(InfixOperator::LessThan),
            Token::LeftAngleEq => ParserOperator::Infix(InfixOperator::LessEq),
            Token::And => ParserOperator::Infix(InfixOperator::And),
            Token::Or => ParserOperator::Infix(InfixOperator::Or),
            Token::Equals => ParserOperator::Assign(AssignOperator::Assign),
            Token::PlusEq => ParserOperator::Assign(AssignOperator::AddAssign),
            Token::MinusEq => ParserOperator::Assign(AssignOperator::SubtractAssign),
            Token::AsteriskEq => ParserOperator::Assign(AssignOperator::MultiplyAssign),
            Token::SlashEq => ParserOperator::Assign(AssignOperator::DivideAssign),
            Token::Increment => ParserOperator::Postfix(PostfixOperator::Increment),
            Token::Decrement => ParserOperator::Postfix(PostfixOperator::Decrement),
            Token::LeftParen => ParserOperator::Call,
            Token::Dot => ParserOperator::MethodCall,
            Token::LeftBracket => ParserOperator::Index,
            Token::Colon => ParserOperator::Slice,
            _ => return None,
        };
        Some(op)
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            ParserOperator::Infix(op) => match op {
                InfixOperator::Or => Precedence::Or,
                InfixOperator::And => Precedence::And,
                InfixOperator::EqualTo | InfixOperator::NotEqualTo => Precedence::Equals,
                InfixOperator::GreaterThan
                | InfixOperator::GreaterEq
                | InfixOperator::LessThan
                | InfixOperator::LessEq => Precedence::LessGreater,
                InfixOperator::Add | InfixOperator::Subtract => Precedence::Sum,
                InfixOperator::Multiply | InfixOperator::Divide | InfixOperator::Modulo => {
                    Precedence::Product
                }
            },
            ParserOperator::Assign(_) => Precedence::Assign,
            ParserOperator::Slice => Precedence::Slice,
            ParserOperator::Call | ParserOperator::MethodCall => Precedence::Call,
            ParserOperator::Index => Precedence::Index,
            ParserOperator::Postfix(_) => Precedence::IncrDecr,
        }
    }
}

/// Precedence of a token in infix position; tokens without an infix role bind at `Lowest`.
pub fn token_precedence(token: &Token) -> Precedence {
    ParserOperator::from_token(token).map_or(Precedence::Lowest, |op| op.precedence())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::more_asserts::*;

    #[test]
    fn test_precedence() {
        assert_lt!(Precedence::Lowest, Precedence::Assign);
        assert_lt!(Precedence::Or, Precedence::And);
        assert_lt!(Precedence::LessGreater, Precedence::Slice);
        assert_lt!(Precedence::Slice, Precedence::Sum);
        assert_gt!(Precedence::Product, Precedence::Sum);
        assert_gt!(Precedence::IncrDecr, Precedence::Index);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            ParserOperator::from_token(&Token::Plus),
            Some(ParserOperator::Infix(InfixOperator::Add))
        );
        assert_eq!(
            ParserOperator::from_token(&Token::PlusEq),
            Some(ParserOperator::Assign(AssignOperator::AddAssign))
        );
        assert_eq!(
            PrefixOperator::from_token(&Token::Decrement),
            Some(PrefixOperator::Decrement)
        );
        assert_eq!(ParserOperator::from_token(&Token::Bang), None);
        assert_eq!(PrefixOperator::from_token(&Token::Asterisk), None);

        assert_eq!(token_precedence(&Token::SlashEq), Precedence::Assign);
        assert_eq!(token_precedence(&Token::Dot), Precedence::Call);
        assert_eq!(token_precedence(&Token::RightBracket), Precedence::Lowest);
    }
}
