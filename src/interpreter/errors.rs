use super::object::ObjectKind;

use thiserror::Error;

#[derive(Debug, PartialEq, Clone, Error)]
pub enum RuntimeError {
    #[error("unsupported prefix operator '{0}' for type: {1}")]
    PrefixOp(&'static str, ObjectKind),
    #[error("unsupported infix operator '{0}' for type {1} and {2}")]
    InfixOp(&'static str, ObjectKind, ObjectKind),
    #[error("unknown identifier: '{0}' is not defined")]
    UnknownIdentifier(String),
    #[error("undefined method '{0}' for object {1}")]
    NoMethod(String, ObjectKind),
    #[error("type {0} does not support index operator")]
    NotIndexable(ObjectKind),
    #[error("type {0} is not hashable")]
    NotHashable(ObjectKind),
    #[error("index '{index}' is out of range, valid range is [{low}, {high}]")]
    IndexOutOfRange { index: i64, low: i64, high: i64 },
    #[error("slicing start index {0} must not be greater than end index {1}")]
    SliceBounds(usize, usize),
    #[error("wrong number of arguments. expected: {0}, got: {1}")]
    ArgumentCount(String, usize),
    #[error("wrong type of arguments. expected: {0}, got: {1}")]
    ArgumentType(String, ObjectKind),
    #[error("cannot divide by zero")]
    DivideByZero,
    #[error("{0} is not a function")]
    NotAFunction(String),
    #[error("variable {0} has been defined")]
    Redefined(String),
    #[error("evaluation timeout")]
    Timeout,
    #[error("the expression {0} is not an lvalue")]
    NotAnLvalue(String),
    #[error("index must be integer")]
    IndexNotInteger,
    #[error("{0}")]
    Custom(String),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            RuntimeError::InfixOp("+", ObjectKind::Integer, ObjectKind::Boolean).to_string(),
            "unsupported infix operator '+' for type INTEGER and BOOLEAN"
        );
        assert_eq!(
            RuntimeError::IndexOutOfRange {
                index: 5,
                low: 0,
                high: 2
            }
            .to_string(),
            "index '5' is out of range, valid range is [0, 2]"
        );
        assert_eq!(
            RuntimeError::UnknownIdentifier("foo".to_owned()).to_string(),
            "unknown identifier: 'foo' is not defined"
        );
        assert_eq!(RuntimeError::Timeout.to_string(), "evaluation timeout");
    }
}
