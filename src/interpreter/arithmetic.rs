use super::errors::{RuntimeError, RuntimeResult};
use super::object::{Object, ObjectKind};
use crate::frontend::operator::{AssignOperator, InfixOperator, PrefixOperator};

/// `-` and `!`. Increment and decrement go through `step` since they need
/// somewhere to store the result.
pub fn eval_prefix(op: PrefixOperator, value: Object) -> RuntimeResult<Object> {
    match op {
        PrefixOperator::LogicalNot => Ok(Object::Boolean(!value.is_truthy())),
        PrefixOperator::Negate => match value {
            Object::Integer(n) => Ok(Object::Integer(n.wrapping_neg())),
            Object::Float(n) => Ok(Object::Float(-n)),
            other => Err(RuntimeError::PrefixOp(op.symbol(), other.kind())),
        },
        PrefixOperator::Increment => Ok(step(&value, 1).unwrap_or(Object::Null)),
        PrefixOperator::Decrement => Ok(step(&value, -1).unwrap_or(Object::Null)),
    }
}

/// Adds `delta` to a number. None for anything that is not a number.
pub fn step(value: &Object, delta: i64) -> Option<Object> {
    match value {
        Object::Integer(n) => Some(Object::Integer(n.wrapping_add(delta))),
        Object::Float(n) => Some(Object::Float(n + delta as f64)),
        _ => None,
    }
}

pub fn eval_infix(op: InfixOperator, lhs: Object, rhs: Object) -> RuntimeResult<Object> {
    match op {
        InfixOperator::And => return Ok(Object::Boolean(lhs.is_truthy() && rhs.is_truthy())),
        InfixOperator::Or => return Ok(Object::Boolean(lhs.is_truthy() || rhs.is_truthy())),
        _ => {}
    }

    if lhs.is_number() && rhs.is_number() {
        return eval_numeric(op, &lhs, &rhs);
    }

    match op {
        InfixOperator::EqualTo => Ok(Object::Boolean(values_equal(&lhs, &rhs))),
        InfixOperator::NotEqualTo => Ok(Object::Boolean(!values_equal(&lhs, &rhs))),
        InfixOperator::Add
            if lhs.kind() == ObjectKind::String || rhs.kind() == ObjectKind::String =>
        {
            Ok(Object::String(lhs.render(0) + &rhs.render(0)))
        }
        _ => Err(RuntimeError::InfixOp(op.symbol(), lhs.kind(), rhs.kind())),
    }
}

/// Applies a compound assignment to the value currently stored in the target.
/// Plain `=` simply yields the new value.
pub fn eval_compound(op: AssignOperator, old: Object, new: Object) -> RuntimeResult<Object> {
    let arithmetic = match op.arithmetic() {
        Some(arithmetic) => arithmetic,
        None => return Ok(new),
    };

    match old {
        Object::Integer(_) | Object::Float(_) if new.is_number() => {
            eval_numeric(arithmetic, &old, &new)
        }
        Object::String(s) if op == AssignOperator::AddAssign => {
            Ok(Object::String(s + &new.render(0)))
        }
        old => Err(RuntimeError::InfixOp(op.symbol(), old.kind(), new.kind())),
    }
}

/// Equality is by value for scalars and strings. Collections and functions
/// never compare equal, not even to themselves.
fn values_equal(lhs: &Object, rhs: &Object) -> bool {
    match (lhs, rhs) {
        (Object::Boolean(a), Object::Boolean(b)) => a == b,
        (Object::Null, Object::Null) => true,
        (Object::String(a), Object::String(b)) => a == b,
        (a, b) if a.is_number() && b.is_number() => a.as_f64() == b.as_f64(),
        _ => false,
    }
}

fn eval_numeric(op: InfixOperator, lhs: &Object, rhs: &Object) -> RuntimeResult<Object> {
    let (lv, rv) = match (lhs.as_f64(), rhs.as_f64()) {
        (Some(lv), Some(rv)) => (lv, rv),
        _ => return Err(RuntimeError::InfixOp(op.symbol(), lhs.kind(), rhs.kind())),
    };

    // Comparisons always go through f64, even for two integers.
    let compared = match op {
        InfixOperator::GreaterThan => Some(lv > rv),
        InfixOperator::GreaterEq => Some(lv >= rv),
        InfixOperator::LessThan => Some(lv < rv),
        InfixOperator::LessEq => Some(lv <= rv),
        InfixOperator::EqualTo => Some(lv == rv),
        InfixOperator::NotEqualTo => Some(lv != rv),
        _ => None,
    };
    if let Some(b) = compared {
        return Ok(Object::Boolean(b));
    }

    if matches!(op, InfixOperator::Divide | InfixOperator::Modulo) && rv == 0.0 {
        return Err(RuntimeError::DivideByZero);
    }

    if let (Object::Integer(a), Object::Integer(b)) = (lhs, rhs) {
        let value = match op {
            InfixOperator::Add => a.wrapping_add(*b),
            InfixOperator::Subtract => a.wrapping_sub(*b),
            InfixOperator::Multiply => a.wrapping_mul(*b),
            InfixOperator::Divide => a.wrapping_div(*b),
            InfixOperator::Modulo => a.wrapping_rem(*b),
            _ => return Err(RuntimeError::InfixOp(op.symbol(), lhs.kind(), rhs.kind())),
        };
        return Ok(Object::Integer(value));
    }

    let value = match op {
        InfixOperator::Add => lv + rv,
        InfixOperator::Subtract => lv - rv,
        InfixOperator::Multiply => lv * rv,
        InfixOperator::Divide => lv / rv,
        InfixOperator::Modulo => lv % rv,
        _ => return Err(RuntimeError::InfixOp(op.symbol(), lhs.kind(), rhs.kind())),
    };
    Ok(Object::Float(value))
}
