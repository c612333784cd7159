use super::arithmetic::eval_compound;
use super::errors::{RuntimeError, RuntimeResult};
use super::object::Object;
use crate::frontend::operator::AssignOperator;

/// Normalizes a possibly negative index against `len`. With `end` set the
/// valid range grows by one so that a slice may end after the last element.
pub fn calc_index(len: usize, index: &Object, end: bool) -> RuntimeResult<usize> {
    let index = match index {
        Object::Integer(n) => *n,
        _ => return Err(RuntimeError::IndexNotInteger),
    };

    let max = len as i64 + end as i64;
    let normalized = if index < 0 { index + max } else { index };

    if normalized >= max {
        return Err(RuntimeError::IndexOutOfRange {
            index,
            low: 0,
            high: max - 1,
        });
    }
    if normalized < 0 {
        return Err(RuntimeError::IndexOutOfRange {
            index,
            low: -1,
            high: -max,
        });
    }
    Ok(normalized as usize)
}

/// `container[index]`. Out-of-range reads of arrays and strings give null, as
/// does a missing hash key.
pub fn index_read(container: &Object, index: &Object) -> RuntimeResult<Object> {
    match container {
        Object::Array(array) => match calc_index(array.len(), index, false) {
            Ok(idx) => Ok(array.get(idx).unwrap_or(Object::Null)),
            Err(RuntimeError::IndexOutOfRange { .. }) => Ok(Object::Null),
            Err(e) => Err(e),
        },
        Object::String(s) => match calc_index(s.len(), index, false) {
            Ok(idx) => Ok(Object::String(char::from(s.as_bytes()[idx]).to_string())),
            Err(RuntimeError::IndexOutOfRange { .. }) => Ok(Object::Null),
            Err(e) => Err(e),
        },
        Object::Hash(hash) => Ok(hash.get(index)?.unwrap_or(Object::Null)),
        other => Err(RuntimeError::NotIndexable(other.kind())),
    }
}

/// `container[start:end]`. Array slices share storage with the array they came from;
/// string slices are copies.
pub fn slice(container: &Object, start: &Object, end: Option<&Object>) -> RuntimeResult<Object> {
    let len = match container {
        Object::Array(array) => array.len(),
        Object::String(s) => s.len(),
        other => return Err(RuntimeError::NotIndexable(other.kind())),
    };

    let start = calc_index(len, start, false)?;
    let end = match end {
        Some(end) => calc_index(len, end, true)?,
        None => len,
    };
    if start > end {
        return Err(RuntimeError::SliceBounds(start, end));
    }

    match container {
        Object::Array(array) => Ok(Object::Array(array.slice(start, end))),
        Object::String(s) => {
            let bytes = &s.as_bytes()[start..end];
            Ok(Object::String(String::from_utf8_lossy(bytes).into_owned()))
        }
        other => Err(RuntimeError::NotIndexable(other.kind())),
    }
}

/// `container[index] op= value`, returning the stored value.
pub fn assign_element(
    container: &Object,
    index: Object,
    op: AssignOperator,
    value: Object,
) -> RuntimeResult<Object> {
    match container {
        Object::Array(array) => {
            let idx = calc_index(array.len(), &index, false)?;
            let old = array.get(idx).unwrap_or(Object::Null);
            let new = eval_compound(op, old, value)?;
            array.set(idx, new.clone());
            Ok(new)
        }
        Object::Hash(hash) => {
            let new = match op {
                AssignOperator::Assign => value,
                _ => {
                    let old = hash.get(&index)?.unwrap_or(Object::Null);
                    eval_compound(op, old, value)?
                }
            };
            hash.insert(index, new.clone())?;
            Ok(new)
        }
        Object::String(_) => Err(RuntimeError::Custom("string is immutable".to_owned())),
        other => Err(RuntimeError::NotIndexable(other.kind())),
    }
}

/// `delete container[index]`. Array slots are nulled rather than removed.
pub fn delete_element(container: &Object, index: &Object) -> RuntimeResult<Object> {
    match container {
        Object::Array(array) => {
            let idx = calc_index(array.len(), index, false)?;
            Ok(array.set(idx, Object::Null).unwrap_or(Object::Null))
        }
        Object::Hash(hash) => Ok(hash.remove(index)?.unwrap_or(Object::Null)),
        other => Err(RuntimeError::NotIndexable(other.kind())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::object::{Array, Hash, ObjectKind};

    fn ints(values: &[i64]) -> Object {
        Object::Array(Array::new(values.iter().map(|&n| Object::Integer(n)).collect()))
    }

    fn string(s: &str) -> Object {
        Object::String(s.to_owned())
    }

    #[test]
    fn test_calc_index_bounds() {
        assert_eq!(calc_index(3, &Object::Integer(-1), false), Ok(2));
        assert_eq!(calc_index(3, &Object::Integer(-3), false), Ok(0));
        assert_eq!(calc_index(3, &Object::Integer(3), true), Ok(3));
        assert_eq!(
            calc_index(3, &Object::Integer(3), false),
            Err(RuntimeError::IndexOutOfRange {
                index: 3,
                low: 0,
                high: 2
            })
        );
        assert_eq!(
            calc_index(3, &Object::Integer(-4), false),
            Err(RuntimeError::IndexOutOfRange {
                index: -4,
                low: -1,
                high: -3
            })
        );
        assert_eq!(
            calc_index(3, &Object::Float(1.0), false),
            Err(RuntimeError::IndexNotInteger)
        );
    }

    #[test]
    fn test_index_read() {
        let array = ints(&[1, 2, 3]);
        assert_eq!(index_read(&array, &Object::Integer(-1)), Ok(Object::Integer(3)));
        assert_eq!(index_read(&array, &Object::Integer(3)), Ok(Object::Null));
        assert_eq!(index_read(&array, &Object::Integer(-4)), Ok(Object::Null));

        assert_eq!(index_read(&string("abc"), &Object::Integer(1)), Ok(string("b")));
        assert_eq!(index_read(&string("abc"), &Object::Integer(9)), Ok(Object::Null));

        let hash = Hash::new();
        hash.insert(string("k"), Object::Integer(1)).unwrap();
        let hash = Object::Hash(hash);
        assert_eq!(index_read(&hash, &string("k")), Ok(Object::Integer(1)));
        assert_eq!(index_read(&hash, &string("missing")), Ok(Object::Null));
        assert_eq!(
            index_read(&hash, &ints(&[])),
            Err(RuntimeError::NotHashable(ObjectKind::Array))
        );

        assert_eq!(
            index_read(&Object::Integer(1), &Object::Integer(0)),
            Err(RuntimeError::NotIndexable(ObjectKind::Integer))
        );
    }

    #[test]
    fn test_slice() {
        let array = ints(&[1, 2, 3, 4]);
        match slice(&array, &Object::Integer(1), Some(&Object::Integer(3))) {
            Ok(Object::Array(sliced)) => {
                assert_eq!(sliced.elements(), vec![Object::Integer(2), Object::Integer(3)])
            }
            other => panic!("unexpected {:?}", other),
        }

        assert_eq!(
            slice(&string("hello"), &Object::Integer(1), None),
            Ok(string("ello"))
        );
        assert_eq!(
            slice(&string("hello"), &Object::Integer(0), Some(&Object::Integer(-1))),
            Ok(string("hello"))
        );
        assert_eq!(
            slice(&array, &Object::Integer(3), Some(&Object::Integer(1))),
            Err(RuntimeError::SliceBounds(3, 1))
        );
        assert_eq!(
            slice(&array, &Object::Integer(4), None),
            Err(RuntimeError::IndexOutOfRange {
                index: 4,
                low: 0,
                high: 3
            })
        );
    }

    #[test]
    fn test_assign_element() {
        let array = ints(&[1, 2]);
        assert_eq!(
            assign_element(&array, Object::Integer(0), AssignOperator::AddAssign, Object::Integer(5)),
            Ok(Object::Integer(6))
        );
        assert_eq!(index_read(&array, &Object::Integer(0)), Ok(Object::Integer(6)));
        assert_eq!(
            assign_element(&array, Object::Integer(2), AssignOperator::Assign, Object::Null),
            Err(RuntimeError::IndexOutOfRange {
                index: 2,
                low: 0,
                high: 1
            })
        );

        let hash = Object::Hash(Hash::new());
        assert_eq!(
            assign_element(&hash, string("n"), AssignOperator::Assign, Object::Integer(1)),
            Ok(Object::Integer(1))
        );
        assert_eq!(
            assign_element(&hash, string("n"), AssignOperator::MultiplyAssign, Object::Float(2.5)),
            Ok(Object::Float(2.5))
        );
        assert_eq!(
            assign_element(&hash, string("m"), AssignOperator::AddAssign, Object::Integer(1)),
            Err(RuntimeError::InfixOp("+=", ObjectKind::Null, ObjectKind::Integer))
        );

        assert_eq!(
            assign_element(&string("abc"), Object::Integer(0), AssignOperator::Assign, string("x")),
            Err(RuntimeError::Custom("string is immutable".to_owned()))
        );
    }

    #[test]
    fn test_delete_element() {
        let array = ints(&[1, 2]);
        assert_eq!(delete_element(&array, &Object::Integer(0)), Ok(Object::Integer(1)));
        assert_eq!(index_read(&array, &Object::Integer(0)), Ok(Object::Null));

        let hash = Hash::new();
        hash.insert(string("k"), Object::Integer(1)).unwrap();
        let hash = Object::Hash(hash);
        assert_eq!(delete_element(&hash, &string("k")), Ok(Object::Integer(1)));
        assert_eq!(delete_element(&hash, &string("k")), Ok(Object::Null));

        assert_eq!(
            delete_element(&Object::Null, &Object::Integer(0)),
            Err(RuntimeError::NotIndexable(ObjectKind::Null))
        );
    }
}
