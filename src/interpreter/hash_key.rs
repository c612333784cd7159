use super::errors::{RuntimeError, RuntimeResult};
use super::object::{Object, ObjectKind};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Placement of a value inside a hash: its kind plus a 64-bit digest.
/// Integers use their own bits, booleans 1/0, floats and strings the
/// FNV-1a digest of their text.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct HashKey {
    pub kind: ObjectKind,
    pub value: u64,
}

impl HashKey {
    pub fn from_object(object: &Object) -> RuntimeResult<HashKey> {
        let value = match object {
            Object::Integer(n) => *n as u64,
            Object::Boolean(b) => *b as u64,
            Object::Float(n) => fnv1a(n.to_string().as_bytes()),
            Object::String(s) => fnv1a(s.as_bytes()),
            other => return Err(RuntimeError::NotHashable(other.kind())),
        };

        Ok(HashKey {
            kind: object.kind(),
            value,
        })
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &byte| {
        (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::object::Array;

    #[test]
    fn test_equal_values_share_keys() {
        let hello = Object::String("Hello World".to_owned());
        let same = Object::String("Hello World".to_owned());
        let other = Object::String("My name is johnny".to_owned());

        assert_eq!(HashKey::from_object(&hello), HashKey::from_object(&same));
        assert_ne!(HashKey::from_object(&hello), HashKey::from_object(&other));

        assert_eq!(
            HashKey::from_object(&Object::Float(2.5)),
            HashKey::from_object(&Object::Float(2.5))
        );
        assert_eq!(
            HashKey::from_object(&Object::Boolean(true)),
            HashKey::from_object(&Object::Boolean(true))
        );
    }

    #[test]
    fn test_kind_separates_keys() {
        let one = HashKey::from_object(&Object::Integer(1));
        let truthy = HashKey::from_object(&Object::Boolean(true));
        let text = HashKey::from_object(&Object::String("1".to_owned()));

        assert_ne!(one, truthy);
        assert_ne!(one, text);
    }

    #[test]
    fn test_unhashable_kinds() {
        let array = Object::Array(Array::new(vec![]));
        assert_eq!(
            HashKey::from_object(&array),
            Err(RuntimeError::NotHashable(ObjectKind::Array))
        );
        assert_eq!(
            HashKey::from_object(&Object::Null),
            Err(RuntimeError::NotHashable(ObjectKind::Null))
        );
    }

    #[test]
    fn test_fnv1a_reference_values() {
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }
}
