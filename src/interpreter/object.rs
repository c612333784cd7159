use super::errors::{RuntimeError, RuntimeResult};
use super::function::Function;
use super::hash_key::HashKey;
use super::native_function::NativeFn;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Nesting depth at which arrays and hashes stop rendering their contents.
pub const MAX_RENDER_DEPTH: usize = 10;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ObjectKind {
    Integer,
    Float,
    Boolean,
    Null,
    String,
    Array,
    Hash,
    Function,
    Builtin,
    Error,
}

#[derive(Clone)]
pub enum Object {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
    String(String),
    Array(Array),
    Hash(Hash),
    Function(Function),
    Builtin(&'static NativeFn),
    Error(String),
}

/// A window onto shared element storage. Slicing creates a new window over
/// the same storage, so element writes through one are seen by the other.
#[derive(Clone)]
pub struct Array(Rc<RefCell<ArrayView>>);

struct ArrayView {
    storage: Rc<RefCell<Vec<Object>>>,
    start: usize,
    len: usize,
}

/// Insertion-ordered mapping from hashable values to values.
#[derive(Clone)]
pub struct Hash(Rc<RefCell<HashData>>);

#[derive(Default)]
struct HashData {
    pairs: Vec<HashPair>,
    index: HashMap<HashKey, usize>,
}

struct HashPair {
    hash_key: HashKey,
    key: Object,
    value: Object,
}

impl ObjectKind {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Integer => "INTEGER",
            ObjectKind::Float => "FLOAT",
            ObjectKind::Boolean => "BOOLEAN",
            ObjectKind::Null => "NULL",
            ObjectKind::String => "STRING",
            ObjectKind::Array => "ARRAY",
            ObjectKind::Hash => "HASH",
            ObjectKind::Function => "FUNCTION",
            ObjectKind::Builtin => "BUILTIN",
            ObjectKind::Error => "ERROR",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Integer(_) => ObjectKind::Integer,
            Object::Float(_) => ObjectKind::Float,
            Object::Boolean(_) => ObjectKind::Boolean,
            Object::Null => ObjectKind::Null,
            Object::String(_) => ObjectKind::String,
            Object::Array(_) => ObjectKind::Array,
            Object::Hash(_) => ObjectKind::Hash,
            Object::Function(_) => ObjectKind::Function,
            Object::Builtin(_) => ObjectKind::Builtin,
            Object::Error(_) => ObjectKind::Error,
        }
    }

    /// False, null and numeric zero are falsy. Everything else is truthy,
    /// including empty strings and collections.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Boolean(b) => *b,
            Object::Null => false,
            Object::Integer(n) => *n != 0,
            Object::Float(n) => *n != 0.0,
            _ => true,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Object::Integer(_) | Object::Float(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Object::Integer(n) => Some(*n as f64),
            Object::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Renders the value, collapsing collections nested `MAX_RENDER_DEPTH` deep.
    pub fn render(&self, depth: usize) -> String {
        match self {
            Object::Integer(n) => n.to_string(),
            Object::Float(n) => n.to_string(),
            Object::Boolean(b) => b.to_string(),
            Object::Null => "null".to_owned(),
            Object::String(s) => s.clone(),
            Object::Array(array) => {
                if depth >= MAX_RENDER_DEPTH {
                    return "ARRAY...".to_owned();
                }
                let elements: Vec<_> = array
                    .elements()
                    .iter()
                    .map(|e| e.render(depth + 1))
                    .collect();
                format!("[{}]", elements.join(", "))
            }
            Object::Hash(hash) => {
                if depth >= MAX_RENDER_DEPTH {
                    return "HASH...".to_owned();
                }
                let pairs: Vec<_> = hash
                    .pairs()
                    .iter()
                    .map(|(k, v)| format!("{}:{}", k.render(depth + 1), v.render(depth + 1)))
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
            Object::Function(function) => function.to_string(),
            Object::Builtin(_) => "[builtin]".to_owned(),
            Object::Error(msg) => format!("Error: {}", msg),
        }
    }

    pub fn call_method(&self, method: &str, args: Vec<Object>) -> RuntimeResult<Object> {
        match self {
            Object::String(s) => string_method(s, method, args),
            Object::Array(array) => array.call_method(method, args),
            _ => Err(RuntimeError::NoMethod(method.to_owned(), self.kind())),
        }
    }
}

fn string_method(s: &str, method: &str, args: Vec<Object>) -> RuntimeResult<Object> {
    match method {
        "toLower" | "toUpper" => {
            if !args.is_empty() {
                return Err(RuntimeError::ArgumentCount("0".to_owned(), args.len()));
            }
            let converted = if method == "toLower" {
                s.to_lowercase()
            } else {
                s.to_uppercase()
            };
            Ok(Object::String(converted))
        }
        "split" => {
            if args.len() != 1 {
                return Err(RuntimeError::ArgumentCount("1".to_owned(), args.len()));
            }
            let separator = match &args[0] {
                Object::String(sep) => sep,
                other => {
                    return Err(RuntimeError::ArgumentType(
                        ObjectKind::String.name().to_owned(),
                        other.kind(),
                    ))
                }
            };

            let parts: Vec<Object> = if separator.is_empty() {
                s.chars().map(|c| Object::String(c.to_string())).collect()
            } else {
                s.split(separator.as_str())
                    .map(|part| Object::String(part.to_owned()))
                    .collect()
            };
            Ok(Object::Array(Array::new(parts)))
        }
        _ => Err(RuntimeError::NoMethod(method.to_owned(), ObjectKind::String)),
    }
}

impl Array {
    pub fn new(elements: Vec<Object>) -> Self {
        let view = ArrayView {
            len: elements.len(),
            storage: Rc::new(RefCell::new(elements)),
            start: 0,
        };
        Array(Rc::new(RefCell::new(view)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, idx: usize) -> Option<Object> {
        let view = self.0.borrow();
        if idx >= view.len {
            return None;
        }
        let storage = view.storage.borrow();
        storage.get(view.start + idx).cloned()
    }

    /// Replaces the element at `idx`, returning the previous one.
    pub fn set(&self, idx: usize, value: Object) -> Option<Object> {
        let view = self.0.borrow();
        if idx >= view.len {
            return None;
        }
        let mut storage = view.storage.borrow_mut();
        storage
            .get_mut(view.start + idx)
            .map(|slot| std::mem::replace(slot, value))
    }

    /// Appends after the last element of this view. When the view ends
    /// before its storage does, the slot after it is overwritten in place.
    pub fn push(&self, value: Object) -> usize {
        let mut view = self.0.borrow_mut();
        let slot = view.start + view.len;
        {
            let mut storage = view.storage.borrow_mut();
            if slot < storage.len() {
                storage[slot] = value;
            } else {
                storage.push(value);
            }
        }
        view.len += 1;
        view.len
    }

    pub fn pop(&self) -> Option<Object> {
        let mut view = self.0.borrow_mut();
        if view.len == 0 {
            return None;
        }
        view.len -= 1;

        let idx = view.start + view.len;
        let value = view.storage.borrow().get(idx).cloned();
        if Rc::strong_count(&view.storage) == 1 {
            view.storage.borrow_mut().truncate(idx);
        }
        value
    }

    /// A new view over elements `start..end` sharing this array's storage.
    pub fn slice(&self, start: usize, end: usize) -> Array {
        let view = self.0.borrow();
        let sliced = ArrayView {
            storage: Rc::clone(&view.storage),
            start: view.start + start,
            len: end.saturating_sub(start),
        };
        Array(Rc::new(RefCell::new(sliced)))
    }

    pub fn elements(&self) -> Vec<Object> {
        let view = self.0.borrow();
        let storage = view.storage.borrow();
        storage
            .iter()
            .skip(view.start)
            .take(view.len)
            .cloned()
            .collect()
    }

    pub fn ptr_eq(&self, other: &Array) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn call_method(&self, method: &str, args: Vec<Object>) -> RuntimeResult<Object> {
        match method {
            "push" => {
                let mut len = self.len();
                for arg in args {
                    len = self.push(arg);
                }
                Ok(Object::Integer(len as i64))
            }
            "pop" => self
                .pop()
                .ok_or_else(|| RuntimeError::Custom("array is empty".to_owned())),
            _ => Err(RuntimeError::NoMethod(method.to_owned(), ObjectKind::Array)),
        }
    }
}

impl Hash {
    pub fn new() -> Self {
        Hash(Rc::new(RefCell::new(HashData::default())))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: &Object) -> RuntimeResult<Option<Object>> {
        let hash_key = HashKey::from_object(key)?;
        let data = self.0.borrow();
        Ok(data
            .index
            .get(&hash_key)
            .map(|&idx| data.pairs[idx].value.clone()))
    }

    /// Inserts or overwrites, returning the previous value for the key.
    pub fn insert(&self, key: Object, value: Object) -> RuntimeResult<Option<Object>> {
        let hash_key = HashKey::from_object(&key)?;
        let mut data = self.0.borrow_mut();

        if let Some(&idx) = data.index.get(&hash_key) {
            let pair = &mut data.pairs[idx];
            pair.key = key;
            return Ok(Some(std::mem::replace(&mut pair.value, value)));
        }

        let idx = data.pairs.len();
        data.pairs.push(HashPair {
            hash_key,
            key,
            value,
        });
        data.index.insert(hash_key, idx);
        Ok(None)
    }

    pub fn remove(&self, key: &Object) -> RuntimeResult<Option<Object>> {
        let hash_key = HashKey::from_object(key)?;
        let mut data = self.0.borrow_mut();

        let idx = match data.index.remove(&hash_key) {
            Some(idx) => idx,
            None => return Ok(None),
        };
        let removed = data.pairs.remove(idx);

        let HashData { pairs, index } = &mut *data;
        for (new_idx, pair) in pairs.iter().enumerate().skip(idx) {
            index.insert(pair.hash_key, new_idx);
        }
        Ok(Some(removed.value))
    }

    pub fn pairs(&self) -> Vec<(Object, Object)> {
        self.0
            .borrow()
            .pairs
            .iter()
            .map(|pair| (pair.key.clone(), pair.value.clone()))
            .collect()
    }

    pub fn ptr_eq(&self, other: &Hash) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Hash {
    fn default() -> Self {
        Hash::new()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render(0))
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::String(s) => write!(f, "String({:?})", s),
            Object::Error(msg) => write!(f, "Error({:?})", msg),
            other => write!(f, "{}({})", other.kind(), other.render(0)),
        }
    }
}

/// Identity for arrays, hashes and functions; value equality otherwise.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Float(a), Object::Float(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Array(a), Object::Array(b)) => a.ptr_eq(b),
            (Object::Hash(a), Object::Hash(b)) => a.ptr_eq(b),
            (Object::Function(a), Object::Function(b)) => a == b,
            (Object::Builtin(a), Object::Builtin(b)) => a.name == b.name,
            (Object::Error(a), Object::Error(b)) => a == b,
            _ => false,
        }
    }
}
