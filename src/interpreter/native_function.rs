use super::errors::{RuntimeError, RuntimeResult};
use super::object::{Object, ObjectKind};

use std::fmt;
use std::io::Write;

type FnType = fn(Vec<Object>, &mut dyn Write) -> RuntimeResult<Object>;

/// A builtin function. `arity` is None for variadic builtins.
pub struct NativeFn {
    pub name: &'static str,
    pub arity: Option<usize>,
    func: FnType,
}

static NATIVE_FUNCS: [NativeFn; 6] = [
    NativeFn::new("len", Some(1), len),
    NativeFn::new("number", Some(1), number),
    NativeFn::new("string", Some(1), string),
    NativeFn::new("int", Some(1), int),
    NativeFn::new("now", Some(0), now),
    NativeFn::new("print", None, print),
];

/// Finds a builtin by name. Consulted only after scope lookup fails.
pub fn get_native_func(name: &str) -> Option<&'static NativeFn> {
    NATIVE_FUNCS.iter().find(|func| func.name == name)
}

impl NativeFn {
    const fn new(name: &'static str, arity: Option<usize>, func: FnType) -> Self {
        NativeFn { name, arity, func }
    }

    pub fn execute(&self, args: Vec<Object>, output: &mut dyn Write) -> RuntimeResult<Object> {
        match self.arity {
            Some(arity) if arity != args.len() => {
                Err(RuntimeError::ArgumentCount(arity.to_string(), args.len()))
            }
            _ => (self.func)(args, output),
        }
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<native-func {}>", self.name)
    }
}

fn len(args: Vec<Object>, _output: &mut dyn Write) -> RuntimeResult<Object> {
    let len = match &args[0] {
        Object::String(s) => s.len(),
        Object::Array(array) => array.len(),
        Object::Hash(hash) => hash.len(),
        other => {
            return Err(RuntimeError::ArgumentType(
                ObjectKind::String.name().to_owned(),
                other.kind(),
            ))
        }
    };
    Ok(Object::Integer(len as i64))
}

fn number(args: Vec<Object>, _output: &mut dyn Write) -> RuntimeResult<Object> {
    match &args[0] {
        obj @ (Object::Integer(_) | Object::Float(_)) => Ok(obj.clone()),
        Object::String(s) => {
            if let Ok(n) = s.parse::<i64>() {
                Ok(Object::Integer(n))
            } else if let Ok(n) = s.parse::<f64>() {
                Ok(Object::Float(n))
            } else {
                Err(RuntimeError::Custom(format!("{} is not a number", s)))
            }
        }
        other => Err(RuntimeError::ArgumentType(
            ObjectKind::String.name().to_owned(),
            other.kind(),
        )),
    }
}

fn string(args: Vec<Object>, _output: &mut dyn Write) -> RuntimeResult<Object> {
    match &args[0] {
        Object::String(s) => Ok(Object::String(s.clone())),
        other => Ok(Object::String(other.render(0))),
    }
}

fn int(args: Vec<Object>, _output: &mut dyn Write) -> RuntimeResult<Object> {
    match &args[0] {
        Object::Integer(n) => Ok(Object::Integer(*n)),
        Object::Float(n) => Ok(Object::Integer(*n as i64)),
        Object::Boolean(b) => Ok(Object::Integer(*b as i64)),
        Object::String(s) => s
            .parse::<i64>()
            .map(Object::Integer)
            .map_err(|_| RuntimeError::Custom(format!("{} is not an integer", s))),
        other => Ok(Object::String(other.render(0))),
    }
}

fn now(_args: Vec<Object>, _output: &mut dyn Write) -> RuntimeResult<Object> {
    let now = chrono::Local::now();
    Ok(Object::String(now.format("%Y-%m-%d %H:%M:%S").to_string()))
}

fn print(args: Vec<Object>, output: &mut dyn Write) -> RuntimeResult<Object> {
    let rendered: Vec<_> = args.iter().map(|arg| arg.render(0)).collect();
    writeln!(output, "{}", rendered.join(", "))
        .map_err(|e| RuntimeError::Custom(format!("print failed: {}", e)))?;
    Ok(Object::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::object::Array;
    use ::more_asserts::*;

    fn call(name: &str, args: Vec<Object>) -> RuntimeResult<Object> {
        let func = get_native_func(name).unwrap();
        func.execute(args, &mut std::io::sink())
    }

    #[test]
    fn test_len() {
        assert_eq!(
            call("len", vec![Object::String("four".to_owned())]),
            Ok(Object::Integer(4))
        );
        let array = Array::new(vec![Object::Null, Object::Null]);
        assert_eq!(call("len", vec![Object::Array(array)]), Ok(Object::Integer(2)));
        assert_eq!(
            call("len", vec![Object::Integer(1)]),
            Err(RuntimeError::ArgumentType("STRING".to_owned(), ObjectKind::Integer))
        );
        assert_eq!(
            call("len", vec![]),
            Err(RuntimeError::ArgumentCount("1".to_owned(), 0))
        );
    }

    #[test]
    fn test_conversions() {
        assert_eq!(
            call("number", vec![Object::String("42".to_owned())]),
            Ok(Object::Integer(42))
        );
        assert_eq!(
            call("number", vec![Object::String("4.5".to_owned())]),
            Ok(Object::Float(4.5))
        );
        assert_eq!(
            call("number", vec![Object::String("abc".to_owned())]),
            Err(RuntimeError::Custom("abc is not a number".to_owned()))
        );
        assert_eq!(call("int", vec![Object::Float(3.9)]), Ok(Object::Integer(3)));
        assert_eq!(call("int", vec![Object::Boolean(true)]), Ok(Object::Integer(1)));
        assert_eq!(
            call("int", vec![Object::String("3.5".to_owned())]),
            Err(RuntimeError::Custom("3.5 is not an integer".to_owned()))
        );
        assert_eq!(
            call("string", vec![Object::Float(1.5)]),
            Ok(Object::String("1.5".to_owned()))
        );
    }

    #[test]
    fn test_now_format() {
        match call("now", vec![]) {
            Ok(Object::String(s)) => {
                assert_eq!(s.len(), "2006-01-02 15:04:05".len());
                assert_ge!(&s[..4], "2000");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_now_is_local_time() {
        let now = match call("now", vec![]) {
            Ok(Object::String(s)) => s,
            other => panic!("unexpected {:?}", other),
        };
        let parsed = chrono::NaiveDateTime::parse_from_str(&now, "%Y-%m-%d %H:%M:%S").unwrap();
        let drift = chrono::Local::now().naive_local() - parsed;
        assert_le!(drift.num_seconds().abs(), 5);
    }

    #[test]
    fn test_print_writes_to_output() {
        let mut output = Vec::new();
        let print = get_native_func("print").unwrap();
        let result = print.execute(
            vec![Object::Integer(1), Object::String("two".to_owned())],
            &mut output,
        );

        assert_eq!(result, Ok(Object::Null));
        assert_eq!(String::from_utf8(output).unwrap(), "1, two\n");
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(get_native_func("clock").is_none());
    }
}
