//! Loggable values
//!
//! `Value` is the argument type of every log call. Arrays and objects are
//! shared references so a caller can hand the logger the same graph it keeps
//! mutating, including graphs that point back at themselves.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared, mutable array
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Shared, mutable object (insertion-ordered members)
pub type ObjectRef = Rc<RefCell<Vec<(String, Value)>>>;

/// A structured loggable value
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    /// Arbitrary-precision integer; has no JSON representation
    BigInt(i128),
    String(String),
    Array(ArrayRef),
    Object(ObjectRef),
    /// Host value with no JSON representation (handles, closures, ...)
    Opaque(Rc<str>),
}

impl Value {
    /// Create a new empty object
    pub fn object() -> Self {
        Value::Object(Rc::new(RefCell::new(Vec::new())))
    }

    /// Create a new array from values
    pub fn array(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items.into_iter().collect())))
    }

    /// Create an opaque value tagged with a runtime type name
    pub fn opaque(type_name: impl Into<Rc<str>>) -> Self {
        Value::Opaque(type_name.into())
    }

    /// Builder: set a member on an object and return it.
    ///
    /// No-op on non-objects.
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Set (or replace) a member on an object. No-op on non-objects.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        if let Value::Object(obj) = self {
            let key = key.into();
            let value = value.into();
            let mut members = obj.borrow_mut();
            match members.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => members.push((key, value)),
            }
        }
    }

    /// Append to an array. No-op on non-arrays.
    pub fn push(&self, value: impl Into<Value>) {
        if let Value::Array(arr) = self {
            arr.borrow_mut().push(value.into());
        }
    }

    /// Look up an object member by key
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(obj) => obj
                .borrow()
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone()),
            _ => None,
        }
    }

    /// True for arrays, objects and opaque values
    pub fn is_structured(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_) | Value::Opaque(_))
    }

    /// Identity of the shared allocation behind arrays and objects
    pub fn ref_id(&self) -> Option<usize> {
        match self {
            Value::Array(arr) => Some(Rc::as_ptr(arr) as *const () as usize),
            Value::Object(obj) => Some(Rc::as_ptr(obj) as *const () as usize),
            _ => None,
        }
    }

    /// Runtime type tag, e.g. `[object Object]`
    pub fn type_tag(&self) -> String {
        let name = match self {
            Value::Undefined => "Undefined",
            Value::Null => "Null",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::BigInt(_) => "BigInt",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Opaque(name) => name.as_ref(),
        };
        format!("[object {}]", name)
    }

    /// Identity-aware equality: primitives by value, containers by reference
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Opaque(a), Value::Opaque(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Number formatting matching the conventions of browser consoles:
/// integral values print without a fraction, `-0` prints as `0`, and
/// magnitudes of at least 1e21 or below 1e-6 use exponent form (`1e+21`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        let formatted = format!("{:e}", n);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        format!("{}", n)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::BigInt(n) => write!(f, "{}n", n),
            Value::String(s) => write!(f, "{:?}", s),
            // Containers may be cyclic; don't recurse
            Value::Array(arr) => match arr.try_borrow() {
                Ok(items) => write!(f, "Array({})", items.len()),
                Err(_) => write!(f, "Array(..)"),
            },
            Value::Object(obj) => match obj.try_borrow() {
                Ok(members) => write!(f, "Object({})", members.len()),
                Err(_) => write!(f, "Object(..)"),
            },
            Value::Opaque(name) => write!(f, "Opaque({})", name),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(n as f64)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Number(n as f64)
            }
        })*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::array(items.into_iter().map(Into::into))
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::array(items.into_iter().map(Value::from)),
            serde_json::Value::Object(map) => {
                let obj = Value::object();
                for (k, v) in map {
                    obj.set(k, Value::from(v));
                }
                obj
            }
        }
    }
}

/// Build a `Vec<Value>` argument list from heterogeneous expressions.
///
/// ```
/// let args = devlog::args!["user", 42, true];
/// assert_eq!(args.len(), 3);
/// ```
#[macro_export]
macro_rules! args {
    () => { ::std::vec::Vec::<$crate::Value>::new() };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($arg)),+]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_set_replaces_existing_key() {
        let obj = Value::object().with("a", 1).with("b", 2);
        obj.set("a", 3);

        match &obj {
            Value::Object(members) => {
                let members = members.borrow();
                assert_eq!(members.len(), 2);
                assert_eq!(members[0].0, "a");
                assert!(members[0].1.same(&Value::Number(3.0)));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_self_reference_is_possible() {
        let obj = Value::object();
        obj.set("self", obj.clone());

        let inner = obj.get("self").unwrap();
        assert_eq!(inner.ref_id(), obj.ref_id());
        // Debug never recurses
        assert_eq!(format!("{:?}", obj), "Object(1)");
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(Value::object().type_tag(), "[object Object]");
        assert_eq!(Value::array([]).type_tag(), "[object Array]");
        assert_eq!(Value::opaque("Window").type_tag(), "[object Window]");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(500.0), "500");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_format_number_exponent_range() {
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-1.5e22), "-1.5e+22");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(-2.5e-8), "-2.5e-8");
    }

    #[test]
    fn test_from_json_keeps_key_order() {
        let json: serde_json::Value = serde_json::from_str(r#"{"z":1,"a":[true,null]}"#).unwrap();
        let value = Value::from(json);

        match &value {
            Value::Object(members) => {
                let keys: Vec<String> = members.borrow().iter().map(|(k, _)| k.clone()).collect();
                assert_eq!(keys, vec!["z", "a"]);
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_args_macro() {
        let args = crate::args!["x", 1, false, Value::Null];
        assert_eq!(args.len(), 4);
        assert!(args[0].same(&Value::from("x")));
        assert!(args[3].same(&Value::Null));
    }
}
