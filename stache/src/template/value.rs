//! The basic building block of template data: the value.
//!
//! Everything a template can read, like strings, numbers, lists, hashes
//! or records provided by the host application, is represented using the value.
//! A render context is a value too, usually a hash.
use serde::Serialize;

use super::Error;

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Named field access for host values.
///
/// Implement this on structs that should be readable from templates
/// without converting them into a [`Value::Hash`] first.
///
/// ```
/// use stache::prelude::*;
/// use std::sync::Arc;
///
/// #[derive(Debug)]
/// struct User {
///     email: String,
/// }
///
/// impl Fields for User {
///     fn field(&self, name: &str) -> Option<Value> {
///         match name {
///             "email" => Some(Value::String(self.email.clone())),
///             _ => None,
///         }
///     }
/// }
///
/// let mut context = Context::new();
/// context.set("user", Value::Record(Arc::new(User { email: "a@b.c".into() }))).unwrap();
///
/// assert_eq!(render("{{user.email}}", &context), "a@b.c");
/// ```
pub trait Fields: Debug + Send + Sync {
    /// Read the field called `name`. `None` if there is no such field.
    fn field(&self, name: &str) -> Option<Value>;
}

/// A value, e.g. `5`, `"hello world"` or `{"name": "Alice"}`.
///
/// Integers are 64-bit signed. Larger unsigned integers, from JSON or from
/// `u64`/`usize`, are stored as [`Value::Float`] and lose precision:
/// `u64::MAX` prints as `18446744073709552000`.
#[derive(Debug, Clone, Default)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    List(Vec<Value>),
    Hash(HashMap<String, Value>),
    Record(Arc<dyn Fields>),
    #[default]
    Null,
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(i1), Value::Integer(i2)) => i1 == i2,
            (Value::Float(f1), Value::Float(f2)) => f1 == f2,
            (Value::String(s1), Value::String(s2)) => s1 == s2,
            (Value::Boolean(b1), Value::Boolean(b2)) => b1 == b2,
            (Value::List(l1), Value::List(l2)) => l1 == l2,
            (Value::Hash(h1), Value::Hash(h2)) => h1 == h2,
            (Value::Record(r1), Value::Record(r2)) => Arc::ptr_eq(r1, r2),
            (Value::Null, Value::Null) => true,
            _ => false,
        }
    }
}

/// Text form of the value, used when it's printed with `{{ path }}`.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(fl) => write!(f, "{}", format_float(*fl)),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    write!(f, "{}", v)?;
                    if i < l.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "]")
            }
            Value::Hash(h) => {
                let mut keys = h.keys().collect::<Vec<_>>();
                keys.sort();

                write!(f, "{{")?;
                for (i, k) in keys.iter().enumerate() {
                    write!(f, "{}: {}", k, h[k.as_str()])?;
                    if i < keys.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "}}")
            }
            Value::Record(record) => write!(f, "{:?}", record),
            Value::Null => Ok(()),
        }
    }
}

fn format_float(float: f64) -> String {
    if float.is_nan() {
        "NaN".into()
    } else if float.is_infinite() {
        let sign = if float > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if float == 0.0 {
        // Covers -0.0 as well.
        "0".into()
    } else {
        float.to_string()
    }
}

impl Value {
    /// If the value, when evaluated in the context of an `#if` block,
    /// would result in the block being rendered.
    ///
    /// e.g. `{{#if count}}some{{/if}}` renders "some" if `count` is `5`,
    /// but nothing if it's `0`.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Integer(i) => *i != 0,
            // NaN is not equal to anything, so it's truthy. -0.0 == 0.0.
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Null => false,
            Value::List(list) => !list.is_empty(),
            Value::Hash(hash) => !hash.is_empty(),
            Value::Record(_) => true,
        }
    }

    /// Read a named member of this value: a hash key or a record field.
    /// Other values don't have members.
    pub fn get(&self, name: &str) -> Option<Cow<'_, Value>> {
        match self {
            Value::Hash(hash) => hash.get(name).map(Cow::Borrowed),
            Value::Record(record) => record.field(name).map(Cow::Owned),
            _ => None,
        }
    }

    /// Convert anything serializable into a value, going through JSON.
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        Ok(serde_json::to_value(value)?.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the value kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::List(_) => "list",
            Value::Hash(_) => "hash",
            Value::Record(_) => "record",
            Value::Null => "null",
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Boolean(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Json::String(s) => Value::String(s),
            Json::Array(list) => Value::List(list.into_iter().map(Value::from).collect()),
            Json::Object(hash) => {
                Value::Hash(hash.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl TryFrom<Value> for serde_json::Value {
    type Error = Error;

    fn try_from(value: Value) -> Result<serde_json::Value, Self::Error> {
        use serde_json::value::Number;
        match value {
            Value::Integer(i) => Ok(serde_json::Value::Number(i.into())),
            Value::Float(f) => Number::from_f64(f)
                .map(serde_json::Value::Number)
                .ok_or(Error::NotJson("non-finite float")),
            Value::String(s) => Ok(serde_json::Value::String(s)),
            Value::Boolean(b) => Ok(serde_json::Value::Bool(b)),
            Value::List(l) => {
                let mut list = vec![];
                for v in l {
                    list.push(v.try_into()?);
                }
                Ok(serde_json::Value::Array(list))
            }
            Value::Hash(h) => {
                let mut hash = serde_json::Map::new();
                for (k, v) in h {
                    hash.insert(k, v.try_into()?);
                }
                Ok(serde_json::Value::Object(hash))
            }
            Value::Record(_) => Err(Error::NotJson("record")),
            Value::Null => Ok(serde_json::Value::Null),
        }
    }
}

/// Convert a Rust type into a template value.
pub trait ToValue {
    fn to_value(&self) -> Result<Value, Error>;
}

impl ToValue for String {
    fn to_value(&self) -> Result<Value, Error> {
        Ok(Value::String(self.clone()))
    }
}

impl ToValue for &str {
    fn to_value(&self) -> Result<Value, Error> {
        Ok(Value::String(self.to_string()))
    }
}

macro_rules! impl_integer {
    ($ty:ty) => {
        impl ToValue for $ty {
            fn to_value(&self) -> Result<Value, Error> {
                Ok(Value::Integer(*self as i64))
            }
        }
    };
}

impl_integer!(i64);
impl_integer!(i32);
impl_integer!(i16);
impl_integer!(i8);
impl_integer!(u32);
impl_integer!(u16);
impl_integer!(u8);

macro_rules! impl_wide_integer {
    ($ty:ty) => {
        impl ToValue for $ty {
            fn to_value(&self) -> Result<Value, Error> {
                Ok(match i64::try_from(*self) {
                    Ok(i) => Value::Integer(i),
                    Err(_) => Value::Float(*self as f64),
                })
            }
        }
    };
}

impl_wide_integer!(u64);
impl_wide_integer!(usize);

impl ToValue for f64 {
    fn to_value(&self) -> Result<Value, Error> {
        Ok(Value::Float(*self))
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Result<Value, Error> {
        Ok(Value::Float(*self as f64))
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Result<Value, Error> {
        Ok(Value::Boolean(*self))
    }
}

impl ToValue for time::OffsetDateTime {
    fn to_value(&self) -> Result<Value, Error> {
        let fmt = time::format_description::well_known::Rfc2822;
        Ok(Value::String(self.format(&fmt)?))
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Result<Value, Error> {
        match self {
            Some(value) => value.to_value(),
            None => Ok(Value::Null),
        }
    }
}

impl<T: ToValue> ToValue for &[T] {
    fn to_value(&self) -> Result<Value, Error> {
        let mut values = vec![];
        for v in self.iter() {
            values.push(v.to_value()?);
        }
        Ok(Value::List(values))
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Result<Value, Error> {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for HashMap<String, T> {
    fn to_value(&self) -> Result<Value, Error> {
        let mut result = HashMap::new();
        for (key, value) in self.iter() {
            result.insert(key.clone(), value.to_value()?);
        }

        Ok(Value::Hash(result))
    }
}

impl<T: Fields + 'static> ToValue for Arc<T> {
    fn to_value(&self) -> Result<Value, Error> {
        Ok(Value::Record(self.clone()))
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Result<Value, Error> {
        Ok(self.clone())
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Result<Value, Error> {
        Ok(self.clone().into())
    }
}
