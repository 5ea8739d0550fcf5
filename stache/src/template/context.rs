use super::language::Path;
use super::{Error, ToValue, Value};

use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::{Deref, Index, IndexMut};

static NULL: Value = Value::Null;

/// Data a template is rendered with.
///
/// The context is a value, usually a hash of variable names to values.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    root: Value,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            root: Value::Hash(HashMap::new()),
        }
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by its path, e.g. `user.name`.
    pub fn get(&self, path: &str) -> Option<Value> {
        Path::new(path).resolve(&self.root).map(Cow::into_owned)
    }

    /// Set a top-level variable. A context that isn't a hash is replaced with one.
    pub fn set(&mut self, key: &str, value: impl ToValue) -> Result<&mut Self, Error> {
        let value = value.to_value()?;
        self.hash_mut().insert(key.to_string(), value);
        Ok(self)
    }

    /// Create a context from anything serializable.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, Error> {
        Ok(Value::serialize(value)?.into())
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn into_inner(self) -> Value {
        self.root
    }

    fn hash_mut(&mut self) -> &mut HashMap<String, Value> {
        if !matches!(self.root, Value::Hash(_)) {
            self.root = Value::Hash(HashMap::new());
        }

        match self.root {
            Value::Hash(ref mut hash) => hash,
            _ => unreachable!("context root is a hash"),
        }
    }
}

impl Deref for Context {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.root
    }
}

impl From<Value> for Context {
    fn from(root: Value) -> Self {
        Context { root }
    }
}

impl From<serde_json::Value> for Context {
    fn from(json: serde_json::Value) -> Self {
        Context { root: json.into() }
    }
}

impl<V: ToValue> TryFrom<HashMap<String, V>> for Context {
    type Error = Error;

    fn try_from(values: HashMap<String, V>) -> Result<Context, Self::Error> {
        Ok(Context {
            root: values.to_value()?,
        })
    }
}

impl<V: ToValue> TryFrom<HashMap<&str, V>> for Context {
    type Error = Error;

    fn try_from(values: HashMap<&str, V>) -> Result<Context, Self::Error> {
        let mut context = Context::new();
        for (key, value) in values {
            context.set(key, value)?;
        }

        Ok(context)
    }
}

impl<K: AsRef<str>, V: ToValue> TryFrom<Vec<(K, V)>> for Context {
    type Error = Error;

    fn try_from(values: Vec<(K, V)>) -> Result<Context, Self::Error> {
        let mut context = Context::new();
        for (key, value) in values {
            context.set(key.as_ref(), value)?;
        }

        Ok(context)
    }
}

impl<K: AsRef<str>, V: ToValue, const N: usize> TryFrom<[(K, V); N]> for Context {
    type Error = Error;

    fn try_from(values: [(K, V); N]) -> Result<Context, Self::Error> {
        Context::try_from(Vec::from(values))
    }
}

impl Index<&str> for Context {
    type Output = Value;

    fn index(&self, key: &str) -> &Self::Output {
        // Record fields are computed on read, so they can't be indexed.
        match self.root.get(key) {
            Some(Cow::Borrowed(value)) => value,
            _ => &NULL,
        }
    }
}

impl IndexMut<&str> for Context {
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        self.hash_mut().entry(key.to_string()).or_insert(Value::Null)
    }
}
