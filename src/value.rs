use std::fmt;

use puzzlekit_fingerprint::{
    Fingerprint, fingerprint_concat, fingerprint_sequence, fingerprint_text, generic_hash,
    pair_hash,
};
use thiserror::Error;

/// Dynamically typed argument or result of a cacheable function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Unit,
    Bool(bool),
    Int(i64),
    Pair(i64, i64),
    Str(String),
    List(Vec<Value>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Unit,
    Bool,
    Int,
    Pair,
    Str,
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unit => "unit",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Pair => "pair",
            Self::Str => "string",
            Self::List => "list",
        };
        f.write_str(name)
    }
}

/// A [`Value`] of one kind was found where another was required.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected}, found {found}")]
pub struct ValueMismatch {
    pub expected: ValueKind,
    pub found: ValueKind,
}

/// Argument list rejected by a typed cacheable function.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("expected {expected} arguments, got {found}")]
    Arity { expected: usize, found: usize },
    #[error("argument {index}: expected {expected}, found {found}")]
    Type {
        index: usize,
        expected: ValueKind,
        found: ValueKind,
    },
}

impl Value {
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Unit => ValueKind::Unit,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Pair(..) => ValueKind::Pair,
            Self::Str(_) => ValueKind::Str,
            Self::List(_) => ValueKind::List,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub const fn as_pair(&self) -> Option<(i64, i64)> {
        match self {
            Self::Pair(x, y) => Some((*x, *y)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    fn mismatch(&self, expected: ValueKind) -> ValueMismatch {
        ValueMismatch {
            expected,
            found: self.kind(),
        }
    }
}

impl Fingerprint for Value {
    fn fingerprint(&self) -> i64 {
        match self {
            Self::Unit => generic_hash(&()),
            Self::Bool(value) => generic_hash(value),
            Self::Int(value) => generic_hash(value),
            Self::Pair(x, y) => pair_hash(*x, *y),
            Self::Str(text) => fingerprint_text(text),
            Self::List(items) => Self::fingerprint_slice(items),
        }
    }

    /// Lists made only of strings hash their concatenation, like `Vec<String>`;
    /// anything else folds element fingerprints.
    fn fingerprint_slice(items: &[Self]) -> i64 {
        let texts: Option<Vec<&str>> = items.iter().map(Self::as_str).collect();
        match texts {
            Some(texts) => fingerprint_concat(&texts),
            None => fingerprint_sequence(items),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => f.write_str("()"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Pair(x, y) => write!(f, "({x}, {y})"),
            Self::Str(text) => f.write_str(text),
            Self::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Unit
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<(i64, i64)> for Value {
    fn from((x, y): (i64, i64)) -> Self {
        Self::Pair(x, y)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl TryFrom<Value> for () {
    type Error = ValueMismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Unit => Ok(()),
            other => Err(other.mismatch(ValueKind::Unit)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = ValueMismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.as_bool().ok_or_else(|| value.mismatch(ValueKind::Bool))
    }
}

impl TryFrom<Value> for i64 {
    type Error = ValueMismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.as_int().ok_or_else(|| value.mismatch(ValueKind::Int))
    }
}

impl TryFrom<Value> for (i64, i64) {
    type Error = ValueMismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.as_pair().ok_or_else(|| value.mismatch(ValueKind::Pair))
    }
}

impl TryFrom<Value> for String {
    type Error = ValueMismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Str(text) => Ok(text),
            other => Err(other.mismatch(ValueKind::Str)),
        }
    }
}

impl<T: TryFrom<Value, Error = ValueMismatch>> TryFrom<Value> for Vec<T> {
    type Error = ValueMismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(items) => items.into_iter().map(T::try_from).collect(),
            other => Err(other.mismatch(ValueKind::List)),
        }
    }
}
