use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use super::{Cache, CacheError};
use crate::value::{ArgumentError, Value, ValueMismatch};

/// Typed argument tuples that lower into a dynamic argument list.
pub trait IntoArgs {
    fn into_args(self) -> Vec<Value>;
}

/// Typed argument tuples decoded from a dynamic argument list.
pub trait FromArgs: Sized {
    fn from_args(args: &[Value]) -> Result<Self, ArgumentError>;
}

impl IntoArgs for Vec<Value> {
    fn into_args(self) -> Vec<Value> {
        self
    }
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Value> {
        Vec::new()
    }
}

impl FromArgs for () {
    fn from_args(args: &[Value]) -> Result<Self, ArgumentError> {
        expect_arity(args, 0)
    }
}

fn expect_arity(args: &[Value], expected: usize) -> Result<(), ArgumentError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ArgumentError::Arity {
            expected,
            found: args.len(),
        })
    }
}

fn decode<T>(args: &[Value], index: usize) -> Result<T, ArgumentError>
where
    T: TryFrom<Value, Error = ValueMismatch>,
{
    T::try_from(args[index].clone()).map_err(|mismatch| ArgumentError::Type {
        index,
        expected: mismatch.expected,
        found: mismatch.found,
    })
}

macro_rules! tuple_args {
    ($len:literal => $($ty:ident $idx:tt),+) => {
        impl<$($ty: Into<Value>),+> IntoArgs for ($($ty,)+) {
            fn into_args(self) -> Vec<Value> {
                vec![$(self.$idx.into()),+]
            }
        }

        impl<$($ty: TryFrom<Value, Error = ValueMismatch>),+> FromArgs for ($($ty,)+) {
            fn from_args(args: &[Value]) -> Result<Self, ArgumentError> {
                expect_arity(args, $len)?;
                Ok(($(decode::<$ty>(args, $idx)?,)+))
            }
        }
    };
}

tuple_args!(1 => A 0);
tuple_args!(2 => A 0, B 1);
tuple_args!(3 => A 0, B 1, C 2);
tuple_args!(4 => A 0, B 1, C 2, D 3);

/// Typed handle to a cacheable function.
///
/// Calls go through [`Cache::invoke`], so a typed call and a dynamic call
/// with equal arguments share one stored result.
pub struct CachedFn<A, R> {
    name: Cow<'static, str>,
    _signature: PhantomData<fn(A) -> R>,
}

impl<A, R> CachedFn<A, R> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _signature: PhantomData,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            _signature: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<A, R> CachedFn<A, R>
where
    A: IntoArgs,
    R: TryFrom<Value, Error = ValueMismatch>,
{
    pub fn call(&self, cache: &Cache, args: A) -> Result<R, CacheError> {
        let result = cache.invoke(&self.name, &args.into_args())?;
        R::try_from(Value::clone(&result)).map_err(|mismatch| CacheError::ResultType {
            name: self.name.to_string(),
            expected: mismatch.expected,
            found: mismatch.found,
        })
    }
}

impl<A, R> Clone for CachedFn<A, R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _signature: PhantomData,
        }
    }
}

impl<A, R> fmt::Debug for CachedFn<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CachedFn").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    #[test]
    fn tuples_lower_in_order() {
        assert_eq!(
            ("input", 2_i64).into_args(),
            vec![Value::from("input"), Value::Int(2)]
        );
        assert!(().into_args().is_empty());
    }

    #[test]
    fn decoding_checks_arity_and_kinds() {
        let args = vec![Value::from("text"), Value::Int(1)];
        let decoded = <(String, i64)>::from_args(&args).expect("well-typed");
        assert_eq!(decoded, ("text".to_string(), 1));

        assert_eq!(
            <(i64,)>::from_args(&args),
            Err(ArgumentError::Arity {
                expected: 1,
                found: 2,
            })
        );
        assert_eq!(
            <(i64, i64)>::from_args(&args),
            Err(ArgumentError::Type {
                index: 0,
                expected: ValueKind::Int,
                found: ValueKind::Str,
            })
        );
    }
}
