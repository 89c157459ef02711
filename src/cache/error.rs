use thiserror::Error;

use crate::value::ValueKind;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("function `{name}` is not registered as cacheable")]
    UnknownFunction { name: String },
    #[error("function `{name}` is already registered on this cache")]
    DuplicateName { name: String },
    #[error("cacheable function `{name}` is declared more than once")]
    DuplicateGlobal { name: String },
    #[error("cacheable function `{name}` failed")]
    Invocation {
        name: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("function `{name}` returned {found}, expected {expected}")]
    ResultType {
        name: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

impl CacheError {
    /// Name of the function the error refers to.
    pub fn function_name(&self) -> &str {
        match self {
            Self::UnknownFunction { name }
            | Self::DuplicateName { name }
            | Self::DuplicateGlobal { name }
            | Self::Invocation { name, .. }
            | Self::ResultType { name, .. } => name,
        }
    }
}
