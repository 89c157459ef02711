use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

use super::CacheError;
use crate::value::Value;

/// Signature shared by every cacheable function.
pub type CacheableCall = fn(&[Value]) -> anyhow::Result<Value>;

/// Closure registered on a single cache instance.
pub type CacheableFn = Arc<dyn Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync>;

/// A function declared cacheable for every cache instance in the process.
///
/// Declarations are collected at link time; submit them with
/// [`cacheable!`](crate::cacheable) or `inventory::submit!`.
#[derive(Debug, Clone, Copy)]
pub struct CacheableFunction {
    pub name: &'static str,
    pub call: CacheableCall,
}

inventory::collect!(CacheableFunction);

/// Declares a process-wide cacheable function.
///
/// ```ignore
/// fn double(args: &[Value]) -> anyhow::Result<Value> { /* ... */ }
/// puzzlekit::cacheable!("double", double);
/// ```
#[macro_export]
macro_rules! cacheable {
    ($name:expr, $call:path) => {
        $crate::inventory::submit! {
            $crate::cache::CacheableFunction {
                name: $name,
                call: $call,
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    Instance,
}

/// A resolved cacheable function.
#[derive(Clone)]
pub enum Callable {
    Global(CacheableCall),
    Instance(CacheableFn),
}

impl Callable {
    pub fn call(&self, args: &[Value]) -> anyhow::Result<Value> {
        match self {
            Self::Global(call) => call(args),
            Self::Instance(call) => call(args),
        }
    }

    pub const fn scope(&self) -> Scope {
        match self {
            Self::Global(_) => Scope::Global,
            Self::Instance(_) => Scope::Instance,
        }
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callable").field(&self.scope()).finish()
    }
}

struct GlobalFunctions {
    functions: HashMap<&'static str, CacheableCall>,
}

impl GlobalFunctions {
    /// Indexes every submitted declaration by name. A name declared twice
    /// poisons discovery; the clashing name is returned instead.
    fn discover() -> Result<Self, &'static str> {
        let mut functions = HashMap::new();
        for declared in inventory::iter::<CacheableFunction> {
            if functions.insert(declared.name, declared.call).is_some() {
                return Err(declared.name);
            }
        }
        debug!(count = functions.len(), "discovered cacheable functions");
        Ok(Self { functions })
    }
}

static GLOBAL_FUNCTIONS: Lazy<Result<GlobalFunctions, &'static str>> =
    Lazy::new(GlobalFunctions::discover);

fn global_functions() -> Result<&'static GlobalFunctions, CacheError> {
    match &*GLOBAL_FUNCTIONS {
        Ok(globals) => Ok(globals),
        Err(name) => Err(CacheError::DuplicateGlobal {
            name: (*name).to_string(),
        }),
    }
}

/// Runs global discovery now rather than on first use, returning the number
/// of declared functions.
pub fn discover_global_functions() -> Result<usize, CacheError> {
    global_functions().map(|globals| globals.functions.len())
}

/// Sorted names of every globally declared cacheable function.
pub fn global_function_names() -> Result<Vec<&'static str>, CacheError> {
    let mut names: Vec<_> = global_functions()?.functions.keys().copied().collect();
    names.sort_unstable();
    Ok(names)
}

/// Instance-scoped registrations layered over the global declarations.
#[derive(Default)]
pub struct FunctionRegistry {
    instance: RwLock<HashMap<String, CacheableFn>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, name: impl Into<String>, call: CacheableFn) -> Result<(), CacheError> {
        let name = name.into();
        let mut instance = self.instance.write();
        if instance.contains_key(&name) {
            return Err(CacheError::DuplicateName { name });
        }
        debug!(function = %name, "registered cacheable closure");
        instance.insert(name, call);
        Ok(())
    }

    /// Instance registrations win over global declarations of the same name.
    pub fn resolve(&self, name: &str) -> Result<Callable, CacheError> {
        if let Some(call) = self.instance.read().get(name) {
            return Ok(Callable::Instance(Arc::clone(call)));
        }

        global_functions()?
            .functions
            .get(name)
            .map(|call| Callable::Global(*call))
            .ok_or_else(|| CacheError::UnknownFunction {
                name: name.to_string(),
            })
    }

    pub fn instance_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.instance.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("instance", &self.instance_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(value: i64) -> CacheableFn {
        Arc::new(move |_: &[Value]| Ok::<_, anyhow::Error>(Value::Int(value)))
    }

    #[test]
    fn duplicate_instance_names_are_rejected() {
        let registry = FunctionRegistry::new();
        registry.register("answer", constant(42)).expect("first registration");

        let err = registry
            .register("answer", constant(43))
            .expect_err("second registration must fail");
        assert!(matches!(err, CacheError::DuplicateName { name } if name == "answer"));
    }

    #[test]
    fn unknown_names_fail_to_resolve() {
        let registry = FunctionRegistry::new();
        let err = registry.resolve("missing_fn").expect_err("nothing registered");
        assert!(matches!(err, CacheError::UnknownFunction { name } if name == "missing_fn"));
    }

    #[test]
    fn instance_entries_shadow_globals() {
        let registry = FunctionRegistry::new();
        assert_eq!(
            registry.resolve("calorie_counting").expect("global").scope(),
            Scope::Global
        );

        registry
            .register("calorie_counting", constant(0))
            .expect("shadowing a global is allowed");
        let callable = registry.resolve("calorie_counting").expect("instance");
        assert_eq!(callable.scope(), Scope::Instance);
        assert_eq!(callable.call(&[]).expect("call"), Value::Int(0));

        // other registries still see the global declaration
        let other = FunctionRegistry::new();
        assert_eq!(
            other.resolve("calorie_counting").expect("global").scope(),
            Scope::Global
        );
    }
}
