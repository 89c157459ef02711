//! Name-addressed memoization of cacheable functions.
//!
//! A [`Cache`] resolves a function by name (its own registrations first, then
//! the process-wide declarations), fingerprints the argument list and returns
//! the stored result for `(name, fingerprint)` when there is one. Otherwise
//! it runs the function once, stores the result and returns it. Stored
//! results are never evicted or recomputed.

mod error;
mod registry;
mod stats;
mod store;
mod typed;

pub use error::CacheError;
pub use registry::{
    CacheableCall, CacheableFn, CacheableFunction, Callable, FunctionRegistry, Scope,
    discover_global_functions, global_function_names,
};
pub use stats::CacheStats;
pub use store::ResultStore;
pub use typed::{CachedFn, FromArgs, IntoArgs};

use std::fmt;
use std::sync::Arc;

use puzzlekit_fingerprint::fingerprint_sequence;
use tracing::{debug, trace};

use crate::value::Value;
use stats::CacheCounters;

/// Fingerprint of a whole argument list: element fingerprints folded in
/// order, whatever the element kinds.
pub fn fingerprint_args(args: &[Value]) -> i64 {
    fingerprint_sequence(args)
}

/// One isolated memoization cache.
///
/// Instances share the global declarations but nothing else: registrations
/// and stored results belong to the instance that made them.
#[derive(Default)]
pub struct Cache {
    registry: FunctionRegistry,
    store: ResultStore,
    counters: CacheCounters,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a closure visible only to this instance.
    pub fn register<F>(&self, name: impl Into<String>, function: F) -> Result<(), CacheError>
    where
        F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.registry.register(name, Arc::new(function))
    }

    /// Registers a closure over typed arguments. Argument lists that do not
    /// decode into `A` fail the call with an [`ArgumentError`](crate::value::ArgumentError).
    pub fn register_typed<A, R, F>(
        &self,
        name: impl Into<String>,
        function: F,
    ) -> Result<(), CacheError>
    where
        A: FromArgs,
        R: Into<Value>,
        F: Fn(A) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        self.register(name, move |args: &[Value]| {
            let args = A::from_args(args)?;
            function(args).map(Into::into)
        })
    }

    pub fn resolve(&self, name: &str) -> Result<Callable, CacheError> {
        self.registry.resolve(name)
    }

    /// Returns the stored result for `(name, fingerprint(args))`, computing
    /// and storing it on a miss.
    ///
    /// Concurrent callers with the same key wait on a single execution. A
    /// failed execution stores nothing, so the next call runs the function
    /// again.
    pub fn invoke(&self, name: &str, args: &[Value]) -> Result<Arc<Value>, CacheError> {
        let callable = self.registry.resolve(name)?;
        let fingerprint = fingerprint_args(args);
        let slot = self.store.slot(name, fingerprint);

        if let Some(result) = slot.get() {
            self.counters.record_hit();
            trace!(function = name, fingerprint, "cache hit");
            return Ok(Arc::clone(result));
        }

        let mut executed = false;
        let outcome = slot.get_or_try_init(|| {
            executed = true;
            callable.call(args).map(Arc::new)
        });

        match outcome {
            Ok(result) => {
                if executed {
                    self.counters.record_miss();
                    debug!(function = name, fingerprint, scope = ?callable.scope(), "computed");
                } else {
                    self.counters.record_hit();
                    trace!(function = name, fingerprint, "cache hit after wait");
                }
                Ok(Arc::clone(result))
            }
            Err(source) => {
                self.counters.record_failure();
                Err(CacheError::Invocation {
                    name: name.to_string(),
                    source,
                })
            }
        }
    }

    /// Stored result for `name` and `args`, without computing anything.
    pub fn cached(&self, name: &str, args: &[Value]) -> Option<Arc<Value>> {
        self.store.get(name, fingerprint_args(args))
    }

    pub fn stats(&self) -> CacheStats {
        self.counters
            .snapshot(self.store.function_count(), self.store.len())
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("registry", &self.registry)
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn argument_lists_fold_in_order() {
        let forward = [Value::Int(1), Value::Int(2)];
        let backward = [Value::Int(2), Value::Int(1)];
        assert_ne!(fingerprint_args(&forward), fingerprint_args(&backward));
        assert_eq!(
            fingerprint_args(&forward),
            fingerprint_args(&[Value::Int(1), Value::Int(2)])
        );
    }

    #[test]
    fn argument_lists_of_strings_keep_boundaries() {
        let split = [Value::from("ab"), Value::from("c")];
        let shifted = [Value::from("a"), Value::from("bc")];
        assert_ne!(fingerprint_args(&split), fingerprint_args(&shifted));
    }

    #[test]
    fn cached_peeks_without_computing() {
        let cache = Cache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        cache
            .register("square", move |args: &[Value]| {
                counter.fetch_add(1, Ordering::SeqCst);
                let x = args[0].as_int().unwrap_or_default();
                Ok(Value::Int(x * x))
            })
            .expect("register");

        assert_eq!(cache.cached("square", &[Value::Int(4)]), None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        cache.invoke("square", &[Value::Int(4)]).expect("invoke");
        assert_eq!(
            cache.cached("square", &[Value::Int(4)]).as_deref(),
            Some(&Value::Int(16))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn stats_track_hits_misses_and_failures() {
        let cache = Cache::new();
        cache
            .register_typed("halve", |(x,): (i64,)| {
                anyhow::ensure!(x % 2 == 0, "{x} is odd");
                Ok(x / 2)
            })
            .expect("register");

        cache.invoke("halve", &[Value::Int(8)]).expect("even");
        cache.invoke("halve", &[Value::Int(8)]).expect("even");
        assert!(cache.invoke("halve", &[Value::Int(3)]).is_err());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.functions, 1);
    }
}
