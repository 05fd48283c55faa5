//! Resolver registry and structural dispatch

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::{Param, RawParams, RawValue, StackInfo};
use crate::{Error, Result};

/// A resolver turns the input of `{ Name: input }` into a parameter.
///
/// Called with the parameter key, the input value and the stack being
/// resolved.
pub type Resolver = Arc<dyn Fn(&str, &RawValue, &dyn StackInfo) -> Result<Param> + Send + Sync>;

/// Named resolvers available to parameter values.
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, Resolver>,
}

impl ResolverRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `resolver` under `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, resolver: F)
    where
        F: Fn(&str, &RawValue, &dyn StackInfo) -> Result<Param> + Send + Sync + 'static,
    {
        let name = name.into();
        tracing::trace!(resolver = %name, "Registering resolver");
        self.resolvers.insert(name, Arc::new(resolver));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolvers.contains_key(name)
    }

    /// Registered resolver names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.resolvers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve every raw parameter for `stack`.
    ///
    /// Fails on the first parameter that cannot be resolved; the error names
    /// its key.
    pub fn resolve(&self, raw: &RawParams, stack: &dyn StackInfo) -> Result<Vec<Param>> {
        raw.iter()
            .map(|(key, value)| {
                self.resolve_value(key, value, stack)
                    .map_err(|e| Error::resolving(key, e))
            })
            .collect()
    }

    /// Resolve a single value under `key`.
    pub fn resolve_value(&self, key: &str, value: &RawValue, stack: &dyn StackInfo) -> Result<Param> {
        match value {
            RawValue::Scalar(scalar) => Ok(Param::new(key, scalar.to_string())),
            RawValue::Sequence(items) => {
                let values = items
                    .iter()
                    .map(|item| self.resolve_value(key, item, stack).map(|p| p.value))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Param::new(key, values.join(",")))
            }
            RawValue::Mapping(map) => {
                let (name, inner) = value
                    .as_resolver_call()
                    .ok_or(Error::BadResolverMap { entries: map.len() })?;
                let resolver = self
                    .resolvers
                    .get(name)
                    .ok_or_else(|| Error::UnknownResolver {
                        name: name.to_string(),
                    })?;
                tracing::debug!(key, resolver = name, stack = stack.name(), "Dispatching resolver");
                resolver(key, inner, stack)
            }
        }
    }
}

impl fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverRegistry")
            .field("resolvers", &self.names())
            .finish()
    }
}
