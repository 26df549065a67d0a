//! Registry and factory for declarative preprocessor records.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};
use sluice_core::{Preprocessor, PreprocessorConfig, SluiceError};

use super::fill_gaps::{FILL_GAPS, FillGapsPreprocessor};

/// Constructor turning keyword arguments into a preprocessor.
pub type PreprocessorCtor =
    Box<dyn Fn(&Map<String, Value>) -> Result<Box<dyn Preprocessor>, SluiceError> + Send + Sync>;

fn fill_gaps_ctor(params: &Map<String, Value>) -> Result<Box<dyn Preprocessor>, SluiceError> {
    Ok(Box::new(FillGapsPreprocessor::from_params(params)?))
}

/// A preprocessor given either as a ready instance or as a declarative record.
pub enum PreprocessorSpec {
    /// Already constructed; passed through unchanged.
    Instance(Box<dyn Preprocessor>),
    /// `{"type": <name>, ...kwargs}` record resolved through the registry.
    Config(Map<String, Value>),
}

impl fmt::Debug for PreprocessorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(p) => f.debug_tuple("Instance").field(p).finish(),
            Self::Config(m) => f.debug_tuple("Config").field(m).finish(),
        }
    }
}

impl From<Box<dyn Preprocessor>> for PreprocessorSpec {
    fn from(p: Box<dyn Preprocessor>) -> Self {
        Self::Instance(p)
    }
}

impl From<Map<String, Value>> for PreprocessorSpec {
    fn from(m: Map<String, Value>) -> Self {
        Self::Config(m)
    }
}

/// Type name → constructor table for declarative preprocessors.
///
/// Names are unique for the lifetime of the registry.
#[derive(Default)]
pub struct PreprocessorRegistry {
    ctors: BTreeMap<String, PreprocessorCtor>,
}

impl fmt::Debug for PreprocessorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreprocessorRegistry")
            .field("types", &self.ctors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PreprocessorRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the preprocessors shipped in this crate (`fill_gaps`).
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut reg = Self::new();
        reg.ctors.insert(FILL_GAPS.to_string(), Box::new(fill_gaps_ctor));
        reg
    }

    /// Register `ctor` under `name`.
    ///
    /// # Errors
    /// Returns `RegistrationConflict` if `name` is taken; the existing entry stays in place.
    pub fn register<F>(&mut self, name: impl Into<String>, ctor: F) -> Result<(), SluiceError>
    where
        F: Fn(&Map<String, Value>) -> Result<Box<dyn Preprocessor>, SluiceError>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        if self.ctors.contains_key(&name) {
            return Err(SluiceError::registration_conflict(name));
        }
        self.ctors.insert(name, Box::new(ctor));
        Ok(())
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.ctors.contains_key(name)
    }

    /// Registered type names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ctors.keys().map(String::as_str)
    }

    /// Construct the preprocessor registered as `name` from `params`.
    ///
    /// # Errors
    /// Returns `UnknownType` if `name` is not registered, or whatever the constructor reports.
    pub fn create(
        &self,
        name: &str,
        params: &Map<String, Value>,
    ) -> Result<Box<dyn Preprocessor>, SluiceError> {
        let ctor = self
            .ctors
            .get(name)
            .ok_or_else(|| SluiceError::unknown_type(name))?;
        ctor(params)
    }

    /// Construct a preprocessor from a `{"type": ..., ...}` record without modifying it.
    ///
    /// # Errors
    /// Returns `Config` when `type` is missing, plus any error from [`Self::create`].
    pub fn resolve_record(
        &self,
        record: &Map<String, Value>,
    ) -> Result<Box<dyn Preprocessor>, SluiceError> {
        let cfg = PreprocessorConfig::from_record(record)?;
        self.create(&cfg.kind, &cfg.params)
    }

    /// Resolve a spec into an instance.
    ///
    /// # Errors
    /// See [`Self::resolve_record`].
    pub fn normalize(
        &self,
        spec: impl Into<PreprocessorSpec>,
    ) -> Result<Box<dyn Preprocessor>, SluiceError> {
        match spec.into() {
            PreprocessorSpec::Instance(p) => Ok(p),
            PreprocessorSpec::Config(record) => self.resolve_record(&record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => unreachable!(),
        }
    }

    #[test]
    fn builtins_include_fill_gaps() {
        let reg = PreprocessorRegistry::with_builtins();
        assert!(reg.contains("fill_gaps"));
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["fill_gaps"]);
    }

    #[test]
    fn bad_kwargs_surface_from_constructor() {
        let reg = PreprocessorRegistry::with_builtins();
        let err = reg
            .resolve_record(&record(json!({"type": "fill_gaps", "gap_size": "10min"})))
            .unwrap_err();
        assert!(matches!(err, SluiceError::InvalidArg(_)));
    }
}
