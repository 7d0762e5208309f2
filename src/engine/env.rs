//! Engine environment.

use super::grid::GridEngine;
use super::Engine;
use crate::engine::error::{EngineError, Result};
use crate::params::{Param, ParamKind, ParamSet, ParamValue};
use std::sync::Arc;

/// Process-scoped handle to an engine.
///
/// An environment owns the installed [`Engine`] implementation and a set
/// of default parameter overrides that every model created from it
/// inherits. Dropping the environment releases it; models keep the engine
/// alive for their own lifetime, so an `Env` can go out of scope before
/// the models built from it.
///
/// Release happens exactly once on every exit path, including error
/// paths, via `Drop`.
pub struct Env {
    engine: Arc<dyn Engine>,
    defaults: ParamSet,
}

impl Env {
    /// Creates an environment backed by the grid reference engine.
    pub fn new() -> Self {
        Self::with_engine(Arc::new(GridEngine::new()))
    }

    /// Creates an environment backed by a caller-provided engine.
    pub fn with_engine(engine: Arc<dyn Engine>) -> Self {
        Self {
            engine,
            defaults: ParamSet::new(),
        }
    }

    /// Sets a default integer parameter for models created later.
    pub fn set_int_param(&mut self, param: Param, value: i64) -> Result<()> {
        self.defaults.set(param, ParamValue::Int(value))
    }

    /// Sets a default float parameter for models created later.
    pub fn set_float_param(&mut self, param: Param, value: f64) -> Result<()> {
        self.defaults.set(param, ParamValue::Float(value))
    }

    /// Current default value of an integer parameter.
    pub fn get_int_param(&self, param: Param) -> Result<i64> {
        match param.kind() {
            ParamKind::Int => Ok(self.defaults.int(param)),
            ParamKind::Float => Err(EngineError::InvalidArgument(format!(
                "parameter {} is not an integer parameter",
                param.name()
            ))),
        }
    }

    /// Name of the installed engine.
    pub fn engine_name(&self) -> &'static str {
        self.engine.name()
    }

    pub(crate) fn engine_handle(&self) -> Arc<dyn Engine> {
        Arc::clone(&self.engine)
    }

    pub(crate) fn defaults(&self) -> &ParamSet {
        &self.defaults
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
