//! Engine seam: environment, errors, solutions, and the solve/tune trait.

pub mod env;
pub mod error;
pub mod grid;
pub mod solution;

pub use env::Env;
pub use error::{EngineError, Result};
pub use grid::GridEngine;
pub use solution::{SolveStatus, Solution};

use crate::model::Model;
use crate::tune::TuneOutcome;

/// Trait for optimization engine implementations.
///
/// Implementors provide the actual solving and tuning logic. This can
/// wrap an external solver or provide a built-in reference such as
/// [`GridEngine`]. Calls are synchronous and blocking; an engine is free
/// to parallelize internally.
pub trait Engine: Send + Sync {
    /// Short engine tag used in logs and error messages.
    fn name(&self) -> &'static str;

    /// Solves the model under its current parameters.
    fn solve(&self, model: &Model) -> Result<Solution>;

    /// Evaluates candidate parameter settings and ranks the ones that
    /// solve. Retention and trial limits come from the model's
    /// `TuneResults` and `TuneTrials` parameters.
    fn tune(&self, model: &Model) -> Result<TuneOutcome>;
}
