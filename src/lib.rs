//! Typed optimization modeling with pluggable solve engines.
//!
//! Provides a small modeling layer and the surrounding machinery needed
//! to drive an optimization engine:
//!
//! - **Modeling**: continuous/integer variables, linear and quadratic
//!   expressions, linear constraints, and general function constraints
//!   (`sin`, `cos`, `exp`) tying an output variable to a nonlinear
//!   transform of an input variable.
//! - **Engine seam**: the [`Engine`] trait captures the minimal
//!   solve/tune surface, so external solvers can be wrapped without
//!   touching the modeling layer. [`GridEngine`] is the built-in
//!   deterministic reference implementation.
//! - **Parameters**: typed, validated global parameters plus
//!   per-constraint attributes, persisted as `.prm` key/value files.
//! - **Tuning**: ranked evaluation of candidate parameter settings, with
//!   retention control and loading of a ranked result back into a model.
//!
//! # Architecture
//!
//! Models are created from an [`Env`], which owns the installed engine
//! and default parameters. All fallible calls return [`Result`] with an
//! [`EngineError`] carrying a stable numeric code, so a driver can funnel
//! every failure into one handler.

pub mod engine;
pub mod model;
pub mod params;
pub mod tune;

pub use engine::{Engine, EngineError, Env, GridEngine, Result, SolveStatus, Solution};
pub use model::{
    Cmp, ConstrId, GenConstr, GenConstrAttr, GenConstrFunc, GenConstrId, LinConstr, LinExpr,
    Model, Objective, QuadExpr, Sense, VarId, VarType, Variable, INFINITY,
};
pub use params::{Param, ParamKind, ParamSet, ParamValue};
pub use tune::{TuneOutcome, TuneResult, TuneTrial};
