//! Optimization model building blocks.
//!
//! A [`Model`] owns named variables, linear constraints, general function
//! constraints, an objective, and parameter overrides, and is solved in
//! place by the engine installed in its [`Env`](crate::Env).

mod expr;
mod genconstr;
#[allow(clippy::module_inception)]
mod model;
mod variables;

pub use expr::{Cmp, LinExpr, QuadExpr, Sense};
pub use genconstr::{GenConstr, GenConstrAttr, GenConstrFunc, GenConstrId};
pub use model::{ConstrId, LinConstr, Model, Objective};
pub use variables::{VarId, VarType, Variable, INFINITY};
