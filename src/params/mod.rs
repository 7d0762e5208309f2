//! Engine parameters.
//!
//! Parameters are named, typed knobs scoped either to an environment
//! (defaults for new models) or to a single model. The `.prm` file format
//! persists a chosen configuration for reuse.

mod prm;
mod set;

pub use prm::{read_params, write_params};
pub use set::{Param, ParamKind, ParamSet, ParamValue};
