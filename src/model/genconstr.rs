//! General function constraints.
//!
//! A function constraint ties an output variable to a predefined nonlinear
//! function of an input variable: `output = f(input)`. How an engine treats
//! the relation is controlled by the global `FuncNonlinear` parameter and,
//! when that is off, by the per-constraint attribute of the same name.

use super::variables::VarId;
use serde::{Deserialize, Serialize};

/// Index of a function constraint within its owning model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenConstrId(pub(crate) usize);

impl GenConstrId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Function kinds supported by the modeling layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenConstrFunc {
    Sin,
    Cos,
    Exp,
}

impl GenConstrFunc {
    /// Exact value of the function at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            GenConstrFunc::Sin => x.sin(),
            GenConstrFunc::Cos => x.cos(),
            GenConstrFunc::Exp => x.exp(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GenConstrFunc::Sin => "sin",
            GenConstrFunc::Cos => "cos",
            GenConstrFunc::Exp => "exp",
        }
    }
}

/// Per-constraint integer attributes of a function constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenConstrAttr {
    /// Treat this constraint as a true nonlinear function (1) or as a
    /// piecewise-linear approximation (0). Overridden while the global
    /// `FuncNonlinear` parameter is 1.
    FuncNonlinear,
    /// Piece count for the approximated mode. 0 inherits the global
    /// `FuncPieces` parameter.
    FuncPieces,
}

/// A named constraint of the form `output = f(input)`.
///
/// # Examples
///
/// ```
/// use funcopt::{Env, Model, Variable, GenConstr};
///
/// let env = Env::new();
/// let mut m = Model::new(&env, "ex");
/// let x = m.add_var(Variable::continuous("x", -1.0, 4.0)).unwrap();
/// let y = m.add_var(Variable::continuous("y", -1.0, 1.0)).unwrap();
/// m.add_genconstr(GenConstr::sin(x, y, "c_sin")).unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenConstr {
    /// Constraint name (unique among function constraints of a model).
    pub name: String,
    /// Function kind.
    pub func: GenConstrFunc,
    /// Input variable.
    pub input: VarId,
    /// Output variable.
    pub output: VarId,
    /// Engine options, `key=value` pairs separated by whitespace.
    #[serde(default)]
    pub options: String,
    /// Per-constraint nonlinearity flag (attribute `FuncNonlinear`).
    #[serde(default)]
    pub func_nonlinear: i64,
    /// Per-constraint piece count (attribute `FuncPieces`, 0 = inherit).
    #[serde(default)]
    pub func_pieces: i64,
}

impl GenConstr {
    fn new(func: GenConstrFunc, input: VarId, output: VarId, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            func,
            input,
            output,
            options: String::new(),
            func_nonlinear: 0,
            func_pieces: 0,
        }
    }

    /// `output = sin(input)`
    pub fn sin(input: VarId, output: VarId, name: impl Into<String>) -> Self {
        Self::new(GenConstrFunc::Sin, input, output, name)
    }

    /// `output = cos(input)`
    pub fn cos(input: VarId, output: VarId, name: impl Into<String>) -> Self {
        Self::new(GenConstrFunc::Cos, input, output, name)
    }

    /// `output = exp(input)`
    pub fn exp(input: VarId, output: VarId, name: impl Into<String>) -> Self {
        Self::new(GenConstrFunc::Exp, input, output, name)
    }

    /// Attaches an engine options string. Known keys are applied to the
    /// matching attributes when the constraint is added to a model.
    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = options.into();
        self
    }
}
