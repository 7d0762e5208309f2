//! Decision variable types.

use serde::{Deserialize, Serialize};

/// Bound magnitude treated as infinite.
///
/// Using a large finite sentinel keeps model files plain JSON numbers;
/// any bound at or beyond this magnitude counts as unbounded.
pub const INFINITY: f64 = 1e100;

/// Index of a variable within its owning [`Model`](super::Model).
///
/// Ids are assigned in insertion order and are only meaningful for the
/// model that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VarId(pub(crate) usize);

impl VarId {
    /// Position of the variable in the model's variable list.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Domain type of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarType {
    /// Real-valued within the bounds.
    Continuous,
    /// Integer-valued within the bounds.
    Integer,
}

/// A named scalar decision variable with lower/upper bounds and an
/// objective coefficient.
///
/// Bounds may be infinite. Consistency (`lb <= ub`) is enforced when the
/// variable is added to a model.
///
/// # Examples
///
/// ```
/// use funcopt::Variable;
///
/// let x = Variable::continuous("x", -1.0, 4.0);
/// assert_eq!(x.lb, -1.0);
///
/// let free = Variable::continuous("y", 0.0, f64::INFINITY).with_obj(2.5);
/// assert_eq!(free.obj, 2.5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    /// Variable name (unique within a model).
    pub name: String,
    /// Lower bound.
    pub lb: f64,
    /// Upper bound.
    pub ub: f64,
    /// Objective coefficient, used when no explicit objective is set.
    pub obj: f64,
    /// Domain type.
    pub vtype: VarType,
}

impl Variable {
    /// Creates a continuous variable with the given bounds.
    pub fn continuous(name: impl Into<String>, lb: f64, ub: f64) -> Self {
        Self {
            name: name.into(),
            lb,
            ub,
            obj: 0.0,
            vtype: VarType::Continuous,
        }
    }

    /// Creates an integer variable with the given bounds.
    pub fn integer(name: impl Into<String>, lb: f64, ub: f64) -> Self {
        Self {
            name: name.into(),
            lb,
            ub,
            obj: 0.0,
            vtype: VarType::Integer,
        }
    }

    /// Sets the objective coefficient.
    pub fn with_obj(mut self, obj: f64) -> Self {
        self.obj = obj;
        self
    }

    /// Whether both bounds are finite, i.e. within [`INFINITY`].
    pub fn is_bounded(&self) -> bool {
        self.lb.abs() < INFINITY && self.ub.abs() < INFINITY
    }

    /// Whether the bounds are consistent (`lb <= ub`, neither NaN).
    pub fn bounds_valid(&self) -> bool {
        !self.lb.is_nan() && !self.ub.is_nan() && self.lb <= self.ub
    }
}
