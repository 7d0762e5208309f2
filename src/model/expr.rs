//! Algebraic expressions over model variables.
//!
//! [`LinExpr`] is a linear combination of variables plus a constant.
//! [`QuadExpr`] extends it with quadratic terms; objectives accept either.
//! Expressions reference variables by [`VarId`], so they are only valid for
//! the model whose variables they were built from.

use super::variables::VarId;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Comparison operator of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmp {
    /// `expr <= rhs`
    LessEqual,
    /// `expr >= rhs`
    GreaterEqual,
    /// `expr == rhs`
    Equal,
}

impl std::fmt::Display for Cmp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cmp::LessEqual => write!(f, "<="),
            Cmp::GreaterEqual => write!(f, ">="),
            Cmp::Equal => write!(f, "=="),
        }
    }
}

/// Optimization direction of the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// A linear combination of variables plus a constant term.
///
/// # Examples
///
/// ```
/// use funcopt::{Env, Model, Variable, LinExpr};
///
/// let env = Env::new();
/// let mut m = Model::new(&env, "ex");
/// let x = m.add_var(Variable::continuous("x", 0.0, 1.0)).unwrap();
/// let y = m.add_var(Variable::continuous("y", 0.0, 1.0)).unwrap();
///
/// // 2x - y + 1
/// let e = LinExpr::term(2.0, x) - y + 1.0;
/// assert_eq!(e.eval(&[0.5, 0.25]), 1.75);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinExpr {
    /// `(coefficient, variable)` pairs.
    pub terms: Vec<(f64, VarId)>,
    /// Constant offset.
    pub constant: f64,
}

impl LinExpr {
    /// Creates an empty expression (constant zero).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a single-term expression `coeff * var`.
    pub fn term(coeff: f64, var: VarId) -> Self {
        Self {
            terms: vec![(coeff, var)],
            constant: 0.0,
        }
    }

    /// Appends `coeff * var`.
    pub fn add_term(mut self, coeff: f64, var: VarId) -> Self {
        self.terms.push((coeff, var));
        self
    }

    /// Adds to the constant offset.
    pub fn add_constant(mut self, c: f64) -> Self {
        self.constant += c;
        self
    }

    /// Whether the expression has no variable terms.
    pub fn is_constant(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluates the expression against a full assignment, indexed by
    /// variable id.
    pub fn eval(&self, values: &[f64]) -> f64 {
        let mut acc = self.constant;
        for &(coeff, var) in &self.terms {
            acc += coeff * values[var.0];
        }
        acc
    }

    /// Ids of all referenced variables.
    pub fn vars(&self) -> impl Iterator<Item = VarId> + '_ {
        self.terms.iter().map(|&(_, v)| v)
    }
}

impl From<VarId> for LinExpr {
    fn from(var: VarId) -> Self {
        LinExpr::term(1.0, var)
    }
}

impl Add for LinExpr {
    type Output = LinExpr;
    fn add(mut self, rhs: LinExpr) -> LinExpr {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl Sub for LinExpr {
    type Output = LinExpr;
    fn sub(mut self, rhs: LinExpr) -> LinExpr {
        self.terms.extend(rhs.terms.into_iter().map(|(c, v)| (-c, v)));
        self.constant -= rhs.constant;
        self
    }
}

impl Add<VarId> for LinExpr {
    type Output = LinExpr;
    fn add(self, rhs: VarId) -> LinExpr {
        self.add_term(1.0, rhs)
    }
}

impl Sub<VarId> for LinExpr {
    type Output = LinExpr;
    fn sub(self, rhs: VarId) -> LinExpr {
        self.add_term(-1.0, rhs)
    }
}

impl Add<f64> for LinExpr {
    type Output = LinExpr;
    fn add(self, rhs: f64) -> LinExpr {
        self.add_constant(rhs)
    }
}

impl Sub<f64> for LinExpr {
    type Output = LinExpr;
    fn sub(self, rhs: f64) -> LinExpr {
        self.add_constant(-rhs)
    }
}

impl Mul<f64> for LinExpr {
    type Output = LinExpr;
    fn mul(mut self, rhs: f64) -> LinExpr {
        for term in &mut self.terms {
            term.0 *= rhs;
        }
        self.constant *= rhs;
        self
    }
}

impl Mul<LinExpr> for f64 {
    type Output = LinExpr;
    fn mul(self, rhs: LinExpr) -> LinExpr {
        rhs * self
    }
}

impl Neg for LinExpr {
    type Output = LinExpr;
    fn neg(self) -> LinExpr {
        self * -1.0
    }
}

/// A quadratic expression: a linear part plus `coeff * v1 * v2` terms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuadExpr {
    /// Linear part.
    pub lin: LinExpr,
    /// `(coefficient, variable, variable)` product terms.
    pub quad: Vec<(f64, VarId, VarId)>,
}

impl QuadExpr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `coeff * v1 * v2`.
    pub fn add_quad_term(mut self, coeff: f64, v1: VarId, v2: VarId) -> Self {
        self.quad.push((coeff, v1, v2));
        self
    }

    /// Whether any quadratic terms are present.
    pub fn is_quadratic(&self) -> bool {
        !self.quad.is_empty()
    }

    /// Evaluates the expression against a full assignment.
    pub fn eval(&self, values: &[f64]) -> f64 {
        let mut acc = self.lin.eval(values);
        for &(coeff, v1, v2) in &self.quad {
            acc += coeff * values[v1.0] * values[v2.0];
        }
        acc
    }

    /// Ids of all referenced variables.
    pub fn vars(&self) -> impl Iterator<Item = VarId> + '_ {
        self.lin
            .vars()
            .chain(self.quad.iter().flat_map(|&(_, a, b)| [a, b]))
    }
}

impl From<LinExpr> for QuadExpr {
    fn from(lin: LinExpr) -> Self {
        QuadExpr { lin, quad: Vec::new() }
    }
}

impl From<VarId> for QuadExpr {
    fn from(var: VarId) -> Self {
        QuadExpr::from(LinExpr::from(var))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn v(i: usize) -> VarId {
        VarId(i)
    }

    #[test]
    fn test_term_and_eval() {
        let e = LinExpr::term(2.0, v(0)).add_term(-1.0, v(1)).add_constant(3.0);
        assert_eq!(e.eval(&[1.0, 4.0]), 1.0);
    }

    #[test]
    fn test_operators() {
        // 0.25*a - b
        let e = LinExpr::term(0.25, v(0)) - v(1);
        assert_eq!(e.eval(&[4.0, 1.0]), 0.0);

        // (a + b + 1) * 2
        let e = (LinExpr::from(v(0)) + v(1) + 1.0) * 2.0;
        assert_eq!(e.eval(&[1.0, 2.0]), 8.0);

        let e = 3.0 * LinExpr::from(v(0));
        assert_eq!(e.eval(&[2.0]), 6.0);

        let e = -(LinExpr::from(v(0)) - 1.0);
        assert_eq!(e.eval(&[5.0]), -4.0);
    }

    #[test]
    fn test_constant_expr() {
        let e = LinExpr::new().add_constant(7.0);
        assert!(e.is_constant());
        assert_eq!(e.eval(&[]), 7.0);
    }

    #[test]
    fn test_quad_eval() {
        // x^2 + 2xy + 3
        let e = QuadExpr::from(LinExpr::new().add_constant(3.0))
            .add_quad_term(1.0, v(0), v(0))
            .add_quad_term(2.0, v(0), v(1));
        assert!(e.is_quadratic());
        assert_eq!(e.eval(&[2.0, 1.5]), 13.0);
    }

    #[test]
    fn test_quad_from_lin() {
        let q = QuadExpr::from(LinExpr::term(2.0, v(0)));
        assert!(!q.is_quadratic());
        assert_eq!(q.eval(&[3.0]), 6.0);
    }

    #[test]
    fn test_cmp_display() {
        assert_eq!(Cmp::LessEqual.to_string(), "<=");
        assert_eq!(Cmp::GreaterEqual.to_string(), ">=");
        assert_eq!(Cmp::Equal.to_string(), "==");
    }

    proptest! {
        // Evaluation is linear: eval(a + b) == eval(a) + eval(b).
        #[test]
        fn prop_eval_additive(
            c1 in -100.0f64..100.0,
            c2 in -100.0f64..100.0,
            k in -10.0f64..10.0,
            x0 in -50.0f64..50.0,
            x1 in -50.0f64..50.0,
        ) {
            let a = LinExpr::term(c1, v(0)).add_constant(k);
            let b = LinExpr::term(c2, v(1));
            let sum = a.clone() + b.clone();
            let vals = [x0, x1];
            let lhs = sum.eval(&vals);
            let rhs = a.eval(&vals) + b.eval(&vals);
            prop_assert!((lhs - rhs).abs() <= 1e-9 * (1.0 + lhs.abs()));
        }

        // Scaling commutes with evaluation.
        #[test]
        fn prop_eval_scaling(
            c in -100.0f64..100.0,
            s in -10.0f64..10.0,
            x in -50.0f64..50.0,
        ) {
            let e = LinExpr::term(c, v(0)).add_constant(1.0);
            let lhs = (e.clone() * s).eval(&[x]);
            let rhs = s * e.eval(&[x]);
            prop_assert!((lhs - rhs).abs() <= 1e-9 * (1.0 + lhs.abs()));
        }
    }
}
