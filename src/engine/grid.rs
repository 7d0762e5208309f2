//! Grid sampling reference engine.

use super::error::{EngineError, Result};
use super::solution::{SolveStatus, Solution};
use super::Engine;
use crate::model::{Cmp, GenConstrFunc, Model, Sense, VarType};
use crate::params::{Param, ParamSet, ParamValue};
use crate::tune::{rank, TuneOutcome, TuneTrial};
use tracing::info;

/// A deterministic sampling engine for testing and demos.
///
/// Evaluates the model on a uniform grid over its free variables, computes
/// function-constraint outputs directly from their inputs, and reports the
/// best feasible point. This is a trivial evaluator, not a real nonlinear
/// solver.
///
/// # Limitations
///
/// - Every free (sampled) variable needs finite bounds.
/// - A variable is only derived from a linear constraint when the
///   constraint is a two-term equality between otherwise free variables;
///   anything else is checked per point, not solved for.
/// - Function constraints must not chain: the input of one cannot be the
///   output of another.
/// - The reported `Optimal` is the best sampled point; there is no
///   optimality proof.
///
/// Tuning evaluates a fixed list of built-in parameter presets in order,
/// no search is performed.
pub struct GridEngine;

impl GridEngine {
    pub fn new() -> Self {
        Self
    }

    fn unsupported(&self, detail: impl Into<String>) -> EngineError {
        EngineError::Unsupported {
            engine: self.name().to_string(),
            detail: detail.into(),
        }
    }

    /// Solves `model` under `params` instead of the model's own set.
    /// Tuning uses this to evaluate candidate settings.
    fn solve_with(&self, model: &Model, params: &ParamSet) -> Result<Solution> {
        model.validate()?;

        let tol = params.float(Param::FeasibilityTol);
        let budget = params.int(Param::GridPoints).max(2) as usize;
        let global_nl = params.int(Param::FuncNonlinear) == 1;
        let global_pieces = params.int(Param::FuncPieces);
        let verbose = params.int(Param::OutputFlag) == 1;

        let plan = self.plan(model)?;

        // Approximated mode interpolates over the input's domain, which
        // must therefore be finite.
        for gc in model.genconstrs() {
            let nonlinear = global_nl || gc.func_nonlinear == 1;
            if !nonlinear && !model.vars()[gc.input.index()].is_bounded() {
                return Err(self.unsupported(format!(
                    "function constraint {} approximated over unbounded input",
                    gc.name
                )));
            }
        }

        let mut axes: Vec<(usize, Vec<f64>)> = Vec::new();
        for &vi in &plan.sampled {
            match self.axis(model, vi, budget, plan.sampled.len())? {
                Some(points) => axes.push((vi, points)),
                // An integer variable with no value in its bounds.
                None => return Ok(Solution::empty(SolveStatus::Infeasible, 0)),
            }
        }

        if verbose {
            let total: usize = axes.iter().map(|(_, p)| p.len()).product();
            info!(
                "grid solve of {}: {} points over {} free variables",
                model.name(),
                total,
                axes.len()
            );
        }

        let nvars = model.num_vars();
        let mut values = vec![0.0_f64; nvars];
        let mut indices = vec![0_usize; axes.len()];
        let mut work: u64 = 0;
        let sense = model.objective_sense();
        let mut best: Option<(f64, Vec<f64>)> = None;

        loop {
            work += 1;
            for (dim, (vi, points)) in axes.iter().enumerate() {
                values[*vi] = points[indices[dim]];
            }

            if self.evaluate_point(model, &plan, global_nl, global_pieces, tol, &mut values) {
                let obj = model.effective_objective(&values);
                if !obj.is_nan() {
                    let better = match &best {
                        None => true,
                        Some((cur, _)) => match sense {
                            Sense::Minimize => obj < *cur,
                            Sense::Maximize => obj > *cur,
                        },
                    };
                    if better {
                        best = Some((obj, values.clone()));
                    }
                }
            }

            // Odometer over the sampled axes.
            let mut dim = 0;
            loop {
                if dim == axes.len() {
                    break;
                }
                indices[dim] += 1;
                if indices[dim] < axes[dim].1.len() {
                    break;
                }
                indices[dim] = 0;
                dim += 1;
            }
            if dim == axes.len() {
                break;
            }
        }

        let solution = match best {
            Some((obj, vals)) => Solution {
                status: SolveStatus::Optimal,
                values: vals,
                objective: Some(obj),
                work,
            },
            None => Solution::empty(SolveStatus::Infeasible, work),
        };
        if verbose {
            info!(
                "solve finished: status {:?}, objective {:?}, work {}",
                solution.status, solution.objective, solution.work
            );
        }
        Ok(solution)
    }

    /// Sample points of one free variable. `None` means an empty integer
    /// domain.
    fn axis(
        &self,
        model: &Model,
        vi: usize,
        budget: usize,
        dims: usize,
    ) -> Result<Option<Vec<f64>>> {
        let var = &model.vars()[vi];
        let per_dim = if dims <= 1 {
            budget
        } else {
            ((budget as f64).powf(1.0 / dims as f64).floor() as usize).max(2)
        };

        match var.vtype {
            VarType::Integer => {
                let lo = var.lb.ceil() as i64;
                let hi = var.ub.floor() as i64;
                if lo > hi {
                    return Ok(None);
                }
                let count = (hi - lo + 1) as usize;
                if count > per_dim {
                    return Err(self.unsupported(format!(
                        "integer domain of {} exceeds the grid budget",
                        var.name
                    )));
                }
                Ok(Some((lo..=hi).map(|v| v as f64).collect()))
            }
            VarType::Continuous => {
                if var.lb == var.ub {
                    return Ok(Some(vec![var.lb]));
                }
                let n = per_dim.max(2);
                let step = (var.ub - var.lb) / (n - 1) as f64;
                Ok(Some((0..n).map(|i| var.lb + step * i as f64).collect()))
            }
        }
    }

    /// Completes derived values at the current point and checks
    /// feasibility. Returns false as soon as anything is violated.
    fn evaluate_point(
        &self,
        model: &Model,
        plan: &EvalPlan,
        global_nl: bool,
        global_pieces: i64,
        tol: f64,
        values: &mut [f64],
    ) -> bool {
        for s in &plan.substs {
            let v = (s.rhs - s.source_coeff * values[s.source]) / s.var_coeff;
            values[s.var] = v;
            if !self.within_var(model, s.var, v, tol) {
                return false;
            }
        }

        for gc in model.genconstrs() {
            let x = values[gc.input.index()];
            let nonlinear = global_nl || gc.func_nonlinear == 1;
            let y = if nonlinear {
                gc.func.eval(x)
            } else {
                let input = &model.vars()[gc.input.index()];
                let pieces = if gc.func_pieces >= 2 {
                    gc.func_pieces
                } else {
                    global_pieces
                };
                pwl_eval(gc.func, x, input.lb, input.ub, pieces)
            };
            values[gc.output.index()] = y;
            if !self.within_var(model, gc.output.index(), y, tol) {
                return false;
            }
        }

        for (ci, c) in model.constrs().iter().enumerate() {
            if plan.consumed[ci] {
                continue;
            }
            let lhs = c.expr.eval(values);
            let ok = match c.cmp {
                Cmp::LessEqual => lhs <= c.rhs + tol,
                Cmp::GreaterEqual => lhs >= c.rhs - tol,
                Cmp::Equal => (lhs - c.rhs).abs() <= tol,
            };
            if !ok {
                return false;
            }
        }
        true
    }

    /// Bound (and integrality) check of a derived value.
    fn within_var(&self, model: &Model, vi: usize, v: f64, tol: f64) -> bool {
        let var = &model.vars()[vi];
        if v.is_nan() || v < var.lb - tol || v > var.ub + tol {
            return false;
        }
        if var.vtype == VarType::Integer && (v - v.round()).abs() > tol {
            return false;
        }
        true
    }

    fn plan(&self, model: &Model) -> Result<EvalPlan> {
        let n = model.num_vars();
        let mut roles = vec![Role::Sampled; n];
        for gc in model.genconstrs() {
            roles[gc.output.index()] = Role::Output;
        }

        let mut consumed = vec![false; model.constrs().len()];
        let mut substs: Vec<Subst> = Vec::new();
        for (ci, c) in model.constrs().iter().enumerate() {
            if c.cmp != Cmp::Equal || c.expr.terms.len() != 2 {
                continue;
            }
            let (c1, v1) = c.expr.terms[0];
            let (c2, v2) = c.expr.terms[1];
            if v1 == v2 || c1 == 0.0 || c2 == 0.0 {
                continue;
            }
            let (lo, lo_c, hi, hi_c) = if v1.index() < v2.index() {
                (v1.index(), c1, v2.index(), c2)
            } else {
                (v2.index(), c2, v1.index(), c1)
            };
            if roles[lo] != Role::Sampled || roles[hi] != Role::Sampled {
                continue;
            }
            // A substitution source must stay sampled.
            if substs.iter().any(|s| s.source == hi) {
                continue;
            }
            substs.push(Subst {
                var: hi,
                var_coeff: hi_c,
                source: lo,
                source_coeff: lo_c,
                rhs: c.rhs - c.expr.constant,
            });
            roles[hi] = Role::Subst;
            consumed[ci] = true;
        }

        for gc in model.genconstrs() {
            if roles[gc.input.index()] == Role::Output {
                return Err(self.unsupported(format!(
                    "function constraint {} chains on the output of another",
                    gc.name
                )));
            }
        }

        let mut sampled = Vec::new();
        for (vi, role) in roles.iter().enumerate() {
            if *role == Role::Sampled {
                if !model.vars()[vi].is_bounded() {
                    return Err(self.unsupported(format!(
                        "free variable {} has infinite bounds",
                        model.vars()[vi].name
                    )));
                }
                sampled.push(vi);
            }
        }

        Ok(EvalPlan {
            sampled,
            substs,
            consumed,
        })
    }

    fn presets() -> Vec<ParamSet> {
        let preset = |entries: &[(Param, ParamValue)]| {
            let mut set = ParamSet::new();
            for &(p, v) in entries {
                set.set(p, v).expect("preset value out of range");
            }
            set
        };
        vec![
            preset(&[(Param::GridPoints, ParamValue::Int(2048))]),
            preset(&[(Param::GridPoints, ParamValue::Int(1024))]),
            preset(&[
                (Param::GridPoints, ParamValue::Int(512)),
                (Param::FuncPieces, ParamValue::Int(32)),
            ]),
            preset(&[
                (Param::GridPoints, ParamValue::Int(256)),
                (Param::FuncPieces, ParamValue::Int(16)),
            ]),
        ]
    }

    fn trial(&self, model: &Model, overlay: &ParamSet) -> TuneTrial {
        let merged = model.params().merged(overlay);
        match self.solve_with(model, &merged) {
            Ok(sol) => TuneTrial {
                solved: sol.is_solution_found(),
                work: sol.work,
                objective: sol.objective,
                params: merged,
            },
            // A setting that errors is simply not a usable setting.
            Err(_) => TuneTrial {
                solved: false,
                work: 0,
                objective: None,
                params: merged,
            },
        }
    }

    #[cfg(feature = "parallel")]
    fn eval_trials(&self, model: &Model, settings: &[ParamSet]) -> Vec<TuneTrial> {
        use rayon::prelude::*;
        settings.par_iter().map(|s| self.trial(model, s)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn eval_trials(&self, model: &Model, settings: &[ParamSet]) -> Vec<TuneTrial> {
        settings.iter().map(|s| self.trial(model, s)).collect()
    }
}

impl Default for GridEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for GridEngine {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn solve(&self, model: &Model) -> Result<Solution> {
        self.solve_with(model, model.params())
    }

    fn tune(&self, model: &Model) -> Result<TuneOutcome> {
        model.validate()?;

        let retention = model.params().int(Param::TuneResults).max(1) as usize;
        let cap = model.params().int(Param::TuneTrials) as usize;
        let verbose = model.params().int(Param::OutputFlag) == 1;

        // The model's own setting is always the first candidate.
        let mut settings = vec![ParamSet::new()];
        settings.extend(Self::presets());
        if cap > 0 {
            settings.truncate(1 + cap);
        }

        if verbose {
            info!(
                "tuning {}: {} candidate settings, retaining {}",
                model.name(),
                settings.len(),
                retention
            );
        }

        let trials = self.eval_trials(model, &settings);
        if verbose {
            for (i, t) in trials.iter().enumerate() {
                info!(
                    "tune candidate {i}: solved {}, work {}",
                    t.solved, t.work
                );
            }
        }
        Ok(rank(&trials, retention))
    }
}

/// How each variable's value is produced during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Sampled,
    Output,
    Subst,
}

/// `var = (rhs - source_coeff * source) / var_coeff`, folded from a
/// two-term linear equality.
#[derive(Debug, Clone)]
struct Subst {
    var: usize,
    var_coeff: f64,
    source: usize,
    source_coeff: f64,
    rhs: f64,
}

#[derive(Debug, Clone)]
struct EvalPlan {
    sampled: Vec<usize>,
    substs: Vec<Subst>,
    consumed: Vec<bool>,
}

/// Piecewise-linear interpolation of `func` at `x` with uniform
/// breakpoints over `[lb, ub]`.
fn pwl_eval(func: GenConstrFunc, x: f64, lb: f64, ub: f64, pieces: i64) -> f64 {
    let width = ub - lb;
    if width <= 0.0 {
        return func.eval(lb);
    }
    let pieces = pieces.max(2) as f64;
    let seg = (((x - lb) / width) * pieces).floor().clamp(0.0, pieces - 1.0);
    let x0 = lb + width * seg / pieces;
    let x1 = lb + width * (seg + 1.0) / pieces;
    let t = ((x - x0) / (x1 - x0)).clamp(0.0, 1.0);
    func.eval(x0) * (1.0 - t) + func.eval(x1) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::env::Env;
    use crate::model::{GenConstr, LinExpr, Model, Variable};

    fn quiet_env() -> Env {
        let mut env = Env::new();
        env.set_int_param(Param::OutputFlag, 0).unwrap();
        env
    }

    #[test]
    fn test_linear_minimize() {
        // minimize x over [1, 5]
        let env = quiet_env();
        let mut m = Model::new(&env, "lin");
        let x = m.add_var(Variable::continuous("x", 1.0, 5.0).with_obj(1.0)).unwrap();
        m.optimize().unwrap();
        assert_eq!(m.status(), Some(SolveStatus::Optimal));
        assert!((m.var_value(x).unwrap() - 1.0).abs() < 1e-9);
        assert!((m.objective_value().unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_linear_maximize() {
        let env = quiet_env();
        let mut m = Model::new(&env, "lin");
        let x = m.add_var(Variable::continuous("x", 1.0, 5.0)).unwrap();
        m.set_objective(LinExpr::term(2.0, x), Sense::Maximize).unwrap();
        m.optimize().unwrap();
        assert!((m.var_value(x).unwrap() - 5.0).abs() < 1e-9);
        assert!((m.objective_value().unwrap() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_infeasible() {
        let env = quiet_env();
        let mut m = Model::new(&env, "inf");
        let x = m.add_var(Variable::continuous("x", 0.0, 1.0)).unwrap();
        m.add_constr("c", LinExpr::from(x), Cmp::GreaterEqual, 2.0).unwrap();
        m.optimize().unwrap();
        assert_eq!(m.status(), Some(SolveStatus::Infeasible));
        assert!(m.var_value(x).is_err());
    }

    #[test]
    fn test_equality_substitution() {
        // y tied to x by 2x - y == 0; minimize y, so x at its lower bound.
        let env = quiet_env();
        let mut m = Model::new(&env, "subst");
        let x = m.add_var(Variable::continuous("x", 1.0, 3.0)).unwrap();
        let y = m.add_var(Variable::continuous("y", 0.0, 10.0)).unwrap();
        m.add_constr("tie", LinExpr::term(2.0, x) - y, Cmp::Equal, 0.0).unwrap();
        m.set_objective(LinExpr::from(y), Sense::Minimize).unwrap();
        m.optimize().unwrap();
        let sol_x = m.var_value(x).unwrap();
        let sol_y = m.var_value(y).unwrap();
        assert!((sol_y - 2.0 * sol_x).abs() < 1e-9);
        assert!((sol_x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_substituted_bounds_enforced() {
        // y = 2x with y capped at 4 restricts x to [1, 2].
        let env = quiet_env();
        let mut m = Model::new(&env, "substb");
        let x = m.add_var(Variable::continuous("x", 1.0, 3.0)).unwrap();
        let y = m.add_var(Variable::continuous("y", 0.0, 4.0)).unwrap();
        m.add_constr("tie", LinExpr::term(2.0, x) - y, Cmp::Equal, 0.0).unwrap();
        m.set_objective(LinExpr::from(x), Sense::Maximize).unwrap();
        m.optimize().unwrap();
        assert!(m.var_value(x).unwrap() <= 2.0 + 1e-6);
    }

    #[test]
    fn test_genconstr_exact() {
        // maximize y = sin(x), x in [0, pi]
        let env = quiet_env();
        let mut m = Model::new(&env, "sin");
        let x = m.add_var(Variable::continuous("x", 0.0, std::f64::consts::PI)).unwrap();
        let y = m.add_var(Variable::continuous("y", -1.0, 1.0)).unwrap();
        m.add_genconstr(GenConstr::sin(x, y, "g")).unwrap();
        m.set_objective(LinExpr::from(y), Sense::Maximize).unwrap();
        m.set_int_param(Param::FuncNonlinear, 1).unwrap();
        m.optimize().unwrap();
        assert!(m.objective_value().unwrap() > 0.999);
    }

    // x pinned to 1.0 on a 5-point grid over [0, 2]; 3 pieces put the
    // surrounding breakpoints at 2/3 and 4/3, so the interpolated exp
    // value differs clearly from the exact one.
    fn pinned_exp_model(env: &Env) -> (Model, crate::model::GenConstrId) {
        let mut m = Model::new(env, "pinned");
        let x = m.add_var(Variable::continuous("x", 0.0, 2.0)).unwrap();
        let y = m.add_var(Variable::continuous("y", 0.0, 10.0)).unwrap();
        let g = m.add_genconstr(GenConstr::exp(x, y, "g")).unwrap();
        m.add_constr("lo", LinExpr::from(x), Cmp::GreaterEqual, 1.0).unwrap();
        m.add_constr("hi", LinExpr::from(x), Cmp::LessEqual, 1.0).unwrap();
        m.set_objective(LinExpr::from(y), Sense::Minimize).unwrap();
        m.set_int_param(Param::GridPoints, 5).unwrap();
        m.set_int_param(Param::FuncPieces, 3).unwrap();
        (m, g)
    }

    #[test]
    fn test_approximation_differs_from_exact() {
        let env = quiet_env();
        let (mut m, _g) = pinned_exp_model(&env);

        m.optimize().unwrap();
        let approx = m.objective_value().unwrap();

        m.reset();
        m.set_int_param(Param::FuncNonlinear, 1).unwrap();
        m.optimize().unwrap();
        let exact = m.objective_value().unwrap();

        // Chord of a convex function lies above it.
        assert!(approx > exact + 0.1);
        assert!((exact - 1.0_f64.exp()).abs() < 1e-9);
    }

    #[test]
    fn test_per_constraint_flag() {
        // Exact handling enabled through the constraint attribute while
        // the global parameter stays 0.
        let env = quiet_env();
        let (mut m, g) = pinned_exp_model(&env);
        m.set_genconstr_attr(g, crate::model::GenConstrAttr::FuncNonlinear, 1).unwrap();
        m.optimize().unwrap();
        assert!((m.objective_value().unwrap() - 1.0_f64.exp()).abs() < 1e-9);
    }

    #[test]
    fn test_global_flag_enables_exact_without_attrs() {
        // The global parameter alone switches handling; the attribute
        // stays at its default of 0.
        let env = quiet_env();
        let (mut m, g) = pinned_exp_model(&env);
        assert_eq!(
            m.get_genconstr_attr(g, crate::model::GenConstrAttr::FuncNonlinear).unwrap(),
            0
        );
        m.set_int_param(Param::FuncNonlinear, 1).unwrap();
        m.optimize().unwrap();
        assert!((m.objective_value().unwrap() - 1.0_f64.exp()).abs() < 1e-9);
    }

    #[test]
    fn test_unbounded_free_var_rejected() {
        let env = quiet_env();
        let mut m = Model::new(&env, "unb");
        m.add_var(Variable::continuous("x", 0.0, f64::INFINITY).with_obj(1.0)).unwrap();
        let err = m.optimize().unwrap_err();
        assert_eq!(err.code(), 10006);
    }

    #[test]
    fn test_chained_genconstr_rejected() {
        let env = quiet_env();
        let mut m = Model::new(&env, "chain");
        let x = m.add_var(Variable::continuous("x", 0.0, 1.0)).unwrap();
        let y = m.add_var(Variable::continuous("y", -1.0, 1.0)).unwrap();
        let z = m.add_var(Variable::continuous("z", -1.0, 1.0)).unwrap();
        m.add_genconstr(GenConstr::sin(x, y, "g1")).unwrap();
        m.add_genconstr(GenConstr::cos(y, z, "g2")).unwrap();
        let err = m.optimize().unwrap_err();
        assert_eq!(err.code(), 10006);
    }

    #[test]
    fn test_integer_axis() {
        // minimize 3n - n^2 over integer n in [0, 4]: n = 4 wins.
        let env = quiet_env();
        let mut m = Model::new(&env, "int");
        let n = m.add_var(Variable::integer("n", 0.0, 4.0)).unwrap();
        let expr = crate::model::QuadExpr::from(LinExpr::term(3.0, n)).add_quad_term(-1.0, n, n);
        m.set_objective(expr, Sense::Minimize).unwrap();
        m.optimize().unwrap();
        assert!((m.var_value(n).unwrap() - 4.0).abs() < 1e-9);
        assert!((m.objective_value().unwrap() + 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_integer_domain_is_infeasible() {
        let env = quiet_env();
        let mut m = Model::new(&env, "int2");
        m.add_var(Variable::integer("n", 0.2, 0.8).with_obj(1.0)).unwrap();
        m.optimize().unwrap();
        assert_eq!(m.status(), Some(SolveStatus::Infeasible));
    }

    #[test]
    fn test_work_scales_with_grid() {
        let env = quiet_env();
        let mut m = Model::new(&env, "work");
        m.add_var(Variable::continuous("x", 0.0, 1.0).with_obj(1.0)).unwrap();

        m.set_int_param(Param::GridPoints, 100).unwrap();
        m.optimize().unwrap();
        let coarse = m.solution().unwrap().work;

        m.reset();
        m.set_int_param(Param::GridPoints, 1000).unwrap();
        m.optimize().unwrap();
        let fine = m.solution().unwrap().work;

        assert_eq!(coarse, 100);
        assert_eq!(fine, 1000);
    }

    #[test]
    fn test_tune_produces_improving_ranks() {
        let env = quiet_env();
        let mut m = Model::new(&env, "tune");
        m.add_var(Variable::continuous("x", 0.0, 1.0).with_obj(1.0)).unwrap();
        m.set_int_param(Param::TuneResults, 4).unwrap();
        m.tune().unwrap();

        assert!(m.tune_result_count() >= 2);
        let outcome = m.tuning().unwrap();
        let works: Vec<u64> = outcome.iter().map(|r| r.work).collect();
        for pair in works.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn test_tune_without_improvement_keeps_baseline_only() {
        let env = quiet_env();
        let mut m = Model::new(&env, "tunebase");
        m.add_var(Variable::continuous("x", 0.0, 1.0).with_obj(1.0)).unwrap();
        // Baseline already at the coarsest preset: no setting can do
        // strictly less work, so only the baseline ranks.
        m.set_int_param(Param::GridPoints, 256).unwrap();
        m.set_int_param(Param::TuneResults, 2).unwrap();
        m.tune().unwrap();
        assert_eq!(m.tune_result_count(), 1);
    }

    #[test]
    fn test_tune_trial_cap() {
        let env = quiet_env();
        let mut m = Model::new(&env, "tunecap");
        m.add_var(Variable::continuous("x", 0.0, 1.0).with_obj(1.0)).unwrap();
        // Only the first preset is evaluated on top of the baseline.
        m.set_int_param(Param::TuneTrials, 1).unwrap();
        m.set_int_param(Param::TuneResults, 4).unwrap();
        m.tune().unwrap();
        assert_eq!(m.tune_result_count(), 2);
        let outcome = m.tuning().unwrap();
        assert_eq!(outcome.get(0).unwrap().work, 4096);
        assert_eq!(outcome.get(1).unwrap().work, 2048);
    }

    #[test]
    fn test_pwl_matches_exact_at_breakpoints() {
        let f = GenConstrFunc::Exp;
        for i in 0..=4 {
            let x = i as f64 / 2.0;
            let approx = pwl_eval(f, x, 0.0, 2.0, 4);
            assert!((approx - f.eval(x)).abs() < 1e-12, "breakpoint {x}");
        }
    }

    #[test]
    fn test_pwl_chord_above_convex() {
        let approx = pwl_eval(GenConstrFunc::Exp, 0.5, 0.0, 2.0, 2);
        assert!(approx > 0.5_f64.exp());
    }
}
