//! Model container.

use super::expr::{Cmp, LinExpr, QuadExpr, Sense};
use super::genconstr::{GenConstr, GenConstrAttr, GenConstrId};
use super::variables::{VarId, Variable};
use crate::engine::error::{EngineError, Result};
use crate::engine::solution::{SolveStatus, Solution};
use crate::engine::{Engine, Env};
use crate::params::{self, Param, ParamKind, ParamSet, ParamValue};
use crate::tune::TuneOutcome;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Index of a linear constraint within its owning model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConstrId(pub(crate) usize);

impl ConstrId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A named linear constraint `expr cmp rhs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinConstr {
    pub name: String,
    pub expr: LinExpr,
    pub cmp: Cmp,
    pub rhs: f64,
}

/// Objective expression and direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    pub expr: QuadExpr,
    pub sense: Sense,
}

/// Serializable model structure, the on-disk JSON format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ModelData {
    name: String,
    #[serde(default)]
    vars: Vec<Variable>,
    #[serde(default)]
    constrs: Vec<LinConstr>,
    #[serde(default)]
    genconstrs: Vec<GenConstr>,
    #[serde(default)]
    objective: Option<Objective>,
}

/// A mutable optimization model bound to an engine.
///
/// Holds variables, constraints, the objective, parameter overrides, and
/// the current solve state. Created empty from an [`Env`] or loaded from
/// a JSON model file. Dropping the model releases it; release happens
/// exactly once on every exit path.
///
/// # Examples
///
/// ```
/// use funcopt::{Cmp, Env, LinExpr, Model, Sense, Variable};
///
/// let env = Env::new();
/// let mut m = Model::new(&env, "lp");
/// let x = m.add_var(Variable::continuous("x", 0.0, 10.0)).unwrap();
/// m.add_constr("cap", LinExpr::from(x), Cmp::LessEqual, 4.0).unwrap();
/// m.set_objective(LinExpr::from(x), Sense::Maximize).unwrap();
/// m.optimize().unwrap();
/// assert!((m.var_value(x).unwrap() - 4.0).abs() < 1e-6);
/// ```
pub struct Model {
    name: String,
    engine: Arc<dyn Engine>,
    vars: Vec<Variable>,
    constrs: Vec<LinConstr>,
    genconstrs: Vec<GenConstr>,
    objective: Option<Objective>,
    params: ParamSet,
    solution: Option<Solution>,
    tuning: Option<TuneOutcome>,
}

impl Model {
    /// Creates an empty model owned by `env`, inheriting its default
    /// parameters.
    pub fn new(env: &Env, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            engine: env.engine_handle(),
            vars: Vec::new(),
            constrs: Vec::new(),
            genconstrs: Vec::new(),
            objective: None,
            params: env.defaults().clone(),
            solution: None,
            tuning: None,
        }
    }

    /// Loads a model from a JSON model file.
    pub fn from_file(env: &Env, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| EngineError::file_io(path, e))?;
        let data: ModelData = serde_json::from_str(&text)
            .map_err(|e| EngineError::file_format(path, e.to_string()))?;

        let mut model = Model::new(env, data.name);
        for var in data.vars {
            model.add_var(var)?;
        }
        for c in data.constrs {
            model.add_constr(c.name, c.expr, c.cmp, c.rhs)?;
        }
        for gc in data.genconstrs {
            model.add_genconstr(gc)?;
        }
        if let Some(obj) = data.objective {
            model.set_objective(obj.expr, obj.sense)?;
        }
        Ok(model)
    }

    /// Writes model structure (`.json`) or the current parameter
    /// overrides (`.prm`), chosen by the file extension.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("prm") => params::write_params(path, &self.params),
            Some("json") => {
                let text = serde_json::to_string_pretty(&self.snapshot())
                    .map_err(|e| EngineError::file_format(path, e.to_string()))?;
                fs::write(path, text).map_err(|e| EngineError::file_io(path, e))
            }
            _ => Err(EngineError::InvalidArgument(format!(
                "unsupported file extension: {}",
                path.display()
            ))),
        }
    }

    fn snapshot(&self) -> ModelData {
        ModelData {
            name: self.name.clone(),
            vars: self.vars.clone(),
            constrs: self.constrs.clone(),
            genconstrs: self.genconstrs.clone(),
            objective: self.objective.clone(),
        }
    }

    /// Adds a variable, checking bound consistency and name uniqueness.
    pub fn add_var(&mut self, var: Variable) -> Result<VarId> {
        if !var.bounds_valid() {
            return Err(EngineError::InvalidArgument(format!(
                "inconsistent bounds [{}, {}] for variable {}",
                var.lb, var.ub, var.name
            )));
        }
        if self.vars.iter().any(|v| v.name == var.name) {
            return Err(EngineError::InvalidArgument(format!(
                "duplicate variable name {}",
                var.name
            )));
        }
        self.vars.push(var);
        Ok(VarId(self.vars.len() - 1))
    }

    /// Adds a linear constraint over this model's variables.
    pub fn add_constr(
        &mut self,
        name: impl Into<String>,
        expr: LinExpr,
        cmp: Cmp,
        rhs: f64,
    ) -> Result<ConstrId> {
        let name = name.into();
        if rhs.is_nan() {
            return Err(EngineError::InvalidArgument(format!(
                "NaN right-hand side in constraint {name}"
            )));
        }
        self.check_var_refs(expr.vars(), &name)?;
        if self.constrs.iter().any(|c| c.name == name) {
            return Err(EngineError::InvalidArgument(format!(
                "duplicate constraint name {name}"
            )));
        }
        self.constrs.push(LinConstr {
            name,
            expr,
            cmp,
            rhs,
        });
        Ok(ConstrId(self.constrs.len() - 1))
    }

    /// Adds a function constraint. Known keys in its options string are
    /// applied to the matching attributes.
    pub fn add_genconstr(&mut self, mut gc: GenConstr) -> Result<GenConstrId> {
        self.check_var_refs([gc.input, gc.output], &gc.name)?;
        if gc.input == gc.output {
            return Err(EngineError::InvalidArgument(format!(
                "function constraint {} uses one variable as both input and output",
                gc.name
            )));
        }
        if self.genconstrs.iter().any(|g| g.output == gc.output) {
            return Err(EngineError::InvalidArgument(format!(
                "variable {} is already the output of a function constraint",
                self.vars[gc.output.index()].name
            )));
        }
        if self.genconstrs.iter().any(|g| g.name == gc.name) {
            return Err(EngineError::InvalidArgument(format!(
                "duplicate function constraint name {}",
                gc.name
            )));
        }
        self.apply_genconstr_options(&mut gc)?;
        self.genconstrs.push(gc);
        Ok(GenConstrId(self.genconstrs.len() - 1))
    }

    fn apply_genconstr_options(&self, gc: &mut GenConstr) -> Result<()> {
        let options = gc.options.clone();
        for token in options.split_whitespace() {
            let (key, raw) = token.split_once('=').ok_or_else(|| {
                EngineError::InvalidArgument(format!(
                    "malformed option {token:?} on function constraint {}",
                    gc.name
                ))
            })?;
            let value: i64 = raw.parse().map_err(|_| {
                EngineError::InvalidArgument(format!(
                    "non-integer option value {raw:?} on function constraint {}",
                    gc.name
                ))
            })?;
            match key {
                "FuncNonlinear" => {
                    check_attr_value(GenConstrAttr::FuncNonlinear, value)?;
                    gc.func_nonlinear = value;
                }
                "FuncPieces" => {
                    check_attr_value(GenConstrAttr::FuncPieces, value)?;
                    gc.func_pieces = value;
                }
                _ => {
                    return Err(EngineError::InvalidArgument(format!(
                        "unknown option {key:?} on function constraint {}",
                        gc.name
                    )))
                }
            }
        }
        Ok(())
    }

    /// Sets the objective, replacing variable objective coefficients.
    pub fn set_objective(&mut self, expr: impl Into<QuadExpr>, sense: Sense) -> Result<()> {
        let expr = expr.into();
        self.check_var_refs(expr.vars(), "objective")?;
        self.objective = Some(Objective { expr, sense });
        Ok(())
    }

    fn check_var_refs(
        &self,
        vars: impl IntoIterator<Item = VarId>,
        context: &str,
    ) -> Result<()> {
        for v in vars {
            if v.index() >= self.vars.len() {
                return Err(EngineError::InvalidArgument(format!(
                    "unknown variable id {} referenced by {context}",
                    v.index()
                )));
            }
        }
        Ok(())
    }

    /// Sets an integer model parameter.
    pub fn set_int_param(&mut self, param: Param, value: i64) -> Result<()> {
        self.params.set(param, ParamValue::Int(value))
    }

    /// Sets a float model parameter.
    pub fn set_float_param(&mut self, param: Param, value: f64) -> Result<()> {
        self.params.set(param, ParamValue::Float(value))
    }

    /// Current value of an integer parameter.
    pub fn get_int_param(&self, param: Param) -> Result<i64> {
        match param.kind() {
            ParamKind::Int => Ok(self.params.int(param)),
            ParamKind::Float => Err(EngineError::InvalidArgument(format!(
                "parameter {} is not an integer parameter",
                param.name()
            ))),
        }
    }

    /// Current value of a float parameter.
    pub fn get_float_param(&self, param: Param) -> Result<f64> {
        match param.kind() {
            ParamKind::Float => Ok(self.params.float(param)),
            ParamKind::Int => Err(EngineError::InvalidArgument(format!(
                "parameter {} is not a float parameter",
                param.name()
            ))),
        }
    }

    /// Sets a per-constraint integer attribute.
    pub fn set_genconstr_attr(
        &mut self,
        id: GenConstrId,
        attr: GenConstrAttr,
        value: i64,
    ) -> Result<()> {
        check_attr_value(attr, value)?;
        let gc = self.genconstr_mut(id)?;
        match attr {
            GenConstrAttr::FuncNonlinear => gc.func_nonlinear = value,
            GenConstrAttr::FuncPieces => gc.func_pieces = value,
        }
        Ok(())
    }

    /// Reads a per-constraint integer attribute.
    pub fn get_genconstr_attr(&self, id: GenConstrId, attr: GenConstrAttr) -> Result<i64> {
        let gc = self
            .genconstrs
            .get(id.index())
            .ok_or_else(|| unknown_genconstr(id))?;
        Ok(match attr {
            GenConstrAttr::FuncNonlinear => gc.func_nonlinear,
            GenConstrAttr::FuncPieces => gc.func_pieces,
        })
    }

    fn genconstr_mut(&mut self, id: GenConstrId) -> Result<&mut GenConstr> {
        self.genconstrs
            .get_mut(id.index())
            .ok_or_else(|| unknown_genconstr(id))
    }

    /// Solves the model with the installed engine, storing the solution.
    pub fn optimize(&mut self) -> Result<()> {
        let engine = Arc::clone(&self.engine);
        let solution = engine.solve(self)?;
        self.solution = Some(solution);
        Ok(())
    }

    /// Discards solve state and tuning results, preserving structure and
    /// parameters.
    pub fn reset(&mut self) {
        self.solution = None;
        self.tuning = None;
    }

    /// Status of the last solve, if any.
    pub fn status(&self) -> Option<SolveStatus> {
        self.solution.as_ref().map(|s| s.status)
    }

    /// Value of a variable in the current solution.
    pub fn var_value(&self, id: VarId) -> Result<f64> {
        if id.index() >= self.vars.len() {
            return Err(EngineError::InvalidArgument(format!(
                "unknown variable id {}",
                id.index()
            )));
        }
        let solution = self.found_solution()?;
        Ok(solution.values[id.index()])
    }

    /// Objective value of the current solution.
    pub fn objective_value(&self) -> Result<f64> {
        let solution = self.found_solution()?;
        solution
            .objective
            .ok_or_else(|| EngineError::DataNotAvailable("no objective value".into()))
    }

    fn found_solution(&self) -> Result<&Solution> {
        match &self.solution {
            Some(s) if s.is_solution_found() => Ok(s),
            Some(_) => Err(EngineError::DataNotAvailable(
                "no solution available for the last solve".into(),
            )),
            None => Err(EngineError::DataNotAvailable(
                "model has not been solved".into(),
            )),
        }
    }

    /// Runs the engine's parameter tuning and retains the ranked outcome.
    pub fn tune(&mut self) -> Result<()> {
        let engine = Arc::clone(&self.engine);
        let outcome = engine.tune(self)?;
        self.tuning = Some(outcome);
        Ok(())
    }

    /// Number of tuning results retained by the last [`Model::tune`].
    pub fn tune_result_count(&self) -> usize {
        self.tuning.as_ref().map_or(0, |t| t.len())
    }

    /// Loads the parameter set of the tuning result at `rank` into this
    /// model's active parameters.
    pub fn load_tune_result(&mut self, rank: usize) -> Result<()> {
        let outcome = self.tuning.as_ref().ok_or_else(|| {
            EngineError::DataNotAvailable("tuning has not been run".into())
        })?;
        let result = outcome.get(rank).ok_or(EngineError::NoTuneResult(rank))?;
        self.params = result.params.clone();
        Ok(())
    }

    /// The last tuning outcome, if any.
    pub fn tuning(&self) -> Option<&TuneOutcome> {
        self.tuning.as_ref()
    }

    /// Re-checks structural consistency: bounds, unique names, variable
    /// references. Engines call this before solving.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for var in &self.vars {
            if !var.bounds_valid() {
                return Err(EngineError::InvalidArgument(format!(
                    "inconsistent bounds for variable {}",
                    var.name
                )));
            }
            if !names.insert(var.name.as_str()) {
                return Err(EngineError::InvalidArgument(format!(
                    "duplicate variable name {}",
                    var.name
                )));
            }
        }
        for c in &self.constrs {
            self.check_var_refs(c.expr.vars(), &c.name)?;
        }
        let mut outputs = HashSet::new();
        for gc in &self.genconstrs {
            self.check_var_refs([gc.input, gc.output], &gc.name)?;
            if !outputs.insert(gc.output) {
                return Err(EngineError::InvalidArgument(format!(
                    "variable {} is the output of two function constraints",
                    self.vars[gc.output.index()].name
                )));
            }
        }
        if let Some(obj) = &self.objective {
            self.check_var_refs(obj.expr.vars(), "objective")?;
        }
        Ok(())
    }

    /// Objective value at an assignment: the explicit objective when one
    /// is set, the variables' objective coefficients otherwise.
    pub fn effective_objective(&self, values: &[f64]) -> f64 {
        match &self.objective {
            Some(obj) => obj.expr.eval(values),
            None => self
                .vars
                .iter()
                .zip(values)
                .map(|(v, x)| v.obj * x)
                .sum(),
        }
    }

    /// Optimization direction, `Minimize` when no objective is set.
    pub fn objective_sense(&self) -> Sense {
        self.objective.as_ref().map_or(Sense::Minimize, |o| o.sense)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    pub fn vars(&self) -> &[Variable] {
        &self.vars
    }

    pub fn constrs(&self) -> &[LinConstr] {
        &self.constrs
    }

    pub fn genconstrs(&self) -> &[GenConstr] {
        &self.genconstrs
    }

    pub fn objective(&self) -> Option<&Objective> {
        self.objective.as_ref()
    }

    pub fn params(&self) -> &ParamSet {
        &self.params
    }

    /// Solution of the last solve, if stored.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("name", &self.name)
            .field("engine", &"<dyn Engine>")
            .field("vars", &self.vars)
            .field("constrs", &self.constrs)
            .field("genconstrs", &self.genconstrs)
            .field("objective", &self.objective)
            .field("params", &self.params)
            .field("solution", &self.solution)
            .field("tuning", &self.tuning)
            .finish()
    }
}

fn check_attr_value(attr: GenConstrAttr, value: i64) -> Result<()> {
    let ok = match attr {
        GenConstrAttr::FuncNonlinear => value == 0 || value == 1,
        GenConstrAttr::FuncPieces => value == 0 || value >= 2,
    };
    if ok {
        Ok(())
    } else {
        Err(EngineError::InvalidArgument(format!(
            "value {value} out of range for attribute {attr:?}"
        )))
    }
}

fn unknown_genconstr(id: GenConstrId) -> EngineError {
    EngineError::InvalidArgument(format!("unknown function constraint id {}", id.index()))
}
