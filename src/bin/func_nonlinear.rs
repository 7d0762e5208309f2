//! Nonlinear function-constraint demo.
//!
//! Considers the nonconvex nonlinear problem
//!
//! ```text
//! minimize   sin(x) + cos(2*x) + 1
//! subject to 0.25*exp(x) - x <= 0
//!            -1 <= x <= 4
//! ```
//!
//! and solves it twice as a nonlinear model: first with the global
//! `FuncNonlinear` parameter set to 1 so every function constraint is
//! handled as a true nonlinear function, then with the parameter back at
//! its default and the `FuncNonlinear` attribute set to 1 on each
//! function constraint individually.

use funcopt::{
    Cmp, Env, GenConstr, GenConstrAttr, LinExpr, Model, Param, Result, Sense, VarId, Variable,
    INFINITY,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn setup_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set tracing subscriber");
}

fn print_solution(model: &Model, x: VarId) -> Result<()> {
    println!("x = {}", model.var_value(x)?);
    println!("Obj = {}", model.objective_value()?);
    Ok(())
}

fn run() -> Result<()> {
    let env = Env::new();
    let mut m = Model::new(&env, "func_nonlinear");

    // Variables; the auxiliaries carry the nonlinear terms.
    let x = m.add_var(Variable::continuous("x", -1.0, 4.0))?;
    let twox = m.add_var(Variable::continuous("twox", -2.0, 8.0))?;
    let sinx = m.add_var(Variable::continuous("sinx", -1.0, 1.0))?;
    let cos2x = m.add_var(Variable::continuous("cos2x", -1.0, 1.0))?;
    let expx = m.add_var(Variable::continuous("expx", 0.0, INFINITY))?;

    m.set_objective(LinExpr::from(sinx) + cos2x + 1.0, Sense::Minimize)?;

    m.add_constr("l1", LinExpr::term(0.25, expx) - x, Cmp::LessEqual, 0.0)?;
    m.add_constr("l2", LinExpr::term(2.0, x) - twox, Cmp::Equal, 0.0)?;

    // sinx = sin(x), cos2x = cos(twox), expx = exp(x)
    let gcf1 = m.add_genconstr(GenConstr::sin(x, sinx, "gcf1"))?;
    let gcf2 = m.add_genconstr(GenConstr::cos(twox, cos2x, "gcf2"))?;
    let gcf3 = m.add_genconstr(GenConstr::exp(x, expx, "gcf3"))?;

    // Approach 1: global FuncNonlinear parameter.
    m.set_int_param(Param::FuncNonlinear, 1)?;
    m.optimize()?;
    print_solution(&m, x)?;

    // Restore the unsolved state and the parameter default.
    m.reset();
    m.set_int_param(Param::FuncNonlinear, 0)?;

    // Approach 2: FuncNonlinear attribute on every function constraint.
    m.set_genconstr_attr(gcf1, GenConstrAttr::FuncNonlinear, 1)?;
    m.set_genconstr_attr(gcf2, GenConstrAttr::FuncNonlinear, 1)?;
    m.set_genconstr_attr(gcf3, GenConstrAttr::FuncNonlinear, 1)?;
    m.optimize()?;
    print_solution(&m, x)?;

    Ok(())
}

fn main() {
    setup_logging();
    if let Err(e) = run() {
        println!("Error code = {}", e.code());
        println!("{e}");
    }
}
