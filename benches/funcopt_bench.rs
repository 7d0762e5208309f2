//! Criterion benchmarks for funcopt.
//!
//! Uses the nonlinear demo model (sin/cos/exp function constraints over
//! one free variable) to measure model construction, grid solving at
//! several sampling budgets, and a full tuning pass.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use funcopt::{
    Cmp, Env, GenConstr, LinExpr, Model, Param, Sense, Variable, INFINITY,
};

fn quiet_env() -> Env {
    let mut env = Env::new();
    env.set_int_param(Param::OutputFlag, 0).unwrap();
    env
}

fn build_demo_model(env: &Env) -> Model {
    let mut m = Model::new(env, "bench");
    let x = m.add_var(Variable::continuous("x", -1.0, 4.0)).unwrap();
    let twox = m.add_var(Variable::continuous("twox", -2.0, 8.0)).unwrap();
    let sinx = m.add_var(Variable::continuous("sinx", -1.0, 1.0)).unwrap();
    let cos2x = m.add_var(Variable::continuous("cos2x", -1.0, 1.0)).unwrap();
    let expx = m.add_var(Variable::continuous("expx", 0.0, INFINITY)).unwrap();

    m.set_objective(LinExpr::from(sinx) + cos2x + 1.0, Sense::Minimize)
        .unwrap();
    m.add_constr("l1", LinExpr::term(0.25, expx) - x, Cmp::LessEqual, 0.0)
        .unwrap();
    m.add_constr("l2", LinExpr::term(2.0, x) - twox, Cmp::Equal, 0.0)
        .unwrap();
    m.add_genconstr(GenConstr::sin(x, sinx, "gcf1")).unwrap();
    m.add_genconstr(GenConstr::cos(twox, cos2x, "gcf2")).unwrap();
    m.add_genconstr(GenConstr::exp(x, expx, "gcf3")).unwrap();
    m
}

fn bench_model_build(c: &mut Criterion) {
    let env = quiet_env();
    c.bench_function("model_build", |b| {
        b.iter(|| black_box(build_demo_model(&env)))
    });
}

fn bench_grid_solve(c: &mut Criterion) {
    let env = quiet_env();
    let mut group = c.benchmark_group("grid_solve");
    for points in [256_i64, 1024, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(points), &points, |b, &points| {
            let mut m = build_demo_model(&env);
            m.set_int_param(Param::GridPoints, points).unwrap();
            m.set_int_param(Param::FuncNonlinear, 1).unwrap();
            b.iter(|| {
                m.reset();
                m.optimize().unwrap();
                black_box(m.objective_value().unwrap())
            });
        });
    }
    group.finish();
}

fn bench_tune(c: &mut Criterion) {
    let env = quiet_env();
    c.bench_function("tune", |b| {
        let mut m = build_demo_model(&env);
        m.set_int_param(Param::TuneResults, 2).unwrap();
        b.iter(|| {
            m.reset();
            m.tune().unwrap();
            black_box(m.tune_result_count())
        });
    });
}

criterion_group!(benches, bench_model_build, bench_grid_solve, bench_tune);
criterion_main!(benches);
