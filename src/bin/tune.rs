//! Parameter tuning demo.
//!
//! Reads a model from a file and tunes it, retaining two ranked results:
//! the first solved setting and the best setting. The second entry is
//! loaded into the model, written to `tune.prm`, and the model is solved
//! using those parameters.

use clap::Parser;
use funcopt::{Env, Model, Param, Result};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Tune a model and solve it with the tuned parameters.
#[derive(Parser, Debug)]
#[command(name = "tune")]
struct Cli {
    /// Path to a JSON model file.
    model: Option<PathBuf>,
}

fn setup_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("failed to set tracing subscriber");
}

fn run(path: &PathBuf) -> Result<()> {
    let env = Env::new();
    let mut model = Model::from_file(&env, path)?;

    // Retain two results: the first solved setting at rank 0 and the
    // best setting at rank 1.
    model.set_int_param(Param::TuneResults, 2)?;
    model.tune()?;

    if model.tune_result_count() >= 2 {
        // Load the tuned parameters, persist them, and solve with them.
        model.load_tune_result(1)?;
        model.write("tune.prm")?;
        model.optimize()?;
    }
    Ok(())
}

fn main() {
    setup_logging();
    let cli = Cli::parse();
    let Some(path) = cli.model else {
        println!("Usage: tune <MODEL>");
        return;
    };
    if let Err(e) = run(&path) {
        println!("Error code = {}", e.code());
        println!("{e}");
    }
}
