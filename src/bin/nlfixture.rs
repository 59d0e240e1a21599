//! Fixture generator: writes one of the hard-coded test models to
//! `model.nl` in the current working directory.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use nlmodel::fixtures::{default_model, unary_model};
use tracing::info;

const OUTPUT_FILE: &str = "model.nl";

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum ModelChoice {
    /// polynomial and rational constraints only
    #[default]
    Default,
    /// constraints exercising the unary functions
    Unary,
}

/// Write nonlinear test models in .nl format
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Which model to write
    #[arg(long, value_enum, default_value_t = ModelChoice::Default)]
    model: ModelChoice,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let model = match cli.model {
        ModelChoice::Default => default_model(),
        ModelChoice::Unary => unary_model(),
    };
    model.write_nl_file(OUTPUT_FILE)?;

    info!(
        "wrote {} ({:?} variant, {} variables, {} constraints)",
        OUTPUT_FILE,
        cli.model,
        model.num_variables(),
        model.num_constraints()
    );
    Ok(())
}
