//! Read a `.nl` file and dump its contents: variables, constraint
//! bodies, residuals at the stored initial point, and the constraint
//! Jacobian.
//!
//! Usage: `cargo run --example inspect_nl -- model.nl`

use anyhow::{bail, Result};
use nlmodel::model::Model;
use std::env;

fn main() -> Result<()> {
    let Some(path) = env::args().nth(1) else {
        bail!("no file provided; please provide an nl file");
    };

    let model = Model::<f64>::read_nl_file(&path)?;

    println!("{} has {} variables", path, model.num_variables());
    println!("{} has {} constraints", path, model.num_constraints());

    for v in model.variables() {
        println!("Variable {:2}: value = {}", v.index, v.value);
    }
    for c in model.constraints() {
        println!("Constraint {:2}: body = {}", c.index, c.body);
    }
    for c in model.constraints() {
        println!(
            "Constraint {:2}: residual = {}",
            c.index,
            model.constraint_residual(c.index)
        );
    }
    if let Some(value) = model.objective_value() {
        println!("Objective value = {}", value);
    }

    println!("\nConstraint Jacobian:");
    println!("{}", model.jacobian()?);

    if let Some(grad) = model.objective_gradient()? {
        println!("\nObjective gradient:");
        println!("{}", grad);
    }

    Ok(())
}
