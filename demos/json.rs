//! Round-trip the default fixture model through JSON.
//!
//! Usage: `cargo run --example json`

use nlmodel::fixtures::default_model;
use nlmodel::model::Model;
use std::fs::File;

fn main() {
    let model = default_model();

    let path = std::env::temp_dir().join("nlmodel_demo.json");
    let mut file = File::create(&path).unwrap();
    model.write_json(&mut file).unwrap();
    println!("wrote {}", path.display());

    let mut file = File::open(&path).unwrap();
    let model2 = Model::<f64>::read_json(&mut file).unwrap();
    assert_eq!(model, model2);
    println!(
        "read back {} variables / {} constraints, objective = {:?}",
        model2.num_variables(),
        model2.num_constraints(),
        model2.objective_value()
    );
}
