use nlmodel::fixtures::{default_model, unary_model};
use nlmodel::model::Model;
use nlmodel::nl::NlWriterSettings;
use std::fs;

fn write_to_string(m: &Model<f64>) -> String {
    let mut buf = Vec::new();
    m.write_nl(&mut buf, &NlWriterSettings::default()).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_default_model_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.nl");

    default_model().write_nl_file(&path).unwrap();
    assert!(path.exists());

    let model = Model::<f64>::read_nl_file(&path).unwrap();
    assert_eq!(model.num_variables(), 5);
    assert_eq!(model.num_constraints(), 5);
    assert!(model.objective().is_some());

    // all variables come back initialized to 1.0, so the sum-of-squares
    // objective evaluates to 5
    assert_eq!(model.point(), vec![1.0; 5]);
    assert_eq!(model.objective_value(), Some(5.0));
}

#[test]
fn test_unary_model_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.nl");

    let original = unary_model();
    original.write_nl_file(&path).unwrap();
    let reread = Model::<f64>::read_nl_file(&path).unwrap();

    assert_eq!(reread.num_variables(), 5);
    assert_eq!(reread.num_constraints(), 5);

    // constraint residuals and the objective survive the trip exactly:
    // n-ary lowering preserves evaluation order
    for i in 0..original.num_constraints() {
        assert_eq!(
            original.constraint_residual(i),
            reread.constraint_residual(i)
        );
    }
    assert_eq!(original.objective_value(), reread.objective_value());
}

#[test]
fn test_unary_operator_tokens() {
    let text = write_to_string(&unary_model());
    let lines: Vec<&str> = text.lines().collect();

    // sin, tan, exp, cos, sqrt, log each serialize at least once
    for opline in ["o41", "o38", "o44", "o46", "o39", "o43"] {
        assert!(
            lines.iter().any(|&l| l == opline),
            "missing operator line {}",
            opline
        );
    }
}

#[test]
fn test_deterministic_output() {
    // identical models produce byte-identical files
    assert_eq!(
        write_to_string(&default_model()),
        write_to_string(&default_model())
    );
    assert_eq!(
        write_to_string(&unary_model()),
        write_to_string(&unary_model())
    );
}

#[test]
fn test_output_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.nl");

    // the unary file is longer; writing the default model over it must
    // truncate, not append
    unary_model().write_nl_file(&path).unwrap();
    default_model().write_nl_file(&path).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes, write_to_string(&default_model()).into_bytes());
}

#[test]
fn test_write_read_write_fixpoint() {
    // a reread model serializes to the same bytes
    for model in [default_model(), unary_model()] {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.nl");

        model.write_nl_file(&path).unwrap();
        let reread = Model::<f64>::read_nl_file(&path).unwrap();
        assert_eq!(write_to_string(&model), write_to_string(&reread));
    }
}

#[test]
fn test_header_counts() {
    let text = write_to_string(&default_model());
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "g3 1 1 0");
    // variables, constraints, objectives, ranges, equalities
    assert_eq!(lines[1], " 5 5 1 0 5");
    // every variable is nonlinear in constraints, objective, and both
    assert_eq!(lines[4], " 5 5 5");
}
