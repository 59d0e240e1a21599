use nlmodel::fixtures::{default_model, unary_model};
use nlmodel::model::ObjectiveSense;

#[test]
fn test_default_model_shape() {
    let m = default_model();
    assert_eq!(m.num_variables(), 5);
    assert_eq!(m.num_constraints(), 5);
    assert!(m.objective().is_some());

    // all five variables start at 1.0
    assert_eq!(m.point(), vec![1.0; 5]);
    for (i, v) in m.variables().iter().enumerate() {
        assert_eq!(v.index, i);
    }

    // sum of squares at the all-ones point
    assert_eq!(m.objective_value(), Some(5.0));
    assert_eq!(m.objective().unwrap().sense, ObjectiveSense::Minimize);
}

#[test]
fn test_unary_model_shape() {
    let m = unary_model();
    assert_eq!(m.num_variables(), 5);
    assert_eq!(m.num_constraints(), 5);
    assert_eq!(m.point(), vec![1.0; 5]);
    assert_eq!(m.objective_value(), Some(5.0));
}

#[test]
fn test_default_model_residuals() {
    let m = default_model();

    // x1 + 2 x2 + 4 x3 == 3.5 at the all-ones point
    assert_eq!(m.constraint_residual(0), 7.0 - 3.5);
    // x4 x1 == x3
    assert_eq!(m.constraint_residual(1), 0.0);
    // (x1 + x3)/x2^2 == 1.1
    assert_eq!(m.constraint_residual(2), 2.0 - 1.1);
    // x1 x2 x3 == 5
    assert_eq!(m.constraint_residual(3), 1.0 - 5.0);
    // x5 - x4 + x3^3 == x1
    assert_eq!(m.constraint_residual(4), 0.0);
}

#[test]
fn test_unary_model_residuals() {
    let m = unary_model();
    let e = 1.0f64.exp();

    // sin(x1) + 2 x2 + 4 x3 == 3.5
    assert_eq!(m.constraint_residual(0), (1.0f64.sin() + 2.0 + 4.0) - 3.5);
    // x4 - tan(x4 x1) == x3
    assert_eq!(m.constraint_residual(1), (1.0 - 1.0f64.tan()) - 1.0);
    // (x1 + x3)/x2^2 == exp(x1)
    assert_eq!(m.constraint_residual(2), 2.0 - e);
    // x1 exp(x2 cos(x3)) == 5
    assert_eq!(m.constraint_residual(3), 1.0f64.cos().exp() - 5.0);
    // x5 - x4 + sqrt(x3^3) == log(x1)
    assert_eq!(m.constraint_residual(4), 1.0);
}

#[test]
fn test_constant_rhs_forms() {
    // constant right-hand sides stay as bounds; expression right-hand
    // sides fold into the body leaving rhs zero
    let m = default_model();
    let rhs: Vec<f64> = m.constraints().iter().map(|c| c.rhs).collect();
    assert_eq!(rhs, vec![3.5, 0.0, 1.1, 5.0, 0.0]);

    let m = unary_model();
    let rhs: Vec<f64> = m.constraints().iter().map(|c| c.rhs).collect();
    assert_eq!(rhs, vec![3.5, 0.0, 0.0, 5.0, 0.0]);
}
