//! Hard-coded models used to exercise `.nl` writing for downstream
//! solver tests.
//!
//! Both fixtures declare five variables initialized to 1.0, five
//! equality constraints and a minimized sum-of-squares objective.   The
//! [`default_model`] constraints stay within polynomial and rational
//! arithmetic; [`unary_model`] additionally runs every supported unary
//! function through the writer.

use crate::model::expr::{Expr, Var};
use crate::model::Model;

/// The default fixture: polynomial and rational constraints only.
pub fn default_model() -> Model<f64> {
    let mut m = Model::new();
    let [x1, x2, x3, x4, x5] = m.add_variables(1.0);

    m.equality(x1 + 2.0 * x2 + 4.0 * x3, 3.5);
    m.equality(x4 * x1, x3);
    m.equality((x1 + x3) / x2.powi(2), 1.1);
    m.equality(x1 * x2 * x3, 5.0);
    m.equality(x5 - x4 + x3.powi(3), x1);

    m.minimize(sum_of_squares([x1, x2, x3, x4, x5]));
    m
}

/// The unary-function fixture: the same variables and objective, with
/// constraints invoking sin, tan, exp, cos, sqrt and log.
pub fn unary_model() -> Model<f64> {
    let mut m = Model::new();
    let [x1, x2, x3, x4, x5] = m.add_variables(1.0);

    m.equality(x1.sin() + 2.0 * x2 + 4.0 * x3, 3.5);
    m.equality(x4 - (x4 * x1).tan(), x3);
    m.equality((x1 + x3) / x2.powi(2), x1.exp());
    m.equality(x1 * (x2 * x3.cos()).exp(), 5.0);
    m.equality(x5 - x4 + x3.powi(3).sqrt(), x1.ln());

    m.minimize(sum_of_squares([x1, x2, x3, x4, x5]));
    m
}

fn sum_of_squares<const N: usize>(vars: [Var<f64>; N]) -> Expr<f64> {
    vars.into_iter().map(|x| x.powi(2)).sum()
}
