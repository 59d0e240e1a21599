use crate::algebra::{CsrMatrix, FloatT};
use crate::diff::partials::{binary_partials, nary_partials, unary_partial};
use crate::diff::{derivative_support, DerivativeError};
use crate::model::expr::{Expr, ExpressionOps};

use itertools::izip;

/// Forward-mode derivative of `expr` at `point`, as a 1 × `nvar` CSR
/// row over the expression's variables.
///
/// # Panics
/// Panics if the expression references a variable index at or beyond
/// `nvar`, or if `point` does not cover `nvar` entries.
pub fn forward_diff_expression<T>(
    expr: &Expr<T>,
    nvar: usize,
    point: &[T],
) -> Result<CsrMatrix<T>, DerivativeError>
where
    T: FloatT,
{
    let wrt = derivative_support(expr, nvar);

    let mut dense = vec![T::zero(); nvar];
    forward(expr, point, &mut dense)?;

    let nzval = wrt.iter().map(|&j| dense[j]).collect();
    Ok(CsrMatrix::single_row(nvar, wrt, nzval))
}

// Accumulate the dense derivative of `expr` into `values`.   Each
// operator scales the (recursively computed) derivatives of its
// arguments by its local partials and sums the results.
fn forward<T>(expr: &Expr<T>, point: &[T], values: &mut [T]) -> Result<(), DerivativeError>
where
    T: FloatT,
{
    match expr {
        Expr::Constant(_) => Ok(()),
        Expr::Variable(v) => {
            values[v.index] = T::one();
            Ok(())
        }
        Expr::Unary(u) => {
            let d = unary_partial(u.op, u.arg.eval(point))?;
            accumulate_scaled(&u.arg, d, point, values)
        }
        Expr::Binary(b) => {
            let (d0, d1) = binary_partials(b.op, b.lhs.eval(point), b.rhs.eval(point))?;
            accumulate_scaled(&b.lhs, d0, point, values)?;
            accumulate_scaled(&b.rhs, d1, point, values)
        }
        Expr::Nary(n) => {
            let args: Vec<T> = n.args.iter().map(|a| a.eval(point)).collect();
            let ds = nary_partials(n.op, &args);
            for (arg, d) in izip!(&n.args, ds) {
                accumulate_scaled(arg, d, point, values)?;
            }
            Ok(())
        }
    }
}

// values += d * d(arg)/d(x), using fresh intermediate storage per
// argument as in the textbook formulation
fn accumulate_scaled<T>(
    arg: &Expr<T>,
    d: T,
    point: &[T],
    values: &mut [T],
) -> Result<(), DerivativeError>
where
    T: FloatT,
{
    let mut arg_values = vec![T::zero(); values.len()];
    forward(arg, point, &mut arg_values)?;
    for (v, a) in izip!(values.iter_mut(), &arg_values) {
        *v += d * *a;
    }
    Ok(())
}
