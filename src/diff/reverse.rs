use crate::algebra::{CsrMatrix, FloatT};
use crate::diff::partials::{binary_partials, nary_partials, unary_partial};
use crate::diff::{derivative_support, DerivativeError};
use crate::model::expr::{Expr, ExpressionOps};

use itertools::izip;

/// Reverse-mode derivative of `expr` at `point`, as a 1 × `nvar` CSR
/// row over the expression's variables.
///
/// The adjoint is seeded to one at the root and propagated down to the
/// leaves; variable leaves accumulate their adjoint into the result.
///
/// # Panics
/// Panics if the expression references a variable index at or beyond
/// `nvar`, or if `point` does not cover `nvar` entries.
pub fn reverse_diff_expression<T>(
    expr: &Expr<T>,
    nvar: usize,
    point: &[T],
) -> Result<CsrMatrix<T>, DerivativeError>
where
    T: FloatT,
{
    let wrt = derivative_support(expr, nvar);

    let mut values = vec![T::zero(); wrt.len()];
    propagate(expr, T::one(), point, &wrt, &mut values)?;

    Ok(CsrMatrix::single_row(nvar, wrt, values))
}

// `values[k]` accumulates the derivative with respect to `wrt[k]`;
// subexpressions are not shared, so each leaf visit adds its own
// adjoint contribution exactly once per occurrence.
fn propagate<T>(
    expr: &Expr<T>,
    adjoint: T,
    point: &[T],
    wrt: &[usize],
    values: &mut [T],
) -> Result<(), DerivativeError>
where
    T: FloatT,
{
    match expr {
        Expr::Constant(_) => Ok(()),
        Expr::Variable(v) => {
            if let Some(k) = wrt.iter().position(|&j| j == v.index) {
                values[k] += adjoint;
            }
            Ok(())
        }
        Expr::Unary(u) => {
            let d = unary_partial(u.op, u.arg.eval(point))?;
            propagate(&u.arg, d * adjoint, point, wrt, values)
        }
        Expr::Binary(b) => {
            let (d0, d1) = binary_partials(b.op, b.lhs.eval(point), b.rhs.eval(point))?;
            propagate(&b.lhs, d0 * adjoint, point, wrt, values)?;
            propagate(&b.rhs, d1 * adjoint, point, wrt, values)
        }
        Expr::Nary(n) => {
            let args: Vec<T> = n.args.iter().map(|a| a.eval(point)).collect();
            let ds = nary_partials(n.op, &args);
            for (arg, d) in izip!(&n.args, ds) {
                propagate(arg, d * adjoint, point, wrt, values)?;
            }
            Ok(())
        }
    }
}
