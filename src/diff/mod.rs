//! Sparse first derivatives of expressions by forward- and reverse-mode
//! automatic differentiation.
//!
//! Both modes return a 1 × nvar [`CsrMatrix`](crate::algebra::CsrMatrix)
//! row whose nonzeros are the distinct variables of the expression in
//! first-encounter order.   [`Model::jacobian`](crate::model::Model::jacobian)
//! stacks reverse-mode rows into the full constraint Jacobian.

mod forward;
mod partials;
mod reverse;

pub use forward::*;
pub use reverse::*;

use crate::algebra::{CsrMatrix, FloatT};
use crate::model::expr::ExpressionOps;
use crate::model::Model;
use thiserror::Error;

/// Error type returned by differentiation when a local derivative is
/// undefined at the evaluation point.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DerivativeError {
    #[error("Derivative of division with a denominator of zero")]
    DivisionByZero,
    #[error("Derivative of square root of a negative value")]
    NegativeSqrt,
    #[error("Derivative of log of a nonpositive value")]
    NonpositiveLog,
}

impl<T> Model<T>
where
    T: FloatT,
{
    /// Jacobian of the constraint bodies at the current variable values,
    /// one row per constraint, assembled from reverse-mode rows.
    pub fn jacobian(&self) -> Result<CsrMatrix<T>, DerivativeError> {
        let point = self.point();
        let nvar = self.num_variables();

        let mut rowptr = vec![0usize];
        let mut colval = Vec::new();
        let mut nzval = Vec::new();
        for con in self.constraints() {
            let row = reverse_diff_expression(&con.body, nvar, &point)?;
            colval.extend(row.colval);
            nzval.extend(row.nzval);
            rowptr.push(colval.len());
        }
        Ok(CsrMatrix::new(
            self.num_constraints(),
            nvar,
            rowptr,
            colval,
            nzval,
        ))
    }

    /// Gradient of the objective at the current variable values as a
    /// single sparse row, or `None` if no objective has been set.
    pub fn objective_gradient(&self) -> Result<Option<CsrMatrix<T>>, DerivativeError> {
        match self.objective() {
            None => Ok(None),
            Some(obj) => {
                let row =
                    reverse_diff_expression(&obj.expr, self.num_variables(), &self.point())?;
                Ok(Some(row))
            }
        }
    }
}

// shared by both modes: the distinct variables of an expression, which
// fix the sparsity of the derivative row
fn derivative_support<T, E>(expr: &E, nvar: usize) -> Vec<usize>
where
    T: FloatT,
    E: ExpressionOps<T>,
{
    let mut order: Vec<usize> = Vec::new();
    expr.visit_variables(&mut |i| {
        assert!(i < nvar, "variable index {} out of bounds", i);
        if !order.contains(&i) {
            order.push(i);
        }
    });
    order
}
