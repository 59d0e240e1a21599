use crate::algebra::{AsFloatT, FloatT};
use crate::diff::DerivativeError;
use crate::model::expr::{BinaryOp, NaryOp, UnaryOp};

// Local (per-operator) derivatives with respect to each argument,
// evaluated at already-computed argument values.   Identical for the
// forward and reverse sweeps; only the propagation differs.

pub(crate) fn unary_partial<T>(op: UnaryOp, arg: T) -> Result<T, DerivativeError>
where
    T: FloatT,
{
    match op {
        UnaryOp::Neg => Ok(-T::one()),
        UnaryOp::Sqrt => {
            if arg < T::zero() {
                return Err(DerivativeError::NegativeSqrt);
            }
            let two: T = (2.0f64).as_T();
            Ok((two * arg.sqrt()).recip())
        }
        UnaryOp::Exp => Ok(arg.exp()),
        UnaryOp::Log => {
            if arg <= T::zero() {
                return Err(DerivativeError::NonpositiveLog);
            }
            Ok(arg.recip())
        }
        UnaryOp::Sin => Ok(arg.cos()),
        UnaryOp::Cos => Ok(-arg.sin()),
        UnaryOp::Tan => Ok(arg.cos().powi(2).recip()),
    }
}

pub(crate) fn binary_partials<T>(op: BinaryOp, lhs: T, rhs: T) -> Result<(T, T), DerivativeError>
where
    T: FloatT,
{
    match op {
        BinaryOp::Sub => Ok((T::one(), -T::one())),
        BinaryOp::Div => {
            if rhs == T::zero() {
                return Err(DerivativeError::DivisionByZero);
            }
            Ok((rhs.recip(), -lhs / (rhs * rhs)))
        }
        BinaryOp::Pow => {
            let d_base = rhs * lhs.powf(rhs - T::one());
            // the exponent partial is undefined for a nonpositive base;
            // it only matters when the exponent itself carries variables
            let d_exp = if lhs > T::zero() {
                lhs.powf(rhs) * lhs.ln()
            } else {
                T::zero()
            };
            Ok((d_base, d_exp))
        }
    }
}

pub(crate) fn nary_partials<T>(op: NaryOp, args: &[T]) -> Vec<T>
where
    T: FloatT,
{
    match op {
        NaryOp::Sum => vec![T::one(); args.len()],
        NaryOp::Product => {
            // partial with respect to argument j is the product of all
            // other arguments
            (0..args.len())
                .map(|j| {
                    args.iter()
                        .enumerate()
                        .filter(|&(jj, _)| jj != j)
                        .map(|(_, &v)| v)
                        .product()
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unary_partials() {
        assert_eq!(unary_partial(UnaryOp::Neg, 3.0), Ok(-1.0));
        assert_eq!(unary_partial(UnaryOp::Sqrt, 4.0), Ok(0.25));
        assert_eq!(unary_partial(UnaryOp::Log, 2.0), Ok(0.5));
        assert_eq!(
            unary_partial(UnaryOp::Sqrt, -1.0),
            Err(DerivativeError::NegativeSqrt)
        );
        assert_eq!(
            unary_partial(UnaryOp::Log, 0.0),
            Err(DerivativeError::NonpositiveLog)
        );
    }

    #[test]
    fn test_binary_partials() {
        assert_eq!(binary_partials(BinaryOp::Sub, 5.0, 3.0), Ok((1.0, -1.0)));
        assert_eq!(binary_partials(BinaryOp::Div, 6.0, 2.0), Ok((0.5, -1.5)));
        assert_eq!(
            binary_partials(BinaryOp::Div, 1.0, 0.0),
            Err(DerivativeError::DivisionByZero)
        );

        // d/db b^e = e*b^(e-1),  d/de b^e = b^e ln b
        let (db, de) = binary_partials(BinaryOp::Pow, 2.0, 3.0).unwrap();
        assert_eq!(db, 12.0);
        assert!((de - 8.0 * (2.0f64).ln()).abs() < 1e-14);

        // exponent partial suppressed at base zero
        let (_, de) = binary_partials(BinaryOp::Pow, 0.0, 2.0).unwrap();
        assert_eq!(de, 0.0);
    }

    #[test]
    fn test_nary_partials() {
        assert_eq!(nary_partials(NaryOp::Sum, &[1.0, 2.0, 3.0]), vec![1.0; 3]);
        assert_eq!(
            nary_partials(NaryOp::Product, &[2.0, 3.0, 4.0]),
            vec![12.0, 8.0, 6.0]
        );
    }
}
