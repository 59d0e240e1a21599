//! Operator overloading for expression construction.
//!
//! All four arithmetic operators are defined over any mix of [`Expr`],
//! [`Var`] and (for `f32`/`f64` expressions) bare scalar literals.
//! Addition and multiplication flatten into the n-ary sum and product
//! nodes; subtraction and division build binary nodes; unary minus
//! builds a [`UnaryOp::Neg`] node.

use super::*;
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Neg, Sub};

impl<T> Expr<T>
where
    T: FloatT,
{
    // append to an existing n-ary node of the same operator rather than
    // nesting, so `a + b + c` stays a single sum
    fn flat_join(self, op: NaryOp, rhs: Expr<T>) -> Expr<T> {
        match self {
            Expr::Nary(NaryExpr { op: o, mut args }) if o == op => {
                args.push(rhs);
                Expr::nary(op, args)
            }
            lhs => Expr::nary(op, vec![lhs, rhs]),
        }
    }
}

// -------------------------------------
// expression (op) anything convertible
// -------------------------------------

impl<T, R> Add<R> for Expr<T>
where
    T: FloatT,
    R: Into<Expr<T>>,
{
    type Output = Expr<T>;
    fn add(self, rhs: R) -> Expr<T> {
        self.flat_join(NaryOp::Sum, rhs.into())
    }
}

impl<T, R> Mul<R> for Expr<T>
where
    T: FloatT,
    R: Into<Expr<T>>,
{
    type Output = Expr<T>;
    fn mul(self, rhs: R) -> Expr<T> {
        self.flat_join(NaryOp::Product, rhs.into())
    }
}

impl<T, R> Sub<R> for Expr<T>
where
    T: FloatT,
    R: Into<Expr<T>>,
{
    type Output = Expr<T>;
    fn sub(self, rhs: R) -> Expr<T> {
        Expr::binary(BinaryOp::Sub, self, rhs.into())
    }
}

impl<T, R> Div<R> for Expr<T>
where
    T: FloatT,
    R: Into<Expr<T>>,
{
    type Output = Expr<T>;
    fn div(self, rhs: R) -> Expr<T> {
        Expr::binary(BinaryOp::Div, self, rhs.into())
    }
}

impl<T> Neg for Expr<T>
where
    T: FloatT,
{
    type Output = Expr<T>;
    fn neg(self) -> Expr<T> {
        Expr::unary(UnaryOp::Neg, self)
    }
}

// -------------------------------------
// variable handle (op) anything convertible
// -------------------------------------

impl<T, R> Add<R> for Var<T>
where
    T: FloatT,
    R: Into<Expr<T>>,
{
    type Output = Expr<T>;
    fn add(self, rhs: R) -> Expr<T> {
        Expr::from(self) + rhs
    }
}

impl<T, R> Mul<R> for Var<T>
where
    T: FloatT,
    R: Into<Expr<T>>,
{
    type Output = Expr<T>;
    fn mul(self, rhs: R) -> Expr<T> {
        Expr::from(self) * rhs
    }
}

impl<T, R> Sub<R> for Var<T>
where
    T: FloatT,
    R: Into<Expr<T>>,
{
    type Output = Expr<T>;
    fn sub(self, rhs: R) -> Expr<T> {
        Expr::from(self) - rhs
    }
}

impl<T, R> Div<R> for Var<T>
where
    T: FloatT,
    R: Into<Expr<T>>,
{
    type Output = Expr<T>;
    fn div(self, rhs: R) -> Expr<T> {
        Expr::from(self) / rhs
    }
}

impl<T> Neg for Var<T>
where
    T: FloatT,
{
    type Output = Expr<T>;
    fn neg(self) -> Expr<T> {
        -Expr::from(self)
    }
}

// -------------------------------------
// scalar literal on the left
// -------------------------------------

// Coherence prevents a generic `impl Mul<Expr<T>> for T`, so the
// scalar-on-the-left forms are provided per float type, in the same
// spirit as the `AsFloatT` conversions.
macro_rules! impl_scalar_lhs_ops {
    ($ty:ty) => {
        impl Add<Expr<$ty>> for $ty {
            type Output = Expr<$ty>;
            fn add(self, rhs: Expr<$ty>) -> Expr<$ty> {
                Expr::constant(self) + rhs
            }
        }
        impl Add<Var<$ty>> for $ty {
            type Output = Expr<$ty>;
            fn add(self, rhs: Var<$ty>) -> Expr<$ty> {
                Expr::constant(self) + rhs
            }
        }
        impl Sub<Expr<$ty>> for $ty {
            type Output = Expr<$ty>;
            fn sub(self, rhs: Expr<$ty>) -> Expr<$ty> {
                Expr::constant(self) - rhs
            }
        }
        impl Sub<Var<$ty>> for $ty {
            type Output = Expr<$ty>;
            fn sub(self, rhs: Var<$ty>) -> Expr<$ty> {
                Expr::constant(self) - rhs
            }
        }
        impl Mul<Expr<$ty>> for $ty {
            type Output = Expr<$ty>;
            fn mul(self, rhs: Expr<$ty>) -> Expr<$ty> {
                Expr::constant(self) * rhs
            }
        }
        impl Mul<Var<$ty>> for $ty {
            type Output = Expr<$ty>;
            fn mul(self, rhs: Var<$ty>) -> Expr<$ty> {
                Expr::constant(self) * rhs
            }
        }
        impl Div<Expr<$ty>> for $ty {
            type Output = Expr<$ty>;
            fn div(self, rhs: Expr<$ty>) -> Expr<$ty> {
                Expr::constant(self) / rhs
            }
        }
        impl Div<Var<$ty>> for $ty {
            type Output = Expr<$ty>;
            fn div(self, rhs: Var<$ty>) -> Expr<$ty> {
                Expr::constant(self) / rhs
            }
        }
    };
}
impl_scalar_lhs_ops!(f32);
impl_scalar_lhs_ops!(f64);

// -------------------------------------
// iterator folds
// -------------------------------------

// `iter.sum::<Expr<T>>()` collects directly into one n-ary sum
impl<T> Sum for Expr<T>
where
    T: FloatT,
{
    fn sum<I: Iterator<Item = Expr<T>>>(iter: I) -> Expr<T> {
        Expr::sum(iter.collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::expr::ExpressionOps;

    #[test]
    fn test_scalar_mixing() {
        let x = Var::<f64>::new(0);
        let y = Var::<f64>::new(1);

        let e = 2.0 * x + y / 4.0 - 1.0;
        let point = [3.0, 8.0];
        assert_eq!(e.eval(&point), 7.0);
    }

    #[test]
    fn test_unary_minus() {
        let x = Var::<f64>::new(0);
        let e = -(x * x);
        assert_eq!(e.eval(&[3.0]), -9.0);
        assert_eq!(e.to_string(), "-((v0 * v0))");
    }

    #[test]
    fn test_iterator_sum() {
        let vars: Vec<Var<f64>> = (0..4).map(Var::new).collect();
        let e: Expr<f64> = vars.iter().map(|x| x.powi(2)).sum();
        assert_eq!(e.eval(&[1.0, 2.0, 3.0, 4.0]), 30.0);
        match e {
            Expr::Nary(n) => assert_eq!(n.args.len(), 4),
            _ => panic!("expected an n-ary sum"),
        }
    }
}
