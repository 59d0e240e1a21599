//! Symbolic arithmetic expressions over indexed scalar variables.
//!
//! An [`Expr`] is a tree with constant and variable leaves and operator
//! interior nodes.   Operator arities mirror the `.nl` operator set:
//! sums and products are n-ary and flatten on construction, subtraction,
//! division and powers are binary, and the transcendental functions are
//! unary.
//!
//! Expressions are built with ordinary Rust operators plus the methods
//! on [`Expr`] and [`Var`]:
//!
//! ```
//! use nlmodel::model::expr::{Expr, Var};
//!
//! let x = Var::<f64>::new(0);
//! let y = Var::<f64>::new(1);
//! let e: Expr<f64> = (x + y).sin() / y.powi(2);
//! assert_eq!(e.to_string(), "(sin((v0 + v1)) / (v1 ^ 2))");
//! ```

use crate::algebra::{AsFloatT, FloatT};
use enum_dispatch::*;
use std::fmt;
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

mod ops;

/// Operations common to every expression node.
#[enum_dispatch]
pub trait ExpressionOps<T>
where
    T: FloatT,
{
    /// Value of the expression at `point`, where `point[i]` holds the
    /// value of variable `i`.
    ///
    /// Evaluation is IEEE: out-of-domain arguments produce NaN or
    /// infinities rather than errors.
    ///
    /// # Panics
    /// Panics if a referenced variable index is not covered by `point`.
    fn eval(&self, point: &[T]) -> T;

    /// Invoke `visit` for every variable reference in the tree,
    /// depth-first, left to right.
    fn visit_variables(&self, visit: &mut dyn FnMut(usize));

    /// Number of nodes in this (sub)tree.
    fn node_count(&self) -> usize;
}

// -------------------------------------
// operator tags
// -------------------------------------

/// Unary operators (one argument).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOp {
    Neg,
    Sqrt,
    Exp,
    Log,
    Sin,
    Cos,
    Tan,
}

/// Binary operators (exactly two arguments).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinaryOp {
    Sub,
    Div,
    Pow,
}

/// N-ary operators.   These flatten on construction, so `a + b + c` is a
/// single three-argument sum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NaryOp {
    Sum,
    Product,
}

impl UnaryOp {
    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Exp => "exp",
            UnaryOp::Log => "log",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Tan => "tan",
        }
    }

    pub(crate) fn apply<T: FloatT>(&self, v: T) -> T {
        match self {
            UnaryOp::Neg => -v,
            UnaryOp::Sqrt => v.sqrt(),
            UnaryOp::Exp => v.exp(),
            UnaryOp::Log => v.ln(),
            UnaryOp::Sin => v.sin(),
            UnaryOp::Cos => v.cos(),
            UnaryOp::Tan => v.tan(),
        }
    }
}

impl BinaryOp {
    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Sub => "-",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    pub(crate) fn apply<T: FloatT>(&self, lhs: T, rhs: T) -> T {
        match self {
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Pow => lhs.powf(rhs),
        }
    }
}

impl NaryOp {
    pub(crate) fn symbol(&self) -> &'static str {
        match self {
            NaryOp::Sum => "+",
            NaryOp::Product => "*",
        }
    }

    /// value of the operator applied to zero arguments
    pub(crate) fn identity<T: FloatT>(&self) -> T {
        match self {
            NaryOp::Sum => T::zero(),
            NaryOp::Product => T::one(),
        }
    }
}

// -------------------------------------
// expression nodes
// -------------------------------------

/// A constant leaf.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Constant<T = f64>(pub T);

/// A reference to a decision variable by index.
///
/// `Var` is a lightweight `Copy` handle: it carries no value, only the
/// identity of a variable within its model.   It converts into an
/// [`Expr`] leaf and participates directly in arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Var<T = f64> {
    /// index of the referenced variable
    pub index: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    _marker: PhantomData<T>,
}

impl<T> Var<T> {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }
}

/// A unary operator applied to one subexpression.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct UnaryExpr<T = f64>
where
    T: FloatT,
{
    pub op: UnaryOp,
    pub arg: Box<Expr<T>>,
}

/// A binary operator applied to two subexpressions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct BinaryExpr<T = f64>
where
    T: FloatT,
{
    pub op: BinaryOp,
    pub lhs: Box<Expr<T>>,
    pub rhs: Box<Expr<T>>,
}

/// An n-ary operator applied to a list of subexpressions.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct NaryExpr<T = f64>
where
    T: FloatT,
{
    pub op: NaryOp,
    pub args: Vec<Expr<T>>,
}

/// A symbolic arithmetic expression.
#[enum_dispatch(ExpressionOps<T>)]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub enum Expr<T = f64>
where
    T: FloatT,
{
    Constant(Constant<T>),
    Variable(Var<T>),
    Unary(UnaryExpr<T>),
    Binary(BinaryExpr<T>),
    Nary(NaryExpr<T>),
}

// -------------------------------------
// per-node trait implementations
// -------------------------------------

impl<T> ExpressionOps<T> for Constant<T>
where
    T: FloatT,
{
    fn eval(&self, _point: &[T]) -> T {
        self.0
    }
    fn visit_variables(&self, _visit: &mut dyn FnMut(usize)) {}
    fn node_count(&self) -> usize {
        1
    }
}

impl<T> ExpressionOps<T> for Var<T>
where
    T: FloatT,
{
    fn eval(&self, point: &[T]) -> T {
        point[self.index]
    }
    fn visit_variables(&self, visit: &mut dyn FnMut(usize)) {
        visit(self.index);
    }
    fn node_count(&self) -> usize {
        1
    }
}

impl<T> ExpressionOps<T> for UnaryExpr<T>
where
    T: FloatT,
{
    fn eval(&self, point: &[T]) -> T {
        self.op.apply(self.arg.eval(point))
    }
    fn visit_variables(&self, visit: &mut dyn FnMut(usize)) {
        self.arg.visit_variables(visit);
    }
    fn node_count(&self) -> usize {
        1 + self.arg.node_count()
    }
}

impl<T> ExpressionOps<T> for BinaryExpr<T>
where
    T: FloatT,
{
    fn eval(&self, point: &[T]) -> T {
        self.op.apply(self.lhs.eval(point), self.rhs.eval(point))
    }
    fn visit_variables(&self, visit: &mut dyn FnMut(usize)) {
        self.lhs.visit_variables(visit);
        self.rhs.visit_variables(visit);
    }
    fn node_count(&self) -> usize {
        1 + self.lhs.node_count() + self.rhs.node_count()
    }
}

impl<T> ExpressionOps<T> for NaryExpr<T>
where
    T: FloatT,
{
    fn eval(&self, point: &[T]) -> T {
        match self.op {
            NaryOp::Sum => self.args.iter().map(|a| a.eval(point)).sum(),
            NaryOp::Product => self.args.iter().map(|a| a.eval(point)).product(),
        }
    }
    fn visit_variables(&self, visit: &mut dyn FnMut(usize)) {
        for arg in &self.args {
            arg.visit_variables(visit);
        }
    }
    fn node_count(&self) -> usize {
        1 + self.args.iter().map(|a| a.node_count()).sum::<usize>()
    }
}

// -------------------------------------
// construction
// -------------------------------------

impl<T> Expr<T>
where
    T: FloatT,
{
    pub fn constant(value: T) -> Self {
        Expr::Constant(Constant(value))
    }

    pub fn variable(index: usize) -> Self {
        Expr::Variable(Var::new(index))
    }

    pub fn unary(op: UnaryOp, arg: Expr<T>) -> Self {
        Expr::Unary(UnaryExpr {
            op,
            arg: Box::new(arg),
        })
    }

    pub fn binary(op: BinaryOp, lhs: Expr<T>, rhs: Expr<T>) -> Self {
        Expr::Binary(BinaryExpr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn nary(op: NaryOp, args: Vec<Expr<T>>) -> Self {
        Expr::Nary(NaryExpr { op, args })
    }

    /// n-ary sum of `args`
    pub fn sum(args: Vec<Expr<T>>) -> Self {
        Self::nary(NaryOp::Sum, args)
    }

    /// n-ary product of `args`
    pub fn product(args: Vec<Expr<T>>) -> Self {
        Self::nary(NaryOp::Product, args)
    }

    /// square root
    pub fn sqrt(self) -> Self {
        Self::unary(UnaryOp::Sqrt, self)
    }

    /// natural exponential
    pub fn exp(self) -> Self {
        Self::unary(UnaryOp::Exp, self)
    }

    /// natural logarithm
    pub fn ln(self) -> Self {
        Self::unary(UnaryOp::Log, self)
    }

    pub fn sin(self) -> Self {
        Self::unary(UnaryOp::Sin, self)
    }

    pub fn cos(self) -> Self {
        Self::unary(UnaryOp::Cos, self)
    }

    pub fn tan(self) -> Self {
        Self::unary(UnaryOp::Tan, self)
    }

    /// raise to an integer power (the exponent is stored as a constant
    /// leaf, as in the `.nl` encoding)
    pub fn powi(self, n: i32) -> Self {
        Self::binary(BinaryOp::Pow, self, Expr::constant(n.as_T()))
    }

    /// raise to a general expression power
    pub fn pow(self, exponent: impl Into<Expr<T>>) -> Self {
        Self::binary(BinaryOp::Pow, self, exponent.into())
    }

    /// Distinct variable indices appearing in the expression, in
    /// first-encounter (depth-first) order.
    pub fn variables(&self) -> Vec<usize> {
        let mut order: Vec<usize> = Vec::new();
        self.visit_variables(&mut |i| {
            if !order.contains(&i) {
                order.push(i);
            }
        });
        order
    }
}

// conversion of bare scalars into constant leaves
impl<T> From<T> for Expr<T>
where
    T: FloatT,
{
    fn from(value: T) -> Self {
        Expr::constant(value)
    }
}

// forward the unary function constructors so they can be called
// directly on a variable handle
macro_rules! forward_var_fns {
    ($($fname:ident),*) => {
        impl<T> Var<T>
        where
            T: FloatT,
        {
            $(
                pub fn $fname(self) -> Expr<T> {
                    Expr::from(self).$fname()
                }
            )*

            /// raise to an integer power
            pub fn powi(self, n: i32) -> Expr<T> {
                Expr::from(self).powi(n)
            }

            /// raise to a general expression power
            pub fn pow(self, exponent: impl Into<Expr<T>>) -> Expr<T> {
                Expr::from(self).pow(exponent)
            }
        }
    };
}
forward_var_fns!(sqrt, exp, ln, sin, cos, tan);

// -------------------------------------
// printing
// -------------------------------------

// Fully parenthesized infix form: operands of binary and n-ary
// operators are wrapped as a group, unary operators print as calls.
impl<T> fmt::Display for Expr<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(Constant(v)) => write!(f, "{}", v),
            Expr::Variable(v) => write!(f, "v{}", v.index),
            Expr::Unary(u) => write!(f, "{}({})", u.op.symbol(), u.arg),
            Expr::Binary(b) => write!(f, "({} {} {})", b.lhs, b.op.symbol(), b.rhs),
            Expr::Nary(n) => {
                write!(f, "(")?;
                for (i, arg) in n.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", n.op.symbol())?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flattening() {
        let x = Var::<f64>::new(0);
        let y = Var::<f64>::new(1);
        let z = Var::<f64>::new(2);

        let e = x + y + z;
        match &e {
            Expr::Nary(n) => {
                assert_eq!(n.op, NaryOp::Sum);
                assert_eq!(n.args.len(), 3);
            }
            _ => panic!("expected an n-ary sum"),
        }

        let e = x * y * z;
        match &e {
            Expr::Nary(n) => {
                assert_eq!(n.op, NaryOp::Product);
                assert_eq!(n.args.len(), 3);
            }
            _ => panic!("expected an n-ary product"),
        }
    }

    #[test]
    fn test_variable_order() {
        let x = Var::<f64>::new(3);
        let y = Var::<f64>::new(1);

        // y first, x once despite repetition
        let e = (y + x) * x.sin();
        assert_eq!(e.variables(), vec![1, 3]);
    }

    #[test]
    fn test_node_count() {
        let x = Var::<f64>::new(0);
        let e = x.sin() + 1.0;
        // sum, sin, v0, constant
        assert_eq!(e.node_count(), 4);
    }
}
