//! The model container: variables, equality constraints and the
//! objective.
//!
//! A [`Model`] is populated in declaration order — variables first, then
//! constraints referencing them, then the objective — and is then
//! written out through the [`nl`](crate::nl) module (or JSON with the
//! `serde` feature).

use crate::algebra::FloatT;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub mod expr;

#[cfg(feature = "serde")]
mod json;

use expr::{Expr, ExpressionOps, Var};

/// A scalar decision variable: its index within the model plus its
/// current value, which doubles as the initial point in `.nl` output.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Variable<T = f64> {
    pub index: usize,
    pub value: T,
}

/// An equality constraint in canonical `body == rhs` form, with `rhs` a
/// scalar.
///
/// [`Model::equality`] accepts arbitrary left- and right-hand
/// expressions; a non-constant right-hand side is folded into the body
/// as `lhs - rhs == 0`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct Constraint<T = f64>
where
    T: FloatT,
{
    pub index: usize,
    pub body: Expr<T>,
    pub rhs: T,
}

/// Direction of optimization.   `.nl` files encode this in the `O`
/// segment header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjectiveSense {
    #[default]
    Minimize,
    Maximize,
}

/// The scalar objective expression and its sense.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct Objective<T = f64>
where
    T: FloatT,
{
    pub sense: ObjectiveSense,
    pub expr: Expr<T>,
}

/// A nonlinear optimization model: one variable collection, one
/// constraint collection and (at most, and for any useful model exactly)
/// one objective.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct Model<T = f64>
where
    T: FloatT,
{
    variables: Vec<Variable<T>>,
    constraints: Vec<Constraint<T>>,
    objective: Option<Objective<T>>,
}

impl<T> Model<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: None,
        }
    }

    /// Declare a new scalar variable with the given initial value and
    /// return a handle for use in expressions.
    pub fn add_variable(&mut self, value: T) -> Var<T> {
        let index = self.variables.len();
        self.variables.push(Variable { index, value });
        Var::new(index)
    }

    /// Declare `N` scalar variables sharing one initial value.
    ///
    /// ```
    /// # use nlmodel::model::Model;
    /// let mut m = Model::<f64>::new();
    /// let [x, y, z] = m.add_variables(1.0);
    /// ```
    pub fn add_variables<const N: usize>(&mut self, value: T) -> [Var<T>; N] {
        std::array::from_fn(|_| self.add_variable(value))
    }

    /// Add the equality constraint `lhs == rhs` and return its index.
    ///
    /// A constant right-hand side is kept as the constraint bound; any
    /// other right-hand side is moved into the body, leaving
    /// `lhs - rhs == 0`.
    pub fn equality(&mut self, lhs: impl Into<Expr<T>>, rhs: impl Into<Expr<T>>) -> usize {
        let lhs = lhs.into();
        let (body, rhs) = match rhs.into() {
            Expr::Constant(c) => (lhs, c.0),
            rhs => (lhs - rhs, T::zero()),
        };
        let index = self.constraints.len();
        self.constraints.push(Constraint { index, body, rhs });
        index
    }

    /// Set the objective to minimization of `expr`, replacing any
    /// existing objective.
    pub fn minimize(&mut self, expr: impl Into<Expr<T>>) {
        self.objective = Some(Objective {
            sense: ObjectiveSense::Minimize,
            expr: expr.into(),
        });
    }

    /// Set the objective to maximization of `expr`, replacing any
    /// existing objective.
    pub fn maximize(&mut self, expr: impl Into<Expr<T>>) {
        self.objective = Some(Objective {
            sense: ObjectiveSense::Maximize,
            expr: expr.into(),
        });
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn variables(&self) -> &[Variable<T>] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint<T>] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<&Objective<T>> {
        self.objective.as_ref()
    }

    /// Update the value of variable `index`.
    ///
    /// # Panics
    /// Panics if no such variable has been declared.
    pub fn set_value(&mut self, index: usize, value: T) {
        self.variables[index].value = value;
    }

    /// Current variable values as a dense point, indexed by variable
    /// index.
    pub fn point(&self) -> Vec<T> {
        self.variables.iter().map(|v| v.value).collect()
    }

    /// Residual `body - rhs` of constraint `index` at the current
    /// variable values; zero iff the constraint is satisfied.
    pub fn constraint_residual(&self, index: usize) -> T {
        let con = &self.constraints[index];
        con.body.eval(&self.point()) - con.rhs
    }

    /// Objective value at the current variable values, if an objective
    /// has been set.
    pub fn objective_value(&self) -> Option<T> {
        self.objective
            .as_ref()
            .map(|obj| obj.expr.eval(&self.point()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populate() {
        let mut m = Model::<f64>::new();
        let [x, y] = m.add_variables(2.0);
        m.equality(x * y, 4.0);
        m.equality(x + y, y * y);
        m.minimize(x.powi(2) + y.powi(2));

        assert_eq!(m.num_variables(), 2);
        assert_eq!(m.num_constraints(), 2);
        assert_eq!(m.point(), vec![2.0, 2.0]);

        // constant rhs is preserved, expression rhs folds to zero
        assert_eq!(m.constraints()[0].rhs, 4.0);
        assert_eq!(m.constraints()[1].rhs, 0.0);

        assert_eq!(m.constraint_residual(0), 0.0);
        assert_eq!(m.constraint_residual(1), 0.0);
        assert_eq!(m.objective_value(), Some(8.0));
    }

    #[test]
    fn test_point_update() {
        let mut m = Model::<f64>::new();
        let [x, y] = m.add_variables(1.0);
        m.equality(x + y, 3.0);

        assert_eq!(m.constraint_residual(0), -1.0);
        m.set_value(0, 2.0);
        m.set_value(1, 1.0);
        assert_eq!(m.point(), vec![2.0, 1.0]);
        assert_eq!(m.constraint_residual(0), 0.0);
    }

    #[test]
    fn test_objective_replacement() {
        let mut m = Model::<f64>::new();
        let [x] = m.add_variables(3.0);
        m.minimize(x + 1.0);
        m.maximize(x * x);

        let obj = m.objective().unwrap();
        assert_eq!(obj.sense, ObjectiveSense::Maximize);
        assert_eq!(m.objective_value(), Some(9.0));
    }
}
