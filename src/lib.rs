//! __nlmodel__ builds small nonlinear optimization models — indexed scalar
//! variables with initial values, equality constraints over symbolic
//! expression trees, and a single objective — and exchanges them in the
//! AMPL `.nl` text format for downstream solver testing.
//!
//! The crate provides:
//!
//! * an expression tree with operator-overloaded construction, evaluation
//!   at a point, and infix printing ([`model::expr`]),
//! * the [`model::Model`] container with `.nl` writing and reading
//!   ([`nl`]) and, with the default `serde` feature, JSON exchange,
//! * sparse first derivatives by forward- and reverse-mode automatic
//!   differentiation ([`diff`]),
//! * the two hard-coded fixture models ([`fixtures`]) behind the
//!   `nlfixture` binary.
//!
//! ```no_run
//! use nlmodel::model::Model;
//!
//! let mut m = Model::<f64>::new();
//! let [x, y] = m.add_variables(1.0);
//! m.equality(x * y + y.powi(2), 2.0);
//! m.minimize(x.powi(2) + y.powi(2));
//! m.write_nl_file("model.nl").unwrap();
//! ```

pub mod algebra;
pub mod diff;
pub mod fixtures;
pub mod model;
pub mod nl;
