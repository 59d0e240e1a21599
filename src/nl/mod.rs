//! Reading and writing of models in the `.nl` text interchange format.
//!
//! The grammar is the ASCII ('g') flavour of the AMPL `.nl` layout: a
//! 10-line header of counts, `C`/`O` segments carrying constraint and
//! objective expressions in prefix notation, an `x` segment of initial
//! variable values, `r`/`b` bound rows, and `k`/`J`/`G` linear sparsity
//! segments.   Only the operator subset in [`NlOpcode`] is produced or
//! accepted.

mod error_types;
mod opcodes;
mod reader;
mod writer;

pub use error_types::*;
pub use opcodes::*;
pub use reader::*;
pub use writer::*;
