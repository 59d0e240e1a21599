use crate::model::expr::{BinaryOp, NaryOp, UnaryOp};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Operators of the `.nl` expression grammar supported by this crate,
/// with opcode numbers from Table 6 of "Writing .nl files".
///
/// The table defines many more codes; anything outside this set is
/// rejected on read and never produced on write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NlOpcode {
    Plus,
    Minus,
    Mult,
    Div,
    Pow,
    Neg,
    Tan,
    Sqrt,
    Sin,
    Log,
    Exp,
    Cos,
}

impl NlOpcode {
    pub const ALL: [NlOpcode; 12] = [
        NlOpcode::Plus,
        NlOpcode::Minus,
        NlOpcode::Mult,
        NlOpcode::Div,
        NlOpcode::Pow,
        NlOpcode::Neg,
        NlOpcode::Tan,
        NlOpcode::Sqrt,
        NlOpcode::Sin,
        NlOpcode::Log,
        NlOpcode::Exp,
        NlOpcode::Cos,
    ];

    /// numeric operator code as it appears after `o` in the file
    pub fn code(self) -> u32 {
        match self {
            NlOpcode::Plus => 0,
            NlOpcode::Minus => 1,
            NlOpcode::Mult => 2,
            NlOpcode::Div => 3,
            NlOpcode::Pow => 5,
            NlOpcode::Neg => 16,
            NlOpcode::Tan => 38,
            NlOpcode::Sqrt => 39,
            NlOpcode::Sin => 41,
            NlOpcode::Log => 43,
            NlOpcode::Exp => 44,
            NlOpcode::Cos => 46,
        }
    }

    /// number of argument subexpressions the operator consumes
    pub fn nargs(self) -> usize {
        match self {
            NlOpcode::Plus
            | NlOpcode::Minus
            | NlOpcode::Mult
            | NlOpcode::Div
            | NlOpcode::Pow => 2,
            _ => 1,
        }
    }

    /// the corresponding expression operator, for unary opcodes
    pub(crate) fn unary_op(self) -> Option<UnaryOp> {
        match self {
            NlOpcode::Neg => Some(UnaryOp::Neg),
            NlOpcode::Tan => Some(UnaryOp::Tan),
            NlOpcode::Sqrt => Some(UnaryOp::Sqrt),
            NlOpcode::Sin => Some(UnaryOp::Sin),
            NlOpcode::Log => Some(UnaryOp::Log),
            NlOpcode::Exp => Some(UnaryOp::Exp),
            NlOpcode::Cos => Some(UnaryOp::Cos),
            _ => None,
        }
    }
}

lazy_static! {
    /// numeric code -> supported operator.   The code space is sparse, so
    /// a lookup map rather than a dense table.
    pub(crate) static ref OP_LOOKUP: HashMap<u32, NlOpcode> =
        NlOpcode::ALL.iter().map(|&op| (op.code(), op)).collect();
}

impl From<UnaryOp> for NlOpcode {
    fn from(op: UnaryOp) -> Self {
        match op {
            UnaryOp::Neg => NlOpcode::Neg,
            UnaryOp::Sqrt => NlOpcode::Sqrt,
            UnaryOp::Exp => NlOpcode::Exp,
            UnaryOp::Log => NlOpcode::Log,
            UnaryOp::Sin => NlOpcode::Sin,
            UnaryOp::Cos => NlOpcode::Cos,
            UnaryOp::Tan => NlOpcode::Tan,
        }
    }
}

impl From<BinaryOp> for NlOpcode {
    fn from(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Sub => NlOpcode::Minus,
            BinaryOp::Div => NlOpcode::Div,
            BinaryOp::Pow => NlOpcode::Pow,
        }
    }
}

impl From<NaryOp> for NlOpcode {
    fn from(op: NaryOp) -> Self {
        match op {
            NaryOp::Sum => NlOpcode::Plus,
            NaryOp::Product => NlOpcode::Mult,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_roundtrip() {
        for op in NlOpcode::ALL {
            assert_eq!(OP_LOOKUP.get(&op.code()), Some(&op));
        }
        // codes absent from the supported subset
        for code in [4, 6, 15, 17, 40, 54] {
            assert!(OP_LOOKUP.get(&code).is_none());
        }
    }

    #[test]
    fn test_arities() {
        assert_eq!(NlOpcode::Plus.nargs(), 2);
        assert_eq!(NlOpcode::Pow.nargs(), 2);
        assert_eq!(NlOpcode::Neg.nargs(), 1);
        assert_eq!(NlOpcode::Sin.nargs(), 1);
    }
}
