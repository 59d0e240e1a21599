use thiserror::Error;

/// Error type returned when writing a model in `.nl` format.
#[derive(Error, Debug)]
pub enum NlWriteError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// the model has no objective to place in the `O` segment
    #[error("Model has no objective")]
    MissingObjective,
    /// a model without variables has no meaningful `.nl` form
    #[error("Model has no variables")]
    NoVariables,
}

/// Error type returned when reading a `.nl` file.
///
/// The leading `usize` of most variants is the 1-based line number at
/// which the problem was found.
#[derive(Error, Debug)]
pub enum NlReadError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Empty nl file")]
    EmptyFile,
    #[error("Unrecognized binary/ASCII indicator char `{0}`; 'g' or 'b' was expected")]
    BadIndicator(char),
    #[error("Binary ('b') nl files are not supported")]
    BinaryUnsupported,
    #[error("Unexpected end of file")]
    UnexpectedEof,
    #[error("Line {0}: unexpected character `{1}`")]
    UnexpectedChar(usize, char),
    #[error("Line {0}: unsupported operator code o{1}")]
    UnsupportedOpcode(usize, u32),
    #[error("Line {0}: malformed integer field")]
    BadInteger(usize),
    #[error("Line {0}: malformed numeric field")]
    BadNumber(usize),
    #[error("Line {0}: variable index {1} out of bounds")]
    VariableOutOfBounds(usize, usize),
    #[error("Line {0}: constraint index {1} out of bounds")]
    ConstraintOutOfBounds(usize, usize),
    #[error("Line {0}: unsupported constraint bound code {1}")]
    UnsupportedBound(usize, u32),
    #[error("No body found for constraint {0}")]
    MissingConstraintBody(usize),
}
