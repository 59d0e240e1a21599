use thiserror::Error;

/// Error type returned by sparse matrix assembly operations.
#[derive(Error, Debug)]
pub enum CsrFormatError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// Matrix row pointer values are defective
    #[error("Bad row pointer values")]
    BadRowptr,
    /// Column value exceeds the matrix column dimension
    #[error("Column value exceeds the matrix column dimension")]
    BadColval,
}
