use thiserror::Error;

/// Errors raised by the matrix operations and the regressors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinRegError {
    /// Zero rows or zero columns were supplied
    #[error("empty input: at least one row and one column are required")]
    EmptyInput,

    /// The operand shapes are incompatible for the requested operation.
    /// Shapes are given as (rows, columns).
    #[error("dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// A pivot was within the zero tolerance during Gauss-Jordan elimination
    #[error("matrix is singular or nearly singular at pivot {pivot}")]
    SingularMatrix { pivot: usize },
}

pub type Result<T> = std::result::Result<T, LinRegError>;
