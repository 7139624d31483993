//! # Error
//! Errors raised while reading parameters and assembling the Hamiltonian

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Errors raised while building a `Hamiltonian`
///
/// All variants are raised before any block storage is allocated, so a failed build never
/// leaves a partially filled Hamiltonian behind
pub enum BuildError {
    /// A parameter required by the assembler is absent from the `ParameterStore`
    #[error("missing required parameter `{key}`")]
    #[diagnostic(code(nanowire_negf::missing_parameter))]
    MissingParameter {
        /// The key which was requested
        key: String,
    },
    /// A dimension parameter is not a positive integer
    #[error("invalid dimension `{key}`: expected a positive integer, found {value}")]
    #[diagnostic(code(nanowire_negf::invalid_dimension))]
    InvalidDimension {
        /// The key of the offending parameter
        key: String,
        /// The value found in the store
        value: f64,
    },
    /// An output view handed to a block generator has the wrong shape
    #[error("{0}")]
    MissizedAllocator(String),
    /// The flattened sparse form of the Hamiltonian could not be constructed
    #[error(transparent)]
    Csr(#[from] CsrError),
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// General error for Csr construction and pattern problems
pub enum CsrError {
    /// The offsets and column indices do not form a valid pattern
    #[error(transparent)]
    Pattern(#[from] nalgebra_sparse::pattern::SparsityPatternFormatError),
    /// The values do not match the pattern
    #[error(transparent)]
    Construction(#[from] nalgebra_sparse::SparseFormatError),
}

impl BuildError {
    pub(crate) fn missing(key: impl Into<String>) -> Self {
        Self::MissingParameter { key: key.into() }
    }

    pub(crate) fn invalid_dimension(key: impl Into<String>, value: f64) -> Self {
        Self::InvalidDimension {
            key: key.into(),
            value,
        }
    }
}
