//! Hamiltonian module
//!
//! Creates the tight-binding Hamiltonian of a one dimensional nanowire for use in NEGF calculations.
//!
//! The wire is discretised into `N_D` sites, each carrying `N_int` internal degrees of freedom. The
//! Hamiltonian is logically a four dimensional tensor `H[site_row, site_col, internal_row, internal_col]`
//! of shape `(N_D, N_D, N_int, N_int)`. With nearest neighbour coupling only three block bands are
//! non-zero:
//! - the diagonal `H[i, i]`, holding the on-site block `alpha`
//! - the upper band `H[i, i + 1]`, holding the coupling block `beta`
//! - the lower band `H[i + 1, i]`, holding the coupling block `beta`
//!
//! so the `Hamiltonian` stores just these bands. A Hamiltonian is constructed through the
//! `HamiltonianBuilder` from a reference to a `ParameterStore`:
//!
//! ```ignore
//! HamiltonianBuilder::default()
//!     .with_parameters(&parameters)
//!     .build();
//! ```
//!
//! Each build allocates a fresh `Hamiltonian`. Parameters are never re-read, so a change in the
//! parameters requires a new build.

pub mod global;
mod local;

pub use global::*;
pub use local::{build_coupling_block, build_site_block, BlockGenerator, TightBinding};

use crate::{error::BuildError, parameters::ParameterStore, utilities::matrices};
use nalgebra::{ComplexField, DMatrix, DVector};
use ndarray::Array4;
use num_traits::ToPrimitive;

#[derive(Clone, Debug, PartialEq)]
/// The block tridiagonal Hamiltonian of the nanowire
pub struct Hamiltonian<T: ComplexField> {
    /// The dimension of the internal space at each site
    internal_dimension: usize,
    /// The on-site blocks `H[i, i]`, one per site
    diagonal: Vec<DMatrix<T>>,
    /// The blocks `H[i, i + 1]`, coupling site `i + 1` to site `i`
    upper: Vec<DMatrix<T>>,
    /// The blocks `H[i + 1, i]`, coupling site `i` to site `i + 1`
    lower: Vec<DMatrix<T>>,
}

impl<T: ComplexField + Copy> Hamiltonian<T> {
    /// The number of sites `N_D`
    pub fn number_of_sites(&self) -> usize {
        self.diagonal.len()
    }

    /// The dimension of the internal space at each site `N_int`
    pub fn internal_dimension(&self) -> usize {
        self.internal_dimension
    }

    /// The logical shape `[N_D, N_D, N_int, N_int]`
    pub fn shape(&self) -> [usize; 4] {
        let n = self.number_of_sites();
        let m = self.internal_dimension;
        [n, n, m, m]
    }

    /// The number of rows in the flattened `(N_D * N_int)` square matrix
    pub fn num_rows(&self) -> usize {
        self.number_of_sites() * self.internal_dimension
    }

    /// The on-site blocks
    pub fn diagonal_blocks(&self) -> &[DMatrix<T>] {
        &self.diagonal
    }

    /// The blocks `H[i, i + 1]`
    pub fn upper_blocks(&self) -> &[DMatrix<T>] {
        &self.upper
    }

    /// The blocks `H[i + 1, i]`
    pub fn lower_blocks(&self) -> &[DMatrix<T>] {
        &self.lower
    }

    /// The block at `[row, col]`, or `None` if the block lies outside the three bands, or outside the
    /// Hamiltonian. Blocks outside the bands are identically zero
    pub fn block(&self, row: usize, col: usize) -> Option<&DMatrix<T>> {
        if row >= self.number_of_sites() || col >= self.number_of_sites() {
            return None;
        }
        if row == col {
            Some(&self.diagonal[row])
        } else if col == row + 1 {
            Some(&self.upper[row])
        } else if row == col + 1 {
            Some(&self.lower[col])
        } else {
            None
        }
    }

    /// The block at `[row, col]`, a zero matrix outside the bands
    pub fn block_or_zero(&self, row: usize, col: usize) -> DMatrix<T> {
        self.block(row, col).cloned().unwrap_or_else(|| {
            DMatrix::zeros(self.internal_dimension, self.internal_dimension)
        })
    }

    /// The element at `[site_row, site_col, internal_row, internal_col]`
    ///
    /// # Panics
    /// If any index is out of bounds for `shape`
    pub fn get(&self, index: [usize; 4]) -> T {
        let shape = self.shape();
        assert!(
            index.iter().zip(shape.iter()).all(|(i, n)| i < n),
            "index {:?} is out of bounds for shape {:?}",
            index,
            shape
        );
        self.block(index[0], index[1])
            .map(|block| block[(index[2], index[3])])
            .unwrap_or_else(T::zero)
    }

    /// Iterate over the stored blocks and their `(row, col)` positions: the diagonal, then the upper
    /// band, then the lower band
    pub fn blocks(&self) -> impl Iterator<Item = ((usize, usize), &DMatrix<T>)> {
        let diagonal = self.diagonal.iter().enumerate().map(|(i, b)| ((i, i), b));
        let upper = self.upper.iter().enumerate().map(|(i, b)| ((i, i + 1), b));
        let lower = self.lower.iter().enumerate().map(|(i, b)| ((i + 1, i), b));
        diagonal.chain(upper).chain(lower)
    }

    /// The dense tensor of shape `(N_D, N_D, N_int, N_int)`
    pub fn to_dense(&self) -> Array4<T> {
        let [n, _, m, _] = self.shape();
        let mut dense = Array4::from_elem((n, n, m, m), T::zero());
        for ((row, col), block) in self.blocks() {
            for a in 0..m {
                for b in 0..m {
                    dense[[row, col, a, b]] = block[(a, b)];
                }
            }
        }
        dense
    }

    /// The flattened square matrix, in which site `i` and internal mode `a` map to row `i * N_int + a`
    pub fn to_dense_matrix(&self) -> DMatrix<T> {
        let m = self.internal_dimension;
        let mut dense = DMatrix::zeros(self.num_rows(), self.num_rows());
        for ((row, col), block) in self.blocks() {
            dense.slice_mut((row * m, col * m), (m, m)).copy_from(block);
        }
        dense
    }

    /// Whether the Hamiltonian is hermitian, checked block by block
    pub fn is_hermitian(&self) -> bool {
        self.diagonal.iter().all(matrices::is_hermitian)
            && self
                .upper
                .iter()
                .zip(self.lower.iter())
                .all(|(upper, lower)| matrices::is_adjoint(upper, lower))
    }

    /// The eigenvalues of the closed system, sorted in ascending order
    pub fn eigenvalues(&self) -> DVector<T::RealField> {
        let mut values = self
            .to_dense_matrix()
            .symmetric_eigen()
            .eigenvalues
            .iter()
            .cloned()
            .collect::<Vec<_>>();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        DVector::from_vec(values)
    }
}

/// Builder for a Hamiltonian from the reference to a `ParameterStore`
pub struct HamiltonianBuilder<RefParameters> {
    parameters: RefParameters,
}

impl Default for HamiltonianBuilder<()> {
    /// Initialize an empty instance of HamiltonianBuilder
    fn default() -> Self {
        Self { parameters: () }
    }
}

impl<RefParameters> HamiltonianBuilder<RefParameters> {
    /// Attach the parameter store
    pub fn with_parameters<Parameters>(
        self,
        parameters: &Parameters,
    ) -> HamiltonianBuilder<&Parameters> {
        HamiltonianBuilder { parameters }
    }
}

impl<R> HamiltonianBuilder<&ParameterStore<R>>
where
    R: nalgebra::RealField + Copy + ToPrimitive,
{
    /// Builds an instance of `Hamiltonian` from a `HamiltonianBuilder`
    #[tracing::instrument(name = "Hamiltonian Builder", level = "info", skip(self))]
    pub fn build<T>(self) -> Result<Hamiltonian<T>, BuildError>
    where
        T: ComplexField<RealField = R> + Copy,
    {
        assemble(self.parameters)
    }
}
