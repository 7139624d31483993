//! Site level constructors for the Hamiltonian matrix
//!
//! This submodule constructs the two blocks the Hamiltonian is built from, each a square matrix over
//! the `N_int` internal degrees of freedom of a single site:
//! - the on-site block `alpha`, placed on the block diagonal
//! - the coupling block `beta`, placed on the two block off-diagonals
//!
//! The nanowire is homogeneous, so each block is evaluated once and reused for every site.

use crate::error::BuildError;
use crate::parameters::Parameter;
use nalgebra::{ComplexField, DMatrix, DMatrixSliceMut};
use num_traits::One;

/// Helper trait to construct the blocks of a nearest-neighbour Hamiltonian
///
/// Models with coupled internal modes (spin-orbit, pairing) implement this trait with off-diagonal
/// terms, the assembler only relies on the blocks being `internal_dimension` square.
pub trait BlockGenerator<T: ComplexField> {
    /// The number of internal degrees of freedom at each site
    fn internal_dimension(&self) -> usize;

    /// Fills `output` with the on-site block. Takes a square view of dimension
    /// `internal_dimension`, which is enforced
    fn assemble_site_block_into(&self, output: DMatrixSliceMut<T>) -> Result<(), BuildError>;

    /// Fills `output` with the block coupling nearest neighbour sites. Takes a square view of
    /// dimension `internal_dimension`, which is enforced
    fn assemble_coupling_block_into(&self, output: DMatrixSliceMut<T>) -> Result<(), BuildError>;

    /// Allocates and returns the on-site block
    fn site_block(&self) -> Result<DMatrix<T>, BuildError> {
        let n = self.internal_dimension();
        let mut output = DMatrix::zeros(n, n);
        self.assemble_site_block_into(output.slice_mut((0, 0), (n, n)))?;
        Ok(output)
    }

    /// Allocates and returns the coupling block
    fn coupling_block(&self) -> Result<DMatrix<T>, BuildError> {
        let n = self.internal_dimension();
        let mut output = DMatrix::zeros(n, n);
        self.assemble_coupling_block_into(output.slice_mut((0, 0), (n, n)))?;
        Ok(output)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// The single band tight-binding model, in which every internal mode hops independently with
/// amplitude `hopping`
pub struct TightBinding<R> {
    hopping: R,
    internal_dimension: usize,
}

impl<R: Copy> TightBinding<R> {
    /// Construct the generator, failing if `internal_dimension` is zero
    pub fn new(hopping: R, internal_dimension: usize) -> Result<Self, BuildError> {
        if internal_dimension == 0 {
            return Err(BuildError::invalid_dimension(
                Parameter::InternalDimension.key(),
                0.,
            ));
        }
        Ok(Self {
            hopping,
            internal_dimension,
        })
    }

    /// The hopping amplitude `t0`
    pub fn hopping(&self) -> R {
        self.hopping
    }
}

impl<T> BlockGenerator<T> for TightBinding<T::RealField>
where
    T: ComplexField + Copy,
    T::RealField: Copy,
{
    fn internal_dimension(&self) -> usize {
        self.internal_dimension
    }

    /// `2 t0` on each internal mode
    fn assemble_site_block_into(&self, output: DMatrixSliceMut<T>) -> Result<(), BuildError> {
        let two = T::RealField::one() + T::RealField::one();
        fill_diagonal_block(output, self.internal_dimension, two * self.hopping)
    }

    /// `-t0` on each internal mode
    fn assemble_coupling_block_into(&self, output: DMatrixSliceMut<T>) -> Result<(), BuildError> {
        fill_diagonal_block(output, self.internal_dimension, -self.hopping)
    }
}

/// Zeroes `output` and writes `value` along its diagonal
fn fill_diagonal_block<T: ComplexField + Copy>(
    mut output: DMatrixSliceMut<T>,
    internal_dimension: usize,
    value: T::RealField,
) -> Result<(), BuildError> {
    if output.shape() != (internal_dimension, internal_dimension) {
        return Err(BuildError::MissizedAllocator(format!(
            "Output block should be {0} x {0}, found {1} x {2}",
            internal_dimension,
            output.nrows(),
            output.ncols()
        )));
    }
    output.fill(T::zero());
    output.fill_diagonal(T::from_real(value));
    Ok(())
}

/// Builds the `n_int` square on-site block, with `2 t0` on the diagonal
pub fn build_site_block<T>(t0: T::RealField, n_int: usize) -> Result<DMatrix<T>, BuildError>
where
    T: ComplexField + Copy,
    T::RealField: Copy,
{
    TightBinding::new(t0, n_int)?.site_block()
}

/// Builds the `n_int` square nearest-neighbour coupling block, with `-t0` on the diagonal
pub fn build_coupling_block<T>(t0: T::RealField, n_int: usize) -> Result<DMatrix<T>, BuildError>
where
    T: ComplexField + Copy,
    T::RealField: Copy,
{
    TightBinding::new(t0, n_int)?.coupling_block()
}
