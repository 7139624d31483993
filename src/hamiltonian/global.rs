//! Global assemblers for the `Hamiltonian`
//!
//! This module takes the site blocks produced in the local submodule and places them in the three
//! bands of the global `Hamiltonian`. It also provides the flattened sparse form of the operator,
//! in which the block tridiagonal structure is expressed as a `CsrMatrix`.

use super::{local::BlockGenerator, Hamiltonian, TightBinding};
use crate::{
    error::{BuildError, CsrError},
    parameters::{Parameter, ParameterStore},
};
use nalgebra::{ComplexField, RealField};
use nalgebra_sparse::{pattern::SparsityPattern, CsrMatrix};
use num_traits::ToPrimitive;

/// Assemble the nearest-neighbour tight-binding Hamiltonian described by `parameters`
///
/// Reads `N_D`, `N_int` and `t0`. All three must be present, and both dimensions must be positive
/// integers; every check happens before any storage is allocated.
pub fn assemble<T>(
    parameters: &ParameterStore<T::RealField>,
) -> Result<Hamiltonian<T>, BuildError>
where
    T: ComplexField + Copy,
    T::RealField: Copy + ToPrimitive,
{
    let number_of_sites = parameters.get_parameter(Parameter::NumberOfSites)?;
    let internal_dimension = parameters.get_parameter(Parameter::InternalDimension)?;
    let hopping = parameters.get_parameter(Parameter::HoppingEnergy)?;

    let number_of_sites = read_dimension(Parameter::NumberOfSites, number_of_sites)?;
    let internal_dimension = read_dimension(Parameter::InternalDimension, internal_dimension)?;

    let generator = TightBinding::new(hopping, internal_dimension)?;
    assemble_with(number_of_sites, &generator)
}

/// Assemble a homogeneous nearest-neighbour Hamiltonian over `number_of_sites` sites from the
/// blocks produced by `generator`
///
/// The blocks are evaluated once and copied to every site, so every site carries an identical
/// on-site block and every bond an identical coupling block.
pub fn assemble_with<T, Generator>(
    number_of_sites: usize,
    generator: &Generator,
) -> Result<Hamiltonian<T>, BuildError>
where
    T: ComplexField + Copy,
    Generator: BlockGenerator<T>,
{
    if number_of_sites == 0 {
        return Err(BuildError::invalid_dimension(
            Parameter::NumberOfSites.key(),
            0.,
        ));
    }
    let internal_dimension = generator.internal_dimension();
    if internal_dimension == 0 {
        return Err(BuildError::invalid_dimension(
            Parameter::InternalDimension.key(),
            0.,
        ));
    }

    tracing::debug!(
        number_of_sites,
        internal_dimension,
        "Assembling block tridiagonal Hamiltonian"
    );
    let alpha = generator.site_block()?;
    let beta = generator.coupling_block()?;

    let mut diagonal = Vec::with_capacity(number_of_sites);
    let mut upper = Vec::with_capacity(number_of_sites - 1);
    let mut lower = Vec::with_capacity(number_of_sites - 1);
    for site in 0..number_of_sites {
        diagonal.push(alpha.clone());
        // The coupling from `site` to `site - 1`, at H[site - 1, site]
        if site > 0 {
            upper.push(beta.clone());
        }
        // The coupling from `site` to `site + 1`, at H[site + 1, site]
        if site < number_of_sites - 1 {
            lower.push(beta.clone());
        }
    }
    tracing::trace!("Placed {} blocks", diagonal.len() + upper.len() + lower.len());

    Ok(Hamiltonian {
        internal_dimension,
        diagonal,
        upper,
        lower,
    })
}

/// Convert a dimension parameter to a `usize`, failing unless it is a finite positive integer
fn read_dimension<R: RealField + Copy + ToPrimitive>(
    parameter: Parameter,
    value: R,
) -> Result<usize, BuildError> {
    let value = value
        .to_f64()
        .ok_or_else(|| BuildError::invalid_dimension(parameter.key(), f64::NAN))?;
    if !value.is_finite() || value < 1. || value.fract() != 0. {
        return Err(BuildError::invalid_dimension(parameter.key(), value));
    }
    value
        .to_usize()
        .ok_or_else(|| BuildError::invalid_dimension(parameter.key(), value))
}

impl<T: ComplexField + Copy> Hamiltonian<T> {
    /// Construct the sparsity pattern of the flattened Hamiltonian
    ///
    /// Every element of a stored block is included, so the pattern is the full block tridiagonal
    /// pattern regardless of zeros inside the blocks.
    pub fn sparsity_pattern(&self) -> Result<SparsityPattern, BuildError> {
        let (offsets, column_indices) = self.pattern_data();
        SparsityPattern::try_from_offsets_and_indices(
            self.num_rows(),
            self.num_rows(),
            offsets,
            column_indices,
        )
        .map_err(|e| BuildError::Csr(CsrError::Pattern(e)))
    }

    /// The flattened Hamiltonian as a `CsrMatrix`, using the same row ordering as `to_dense_matrix`
    pub fn to_csr(&self) -> Result<CsrMatrix<T>, BuildError> {
        let pattern = self.sparsity_pattern()?;
        let m = self.internal_dimension;
        let values = (0..self.num_rows())
            .flat_map(move |row| {
                let (site, a) = (row / m, row % m);
                self.row_blocks(site)
                    .flat_map(move |block| (0..m).map(move |b| block[(a, b)]))
            })
            .collect::<Vec<_>>();
        CsrMatrix::try_from_pattern_and_values(pattern, values)
            .map_err(|e| BuildError::Csr(CsrError::Construction(e)))
    }

    /// The stored blocks in block row `site`, in ascending column order
    fn row_blocks(&self, site: usize) -> impl Iterator<Item = &nalgebra::DMatrix<T>> {
        let lower = site.checked_sub(1).map(|col| &self.lower[col]);
        let upper = self.upper.get(site);
        lower
            .into_iter()
            .chain(std::iter::once(&self.diagonal[site]))
            .chain(upper)
    }

    /// Row offsets and column indices of the flattened block tridiagonal pattern
    fn pattern_data(&self) -> (Vec<usize>, Vec<usize>) {
        let n = self.number_of_sites();
        let m = self.internal_dimension;
        let mut offsets = Vec::with_capacity(self.num_rows() + 1);
        let mut column_indices = Vec::with_capacity((3 * n - 2) * m * m);

        offsets.push(0);
        for site in 0..n {
            let first_site = site.saturating_sub(1);
            let last_site = (site + 1).min(n - 1);
            for _ in 0..m {
                column_indices.extend(first_site * m..(last_site + 1) * m);
                offsets.push(column_indices.len());
            }
        }
        (offsets, column_indices)
    }
}

#[cfg(test)]
mod test {
    use super::{assemble, assemble_with, read_dimension};
    use crate::error::BuildError;
    use crate::hamiltonian::{BlockGenerator, Hamiltonian, TightBinding};
    use crate::parameters::{Parameter, ParameterStore};
    use matrixcompare::assert_matrix_eq;
    use nalgebra::{DMatrix, DMatrixSliceMut};
    use proptest::prelude::*;

    fn chain(t0: f64, n_d: f64, n_int: f64) -> ParameterStore<f64> {
        [("t0", t0), ("N_D", n_d), ("N_int", n_int)]
            .into_iter()
            .collect()
    }

    fn diagonal(value: f64, n: usize) -> DMatrix<f64> {
        DMatrix::identity(n, n) * value
    }

    #[test]
    fn three_site_chain_with_two_internal_modes() {
        let hamiltonian: Hamiltonian<f64> = assemble(&chain(1.0, 3., 2.)).unwrap();
        assert_eq!(hamiltonian.shape(), [3, 3, 2, 2]);

        let alpha = DMatrix::from_row_slice(2, 2, &[2., 0., 0., 2.]);
        let beta = DMatrix::from_row_slice(2, 2, &[-1., 0., 0., -1.]);
        for i in 0..3 {
            assert_matrix_eq!(hamiltonian.block_or_zero(i, i), alpha);
        }
        for (row, col) in [(0, 1), (1, 0), (1, 2), (2, 1)] {
            assert_matrix_eq!(hamiltonian.block_or_zero(row, col), beta);
        }
        for (row, col) in [(0, 2), (2, 0)] {
            let zero = DMatrix::<f64>::zeros(2, 2);
            assert_matrix_eq!(hamiltonian.block_or_zero(row, col), zero);
        }
    }

    #[test]
    fn single_site_has_only_the_on_site_block() {
        let hamiltonian: Hamiltonian<f64> = assemble(&chain(0.5, 1., 2.)).unwrap();
        assert_eq!(hamiltonian.shape(), [1, 1, 2, 2]);
        assert_matrix_eq!(
            hamiltonian.block_or_zero(0, 0),
            DMatrix::from_row_slice(2, 2, &[1., 0., 0., 1.])
        );
        assert!(hamiltonian.upper_blocks().is_empty());
        assert!(hamiltonian.lower_blocks().is_empty());
        assert_eq!(hamiltonian.blocks().count(), 1);
    }

    #[test]
    fn each_missing_parameter_is_reported() {
        for missing in ["t0", "N_D", "N_int"] {
            let parameters: ParameterStore<f64> = [("t0", 1.0), ("N_D", 3.0), ("N_int", 2.0)]
                .into_iter()
                .filter(|(key, _)| *key != missing)
                .collect();
            let result: Result<Hamiltonian<f64>, _> = assemble(&parameters);
            match result {
                Err(BuildError::MissingParameter { key }) => assert_eq!(key, missing),
                other => panic!("expected missing `{}`, got {:?}", missing, other),
            }
        }
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let result: Result<Hamiltonian<f64>, _> = assemble(&chain(1.0, 0., 2.));
        assert!(matches!(
            result,
            Err(BuildError::InvalidDimension { key, .. }) if key == "N_D"
        ));
        let result: Result<Hamiltonian<f64>, _> = assemble(&chain(1.0, 3., 0.));
        assert!(matches!(
            result,
            Err(BuildError::InvalidDimension { key, .. }) if key == "N_int"
        ));
    }

    #[test]
    fn non_integer_and_negative_dimensions_are_rejected() {
        for value in [2.5, -1., f64::NAN, f64::INFINITY] {
            assert!(matches!(
                read_dimension(Parameter::NumberOfSites, value),
                Err(BuildError::InvalidDimension { .. })
            ));
        }
        assert_eq!(read_dimension(Parameter::NumberOfSites, 7.0).unwrap(), 7);
    }

    #[test]
    fn missing_keys_are_reported_before_invalid_dimensions() {
        let parameters: ParameterStore<f64> = [("N_D", 0.), ("N_int", 2.)].into_iter().collect();
        let result: Result<Hamiltonian<f64>, _> = assemble(&parameters);
        match result {
            Err(BuildError::MissingParameter { key }) => assert_eq!(key, "t0"),
            other => panic!("expected a missing `t0`, found {:?}", other),
        }
    }

    #[test]
    fn error_message_names_the_parameter_and_value() {
        let result: Result<Hamiltonian<f64>, _> = assemble(&chain(1.0, 2.5, 2.));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("N_D"));
        assert!(message.contains("2.5"));
    }

    #[test]
    fn csr_matrix_matches_the_dense_matrix() {
        let hamiltonian: Hamiltonian<f64> = assemble(&chain(0.9, 5., 3.)).unwrap();
        let csr = hamiltonian.to_csr().unwrap();
        let dense = hamiltonian.to_dense_matrix();
        assert_matrix_eq!(csr, dense);
        assert_eq!(csr.nnz(), (3 * 5 - 2) * 3 * 3);
    }

    #[test]
    fn csr_matrix_for_a_single_site_is_the_on_site_block() {
        let hamiltonian: Hamiltonian<f64> = assemble(&chain(0.5, 1., 3.)).unwrap();
        let csr = hamiltonian.to_csr().unwrap();
        assert_matrix_eq!(csr, diagonal(1.0, 3));
    }

    /// Couples the two internal modes on each site, as a spin-flip term would
    struct SpinFlip;

    impl BlockGenerator<f64> for SpinFlip {
        fn internal_dimension(&self) -> usize {
            2
        }

        fn assemble_site_block_into(
            &self,
            mut output: DMatrixSliceMut<f64>,
        ) -> Result<(), BuildError> {
            output.copy_from(&DMatrix::from_row_slice(2, 2, &[1., 0.5, 0.5, 1.]));
            Ok(())
        }

        fn assemble_coupling_block_into(
            &self,
            mut output: DMatrixSliceMut<f64>,
        ) -> Result<(), BuildError> {
            output.copy_from(&DMatrix::from_row_slice(2, 2, &[-1., 0., 0., -1.]));
            Ok(())
        }
    }

    #[test]
    fn assembler_accepts_generators_with_coupled_internal_modes() {
        let hamiltonian: Hamiltonian<f64> = assemble_with(4, &SpinFlip).unwrap();
        assert_eq!(hamiltonian.get([2, 2, 0, 1]), 0.5);
        assert_eq!(hamiltonian.get([2, 3, 0, 1]), 0.);
        assert_eq!(hamiltonian.get([3, 2, 1, 1]), -1.);
        assert!(hamiltonian.is_hermitian());
        assert!(matches!(
            assemble_with::<f64, _>(0, &SpinFlip),
            Err(BuildError::InvalidDimension { .. })
        ));
    }

    proptest! {
        #[test]
        fn assembled_blocks_are_tridiagonal(
            t0 in -10.0f64..10.0,
            n_d in 1usize..12,
            n_int in 1usize..5,
        ) {
            let generator = TightBinding::new(t0, n_int).unwrap();
            let hamiltonian: Hamiltonian<f64> = assemble_with(n_d, &generator).unwrap();
            prop_assert_eq!(hamiltonian.shape(), [n_d, n_d, n_int, n_int]);

            let alpha = diagonal(2. * t0, n_int);
            let beta = diagonal(-t0, n_int);
            for row in 0..n_d {
                for col in 0..n_d {
                    let block = hamiltonian.block_or_zero(row, col);
                    let expected = match (row as isize - col as isize).abs() {
                        0 => alpha.clone(),
                        1 => beta.clone(),
                        _ => DMatrix::zeros(n_int, n_int),
                    };
                    prop_assert_eq!(block, expected);
                }
            }
        }
    }
}
