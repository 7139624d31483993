use nalgebra::{ComplexField, DMatrix, RealField};

/// The tolerance on the norm of `a - b^†`, relative to the norm of `a` once that exceeds one
fn tolerance<T: ComplexField>() -> T::RealField {
    nalgebra::convert(std::f64::EPSILON * 100_f64)
}

/// Tests for hermiticity of a matrix
pub(crate) fn is_hermitian<T: ComplexField + Copy>(matrix: &DMatrix<T>) -> bool {
    matrix.is_square() && is_adjoint(matrix, matrix)
}

/// Tests whether `b` is the conjugate transpose of `a`
pub(crate) fn is_adjoint<T: ComplexField + Copy>(a: &DMatrix<T>, b: &DMatrix<T>) -> bool {
    if a.shape() != (b.ncols(), b.nrows()) {
        return false;
    }
    let scale = a.norm().max(nalgebra::one());
    (a - b.adjoint()).norm() <= tolerance::<T>() * scale
}
