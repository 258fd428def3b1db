//! Basis change of the Fock and density matrices from the NAO basis to the CLPO basis.
//!
//! JANPA provides two sequential transformations, CLPO→LHO (`T1`) and LHO→NAO (`T2`).
//! The NAO→CLPO change is their composed inverse `C = T2⁻¹ · T1⁻¹`, and operators
//! stored as bilinear forms transform by congruence: `F' = Cᵀ · F · C`.

use crate::core::models::matrices::{
    OrbitalLabels, SourceMatrices, TransformedMatrices, expect_dimension, square_dimension,
};
use crate::engine::error::EngineError;
use nalgebra::DMatrix;
use tracing::{debug, instrument};

const CLPO_TO_LHO: &str = "CLPO→LHO";
const LHO_TO_NAO: &str = "LHO→NAO";

/// Holds the composed basis change built from the two JANPA transformation matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct BasisTransformer {
    // NAO → CLPO
    combined_inverse: DMatrix<f64>,
    // CLPO → NAO, i.e. T1 · T2
    combined: DMatrix<f64>,
}

impl BasisTransformer {
    /// Inverts both transformation matrices and composes them.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InputShape`] if the matrices are empty, not square or of
    /// different sizes, and [`EngineError::SingularMatrix`] if either cannot be inverted.
    pub fn new(
        clpo_to_lho: &DMatrix<f64>,
        lho_to_nao: &DMatrix<f64>,
    ) -> Result<Self, EngineError> {
        let n = square_dimension(CLPO_TO_LHO, clpo_to_lho)?;
        expect_dimension(LHO_TO_NAO, lho_to_nao, n)?;

        let clpo_to_lho_inv = invert(CLPO_TO_LHO, clpo_to_lho)?;
        let lho_to_nao_inv = invert(LHO_TO_NAO, lho_to_nao)?;

        Ok(Self {
            combined_inverse: lho_to_nao_inv * clpo_to_lho_inv,
            combined: clpo_to_lho * lho_to_nao,
        })
    }

    pub fn from_sources(sources: &SourceMatrices) -> Result<Self, EngineError> {
        Self::new(sources.clpo_to_lho(), sources.lho_to_nao())
    }

    pub fn dim(&self) -> usize {
        self.combined_inverse.nrows()
    }

    /// The NAO→CLPO basis-change matrix.
    pub fn combined_inverse(&self) -> &DMatrix<f64> {
        &self.combined_inverse
    }

    /// Re-expresses the source Fock and density matrices in the CLPO basis.
    #[instrument(skip_all, name = "basis_transform")]
    pub fn transform(&self, sources: &SourceMatrices) -> Result<TransformedMatrices, EngineError> {
        expect_dimension("Fock (NAO)", sources.fock(), self.dim())?;
        debug!(dim = self.dim(), "Applying congruence transform to Fock and density matrices.");

        let fock = congruence(&self.combined_inverse, sources.fock());
        let density = congruence(&self.combined_inverse, sources.density());
        Ok(TransformedMatrices::new(
            fock,
            density,
            sources.labels().clone(),
        )?)
    }

    /// Maps CLPO-basis matrices back to the NAO basis.
    pub fn back_transform(
        &self,
        transformed: &TransformedMatrices,
    ) -> Result<(DMatrix<f64>, DMatrix<f64>), EngineError> {
        expect_dimension("Fock", transformed.fock(), self.dim())?;
        Ok((
            congruence(&self.combined, transformed.fock()),
            congruence(&self.combined, transformed.density()),
        ))
    }
}

/// One-shot transformation with all inputs passed separately.
pub fn transform(
    fock: DMatrix<f64>,
    density: DMatrix<f64>,
    clpo_to_lho: DMatrix<f64>,
    lho_to_nao: DMatrix<f64>,
    labels: OrbitalLabels,
) -> Result<TransformedMatrices, EngineError> {
    let sources = SourceMatrices::new(fock, density, clpo_to_lho, lho_to_nao, labels)?;
    BasisTransformer::from_sources(&sources)?.transform(&sources)
}

fn invert(name: &'static str, matrix: &DMatrix<f64>) -> Result<DMatrix<f64>, EngineError> {
    matrix
        .clone()
        .try_inverse()
        .filter(|inverse| inverse.iter().all(|v| v.is_finite()))
        .ok_or(EngineError::SingularMatrix { name })
}

fn congruence(basis: &DMatrix<f64>, operator: &DMatrix<f64>) -> DMatrix<f64> {
    basis.transpose() * operator * basis
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOLERANCE: f64 = 1e-10;

    fn assert_matrix_approx_eq(a: &DMatrix<f64>, b: &DMatrix<f64>) {
        assert_eq!(a.shape(), b.shape());
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < TOLERANCE, "{} != {}\n{}\n{}", x, y, a, b);
        }
    }

    fn sample_fock() -> DMatrix<f64> {
        DMatrix::from_row_slice(
            3,
            3,
            &[-0.52, 0.031, -0.004, 0.031, -0.27, 0.012, -0.004, 0.012, 0.45],
        )
    }

    fn sample_density() -> DMatrix<f64> {
        DMatrix::from_row_slice(3, 3, &[1.97, 0.08, 0.01, 0.08, 1.02, -0.03, 0.01, -0.03, 0.03])
    }

    fn t1() -> DMatrix<f64> {
        DMatrix::from_row_slice(3, 3, &[0.9, 0.3, 0.0, -0.2, 1.1, 0.1, 0.05, 0.0, 0.95])
    }

    fn t2() -> DMatrix<f64> {
        DMatrix::from_row_slice(3, 3, &[1.0, 0.0, 0.2, 0.1, 0.8, 0.0, 0.0, -0.3, 1.2])
    }

    #[test]
    fn identity_transforms_leave_matrices_unchanged() {
        let id = DMatrix::identity(3, 3);
        let result = transform(
            sample_fock(),
            sample_density(),
            id.clone(),
            id,
            OrbitalLabels::none(),
        )
        .unwrap();
        assert_matrix_approx_eq(result.fock(), &sample_fock());
        assert_matrix_approx_eq(result.density(), &sample_density());
    }

    #[test]
    fn combined_inverse_is_inverse_of_t1_times_t2() {
        let transformer = BasisTransformer::new(&t1(), &t2()).unwrap();
        let product = t1() * t2() * transformer.combined_inverse();
        assert_matrix_approx_eq(&product, &DMatrix::identity(3, 3));
    }

    #[test]
    fn transform_applies_congruence_with_combined_inverse() {
        let transformer = BasisTransformer::new(&t1(), &t2()).unwrap();
        let sources = SourceMatrices::new(
            sample_fock(),
            sample_density(),
            t1(),
            t2(),
            OrbitalLabels::none(),
        )
        .unwrap();
        let result = transformer.transform(&sources).unwrap();

        let c = (t1() * t2()).try_inverse().unwrap();
        let expected_fock = c.transpose() * sample_fock() * &c;
        assert_matrix_approx_eq(result.fock(), &expected_fock);
    }

    #[test]
    fn back_transform_round_trips_to_source_matrices() {
        let sources = SourceMatrices::new(
            sample_fock(),
            sample_density(),
            t1(),
            t2(),
            OrbitalLabels::new(vec!["a".into(), "b".into(), "c".into()]),
        )
        .unwrap();
        let transformer = BasisTransformer::from_sources(&sources).unwrap();
        let transformed = transformer.transform(&sources).unwrap();
        let (fock, density) = transformer.back_transform(&transformed).unwrap();

        assert_matrix_approx_eq(&fock, &sample_fock());
        assert_matrix_approx_eq(&density, &sample_density());
        assert_eq!(transformed.labels().get(2), "c");
    }

    #[test]
    fn singular_first_transform_is_rejected() {
        let zeros = DMatrix::zeros(3, 3);
        let result = BasisTransformer::new(&zeros, &t2());
        assert!(matches!(
            result,
            Err(EngineError::SingularMatrix { name: "CLPO→LHO" })
        ));
    }

    #[test]
    fn singular_second_transform_is_rejected() {
        let rank_deficient =
            DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 1.0]);
        let result = transform(
            sample_fock(),
            sample_density(),
            t1(),
            rank_deficient,
            OrbitalLabels::none(),
        );
        assert!(matches!(
            result,
            Err(EngineError::SingularMatrix { name: "LHO→NAO" })
        ));
    }

    #[test]
    fn mismatched_transform_sizes_are_rejected() {
        let result = BasisTransformer::new(&t1(), &DMatrix::identity(2, 2));
        assert!(matches!(result, Err(EngineError::InputShape(_))));
    }

    #[test]
    fn transformer_rejects_sources_of_other_dimension() {
        let transformer = BasisTransformer::new(&DMatrix::identity(2, 2), &DMatrix::identity(2, 2))
            .unwrap();
        let sources = SourceMatrices::new(
            sample_fock(),
            sample_density(),
            t1(),
            t2(),
            OrbitalLabels::none(),
        )
        .unwrap();
        assert!(matches!(
            transformer.transform(&sources),
            Err(EngineError::InputShape(_))
        ));
    }

    // Identity plus off-diagonal entries bounded by 0.15 per element keeps every row
    // strictly diagonally dominant for n <= 5, hence invertible and well conditioned.
    fn well_conditioned(n: usize) -> impl Strategy<Value = DMatrix<f64>> {
        (
            prop::collection::vec(-0.15f64..0.15, n * n),
            prop::collection::vec(0.8f64..1.2, n),
        )
            .prop_map(move |(off, diag)| {
                DMatrix::from_fn(n, n, |r, c| if r == c { diag[r] } else { off[r * n + c] })
            })
    }

    fn symmetric(n: usize) -> impl Strategy<Value = DMatrix<f64>> {
        prop::collection::vec(-2.0f64..2.0, n * n)
            .prop_map(move |v| DMatrix::from_fn(n, n, |r, c| v[r.min(c) * n + r.max(c)]))
    }

    fn round_trip_inputs()
    -> impl Strategy<Value = (DMatrix<f64>, DMatrix<f64>, DMatrix<f64>, DMatrix<f64>)> {
        (1usize..=5).prop_flat_map(|n| {
            (symmetric(n), symmetric(n), well_conditioned(n), well_conditioned(n))
        })
    }

    proptest! {
        #[test]
        fn back_transform_inverts_transform_for_invertible_bases(
            (fock, density, t1, t2) in round_trip_inputs()
        ) {
            let sources = SourceMatrices::new(
                fock.clone(),
                density.clone(),
                t1,
                t2,
                OrbitalLabels::none(),
            )
            .unwrap();
            let transformer = BasisTransformer::from_sources(&sources).unwrap();
            let transformed = transformer.transform(&sources).unwrap();
            let (fock_back, density_back) = transformer.back_transform(&transformed).unwrap();

            for (x, y) in fock_back.iter().zip(fock.iter()) {
                prop_assert!((x - y).abs() < 1e-9, "{} != {}", x, y);
            }
            for (x, y) in density_back.iter().zip(density.iter()) {
                prop_assert!((x - y).abs() < 1e-9, "{} != {}", x, y);
            }
        }

        #[test]
        fn transformed_matrices_stay_symmetric(
            (fock, density, t1, t2) in round_trip_inputs()
        ) {
            let result = transform(fock, density, t1, t2, OrbitalLabels::none()).unwrap();
            let fock = result.fock();
            prop_assert!((fock - fock.transpose()).amax() < 1e-9);
        }
    }
}
