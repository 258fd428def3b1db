use nalgebra::DMatrix;
use thiserror::Error;

const UNKNOWN_LABEL: &str = "unknown";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Matrix '{name}' is empty")]
    Empty { name: &'static str },

    #[error("Matrix '{name}' is not square ({rows}x{cols})")]
    NotSquare {
        name: &'static str,
        rows: usize,
        cols: usize,
    },

    #[error("Matrix '{name}' has dimension {found}, expected {expected}")]
    DimensionMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Expected {expected} orbital labels, found {found}")]
    LabelCount { expected: usize, found: usize },
}

/// Returns the dimension of a non-empty square matrix.
pub fn square_dimension(name: &'static str, matrix: &DMatrix<f64>) -> Result<usize, ShapeError> {
    let (rows, cols) = matrix.shape();
    if rows == 0 || cols == 0 {
        return Err(ShapeError::Empty { name });
    }
    if rows != cols {
        return Err(ShapeError::NotSquare { name, rows, cols });
    }
    Ok(rows)
}

pub(crate) fn expect_dimension(
    name: &'static str,
    matrix: &DMatrix<f64>,
    expected: usize,
) -> Result<(), ShapeError> {
    let found = square_dimension(name, matrix)?;
    if found != expected {
        return Err(ShapeError::DimensionMismatch {
            name,
            expected,
            found,
        });
    }
    Ok(())
}

/// Display names of the orbitals, matched to orbital indices by position.
///
/// Labels never take part in the computation. When no labels were supplied every
/// orbital is reported as `unknown`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrbitalLabels(Option<Vec<String>>);

impl OrbitalLabels {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn new(labels: Vec<String>) -> Self {
        Self(Some(labels))
    }

    pub fn len(&self) -> Option<usize> {
        self.0.as_ref().map(Vec::len)
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn get(&self, index: usize) -> &str {
        self.0
            .as_ref()
            .and_then(|labels| labels.get(index))
            .map_or(UNKNOWN_LABEL, String::as_str)
    }

    pub(crate) fn check_dimension(&self, expected: usize) -> Result<(), ShapeError> {
        match self.len() {
            Some(found) if found != expected => Err(ShapeError::LabelCount { expected, found }),
            _ => Ok(()),
        }
    }
}

impl From<Vec<String>> for OrbitalLabels {
    fn from(labels: Vec<String>) -> Self {
        Self::new(labels)
    }
}

impl From<Option<Vec<String>>> for OrbitalLabels {
    fn from(labels: Option<Vec<String>>) -> Self {
        Self(labels)
    }
}

/// The four matrices read from the orbital-analysis output, in the NAO basis,
/// together with the CLPO labels.
///
/// Construction validates that every matrix is square and that all matrices and the
/// label list share one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceMatrices {
    fock: DMatrix<f64>,
    density: DMatrix<f64>,
    clpo_to_lho: DMatrix<f64>,
    lho_to_nao: DMatrix<f64>,
    labels: OrbitalLabels,
}

impl SourceMatrices {
    pub fn new(
        fock: DMatrix<f64>,
        density: DMatrix<f64>,
        clpo_to_lho: DMatrix<f64>,
        lho_to_nao: DMatrix<f64>,
        labels: OrbitalLabels,
    ) -> Result<Self, ShapeError> {
        let n = square_dimension("Fock (NAO)", &fock)?;
        expect_dimension("density (NAO)", &density, n)?;
        expect_dimension("CLPO→LHO", &clpo_to_lho, n)?;
        expect_dimension("LHO→NAO", &lho_to_nao, n)?;
        labels.check_dimension(n)?;

        Ok(Self {
            fock,
            density,
            clpo_to_lho,
            lho_to_nao,
            labels,
        })
    }

    pub fn dim(&self) -> usize {
        self.fock.nrows()
    }

    pub fn fock(&self) -> &DMatrix<f64> {
        &self.fock
    }

    pub fn density(&self) -> &DMatrix<f64> {
        &self.density
    }

    pub fn clpo_to_lho(&self) -> &DMatrix<f64> {
        &self.clpo_to_lho
    }

    pub fn lho_to_nao(&self) -> &DMatrix<f64> {
        &self.lho_to_nao
    }

    pub fn labels(&self) -> &OrbitalLabels {
        &self.labels
    }
}

/// Fock and density matrices expressed in the localized (CLPO) basis.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedMatrices {
    fock: DMatrix<f64>,
    density: DMatrix<f64>,
    labels: OrbitalLabels,
}

impl TransformedMatrices {
    pub fn new(
        fock: DMatrix<f64>,
        density: DMatrix<f64>,
        labels: OrbitalLabels,
    ) -> Result<Self, ShapeError> {
        let n = square_dimension("Fock", &fock)?;
        expect_dimension("density", &density, n)?;
        labels.check_dimension(n)?;
        Ok(Self {
            fock,
            density,
            labels,
        })
    }

    pub fn dim(&self) -> usize {
        self.fock.nrows()
    }

    pub fn fock(&self) -> &DMatrix<f64> {
        &self.fock
    }

    pub fn density(&self) -> &DMatrix<f64> {
        &self.density
    }

    pub fn labels(&self) -> &OrbitalLabels {
        &self.labels
    }

    /// Occupancy of orbital `index` (diagonal of the density matrix).
    pub fn occupancy(&self, index: usize) -> f64 {
        self.density[(index, index)]
    }

    /// Energy of orbital `index` in Hartree (diagonal of the Fock matrix).
    pub fn orbital_energy(&self, index: usize) -> f64 {
        self.fock[(index, index)]
    }

    pub fn into_parts(self) -> (DMatrix<f64>, DMatrix<f64>, OrbitalLabels) {
        (self.fock, self.density, self.labels)
    }
}
