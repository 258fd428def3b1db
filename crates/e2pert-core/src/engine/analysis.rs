//! Second-order donor→acceptor perturbation scan over the CLPO basis.
//!
//! For every ordered pair `(i, j)`, `i ≠ j`, where orbital `i` holds more than one
//! electron, orbital `j` less than one, and `j` is less occupied than `i`:
//!
//! ```text
//! E2  = 2 · (F_ij / (F_ii − F_jj))² · (F_jj − F_ii) · 627.509   [kcal/mol]
//! qCT = D_ij² / D_ii                                             [e]
//! ```
//!
//! A record is kept when `qCT` exceeds the configured threshold; the degenerate-energy
//! policy only applies to pairs that pass that filter. Pairs are visited with
//! the donor index in the outer loop and the acceptor index in the inner loop, and the
//! result keeps that order.

use crate::core::models::interaction::{InteractionRecord, InteractionTable, OrbitalRef};
use crate::core::models::matrices::{OrbitalLabels, TransformedMatrices};
use crate::engine::config::{AnalysisConfig, DegeneracyPolicy};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::DMatrix;
use tracing::{debug, instrument, trace, warn};

pub const HARTREE_TO_KCAL_MOL: f64 = 627.509;

const DONOR_MIN_OCCUPANCY: f64 = 1.0;
const ACCEPTOR_MAX_OCCUPANCY: f64 = 1.0;

const OCCUPANCY_DECIMALS: usize = 4;
const ENERGY_DECIMALS: usize = 2;

pub struct InteractionAnalyzer<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> InteractionAnalyzer<'a> {
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, matrices: &TransformedMatrices) -> Result<InteractionTable, EngineError> {
        self.analyze_with_reporter(matrices, &ProgressReporter::new())
    }

    /// Scans all ordered orbital pairs, reporting one task step per donor row.
    #[instrument(skip_all, name = "interaction_scan")]
    pub fn analyze_with_reporter(
        &self,
        matrices: &TransformedMatrices,
        reporter: &ProgressReporter,
    ) -> Result<InteractionTable, EngineError> {
        let n = matrices.dim();
        debug!(
            orbitals = n,
            qct_threshold = self.config.qct_threshold,
            energy_threshold = self.config.energy_threshold,
            "Scanning donor/acceptor pairs."
        );

        reporter.report(Progress::TaskStart {
            total_steps: n as u64,
        });

        let mut table = InteractionTable::new();
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                if let Some(record) = self.scan_pair(matrices, i, j)? {
                    trace!(donor = i, acceptor = j, e2 = record.e2_energy, "Interaction kept.");
                    table.push(record);
                }
            }
            reporter.report(Progress::TaskIncrement);
        }

        reporter.report(Progress::TaskFinish);
        Ok(table)
    }

    fn scan_pair(
        &self,
        matrices: &TransformedMatrices,
        i: usize,
        j: usize,
    ) -> Result<Option<InteractionRecord>, EngineError> {
        let d_ii = matrices.occupancy(i);
        let d_jj = matrices.occupancy(j);
        if !is_donor_acceptor_pair(d_ii, d_jj) {
            return Ok(None);
        }

        let charge_transfer = charge_transfer(matrices.density(), i, j);
        let above_threshold = charge_transfer > self.config.qct_threshold;
        if !above_threshold {
            return Ok(None);
        }

        let Some(e2_energy) = e2_energy(matrices.fock(), i, j) else {
            return self.handle_degenerate(matrices, i, j);
        };

        Ok(Some(InteractionRecord {
            donor: orbital_ref(matrices.labels(), i),
            acceptor: orbital_ref(matrices.labels(), j),
            donor_occupancy: round_to(d_ii, OCCUPANCY_DECIMALS),
            acceptor_occupancy: round_to(d_jj, OCCUPANCY_DECIMALS),
            charge_transfer: round_to(charge_transfer, OCCUPANCY_DECIMALS),
            e2_energy: round_to(e2_energy, ENERGY_DECIMALS),
        }))
    }

    fn handle_degenerate(
        &self,
        matrices: &TransformedMatrices,
        i: usize,
        j: usize,
    ) -> Result<Option<InteractionRecord>, EngineError> {
        let donor = orbital_ref(matrices.labels(), i).to_string();
        let acceptor = orbital_ref(matrices.labels(), j).to_string();
        let energy = matrices.orbital_energy(i);
        match self.config.degeneracy {
            DegeneracyPolicy::Error => Err(EngineError::DegenerateEnergy {
                donor,
                acceptor,
                energy,
            }),
            DegeneracyPolicy::Skip => {
                warn!(
                    %donor,
                    %acceptor,
                    energy,
                    "Skipping pair with degenerate orbital energies; E2 is undefined."
                );
                Ok(None)
            }
        }
    }
}

/// Runs the scan with explicit thresholds and the default degeneracy policy.
pub fn analyze(
    fock: DMatrix<f64>,
    density: DMatrix<f64>,
    labels: OrbitalLabels,
    qct_threshold: f64,
    energy_threshold: f64,
) -> Result<InteractionTable, EngineError> {
    let matrices = TransformedMatrices::new(fock, density, labels)?;
    let config = AnalysisConfig {
        qct_threshold,
        energy_threshold,
        ..AnalysisConfig::default()
    };
    InteractionAnalyzer::new(&config).analyze(&matrices)
}

#[inline]
fn is_donor_acceptor_pair(d_ii: f64, d_jj: f64) -> bool {
    d_ii > DONOR_MIN_OCCUPANCY && d_jj < ACCEPTOR_MAX_OCCUPANCY && d_jj < d_ii
}

#[inline]
fn charge_transfer(density: &DMatrix<f64>, i: usize, j: usize) -> f64 {
    let d_ij = density[(i, j)];
    d_ij * d_ij / density[(i, i)]
}

/// Returns `None` when the orbital energies coincide or the result is not finite.
fn e2_energy(fock: &DMatrix<f64>, i: usize, j: usize) -> Option<f64> {
    let e_ii = fock[(i, i)];
    let e_jj = fock[(j, j)];
    if e_ii == e_jj {
        return None;
    }

    let e_ij = fock[(i, j)];
    let qct_raw = 2.0 * (e_ij / (e_ii - e_jj)).powi(2);
    let e2_energy = qct_raw * (e_jj - e_ii) * HARTREE_TO_KCAL_MOL;
    e2_energy.is_finite().then_some(e2_energy)
}

fn orbital_ref(labels: &OrbitalLabels, index: usize) -> OrbitalRef {
    OrbitalRef::new(index, labels.get(index))
}

/// Rounds the exact binary value to `decimals` places, ties to even.
fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}
