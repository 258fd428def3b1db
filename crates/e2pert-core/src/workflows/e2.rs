use crate::core::models::interaction::InteractionTable;
use crate::core::models::matrices::{SourceMatrices, TransformedMatrices};
use crate::engine::analysis::InteractionAnalyzer;
use crate::engine::config::AnalysisConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::transform::BasisTransformer;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct E2Result {
    pub transformed: TransformedMatrices,
    pub table: InteractionTable,
}

/// Transforms the NAO-basis matrices to the CLPO basis and runs the interaction scan.
///
/// # Errors
///
/// Fails before any analysis if a transformation matrix is singular, and during the
/// scan if a candidate pair has degenerate orbital energies under
/// [`DegeneracyPolicy::Error`](crate::engine::config::DegeneracyPolicy::Error).
#[instrument(skip_all, name = "e2_workflow")]
pub fn run(
    sources: &SourceMatrices,
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Result<E2Result, EngineError> {
    info!(orbitals = sources.dim(), "Starting E2 analysis.");

    let transformed = reporter.phase("Basis transformation", || {
        let transformer = BasisTransformer::from_sources(sources)?;
        transformer.transform(sources)
    })?;
    info!("Fock and density matrices transformed to the CLPO basis.");

    let table = reporter.phase("Interaction scan", || {
        InteractionAnalyzer::new(config).analyze_with_reporter(&transformed, reporter)
    })?;
    reporter.report(Progress::Message(format!(
        "{} interaction(s) above qCT threshold {}",
        table.len(),
        config.qct_threshold
    )));
    info!(
        interactions = table.len(),
        qct_threshold = config.qct_threshold,
        "Interaction scan finished."
    );

    Ok(E2Result { transformed, table })
}
