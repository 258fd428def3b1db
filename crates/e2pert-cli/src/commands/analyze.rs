use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::config::{self, AppConfig, InputPaths};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use e2pert::{
    core::io::janpa::{JanpaFile, JanpaMatrix},
    core::io::table::{CsvTable, TableError, TextTable},
    core::io::traits::{MatrixFile, TableFile},
    core::models::interaction::InteractionTable,
    core::models::matrices::SourceMatrices,
    engine::progress::ProgressReporter,
    workflows,
};
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let app_config = config::build_config(&args)?;
    run_with_config(&app_config, &CliProgressHandler::new())
}

pub(crate) fn run_with_config(app_config: &AppConfig, progress: &CliProgressHandler) -> Result<()> {
    let sources = load_sources(&app_config.inputs)?;
    info!(orbitals = sources.dim(), "Loaded JANPA matrices.");

    let reporter = ProgressReporter::with_callback(progress.get_callback());
    let result = workflows::e2::run(&sources, &app_config.analysis, &reporter);
    progress.clear();
    let result = result?;

    if result.table.is_empty() {
        warn!(
            "No donor-acceptor interactions above qCT threshold {}.",
            app_config.analysis.qct_threshold
        );
    }

    let rendered = render(&result.table, app_config.format).map_err(|e| CliError::Output {
        path: app_config.output_path.clone(),
        source: e,
    })?;

    info!("Writing {} interaction(s) to {:?}", result.table.len(), &app_config.output_path);
    std::fs::write(&app_config.output_path, &rendered).map_err(|e| CliError::Output {
        path: app_config.output_path.clone(),
        source: e.into(),
    })?;

    print!("{}", String::from_utf8_lossy(&rendered));
    println!(
        "{} interaction(s) written to: {}",
        result.table.len(),
        app_config.output_path.display()
    );

    Ok(())
}

fn load_sources(inputs: &InputPaths) -> Result<SourceMatrices> {
    info!("Loading Fock matrix from {:?}", &inputs.fock_matrix);
    let fock = read_matrix(&inputs.fock_matrix)?;
    info!("Loading density matrix from {:?}", &inputs.sds_matrix);
    let density = read_matrix(&inputs.sds_matrix)?;
    info!("Loading CLPO→LHO matrix from {:?}", &inputs.clpo2lho_matrix);
    let clpo_to_lho = read_matrix(&inputs.clpo2lho_matrix)?;
    info!("Loading LHO→NAO matrix from {:?}", &inputs.lho2nao_matrix);
    let lho_to_nao = read_matrix(&inputs.lho2nao_matrix)?;

    if !clpo_to_lho.labels.is_present() {
        warn!("CLPO→LHO file has no orbital labels; orbitals will be reported as 'unknown'.");
    }

    SourceMatrices::new(
        fock.matrix,
        density.matrix,
        clpo_to_lho.matrix,
        lho_to_nao.matrix,
        clpo_to_lho.labels,
    )
    .map_err(|e| CliError::Core(e.into()))
}

fn read_matrix(path: &Path) -> Result<JanpaMatrix> {
    JanpaFile::read_from_path(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

fn render(
    table: &InteractionTable,
    format: OutputFormat,
) -> std::result::Result<Vec<u8>, TableError> {
    match format {
        OutputFormat::Text => TextTable::to_bytes(table),
        OutputFormat::Csv => CsvTable::to_bytes(table),
    }
}
