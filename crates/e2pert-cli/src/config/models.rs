use crate::cli::OutputFormat;
use e2pert::engine::config::AnalysisConfig;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct InputPaths {
    pub fock_matrix: PathBuf,
    pub sds_matrix: PathBuf,
    pub clpo2lho_matrix: PathBuf,
    pub lho2nao_matrix: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub inputs: InputPaths,
    pub output_path: PathBuf,
    pub format: OutputFormat,
    pub analysis: AnalysisConfig,
}
