use crate::cli::OutputFormat;
use e2pert::engine::config::{DEFAULT_ENERGY_THRESHOLD, DEFAULT_QCT_THRESHOLD, DegeneracyPolicy};

/// Built-in values used when neither the CLI nor the config file sets a parameter.
/// File names match what JANPA writes by default.
pub struct DefaultsConfig {
    pub fock_matrix: &'static str,
    pub sds_matrix: &'static str,
    pub clpo2lho_matrix: &'static str,
    pub lho2nao_matrix: &'static str,
    pub output: &'static str,
    pub format: OutputFormat,
    pub qct_threshold: f64,
    pub energy_threshold: f64,
    pub degeneracy: DegeneracyPolicy,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            fock_matrix: "Fock_NAO.txt",
            sds_matrix: "SDS_NAO.txt",
            clpo2lho_matrix: "CLPO2LHO.txt",
            lho2nao_matrix: "LHO2NAO.txt",
            output: "E2_output.txt",
            format: OutputFormat::Text,
            qct_threshold: DEFAULT_QCT_THRESHOLD,
            energy_threshold: DEFAULT_ENERGY_THRESHOLD,
            degeneracy: DegeneracyPolicy::Error,
        }
    }
}
