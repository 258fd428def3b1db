use crate::cli::OutputFormat;
use crate::error::{CliError, Result};
use e2pert::engine::config::DegeneracyPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileInputConfig {
    pub fock_matrix: Option<PathBuf>,
    pub sds_matrix: Option<PathBuf>,
    pub clpo2lho_matrix: Option<PathBuf>,
    pub lho2nao_matrix: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    pub path: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileAnalysisConfig {
    pub qct_threshold: Option<f64>,
    pub energy_threshold: Option<f64>,
    pub degeneracy: Option<DegeneracyPolicy>,
}

/// Contents of the optional TOML configuration file. Every field may be omitted.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub input: Option<FileInputConfig>,
    pub output: Option<FileOutputConfig>,
    pub analysis: Option<FileAnalysisConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = FileConfig::from_toml(
            r#"
            [input]
            fock-matrix = "run1/Fock_NAO.txt"
            sds-matrix = "run1/SDS_NAO.txt"
            clpo2lho-matrix = "run1/CLPO2LHO.txt"
            lho2nao-matrix = "run1/LHO2NAO.txt"

            [output]
            path = "run1/E2.csv"
            format = "csv"

            [analysis]
            qct-threshold = 0.005
            energy-threshold = 0.5
            degeneracy = "skip"
            "#,
        )
        .unwrap();

        let input = config.input.unwrap();
        assert_eq!(input.fock_matrix, Some(PathBuf::from("run1/Fock_NAO.txt")));
        assert_eq!(input.lho2nao_matrix, Some(PathBuf::from("run1/LHO2NAO.txt")));
        let output = config.output.unwrap();
        assert_eq!(output.format, Some(OutputFormat::Csv));
        let analysis = config.analysis.unwrap();
        assert_eq!(analysis.qct_threshold, Some(0.005));
        assert_eq!(analysis.degeneracy, Some(DegeneracyPolicy::Skip));
    }

    #[test]
    fn empty_config_is_valid() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = FileConfig::from_toml("[analysis]\nqct = 0.1\n");
        assert!(result.is_err());
    }

    #[test]
    fn from_file_wraps_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e2pert.toml");
        std::fs::write(&path, "[analysis\n").unwrap();

        let result = FileConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { path: p, .. }) if p == path));
    }
}
