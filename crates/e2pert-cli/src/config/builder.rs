use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, InputPaths};
use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::error::{CliError, Result};
use e2pert::engine::config::{AnalysisConfigBuilder, DegeneracyPolicy};
use e2pert::engine::error::EngineError;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Resolves every setting with the precedence CLI flag > config file > built-in default.
pub fn build_config(args: &AnalyzeArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let input_file = file_config.input.take().unwrap_or_default();
    let inputs = InputPaths {
        fock_matrix: pick_path(
            &args.fock_matrix,
            input_file.fock_matrix,
            defaults.fock_matrix,
        ),
        sds_matrix: pick_path(&args.sds_matrix, input_file.sds_matrix, defaults.sds_matrix),
        clpo2lho_matrix: pick_path(
            &args.clpo2lho_matrix,
            input_file.clpo2lho_matrix,
            defaults.clpo2lho_matrix,
        ),
        lho2nao_matrix: pick_path(
            &args.lho2nao_matrix,
            input_file.lho2nao_matrix,
            defaults.lho2nao_matrix,
        ),
    };

    let output_file = file_config.output.take().unwrap_or_default();
    let output_path = pick_path(&args.output, output_file.path, defaults.output);
    let format = args
        .format
        .or(output_file.format)
        .unwrap_or(defaults.format);

    let analysis_file = file_config.analysis.take().unwrap_or_default();
    let degeneracy = if args.skip_degenerate {
        DegeneracyPolicy::Skip
    } else {
        analysis_file.degeneracy.unwrap_or(defaults.degeneracy)
    };

    let analysis = AnalysisConfigBuilder::new()
        .qct_threshold(
            args.qct_threshold
                .or(analysis_file.qct_threshold)
                .unwrap_or(defaults.qct_threshold),
        )
        .energy_threshold(
            args.energy_threshold
                .or(analysis_file.energy_threshold)
                .unwrap_or(defaults.energy_threshold),
        )
        .degeneracy(degeneracy)
        .build()
        .map_err(EngineError::from)?;

    debug!(?inputs, ?output_path, ?format, ?analysis, "Resolved configuration.");

    Ok(AppConfig {
        inputs,
        output_path,
        format,
        analysis,
    })
}

fn pick_path(cli_arg: &Option<PathBuf>, file_arg: Option<PathBuf>, default_arg: &str) -> PathBuf {
    cli_arg
        .clone()
        .or(file_arg)
        .unwrap_or_else(|| Path::new(default_arg).to_path_buf())
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Argument(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "analysis.qct-threshold" => {
                config
                    .analysis
                    .get_or_insert_with(Default::default)
                    .qct_threshold = Some(parse_value(key, value_str, "float")?);
            }
            "analysis.energy-threshold" => {
                config
                    .analysis
                    .get_or_insert_with(Default::default)
                    .energy_threshold = Some(parse_value(key, value_str, "float")?);
            }
            "analysis.degeneracy" => {
                let policy = match value_str {
                    "error" => DegeneracyPolicy::Error,
                    "skip" => DegeneracyPolicy::Skip,
                    _ => {
                        return Err(CliError::Config(format!(
                            "Invalid value for {}: {} (expected 'error' or 'skip')",
                            key, value_str
                        )));
                    }
                };
                config
                    .analysis
                    .get_or_insert_with(Default::default)
                    .degeneracy = Some(policy);
            }
            "output.path" => {
                config.output.get_or_insert_with(Default::default).path =
                    Some(PathBuf::from(value_str));
            }
            "output.format" => {
                let format = match value_str {
                    "text" => OutputFormat::Text,
                    "csv" => OutputFormat::Csv,
                    _ => {
                        return Err(CliError::Config(format!(
                            "Invalid value for {}: {} (expected 'text' or 'csv')",
                            key, value_str
                        )));
                    }
                };
                config.output.get_or_insert_with(Default::default).format = Some(format);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use e2pert::engine::config::ConfigError;
    use std::fs;
    use tempfile::tempdir;

    fn base_analyze_args() -> AnalyzeArgs {
        AnalyzeArgs {
            fock_matrix: None,
            sds_matrix: None,
            clpo2lho_matrix: None,
            lho2nao_matrix: None,
            output: None,
            format: None,
            config: None,
            qct_threshold: None,
            energy_threshold: None,
            skip_degenerate: false,
            set_values: vec![],
        }
    }

    #[test]
    fn build_config_uses_defaults_without_file_or_flags() {
        let app = build_config(&base_analyze_args()).unwrap();

        assert_eq!(app.inputs.fock_matrix, PathBuf::from("Fock_NAO.txt"));
        assert_eq!(app.inputs.sds_matrix, PathBuf::from("SDS_NAO.txt"));
        assert_eq!(app.inputs.clpo2lho_matrix, PathBuf::from("CLPO2LHO.txt"));
        assert_eq!(app.inputs.lho2nao_matrix, PathBuf::from("LHO2NAO.txt"));
        assert_eq!(app.output_path, PathBuf::from("E2_output.txt"));
        assert_eq!(app.format, OutputFormat::Text);
        assert_eq!(app.analysis.qct_threshold, 0.01);
        assert_eq!(app.analysis.energy_threshold, 0.1);
        assert_eq!(app.analysis.degeneracy, DegeneracyPolicy::Error);
    }

    #[test]
    fn build_config_reads_file_and_merges() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("e2pert.toml");
        fs::write(
            &config_path,
            r#"
            [input]
            fock-matrix = "mol/Fock_NAO.txt"

            [analysis]
            qct-threshold = 0.002
            degeneracy = "skip"
            "#,
        )
        .unwrap();

        let mut args = base_analyze_args();
        args.config = Some(config_path);
        let app = build_config(&args).unwrap();

        assert_eq!(app.inputs.fock_matrix, PathBuf::from("mol/Fock_NAO.txt"));
        assert_eq!(app.inputs.sds_matrix, PathBuf::from("SDS_NAO.txt"));
        assert_eq!(app.analysis.qct_threshold, 0.002);
        assert_eq!(app.analysis.degeneracy, DegeneracyPolicy::Skip);
    }

    #[test]
    fn cli_overrides_file_values() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("e2pert.toml");
        fs::write(
            &config_path,
            "[output]\npath = \"file.txt\"\nformat = \"csv\"\n[analysis]\nqct-threshold = 0.002\n",
        )
        .unwrap();

        let mut args = base_analyze_args();
        args.config = Some(config_path);
        args.output = Some(PathBuf::from("cli.txt"));
        args.format = Some(OutputFormat::Text);
        args.qct_threshold = Some(0.05);
        let app = build_config(&args).unwrap();

        assert_eq!(app.output_path, PathBuf::from("cli.txt"));
        assert_eq!(app.format, OutputFormat::Text);
        assert_eq!(app.analysis.qct_threshold, 0.05);
    }

    #[test]
    fn set_values_override_file() {
        let mut args = base_analyze_args();
        args.set_values = vec![
            "analysis.qct-threshold=0.003".to_string(),
            "analysis.degeneracy=skip".to_string(),
            "output.format=csv".to_string(),
        ];
        let app = build_config(&args).unwrap();

        assert_eq!(app.analysis.qct_threshold, 0.003);
        assert_eq!(app.analysis.degeneracy, DegeneracyPolicy::Skip);
        assert_eq!(app.format, OutputFormat::Csv);
    }

    #[test]
    fn skip_degenerate_flag_wins_over_file() {
        let mut args = base_analyze_args();
        args.set_values = vec!["analysis.degeneracy=error".to_string()];
        args.skip_degenerate = true;
        let app = build_config(&args).unwrap();
        assert_eq!(app.analysis.degeneracy, DegeneracyPolicy::Skip);
    }

    #[test]
    fn malformed_set_value_is_an_argument_error() {
        let mut args = base_analyze_args();
        args.set_values = vec!["analysis.qct-threshold".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Argument(_))));
    }

    #[test]
    fn unknown_set_key_is_a_config_error() {
        let mut args = base_analyze_args();
        args.set_values = vec!["analysis.cutoff=1".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }

    #[test]
    fn non_finite_threshold_is_rejected() {
        let mut args = base_analyze_args();
        args.qct_threshold = Some(f64::INFINITY);
        assert!(matches!(
            build_config(&args),
            Err(CliError::Core(EngineError::Config(
                ConfigError::NonFiniteThreshold {
                    name: "qct_threshold",
                    ..
                }
            )))
        ));
    }

    #[test]
    fn non_finite_threshold_from_set_value_is_rejected() {
        let mut args = base_analyze_args();
        args.set_values = vec!["analysis.energy-threshold=NaN".to_string()];
        let err = build_config(&args).unwrap_err();
        assert!(matches!(
            err,
            CliError::Core(EngineError::Config(ConfigError::NonFiniteThreshold {
                name: "energy_threshold",
                ..
            }))
        ));
        assert!(err.to_string().contains("energy_threshold"));
    }
}
