use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_QCT_THRESHOLD: f64 = 0.01;
pub const DEFAULT_ENERGY_THRESHOLD: f64 = 0.1;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Parameter '{name}' must be a finite number (got {value})")]
    NonFiniteThreshold { name: &'static str, value: f64 },
}

/// What to do with a donor/acceptor pair whose orbital energies coincide, where the
/// perturbation denominator vanishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegeneracyPolicy {
    /// Abort the analysis with [`EngineError::DegenerateEnergy`](super::error::EngineError::DegenerateEnergy).
    #[default]
    Error,
    /// Drop the pair and log a warning.
    Skip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Minimum charge transfer (exclusive) for a pair to be reported, in electrons.
    pub qct_threshold: f64,
    /// Accepted and carried through, but not applied as a filter.
    pub energy_threshold: f64,
    pub degeneracy: DegeneracyPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            qct_threshold: DEFAULT_QCT_THRESHOLD,
            energy_threshold: DEFAULT_ENERGY_THRESHOLD,
            degeneracy: DegeneracyPolicy::default(),
        }
    }
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    qct_threshold: Option<f64>,
    energy_threshold: Option<f64>,
    degeneracy: Option<DegeneracyPolicy>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn qct_threshold(mut self, threshold: f64) -> Self {
        self.qct_threshold = Some(threshold);
        self
    }
    pub fn energy_threshold(mut self, threshold: f64) -> Self {
        self.energy_threshold = Some(threshold);
        self
    }
    pub fn degeneracy(mut self, policy: DegeneracyPolicy) -> Self {
        self.degeneracy = Some(policy);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        let qct_threshold = self
            .qct_threshold
            .ok_or(ConfigError::MissingParameter("qct_threshold"))?;
        let energy_threshold = self
            .energy_threshold
            .ok_or(ConfigError::MissingParameter("energy_threshold"))?;

        check_finite("qct_threshold", qct_threshold)?;
        check_finite("energy_threshold", energy_threshold)?;

        Ok(AnalysisConfig {
            qct_threshold,
            energy_threshold,
            degeneracy: self.degeneracy.unwrap_or_default(),
        })
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFiniteThreshold { name, value })
    }
}
