use std::fmt;
use std::str::FromStr;

use pmst_core::errors::{ErrorInfo, PmstError};
use pmst_core::CostVector;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Search formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// One active label per state, waiting buckets per incoming edge.
    #[default]
    Primary,
    /// Per-state open lists with growth-order symmetry breaking.
    Alternative,
}

impl Algorithm {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Primary => "primary",
            Algorithm::Alternative => "alternative",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = PmstError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "primary" => Ok(Algorithm::Primary),
            "alternative" => Ok(Algorithm::Alternative),
            other => Err(PmstError::Config(
                ErrorInfo::new("unknown-algorithm", format!("unknown algorithm '{other}'"))
                    .with_hint("use 'primary' or 'alternative'"),
            )),
        }
    }
}

/// Parameters of a single search run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig<const D: usize> {
    /// Formulation to run.
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Largest accepted node count of the searched graph.
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,
    /// Extractions between progress log lines (0 disables them).
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
    /// Candidates strictly worse than this vector in every component are discarded.
    #[serde(default)]
    pub dominance_bound: Option<CostVector<D>>,
}

fn default_max_nodes() -> usize {
    30
}

fn default_progress_interval() -> u64 {
    1_000_000
}

impl<const D: usize> Default for SearchConfig<D> {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            max_nodes: default_max_nodes(),
            progress_interval: default_progress_interval(),
            dominance_bound: None,
        }
    }
}

impl<const D: usize> SearchConfig<D> {
    /// Default configuration for `algorithm`.
    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            ..Self::default()
        }
    }

    /// Checks ranges.
    pub fn validate(&self) -> Result<(), PmstError> {
        if self.max_nodes == 0 || self.max_nodes > usize::BITS as usize {
            return Err(PmstError::Config(
                ErrorInfo::new("max-nodes", "max_nodes must lie in 1..=usize::BITS")
                    .with_context("max_nodes", self.max_nodes),
            ));
        }
        Ok(())
    }
}

/// Deterministic seeding configuration for generated inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for graph generation.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label recorded with the run.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// YAML-configurable parameters of a full run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig<const D: usize> {
    /// Search parameters.
    #[serde(default)]
    pub search: SearchConfig<D>,
    /// Classify red/blue edges and contract blue components before searching.
    #[serde(default = "default_preprocess")]
    pub preprocess: bool,
    /// Seeding for generated inputs.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
}

fn default_preprocess() -> bool {
    true
}

impl<const D: usize> Default for RunConfig<D> {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            preprocess: default_preprocess(),
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl<const D: usize> RunConfig<D> {
    /// Parses and validates a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, PmstError> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|err| {
            PmstError::Config(ErrorInfo::new("parse-yaml", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the configuration as YAML.
    pub fn to_yaml(&self) -> Result<String, PmstError> {
        serde_yaml::to_string(self)
            .map_err(|err| PmstError::Config(ErrorInfo::new("render-yaml", err.to_string())))
    }

    /// Checks every section.
    pub fn validate(&self) -> Result<(), PmstError> {
        self.search.validate()
    }

    /// SHA-256 of the YAML rendering, recorded in run provenance.
    pub fn hash(&self) -> Result<String, PmstError> {
        let yaml = self.to_yaml()?;
        Ok(format!("{:x}", Sha256::digest(yaml.as_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_yields_defaults() {
        let config: RunConfig<2> = RunConfig::from_yaml("{}").unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.search.max_nodes, 30);
        assert!(config.preprocess);
    }

    #[test]
    fn parses_bound_and_algorithm() {
        let yaml = "search:\n  algorithm: alternative\n  dominance_bound: [10, 20, 30]\n\
                    preprocess: false\n";
        let config: RunConfig<3> = RunConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.search.algorithm, Algorithm::Alternative);
        assert_eq!(config.search.dominance_bound, Some(CostVector::new([10, 20, 30])));
        assert!(!config.preprocess);
        let again: RunConfig<3> = RunConfig::from_yaml(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(again, config);
        assert_eq!(again.hash().unwrap(), config.hash().unwrap());
    }

    #[test]
    fn rejects_bad_values() {
        let err = RunConfig::<2>::from_yaml("search:\n  max_nodes: 0\n").unwrap_err();
        assert_eq!(err.code(), "max-nodes");
        let err = RunConfig::<2>::from_yaml("search:\n  dominance_bound: [1, 2, 3]\n").unwrap_err();
        assert_eq!(err.code(), "parse-yaml");
        assert_eq!("primary".parse::<Algorithm>().unwrap(), Algorithm::Primary);
        assert!("bfs".parse::<Algorithm>().is_err());
    }
}
