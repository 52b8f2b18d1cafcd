/// Simulation settings shared by the executor and the CLI.
use crate::core::{QftMode, MAX_QUBITS};
use crate::error::CircuitError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Largest register a program may declare. Never above [`MAX_QUBITS`].
    pub max_qubits: usize,
    /// Construction used for `qft` records.
    pub qft_mode: QftMode,
    /// Fixed measurement seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Probability below which a basis state is left out of reports.
    pub probability_threshold: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_qubits: 24,
            qft_mode: QftMode::Matrix,
            seed: None,
            probability_threshold: 1e-10,
        }
    }
}

impl SimConfig {
    /// Reproducible runs: fixed seed, otherwise default.
    pub fn deterministic(seed: u64) -> Self {
        Self { seed: Some(seed), ..Default::default() }
    }

    pub fn with_qft_mode(mut self, mode: QftMode) -> Self {
        self.qft_mode = mode;
        self
    }

    /// Parse and validate a JSON document. Missing keys take their defaults.
    pub fn from_json(text: &str) -> Result<Self, CircuitError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| CircuitError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CircuitError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CircuitError::Config(format!("cannot read '{}': {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), CircuitError> {
        if self.max_qubits == 0 || self.max_qubits > MAX_QUBITS {
            return Err(CircuitError::Config(format!(
                "max_qubits must be between 1 and {MAX_QUBITS}, got {}",
                self.max_qubits
            )));
        }
        if !(0.0..1.0).contains(&self.probability_threshold) {
            return Err(CircuitError::Config(format!(
                "probability_threshold must be in [0, 1), got {}",
                self.probability_threshold
            )));
        }
        Ok(())
    }

    /// Reject a register wider than `max_qubits` before anything is allocated.
    pub fn check_width(&self, num_qubits: usize) -> Result<(), CircuitError> {
        if num_qubits > self.max_qubits {
            return Err(CircuitError::validation(format!(
                "program declares {num_qubits} qubits but the configured limit is {}",
                self.max_qubits
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_width() {
        let config = SimConfig::default();
        assert!(config.check_width(24).is_ok());
        let err = config.check_width(30).unwrap_err();
        assert!(matches!(err, CircuitError::Validation { .. }));
        assert!(err.to_string().contains("30 qubits but the configured limit is 24"));
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = SimConfig::default();
        assert_eq!(config.max_qubits, 24);
        assert_eq!(config.qft_mode, QftMode::Matrix);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = SimConfig::from_json(r#"{ "seed": 7, "qft_mode": "controlled" }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.qft_mode, QftMode::Controlled);
        assert_eq!(config.max_qubits, 24);
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimConfig::deterministic(3).with_qft_mode(QftMode::Decomposed);
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(SimConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_out_of_range_limits() {
        assert!(matches!(
            SimConfig::from_json(r#"{ "max_qubits": 0 }"#),
            Err(CircuitError::Config(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{ "max_qubits": 31 }"#),
            Err(CircuitError::Config(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{ "probability_threshold": 1.5 }"#),
            Err(CircuitError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(SimConfig::from_json("{ max_qubits"), Err(CircuitError::Config(_))));
        assert!(matches!(
            SimConfig::from_json(r#"{ "qft_mode": "fast" }"#),
            Err(CircuitError::Config(_))
        ));
    }
}
