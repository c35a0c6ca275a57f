use std::path::Path;

use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Run the reconstruction cascade after the consistency checks.
    #[serde(default = "default_reconstruct")]
    pub reconstruct: bool,
    #[serde(default)]
    pub tolerance: ToleranceConfig,
}

fn default_reconstruct() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reconstruct: true,
            tolerance: ToleranceConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tolerance
// ---------------------------------------------------------------------------

/// Tolerance used when comparing a reconstructed total against an extracted one.
///
/// Checks against tax rates use a relative band of
/// `1 / (relative_scale * total_vat)` plus `absolute_margin`. The check that
/// adds taxes to the excluding-tax total uses a flat `±flat_margin`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToleranceConfig {
    #[serde(default = "default_relative_scale")]
    pub relative_scale: f64,
    #[serde(default = "default_absolute_margin")]
    pub absolute_margin: f64,
    #[serde(default = "default_flat_margin")]
    pub flat_margin: f64,
}

fn default_relative_scale() -> f64 {
    100.0
}

fn default_absolute_margin() -> f64 {
    0.02
}

fn default_flat_margin() -> f64 {
    0.01
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            relative_scale: default_relative_scale(),
            absolute_margin: default_absolute_margin(),
            flat_margin: default_flat_margin(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl EngineConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: EngineConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ReconError> {
        let input = std::fs::read_to_string(path)
            .map_err(|e| ReconError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml(&input)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        let tol = &self.tolerance;
        for (name, value) in [
            ("relative_scale", tol.relative_scale),
            ("absolute_margin", tol.absolute_margin),
            ("flat_margin", tol.flat_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ReconError::ConfigValidation(format!(
                    "tolerance.{name} must be a non-negative number, got {value}"
                )));
            }
        }

        // eps = 1 / (relative_scale * total_vat) is undefined at zero
        if tol.relative_scale == 0.0 {
            return Err(ReconError::ConfigValidation(
                "tolerance.relative_scale must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
