//! Top-level Faultline configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, EngineChoice, LayoutConfig};
use crate::errors::ConfigError;

/// Name of the project-level config file looked up under a root directory.
pub const PROJECT_CONFIG_FILE: &str = "faultline.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`FAULTLINE_*`)
/// 2. Project config (`faultline.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FaultlineConfig {
    pub analysis: AnalysisConfig,
    pub layout: LayoutConfig,
}

impl FaultlineConfig {
    /// Load configuration for a project rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;

        tracing::debug!(root = %root.display(), "configuration resolved");
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &FaultlineConfig) -> Result<(), ConfigError> {
        let positive = [
            ("layout.column_spacing", config.layout.column_spacing),
            ("layout.row_height", config.layout.row_height),
        ];
        for (field, value) in positive {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(invalid(field, "must be a finite number greater than 0"));
                }
            }
        }
        if let Some(offset) = config.layout.annotation_offset {
            if !offset.is_finite() || offset < 0.0 {
                return Err(invalid(
                    "layout.annotation_offset",
                    "must be a finite number of at least 0",
                ));
            }
        }
        if let Some(ref label) = config.layout.system_label {
            if label.trim().is_empty() {
                return Err(invalid("layout.system_label", "must not be empty"));
            }
        }
        if let Some(ref prefix) = config.layout.annotation_prefix {
            if prefix.trim().is_empty() {
                return Err(invalid("layout.annotation_prefix", "must not be empty"));
            }
        }
        if config.layout.max_fixup_passes == Some(0) {
            return Err(invalid("layout.max_fixup_passes", "must be greater than 0"));
        }
        if config.analysis.matrix_engine_limit == Some(0) {
            return Err(invalid(
                "analysis.matrix_engine_limit",
                "must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut FaultlineConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: FaultlineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `Some` values in `other` win.
    fn merge(base: &mut FaultlineConfig, other: &FaultlineConfig) {
        // Analysis
        if other.analysis.reachability_engine.is_some() {
            base.analysis.reachability_engine = other.analysis.reachability_engine;
        }
        if other.analysis.matrix_engine_limit.is_some() {
            base.analysis.matrix_engine_limit = other.analysis.matrix_engine_limit;
        }

        // Layout
        if other.layout.column_spacing.is_some() {
            base.layout.column_spacing = other.layout.column_spacing;
        }
        if other.layout.row_height.is_some() {
            base.layout.row_height = other.layout.row_height;
        }
        if other.layout.annotation_offset.is_some() {
            base.layout.annotation_offset = other.layout.annotation_offset;
        }
        if other.layout.system_label.is_some() {
            base.layout.system_label = other.layout.system_label.clone();
        }
        if other.layout.annotation_prefix.is_some() {
            base.layout.annotation_prefix = other.layout.annotation_prefix.clone();
        }
        if other.layout.max_fixup_passes.is_some() {
            base.layout.max_fixup_passes = other.layout.max_fixup_passes;
        }
    }

    /// Apply environment variable overrides.
    /// Unparsable values are ignored with a warning.
    fn apply_env_overrides(config: &mut FaultlineConfig) {
        if let Ok(val) = std::env::var("FAULTLINE_REACHABILITY_ENGINE") {
            match EngineChoice::parse(&val) {
                Some(engine) => config.analysis.reachability_engine = Some(engine),
                None => tracing::warn!(value = %val, "ignoring FAULTLINE_REACHABILITY_ENGINE"),
            }
        }
        if let Ok(val) = std::env::var("FAULTLINE_MATRIX_ENGINE_LIMIT") {
            match val.parse::<usize>() {
                Ok(v) => config.analysis.matrix_engine_limit = Some(v),
                Err(_) => tracing::warn!(value = %val, "ignoring FAULTLINE_MATRIX_ENGINE_LIMIT"),
            }
        }
        if let Ok(val) = std::env::var("FAULTLINE_COLUMN_SPACING") {
            match val.parse::<f64>() {
                Ok(v) => config.layout.column_spacing = Some(v),
                Err(_) => tracing::warn!(value = %val, "ignoring FAULTLINE_COLUMN_SPACING"),
            }
        }
        if let Ok(val) = std::env::var("FAULTLINE_ROW_HEIGHT") {
            match val.parse::<f64>() {
                Ok(v) => config.layout.row_height = Some(v),
                Err(_) => tracing::warn!(value = %val, "ignoring FAULTLINE_ROW_HEIGHT"),
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
