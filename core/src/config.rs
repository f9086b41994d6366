//! # Configuration
//!
//! Engine settings, loadable from YAML or JSON. Every field has a default, so
//! an empty file (or no file) yields the stock Swagger 1.5 targets.
//!
//! ```yaml
//! contract: full
//! import-policy: deduplicate
//! targets:
//!   api-model-property: io.swagger.annotations.ApiModelProperty
//! ```

use crate::engine::ImportPolicy;
use crate::error::{AppError, AppResult};
use crate::schema::{AutoApi, AutoApiModel, AutoApiModelProperty, Contract, MarkerSchema};
use crate::tree::QualifiedName;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Target annotation per marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct TargetNames {
    /// Target of `AutoApi`.
    pub api: QualifiedName,
    /// Target of `AutoApiModel`.
    pub api_model: QualifiedName,
    /// Target of `AutoApiModelProperty`.
    pub api_model_property: QualifiedName,
}

impl Default for TargetNames {
    fn default() -> Self {
        Self {
            api: builtin_target::<AutoApi>(),
            api_model: builtin_target::<AutoApiModel>(),
            api_model_property: builtin_target::<AutoApiModelProperty>(),
        }
    }
}

fn builtin_target<M: MarkerSchema>() -> QualifiedName {
    QualifiedName::parse(M::DEFAULT_TARGET).expect("built-in target names are valid")
}

/// Settings shared by every processor of a round.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct EngineConfig {
    /// Which marker fields are forwarded.
    pub contract: Contract,
    /// Whether imports are deduplicated.
    pub import_policy: ImportPolicy,
    /// Target annotation names.
    pub targets: TargetNames,
}

impl EngineConfig {
    /// Parses a YAML document.
    pub fn from_yaml_str(text: &str) -> AppResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parses a JSON document.
    pub fn from_json_str(text: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a config file; `.json` is read as JSON, `.yaml`/`.yml` as YAML.
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = fs::read_to_string(path)?;
        let config = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text)?,
            _ => {
                return Err(AppError::General(format!(
                    "Unsupported config format: {:?}",
                    path
                )))
            }
        };
        tracing::debug!(path = %path.display(), ?config, "loaded engine config");
        Ok(config)
    }
}
