//! File-based configuration.
//!
//! Every key is optional; a missing file section falls back to the built-in
//! defaults. Command-line flags are applied on top by the binary.
//!
//! ```toml
//! [calculator]
//! commission_pct = 15
//! commission_adjustable = false
//! book_portion_pct = 100
//! master_plan_pct = 1
//!
//! [export]
//! output_dir = "."
//! file_stem = "ESI-Channel-ROI-Calculator"
//! background = "#252a2f"
//!
//! [logging]
//! level = "info"
//! file = "roi-calculator.log"
//! ```

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use roi_core::calculations::CommissionRate;
use roi_core::{CalculatorInputs, FieldValue, InputField};

pub const DEFAULT_FILE_STEM: &str = "ESI-Channel-ROI-Calculator";
pub const DEFAULT_BACKGROUND: &str = "#252a2f";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub calculator: CalculatorConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

/// Calculator policy: the commission rate and the starting percentages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Rate applied to the gross management fee, 0–100.
    pub commission_pct: Decimal,
    /// When false the rate is fixed and edits to it are refused.
    pub commission_adjustable: bool,
    pub book_portion_pct: Decimal,
    pub master_plan_pct: Decimal,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            commission_pct: Decimal::new(15, 0),
            commission_adjustable: false,
            book_portion_pct: Decimal::ONE_HUNDRED,
            master_plan_pct: Decimal::ONE,
        }
    }
}

impl CalculatorConfig {
    pub fn commission_rate(&self) -> CommissionRate {
        if self.commission_adjustable {
            CommissionRate::Adjustable
        } else {
            CommissionRate::Fixed(self.commission_pct)
        }
    }

    /// Seeds the configured starting percentages into `inputs`.
    pub fn apply_to(
        &self,
        inputs: &mut CalculatorInputs,
    ) {
        inputs.set_field(
            InputField::CommissionPct,
            FieldValue::Number(self.commission_pct),
        );
        inputs.set_field(
            InputField::BookPortionPct,
            FieldValue::Number(self.book_portion_pct),
        );
        inputs.set_field(
            InputField::MasterPlanPct,
            FieldValue::Number(self.master_plan_pct),
        );
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
    pub file_stem: String,
    /// Page background as `#rrggbb`.
    pub background: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Bare level or any `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Reads and validates a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_hex_color(&self.export.background) {
            return Err(ConfigError::Invalid {
                key: "export.background",
                reason: format!("expected #rrggbb, got '{}'", self.export.background),
            });
        }
        let stem = &self.export.file_stem;
        if stem.trim().is_empty() || stem.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                key: "export.file_stem",
                reason: format!("'{stem}' is not a plain file name"),
            });
        }
        Ok(())
    }
}

fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}
