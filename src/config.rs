//! CLI defaults parsed from environment variables.

pub const SCALE_VAR: &str = "TIKZGRID_SCALE";
pub const ROTATION_VAR: &str = "TIKZGRID_ROTATION_DEG";
pub const SCALE_FLAG: &str = "--scale";
pub const ROTATION_FLAG: &str = "--rotation";

pub const DEFAULT_SCALE: f64 = 1.0;
pub const DEFAULT_ROTATION_DEG: f64 = 0.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a number: {value}")]
    NotANumber { var: &'static str, value: String },
    #[error("{var} must be finite and positive: {value}")]
    OutOfRange { var: &'static str, value: String },
}

/// Placement applied to imported coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CliConfig {
    pub scale: f64,
    /// Clockwise, in degrees.
    pub rotation_deg: f64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self { scale: DEFAULT_SCALE, rotation_deg: DEFAULT_ROTATION_DEG }
    }
}

impl CliConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `TIKZGRID_SCALE`: default 1.0, must be positive
    /// - `TIKZGRID_ROTATION_DEG`: default 0.0
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_values(
            std::env::var(SCALE_VAR).ok().as_deref(),
            std::env::var(ROTATION_VAR).ok().as_deref(),
        )
    }

    /// Build config from raw variable values; `None` means unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is not a usable number.
    pub fn from_values(scale: Option<&str>, rotation_deg: Option<&str>) -> Result<Self, ConfigError> {
        let scale = match scale {
            Some(raw) => parse_scale(SCALE_VAR, raw)?,
            None => DEFAULT_SCALE,
        };
        let rotation_deg = match rotation_deg {
            Some(raw) => parse_finite(ROTATION_VAR, raw)?,
            None => DEFAULT_ROTATION_DEG,
        };
        Ok(Self { scale, rotation_deg })
    }

    /// Apply command-line overrides on top of this config.
    #[must_use]
    pub fn with_overrides(self, scale: Option<f64>, rotation_deg: Option<f64>) -> Self {
        Self { scale: scale.unwrap_or(self.scale), rotation_deg: rotation_deg.unwrap_or(self.rotation_deg) }
    }
}

/// Value parser for `--scale`: the same checks as `TIKZGRID_SCALE`.
///
/// # Errors
///
/// Returns [`ConfigError`] unless the value is finite and positive.
pub fn scale_arg(raw: &str) -> Result<f64, ConfigError> {
    parse_scale(SCALE_FLAG, raw)
}

/// Value parser for `--rotation`.
///
/// # Errors
///
/// Returns [`ConfigError`] unless the value is a finite number.
pub fn rotation_arg(raw: &str) -> Result<f64, ConfigError> {
    parse_finite(ROTATION_FLAG, raw)
}

fn parse_finite(var: &'static str, raw: &str) -> Result<f64, ConfigError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::NotANumber { var, value: raw.to_owned() })?;
    if !value.is_finite() {
        return Err(ConfigError::OutOfRange { var, value: raw.to_owned() });
    }
    Ok(value)
}

fn parse_scale(var: &'static str, raw: &str) -> Result<f64, ConfigError> {
    let value = parse_finite(var, raw)?;
    if value <= 0.0 {
        return Err(ConfigError::OutOfRange { var, value: raw.to_owned() });
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
