//! # Toggle Gate
//!
//! Decides once per round whether markers are rewritten (`apply`) or stripped
//! (`revert`). Unset or unrecognized values fail closed.

use std::env;
use std::fmt;

/// Environment variable holding the toggle.
pub const TOGGLE_ENV: &str = "AUTO_SWAGGER_ANNOTATION_ENABLED";

const ENABLED_VALUE: &str = "true";
const DISABLED_VALUE: &str = "false";

/// Tri-state outcome of reading the toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Value was `true` (any case).
    Enabled,
    /// Value was `false` (any case).
    Disabled,
    /// Value missing or not recognized. Behaves as `Disabled`.
    Absent,
}

impl Toggle {
    /// Classifies a raw configuration value.
    pub fn from_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case(ENABLED_VALUE) => Self::Enabled,
            Some(v) if v.eq_ignore_ascii_case(DISABLED_VALUE) => Self::Disabled,
            _ => Self::Absent,
        }
    }

    /// Reads `TOGGLE_ENV` from the process environment.
    pub fn from_env() -> Self {
        let toggle = match env::var(TOGGLE_ENV) {
            Ok(value) => Self::from_value(Some(&value)),
            Err(_) => Self::Absent,
        };
        tracing::debug!(toggle = %toggle, "read {}", TOGGLE_ENV);
        toggle
    }

    /// True only for `Enabled`.
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => f.write_str("enabled"),
            Self::Disabled => f.write_str("disabled"),
            Self::Absent => f.write_str("absent"),
        }
    }
}
