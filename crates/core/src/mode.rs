//! Execution modes for generated artifacts

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// What happens to generated artifacts after they are written
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExecutionMode {
    /// Stop after writing
    #[default]
    Emit,
    /// Run the test runner in collection-only mode
    Check,
    /// Run the generated tests
    Run,
}

impl ExecutionMode {
    /// All recognized modes, in documentation order
    pub const ALL: [ExecutionMode; 3] = [Self::Emit, Self::Check, Self::Run];

    /// Whether this mode invokes the external test runner
    pub fn invokes_runner(self) -> bool {
        !matches!(self, Self::Emit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_is_emit() {
        assert_eq!(ExecutionMode::default(), ExecutionMode::Emit);
        assert!(!ExecutionMode::Emit.invokes_runner());
        assert!(ExecutionMode::Check.invokes_runner());
        assert!(ExecutionMode::Run.invokes_runner());
    }

    #[test]
    fn test_string_round_trip() {
        for mode in ExecutionMode::ALL {
            assert_eq!(ExecutionMode::from_str(mode.as_ref()).unwrap(), mode);
        }
        assert_eq!(ExecutionMode::from_str("CHECK").unwrap(), ExecutionMode::Check);
        assert!(ExecutionMode::from_str("dry-run").is_err());
    }
}
