//! Test generation strategies ("forges") and forge selection
//!
//! A forge is a pure function from a [`GenerationContext`] to a set of
//! artifacts. Forges register themselves through [`ForgeDescriptor`] and are
//! looked up by [`ForgeKind`].

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use carron_core::GenerationResult;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub mod context;
pub mod diff;
pub mod planner;
pub mod prop;
mod render;

pub use context::GenerationContext;
pub use diff::DiffForge;
pub use planner::{plan, PlanDecision};
pub use prop::PropForge;

/// Available forges
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ForgeKind {
    /// Function-level property tests
    Prop,
    /// Module-level difference tests
    Diff,
}

/// Generates test artifacts for a target
pub trait Forge: Send + Sync {
    fn kind(&self) -> ForgeKind;

    /// Generate artifacts; never performs I/O
    fn generate(&self, context: &GenerationContext) -> GenerationResult;
}

/// Forge descriptor for automatic registration
pub struct ForgeDescriptor {
    pub kind: ForgeKind,
    pub factory: fn() -> Box<dyn Forge>,
}

inventory::collect!(ForgeDescriptor);

/// Create the forge registered for `kind`
///
/// Returns None if no forge of that kind is linked in.
pub fn create_forge(kind: ForgeKind) -> Option<Box<dyn Forge>> {
    inventory::iter::<ForgeDescriptor>
        .into_iter()
        .find(|descriptor| descriptor.kind == kind)
        .map(|descriptor| (descriptor.factory)())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_every_kind_is_registered() {
        for kind in [ForgeKind::Prop, ForgeKind::Diff] {
            let forge = create_forge(kind).unwrap();
            assert_eq!(forge.kind(), kind);
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(ForgeKind::from_str("prop").unwrap(), ForgeKind::Prop);
        assert_eq!(ForgeKind::from_str("DIFF").unwrap(), ForgeKind::Diff);
        assert!(ForgeKind::from_str("fuzz").is_err());
        assert_eq!(ForgeKind::Prop.to_string(), "prop");
    }
}
