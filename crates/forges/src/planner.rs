//! Forge selection from the shape of a target

use crate::ForgeKind;
use carron_core::target::LOCATOR_SEPARATOR;
use carron_core::TargetRef;
use serde::{Deserialize, Serialize};

/// Which forge to use for a target, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDecision {
    pub forge: ForgeKind,
    pub reason: String,
}

impl PlanDecision {
    /// Render as an indented JSON object
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Pick a forge from the target string alone
///
/// Targets naming a function or method select `prop`; anything without a
/// qualified name is treated as a whole module and selects `diff`.
pub fn plan(target: &TargetRef) -> PlanDecision {
    if target.as_str().contains(LOCATOR_SEPARATOR) {
        PlanDecision {
            forge: ForgeKind::Prop,
            reason: "function-level target".to_string(),
        }
    } else {
        PlanDecision {
            forge: ForgeKind::Diff,
            reason: "module-level target".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_function_target_selects_prop() {
        let decision = plan(&TargetRef::from("mymodule:sqrt"));
        assert_eq!(decision.forge, ForgeKind::Prop);
        assert_eq!(decision.reason, "function-level target");
    }

    #[test]
    fn test_module_target_selects_diff() {
        let decision = plan(&TargetRef::from("mymodule"));
        assert_eq!(decision.forge, ForgeKind::Diff);
        assert_eq!(decision.reason, "module-level target");
    }

    #[test]
    fn test_selection_ignores_validity() {
        // Malformed targets still get a decision; parsing rejects them later
        assert_eq!(plan(&TargetRef::from(":")).forge, ForgeKind::Prop);
        assert_eq!(plan(&TargetRef::from("")).forge, ForgeKind::Diff);
    }

    #[test]
    fn test_decision_json() {
        let decision = plan(&TargetRef::from("pkg/m.py:C.run"));
        assert_eq!(
            decision.to_json().unwrap(),
            "{\n  \"forge\": \"prop\",\n  \"reason\": \"function-level target\"\n}"
        );

        let parsed: PlanDecision =
            serde_json::from_str(r#"{"forge":"diff","reason":"module-level target"}"#).unwrap();
        assert_eq!(parsed, plan(&TargetRef::from("pkg")));
    }
}
