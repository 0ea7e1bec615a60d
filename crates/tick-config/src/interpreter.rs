//! Command interpreter behaviour.

use serde::{Deserialize, Serialize};
use tick_core::enums::AmbiguityPolicy;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InterpreterConfig {
    /// What a completion command does when its title matches several tasks.
    #[serde(default)]
    pub ambiguity: AmbiguityPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_rejecting_ambiguous_matches() {
        assert_eq!(
            InterpreterConfig::default().ambiguity,
            AmbiguityPolicy::Reject
        );
    }
}
