//! Stored (timed) conditions
//!
//! Derived conditions are never stored here; see [`Agent::conditions`].
//!
//! [`Agent::conditions`]: super::Agent::conditions

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    Blinded,
    Stunned,
    Winded,
    OffBalance,
    Prone,
    Bleeding,
    Grappled,
}

impl ConditionKind {
    pub fn all() -> &'static [ConditionKind] {
        &[
            ConditionKind::Blinded,
            ConditionKind::Stunned,
            ConditionKind::Winded,
            ConditionKind::OffBalance,
            ConditionKind::Prone,
            ConditionKind::Bleeding,
            ConditionKind::Grappled,
        ]
    }
}

/// A condition that lasts until a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedCondition {
    pub kind: ConditionKind,
    /// Expires once the clock reaches this tick
    pub expires_at: u64,
}

/// Stored conditions of one agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    stored: Vec<TimedCondition>,
}

impl Conditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a condition; reapplying keeps the later expiry
    pub fn apply(&mut self, kind: ConditionKind, expires_at: u64) {
        match self.stored.iter_mut().find(|c| c.kind == kind) {
            Some(existing) => existing.expires_at = existing.expires_at.max(expires_at),
            None => self.stored.push(TimedCondition { kind, expires_at }),
        }
    }

    pub fn remove(&mut self, kind: ConditionKind) {
        self.stored.retain(|c| c.kind != kind);
    }

    /// Drop everything expired at `now`, returning what was dropped
    pub fn expire(&mut self, now: u64) -> Vec<ConditionKind> {
        let expired: Vec<ConditionKind> = self
            .stored
            .iter()
            .filter(|c| c.expires_at <= now)
            .map(|c| c.kind)
            .collect();
        self.stored.retain(|c| c.expires_at > now);
        expired
    }

    pub fn has(&self, kind: ConditionKind) -> bool {
        self.stored.iter().any(|c| c.kind == kind)
    }

    pub fn stored(&self) -> &[TimedCondition] {
        &self.stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_and_expire() {
        let mut conditions = Conditions::new();
        conditions.apply(ConditionKind::Stunned, 3);
        conditions.apply(ConditionKind::Prone, 5);

        assert!(conditions.expire(2).is_empty());
        assert_eq!(conditions.expire(3), vec![ConditionKind::Stunned]);
        assert!(!conditions.has(ConditionKind::Stunned));
        assert!(conditions.has(ConditionKind::Prone));
    }

    #[test]
    fn test_reapply_keeps_later_expiry() {
        let mut conditions = Conditions::new();
        conditions.apply(ConditionKind::Grappled, 10);
        conditions.apply(ConditionKind::Grappled, 4);

        assert_eq!(conditions.stored().len(), 1);
        assert_eq!(conditions.stored()[0].expires_at, 10);
    }
}
