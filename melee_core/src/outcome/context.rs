//! Inputs to outcome resolution

use crate::advantage::Engagement;
use crate::agent::{ConditionKind, DeclaredAction};
use crate::damage::{DefenseCoverage, OffensiveProfile, OverlayBonus, Technique};
use crate::types::{Outcome, Stakes};

/// The defending side of an attack
#[derive(Debug, Clone, PartialEq)]
pub struct DefenderContext<'a> {
    /// Active defense technique's coverage, if any
    pub defense: Option<&'a DefenseCoverage>,
    pub effectiveness: f64,
    /// Parry rating of the defender's weapon
    pub parry_rating: f64,
    pub balance: f64,
    pub dodge_modifier: f64,
    pub conditions: Vec<ConditionKind>,
    /// Defensive overlay bonus active at the attack's tick
    pub defense_bonus: f64,
    pub action: DeclaredAction,
    pub stance_weight: f64,
}

impl<'a> Default for DefenderContext<'a> {
    fn default() -> Self {
        DefenderContext {
            defense: None,
            effectiveness: 1.0,
            parry_rating: 0.0,
            balance: 1.0,
            dodge_modifier: 0.0,
            conditions: Vec::new(),
            defense_bonus: 0.0,
            action: DeclaredAction::Passive,
            stance_weight: 0.5,
        }
    }
}

impl<'a> DefenderContext<'a> {
    /// Outcome when the attack fails against this defender
    pub fn miss_outcome(&self) -> Outcome {
        match self.defense {
            Some(coverage) => coverage.kind.miss_outcome(),
            None => Outcome::Miss,
        }
    }
}

/// Everything the outcome resolvers read
#[derive(Debug, Clone, PartialEq)]
pub struct AttackContext<'a> {
    pub technique: &'a Technique,
    pub profile: &'a OffensiveProfile,
    pub stakes: Stakes,
    /// Engagement from the attacker's point of view
    pub engagement: Engagement,
    pub balance: f64,
    pub conditions: Vec<ConditionKind>,
    pub effectiveness: f64,
    /// Offensive overlay active at the attack's tick
    pub overlay: OverlayBonus,
    pub stance_weight: f64,
    pub defender: DefenderContext<'a>,
}

impl<'a> AttackContext<'a> {
    /// Neutral engagement, full balance, no conditions, undefended target
    pub fn new(technique: &'a Technique, profile: &'a OffensiveProfile, stakes: Stakes) -> Self {
        AttackContext {
            technique,
            profile,
            stakes,
            engagement: Engagement::default(),
            balance: 1.0,
            conditions: Vec::new(),
            effectiveness: 1.0,
            overlay: OverlayBonus::default(),
            stance_weight: 0.5,
            defender: DefenderContext::default(),
        }
    }
}
