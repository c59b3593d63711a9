//! Advantage effects - outcome-driven shifts to engagement and balance

mod engagement;

pub use engagement::{AdvantageAxis, AxisChange, Engagement, EngagementTable};

use crate::agent::Agent;
use crate::config::CombatTuning;
use crate::events::CombatEvent;
use crate::types::{Outcome, Stakes};
use serde::{Deserialize, Serialize};

/// Deltas from the attacker's point of view
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvantageEffect {
    pub pressure: f64,
    pub control: f64,
    pub position: f64,
    pub self_balance: f64,
    pub target_balance: f64,
}

impl AdvantageEffect {
    pub fn scaled(&self, mult: f64) -> AdvantageEffect {
        AdvantageEffect {
            pressure: self.pressure * mult,
            control: self.control * mult,
            position: self.position * mult,
            self_balance: self.self_balance * mult,
            target_balance: self.target_balance * mult,
        }
    }

    /// Replace any field the override sets
    pub fn with_override(&self, o: &EffectOverride) -> AdvantageEffect {
        AdvantageEffect {
            pressure: o.pressure.unwrap_or(self.pressure),
            control: o.control.unwrap_or(self.control),
            position: o.position.unwrap_or(self.position),
            self_balance: o.self_balance.unwrap_or(self.self_balance),
            target_balance: o.target_balance.unwrap_or(self.target_balance),
        }
    }

    pub fn axis(&self, axis: AdvantageAxis) -> f64 {
        match axis {
            AdvantageAxis::Pressure => self.pressure,
            AdvantageAxis::Control => self.control,
            AdvantageAxis::Position => self.position,
        }
    }
}

/// Partial replacement of an outcome's default effect
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectOverride {
    pub pressure: Option<f64>,
    pub control: Option<f64>,
    pub position: Option<f64>,
    pub self_balance: Option<f64>,
    pub target_balance: Option<f64>,
}

/// Per-outcome overrides a technique carries
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvantageOverrides {
    pub hit: Option<EffectOverride>,
    pub miss: Option<EffectOverride>,
    pub blocked: Option<EffectOverride>,
    pub parried: Option<EffectOverride>,
    pub deflected: Option<EffectOverride>,
    pub dodged: Option<EffectOverride>,
    pub countered: Option<EffectOverride>,
}

impl AdvantageOverrides {
    pub fn get(&self, outcome: Outcome) -> Option<&EffectOverride> {
        match outcome {
            Outcome::Hit => self.hit.as_ref(),
            Outcome::Miss => self.miss.as_ref(),
            Outcome::Blocked => self.blocked.as_ref(),
            Outcome::Parried => self.parried.as_ref(),
            Outcome::Deflected => self.deflected.as_ref(),
            Outcome::Dodged => self.dodged.as_ref(),
            Outcome::Countered => self.countered.as_ref(),
        }
    }
}

/// The effect an outcome produces, after overrides and stakes scaling
pub fn advantage_effect(
    outcome: Outcome,
    stakes: Stakes,
    overrides: &AdvantageOverrides,
    tuning: &CombatTuning,
) -> AdvantageEffect {
    let base = tuning.advantage.get(outcome);
    let effect = match overrides.get(outcome) {
        Some(o) => base.with_override(o),
        None => *base,
    };

    let profile = tuning.stakes.get(stakes);
    let mult = if outcome.is_hit() {
        profile.advantage_success
    } else {
        profile.advantage_failure
    };
    effect.scaled(mult)
}

/// Apply an effect to the engagement and both agents' balance
///
/// Only changes that survive clamping produce events. Returns `false` without
/// touching anything if the pair is not engaged.
pub fn apply_advantage(
    effect: &AdvantageEffect,
    attacker: &mut Agent,
    defender: &mut Agent,
    engagements: &mut EngagementTable,
    events: &mut Vec<CombatEvent>,
) -> bool {
    if !engagements.is_engaged(attacker.id, defender.id) {
        return false;
    }

    for axis in AdvantageAxis::all() {
        let delta = effect.axis(*axis);
        if delta == 0.0 {
            continue;
        }
        if let Some(change) = engagements.shift(attacker.id, defender.id, *axis, delta) {
            if change.changed() {
                events.push(CombatEvent::EngagementChanged {
                    attacker: attacker.id,
                    defender: defender.id,
                    axis: *axis,
                    old: change.old,
                    new: change.new,
                });
            }
        }
    }

    shift_balance(attacker, effect.self_balance, events);
    shift_balance(defender, effect.target_balance, events);
    true
}

fn shift_balance(agent: &mut Agent, delta: f64, events: &mut Vec<CombatEvent>) {
    if delta == 0.0 {
        return;
    }
    let old = agent.balance();
    let new = agent.set_balance(old + delta);
    if new != old {
        events.push(CombatEvent::BalanceChanged {
            agent: agent.id,
            old,
            new,
        });
    }
}
