//! Single-probability outcome resolution

use super::context::AttackContext;
use crate::agent::ConditionKind;
use crate::config::CombatTuning;
use crate::rng::{DrawSource, StreamId};
use crate::types::Outcome;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Every term that went into a hit chance
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HitChanceBreakdown {
    // === Attacker terms ===
    pub base: f64,
    pub difficulty: f64,
    pub accuracy: f64,
    pub stakes: f64,
    pub engagement: f64,
    pub attacker_balance: f64,
    pub attacker_conditions: f64,
    /// Blind attacker penalty, by attack mode
    pub blindness: f64,
    pub defender_conditions: f64,

    // === Active defense ===
    /// Multiplier applied to the sum above; 1.0 with no active defense
    pub defense_factor: f64,
    pub guard: f64,
    pub parry: f64,

    // === Defender terms ===
    pub defender_balance: f64,
    pub dodge: f64,
    pub offensive_overlay: f64,
    pub defensive_overlay: f64,

    /// Before clamping
    pub raw: f64,
    pub chance: f64,
}

/// Result of a hit-chance roll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitChanceResult {
    pub outcome: Outcome,
    pub chance: f64,
    pub roll: f64,
    pub breakdown: HitChanceBreakdown,
}

/// Compute the hit chance without rolling
pub fn compute_hit_chance(ctx: &AttackContext, tuning: &CombatTuning) -> HitChanceBreakdown {
    let c = &tuning.hit_chance;
    let technique = ctx.technique;
    let defender = &ctx.defender;

    let attacker_conditions: f64 = ctx
        .conditions
        .iter()
        .map(|k| tuning.conditions.modifier(*k).as_attacker)
        .sum();
    let blindness = if ctx.conditions.contains(&ConditionKind::Blinded) {
        -c.blindness.for_mode(technique.attack_mode)
    } else {
        0.0
    };
    let defender_conditions: f64 = defender
        .conditions
        .iter()
        .map(|k| tuning.conditions.modifier(*k).as_defender)
        .sum();

    let mut b = HitChanceBreakdown {
        base: c.base,
        difficulty: -technique.difficulty * c.difficulty_scale,
        accuracy: ctx.profile.accuracy * c.accuracy_scale,
        stakes: tuning.stakes.get(ctx.stakes).hit_bonus,
        engagement: (ctx.engagement.advantage() - 0.5) * c.engagement_scale,
        attacker_balance: (ctx.balance - 0.5) * c.attacker_balance_scale,
        attacker_conditions,
        blindness,
        defender_conditions,
        defense_factor: 1.0,
        guard: 0.0,
        parry: 0.0,
        defender_balance: (1.0 - defender.balance) * c.defender_balance_scale,
        dodge: -defender.dodge_modifier,
        offensive_overlay: ctx.overlay.to_hit_bonus,
        defensive_overlay: -defender.defense_bonus,
        raw: 0.0,
        chance: 0.0,
    };

    if let Some(coverage) = defender.defense {
        let effectiveness = defender.effectiveness.clamp(0.0, 1.0);
        b.defense_factor = 1.0 - (1.0 - coverage.multiplier()) * effectiveness;
        b.guard = match (coverage.guard_height, technique.target_height) {
            (Some(guard), Some(target)) if guard == target => -c.guard_direct_penalty,
            (Some(guard), Some(target)) if coverage.covers_adjacent && guard.is_adjacent(target) => {
                -c.guard_adjacent_penalty
            }
            _ => c.guard_open_bonus,
        };
        b.parry = -defender.parry_rating * c.parry_scale;
    }

    let attack_sum = b.base
        + b.difficulty
        + b.accuracy
        + b.stakes
        + b.engagement
        + b.attacker_balance
        + b.attacker_conditions
        + b.blindness
        + b.defender_conditions;

    b.raw = attack_sum * b.defense_factor
        + b.guard
        + b.parry
        + b.defender_balance
        + b.dodge
        + b.offensive_overlay
        + b.defensive_overlay;

    b.chance = if b.raw.is_finite() {
        b.raw.clamp(c.min_chance, c.max_chance)
    } else {
        c.min_chance
    };
    b
}

/// Roll once on the combat stream and classify
pub fn resolve_hit_chance(
    ctx: &AttackContext,
    tuning: &CombatTuning,
    draws: &mut impl DrawSource,
) -> HitChanceResult {
    let breakdown = compute_hit_chance(ctx, tuning);
    let roll = draws.draw(StreamId::Combat);
    let outcome = if roll <= breakdown.chance {
        Outcome::Hit
    } else {
        ctx.defender.miss_outcome()
    };

    debug!(chance = breakdown.chance, roll, ?outcome, "hit chance rolled");
    HitChanceResult {
        outcome,
        chance: breakdown.chance,
        roll,
        breakdown,
    }
}
