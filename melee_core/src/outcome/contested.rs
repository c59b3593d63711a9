//! Contested-roll outcome resolution
//!
//! Both sides are scored independently, weighted by effectiveness and
//! stance, perturbed by draws and compared. The margin picks a graded tier.

use super::context::AttackContext;
use crate::agent::DeclaredAction;
use crate::config::{CombatTuning, TierDamage, TierThresholds};
use crate::rng::{DrawSource, StreamId};
use crate::types::Outcome;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Graded result of a contest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContestTier {
    Miss,
    Partial,
    Solid,
    Critical,
}

impl ContestTier {
    /// Classify a margin; a pure function of the margin
    pub fn from_margin(margin: f64, thresholds: &TierThresholds) -> ContestTier {
        if margin >= thresholds.critical {
            ContestTier::Critical
        } else if margin >= thresholds.solid {
            ContestTier::Solid
        } else if margin >= thresholds.partial {
            ContestTier::Partial
        } else {
            ContestTier::Miss
        }
    }

    pub fn damage_mult(&self, table: &TierDamage) -> f64 {
        match self {
            ContestTier::Critical => table.critical,
            ContestTier::Solid => table.solid,
            ContestTier::Partial => table.partial,
            ContestTier::Miss => 0.0,
        }
    }
}

/// How many draws a contest takes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollMode {
    /// One draw; the defender gets its mirror `1 - roll`
    #[default]
    Single,
    /// One draw per side
    IndependentPair,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContestedResult {
    pub outcome: Outcome,
    pub tier: ContestTier,
    pub margin: f64,
    pub attack_score: f64,
    pub defense_score: f64,
    pub attack_final: f64,
    pub defense_final: f64,
    pub damage_mult: f64,
}

/// Attacker score before rolling, scaled by effectiveness
pub fn attack_score(ctx: &AttackContext, tuning: &CombatTuning) -> f64 {
    let h = &tuning.hit_chance;
    let c = &tuning.contested;

    let raw = c.attack_base - ctx.technique.difficulty * h.difficulty_scale
        + ctx.profile.accuracy * h.accuracy_scale
        + tuning.stakes.get(ctx.stakes).hit_bonus
        + (ctx.engagement.advantage() - 0.5) * h.engagement_scale
        + (ctx.balance - 0.5) * h.attacker_balance_scale
        + ctx.overlay.to_hit_bonus;
    raw * ctx.effectiveness.clamp(0.0, 1.0)
}

/// Defender score before rolling, scaled by effectiveness
pub fn defense_score(ctx: &AttackContext, tuning: &CombatTuning) -> f64 {
    let c = &tuning.contested;
    let defender = &ctx.defender;

    let active_bonus = if defender.defense.is_some() {
        c.active_defense_bonus
    } else {
        0.0
    };
    let parry_weight = match defender.action {
        DeclaredAction::Defending => c.parry_weight_active,
        DeclaredAction::Attacking => c.parry_weight_attacking,
        DeclaredAction::Passive => c.parry_weight_passive,
    };

    let raw = c.defense_base + active_bonus + defender.parry_rating * c.parry_scale * parry_weight
        - c.imbalance_penalty * (1.0 - defender.balance.clamp(0.0, 1.0));
    raw * defender.effectiveness.clamp(0.0, 1.0)
}

/// `stanceWeight + (1 - stanceEffectiveness)`
pub fn stance_multiplier(weight: f64, tuning: &CombatTuning) -> f64 {
    weight + (1.0 - tuning.contested.stance_effectiveness)
}

/// Roll a contest and classify it
pub fn resolve_contested(
    ctx: &AttackContext,
    mode: RollMode,
    tuning: &CombatTuning,
    draws: &mut impl DrawSource,
) -> ContestedResult {
    let c = &tuning.contested;
    let attack = attack_score(ctx, tuning);
    let defense = defense_score(ctx, tuning);

    let (attack_roll, defense_roll) = match mode {
        RollMode::Single => {
            let roll = draws.draw(StreamId::Combat);
            (roll, 1.0 - roll)
        }
        RollMode::IndependentPair => {
            let a = draws.draw(StreamId::Combat);
            let d = draws.draw(StreamId::Combat);
            (a, d)
        }
    };

    let finalize = |score: f64, roll: f64, weight: f64| {
        (score + (roll + c.calibration_offset) * c.variance) * stance_multiplier(weight, tuning)
    };
    let attack_final = finalize(attack, attack_roll, ctx.stance_weight);
    let defense_final = finalize(defense, defense_roll, ctx.defender.stance_weight);

    let margin = attack_final - defense_final;
    let tier = ContestTier::from_margin(margin, &c.tiers);
    let outcome = match tier {
        ContestTier::Miss => ctx.defender.miss_outcome(),
        ContestTier::Partial | ContestTier::Solid | ContestTier::Critical => Outcome::Hit,
    };

    debug!(margin, ?tier, ?outcome, "contest rolled");
    ContestedResult {
        outcome,
        tier,
        margin,
        attack_score: attack,
        defense_score: defense,
        attack_final,
        defense_final,
        damage_mult: tier.damage_mult(&c.tier_damage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::{OffensiveProfile, Technique};
    use crate::rng::ScriptedDraws;
    use crate::types::Stakes;

    fn technique() -> Technique {
        toml::from_str(
            r#"
id = "cut"
name = "Cut"
attack_mode = "swing"

[[damage.instances]]
amount = 10.0
kinds = ["slash"]
"#,
        )
        .unwrap()
    }

    fn profile() -> OffensiveProfile {
        OffensiveProfile {
            accuracy: 0.0,
            damage_modifier: 1.0,
            reference_energy: 100.0,
            geometry_coeff: 0.6,
            rigidity_coeff: 0.6,
            penetration_cm: 3.0,
        }
    }

    #[test]
    fn test_tier_boundaries() {
        let t = TierThresholds::default();
        assert_eq!(ContestTier::from_margin(0.4, &t), ContestTier::Critical);
        assert_eq!(ContestTier::from_margin(0.39, &t), ContestTier::Solid);
        assert_eq!(ContestTier::from_margin(0.2, &t), ContestTier::Solid);
        assert_eq!(ContestTier::from_margin(0.0, &t), ContestTier::Partial);
        assert_eq!(ContestTier::from_margin(-0.01, &t), ContestTier::Miss);
    }

    #[test]
    fn test_tier_damage() {
        let d = TierDamage::default();
        assert_eq!(ContestTier::Critical.damage_mult(&d), 1.5);
        assert_eq!(ContestTier::Miss.damage_mult(&d), 0.0);
    }

    #[test]
    fn test_neutral_stance_multiplier_is_one() {
        let tuning = CombatTuning::default();
        assert_eq!(stance_multiplier(0.5, &tuning), 1.0);
    }

    #[test]
    fn test_parry_weight_by_action() {
        let tuning = CombatTuning::default();
        let t = technique();
        let p = profile();
        let mut ctx = AttackContext::new(&t, &p, Stakes::Committed);
        ctx.defender.parry_rating = 2.0;

        ctx.defender.action = DeclaredAction::Defending;
        let active = defense_score(&ctx, &tuning);
        ctx.defender.action = DeclaredAction::Passive;
        let passive = defense_score(&ctx, &tuning);
        ctx.defender.action = DeclaredAction::Attacking;
        let attacking = defense_score(&ctx, &tuning);

        assert!(active > passive);
        assert!(passive > attacking);
        assert!((active - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_effectiveness_scales_scores() {
        let tuning = CombatTuning::default();
        let t = technique();
        let p = profile();
        let mut ctx = AttackContext::new(&t, &p, Stakes::Committed);
        let full = attack_score(&ctx, &tuning);

        ctx.effectiveness = 0.6;
        assert!((attack_score(&ctx, &tuning) - full * 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_single_roll_mirrors() {
        let tuning = CombatTuning::default();
        let t = technique();
        let p = profile();
        let ctx = AttackContext::new(&t, &p, Stakes::Committed);

        let mut draws = ScriptedDraws::new([0.9]);
        let high = resolve_contested(&ctx, RollMode::Single, &tuning, &mut draws);
        assert_eq!(draws.consumed(), 1);
        // attack 0.6 + 0.2 = 0.8, defense 0.5 - 0.2 = 0.3
        assert!((high.margin - 0.5).abs() < 1e-9);
        assert_eq!(high.tier, ContestTier::Critical);
        assert_eq!(high.outcome, Outcome::Hit);

        let low = resolve_contested(&ctx, RollMode::Single, &tuning, &mut ScriptedDraws::new([0.1]));
        assert_eq!(low.tier, ContestTier::Miss);
        assert_eq!(low.outcome, Outcome::Miss);
    }

    #[test]
    fn test_independent_pair_uses_two_draws() {
        let tuning = CombatTuning::default();
        let t = technique();
        let p = profile();
        let ctx = AttackContext::new(&t, &p, Stakes::Committed);

        let mut draws = ScriptedDraws::new([0.5, 0.5]);
        let result = resolve_contested(&ctx, RollMode::IndependentPair, &tuning, &mut draws);
        assert_eq!(draws.consumed(), 2);
        // Equal rolls leave the score gap of 0.1
        assert!((result.margin - 0.1).abs() < 1e-9);
        assert_eq!(result.tier, ContestTier::Partial);
        assert!((result.damage_mult - 0.5).abs() < f64::EPSILON);
    }
}
