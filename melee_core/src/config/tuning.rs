//! Tunable resolver constants
//!
//! Every resolver takes a `&CombatTuning` instead of reading module-level
//! constants, so alternate tuning sets can be tested side by side.

use crate::advantage::AdvantageEffect;
use crate::agent::ConditionKind;
use crate::layers::Totality;
use crate::types::{AttackMode, Outcome, Stakes};
use serde::{Deserialize, Serialize};

/// All tuning tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub stat_scaling: StatScalingConstants,
    pub stakes: StakesTable,
    pub hit_chance: HitChanceConstants,
    pub contested: ContestedConstants,
    pub conditions: ConditionTable,
    pub layers: LayerConstants,
    pub wounds: WoundConstants,
    pub location: LocationConstants,
    pub advantage: AdvantageTable,
    pub resources: ResourceConstants,
}

// === Stat scaling ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatScalingConstants {
    /// Stat value that normalizes to 1.0
    pub stat_max: f64,
    /// Stat value that maps to a multiplier of exactly 1.0
    pub baseline: f64,
    /// Scaling ratio for the velocity stat group in energy derivation
    pub velocity_ratio: f64,
    /// Scaling ratio for the mass stat group in energy derivation
    pub mass_ratio: f64,
}

impl Default for StatScalingConstants {
    fn default() -> Self {
        StatScalingConstants {
            stat_max: 10.0,
            baseline: 5.0,
            velocity_ratio: 0.8,
            mass_ratio: 0.6,
        }
    }
}

impl StatScalingConstants {
    pub fn normalize(&self, value: f64) -> f64 {
        if self.stat_max <= 0.0 {
            return 0.0;
        }
        value / self.stat_max
    }

    pub fn baseline_norm(&self) -> f64 {
        self.normalize(self.baseline)
    }
}

// === Stakes ===

/// What a stakes level does to damage, accuracy and advantage swings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakesProfile {
    pub damage_mult: f64,
    pub hit_bonus: f64,
    /// Advantage multiplier when the attack lands
    pub advantage_success: f64,
    /// Advantage multiplier when the attack fails
    pub advantage_failure: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StakesTable {
    pub probing: StakesProfile,
    pub guarded: StakesProfile,
    pub committed: StakesProfile,
    pub reckless: StakesProfile,
}

impl Default for StakesTable {
    fn default() -> Self {
        StakesTable {
            probing: StakesProfile {
                damage_mult: 0.5,
                hit_bonus: 0.10,
                advantage_success: 0.6,
                advantage_failure: 0.5,
            },
            guarded: StakesProfile {
                damage_mult: 0.8,
                hit_bonus: 0.05,
                advantage_success: 0.8,
                advantage_failure: 0.8,
            },
            committed: StakesProfile {
                damage_mult: 1.0,
                hit_bonus: 0.0,
                advantage_success: 1.0,
                advantage_failure: 1.0,
            },
            reckless: StakesProfile {
                damage_mult: 1.4,
                hit_bonus: -0.05,
                advantage_success: 1.3,
                advantage_failure: 1.5,
            },
        }
    }
}

impl StakesTable {
    pub fn get(&self, stakes: Stakes) -> &StakesProfile {
        match stakes {
            Stakes::Probing => &self.probing,
            Stakes::Guarded => &self.guarded,
            Stakes::Committed => &self.committed,
            Stakes::Reckless => &self.reckless,
        }
    }
}

// === Hit chance ===

/// Hit-chance penalty for a blinded attacker, by attack mode
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlindnessPenalties {
    pub thrust: f64,
    pub swing: f64,
    pub ranged: f64,
    pub other: f64,
}

impl Default for BlindnessPenalties {
    fn default() -> Self {
        BlindnessPenalties {
            thrust: 0.30,
            swing: 0.20,
            ranged: 0.45,
            other: 0.25,
        }
    }
}

impl BlindnessPenalties {
    pub fn for_mode(&self, mode: AttackMode) -> f64 {
        match mode {
            AttackMode::Thrust => self.thrust,
            AttackMode::Swing => self.swing,
            AttackMode::Ranged => self.ranged,
            AttackMode::None => self.other,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HitChanceConstants {
    pub base: f64,
    pub difficulty_scale: f64,
    pub accuracy_scale: f64,
    pub engagement_scale: f64,
    pub attacker_balance_scale: f64,
    pub defender_balance_scale: f64,
    pub parry_scale: f64,
    pub guard_direct_penalty: f64,
    pub guard_adjacent_penalty: f64,
    pub guard_open_bonus: f64,
    pub min_chance: f64,
    pub max_chance: f64,
    pub blindness: BlindnessPenalties,
}

impl Default for HitChanceConstants {
    fn default() -> Self {
        HitChanceConstants {
            base: 0.5,
            difficulty_scale: 0.1,
            accuracy_scale: 0.1,
            engagement_scale: 0.3,
            attacker_balance_scale: 0.2,
            defender_balance_scale: 0.15,
            parry_scale: 0.1,
            guard_direct_penalty: 0.15,
            guard_adjacent_penalty: 0.075,
            guard_open_bonus: 0.05,
            min_chance: 0.05,
            max_chance: 0.95,
            blindness: BlindnessPenalties::default(),
        }
    }
}

// === Contested rolls ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub critical: f64,
    pub solid: f64,
    pub partial: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        TierThresholds {
            critical: 0.4,
            solid: 0.2,
            partial: 0.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TierDamage {
    pub critical: f64,
    pub solid: f64,
    pub partial: f64,
}

impl Default for TierDamage {
    fn default() -> Self {
        TierDamage {
            critical: 1.5,
            solid: 1.0,
            partial: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContestedConstants {
    pub attack_base: f64,
    pub defense_base: f64,
    pub active_defense_bonus: f64,
    pub parry_scale: f64,
    /// Parry weight while the defender is actively defending
    pub parry_weight_active: f64,
    /// Parry weight while the defender is busy with its own attack
    pub parry_weight_attacking: f64,
    /// Parry weight with no declared action
    pub parry_weight_passive: f64,
    pub imbalance_penalty: f64,
    /// How much stance weighting matters; 1.0 lets a zero weight zero a side
    pub stance_effectiveness: f64,
    pub calibration_offset: f64,
    pub variance: f64,
    pub tiers: TierThresholds,
    pub tier_damage: TierDamage,
}

impl Default for ContestedConstants {
    fn default() -> Self {
        ContestedConstants {
            attack_base: 0.5,
            defense_base: 0.5,
            active_defense_bonus: 0.15,
            parry_scale: 0.1,
            parry_weight_active: 1.0,
            parry_weight_attacking: 0.3,
            parry_weight_passive: 0.6,
            imbalance_penalty: 0.2,
            stance_effectiveness: 0.5,
            calibration_offset: -0.5,
            variance: 0.5,
            tiers: TierThresholds::default(),
            tier_damage: TierDamage::default(),
        }
    }
}

// === Conditions ===

/// What holding a condition does in combat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConditionModifier {
    pub kind: ConditionKind,
    /// Added to hit chance when the attacker holds it
    #[serde(default)]
    pub as_attacker: f64,
    /// Added to hit chance when the defender holds it
    #[serde(default)]
    pub as_defender: f64,
    /// Multiplier on combat effectiveness
    #[serde(default = "default_effectiveness")]
    pub effectiveness: f64,
}

fn default_effectiveness() -> f64 {
    1.0
}

impl ConditionModifier {
    pub fn neutral(kind: ConditionKind) -> Self {
        ConditionModifier {
            kind,
            as_attacker: 0.0,
            as_defender: 0.0,
            effectiveness: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionTable {
    pub modifiers: Vec<ConditionModifier>,
}

impl Default for ConditionTable {
    fn default() -> Self {
        let row = |kind, as_attacker, as_defender, effectiveness| ConditionModifier {
            kind,
            as_attacker,
            as_defender,
            effectiveness,
        };
        ConditionTable {
            modifiers: vec![
                // Blindness as attacker is handled per attack mode
                row(ConditionKind::Blinded, 0.0, 0.15, 0.7),
                row(ConditionKind::Stunned, -0.20, 0.20, 0.6),
                row(ConditionKind::Winded, -0.05, 0.05, 0.85),
                row(ConditionKind::OffBalance, -0.05, 0.05, 0.9),
                row(ConditionKind::Prone, -0.15, 0.20, 0.7),
                row(ConditionKind::Bleeding, -0.05, 0.0, 0.9),
                row(ConditionKind::Grappled, -0.10, 0.10, 0.8),
            ],
        }
    }
}

impl ConditionTable {
    pub fn modifier(&self, kind: ConditionKind) -> ConditionModifier {
        self.modifiers
            .iter()
            .find(|m| m.kind == kind)
            .copied()
            .unwrap_or_else(|| ConditionModifier::neutral(kind))
    }
}

// === Layers ===

/// Chance that a strike finds a gap, by coverage totality
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GapChances {
    pub total: f64,
    pub intimidating: f64,
    pub comprehensive: f64,
    pub frontal: f64,
    pub minimal: f64,
}

impl Default for GapChances {
    fn default() -> Self {
        GapChances {
            total: 0.0,
            intimidating: 0.02,
            comprehensive: 0.05,
            frontal: 0.2,
            minimal: 0.45,
        }
    }
}

impl GapChances {
    pub fn for_totality(&self, totality: Totality) -> f64 {
        match totality {
            Totality::Total => self.total,
            Totality::Intimidating => self.intimidating,
            Totality::Comprehensive => self.comprehensive,
            Totality::Frontal => self.frontal,
            Totality::Minimal => self.minimal,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConstants {
    /// Blunt kinds keep propagating while forwarded energy exceeds this
    pub blunt_energy_floor: f64,
    pub gap_chance: GapChances,
}

impl Default for LayerConstants {
    fn default() -> Self {
        LayerConstants {
            blunt_energy_floor: 1.0,
            gap_chance: GapChances::default(),
        }
    }
}

// === Wounds ===

/// Damage thresholds for each severity step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeverityLadder {
    pub minor: f64,
    pub inhibited: f64,
    pub disabled: f64,
    pub broken: f64,
    /// Only reachable on structural layers via the volume curve
    #[serde(default = "default_missing")]
    pub missing: f64,
}

fn default_missing() -> f64 {
    f64::INFINITY
}

/// Destroyed-volume bar for severing, by contact shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverBars {
    pub edge: f64,
    pub point: f64,
    pub blunt: f64,
    /// Multiplier on the bar for digits and other small parts
    pub small_part_factor: f64,
}

impl Default for SeverBars {
    fn default() -> Self {
        SeverBars {
            edge: 3.0,
            point: 6.0,
            blunt: 8.0,
            small_part_factor: 0.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WoundConstants {
    pub depth: SeverityLadder,
    pub volume: SeverityLadder,
    pub sever: SeverBars,
}

impl Default for WoundConstants {
    fn default() -> Self {
        WoundConstants {
            depth: SeverityLadder {
                minor: 0.05,
                inhibited: 0.4,
                disabled: 0.9,
                broken: 1.5,
                missing: f64::INFINITY,
            },
            volume: SeverityLadder {
                minor: 0.1,
                inhibited: 0.8,
                disabled: 2.0,
                broken: 4.0,
                missing: 8.0,
            },
            sever: SeverBars::default(),
        }
    }
}

// === Hit location ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConstants {
    pub primary_match: f64,
    pub secondary_match: f64,
    pub adjacent: f64,
    pub other: f64,
    pub guarded_exact: f64,
    pub guarded_adjacent: f64,
}

impl Default for LocationConstants {
    fn default() -> Self {
        LocationConstants {
            primary_match: 2.0,
            secondary_match: 1.0,
            adjacent: 0.5,
            other: 0.1,
            guarded_exact: 0.3,
            guarded_adjacent: 0.6,
        }
    }
}

// === Advantage ===

/// Default advantage effect per outcome, from the attacker's point of view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvantageTable {
    pub hit: AdvantageEffect,
    pub miss: AdvantageEffect,
    pub blocked: AdvantageEffect,
    pub parried: AdvantageEffect,
    pub deflected: AdvantageEffect,
    pub dodged: AdvantageEffect,
    pub countered: AdvantageEffect,
}

impl Default for AdvantageTable {
    fn default() -> Self {
        let effect = |pressure, control, position, self_balance, target_balance| AdvantageEffect {
            pressure,
            control,
            position,
            self_balance,
            target_balance,
        };
        AdvantageTable {
            hit: effect(0.15, 0.10, 0.05, 0.0, -0.15),
            miss: effect(-0.05, -0.10, 0.0, -0.10, 0.0),
            blocked: effect(0.05, -0.05, 0.0, -0.05, -0.05),
            parried: effect(0.0, -0.15, 0.0, -0.05, 0.0),
            deflected: effect(0.0, -0.10, -0.05, -0.05, 0.0),
            dodged: effect(-0.05, -0.05, -0.10, -0.05, 0.0),
            countered: effect(-0.10, -0.20, -0.05, -0.15, 0.05),
        }
    }
}

impl AdvantageTable {
    pub fn get(&self, outcome: Outcome) -> &AdvantageEffect {
        match outcome {
            Outcome::Hit => &self.hit,
            Outcome::Miss => &self.miss,
            Outcome::Blocked => &self.blocked,
            Outcome::Parried => &self.parried,
            Outcome::Deflected => &self.deflected,
            Outcome::Dodged => &self.dodged,
            Outcome::Countered => &self.countered,
        }
    }
}

// === Resources ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConstants {
    pub pain_per_damage: f64,
    /// Trauma per unit of volume damage on a vital part
    pub trauma_per_vital_volume: f64,
    /// Trauma per unit of non-physical amount
    pub trauma_per_direct: f64,
    pub blood_per_volume: f64,
    pub artery_bleed_mult: f64,
    /// Trauma at or above this applies a timed stun
    pub stun_threshold: f64,
    pub stun_ticks: u64,
    /// Up to this many extra stun ticks, rolled on the effects stream
    pub stun_extra_ticks: u64,
    /// Stamina fraction below which an agent is winded
    pub winded_fraction: f64,
    /// Balance below which an agent is off balance
    pub off_balance: f64,
    /// Blood fraction below which an agent is bleeding out
    pub bleeding_fraction: f64,
}

impl Default for ResourceConstants {
    fn default() -> Self {
        ResourceConstants {
            pain_per_damage: 1.0,
            trauma_per_vital_volume: 1.0,
            trauma_per_direct: 0.5,
            blood_per_volume: 0.05,
            artery_bleed_mult: 3.0,
            stun_threshold: 5.0,
            stun_ticks: 2,
            stun_extra_ticks: 1,
            winded_fraction: 0.25,
            off_balance: 0.3,
            bleeding_fraction: 0.5,
        }
    }
}
