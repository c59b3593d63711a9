//! Technique definitions

use super::scaling::StatScaling;
use crate::advantage::AdvantageOverrides;
use crate::body::Height;
use crate::types::{AttackMode, DamageKind, DefenseKind};
use serde::{Deserialize, Serialize};

/// One damage instance of a technique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageInstance {
    pub amount: f64,
    /// First entry is the packet kind
    pub kinds: Vec<DamageKind>,
}

/// Damage block of a technique
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechniqueDamage {
    #[serde(default)]
    pub instances: Vec<DamageInstance>,
    #[serde(default)]
    pub scaling: StatScaling,
}

/// Per-axis multipliers a technique applies to its weapon's coefficients
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisBias {
    pub geometry_mult: f64,
    pub energy_mult: f64,
    pub rigidity_mult: f64,
}

impl Default for AxisBias {
    fn default() -> Self {
        AxisBias {
            geometry_mult: 1.0,
            energy_mult: 1.0,
            rigidity_mult: 1.0,
        }
    }
}

/// Hit-chance multipliers applied while this technique is the active defense
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefenseMultipliers {
    pub parry: f64,
    pub block: f64,
    pub deflect: f64,
    pub dodge: f64,
    pub counter: f64,
}

impl Default for DefenseMultipliers {
    fn default() -> Self {
        DefenseMultipliers {
            parry: 1.0,
            block: 1.0,
            deflect: 1.0,
            dodge: 1.0,
            counter: 1.0,
        }
    }
}

impl DefenseMultipliers {
    pub fn get(&self, kind: DefenseKind) -> f64 {
        match kind {
            DefenseKind::Parry => self.parry,
            DefenseKind::Block => self.block,
            DefenseKind::Deflect => self.deflect,
            DefenseKind::Dodge => self.dodge,
            DefenseKind::Counter => self.counter,
        }
    }
}

/// What a defensive technique covers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefenseCoverage {
    pub kind: DefenseKind,
    #[serde(default)]
    pub guard_height: Option<Height>,
    #[serde(default)]
    pub covers_adjacent: bool,
    #[serde(default)]
    pub multipliers: DefenseMultipliers,
}

impl DefenseCoverage {
    /// The multiplier for this coverage's own defense kind
    pub fn multiplier(&self) -> f64 {
        self.multipliers.get(self.kind)
    }
}

/// Bonuses granted while the technique is an active maneuver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayBonus {
    /// Offensive: added to the holder's hit chance
    pub to_hit_bonus: f64,
    /// Offensive: multiplies packet amount
    pub damage_mult: f64,
    /// Defensive: subtracted from attackers' hit chance
    pub defense_bonus: f64,
}

impl Default for OverlayBonus {
    fn default() -> Self {
        OverlayBonus {
            to_hit_bonus: 0.0,
            damage_mult: 1.0,
            defense_bonus: 0.0,
        }
    }
}

impl OverlayBonus {
    /// Combine two overlays: bonuses add, damage multipliers multiply
    pub fn stack(&self, other: &OverlayBonus) -> OverlayBonus {
        OverlayBonus {
            to_hit_bonus: self.to_hit_bonus + other.to_hit_bonus,
            damage_mult: self.damage_mult * other.damage_mult,
            defense_bonus: self.defense_bonus + other.defense_bonus,
        }
    }
}

/// An immutable technique definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technique {
    pub id: String,
    pub name: String,
    pub attack_mode: AttackMode,

    // === Targeting ===
    #[serde(default)]
    pub target_height: Option<Height>,
    #[serde(default)]
    pub secondary_height: Option<Height>,
    #[serde(default)]
    pub difficulty: f64,

    // === Damage ===
    #[serde(default)]
    pub damage: TechniqueDamage,
    #[serde(default)]
    pub axis_bias: AxisBias,
    /// Stamina spent by attempting the technique
    #[serde(default)]
    pub stamina_cost: f64,

    // === Defense ===
    #[serde(default)]
    pub defense: Option<DefenseCoverage>,

    // === Modifiers ===
    #[serde(default)]
    pub overlay: OverlayBonus,
    #[serde(default)]
    pub advantage: AdvantageOverrides,
}

impl Technique {
    /// Sum of all damage instance amounts
    pub fn base_damage(&self) -> f64 {
        self.damage.instances.iter().map(|i| i.amount).sum()
    }

    /// Kind of the packet this technique produces, if it deals damage at all
    pub fn primary_kind(&self) -> Option<DamageKind> {
        self.damage
            .instances
            .iter()
            .find_map(|i| i.kinds.first().copied())
    }

    pub fn is_offensive(&self) -> bool {
        self.attack_mode != AttackMode::None && self.primary_kind().is_some()
    }
}
