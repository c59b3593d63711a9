//! Weapon records

use crate::types::AttackMode;
use serde::{Deserialize, Serialize};

/// How a weapon performs in one attack mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffensiveProfile {
    /// Added to hit chance (scaled by tuning)
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default = "default_damage_modifier")]
    pub damage_modifier: f64,
    /// Energy delivered by a baseline wielder, joule-like
    pub reference_energy: f64,
    pub geometry_coeff: f64,
    pub rigidity_coeff: f64,
    /// Legacy depth budget
    #[serde(default)]
    pub penetration_cm: f64,
}

fn default_damage_modifier() -> f64 {
    1.0
}

/// A weapon definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub thrust: Option<OffensiveProfile>,
    #[serde(default)]
    pub swing: Option<OffensiveProfile>,
    #[serde(default)]
    pub ranged: Option<OffensiveProfile>,
    /// Defensive parry rating
    #[serde(default)]
    pub parry: f64,
}

impl Weapon {
    /// Offensive profile for an attack mode, if the weapon supports it
    pub fn profile(&self, mode: AttackMode) -> Option<&OffensiveProfile> {
        match mode {
            AttackMode::Thrust => self.thrust.as_ref(),
            AttackMode::Swing => self.swing.as_ref(),
            AttackMode::Ranged => self.ranged.as_ref(),
            AttackMode::None => None,
        }
    }
}
