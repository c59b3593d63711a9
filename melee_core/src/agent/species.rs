//! Species records: body plan, resource pools, size and natural weapons

use super::stats::Resources;
use crate::body::PartTag;
use serde::{Deserialize, Serialize};

/// A weapon the body itself provides, usable while the named part remains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NaturalWeapon {
    pub weapon_id: String,
    pub required_part: PartTag,
}

/// Relative size against a baseline humanoid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeModifiers {
    pub height: f64,
    /// Scales the energy of this species' strikes
    pub mass: f64,
}

impl Default for SizeModifiers {
    fn default() -> Self {
        SizeModifiers {
            height: 1.0,
            mass: 1.0,
        }
    }
}

/// Per-tick pool recovery
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recovery {
    pub blood: f64,
    pub stamina: f64,
    pub focus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDefinition {
    pub id: String,
    pub name: String,
    pub body_plan: String,
    pub base_blood: f64,
    pub base_stamina: f64,
    pub base_focus: f64,
    #[serde(default)]
    pub recovery: Recovery,
    #[serde(default)]
    pub size: SizeModifiers,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub natural_weapons: Vec<NaturalWeapon>,
}

impl SpeciesDefinition {
    /// Full pools for a fresh member of the species
    pub fn resources(&self) -> Resources {
        Resources {
            blood: self.base_blood,
            max_blood: self.base_blood,
            stamina: self.base_stamina,
            max_stamina: self.base_stamina,
            focus: self.base_focus,
            max_focus: self.base_focus,
            ..Resources::default()
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
