//! Stat block and resource pools

use super::species::Recovery;
use crate::types::Stat;
use serde::{Deserialize, Serialize};

/// Raw attributes on a 0..stat_max scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub power: f64,
    pub speed: f64,
    pub dexterity: f64,
    pub fortitude: f64,
    pub skill: f64,
    pub will: f64,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::uniform(5.0)
    }
}

impl StatBlock {
    /// Every stat at the same value
    pub fn uniform(value: f64) -> Self {
        StatBlock {
            power: value,
            speed: value,
            dexterity: value,
            fortitude: value,
            skill: value,
            will: value,
        }
    }

    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Power => self.power,
            Stat::Speed => self.speed,
            Stat::Dexterity => self.dexterity,
            Stat::Fortitude => self.fortitude,
            Stat::Skill => self.skill,
            Stat::Will => self.will,
        }
    }

    pub fn set(&mut self, stat: Stat, value: f64) {
        match stat {
            Stat::Power => self.power = value,
            Stat::Speed => self.speed = value,
            Stat::Dexterity => self.dexterity = value,
            Stat::Fortitude => self.fortitude = value,
            Stat::Skill => self.skill = value,
            Stat::Will => self.will = value,
        }
    }
}

/// Depletable pools
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    // === Pools with a maximum ===
    pub blood: f64,
    pub max_blood: f64,
    pub stamina: f64,
    pub max_stamina: f64,
    pub focus: f64,
    pub max_focus: f64,

    // === Accumulators ===
    pub pain: f64,
    pub trauma: f64,
}

impl Default for Resources {
    fn default() -> Self {
        Resources {
            blood: 5.0,
            max_blood: 5.0,
            stamina: 10.0,
            max_stamina: 10.0,
            focus: 10.0,
            max_focus: 10.0,
            pain: 0.0,
            trauma: 0.0,
        }
    }
}

fn fraction(current: f64, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else {
        (current / max).clamp(0.0, 1.0)
    }
}

impl Resources {
    pub fn blood_fraction(&self) -> f64 {
        fraction(self.blood, self.max_blood)
    }

    pub fn stamina_fraction(&self) -> f64 {
        fraction(self.stamina, self.max_stamina)
    }

    pub fn focus_fraction(&self) -> f64 {
        fraction(self.focus, self.max_focus)
    }

    pub fn lose_blood(&mut self, amount: f64) {
        self.blood = (self.blood - amount.max(0.0)).max(0.0);
    }

    pub fn spend_stamina(&mut self, amount: f64) {
        self.stamina = (self.stamina - amount.max(0.0)).max(0.0);
    }

    pub fn add_pain(&mut self, amount: f64) {
        self.pain += amount.max(0.0);
    }

    pub fn add_trauma(&mut self, amount: f64) {
        self.trauma += amount.max(0.0);
    }

    /// Refill pools by per-tick rates, up to their maxima
    pub fn recover(&mut self, rates: &Recovery) {
        self.blood = (self.blood + rates.blood.max(0.0)).min(self.max_blood);
        self.stamina = (self.stamina + rates.stamina.max(0.0)).min(self.max_stamina);
        self.focus = (self.focus + rates.focus.max(0.0)).min(self.max_focus);
    }
}
