//! Combatant state

mod conditions;
mod species;
mod stats;

pub use conditions::{ConditionKind, Conditions, TimedCondition};
pub use species::{NaturalWeapon, Recovery, SizeModifiers, SpeciesDefinition};
pub use stats::{Resources, StatBlock};

use crate::body::{Body, BodyPlan, PartTag};
use crate::config::{CombatTuning, Content, ResourceConstants};
use crate::damage::{OverlayBonus, Weapon};
use crate::types::AgentId;
use serde::{Deserialize, Serialize};

/// What the agent has committed to this exchange
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclaredAction {
    /// Focused on defending
    Defending,
    /// Busy with its own attack
    Attacking,
    #[default]
    Passive,
}

/// Split of intent between attack and defense, used by contested rolls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stance {
    pub attack: f64,
    pub defense: f64,
}

impl Default for Stance {
    fn default() -> Self {
        Stance {
            attack: 0.5,
            defense: 0.5,
        }
    }
}

/// A technique whose overlay is active for a tick window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveManeuver {
    pub technique_id: String,
    pub starts_at: u64,
    /// Exclusive
    pub ends_at: u64,
}

impl ActiveManeuver {
    pub fn is_active(&self, tick: u64) -> bool {
        self.starts_at <= tick && tick < self.ends_at
    }
}

/// One combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub stats: StatBlock,
    pub resources: Resources,
    /// Intrinsic balance in [0, 1]
    balance: f64,
    pub body: Body,

    // === Species ===
    pub species: Option<String>,
    pub size: SizeModifiers,
    pub recovery: Recovery,
    pub natural_weapons: Vec<NaturalWeapon>,

    // === Equipment ===
    pub weapon: Option<String>,
    pub armour: Vec<String>,

    // === Declared intent ===
    /// Active defense technique
    pub defense: Option<String>,
    pub action: DeclaredAction,
    pub stance: Stance,
    pub maneuvers: Vec<ActiveManeuver>,
    pub dodge_modifier: f64,

    pub conditions: Conditions,
}

impl Agent {
    pub fn new(id: AgentId, body: Body) -> Self {
        Agent {
            id,
            stats: StatBlock::default(),
            resources: Resources::default(),
            balance: 1.0,
            body,
            species: None,
            size: SizeModifiers::default(),
            recovery: Recovery::default(),
            natural_weapons: Vec::new(),
            weapon: None,
            armour: Vec::new(),
            defense: None,
            action: DeclaredAction::default(),
            stance: Stance::default(),
            maneuvers: Vec::new(),
            dodge_modifier: 0.0,
            conditions: Conditions::new(),
        }
    }

    /// A fresh member of `species` built on `plan`
    ///
    /// The caller supplies the plan the species names; see
    /// [`Content::spawn`] for the checked lookup.
    pub fn from_species(id: AgentId, species: &SpeciesDefinition, plan: &BodyPlan) -> Self {
        let mut agent = Agent::new(id, Body::new(plan));
        agent.species = Some(species.id.clone());
        agent.resources = species.resources();
        agent.size = species.size;
        agent.recovery = species.recovery;
        agent.natural_weapons = species.natural_weapons.clone();
        agent
    }

    pub fn with_stats(mut self, stats: StatBlock) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_weapon(mut self, weapon: impl Into<String>) -> Self {
        self.weapon = Some(weapon.into());
        self
    }

    pub fn with_armour<S: Into<String>>(mut self, pieces: impl IntoIterator<Item = S>) -> Self {
        self.armour = pieces.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_defense(mut self, technique: impl Into<String>) -> Self {
        self.defense = Some(technique.into());
        self
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Set balance, clamped to [0, 1]; returns the stored value
    pub fn set_balance(&mut self, value: f64) -> f64 {
        self.balance = value.clamp(0.0, 1.0);
        self.balance
    }

    /// Whether an attached part carries `tag`
    pub fn has_part(&self, tag: PartTag) -> bool {
        let plan = self.body.plan();
        plan.parts
            .iter()
            .enumerate()
            .any(|(i, p)| p.tag == tag && self.body.is_attached(i))
    }

    /// Whether any attached part can hold a weapon
    pub fn can_grasp(&self) -> bool {
        let plan = self.body.plan();
        plan.parts
            .iter()
            .enumerate()
            .any(|(i, p)| p.flags.grasp && self.body.is_attached(i))
    }

    /// Natural weapon `weapon_id`, if the part it needs is still attached
    pub fn natural_weapon(&self, weapon_id: &str) -> Option<&NaturalWeapon> {
        self.natural_weapons
            .iter()
            .find(|n| n.weapon_id == weapon_id)
            .filter(|n| self.has_part(n.required_part))
    }

    /// Weapon the agent strikes and parries with
    ///
    /// A held weapon needs an attached grasping part. Without one the agent
    /// falls back to its first natural weapon whose part remains.
    pub fn strike_weapon<'c>(&self, content: &'c Content) -> Option<&'c Weapon> {
        let held = self
            .weapon
            .as_deref()
            .filter(|_| self.can_grasp())
            .and_then(|id| content.weapon(id));
        held.or_else(|| {
            self.natural_weapons
                .iter()
                .filter(|n| self.has_part(n.required_part))
                .find_map(|n| content.weapon(&n.weapon_id))
        })
    }

    /// Recover pools by one tick of the species' rates
    pub fn recover(&mut self) {
        self.resources.recover(&self.recovery);
    }

    /// Conditions that follow from current state, recomputed on every call
    pub fn derived_conditions(&self, constants: &ResourceConstants) -> Vec<ConditionKind> {
        let mut derived = Vec::new();
        if self.body.is_blind() {
            derived.push(ConditionKind::Blinded);
        }
        if self.resources.stamina_fraction() < constants.winded_fraction {
            derived.push(ConditionKind::Winded);
        }
        if self.balance < constants.off_balance {
            derived.push(ConditionKind::OffBalance);
        }
        if self.resources.blood_fraction() < constants.bleeding_fraction {
            derived.push(ConditionKind::Bleeding);
        }
        derived
    }

    /// Stored and derived conditions, each kind once
    pub fn conditions(&self, constants: &ResourceConstants) -> Vec<ConditionKind> {
        let derived = self.derived_conditions(constants);
        ConditionKind::all()
            .iter()
            .copied()
            .filter(|kind| self.conditions.has(*kind) || derived.contains(kind))
            .collect()
    }

    pub fn has_condition(&self, kind: ConditionKind, constants: &ResourceConstants) -> bool {
        self.conditions(constants).contains(&kind)
    }

    /// Product of the effectiveness multipliers of every held condition
    pub fn combat_effectiveness(&self, tuning: &CombatTuning) -> f64 {
        self.conditions(&tuning.resources)
            .into_iter()
            .map(|kind| tuning.conditions.modifier(kind).effectiveness)
            .product::<f64>()
            .clamp(0.0, 1.0)
    }

    /// Combined overlay of every maneuver active at `tick`
    ///
    /// Maneuvers naming unknown techniques contribute nothing.
    pub fn active_overlay(&self, content: &Content, tick: u64) -> OverlayBonus {
        self.maneuvers
            .iter()
            .filter(|m| m.is_active(tick))
            .filter_map(|m| content.technique(&m.technique_id))
            .fold(OverlayBonus::default(), |acc, t| acc.stack(&t.overlay))
    }
}
