//! Core enumerations shared across the resolver

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

/// Damage kind carried by a packet
///
/// The domain is closed: physical kinds run through the layer resolver,
/// the rest bypass it and land directly on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    // Physical
    Pierce,
    Slash,
    Bludgeon,
    Crush,
    Shatter,
    // Non-physical
    Fire,
    Frost,
    Shock,
    Corrosion,
}

/// Shape of the contact a physical kind makes with a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactShape {
    /// Cutting edge
    Edge,
    /// Narrow point
    Point,
    /// Broad impact
    Blunt,
}

impl DamageKind {
    pub fn all() -> &'static [DamageKind] {
        &[
            DamageKind::Pierce,
            DamageKind::Slash,
            DamageKind::Bludgeon,
            DamageKind::Crush,
            DamageKind::Shatter,
            DamageKind::Fire,
            DamageKind::Frost,
            DamageKind::Shock,
            DamageKind::Corrosion,
        ]
    }

    /// Contact shape for physical kinds, `None` for non-physical ones
    pub fn contact_shape(&self) -> Option<ContactShape> {
        match self {
            DamageKind::Slash => Some(ContactShape::Edge),
            DamageKind::Pierce => Some(ContactShape::Point),
            DamageKind::Bludgeon | DamageKind::Crush | DamageKind::Shatter => {
                Some(ContactShape::Blunt)
            }
            DamageKind::Fire | DamageKind::Frost | DamageKind::Shock | DamageKind::Corrosion => {
                None
            }
        }
    }

    pub fn is_physical(&self) -> bool {
        self.contact_shape().is_some()
    }

    /// Edge and point kinds stop once geometry is exhausted
    pub fn propagates_on_geometry(&self) -> bool {
        matches!(
            self.contact_shape(),
            Some(ContactShape::Edge) | Some(ContactShape::Point)
        )
    }
}

/// How a technique delivers its attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackMode {
    Thrust,
    Swing,
    Ranged,
    /// Non-weapon techniques (defensive maneuvers, footwork)
    None,
}

/// Risk/reward dial chosen when committing to an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stakes {
    Probing,
    Guarded,
    Committed,
    Reckless,
}

impl Stakes {
    /// All stakes, from least to most committed
    pub fn all() -> &'static [Stakes] {
        &[
            Stakes::Probing,
            Stakes::Guarded,
            Stakes::Committed,
            Stakes::Reckless,
        ]
    }
}

/// Classified result of an attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Hit,
    Miss,
    Blocked,
    Parried,
    Deflected,
    Dodged,
    Countered,
}

impl Outcome {
    pub fn all() -> &'static [Outcome] {
        &[
            Outcome::Hit,
            Outcome::Miss,
            Outcome::Blocked,
            Outcome::Parried,
            Outcome::Deflected,
            Outcome::Dodged,
            Outcome::Countered,
        ]
    }

    /// Whether the attacker's aggression succeeded
    pub fn is_hit(&self) -> bool {
        matches!(self, Outcome::Hit)
    }
}

/// Active defense a technique provides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefenseKind {
    Parry,
    Block,
    Deflect,
    Dodge,
    Counter,
}

impl DefenseKind {
    /// The miss-family outcome produced when this defense stops an attack
    pub fn miss_outcome(&self) -> Outcome {
        match self {
            DefenseKind::Parry => Outcome::Parried,
            DefenseKind::Block => Outcome::Blocked,
            DefenseKind::Deflect => Outcome::Deflected,
            DefenseKind::Dodge => Outcome::Dodged,
            DefenseKind::Counter => Outcome::Countered,
        }
    }
}

/// Attributes in an agent's stat block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Power,
    Speed,
    Dexterity,
    Fortitude,
    Skill,
    Will,
}

impl Stat {
    /// Stats that contribute to strike velocity
    pub fn velocity_group() -> &'static [Stat] {
        &[Stat::Speed, Stat::Dexterity]
    }

    /// Stats that contribute to effective striking mass
    pub fn mass_group() -> &'static [Stat] {
        &[Stat::Power, Stat::Fortitude]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_kinds_have_shapes() {
        assert_eq!(DamageKind::Slash.contact_shape(), Some(ContactShape::Edge));
        assert_eq!(DamageKind::Pierce.contact_shape(), Some(ContactShape::Point));
        assert_eq!(DamageKind::Crush.contact_shape(), Some(ContactShape::Blunt));
        assert_eq!(DamageKind::Fire.contact_shape(), None);
    }

    #[test]
    fn test_physical_partition() {
        let physical: Vec<_> = DamageKind::all().iter().filter(|k| k.is_physical()).collect();
        assert_eq!(physical.len(), 5);
    }

    #[test]
    fn test_geometry_propagation_only_for_edge_and_point() {
        assert!(DamageKind::Pierce.propagates_on_geometry());
        assert!(DamageKind::Slash.propagates_on_geometry());
        assert!(!DamageKind::Bludgeon.propagates_on_geometry());
        assert!(!DamageKind::Shock.propagates_on_geometry());
    }

    #[test]
    fn test_stakes_ordering() {
        assert!(Stakes::Probing < Stakes::Guarded);
        assert!(Stakes::Committed < Stakes::Reckless);
    }

    #[test]
    fn test_defense_miss_outcomes() {
        assert_eq!(DefenseKind::Parry.miss_outcome(), Outcome::Parried);
        assert_eq!(DefenseKind::Block.miss_outcome(), Outcome::Blocked);
        assert_eq!(DefenseKind::Counter.miss_outcome(), Outcome::Countered);
    }
}
