//! Armour materials, pieces and per-part armour stacks

use super::material::{MaterialLayer, Shielding, Susceptibility};
use crate::body::{BodyPartDef, PartTag, Side};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Shape profile of a piece (fluted, curved, flat) and what it adds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeProfile {
    pub name: String,
    pub dispersion_bonus: f64,
    pub absorption_bonus: f64,
}

/// An armour material definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmourMaterial {
    pub id: String,
    pub name: String,
    pub shielding: Shielding,
    #[serde(default)]
    pub susceptibility: Susceptibility,
    pub thickness_cm: f64,
    #[serde(default)]
    pub durability: f64,
    #[serde(default)]
    pub shape: ShapeProfile,
}

impl ArmourMaterial {
    /// Shielding with the shape bonuses folded in
    pub fn effective_shielding(&self) -> Shielding {
        Shielding {
            deflection: self.shielding.deflection,
            absorption: self.shielding.absorption + self.shape.absorption_bonus,
            dispersion: self.shielding.dispersion + self.shape.dispersion_bonus,
        }
        .clamped()
    }

    pub fn to_layer(&self) -> MaterialLayer {
        MaterialLayer {
            name: self.id.clone(),
            shielding: self.effective_shielding(),
            susceptibility: self.susceptibility,
            thickness_cm: self.thickness_cm,
            durability: self.durability,
            structural: false,
        }
    }
}

/// Equipment layer a piece is worn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmourLayer {
    Cloak,
    Mail,
    Plate,
    Gambeson,
}

impl ArmourLayer {
    /// Outside-in rank; lower is further out
    pub fn rank(&self) -> u8 {
        match self {
            ArmourLayer::Cloak => 0,
            ArmourLayer::Mail => 1,
            ArmourLayer::Plate => 2,
            ArmourLayer::Gambeson => 3,
        }
    }
}

/// How completely a piece encloses what it covers
///
/// Ordered from least to most complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Totality {
    Minimal,
    Frontal,
    Comprehensive,
    Intimidating,
    Total,
}

/// One coverage entry of a piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coverage {
    pub part_tags: Vec<PartTag>,
    /// `None` covers both sides
    #[serde(default)]
    pub side: Option<Side>,
    pub layer: ArmourLayer,
    pub totality: Totality,
}

impl Coverage {
    pub fn covers(&self, part: &BodyPartDef) -> bool {
        if !self.part_tags.contains(&part.tag) {
            return false;
        }
        match self.side {
            None => true,
            Some(side) => side == part.side,
        }
    }
}

/// An armour piece definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmourPiece {
    pub id: String,
    pub name: String,
    pub material: String,
    pub coverage: Vec<Coverage>,
}

impl ArmourPiece {
    /// The coverage entry that applies to a part, if any
    pub fn coverage_for(&self, part: &BodyPartDef) -> Option<&Coverage> {
        self.coverage.iter().find(|c| c.covers(part))
    }
}

/// Armour layers over one body part, outside-in
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArmourStack {
    pub layers: Vec<MaterialLayer>,
    /// Best totality among the covering pieces
    pub totality: Option<Totality>,
}

impl ArmourStack {
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Build the armour stack for a part from the pieces an agent wears
pub fn build_armour_stack<'a>(
    pieces: impl IntoIterator<Item = &'a ArmourPiece>,
    materials: &HashMap<String, ArmourMaterial>,
    part: &BodyPartDef,
) -> ArmourStack {
    let mut covering: Vec<(ArmourLayer, Totality, &ArmourMaterial)> = Vec::new();

    for piece in pieces {
        let Some(coverage) = piece.coverage_for(part) else {
            continue;
        };
        match materials.get(&piece.material) {
            Some(material) => covering.push((coverage.layer, coverage.totality, material)),
            None => warn!(piece = %piece.id, material = %piece.material, "unknown armour material"),
        }
    }

    covering.sort_by_key(|(layer, _, _)| layer.rank());

    ArmourStack {
        layers: covering.iter().map(|(_, _, m)| m.to_layer()).collect(),
        totality: covering.iter().map(|(_, t, _)| *t).max(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{Height, PartFlags, PartGeometry};

    fn part(tag: PartTag, side: Side) -> BodyPartDef {
        BodyPartDef {
            name: "part".to_string(),
            tag,
            side,
            parent: None,
            tissue: "limb".to_string(),
            has_major_artery: false,
            flags: PartFlags::default(),
            geometry: PartGeometry::default(),
            height: Height::Mid,
            exposure: 1.0,
        }
    }

    fn material(id: &str) -> ArmourMaterial {
        ArmourMaterial {
            id: id.to_string(),
            name: id.to_string(),
            shielding: Shielding::new(0.5, 0.5, 0.5),
            susceptibility: Susceptibility::default(),
            thickness_cm: 0.2,
            durability: 100.0,
            shape: ShapeProfile::default(),
        }
    }

    fn piece(id: &str, material: &str, layer: ArmourLayer, totality: Totality) -> ArmourPiece {
        ArmourPiece {
            id: id.to_string(),
            name: id.to_string(),
            material: material.to_string(),
            coverage: vec![Coverage {
                part_tags: vec![PartTag::Torso],
                side: None,
                layer,
                totality,
            }],
        }
    }

    #[test]
    fn test_stack_ordered_outside_in() {
        let mut materials = HashMap::new();
        for id in ["wool", "steel", "linen"] {
            materials.insert(id.to_string(), material(id));
        }
        let pieces = vec![
            piece("gambeson", "linen", ArmourLayer::Gambeson, Totality::Comprehensive),
            piece("cloak", "wool", ArmourLayer::Cloak, Totality::Minimal),
            piece("breastplate", "steel", ArmourLayer::Plate, Totality::Intimidating),
        ];

        let stack = build_armour_stack(&pieces, &materials, &part(PartTag::Torso, Side::Center));
        let names: Vec<_> = stack.layers.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["wool", "steel", "linen"]);
        assert_eq!(stack.totality, Some(Totality::Intimidating));
    }

    #[test]
    fn test_uncovered_part_has_empty_stack() {
        let mut materials = HashMap::new();
        materials.insert("steel".to_string(), material("steel"));
        let pieces = vec![piece("breastplate", "steel", ArmourLayer::Plate, Totality::Total)];

        let stack = build_armour_stack(&pieces, &materials, &part(PartTag::Leg, Side::Left));
        assert!(stack.is_empty());
        assert_eq!(stack.totality, None);
    }

    #[test]
    fn test_sided_coverage() {
        let coverage = Coverage {
            part_tags: vec![PartTag::Arm],
            side: Some(Side::Left),
            layer: ArmourLayer::Plate,
            totality: Totality::Frontal,
        };
        assert!(coverage.covers(&part(PartTag::Arm, Side::Left)));
        assert!(!coverage.covers(&part(PartTag::Arm, Side::Right)));
    }

    #[test]
    fn test_shape_bonus_folds_into_shielding() {
        let mut m = material("steel");
        m.shape = ShapeProfile {
            name: "fluted".to_string(),
            dispersion_bonus: 0.1,
            absorption_bonus: 0.6,
        };
        let s = m.effective_shielding();
        assert!((s.dispersion - 0.6).abs() < 1e-12);
        assert_eq!(s.absorption, 1.0);
    }
}
