//! Body plan definitions

use serde::{Deserialize, Serialize};

/// Vertical zone an attack targets or a guard covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Height {
    Low,
    Mid,
    High,
}

impl Height {
    fn level(&self) -> i8 {
        match self {
            Height::Low => 0,
            Height::Mid => 1,
            Height::High => 2,
        }
    }

    /// low<->mid, mid<->high
    pub fn is_adjacent(&self, other: Height) -> bool {
        (self.level() - other.level()).abs() == 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
    Center,
}

/// Anatomical tag armour coverage and rules key off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartTag {
    Head,
    Eye,
    Ear,
    Neck,
    Torso,
    Abdomen,
    Arm,
    Hand,
    Finger,
    Leg,
    Foot,
    Toe,
}

impl PartTag {
    /// Digits, eyes and ears sever at a reduced bar
    pub fn is_small(&self) -> bool {
        matches!(self, PartTag::Finger | PartTag::Toe | PartTag::Eye | PartTag::Ear)
    }
}

/// Functional flags on a part
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartFlags {
    pub vital: bool,
    pub internal: bool,
    pub grasp: bool,
    pub stand: bool,
    pub see: bool,
    pub hear: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartGeometry {
    pub thickness_cm: f64,
    pub length_cm: f64,
    pub area_cm2: f64,
}

/// One part of a body plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPartDef {
    pub name: String,
    pub tag: PartTag,
    #[serde(default = "default_side")]
    pub side: Side,
    #[serde(default)]
    pub parent: Option<String>,
    /// Tissue template id
    pub tissue: String,
    #[serde(default)]
    pub has_major_artery: bool,
    #[serde(default)]
    pub flags: PartFlags,
    #[serde(default)]
    pub geometry: PartGeometry,
    pub height: Height,
    /// Base weight for hit location
    #[serde(default = "default_exposure")]
    pub exposure: f64,
}

fn default_side() -> Side {
    Side::Center
}

fn default_exposure() -> f64 {
    1.0
}

/// A species' part tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPlan {
    pub id: String,
    pub parts: Vec<BodyPartDef>,
}

impl BodyPlan {
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.parts.iter().position(|p| p.name == name)
    }

    pub fn part(&self, name: &str) -> Option<&BodyPartDef> {
        self.parts.iter().find(|p| p.name == name)
    }

    pub fn parent_index(&self, index: usize) -> Option<usize> {
        let parent = self.parts.get(index)?.parent.as_deref()?;
        self.index_of(parent)
    }

    /// Whether `ancestor` is `index` or one of its ancestors
    pub fn is_within(&self, index: usize, ancestor: usize) -> bool {
        let mut current = Some(index);
        // Bounded by part count in case content has a cycle
        for _ in 0..=self.parts.len() {
            match current {
                Some(i) if i == ancestor => return true,
                Some(i) => current = self.parent_index(i),
                None => return false,
            }
        }
        false
    }

    /// First torso part, the fallback hit location
    pub fn torso_index(&self) -> Option<usize> {
        self.parts.iter().position(|p| p.tag == PartTag::Torso)
    }
}
