//! Tissue materials and templates

use super::material::{MaterialLayer, Shielding, Susceptibility};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A tissue material (skin, fat, muscle, bone...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TissueMaterial {
    pub id: String,
    #[serde(default)]
    pub shielding: Shielding,
    #[serde(default)]
    pub susceptibility: Susceptibility,
    #[serde(default)]
    pub durability: f64,
    #[serde(default)]
    pub structural: bool,
}

/// One layer of a tissue template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TissueLayerDef {
    pub material: String,
    /// Fraction of the part's thickness
    pub thickness_ratio: f64,
}

/// Outside-in tissue layering for a kind of body part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TissueTemplate {
    pub id: String,
    pub layers: Vec<TissueLayerDef>,
}

impl TissueTemplate {
    pub fn ratio_sum(&self) -> f64 {
        self.layers.iter().map(|l| l.thickness_ratio).sum()
    }
}

/// Materialize a template for a part of the given thickness
///
/// Returns `None` if any layer references an unknown material.
pub fn build_tissue_stack(
    template: &TissueTemplate,
    materials: &HashMap<String, TissueMaterial>,
    thickness_cm: f64,
) -> Option<Vec<MaterialLayer>> {
    template
        .layers
        .iter()
        .map(|def| {
            let material = materials.get(&def.material)?;
            Some(MaterialLayer {
                name: material.id.clone(),
                shielding: material.shielding.clamped(),
                susceptibility: material.susceptibility,
                thickness_cm: def.thickness_ratio * thickness_cm,
                durability: material.durability,
                structural: material.structural,
            })
        })
        .collect()
}
