//! Layered material resolution for armour and tissue

mod armour;
mod material;
mod resolver;
mod tissue;

pub use armour::{
    build_armour_stack, ArmourLayer, ArmourMaterial, ArmourPiece, ArmourStack, Coverage,
    ShapeProfile, Totality,
};
pub use material::{AxisSusceptibility, MaterialLayer, Shielding, Susceptibility};
pub use resolver::{
    resolve_layer, resolve_part, resolve_stack, roll_gap, AxisDamage, LayerResult,
    PartResolution, StackResult,
};
pub use tissue::{build_tissue_stack, TissueLayerDef, TissueMaterial, TissueTemplate};
