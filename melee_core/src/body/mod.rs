//! Body plans, per-agent body state and hit location

pub mod location;
mod plan;
mod state;

pub use location::{location_weights, select_hit_location, Guard, LocationRequest};
pub use plan::{BodyPartDef, BodyPlan, Height, PartFlags, PartGeometry, PartTag, Side};
pub use state::{Body, PartState};
