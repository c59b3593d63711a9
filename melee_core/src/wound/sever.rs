//! Severing check

use crate::config::SeverBars;
use crate::types::ContactShape;

impl SeverBars {
    /// Destroyed-volume bar for a contact shape
    pub fn bar(&self, shape: ContactShape, small_part: bool) -> f64 {
        let bar = match shape {
            ContactShape::Edge => self.edge,
            ContactShape::Point => self.point,
            ContactShape::Blunt => self.blunt,
        };
        if small_part {
            bar * self.small_part_factor
        } else {
            bar
        }
    }
}

/// Whether a strike counts as having gone clean through the part
///
/// Edges chop: cut depth builds up over hits until it spans the part's
/// thickness. Points and blunt strikes must leave the innermost layer in a
/// single hit, as must edges against a part with no thickness.
pub fn is_through(shape: ContactShape, exited: bool, cut_depth_cm: f64, thickness_cm: f64) -> bool {
    match shape {
        ContactShape::Edge if thickness_cm > 0.0 => exited || cut_depth_cm >= thickness_cm,
        _ => exited,
    }
}

/// A part is severed when the strike went clean through and enough volume
/// is destroyed
pub fn is_severed(
    passed_through: bool,
    destroyed_volume: f64,
    shape: ContactShape,
    small_part: bool,
    bars: &SeverBars,
) -> bool {
    passed_through && destroyed_volume >= bars.bar(shape, small_part)
}
