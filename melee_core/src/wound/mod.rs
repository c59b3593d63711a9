//! Wounds - per-layer severity and severing

mod sever;
mod severity;

pub use sever::{is_severed, is_through};
pub use severity::{layer_severity, severity_from_depth, severity_from_volume, Severity};

use crate::config::WoundConstants;
use crate::layers::AxisDamage;
use serde::{Deserialize, Serialize};

/// Accumulated damage on one tissue layer of a part
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerWound {
    /// Energy and rigidity damage so far
    pub volume: f64,
    /// Geometry damage so far
    pub depth: f64,
    pub severity: Severity,
}

impl LayerWound {
    /// Add a hit's damage and recompute severity; severity never drops
    ///
    /// Returns the previous severity.
    pub fn accumulate(&mut self, damage: &AxisDamage, structural: bool, constants: &WoundConstants) -> Severity {
        let previous = self.severity;
        self.volume += damage.volume();
        self.depth += damage.depth();
        let computed = layer_severity(self.volume, self.depth, structural, constants);
        self.severity = previous.max(computed);
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_across_hits() {
        let c = WoundConstants::default();
        let mut wound = LayerWound::default();
        let hit = AxisDamage {
            geometry: 0.3,
            energy: 0.0,
            rigidity: 0.0,
        };

        wound.accumulate(&hit, false, &c);
        assert_eq!(wound.severity, Severity::Minor);

        let previous = wound.accumulate(&hit, false, &c);
        assert_eq!(previous, Severity::Minor);
        assert_eq!(wound.severity, Severity::Inhibited);
        assert!((wound.depth - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_severity_never_decreases() {
        let c = WoundConstants::default();
        let mut wound = LayerWound {
            volume: 0.0,
            depth: 0.0,
            severity: Severity::Disabled,
        };
        wound.accumulate(&AxisDamage::default(), false, &c);
        assert_eq!(wound.severity, Severity::Disabled);
    }
}
