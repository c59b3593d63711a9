//! Severity curves

use crate::config::{SeverityLadder, WoundConstants};
use serde::{Deserialize, Serialize};

/// Wound severity, ordered from unharmed to gone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    None,
    Minor,
    Inhibited,
    Disabled,
    Broken,
    Missing,
}

impl Severity {
    pub fn all() -> &'static [Severity] {
        &[
            Severity::None,
            Severity::Minor,
            Severity::Inhibited,
            Severity::Disabled,
            Severity::Broken,
            Severity::Missing,
        ]
    }
}

impl SeverityLadder {
    /// Highest step whose threshold `damage` reaches
    pub fn classify(&self, damage: f64) -> Severity {
        if damage >= self.missing {
            Severity::Missing
        } else if damage >= self.broken {
            Severity::Broken
        } else if damage >= self.disabled {
            Severity::Disabled
        } else if damage >= self.inhibited {
            Severity::Inhibited
        } else if damage >= self.minor {
            Severity::Minor
        } else {
            Severity::None
        }
    }
}

/// Severity from destroyed volume (energy and rigidity damage)
///
/// Only structural layers can go missing.
pub fn severity_from_volume(damage: f64, structural: bool, constants: &WoundConstants) -> Severity {
    let severity = constants.volume.classify(damage);
    if structural {
        severity
    } else {
        severity.min(Severity::Broken)
    }
}

/// Severity from penetrating depth (geometry damage); never past broken
pub fn severity_from_depth(damage: f64, constants: &WoundConstants) -> Severity {
    constants.depth.classify(damage).min(Severity::Broken)
}

/// Combine both curves for one layer
pub fn layer_severity(volume: f64, depth: f64, structural: bool, constants: &WoundConstants) -> Severity {
    let from_volume = severity_from_volume(volume, structural, constants);
    let from_depth = severity_from_depth(depth, constants);

    if structural {
        from_volume.max(from_depth)
    } else {
        from_volume.max(from_depth).min(Severity::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_steps() {
        let c = WoundConstants::default();
        assert_eq!(c.depth.classify(0.0), Severity::None);
        assert_eq!(c.depth.classify(0.05), Severity::Minor);
        assert_eq!(c.depth.classify(0.5), Severity::Inhibited);
        assert_eq!(c.depth.classify(1.0), Severity::Disabled);
        assert_eq!(c.depth.classify(100.0), Severity::Broken);
    }

    #[test]
    fn test_non_structural_capped_at_disabled() {
        let c = WoundConstants::default();
        assert_eq!(layer_severity(50.0, 50.0, false, &c), Severity::Disabled);
    }

    #[test]
    fn test_structural_missing_needs_volume() {
        let c = WoundConstants::default();
        // Depth alone caps at broken
        assert_eq!(layer_severity(0.0, 100.0, true, &c), Severity::Broken);
        assert_eq!(layer_severity(8.0, 0.0, true, &c), Severity::Missing);
        assert_eq!(layer_severity(4.0, 0.0, true, &c), Severity::Broken);
    }

    #[test]
    fn test_volume_non_structural_never_missing() {
        let c = WoundConstants::default();
        assert_eq!(severity_from_volume(20.0, false, &c), Severity::Broken);
        assert_eq!(severity_from_volume(20.0, true, &c), Severity::Missing);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::None < Severity::Minor);
        assert!(Severity::Broken < Severity::Missing);
        assert_eq!(Severity::all().len(), 6);
    }
}
