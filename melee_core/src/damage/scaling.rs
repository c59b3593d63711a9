//! Stat scaling for damage amount and strike energy

use crate::agent::StatBlock;
use crate::config::StatScalingConstants;
use crate::types::Stat;
use serde::{Deserialize, Serialize};

/// Which stat a technique scales with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingStats {
    Stat(Stat),
    Average([Stat; 2]),
}

impl ScalingStats {
    pub fn value(&self, stats: &StatBlock) -> f64 {
        match self {
            ScalingStats::Stat(stat) => stats.get(*stat),
            ScalingStats::Average([a, b]) => (stats.get(*a) + stats.get(*b)) / 2.0,
        }
    }
}

impl Default for ScalingStats {
    fn default() -> Self {
        ScalingStats::Stat(Stat::Power)
    }
}

/// Stat-scaling descriptor on a technique
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatScaling {
    #[serde(default = "default_ratio")]
    pub ratio: f64,
    #[serde(default)]
    pub stats: ScalingStats,
}

fn default_ratio() -> f64 {
    1.0
}

impl Default for StatScaling {
    fn default() -> Self {
        StatScaling {
            ratio: 1.0,
            stats: ScalingStats::default(),
        }
    }
}

impl StatScaling {
    pub fn multiplier(&self, stats: &StatBlock, constants: &StatScalingConstants) -> f64 {
        stat_scaling_multiplier(self.stats.value(stats), self.ratio, constants)
    }
}

/// `1 + (normalize(value) - baselineNorm) * ratio`, floored at 0
///
/// A stat at the baseline maps to exactly 1.0.
pub fn stat_scaling_multiplier(value: f64, ratio: f64, constants: &StatScalingConstants) -> f64 {
    let deviation = constants.normalize(value) - constants.baseline_norm();
    (1.0 + deviation * ratio).max(0.0)
}

/// Mean of a stat group, e.g. [`Stat::velocity_group`]
pub fn group_value(stats: &StatBlock, group: &[Stat]) -> f64 {
    if group.is_empty() {
        return 0.0;
    }
    group.iter().map(|s| stats.get(*s)).sum::<f64>() / group.len() as f64
}

/// Scaling for strike velocity
pub fn velocity_scale(stats: &StatBlock, constants: &StatScalingConstants) -> f64 {
    stat_scaling_multiplier(
        group_value(stats, Stat::velocity_group()),
        constants.velocity_ratio,
        constants,
    )
}

/// Scaling for effective striking mass
pub fn mass_scale(stats: &StatBlock, constants: &StatScalingConstants) -> f64 {
    stat_scaling_multiplier(
        group_value(stats, Stat::mass_group()),
        constants.mass_ratio,
        constants,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_is_exactly_one() {
        let c = StatScalingConstants::default();
        for ratio in [0.0, 0.5, 1.0, 2.5] {
            assert_eq!(stat_scaling_multiplier(c.baseline, ratio, &c), 1.0);
        }
    }

    #[test]
    fn test_symmetric_deviation() {
        let c = StatScalingConstants::default();
        let above = stat_scaling_multiplier(7.5, 1.0, &c);
        let below = stat_scaling_multiplier(2.5, 1.0, &c);

        assert!((above - 1.25).abs() < f64::EPSILON);
        assert!((below - 0.75).abs() < f64::EPSILON);
        assert!(((above - 1.0) + (below - 1.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_floored_at_zero() {
        let c = StatScalingConstants::default();
        assert_eq!(stat_scaling_multiplier(0.0, 5.0, &c), 0.0);
    }

    #[test]
    fn test_average_scaling() {
        let mut stats = StatBlock::default();
        stats.power = 8.0;
        stats.dexterity = 4.0;

        let scaling = ScalingStats::Average([Stat::Power, Stat::Dexterity]);
        assert!((scaling.value(&stats) - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_baseline_agent_scales_to_one() {
        let c = StatScalingConstants::default();
        let stats = StatBlock::default();
        assert_eq!(velocity_scale(&stats, &c), 1.0);
        assert_eq!(mass_scale(&stats, &c), 1.0);
    }

    #[test]
    fn test_parse_scaling_descriptor() {
        let single: StatScaling = toml::from_str("ratio = 0.5\nstats = { stat = \"power\" }").unwrap();
        assert_eq!(single.stats, ScalingStats::Stat(Stat::Power));

        let avg: StatScaling =
            toml::from_str("stats = { average = [\"speed\", \"dexterity\"] }").unwrap();
        assert_eq!(avg.stats, ScalingStats::Average([Stat::Speed, Stat::Dexterity]));
        assert!((avg.ratio - 1.0).abs() < f64::EPSILON);
    }
}
