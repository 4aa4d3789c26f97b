use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::SimError;

pub const BASE_YEAR: i32 = 2025;
pub const BASE_RENEWABLE_SHARE: f64 = 20.0;
pub const BASE_COAL_SHARE: f64 = 40.0;

const RENEWABLE_GROWTH_PER_YEAR: f64 = 1.5;
const COAL_DECLINE_PER_YEAR: f64 = 0.8;
const EMISSIONS_REDUCTION_PER_YEAR: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    /// Current policies.
    #[default]
    Baseline,
    /// Aggressive transition.
    Aggressive,
    /// Technology breakthrough.
    Breakthrough,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [Scenario::Baseline, Scenario::Aggressive, Scenario::Breakthrough];

    /// Extra renewable share (percentage points) under this scenario.
    pub fn bonus(&self) -> f64 {
        match self {
            Scenario::Baseline => 0.0,
            Scenario::Aggressive => 15.0,
            Scenario::Breakthrough => 25.0,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::Baseline => "current policies",
            Scenario::Aggressive => "aggressive transition",
            Scenario::Breakthrough => "technology breakthrough",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::Baseline => write!(f, "baseline"),
            Scenario::Aggressive => write!(f, "aggressive"),
            Scenario::Breakthrough => write!(f, "breakthrough"),
        }
    }
}

impl FromStr for Scenario {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baseline" => Ok(Scenario::Baseline),
            "aggressive" => Ok(Scenario::Aggressive),
            "breakthrough" => Ok(Scenario::Breakthrough),
            _ => Err(SimError::UnknownScenario(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    pub year: i32,
    pub renewable_growth: f64,
    pub coal_decline: f64,
    pub emissions_reduction: f64,
    pub renewable_share: f64,
    pub coal_share: f64,
    pub scenario: Scenario,
    pub scenario_bonus: f64,
}

/// Linear projection from the base year. Shares are deliberately left
/// unclamped, so far-off years can leave the 0..=100 range.
pub fn project(year: i32, scenario: Scenario) -> Projection {
    let elapsed = (year - BASE_YEAR) as f64;
    let renewable_growth = elapsed * RENEWABLE_GROWTH_PER_YEAR;
    let coal_decline = elapsed * COAL_DECLINE_PER_YEAR;

    Projection {
        year,
        renewable_growth,
        coal_decline,
        emissions_reduction: elapsed * EMISSIONS_REDUCTION_PER_YEAR,
        renewable_share: BASE_RENEWABLE_SHARE + renewable_growth,
        coal_share: BASE_COAL_SHARE - coal_decline,
        scenario,
        scenario_bonus: scenario.bonus(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_2035() {
        let p = project(2035, Scenario::Baseline);
        assert!((p.renewable_share - 35.0).abs() < EPS);
        assert!((p.coal_share - 32.0).abs() < EPS);
        assert!((p.emissions_reduction - 20.0).abs() < EPS);
    }

    #[test]
    fn test_2050() {
        let p = project(2050, Scenario::Baseline);
        assert!((p.renewable_share - 57.5).abs() < EPS);
        assert!((p.coal_share - 20.0).abs() < EPS);
        assert!((p.emissions_reduction - 50.0).abs() < EPS);
    }

    #[test]
    fn test_values_are_not_clamped() {
        let p = project(2100, Scenario::Baseline);
        assert!((p.renewable_share - 132.5).abs() < EPS);
        assert!((p.coal_share - -20.0).abs() < EPS);
        assert!((p.emissions_reduction - 150.0).abs() < EPS);
    }

    #[test]
    fn test_bonus_is_informational() {
        let base = project(2040, Scenario::Baseline);
        for scenario in Scenario::ALL {
            let p = project(2040, scenario);
            assert_eq!(p.renewable_share, base.renewable_share);
            assert_eq!(p.scenario_bonus, scenario.bonus());
        }
        assert_eq!(project(2040, Scenario::Aggressive).scenario_bonus, 15.0);
        assert_eq!(project(2040, Scenario::Breakthrough).scenario_bonus, 25.0);
    }

    #[test]
    fn test_scenario_parsing() {
        assert_eq!("Aggressive".parse::<Scenario>().unwrap(), Scenario::Aggressive);
        assert!(matches!(
            "moonshot".parse::<Scenario>(),
            Err(SimError::UnknownScenario(_))
        ));
    }
}
