use serde::Serialize;

pub const ANIMATION_STEPS: u32 = 100;

pub const COMPLETION_MESSAGE: &str = "Energy transition complete! Carbon emissions down 60%!";

#[derive(Debug, Clone, Serialize)]
pub struct Headline {
    pub label: &'static str,
    pub value: &'static str,
    pub delta: &'static str,
}

pub fn headlines() -> Vec<Headline> {
    vec![
        Headline { label: "Global warming", value: "1.2°C", delta: "-0.3°C" },
        Headline { label: "Renewable share", value: "35%", delta: "+12%" },
        Headline { label: "Carbon price", value: "$45/t", delta: "+$15" },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStage {
    Afforestation,
    SolarInstallation,
    WindBuildout,
    GridGreening,
}

impl TransitionStage {
    /// Stage shown at a 0-based animation step.
    pub fn at_step(step: u32) -> Self {
        match step {
            0..=24 => TransitionStage::Afforestation,
            25..=49 => TransitionStage::SolarInstallation,
            50..=74 => TransitionStage::WindBuildout,
            _ => TransitionStage::GridGreening,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            TransitionStage::Afforestation => "🌱 Planting forests...",
            TransitionStage::SolarInstallation => "☀️ Installing solar panels...",
            TransitionStage::WindBuildout => "💨 Building wind farms...",
            TransitionStage::GridGreening => "⚡ Greening the grid...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_boundaries() {
        assert_eq!(TransitionStage::at_step(0), TransitionStage::Afforestation);
        assert_eq!(TransitionStage::at_step(24), TransitionStage::Afforestation);
        assert_eq!(TransitionStage::at_step(25), TransitionStage::SolarInstallation);
        assert_eq!(TransitionStage::at_step(50), TransitionStage::WindBuildout);
        assert_eq!(TransitionStage::at_step(75), TransitionStage::GridGreening);
        assert_eq!(TransitionStage::at_step(ANIMATION_STEPS - 1), TransitionStage::GridGreening);
    }
}
