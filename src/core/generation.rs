use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{Result, SimError};

/// Hours in a (non-leap) year.
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Annual CO2 absorbed by one tree, in the same units as annual emissions.
pub const TREE_ABSORPTION: f64 = 0.022;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Coal,
    Gas,
    Nuclear,
    Hydro,
    Solar,
    Wind,
}

impl Source {
    pub const ALL: [Source; 6] = [
        Source::Coal,
        Source::Gas,
        Source::Nuclear,
        Source::Hydro,
        Source::Solar,
        Source::Wind,
    ];

    /// kgCO2 per kWh-equivalent.
    pub fn emission_factor(&self) -> f64 {
        match self {
            Source::Coal => 0.95,
            Source::Gas => 0.45,
            Source::Nuclear => 0.05,
            Source::Hydro => 0.01,
            Source::Solar => 0.02,
            Source::Wind => 0.01,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Source::Coal => "Coal",
            Source::Gas => "Gas",
            Source::Nuclear => "Nuclear",
            Source::Hydro => "Hydro",
            Source::Solar => "Solar",
            Source::Wind => "Wind",
        }
    }
}

/// Percentage share of each generation source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMix {
    pub coal: u32,
    pub gas: u32,
    pub nuclear: u32,
    pub hydro: u32,
    pub solar: u32,
    pub wind: u32,
}

impl GenerationMix {
    pub fn share(&self, source: Source) -> u32 {
        match source {
            Source::Coal => self.coal,
            Source::Gas => self.gas,
            Source::Nuclear => self.nuclear,
            Source::Hydro => self.hydro,
            Source::Solar => self.solar,
            Source::Wind => self.wind,
        }
    }

    pub fn total(&self) -> u32 {
        Source::ALL.iter().map(|s| self.share(*s)).sum()
    }

    /// Compute emissions for a mix whose shares add up to exactly 100%.
    pub fn assess(&self) -> Result<EmissionReport> {
        let total = self.total();
        if total != 100 {
            return Err(SimError::MixSum { total });
        }

        let intensity: f64 = Source::ALL
            .iter()
            .map(|s| self.share(*s) as f64 * s.emission_factor())
            .sum();
        let annual_emissions = intensity * HOURS_PER_YEAR;
        let trees_equivalent = annual_emissions / TREE_ABSORPTION;

        debug!(intensity, annual_emissions, trees_equivalent, "assessed generation mix");

        Ok(EmissionReport {
            shares: Source::ALL
                .iter()
                .map(|s| SourceShare { source: *s, percent: self.share(*s) })
                .collect(),
            intensity,
            annual_emissions,
            trees_equivalent,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceShare {
    pub source: Source,
    pub percent: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmissionReport {
    pub shares: Vec<SourceShare>,
    pub intensity: f64,
    pub annual_emissions: f64,
    pub trees_equivalent: f64,
}
